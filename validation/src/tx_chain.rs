//! Transaction-block sequence validation
//!
//! Only the tip block's co-signature is verified against the DS
//! committee; every older block in the sequence is covered transitively
//! by the backwards parent-hash walk, since the tip's valid co-sig
//! anchors the run. The walk performs no side effects.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use meridian_types::{BlockKind, BlockLink, CommitteeRoster, TxBlock};

use crate::cosig::CoSigVerifier;
use crate::crypto::CryptoAdapter;

/// Wire-observable verdict of a transaction-block sequence check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxBlockVerdict {
    Valid,
    Invalid,
    /// The caller's directory view is behind the fetched tip; refetch
    /// directory and transaction blocks, then retry.
    StaleDsInfo,
}

/// Validates the tip transaction block plus its backwards hash chain.
pub struct TxChainWalker<'a, C: CryptoAdapter + ?Sized> {
    cosig: CoSigVerifier<'a, C>,
}

impl<'a, C: CryptoAdapter + ?Sized> TxChainWalker<'a, C> {
    pub fn new(crypto: &'a C) -> Self {
        Self { cosig: CoSigVerifier::new(crypto) }
    }

    /// Check a non-empty transaction-block sequence ending at the tip,
    /// given the current DS committee and the newest directory link.
    pub fn check_tx_blocks(
        &self,
        tx_blocks: &[TxBlock],
        ds_committee: &CommitteeRoster,
        latest_block_link: &BlockLink,
    ) -> TxBlockVerdict {
        let Some(tip) = tx_blocks.last() else {
            warn!("empty transaction-block sequence");
            return TxBlockVerdict::Invalid;
        };

        // A non-DS link applies to the DS epoch still being agreed, so
        // the epoch transaction blocks sit under is one lower.
        let expected_ds = match latest_block_link.kind {
            BlockKind::Ds => latest_block_link.ds_index,
            _ if latest_block_link.ds_index == 0 => {
                warn!("latest block link is non-DS at DS index 0");
                return TxBlockVerdict::Invalid;
            }
            _ => latest_block_link.ds_index - 1,
        };

        let tip_ds = tip.header.ds_block_num;
        if tip_ds != expected_ds {
            if expected_ds > tip_ds {
                warn!(tip_ds, expected_ds, "fetched transaction-block tip is stale");
                return TxBlockVerdict::Invalid;
            }
            warn!(tip_ds, expected_ds, "directory view behind tip; refetch");
            return TxBlockVerdict::StaleDsInfo;
        }

        if let Err(reason) = self.cosig.verify(tip, ds_committee) {
            warn!(%reason, block_num = tip.header.block_num, "tip co-signature rejected");
            return TxBlockVerdict::Invalid;
        }

        if tx_blocks.len() < 2 {
            return TxBlockVerdict::Valid;
        }

        let mut prev_hash = tip.header.prev_hash;
        for block in tx_blocks[..tx_blocks.len() - 1].iter().rev() {
            if prev_hash != block.my_hash() {
                warn!(
                    block_num = block.header.block_num,
                    expected = %hex::encode(&prev_hash[..8]),
                    "parent hash does not match block hash"
                );
                return TxBlockVerdict::Invalid;
            }
            prev_hash = block.header.prev_hash;
        }

        debug!(
            blocks = tx_blocks.len(),
            tip = tip.header.block_num,
            "transaction-block sequence verified"
        );
        TxBlockVerdict::Valid
    }
}
