//! Transaction blocks
//!
//! Transaction blocks form a hash chain under a DS epoch: each header
//! names its predecessor's hash, and a block's own hash is the SHA-256
//! of its canonical header serialization. Adjacent blocks therefore
//! satisfy `self_hash(i) == prev_hash(i + 1)`.

use serde::{Deserialize, Serialize};

use crate::cosig::{CoSignatures, CoSigned};
use crate::wire::put_u64;
use crate::BlockHash;

/// Header of a transaction block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxBlockHeader {
    pub block_num: u64,
    /// DS epoch this transaction block sits under.
    pub ds_block_num: u64,
    pub gas_used: u64,
    /// Hash of the preceding transaction block.
    pub prev_hash: BlockHash,
}

/// A transaction block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxBlock {
    pub header: TxBlockHeader,
    pub cosigs: CoSignatures,
}

impl TxBlock {
    pub fn new(header: TxBlockHeader, cosigs: CoSignatures) -> Self {
        Self { header, cosigs }
    }

    /// This block's own hash, as the next block's `prev_hash` names it.
    pub fn my_hash(&self) -> BlockHash {
        self.block_hash()
    }
}

impl CoSigned for TxBlock {
    fn serialized_header(&self) -> Vec<u8> {
        let mut out = Vec::new();
        put_u64(&mut out, self.header.block_num);
        put_u64(&mut out, self.header.ds_block_num);
        put_u64(&mut out, self.header.gas_used);
        out.extend_from_slice(&self.header.prev_hash);
        out
    }

    fn cosignatures(&self) -> &CoSignatures {
        &self.cosigs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_block(block_num: u64, prev_hash: BlockHash) -> TxBlock {
        TxBlock::new(
            TxBlockHeader { block_num, ds_block_num: 1, gas_used: 0, prev_hash },
            CoSignatures::empty(4),
        )
    }

    #[test]
    fn test_chain_law() {
        let a = create_test_block(10, [0u8; 32]);
        let b = create_test_block(11, a.my_hash());
        assert_eq!(a.my_hash(), b.header.prev_hash);
        assert_ne!(a.my_hash(), b.my_hash());
    }

    #[test]
    fn test_hash_covers_every_header_field() {
        let base = create_test_block(10, [1u8; 32]);
        let mut other = base.clone();
        other.header.ds_block_num += 1;
        assert_ne!(base.my_hash(), other.my_hash());

        let mut other = base.clone();
        other.header.gas_used = 7;
        assert_ne!(base.my_hash(), other.my_hash());
    }
}
