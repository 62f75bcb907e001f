//! Directory-block sequence validation
//!
//! Walks a mixed sequence of DS, view-change and fallback blocks in
//! order, starting from the local DS tip. Each accepted block appends
//! its writes to a deferred side-effect log and may mutate the working
//! copy of the committee roster; the walk stops at the first offending
//! block. Side effects of blocks accepted before the failure stay in
//! the log; the caller owns the decision to commit or discard them.
//!
//! Epoch bookkeeping: only a DS block advances the walk's DS number and
//! sharding hash. A view-change or fallback block applies *to* the next
//! DS epoch, which has not landed yet, so both leave the counters
//! untouched.

use tracing::{debug, warn};

use meridian_types::protocol::SHARDING_STRUCTURE_VERSION;
use meridian_types::{
    BlockKind, BlockLink, CommitteeRoster, CoSigned, DirBlock, DsBlock, FallbackBlockWithShards,
    ShardingHash, VcBlock,
};

use crate::cosig::CoSigVerifier;
use crate::crypto::CryptoAdapter;
use crate::error::{ValidationError, ValidationResult};
use crate::persistence::SideEffect;
use crate::roster::RosterMutator;
use crate::sharding::ShardingHasher;

/// The local DS tip the walk starts from.
#[derive(Clone, Copy, Debug)]
pub struct DirTip {
    /// DS block number at the tip.
    pub block_num: u64,
    /// Sharding hash committed by the tip.
    pub sharding_hash: ShardingHash,
}

/// Result of a directory walk.
///
/// `roster` is the evolved committee after the last accepted block and
/// is returned on success and failure alike; `side_effects` holds the
/// deferred writes of every accepted block in input order.
#[derive(Clone, Debug)]
pub struct DirWalkOutcome {
    pub roster: CommitteeRoster,
    pub side_effects: Vec<SideEffect>,
    pub failure: Option<ValidationError>,
}

impl DirWalkOutcome {
    /// True when every block in the sequence was accepted.
    pub fn ok(&self) -> bool {
        self.failure.is_none()
    }
}

/// Validates directory-block sequences and evolves the committee.
pub struct DirChainWalker<'a, C, M, H>
where
    C: CryptoAdapter + ?Sized,
    M: RosterMutator + ?Sized,
    H: ShardingHasher + ?Sized,
{
    cosig: CoSigVerifier<'a, C>,
    mutator: &'a M,
    hasher: &'a H,
}

impl<'a, C, M, H> DirChainWalker<'a, C, M, H>
where
    C: CryptoAdapter + ?Sized,
    M: RosterMutator + ?Sized,
    H: ShardingHasher + ?Sized,
{
    pub fn new(crypto: &'a C, mutator: &'a M, hasher: &'a H) -> Self {
        Self { cosig: CoSigVerifier::new(crypto), mutator, hasher }
    }

    /// Validate `dir_blocks` against the committee `initial_roster` and
    /// the local tip, assigning block-link indices from `start_index`.
    ///
    /// On a full walk, the outcome's DS number has advanced by the
    /// number of DS blocks in the input and exactly `dir_blocks.len()`
    /// links were logged.
    pub fn walk(
        &self,
        dir_blocks: &[DirBlock],
        initial_roster: &CommitteeRoster,
        start_index: u64,
        tip: &DirTip,
    ) -> DirWalkOutcome {
        let mut roster = initial_roster.clone();
        let mut side_effects = Vec::new();
        let mut prev_ds = tip.block_num;
        let mut prev_sharding_hash = tip.sharding_hash;
        let mut total_index = start_index;

        for dir_block in dir_blocks {
            let accepted = match dir_block {
                DirBlock::Ds(ds) => self
                    .accept_ds(ds, &mut roster, prev_ds, total_index, &mut side_effects)
                    .map(|sharding_hash| {
                        prev_ds += 1;
                        prev_sharding_hash = sharding_hash;
                    }),
                DirBlock::Vc(vc) => {
                    self.accept_vc(vc, &mut roster, prev_ds, total_index, &mut side_effects)
                }
                DirBlock::Fallback(fb) => self.accept_fallback(
                    fb,
                    &mut roster,
                    prev_ds,
                    prev_sharding_hash,
                    total_index,
                    &mut side_effects,
                ),
            };

            match accepted {
                Ok(()) => total_index += 1,
                Err(failure) => {
                    warn!(%failure, total_index, "directory walk stopped");
                    return DirWalkOutcome { roster, side_effects, failure: Some(failure) };
                }
            }
        }

        debug!(
            blocks = dir_blocks.len(),
            ds_tip = prev_ds,
            links = total_index - start_index,
            "directory walk complete"
        );
        DirWalkOutcome { roster, side_effects, failure: None }
    }

    /// DS block: next in sequence, co-signed by the current committee.
    /// Advances the walk's DS number and sharding hash (via the
    /// returned value) and evolves the committee.
    fn accept_ds(
        &self,
        block: &DsBlock,
        roster: &mut CommitteeRoster,
        prev_ds: u64,
        total_index: u64,
        log: &mut Vec<SideEffect>,
    ) -> ValidationResult<ShardingHash> {
        let block_num = block.header.block_num;
        if block_num != prev_ds + 1 {
            return Err(ValidationError::LinkageBroken(format!(
                "DS block {block_num} does not follow tip {prev_ds}"
            )));
        }

        self.cosig.verify(block, roster)?;

        log.push(SideEffect::AppendBlockLink(BlockLink::new(
            total_index,
            prev_ds + 1,
            BlockKind::Ds,
            block.block_hash(),
        )));
        log.push(SideEffect::StoreDsBlock { block_num, bytes: block.to_bytes() });
        log.push(SideEffect::ExtendDsChain(Box::new(block.clone())));

        self.mutator.on_ds_block(roster, block);

        debug!(block_num, "DS block accepted");
        Ok(block.header.sharding_hash)
    }

    /// View-change block: applies to the DS epoch currently being
    /// agreed (tip + 1), co-signed by the current committee.
    fn accept_vc(
        &self,
        block: &VcBlock,
        roster: &mut CommitteeRoster,
        prev_ds: u64,
        total_index: u64,
        log: &mut Vec<SideEffect>,
    ) -> ValidationResult<()> {
        let vc_epoch = block.header.vc_ds_epoch_num;
        if vc_epoch != prev_ds + 1 {
            return Err(ValidationError::LinkageBroken(format!(
                "VC block for DS epoch {vc_epoch} while processing {}",
                prev_ds + 1
            )));
        }

        self.cosig.verify(block, roster)?;

        self.mutator.on_vc_block(roster, block);

        let hash = block.block_hash();
        log.push(SideEffect::AppendBlockLink(BlockLink::new(
            total_index,
            prev_ds + 1,
            BlockKind::Vc,
            hash,
        )));
        log.push(SideEffect::StoreVcBlock { hash, bytes: block.to_bytes() });

        debug!(vc_epoch, "VC block accepted");
        Ok(())
    }

    /// Fallback block: applies to the DS epoch currently being agreed,
    /// its bundled shard structure must hash to the committed sharding
    /// hash, and it is co-signed by the named shard rather than the DS
    /// committee.
    fn accept_fallback(
        &self,
        bundle: &FallbackBlockWithShards,
        roster: &mut CommitteeRoster,
        prev_ds: u64,
        prev_sharding_hash: ShardingHash,
        total_index: u64,
        log: &mut Vec<SideEffect>,
    ) -> ValidationResult<()> {
        let block = &bundle.block;
        let fb_epoch = block.header.fallback_ds_epoch_num;
        if fb_epoch != prev_ds + 1 {
            return Err(ValidationError::LinkageBroken(format!(
                "fallback block for DS epoch {fb_epoch} while processing {}",
                prev_ds + 1
            )));
        }

        let computed = self
            .hasher
            .sharding_structure_hash(SHARDING_STRUCTURE_VERSION, &bundle.shards)?;
        if computed != prev_sharding_hash {
            return Err(ValidationError::LinkageBroken(
                "bundled shard structure does not hash to the committed sharding hash".into(),
            ));
        }

        let shard_id = block.header.shard_id;
        let signing_shard = bundle.shards.shard(shard_id).ok_or_else(|| {
            ValidationError::MalformedInput(format!(
                "shard id {shard_id} out of range for {} shards",
                bundle.shards.num_shards()
            ))
        })?;

        self.cosig.verify(block, signing_shard.as_slice())?;

        self.mutator.on_fallback(roster, block, &bundle.shards);

        let hash = block.block_hash();
        log.push(SideEffect::AppendBlockLink(BlockLink::new(
            total_index,
            prev_ds + 1,
            BlockKind::Fb,
            hash,
        )));
        log.push(SideEffect::StoreFallbackBlock { hash, bytes: bundle.to_bytes() });

        debug!(fb_epoch, shard_id, "fallback block accepted");
        Ok(())
    }
}
