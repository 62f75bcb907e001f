//! Deferred side effects and the persistence seam
//!
//! The directory walker does not write anywhere. It records what an
//! accepted block implies (a block link, a serialized block to store,
//! a chain extension) in an ordered [`SideEffect`] log, and the caller
//! commits the log through these traits. A failed walk therefore leaves
//! storage untouched unless the caller chooses to commit the prefix.

use thiserror::Error;

use meridian_types::{BlockHash, BlockLink, DsBlock};

/// Storage write failure, surfaced verbatim to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("storage rejected write: {0}")]
pub struct StoreError(pub String);

/// Storage write result type
pub type StoreResult = Result<(), StoreError>;

/// Durable block storage as the commit path consumes it.
pub trait Persistence {
    fn put_ds_block(&mut self, block_num: u64, bytes: &[u8]) -> StoreResult;
    fn put_vc_block(&mut self, hash: &BlockHash, bytes: &[u8]) -> StoreResult;
    fn put_fallback_block(&mut self, hash: &BlockHash, bytes: &[u8]) -> StoreResult;
    fn append_block_link(&mut self, link: &BlockLink) -> StoreResult;
}

/// The live DS block chain.
pub trait DsChain {
    fn latest_ds_block(&self) -> Option<&DsBlock>;
    fn append_ds_block(&mut self, block: DsBlock) -> StoreResult;
}

/// One deferred write implied by an accepted directory block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SideEffect {
    AppendBlockLink(BlockLink),
    StoreDsBlock { block_num: u64, bytes: Vec<u8> },
    ExtendDsChain(Box<DsBlock>),
    StoreVcBlock { hash: BlockHash, bytes: Vec<u8> },
    StoreFallbackBlock { hash: BlockHash, bytes: Vec<u8> },
}

/// Apply a side-effect log in order, stopping at the first storage
/// failure.
pub fn commit_side_effects<P, D>(log: &[SideEffect], store: &mut P, chain: &mut D) -> StoreResult
where
    P: Persistence + ?Sized,
    D: DsChain + ?Sized,
{
    for effect in log {
        match effect {
            SideEffect::AppendBlockLink(link) => store.append_block_link(link)?,
            SideEffect::StoreDsBlock { block_num, bytes } => store.put_ds_block(*block_num, bytes)?,
            SideEffect::ExtendDsChain(block) => chain.append_ds_block((**block).clone())?,
            SideEffect::StoreVcBlock { hash, bytes } => store.put_vc_block(hash, bytes)?,
            SideEffect::StoreFallbackBlock { hash, bytes } => {
                store.put_fallback_block(hash, bytes)?
            }
        }
    }
    Ok(())
}
