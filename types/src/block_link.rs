//! Block links
//!
//! The block-link chain indexes every directory-layer block, whatever
//! its kind, in one strictly increasing total order. Each link records
//! which DS epoch the block belongs to and its hash.

use serde::{Deserialize, Serialize};

use crate::BlockHash;

/// Kind tag of a linked directory block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    Ds,
    Vc,
    Fb,
}

/// One entry of the block-link chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockLink {
    /// Position in the total order; strictly increasing, appended once.
    pub total_index: u64,
    /// DS epoch the linked block applies to.
    pub ds_index: u64,
    pub kind: BlockKind,
    pub hash: BlockHash,
}

impl BlockLink {
    pub fn new(total_index: u64, ds_index: u64, kind: BlockKind, hash: BlockHash) -> Self {
        Self { total_index, ds_index, kind, hash }
    }
}
