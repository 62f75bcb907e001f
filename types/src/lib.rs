//! Wire-level data model for the Meridian sharded chain
//!
//! Everything a validating node exchanges with its peers lives here:
//! transactions, the three directory-layer block kinds (DS, view-change,
//! fallback), transaction blocks, the two-round co-signature envelope,
//! committee rosters, shard structures, and the block-link chain that
//! indexes all directory blocks in one total order.
//!
//! Serialization comes in two flavors:
//!
//! - `serde` derives for storage and API use.
//! - Hand-written canonical byte layouts (`serialized_header`,
//!   `serialize_core_fields`, `canonical_bytes`) for everything that is
//!   hashed or signed. These are fixed-width big-endian and part of the
//!   wire contract; all nodes must agree on them bit for bit.

mod wire;

pub mod account;
pub mod bitvec;
pub mod block_link;
pub mod committee;
pub mod cosig;
pub mod dir_block;
pub mod keys;
pub mod protocol;
pub mod sharding;
pub mod transaction;
pub mod tx_block;

pub use account::Address;
pub use block_link::{BlockKind, BlockLink};
pub use committee::{CommitteeMember, CommitteeRoster, Peer, SignerSet};
pub use cosig::{CoSignatures, CoSigned};
pub use dir_block::{
    DirBlock, DsBlock, DsBlockHeader, FallbackBlock, FallbackBlockHeader,
    FallbackBlockWithShards, VcBlock, VcBlockHeader,
};
pub use keys::{PublicKey, Signature};
pub use sharding::{Shard, ShardMember, ShardStructure};
pub use transaction::{shard_of, Transaction, TxReceipt};
pub use tx_block::{TxBlock, TxBlockHeader};

/// A 32-byte block hash (SHA-256 of a canonical header serialization).
pub type BlockHash = [u8; 32];

/// A 32-byte commitment to the shard structure of an epoch.
pub type ShardingHash = [u8; 32];

/// A 32-byte transaction id.
pub type TxHash = [u8; 32];
