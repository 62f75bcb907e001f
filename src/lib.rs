//! Meridian: validation core of a sharded blockchain node
//!
//! This is the root crate that re-exports all Meridian components for
//! integration testing and provides unified access to the protocol
//! types.
//!
//! ## Architecture Overview
//!
//! Every inbound artifact from a peer (a transaction, a directory
//! block sequence, a transaction block sequence) passes through the
//! validation core before it may touch local chain state:
//!
//! - **Transactions** are checked for chain identity, shard routing,
//!   the gas-price floor, signature validity, and ledger state.
//! - **Directory block sequences** (DS, view-change, fallback) are
//!   walked in order: linkage, threshold co-signatures, and the
//!   sharding-hash commitment are verified while the directory
//!   committee roster evolves deterministically block by block.
//! - **Transaction block sequences** are anchored by the tip's
//!   co-signature under the current DS committee and linked backwards
//!   through parent hashes.
//!
//! ## Crate Organization
//!
//! - `meridian-types`: wire-level data model (blocks, transactions,
//!   rosters, shard structures, the bitvector codec)
//! - `meridian-validation`: the three validators and the collaborator
//!   traits they consume (crypto, accounts, persistence, roster rules)

pub use meridian_types as types;
pub use meridian_validation as validation;

pub use meridian_types::protocol;

/// Meridian protocol version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
