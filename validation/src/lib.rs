//! Meridian validation core
//!
//! The consensus-critical admission path: every transaction, directory
//! block sequence, and transaction block sequence received from a peer
//! flows through this crate before it may touch local chain state.
//!
//! Three validators:
//!
//! - [`TxValidator`]: single-transaction admission covering chain identity,
//!   shard routing, gas floor, signature, ledger state.
//! - [`DirChainWalker`]: walks a mixed sequence of DS, view-change and
//!   fallback blocks, verifies linkage and co-signatures, and evolves
//!   the directory committee roster as it goes.
//! - [`TxChainWalker`]: verifies the tip transaction block against the
//!   current DS committee and the backwards parent-hash chain.
//!
//! Every external collaborator (crypto primitives, account state,
//! persistence, roster mutation rules, the live node view) is an
//! injected trait, so every one of them can be replaced by a double in
//! tests. Validators execute synchronously on the caller's thread, hold
//! no locks, and own no shared state; mutable resources passed in are
//! caller-owned.

pub mod accounts;
pub mod cosig;
pub mod crypto;
pub mod dir_chain;
pub mod error;
pub mod persistence;
pub mod roster;
pub mod sharding;
pub mod tx_chain;
pub mod tx_validator;

#[cfg(test)]
pub(crate) mod test_support;

pub use accounts::{AccountView, TempAccountStore};
pub use cosig::CoSigVerifier;
pub use crypto::CryptoAdapter;
pub use dir_chain::{DirChainWalker, DirTip, DirWalkOutcome};
pub use error::{ValidationError, ValidationResult};
pub use persistence::{commit_side_effects, DsChain, Persistence, SideEffect, StoreError, StoreResult};
pub use roster::{RosterMutator, StandardRosterMutator};
pub use sharding::{CanonicalShardingHasher, ShardingHasher};
pub use tx_chain::{TxBlockVerdict, TxChainWalker};
pub use tx_validator::TxValidator;

/// Static role and identity configuration of the validating node.
#[derive(Clone, Debug)]
pub struct ValidatorConfig {
    /// Chain identifier transactions must carry in their version word.
    pub chain_id: u16,
    /// Lookup nodes forward rather than judge; both transaction checks
    /// short-circuit to accept (with a warning) under this flag.
    pub lookup_node_mode: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self { chain_id: 1, lookup_node_mode: false }
    }
}

/// Live chain state the validators consult.
///
/// Supplied by the node runtime; the values move with the chain tip, so
/// the core reads them through this trait instead of caching them.
pub trait NodeView {
    /// Current transaction epoch (stamped into receipts).
    fn current_epoch(&self) -> u64;

    /// Number of shards in the current sharding structure.
    fn num_shards(&self) -> u32;

    /// Shard this node validates for.
    fn shard_id(&self) -> u32;

    /// True when the directory service is idle, i.e. this node is
    /// acting as an ordinary shard node and shard routing applies.
    fn is_ds_idle(&self) -> bool;

    /// Gas-price floor: the gas price of the latest DS block header.
    fn min_gas_price(&self) -> u128;
}
