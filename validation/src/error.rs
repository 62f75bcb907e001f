//! Validation errors
//!
//! The public verdict surface stays boolean (or the three-valued
//! transaction-block verdict); these kinds carry the detailed reason
//! into outcome structs and the structured log. All of them are
//! permanent rejections except `StaleDsInfo`, which asks the caller to
//! refetch the directory view and retry.

use meridian_types::Address;
use thiserror::Error;

/// Validation result type
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Reasons the core rejects an artifact.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Undecodable or impossible input (null sender, unknown shard id).
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Transaction carries the wrong chain identifier.
    #[error("chain id mismatch: got {got}, expected {expected}")]
    ChainIdMismatch { got: u16, expected: u16 },

    /// Sender is not assigned to this node's shard.
    #[error("sender shard {sender_shard} is not this shard {local_shard}")]
    ShardMisroute { sender_shard: u32, local_shard: u32 },

    /// Contract call whose recipient lives in another shard.
    #[error("cross-shard contract call: sender shard {sender_shard}, recipient shard {recipient_shard}")]
    CrossShardCall { sender_shard: u32, recipient_shard: u32 },

    /// Gas price below the DS-tip floor.
    #[error("gas price {got} below minimum allowable {floor}")]
    GasFloorViolation { got: u128, floor: u128 },

    /// Single or aggregate signature check failed.
    #[error("signature verification failed")]
    SignatureInvalid,

    /// Sender account not present in local state.
    #[error("sender account {0} not found")]
    UnknownSender(Address),

    /// Sender balance cannot cover the transfer amount.
    #[error("insufficient funds: balance {balance}, debit {amount}")]
    InsufficientBalance { balance: u128, amount: u128 },

    /// Tentative application to the account-store snapshot rejected.
    #[error("temporary account-store update rejected")]
    TempStoreRejected,

    /// Non-sequential DS number, parent-hash mismatch, or sharding-hash
    /// mismatch; rejects the whole sequence at the offending block.
    #[error("broken linkage: {0}")]
    LinkageBroken(String),

    /// Committee size and round-2 bitmap disagree.
    #[error("committee size {committee} does not match co-sig bitmap size {bitmap}")]
    BitmapMismatch { committee: usize, bitmap: usize },

    /// Not enough round-2 co-signers.
    #[error("co-signature from {signers} of {committee} signers, need {required}")]
    ThresholdUnmet { signers: usize, committee: usize, required: usize },

    /// The caller's directory view is behind the fetched tip.
    #[error("stale directory view; refetch directory and transaction blocks")]
    StaleDsInfo,
}
