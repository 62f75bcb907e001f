//! Sharding-structure commitment
//!
//! A fallback block ships the shard structure it claims to operate
//! under; the walker hashes it and compares against the commitment in
//! the previous DS block. The hash function is injected so deployments
//! with an external wire codec can keep it bit-exact with their peers.

use sha2::{Digest, Sha256};

use meridian_types::{ShardStructure, ShardingHash};

use crate::error::ValidationResult;

/// Computes the 32-byte sharding-structure commitment.
pub trait ShardingHasher {
    fn sharding_structure_hash(
        &self,
        version: u32,
        shards: &ShardStructure,
    ) -> ValidationResult<ShardingHash>;
}

/// SHA-256 over the canonical shard-structure serialization.
pub struct CanonicalShardingHasher;

impl ShardingHasher for CanonicalShardingHasher {
    fn sharding_structure_hash(
        &self,
        version: u32,
        shards: &ShardStructure,
    ) -> ValidationResult<ShardingHash> {
        Ok(Sha256::digest(shards.canonical_bytes(version)).into())
    }
}
