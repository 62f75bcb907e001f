//! Shard structure
//!
//! The ordered set of shards adopted at a DS epoch, each an ordered list
//! of members. A DS block commits to this structure through its sharding
//! hash: SHA-256 over the canonical serialization below. Fallback blocks
//! ship the full structure so receivers can recheck that commitment.

use serde::{Deserialize, Serialize};

use crate::committee::{Peer, SignerSet};
use crate::keys::PublicKey;
use crate::wire::{put_u16, put_u32};

/// One node of one shard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardMember {
    pub pub_key: PublicKey,
    pub peer: Peer,
    pub reputation: u16,
}

/// An ordered shard committee.
pub type Shard = Vec<ShardMember>;

impl SignerSet for [ShardMember] {
    fn member_count(&self) -> usize {
        self.len()
    }

    fn public_key_at(&self, index: usize) -> &PublicKey {
        &self[index].pub_key
    }
}

/// The full sharding structure of one DS epoch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardStructure {
    pub shards: Vec<Shard>,
}

impl ShardStructure {
    pub fn new(shards: Vec<Shard>) -> Self {
        Self { shards }
    }

    pub fn num_shards(&self) -> usize {
        self.shards.len()
    }

    pub fn shard(&self, shard_id: u32) -> Option<&Shard> {
        self.shards.get(shard_id as usize)
    }

    /// Canonical serialization hashed into the sharding commitment.
    pub fn canonical_bytes(&self, version: u32) -> Vec<u8> {
        let mut out = Vec::new();
        put_u32(&mut out, version);
        put_u32(&mut out, self.shards.len() as u32);
        for shard in &self.shards {
            put_u32(&mut out, shard.len() as u32);
            for member in shard {
                out.extend_from_slice(member.pub_key.as_bytes());
                member.peer.write_bytes(&mut out);
                put_u16(&mut out, member.reputation);
            }
        }
        out
    }
}
