//! Directory-layer blocks
//!
//! Three block kinds govern the directory committee:
//!
//! - `DsBlock` opens a new DS epoch, commits to that epoch's shard
//!   structure, and carries the PoW winners inducted into the committee.
//! - `VcBlock` records a view change performed while the next DS epoch
//!   was being agreed; it rotates faulty leaders without advancing the
//!   epoch.
//! - `FallbackBlock` is the recovery path when DS consensus stalls: a
//!   single shard takes over, so it is co-signed by that shard rather
//!   than the DS committee, and ships the shard structure it claims to
//!   operate under.

use serde::{Deserialize, Serialize};

use crate::committee::{CommitteeMember, Peer};
use crate::cosig::{CoSignatures, CoSigned};
use crate::keys::PublicKey;
use crate::sharding::ShardStructure;
use crate::wire::{put_u128, put_u32, put_u64};
use crate::ShardingHash;

/// Header of a directory-service block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DsBlockHeader {
    /// DS block number; advances by exactly one per DS block.
    pub block_num: u64,
    /// Transaction epoch at which this DS block was produced.
    pub epoch_num: u64,
    /// Gas-price floor every transaction under this epoch must meet.
    pub gas_price: u128,
    /// Commitment to the shard structure adopted at this epoch.
    pub sharding_hash: ShardingHash,
    pub leader_pub_key: PublicKey,
    /// PoW winners inducted into the DS committee by this block.
    pub pow_ds_winners: Vec<CommitteeMember>,
}

/// A directory-service block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DsBlock {
    pub header: DsBlockHeader,
    pub cosigs: CoSignatures,
}

impl DsBlock {
    pub fn new(header: DsBlockHeader, cosigs: CoSignatures) -> Self {
        Self { header, cosigs }
    }

    /// Full wire form: header followed by the co-signature envelope.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = self.serialized_header();
        self.cosigs.write_bytes(&mut out);
        out
    }
}

impl CoSigned for DsBlock {
    fn serialized_header(&self) -> Vec<u8> {
        let mut out = Vec::new();
        put_u64(&mut out, self.header.block_num);
        put_u64(&mut out, self.header.epoch_num);
        put_u128(&mut out, self.header.gas_price);
        out.extend_from_slice(&self.header.sharding_hash);
        out.extend_from_slice(self.header.leader_pub_key.as_bytes());
        put_u32(&mut out, self.header.pow_ds_winners.len() as u32);
        for winner in &self.header.pow_ds_winners {
            winner.write_bytes(&mut out);
        }
        out
    }

    fn cosignatures(&self) -> &CoSignatures {
        &self.cosigs
    }
}

/// Header of a view-change block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VcBlockHeader {
    /// DS epoch the view change applies to (the one not yet landed).
    pub vc_ds_epoch_num: u64,
    /// Transaction epoch at which the view change happened.
    pub vc_epoch_num: u64,
    pub candidate_leader_pub_key: PublicKey,
    pub candidate_leader_peer: Peer,
    /// How many view changes this epoch has already seen.
    pub vc_counter: u32,
    /// Leaders voted out by this view change.
    pub faulty_leaders: Vec<CommitteeMember>,
}

/// A view-change block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VcBlock {
    pub header: VcBlockHeader,
    pub cosigs: CoSignatures,
}

impl VcBlock {
    pub fn new(header: VcBlockHeader, cosigs: CoSignatures) -> Self {
        Self { header, cosigs }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = self.serialized_header();
        self.cosigs.write_bytes(&mut out);
        out
    }
}

impl CoSigned for VcBlock {
    fn serialized_header(&self) -> Vec<u8> {
        let mut out = Vec::new();
        put_u64(&mut out, self.header.vc_ds_epoch_num);
        put_u64(&mut out, self.header.vc_epoch_num);
        out.extend_from_slice(self.header.candidate_leader_pub_key.as_bytes());
        self.header.candidate_leader_peer.write_bytes(&mut out);
        put_u32(&mut out, self.header.vc_counter);
        put_u32(&mut out, self.header.faulty_leaders.len() as u32);
        for leader in &self.header.faulty_leaders {
            leader.write_bytes(&mut out);
        }
        out
    }

    fn cosignatures(&self) -> &CoSignatures {
        &self.cosigs
    }
}

/// Header of a fallback block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackBlockHeader {
    /// DS epoch the fallback applies to (the one not yet landed).
    pub fallback_ds_epoch_num: u64,
    /// Transaction epoch at which the fallback happened.
    pub fallback_epoch_num: u64,
    /// The shard that took over; indexes into the bundled structure.
    pub shard_id: u32,
    pub leader_pub_key: PublicKey,
    pub leader_peer: Peer,
}

/// A fallback block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackBlock {
    pub header: FallbackBlockHeader,
    pub cosigs: CoSignatures,
}

impl FallbackBlock {
    pub fn new(header: FallbackBlockHeader, cosigs: CoSignatures) -> Self {
        Self { header, cosigs }
    }
}

impl CoSigned for FallbackBlock {
    fn serialized_header(&self) -> Vec<u8> {
        let mut out = Vec::new();
        put_u64(&mut out, self.header.fallback_ds_epoch_num);
        put_u64(&mut out, self.header.fallback_epoch_num);
        put_u32(&mut out, self.header.shard_id);
        out.extend_from_slice(self.header.leader_pub_key.as_bytes());
        self.header.leader_peer.write_bytes(&mut out);
        out
    }

    fn cosignatures(&self) -> &CoSignatures {
        &self.cosigs
    }
}

/// A fallback block bundled with the shard structure it operated under.
/// Receivers recheck that the structure hashes to the sharding
/// commitment of the previous DS block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackBlockWithShards {
    pub block: FallbackBlock,
    pub shards: ShardStructure,
}

impl FallbackBlockWithShards {
    pub fn new(block: FallbackBlock, shards: ShardStructure) -> Self {
        Self { block, shards }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = self.block.serialized_header();
        self.block.cosigs.write_bytes(&mut out);
        out.extend_from_slice(
            &self
                .shards
                .canonical_bytes(crate::protocol::SHARDING_STRUCTURE_VERSION),
        );
        out
    }
}

/// One entry of a directory-block sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirBlock {
    Ds(DsBlock),
    Vc(VcBlock),
    Fallback(FallbackBlockWithShards),
}
