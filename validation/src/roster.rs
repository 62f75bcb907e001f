//! Committee evolution rules
//!
//! Each directory block kind mutates the DS committee differently. The
//! rules are deterministic and shared network-wide; the walker consumes
//! them through [`RosterMutator`] so deployments can swap in their own
//! contract. [`StandardRosterMutator`] is the reference rule set.

use meridian_types::{
    CommitteeMember, CommitteeRoster, DsBlock, FallbackBlock, ShardStructure, VcBlock,
};

/// The three committee-evolution hooks, one per directory block kind.
pub trait RosterMutator {
    /// Applied after a DS block is accepted.
    fn on_ds_block(&self, roster: &mut CommitteeRoster, block: &DsBlock);

    /// Applied after a view-change block is accepted.
    fn on_vc_block(&self, roster: &mut CommitteeRoster, block: &VcBlock);

    /// Applied after a fallback block is accepted, with the shard
    /// structure it operated under.
    fn on_fallback(&self, roster: &mut CommitteeRoster, block: &FallbackBlock, shards: &ShardStructure);
}

/// Reference evolution rules.
///
/// - DS block: each PoW winner is inducted at the head and one
///   incumbent expelled from the tail, keeping the committee size
///   fixed.
/// - VC block: every faulty leader present in the roster is rotated to
///   the tail; membership is unchanged.
/// - Fallback: the shard leader is promoted to the head and the tail
///   incumbent expelled.
pub struct StandardRosterMutator;

impl RosterMutator for StandardRosterMutator {
    fn on_ds_block(&self, roster: &mut CommitteeRoster, block: &DsBlock) {
        for winner in &block.header.pow_ds_winners {
            roster.push_front(*winner);
            roster.pop_back();
        }
    }

    fn on_vc_block(&self, roster: &mut CommitteeRoster, block: &VcBlock) {
        for faulty in &block.header.faulty_leaders {
            if let Some(position) = roster.position(&faulty.pub_key) {
                if let Some(member) = roster.remove(position) {
                    roster.push_back(member);
                }
            }
        }
    }

    fn on_fallback(
        &self,
        roster: &mut CommitteeRoster,
        block: &FallbackBlock,
        _shards: &ShardStructure,
    ) {
        roster.push_front(CommitteeMember::new(
            block.header.leader_pub_key,
            block.header.leader_peer,
        ));
        roster.pop_back();
    }
}
