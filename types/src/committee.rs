//! Committee rosters
//!
//! A roster is the ordered list of `(public key, network identity)`
//! pairs making up the directory committee at some point in its
//! evolution. Order matters: the two co-signature bitmaps on every block
//! are index-aligned with the roster that signed it.

use std::collections::VecDeque;
use std::net::{IpAddr, Ipv4Addr};

use serde::{Deserialize, Serialize};

use crate::keys::PublicKey;
use crate::wire::put_u16;

/// Network identity of a committee or shard member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Peer {
    pub ip: IpAddr,
    pub port: u16,
}

impl Peer {
    pub fn new(ip: IpAddr, port: u16) -> Self {
        Self { ip, port }
    }

    /// Canonical wire form: 16-byte IPv6-mapped address then the port.
    pub(crate) fn write_bytes(&self, out: &mut Vec<u8>) {
        let v6 = match self.ip {
            IpAddr::V4(v4) => v4.to_ipv6_mapped(),
            IpAddr::V6(v6) => v6,
        };
        out.extend_from_slice(&v6.octets());
        put_u16(out, self.port);
    }
}

impl Default for Peer {
    fn default() -> Self {
        Self { ip: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 0 }
    }
}

/// One entry of the directory committee.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitteeMember {
    pub pub_key: PublicKey,
    pub peer: Peer,
}

impl CommitteeMember {
    pub fn new(pub_key: PublicKey, peer: Peer) -> Self {
        Self { pub_key, peer }
    }

    pub(crate) fn write_bytes(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.pub_key.as_bytes());
        self.peer.write_bytes(out);
    }
}

/// An ordered set of public keys a block's bitmaps index into.
///
/// Implemented by the directory committee and by individual shards, so
/// co-signature verification works against either.
pub trait SignerSet {
    fn member_count(&self) -> usize;
    fn public_key_at(&self, index: usize) -> &PublicKey;
}

/// The ordered directory committee.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitteeRoster {
    members: VecDeque<CommitteeMember>,
}

impl CommitteeRoster {
    pub fn new() -> Self {
        Self { members: VecDeque::new() }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CommitteeMember> {
        self.members.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommitteeMember> {
        self.members.iter()
    }

    /// Index of the first member holding `key`, if present.
    pub fn position(&self, key: &PublicKey) -> Option<usize> {
        self.members.iter().position(|m| m.pub_key == *key)
    }

    /// Induct a member at the head of the roster.
    pub fn push_front(&mut self, member: CommitteeMember) {
        self.members.push_front(member);
    }

    /// Append a member at the tail of the roster.
    pub fn push_back(&mut self, member: CommitteeMember) {
        self.members.push_back(member);
    }

    /// Expel the tail member.
    pub fn pop_back(&mut self) -> Option<CommitteeMember> {
        self.members.pop_back()
    }

    /// Remove the member at `index`, shifting later members forward.
    pub fn remove(&mut self, index: usize) -> Option<CommitteeMember> {
        self.members.remove(index)
    }
}

impl FromIterator<CommitteeMember> for CommitteeRoster {
    fn from_iter<I: IntoIterator<Item = CommitteeMember>>(iter: I) -> Self {
        Self { members: iter.into_iter().collect() }
    }
}

impl SignerSet for CommitteeRoster {
    fn member_count(&self) -> usize {
        self.members.len()
    }

    fn public_key_at(&self, index: usize) -> &PublicKey {
        &self.members[index].pub_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(tag: u8) -> CommitteeMember {
        CommitteeMember::new(PublicKey([tag; 33]), Peer::new([10, 0, 0, tag].into(), 9000))
    }

    #[test]
    fn test_roster_order_and_position() {
        let roster: CommitteeRoster = (1..=4).map(member).collect();
        assert_eq!(roster.len(), 4);
        assert_eq!(roster.position(&PublicKey([3; 33])), Some(2));
        assert_eq!(roster.position(&PublicKey([9; 33])), None);
    }

    #[test]
    fn test_front_induction_back_expulsion() {
        let mut roster: CommitteeRoster = (1..=3).map(member).collect();
        roster.push_front(member(9));
        let expelled = roster.pop_back().unwrap();

        assert_eq!(roster.len(), 3);
        assert_eq!(roster.get(0).unwrap().pub_key, PublicKey([9; 33]));
        assert_eq!(expelled.pub_key, PublicKey([3; 33]));
    }

    #[test]
    fn test_signer_set_view() {
        let roster: CommitteeRoster = (1..=2).map(member).collect();
        assert_eq!(roster.member_count(), 2);
        assert_eq!(*roster.public_key_at(1), PublicKey([2; 33]));
    }
}
