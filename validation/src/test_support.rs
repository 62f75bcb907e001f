//! Deterministic doubles shared by the unit tests

use std::collections::HashMap;

use sha2::{Digest, Sha256};

use meridian_types::{
    bitvec, Address, CommitteeMember, CommitteeRoster, CoSignatures, Peer, PublicKey, Signature,
    Transaction, TxReceipt,
};

use crate::accounts::{AccountView, TempAccountStore};
use crate::crypto::CryptoAdapter;
use crate::NodeView;

/// Stand-in for the Schnorr adapter: a "signature" is a recomputable
/// tag over the domain, the ordered key set, and the message, so
/// verification is exact and order/subset sensitive without any real
/// curve arithmetic.
pub(crate) struct StubCrypto;

impl StubCrypto {
    pub fn sign(message: &[u8], key: &PublicKey) -> Signature {
        Self::tag(b"single", std::slice::from_ref(key), message)
    }

    pub fn aggregate_sign(message: &[u8], keys: &[PublicKey]) -> Signature {
        Self::tag(b"aggregate", keys, message)
    }

    fn tag(domain: &[u8], keys: &[PublicKey], message: &[u8]) -> Signature {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        for key in keys {
            hasher.update(key.as_bytes());
        }
        hasher.update(message);
        let first: [u8; 32] = hasher.finalize().into();
        let second: [u8; 32] = Sha256::digest(first).into();

        let mut sig = [0u8; 64];
        sig[..32].copy_from_slice(&first);
        sig[32..].copy_from_slice(&second);
        Signature(sig)
    }
}

impl CryptoAdapter for StubCrypto {
    fn verify(&self, message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
        *signature == Self::sign(message, public_key)
    }

    fn aggregate_verify(
        &self,
        message: &[u8],
        public_keys: &[PublicKey],
        signature: &Signature,
    ) -> bool {
        !public_keys.is_empty() && *signature == Self::aggregate_sign(message, public_keys)
    }
}

/// In-memory account view/store.
#[derive(Default)]
pub(crate) struct MemoryAccounts {
    pub balances: HashMap<Address, u128>,
    pub reject_temp_updates: bool,
    pub temp_updates: Vec<(u64, u32, bool)>,
}

impl MemoryAccounts {
    pub fn with_balance(address: Address, balance: u128) -> Self {
        let mut accounts = Self::default();
        accounts.balances.insert(address, balance);
        accounts
    }
}

impl AccountView for MemoryAccounts {
    fn account_exists(&self, address: &Address) -> bool {
        self.balances.contains_key(address)
    }

    fn balance(&self, address: &Address) -> u128 {
        self.balances.get(address).copied().unwrap_or(0)
    }
}

impl TempAccountStore for MemoryAccounts {
    fn update_accounts_temp(
        &mut self,
        epoch_num: u64,
        num_shards: u32,
        is_ds_node: bool,
        _tx: &Transaction,
        _receipt: &mut TxReceipt,
    ) -> bool {
        self.temp_updates.push((epoch_num, num_shards, is_ds_node));
        !self.reject_temp_updates
    }
}

/// Fixed node view for tests.
#[derive(Clone, Debug)]
pub(crate) struct FixedNodeView {
    pub epoch: u64,
    pub num_shards: u32,
    pub shard_id: u32,
    pub ds_idle: bool,
    pub min_gas_price: u128,
}

impl Default for FixedNodeView {
    fn default() -> Self {
        Self { epoch: 7, num_shards: 4, shard_id: 0, ds_idle: true, min_gas_price: 10 }
    }
}

impl NodeView for FixedNodeView {
    fn current_epoch(&self) -> u64 {
        self.epoch
    }

    fn num_shards(&self) -> u32 {
        self.num_shards
    }

    fn shard_id(&self) -> u32 {
        self.shard_id
    }

    fn is_ds_idle(&self) -> bool {
        self.ds_idle
    }

    fn min_gas_price(&self) -> u128 {
        self.min_gas_price
    }
}

pub(crate) fn test_member(tag: u8) -> CommitteeMember {
    CommitteeMember::new(PublicKey([tag; 33]), Peer::new([10, 0, 0, tag].into(), 9000))
}

pub(crate) fn test_roster(size: u8) -> CommitteeRoster {
    (1..=size).map(test_member).collect()
}

pub(crate) fn roster_keys(roster: &CommitteeRoster) -> Vec<PublicKey> {
    roster.iter().map(|m| m.pub_key).collect()
}

/// Build a valid two-round envelope for `header_bytes`: the round-2
/// aggregate is stub-signed by the keys selected by `b2`.
pub(crate) fn make_cosigs(header_bytes: &[u8], keys: &[PublicKey], b2: Vec<bool>) -> CoSignatures {
    let cs1 = Signature([0x55; 64]);
    let b1 = b2.clone();

    let mut message = header_bytes.to_vec();
    message.extend_from_slice(cs1.as_bytes());
    message.extend_from_slice(&bitvec::encode(&b1));

    let selected: Vec<PublicKey> = keys
        .iter()
        .zip(&b2)
        .filter_map(|(key, &set)| set.then_some(*key))
        .collect();

    CoSignatures { cs1, b1, cs2: StubCrypto::aggregate_sign(&message, &selected), b2 }
}
