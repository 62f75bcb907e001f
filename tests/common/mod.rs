//! Deterministic collaborator doubles shared by the workspace tests

#![allow(dead_code)]

use std::collections::HashMap;

use sha2::{Digest, Sha256};

use meridian::types::{
    bitvec, Address, BlockHash, BlockLink, CommitteeMember, CommitteeRoster, CoSignatures,
    CoSigned, DsBlock, Peer, PublicKey, Signature, Transaction, TxReceipt,
};
use meridian::validation::{
    AccountView, CryptoAdapter, DsChain, Persistence, StoreResult, TempAccountStore,
};

/// Stand-in for the Schnorr adapter: a "signature" is a recomputable
/// tag over the domain, the ordered key set, and the message.
pub struct StubCrypto;

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
pub struct MemoryAccounts {
    pub balances: HashMap<Address, u128>,
    pub temp_updates: usize,
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
        _epoch_num: u64,
        _num_shards: u32,
        _is_ds_node: bool,
        _tx: &Transaction,
        _receipt: &mut TxReceipt,
    ) -> bool {
        self.temp_updates += 1;
        true
    }
}

/// Records every committed write in arrival order.
#[derive(Default)]
pub struct RecordingPersistence {
    pub block_links: Vec<BlockLink>,
    pub ds_blocks: Vec<u64>,
    pub vc_blocks: Vec<BlockHash>,
    pub fallback_blocks: Vec<BlockHash>,
}

impl Persistence for RecordingPersistence {
    fn put_ds_block(&mut self, block_num: u64, _bytes: &[u8]) -> StoreResult {
        self.ds_blocks.push(block_num);
        Ok(())
    }

    fn put_vc_block(&mut self, hash: &BlockHash, _bytes: &[u8]) -> StoreResult {
        self.vc_blocks.push(*hash);
        Ok(())
    }

    fn put_fallback_block(&mut self, hash: &BlockHash, _bytes: &[u8]) -> StoreResult {
        self.fallback_blocks.push(*hash);
        Ok(())
    }

    fn append_block_link(&mut self, link: &BlockLink) -> StoreResult {
        self.block_links.push(*link);
        Ok(())
    }
}

/// In-memory DS chain.
#[derive(Default)]
pub struct MemoryDsChain {
    pub blocks: Vec<DsBlock>,
}

impl DsChain for MemoryDsChain {
    fn latest_ds_block(&self) -> Option<&DsBlock> {
        self.blocks.last()
    }

    fn append_ds_block(&mut self, block: DsBlock) -> StoreResult {
        self.blocks.push(block);
        Ok(())
    }
}

pub fn member(tag: u8) -> CommitteeMember {
    CommitteeMember::new(PublicKey([tag; 33]), Peer::new([10, 0, 0, tag].into(), 9000))
}

pub fn roster(size: u8) -> CommitteeRoster {
    (1..=size).map(member).collect()
}

pub fn roster_keys(roster: &CommitteeRoster) -> Vec<PublicKey> {
    roster.iter().map(|m| m.pub_key).collect()
}

/// Build a valid two-round envelope for `header_bytes`: the round-2
/// aggregate is stub-signed by the keys selected by `b2`.
pub fn make_cosigs(header_bytes: &[u8], keys: &[PublicKey], b2: Vec<bool>) -> CoSignatures {
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

/// Co-sign `block` in place with full participation of `signers`.
pub fn cosign_full<B>(block: &B, signers: &[PublicKey]) -> CoSignatures
where
    B: CoSigned,
{
    make_cosigs(&block.serialized_header(), signers, vec![true; signers.len()])
}
