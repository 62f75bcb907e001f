//! Transactions
//!
//! A transaction is immutable once signed: the signature covers the
//! canonical serialization of the core fields, and the transaction id is
//! the SHA-256 of that same buffer. The upper 16 bits of the version
//! word carry the chain identifier so a transaction cannot replay across
//! networks.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::account::Address;
use crate::keys::{PublicKey, Signature};
use crate::protocol::chain_id_of;
use crate::wire::{put_u128, put_u32, put_u64, put_var_bytes};
use crate::TxHash;

/// A signed transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Packed version word: chain id in the upper 16 bits.
    pub version: u32,
    pub nonce: u64,
    /// Recipient; the null address denotes contract creation.
    pub to_addr: Address,
    pub sender_pub_key: PublicKey,
    pub amount: u128,
    pub gas_price: u128,
    pub gas_limit: u64,
    /// Contract code for creation transactions.
    pub code: Vec<u8>,
    /// Call payload; non-empty marks a smart-contract call.
    pub data: Vec<u8>,
    pub signature: Signature,
}

impl Transaction {
    /// The canonical buffer the signature covers and the id hashes.
    pub fn serialize_core_fields(&self) -> Vec<u8> {
        let mut out = Vec::new();
        put_u32(&mut out, self.version);
        put_u64(&mut out, self.nonce);
        out.extend_from_slice(self.to_addr.as_bytes());
        out.extend_from_slice(self.sender_pub_key.as_bytes());
        put_u128(&mut out, self.amount);
        put_u128(&mut out, self.gas_price);
        put_u64(&mut out, self.gas_limit);
        put_var_bytes(&mut out, &self.code);
        put_var_bytes(&mut out, &self.data);
        out
    }

    /// Transaction id: SHA-256 of the core fields.
    pub fn id(&self) -> TxHash {
        Sha256::digest(self.serialize_core_fields()).into()
    }

    /// Chain identifier packed into the version word.
    pub fn chain_id(&self) -> u16 {
        chain_id_of(self.version)
    }

    /// Address derived from the sender public key.
    pub fn sender_address(&self) -> Address {
        Address::from_public_key(&self.sender_pub_key)
    }

    /// A call into an existing contract: payload present and a concrete
    /// recipient.
    pub fn is_contract_call(&self) -> bool {
        !self.data.is_empty() && !self.to_addr.is_null()
    }
}

/// Deterministic shard assignment: the trailing four address bytes,
/// big-endian, reduced modulo the shard count.
pub fn shard_of(address: &Address, num_shards: u32) -> u32 {
    if num_shards == 0 {
        return 0;
    }
    let bytes = address.as_bytes();
    let tail = [bytes[16], bytes[17], bytes[18], bytes[19]];
    u32::from_be_bytes(tail) % num_shards
}

/// Receipt stamped while a transaction is admitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub epoch_num: u64,
    pub cum_gas: u64,
}

impl TxReceipt {
    pub fn set_epoch(&mut self, epoch_num: u64) {
        self.epoch_num = epoch_num;
    }

    pub fn add_gas(&mut self, gas: u64) {
        self.cum_gas = self.cum_gas.saturating_add(gas);
    }
}
