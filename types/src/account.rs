//! Account addressing
//!
//! An address is the trailing 20 bytes of SHA-256 over the serialized
//! sender public key. The all-zero address is distinguished: it marks
//! contract creation as a recipient and is never a valid sender.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::keys::PublicKey;
use crate::protocol::ACC_ADDR_SIZE;

/// A 20-byte account identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address(pub [u8; ACC_ADDR_SIZE]);

impl Address {
    /// The distinguished all-zero address.
    pub const NULL: Address = Address([0u8; ACC_ADDR_SIZE]);

    /// Derive the address of a public key: the trailing 20 bytes of
    /// SHA-256 over its wire serialization.
    pub fn from_public_key(key: &PublicKey) -> Self {
        let digest = Sha256::digest(key.as_bytes());
        let mut out = [0u8; ACC_ADDR_SIZE];
        out.copy_from_slice(&digest[digest.len() - ACC_ADDR_SIZE..]);
        Address(out)
    }

    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }

    pub fn as_bytes(&self) -> &[u8; ACC_ADDR_SIZE] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}
