//! Opaque key and signature containers
//!
//! The validation core never interprets these bytes itself; the injected
//! crypto adapter does. Sizes follow the wire format: 33-byte
//! compressed-point public keys, 64-byte Schnorr signatures.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};

/// A compressed public key as it appears on the wire.
#[serde_as]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKey(#[serde_as(as = "Bytes")] pub [u8; 33]);

impl PublicKey {
    pub fn as_bytes(&self) -> &[u8; 33] {
        &self.0
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({}..)", hex::encode(&self.0[..8]))
    }
}

/// A Schnorr signature (single or aggregate) as it appears on the wire.
#[serde_as]
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature(#[serde_as(as = "Bytes")] pub [u8; 64]);

impl Signature {
    pub const ZERO: Signature = Signature([0u8; 64]);

    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({}..)", hex::encode(&self.0[..8]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_short() {
        let key = PublicKey([0xAB; 33]);
        assert_eq!(format!("{key:?}"), "PublicKey(abababababababab..)");
    }
}
