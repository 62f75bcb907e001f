//! Two-round co-signature envelope
//!
//! Every directory-layer and transaction-layer block carries the outcome
//! of the committee's two consensus rounds: the round-1 aggregate `CS1`
//! with its participation bitmap `B1`, and the final aggregate `CS2`
//! with bitmap `B2`. The message `CS2` signs is
//!
//! ```text
//! serialized_header ‖ CS1 ‖ bitvector(B1)
//! ```
//!
//! which binds the final signature to both the block contents and the
//! first round's outcome.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::bitvec;
use crate::keys::Signature;
use crate::BlockHash;

/// Co-signature envelope attached to a block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoSignatures {
    pub cs1: Signature,
    pub b1: Vec<bool>,
    pub cs2: Signature,
    pub b2: Vec<bool>,
}

impl CoSignatures {
    /// Envelope with zero signatures and all-clear bitmaps of width `n`.
    pub fn empty(n: usize) -> Self {
        Self {
            cs1: Signature::ZERO,
            b1: vec![false; n],
            cs2: Signature::ZERO,
            b2: vec![false; n],
        }
    }

    /// Canonical wire form, appended to a serialized block.
    pub fn write_bytes(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.cs1.as_bytes());
        out.extend_from_slice(&bitvec::encode(&self.b1));
        out.extend_from_slice(self.cs2.as_bytes());
        out.extend_from_slice(&bitvec::encode(&self.b2));
    }
}

/// A block whose header is committed by a two-round co-signature.
pub trait CoSigned {
    /// Canonical header serialization (the hashed and co-signed bytes).
    fn serialized_header(&self) -> Vec<u8>;

    fn cosignatures(&self) -> &CoSignatures;

    /// The exact buffer `CS2` is verified against.
    fn cosig_message(&self) -> Vec<u8> {
        let cosigs = self.cosignatures();
        let mut msg = self.serialized_header();
        msg.extend_from_slice(cosigs.cs1.as_bytes());
        msg.extend_from_slice(&bitvec::encode(&cosigs.b1));
        msg
    }

    /// Block hash: SHA-256 of the canonical header serialization.
    fn block_hash(&self) -> BlockHash {
        Sha256::digest(self.serialized_header()).into()
    }
}
