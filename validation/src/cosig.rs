//! Co-signature verification
//!
//! A block is committed by its round-2 aggregate `CS2` over the message
//! `header ‖ CS1 ‖ bitvector(B1)`. Verification checks, in order:
//! the signer set and the `B2` bitmap have the same width, enough bits
//! are set to meet the consensus threshold, and the aggregate of the
//! selected keys verifies `CS2`. The threshold function is the shared
//! protocol constant; it is never redefined here.

use tracing::debug;

use meridian_types::protocol::num_for_consensus;
use meridian_types::{CoSigned, PublicKey, SignerSet};

use crate::crypto::CryptoAdapter;
use crate::error::{ValidationError, ValidationResult};

/// Verifies block co-signatures against a signer set (the DS committee
/// or a single shard).
pub struct CoSigVerifier<'a, C: CryptoAdapter + ?Sized> {
    crypto: &'a C,
}

impl<'a, C: CryptoAdapter + ?Sized> CoSigVerifier<'a, C> {
    pub fn new(crypto: &'a C) -> Self {
        Self { crypto }
    }

    /// Check that `signers` committed `block`.
    pub fn verify<B, S>(&self, block: &B, signers: &S) -> ValidationResult<()>
    where
        B: CoSigned,
        S: SignerSet + ?Sized,
    {
        let cosigs = block.cosignatures();
        let committee = signers.member_count();
        let bitmap = cosigs.b2.len();

        if committee != bitmap {
            return Err(ValidationError::BitmapMismatch { committee, bitmap });
        }

        let keys: Vec<PublicKey> = cosigs
            .b2
            .iter()
            .enumerate()
            .filter_map(|(i, &set)| set.then(|| *signers.public_key_at(i)))
            .collect();

        let required = num_for_consensus(bitmap);
        if keys.len() < required {
            return Err(ValidationError::ThresholdUnmet {
                signers: keys.len(),
                committee: bitmap,
                required,
            });
        }

        if !self.crypto.aggregate_verify(&block.cosig_message(), &keys, &cosigs.cs2) {
            return Err(ValidationError::SignatureInvalid);
        }

        debug!(
            signers = keys.len(),
            committee,
            block_hash = %hex::encode(&block.block_hash()[..8]),
            "co-signature verified"
        );
        Ok(())
    }
}
