//! Crypto adapter
//!
//! Schnorr primitives live outside the core; the validators only need
//! the two verification operations below. Implementations must be
//! deterministic: same inputs, same verdict, no ambient state.

use meridian_types::{PublicKey, Signature};

/// Signature verification as the validation core consumes it.
pub trait CryptoAdapter {
    /// Verify a single Schnorr signature over `message`.
    fn verify(&self, message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool;

    /// Aggregate `public_keys` in order and verify a Schnorr
    /// multi-signature over `message` against the aggregate. Must
    /// return false when the aggregate cannot be formed (empty or
    /// malformed key set), never error.
    fn aggregate_verify(
        &self,
        message: &[u8],
        public_keys: &[PublicKey],
        signature: &Signature,
    ) -> bool;
}
