//! Protocol-wide constants
//!
//! Single source of truth for values every node must agree on. The
//! consensus threshold in particular is shared between co-signature
//! verification and consensus commit; it must never be redefined at a
//! call site.

/// Size of an account address in bytes.
pub const ACC_ADDR_SIZE: usize = 20;

/// Version tag hashed into the sharding-structure commitment.
pub const SHARDING_STRUCTURE_VERSION: u32 = 1;

/// Transaction format version (lower half of the packed version word).
pub const TRANSACTION_VERSION: u16 = 1;

/// Number of co-signers required for a committee of `committee_size`
/// to commit a block.
pub fn num_for_consensus(committee_size: usize) -> usize {
    (2 * committee_size).div_ceil(3) + 1
}

/// Pack a chain identifier and a format version into the transaction
/// version word. The chain id occupies the upper 16 bits.
pub fn pack_version(chain_id: u16, tx_version: u16) -> u32 {
    ((chain_id as u32) << 16) | tx_version as u32
}

/// Extract the chain identifier from a packed version word.
pub fn chain_id_of(version: u32) -> u16 {
    (version >> 16) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_packing_round_trip() {
        let packed = pack_version(42, TRANSACTION_VERSION);
        assert_eq!(chain_id_of(packed), 42);
        assert_eq!(packed & 0xFFFF, TRANSACTION_VERSION as u32);
    }

    #[test]
    fn test_consensus_threshold() {
        assert_eq!(num_for_consensus(3), 3);
        assert_eq!(num_for_consensus(4), 4);
        assert_eq!(num_for_consensus(6), 5);
        assert_eq!(num_for_consensus(9), 7);
        assert_eq!(num_for_consensus(100), 68);
    }

    #[test]
    fn test_threshold_attainable_from_three_members() {
        for n in 3..=128 {
            assert!(num_for_consensus(n) <= n, "unreachable threshold for {n}");
        }
    }
}
