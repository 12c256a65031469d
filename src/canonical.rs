//! Canonical serialization for deterministic layout fingerprints.
//!
//! A packing run is a pure transformation, so two runs over identical input
//! must produce byte-identical layouts. The fingerprint over the emitted
//! placements is the witness: it is computed from canonical JSON bytes and
//! hashed with xxh64.
//!
//! ## Determinism Guarantees
//!
//! - Stable field order: struct fields serialize in declaration order
//! - Stable Vec order: vectors serialize in index order
//! - No HashMap allowed: hashed data must use ordered containers

use serde::Serialize;
use xxhash_rust::xxh64::xxh64;

/// Serialize a value to canonical JSON bytes for hashing.
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).expect("Canonical serialization failed")
}

/// Compute the canonical hash of a serializable value.
pub fn canonical_hash<T: Serialize>(value: &T) -> u64 {
    xxh64(&to_canonical_bytes(value), 0)
}

/// Compute the canonical hash and return it as a hex string.
pub fn canonical_hash_hex<T: Serialize>(value: &T) -> String {
    format!("{:016x}", canonical_hash(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Subregion;

    #[test]
    fn test_determinism() {
        let regions = vec![
            Subregion::from_origin(0, 0, 4, 8),
            Subregion::from_origin(4, 0, 4, 4),
        ];

        assert_eq!(canonical_hash(&regions), canonical_hash(&regions));
        assert_eq!(canonical_hash_hex(&regions).len(), 16);
    }

    #[test]
    fn test_order_sensitivity() {
        let a = vec![
            Subregion::from_origin(0, 0, 4, 8),
            Subregion::from_origin(4, 0, 4, 4),
        ];
        let b: Vec<Subregion> = a.iter().rev().copied().collect();

        assert_ne!(canonical_hash(&a), canonical_hash(&b));
    }
}
