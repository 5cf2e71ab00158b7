//! # Password Hash Shim
//!
//! The binary users file stores exactly one `u64` per account, so whatever
//! hashes passwords here has to fit in 64 bits to keep that layout intact.
//!
//! This module provides a deterministic FNV-1a hash behind the
//! `set_password` / `verify_password` interface on [`crate::types::User`].
//!
//! ## THIS IS NOT A SECURITY PRIMITIVE
//! FNV-1a is fast and unsalted; it exists for file-format compatibility
//! only. A deployment that cares about authentication strength must widen
//! the stored hash field and swap in a real KDF behind the same interface.

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Hashes a raw password into the 64-bit value the users file stores.
///
/// Deterministic across platforms and releases; the users file depends on
/// that (std's `DefaultHasher` makes no such promise, which is why this is
/// hand-rolled).
pub fn hash_password(raw: &str) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in raw.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic() {
        assert_eq!(hash_password("secreto"), hash_password("secreto"));
    }

    #[test]
    fn test_hash_distinguishes_inputs() {
        assert_ne!(hash_password("secreto"), hash_password("Secreto"));
        assert_ne!(hash_password(""), hash_password(" "));
    }

    #[test]
    fn test_known_vectors() {
        // Standard FNV-1a test vectors; these lock the on-disk hash values.
        assert_eq!(hash_password(""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(hash_password("a"), 0xaf63_dc4c_8601_ec8c);
    }
}
