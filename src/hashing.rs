//! Privacy-preserving hashing of recipients and codes.
//!
//! Stored records never carry plaintext: both the recipient identifier and the
//! code are reduced to SHA-256 digests at issuance, and verification hashes the
//! submitted values again to compare. The digest is deliberately unsalted so
//! that the same plaintext always hashes identically, which is what makes
//! equality matching against the stored record possible. The cost is exposure
//! to precomputed-table attacks on low-entropy inputs; a keyed hash (HMAC with
//! a server-side secret) would close that gap while keeping equality checks.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// SHA-256 digest of the input, hex-encoded.
pub fn hash(plaintext: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plaintext.as_bytes());
    hex::encode(hasher.finalize())
}

/// Recompute and compare a plaintext against a stored digest.
///
/// The comparison is constant-time so the match does not leak how many digest
/// characters agreed.
pub fn verify_hash(plaintext: &str, digest: &str) -> bool {
    let computed = hash(plaintext);
    computed.as_bytes().ct_eq(digest.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic() {
        assert_eq!(hash("user@example.com"), hash("user@example.com"));
        assert_eq!(hash("483920"), hash("483920"));
    }

    #[test]
    fn test_hash_is_hex_sha256() {
        let digest = hash("user@example.com");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_distinct_inputs_distinct_digests() {
        assert_ne!(hash("123456"), hash("123457"));
        assert_ne!(hash("a@example.com"), hash("b@example.com"));
    }

    #[test]
    fn test_verify_hash_round_trip() {
        let digest = hash("654321");
        assert!(verify_hash("654321", &digest));
        assert!(!verify_hash("654322", &digest));
    }

    #[test]
    fn test_verify_hash_rejects_length_mismatch() {
        assert!(!verify_hash("654321", "deadbeef"));
    }
}
