//! Credential digest.
//!
//! Passwords are stored as the standard base64 encoding of a single unsalted
//! SHA-256 digest of their UTF-8 bytes. Existing stored credentials depend on
//! this exact format, so it must not change without a migration path.

use base64::{engine::general_purpose::STANDARD, Engine};
use sha2::{Digest, Sha256};

/// Compute the stored digest for a plaintext password.
pub fn hash_password(plain_text: &str) -> String {
    let digest = Sha256::digest(plain_text.as_bytes());
    STANDARD.encode(digest)
}

/// Recompute the digest of `plain_text` and compare it with `stored_hash`.
pub fn verify_password(plain_text: &str, stored_hash: &str) -> bool {
    hash_password(plain_text) == stored_hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        assert_eq!(
            hash_password("password"),
            "XohImNooBHFR0OVvjcYpJ3NgPQ1qq73WKhHvch0VQtg="
        );
    }

    #[test]
    fn test_hash_is_deterministic() {
        assert_eq!(hash_password("Secret123"), hash_password("Secret123"));
        assert_ne!(hash_password("Secret123"), hash_password("secret123"));
    }

    #[test]
    fn test_verify() {
        let stored = hash_password("Correct horse");
        assert!(verify_password("Correct horse", &stored));
        assert!(!verify_password("correct horse", &stored));
        assert!(!verify_password("", &stored));
    }

    #[test]
    fn test_empty_password_still_hashes() {
        // 32 digest bytes encode to 44 base64 characters
        assert_eq!(hash_password("").len(), 44);
    }
}
