//! Per-encryption randomness.
//!
//! Every call to `SecretVault::encrypt` draws a fresh salt and nonce from
//! the operating system CSPRNG. Nothing here is cached or persisted on its
//! own; both values travel inside the blob.

use aes_gcm::aead::{rand_core::RngCore, OsRng};

/// Salt size in bytes (128 bits)
pub const SALT_SIZE: usize = 16;

/// Nonce size for AES-GCM (96 bits = 12 bytes)
pub const NONCE_SIZE: usize = 12;

/// Generate a new random salt for PBKDF2.
pub fn generate_salt() -> [u8; SALT_SIZE] {
    let mut salt = [0u8; SALT_SIZE];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Generate a new random AES-GCM nonce.
pub fn generate_nonce() -> [u8; NONCE_SIZE] {
    let mut nonce = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce);
    nonce
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes() {
        assert_eq!(SALT_SIZE, 16);
        assert_eq!(NONCE_SIZE, 12);
    }

    #[test]
    fn test_fresh_values_differ() {
        assert_ne!(generate_salt(), generate_salt());
        assert_ne!(generate_nonce(), generate_nonce());
    }
}
