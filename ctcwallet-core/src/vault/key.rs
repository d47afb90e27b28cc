//! PIN-derived encryption keys.
//!
//! This module provides:
//! - `VaultKey`: A 256-bit key wrapper that zeroizes on drop
//! - `VaultParams`: PBKDF2 parameters recorded next to each blob
//! - `derive_key`: PBKDF2-HMAC-SHA256 from a PIN and a 16-byte salt

use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::error::{VaultError, VaultResult};
use super::salt::SALT_SIZE;

/// PBKDF2 iteration count for newly created blobs.
pub const DEFAULT_KDF_ITERATIONS: u32 = 100_000;

/// Upper bound on iteration counts accepted from stored records.
pub const MAX_KDF_ITERATIONS: u32 = 1_000_000;

/// Derived key length (256-bit key for AES-256).
pub const KEY_SIZE: usize = 32;

/// A 256-bit encryption key with automatic zeroization on drop.
///
/// Only ever handed to AES-256-GCM; there is no way to export it.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct VaultKey {
    key: [u8; KEY_SIZE],
}

impl VaultKey {
    /// Get the key as a byte slice for cryptographic operations.
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }
}

impl std::fmt::Debug for VaultKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never log the actual key material
        f.debug_struct("VaultKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Key derivation parameters.
///
/// Stored alongside each wallet record so the iteration count can be raised
/// for new wallets while older blobs stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultParams {
    pub iterations: u32,
}

impl VaultParams {
    pub fn with_iterations(iterations: u32) -> Self {
        Self { iterations }
    }
}

impl Default for VaultParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_KDF_ITERATIONS,
        }
    }
}

/// Derive an encryption key from the PIN using PBKDF2-HMAC-SHA256.
///
/// Same `(pin, salt, params)` always yields the same key. Changing any of
/// them yields an unrelated key, which is what makes a wrong PIN show up as
/// an authentication failure on decrypt.
pub fn derive_key(
    pin: &str,
    salt: &[u8; SALT_SIZE],
    params: &VaultParams,
) -> VaultResult<VaultKey> {
    if params.iterations == 0 {
        return Err(VaultError::KeyDerivation(
            "iteration count must be at least 1".into(),
        ));
    }

    let mut key = [0u8; KEY_SIZE];
    pbkdf2::pbkdf2_hmac::<Sha256>(pin.as_bytes(), salt, params.iterations, &mut key);

    debug!(
        "Derived {}-byte key from PIN ({} iterations)",
        key.len(),
        params.iterations
    );
    Ok(VaultKey { key })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> VaultParams {
        VaultParams::with_iterations(1_000)
    }

    #[test]
    fn test_derive_key_deterministic() {
        let salt = [1u8; 16];
        let key1 = derive_key("123456", &salt, &VaultParams::default()).unwrap();
        let key2 = derive_key("123456", &salt, &VaultParams::default()).unwrap();

        assert_eq!(
            key1.as_bytes(),
            key2.as_bytes(),
            "Same PIN and salt should produce same key"
        );
        assert_eq!(key1.as_bytes().len(), KEY_SIZE, "Key should be 32 bytes");
    }

    #[test]
    fn test_derive_key_different_pins() {
        let salt = [1u8; 16];
        let key1 = derive_key("123456", &salt, &fast()).unwrap();
        let key2 = derive_key("123457", &salt, &fast()).unwrap();

        assert_ne!(
            key1.as_bytes(),
            key2.as_bytes(),
            "Different PINs should produce different keys"
        );
    }

    #[test]
    fn test_derive_key_different_salts() {
        let key1 = derive_key("123456", &[1u8; 16], &fast()).unwrap();
        let key2 = derive_key("123456", &[2u8; 16], &fast()).unwrap();

        assert_ne!(
            key1.as_bytes(),
            key2.as_bytes(),
            "Different salts should produce different keys"
        );
    }

    #[test]
    fn test_derive_key_different_iterations() {
        let salt = [7u8; 16];
        let key1 = derive_key("123456", &salt, &VaultParams::with_iterations(1_000)).unwrap();
        let key2 = derive_key("123456", &salt, &VaultParams::with_iterations(1_001)).unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_derive_key_matches_pbkdf2_sha256_reference() {
        // RFC 7914 section 11 test vector for PBKDF2-HMAC-SHA256 (c = 1).
        let mut expected = [0u8; KEY_SIZE];
        hex::decode_to_slice(
            "55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc",
            &mut expected,
        )
        .unwrap();

        let mut out = [0u8; KEY_SIZE];
        pbkdf2::pbkdf2_hmac::<Sha256>(b"passwd", b"salt", 1, &mut out);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let err = derive_key("123456", &[0u8; 16], &VaultParams::with_iterations(0)).unwrap_err();
        assert!(matches!(err, VaultError::KeyDerivation(_)));
    }

    #[test]
    fn test_debug_redacts_key() {
        let key = derive_key("123456", &[3u8; 16], &fast()).unwrap();
        let rendered = format!("{:?}", key);
        assert!(rendered.contains("REDACTED"));
    }

    #[test]
    fn test_default_params() {
        assert_eq!(VaultParams::default().iterations, 100_000);
    }
}
