//! Secret vault: PIN-protected encryption of a wallet's recovery secret.
//!
//! The recovery phrase or private key is encrypted with AES-256-GCM under a
//! key derived from the user's PIN via PBKDF2-HMAC-SHA256 (100 000
//! iterations) and a per-encryption salt. Salt, nonce and ciphertext travel
//! together as one base64 blob that the caller persists.

pub mod blob;
pub mod error;
pub mod key;
pub mod salt;
pub mod secret;

pub use blob::{SecretBlob, MIN_BLOB_SIZE, TAG_SIZE};
pub use error::{VaultError, VaultResult};
pub use key::{
    derive_key, VaultKey, VaultParams, DEFAULT_KDF_ITERATIONS, KEY_SIZE, MAX_KDF_ITERATIONS,
};
pub use salt::{NONCE_SIZE, SALT_SIZE};
pub use secret::{SecretString, SecretVault};
