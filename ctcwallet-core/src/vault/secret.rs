//! SecretVault - PIN-based encryption of a wallet's recovery secret.
//!
//! The vault is stateless: it never stores the PIN, never caches a derived
//! key, and never touches persistence. Each `encrypt` draws its own salt and
//! nonce, derives a fresh key with PBKDF2, and seals the secret with
//! AES-256-GCM. `decrypt` reverses that and reports every failure as
//! [`VaultError::DecryptionFailed`].

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use subtle::ConstantTimeEq;
use tracing::{debug, warn};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::blob::SecretBlob;
use super::error::{VaultError, VaultResult};
use super::key::{derive_key, VaultKey, VaultParams};
use super::salt::{generate_nonce, generate_salt, SALT_SIZE};

/// A decrypted secret that is wiped from memory on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(secret: String) -> Self {
        Self(secret)
    }

    /// Borrow the plaintext. Keep the borrow short.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }
}

impl Eq for SecretString {}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretString([REDACTED])")
    }
}

/// Encrypts and decrypts recovery secrets under a PIN.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SecretVault {
    params: VaultParams,
}

impl SecretVault {
    /// Vault using the default parameters (100 000 PBKDF2 iterations).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(params: VaultParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> VaultParams {
        self.params
    }

    /// Derive the AES-256 key for a PIN and salt under this vault's parameters.
    pub fn derive_key(&self, pin: &str, salt: &[u8; SALT_SIZE]) -> VaultResult<VaultKey> {
        derive_key(pin, salt, &self.params)
    }

    /// Encrypt `secret` under `pin` and return the encoded blob.
    ///
    /// Two calls with the same inputs return different blobs.
    ///
    /// # Errors
    /// `InvalidInput` for an empty secret or PIN; `KeyDerivation` or
    /// `Encryption` if the primitives fail. All of these are fatal: the
    /// caller must not persist anything.
    pub fn encrypt(&self, secret: &str, pin: &str) -> VaultResult<String> {
        if secret.is_empty() {
            return Err(VaultError::InvalidInput("secret must not be empty".into()));
        }
        if pin.is_empty() {
            return Err(VaultError::InvalidInput("PIN must not be empty".into()));
        }

        let salt = generate_salt();
        let nonce_bytes = generate_nonce();
        let key = self.derive_key(pin, &salt)?;

        let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| VaultError::Encryption(format!("Invalid key: {}", e)))?;

        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), secret.as_bytes())
            .map_err(|e| VaultError::Encryption(format!("Encryption failed: {}", e)))?;

        let blob = SecretBlob::from_parts(salt, nonce_bytes, ciphertext);
        debug!("Encrypted secret into {}-byte blob", blob.byte_len());
        Ok(blob.encode())
    }

    /// Decrypt a blob produced by [`SecretVault::encrypt`].
    ///
    /// # Errors
    /// `DecryptionFailed` for a wrong PIN, an empty PIN, malformed base64, a
    /// truncated blob, or any tampering. `KeyDerivation` only if this vault
    /// was built with unusable parameters.
    pub fn decrypt(&self, blob: &str, pin: &str) -> VaultResult<SecretString> {
        let result = self.open(blob, pin);
        if matches!(result, Err(VaultError::DecryptionFailed)) {
            warn!("Secret decryption failed");
        }
        result
    }

    fn open(&self, blob: &str, pin: &str) -> VaultResult<SecretString> {
        if pin.is_empty() {
            return Err(VaultError::DecryptionFailed);
        }

        let blob = SecretBlob::decode(blob)?;
        let key = self.derive_key(pin, blob.salt())?;

        let cipher =
            Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| VaultError::DecryptionFailed)?;

        // Wrong key (invalid PIN) and corrupted data are indistinguishable here
        let plaintext = cipher
            .decrypt(Nonce::from_slice(blob.nonce()), blob.ciphertext())
            .map_err(|_| VaultError::DecryptionFailed)?;

        match String::from_utf8(plaintext) {
            Ok(secret) => Ok(SecretString::new(secret)),
            Err(e) => {
                let mut bytes = e.into_bytes();
                bytes.zeroize();
                Err(VaultError::DecryptionFailed)
            }
        }
    }

    /// [`SecretVault::encrypt`] on the blocking pool.
    pub async fn encrypt_async(&self, secret: &str, pin: &str) -> VaultResult<String> {
        let vault = *self;
        let secret = Zeroizing::new(secret.to_owned());
        let pin = Zeroizing::new(pin.to_owned());

        tokio::task::spawn_blocking(move || vault.encrypt(&secret, &pin))
            .await
            .map_err(|e| VaultError::Encryption(format!("Encryption task failed: {}", e)))?
    }

    /// [`SecretVault::decrypt`] on the blocking pool.
    pub async fn decrypt_async(&self, blob: &str, pin: &str) -> VaultResult<SecretString> {
        let vault = *self;
        let blob = blob.to_owned();
        let pin = Zeroizing::new(pin.to_owned());

        tokio::task::spawn_blocking(move || vault.decrypt(&blob, &pin))
            .await
            .map_err(|_| VaultError::DecryptionFailed)?
    }
}
