//! Vault-specific error types for secret encryption.
//!
//! Encryption-side errors are fatal to the caller: wallet creation must
//! abort without persisting anything. Decryption collapses every failure
//! into [`VaultError::DecryptionFailed`] so the caller can show a single
//! "wrong PIN or unreadable backup" message.

use thiserror::Error;

/// Errors that can occur during vault operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VaultError {
    /// Empty secret, empty PIN, or otherwise unusable input to `encrypt`.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Key derivation parameters were rejected.
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    /// The cipher refused to encrypt.
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Wrong PIN, corrupted or tampered blob, or malformed encoding.
    ///
    /// Carries no detail about which of these happened.
    #[error("Decryption failed")]
    DecryptionFailed,
}

/// Result type alias for vault operations.
pub type VaultResult<T> = std::result::Result<T, VaultError>;

impl VaultError {
    /// Whether the caller may retry (e.g. ask for the PIN again).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, VaultError::DecryptionFailed)
    }

    /// Stable code for programmatic handling by front-ends.
    pub fn code(&self) -> &'static str {
        match self {
            VaultError::InvalidInput(_) => "INVALID_INPUT",
            VaultError::KeyDerivation(_) => "KEY_DERIVATION_ERROR",
            VaultError::Encryption(_) => "ENCRYPTION_ERROR",
            VaultError::DecryptionFailed => "DECRYPTION_FAILED",
        }
    }
}

// ============================================================================
// Serialization for front-end IPC
// ============================================================================

impl serde::Serialize for VaultError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("VaultError", 2)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}
