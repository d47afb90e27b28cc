use thiserror::Error;

use crate::vault::VaultError;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Vault error: {0}")]
    Vault(#[from] VaultError),

    #[error("Invalid PIN")]
    InvalidPin,

    #[error("Wallet not set up")]
    NotSetup,

    #[error("Wallet is locked")]
    Locked,

    #[error("Wallet already exists")]
    AlreadyExists,

    #[error("Invalid secret: {0}")]
    InvalidSecret(String),

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Background task failed: {0}")]
    Task(String),
}

impl WalletError {
    /// Wrong PIN or unreadable backup; the user can simply try again.
    pub fn is_decryption_failure(&self) -> bool {
        matches!(self, WalletError::Vault(VaultError::DecryptionFailed))
    }
}

impl serde::Serialize for WalletError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WalletError>;
