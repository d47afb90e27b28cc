//! Core of the CTC wallet: PIN-protected storage of a recovery secret.
//!
//! The [`vault`] module is the security boundary. It turns a recovery phrase
//! or private key into a base64 blob sealed with AES-256-GCM under a
//! PBKDF2-derived key, and back. Everything else (wallet records, PIN
//! credential, persistence, UI state) is built around it.

pub mod error;
pub mod security;
pub mod state;
pub mod storage;
pub mod vault;
pub mod wallet;

pub use error::{Result, WalletError};
pub use state::{AppState, WalletSource};
pub use storage::{FileStore, KeyValueStore, MemoryStore, SecretType, WalletRecord};
pub use vault::{SecretString, SecretVault, VaultError, VaultParams};
pub use wallet::{RevealedSecret, WalletService, WalletStatus};
