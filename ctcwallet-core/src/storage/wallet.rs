//! The persisted wallet record.
//!
//! Stored as JSON under [`WALLET_KEY`]. Field names are camelCase so records
//! written by earlier front-ends still load.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::WalletSettings;
use super::kv::KeyValueStore;
use crate::error::Result;
use crate::security::PinHash;
use crate::vault::DEFAULT_KDF_ITERATIONS;

/// Store key holding the serialized wallet record.
pub const WALLET_KEY: &str = "ctc_wallet";

/// What the encrypted secret is, which decides how a UI shows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SecretType {
    Mnemonic,
    PrivateKey,
}

impl std::fmt::Display for SecretType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mnemonic => write!(f, "mnemonic"),
            Self::PrivateKey => write!(f, "privateKey"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenBalance {
    pub balance: String,
    pub value: f64,
}

impl TokenBalance {
    fn zero(balance: &str) -> Self {
        Self {
            balance: balance.to_string(),
            value: 0.0,
        }
    }
}

fn default_kdf_iterations() -> u32 {
    DEFAULT_KDF_ITERATIONS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletRecord {
    pub address: String,
    pub secret_type: SecretType,
    /// Vault blob protecting the recovery phrase or private key.
    pub encrypted_secret: String,
    /// PBKDF2 iterations the blob was sealed with. Absent in older records.
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_hash: Option<PinHash>,
    /// Plaintext PIN written by older front-ends. Read for migration only.
    #[serde(default, rename = "pin", skip_serializing)]
    pub legacy_pin: Option<String>,
    pub balance: String,
    pub tokens: BTreeMap<String, TokenBalance>,
    #[serde(default)]
    pub settings: WalletSettings,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_access: DateTime<Utc>,
}

impl WalletRecord {
    /// Fresh record with the default (zero) token balances for `secret_type`.
    pub fn new(
        address: String,
        secret_type: SecretType,
        encrypted_secret: String,
        kdf_iterations: u32,
        pin_hash: PinHash,
        settings: WalletSettings,
    ) -> Self {
        let now = Utc::now();
        Self {
            address,
            secret_type,
            encrypted_secret,
            kdf_iterations,
            pin_hash: Some(pin_hash),
            legacy_pin: None,
            balance: "0.00".to_string(),
            tokens: default_tokens(secret_type),
            settings,
            created_at: now,
            last_access: now,
        }
    }

    pub fn touch(&mut self) {
        self.last_access = Utc::now();
    }
}

/// Mnemonic wallets list the full default token set; key imports only CTC.
fn default_tokens(secret_type: SecretType) -> BTreeMap<String, TokenBalance> {
    let mut tokens = BTreeMap::new();
    tokens.insert("CTC".to_string(), TokenBalance::zero("0.00"));

    if secret_type == SecretType::Mnemonic {
        tokens.insert("BTC".to_string(), TokenBalance::zero("0.0"));
        tokens.insert("ETH".to_string(), TokenBalance::zero("0.0"));
        tokens.insert("USDT".to_string(), TokenBalance::zero("0.00"));
    }
    tokens
}

pub fn load_wallet(store: &dyn KeyValueStore) -> Result<Option<WalletRecord>> {
    match store.get(WALLET_KEY)? {
        Some(content) => {
            let record: WalletRecord = serde_json::from_str(&content)?;
            Ok(Some(record))
        }
        None => Ok(None),
    }
}

pub fn save_wallet(store: &dyn KeyValueStore, record: &WalletRecord) -> Result<()> {
    let content = serde_json::to_string(record)?;
    store.set(WALLET_KEY, &content)?;
    debug!("Saved wallet record for {}", record.address);
    Ok(())
}

pub fn delete_wallet(store: &dyn KeyValueStore) -> Result<()> {
    store.remove(WALLET_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn record(secret_type: SecretType) -> WalletRecord {
        WalletRecord::new(
            "ctc1q".to_string() + &"ab".repeat(19),
            secret_type,
            "blob".to_string(),
            DEFAULT_KDF_ITERATIONS,
            serde_json::from_str("\"$argon2id$stub\"").unwrap(),
            WalletSettings::default(),
        )
    }

    #[test]
    fn test_default_tokens_by_secret_type() {
        let mnemonic = record(SecretType::Mnemonic);
        assert_eq!(
            mnemonic.tokens.keys().collect::<Vec<_>>(),
            vec!["BTC", "CTC", "ETH", "USDT"]
        );

        let key = record(SecretType::PrivateKey);
        assert_eq!(key.tokens.keys().collect::<Vec<_>>(), vec!["CTC"]);
        assert_eq!(key.balance, "0.00");
    }

    #[test]
    fn test_save_and_load() {
        let store = MemoryStore::new();
        assert_eq!(load_wallet(&store).unwrap(), None);

        let original = record(SecretType::Mnemonic);
        save_wallet(&store, &original).unwrap();

        let loaded = load_wallet(&store).unwrap().unwrap();
        assert_eq!(loaded.address, original.address);
        assert_eq!(loaded.encrypted_secret, original.encrypted_secret);
        assert_eq!(loaded.pin_hash, original.pin_hash);
        assert_eq!(
            loaded.created_at.timestamp_millis(),
            original.created_at.timestamp_millis()
        );

        delete_wallet(&store).unwrap();
        assert_eq!(load_wallet(&store).unwrap(), None);
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(record(SecretType::PrivateKey)).unwrap();

        assert_eq!(json["secretType"], "privateKey");
        assert_eq!(json["kdfIterations"], 100_000);
        assert!(json["encryptedSecret"].is_string());
        assert!(json["pinHash"].is_string());
        assert!(json["createdAt"].is_i64());
        assert!(json.get("pin").is_none());
    }

    #[test]
    fn test_loads_legacy_record() {
        let legacy = r#"{
            "pin": "123456",
            "address": "ctc1qabababababababababababababababababab",
            "balance": "0.00",
            "tokens": {"CTC": {"balance": "0.00", "value": 0}},
            "transactions": [],
            "settings": {"currency": "USD", "biometric": false, "notifications": true, "theme": "dark", "language": "en"},
            "createdAt": 1700000000000,
            "lastAccess": 1700000000000,
            "secretType": "mnemonic",
            "encryptedSecret": "AAAA"
        }"#;

        let record: WalletRecord = serde_json::from_str(legacy).unwrap();
        assert_eq!(record.legacy_pin.as_deref(), Some("123456"));
        assert_eq!(record.pin_hash, None);
        assert_eq!(record.kdf_iterations, DEFAULT_KDF_ITERATIONS);
        assert_eq!(record.secret_type, SecretType::Mnemonic);
        assert_eq!(record.created_at.timestamp_millis(), 1_700_000_000_000);

        // The plaintext PIN is dropped on the next save
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("pin").is_none());
    }
}
