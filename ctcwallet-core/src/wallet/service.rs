//! WalletService - wallet lifecycle over a key-value store.
//!
//! This module provides the WalletService struct that handles:
//! - Wallet creation from a generated phrase, an imported phrase, or a private key
//! - PIN authentication against the stored Argon2id hash
//! - Revealing the recovery secret (decrypting the vault blob)
//! - PIN changes, which re-encrypt into a brand-new blob
//! - Settings updates and the forgot-PIN reset
//!
//! Nothing is persisted unless the whole operation succeeded.

use std::ops::RangeInclusive;
use std::sync::Arc;

use subtle::ConstantTimeEq;
use tracing::{debug, info, warn};

use crate::error::{Result, WalletError};
use crate::security::{
    generate_address, generate_mnemonic, validate_mnemonic, validate_pin, validate_private_key,
    PinHash,
};
use crate::storage::{
    delete_wallet, load_wallet, save_wallet, KeyValueStore, SecretType, WalletRecord,
    WalletSettings,
};
use crate::vault::{
    SecretString, SecretVault, VaultError, VaultParams, DEFAULT_KDF_ITERATIONS, MAX_KDF_ITERATIONS,
};

/// A decrypted recovery secret together with its kind.
#[derive(Debug)]
pub struct RevealedSecret {
    pub secret_type: SecretType,
    pub secret: SecretString,
}

impl RevealedSecret {
    /// Words of a recovery phrase, or the single key for key imports.
    pub fn words(&self) -> Vec<&str> {
        match self.secret_type {
            SecretType::Mnemonic => self.secret.expose().split(' ').collect(),
            SecretType::PrivateKey => vec![self.secret.expose()],
        }
    }
}

#[derive(Clone)]
pub struct WalletService {
    store: Arc<dyn KeyValueStore>,
    /// Vault used for new blobs; existing blobs are opened with their own parameters.
    vault: SecretVault,
}

impl WalletService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_vault(store, SecretVault::new())
    }

    pub fn with_vault(store: Arc<dyn KeyValueStore>, vault: SecretVault) -> Self {
        Self { store, vault }
    }

    pub fn exists(&self) -> Result<bool> {
        Ok(load_wallet(self.store.as_ref())?.is_some())
    }

    /// Load the wallet record, failing with `NotSetup` if there is none.
    pub fn load(&self) -> Result<WalletRecord> {
        load_wallet(self.store.as_ref())?.ok_or(WalletError::NotSetup)
    }

    /// Generate a fresh 12-word phrase and create a wallet from it.
    ///
    /// The phrase is returned once so the UI can show it for backup.
    pub fn generate_new(
        &self,
        pin: &str,
        settings: WalletSettings,
    ) -> Result<(WalletRecord, SecretString)> {
        let mnemonic = SecretString::new(generate_mnemonic()?);
        let record = self.create(pin, SecretType::Mnemonic, mnemonic.expose(), settings)?;
        Ok((record, mnemonic))
    }

    pub fn create_from_mnemonic(
        &self,
        pin: &str,
        phrase: &str,
        settings: WalletSettings,
    ) -> Result<WalletRecord> {
        let phrase = SecretString::new(validate_mnemonic(phrase)?);
        self.create(pin, SecretType::Mnemonic, phrase.expose(), settings)
    }

    pub fn create_from_private_key(
        &self,
        pin: &str,
        key: &str,
        settings: WalletSettings,
    ) -> Result<WalletRecord> {
        let key = SecretString::new(validate_private_key(key)?);
        self.create(pin, SecretType::PrivateKey, key.expose(), settings)
    }

    fn create(
        &self,
        pin: &str,
        secret_type: SecretType,
        secret: &str,
        settings: WalletSettings,
    ) -> Result<WalletRecord> {
        validate_pin(pin)?;

        if self.exists()? {
            return Err(WalletError::AlreadyExists);
        }

        let encrypted_secret = self.vault.encrypt(secret, pin)?;
        let pin_hash = PinHash::new(pin)?;

        let record = WalletRecord::new(
            generate_address(),
            secret_type,
            encrypted_secret,
            self.vault.params().iterations,
            pin_hash,
            settings,
        );
        save_wallet(self.store.as_ref(), &record)?;

        info!("Created {} wallet {}", secret_type, record.address);
        Ok(record)
    }

    /// Check the PIN against the stored credential.
    ///
    /// Records written with a plaintext PIN are upgraded to a hash on the
    /// first successful login.
    pub fn authenticate(&self, pin: &str) -> Result<WalletRecord> {
        let mut record = self.load()?;

        let verified = match (&record.pin_hash, &record.legacy_pin) {
            (Some(hash), _) => hash.verify(pin),
            (None, Some(legacy)) => legacy.as_bytes().ct_eq(pin.as_bytes()).into(),
            (None, None) => false,
        };

        if !verified {
            warn!("PIN authentication failed");
            return Err(WalletError::InvalidPin);
        }

        if record.pin_hash.is_none() {
            record.pin_hash = Some(PinHash::new(pin)?);
            info!("Replaced stored plaintext PIN with a hash");
        }
        record.legacy_pin = None;
        record.touch();
        save_wallet(self.store.as_ref(), &record)?;

        debug!("PIN accepted for {}", record.address);
        Ok(record)
    }

    /// Decrypt the recovery secret.
    ///
    /// # Errors
    /// `NotSetup` when there is no wallet; `Vault(DecryptionFailed)` when the
    /// PIN is wrong or the stored blob or its iteration count is damaged.
    pub fn reveal_secret(&self, pin: &str) -> Result<RevealedSecret> {
        let record = self.load()?;
        let secret = self.vault_for(&record)?.decrypt(&record.encrypted_secret, pin)?;

        Ok(RevealedSecret {
            secret_type: record.secret_type,
            secret,
        })
    }

    /// Re-encrypt the secret under a new PIN.
    ///
    /// Produces a new blob with fresh salt and nonce, sealed with the
    /// service's current parameters, and a new PIN hash.
    pub fn change_pin(&self, old_pin: &str, new_pin: &str) -> Result<WalletRecord> {
        validate_pin(new_pin)?;

        let mut record = self.load()?;
        let secret = self.vault_for(&record)?.decrypt(&record.encrypted_secret, old_pin)?;

        let encrypted_secret = self.vault.encrypt(secret.expose(), new_pin)?;
        let pin_hash = PinHash::new(new_pin)?;

        record.encrypted_secret = encrypted_secret;
        record.kdf_iterations = self.vault.params().iterations;
        record.pin_hash = Some(pin_hash);
        record.legacy_pin = None;
        record.touch();
        save_wallet(self.store.as_ref(), &record)?;

        info!("PIN changed for {}", record.address);
        Ok(record)
    }

    pub fn update_settings(
        &self,
        update: impl FnOnce(&mut WalletSettings),
    ) -> Result<WalletRecord> {
        let mut record = self.load()?;
        update(&mut record.settings);
        save_wallet(self.store.as_ref(), &record)?;
        Ok(record)
    }

    /// Forgot-PIN path: delete the wallet. Recovery needs the backed-up secret.
    pub fn reset(&self) -> Result<()> {
        info!("Resetting wallet - stored secret will be lost");
        delete_wallet(self.store.as_ref())
    }

    /// Iteration counts a stored blob may carry. Anything outside this range
    /// is treated as a damaged record and never reaches PBKDF2.
    fn accepted_iterations(&self) -> RangeInclusive<u32> {
        let current = self.vault.params().iterations;
        DEFAULT_KDF_ITERATIONS.min(current).max(1)..=MAX_KDF_ITERATIONS.max(current)
    }

    fn vault_for(&self, record: &WalletRecord) -> Result<SecretVault> {
        let accepted = self.accepted_iterations();
        if !accepted.contains(&record.kdf_iterations) {
            warn!(
                "Stored KDF iteration count {} outside {:?}",
                record.kdf_iterations, accepted
            );
            return Err(VaultError::DecryptionFailed.into());
        }
        Ok(SecretVault::with_params(VaultParams::with_iterations(
            record.kdf_iterations,
        )))
    }
}
