//! Application state held by the UI layer.
//!
//! One explicit object instead of a process-wide singleton: the front-end
//! owns an `AppState`, and every operation goes through it. Blocking work
//! (key derivation, PIN hashing, disk writes) runs on tokio's blocking pool.
//! The vault itself never sees this state.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::error::{Result, WalletError};
use crate::storage::{Theme, WalletRecord, WalletSettings};
use crate::vault::SecretString;
use crate::wallet::{RevealedSecret, WalletService, WalletStatus};

/// Where the secret of a new wallet comes from.
pub enum WalletSource {
    /// Generate a fresh 12-word phrase.
    Generate,
    /// Import an existing recovery phrase.
    Mnemonic(Zeroizing<String>),
    /// Import a raw private key.
    PrivateKey(Zeroizing<String>),
}

pub struct AppState {
    service: WalletService,
    /// Current wallet record (present once loaded or created)
    pub wallet: Arc<RwLock<Option<WalletRecord>>>,
    /// Current lock status
    pub status: Arc<RwLock<WalletStatus>>,
    /// UI theme, mirrored into the wallet settings when a wallet exists
    pub theme: Arc<RwLock<Theme>>,
}

impl AppState {
    pub fn new(service: WalletService) -> Self {
        Self {
            service,
            wallet: Arc::new(RwLock::new(None)),
            status: Arc::new(RwLock::new(WalletStatus::NotSetup)),
            theme: Arc::new(RwLock::new(Theme::default())),
        }
    }

    /// Load any stored wallet. A stored wallet always starts `Locked`.
    pub async fn initialize(&self) -> Result<WalletStatus> {
        let record = self.run_blocking(|service| match service.load() {
            Ok(record) => Ok(Some(record)),
            Err(WalletError::NotSetup) => Ok(None),
            Err(e) => Err(e),
        })
        .await?;

        let status = if record.is_some() {
            WalletStatus::Locked
        } else {
            WalletStatus::NotSetup
        };

        if let Some(ref record) = record {
            *self.theme.write().await = record.settings.theme;
        }
        *self.wallet.write().await = record;
        *self.status.write().await = status;

        info!("Wallet state initialized: {}", status);
        Ok(status)
    }

    pub async fn status(&self) -> WalletStatus {
        *self.status.read().await
    }

    /// Create a wallet and unlock it.
    ///
    /// Returns the generated phrase for [`WalletSource::Generate`] so it can
    /// be shown for backup; imports return `None`.
    pub async fn create_wallet(
        &self,
        pin: &str,
        source: WalletSource,
    ) -> Result<Option<SecretString>> {
        let pin = Zeroizing::new(pin.to_owned());
        // The theme chosen before onboarding goes into the new record
        let settings = WalletSettings {
            theme: *self.theme.read().await,
            ..WalletSettings::default()
        };

        let (record, generated) = self
            .run_blocking(move |service| match source {
                WalletSource::Generate => {
                    let (record, mnemonic) = service.generate_new(&pin, settings)?;
                    Ok((record, Some(mnemonic)))
                }
                WalletSource::Mnemonic(phrase) => Ok((
                    service.create_from_mnemonic(&pin, &phrase, settings)?,
                    None,
                )),
                WalletSource::PrivateKey(key) => Ok((
                    service.create_from_private_key(&pin, &key, settings)?,
                    None,
                )),
            })
            .await?;

        *self.wallet.write().await = Some(record);
        *self.status.write().await = WalletStatus::Unlocked;
        Ok(generated)
    }

    /// Authenticate with the PIN and unlock.
    pub async fn unlock(&self, pin: &str) -> Result<()> {
        let pin = Zeroizing::new(pin.to_owned());
        let record = self
            .run_blocking(move |service| service.authenticate(&pin))
            .await?;

        *self.wallet.write().await = Some(record);
        *self.status.write().await = WalletStatus::Unlocked;
        info!("Wallet unlocked");
        Ok(())
    }

    pub async fn lock(&self) {
        let mut status = self.status.write().await;
        if *status == WalletStatus::Unlocked {
            *status = WalletStatus::Locked;
            info!("Wallet locked");
        }
    }

    /// Decrypt the backup secret. Only allowed while unlocked.
    pub async fn reveal_secret(&self, pin: &str) -> Result<RevealedSecret> {
        self.require_unlocked().await?;

        let pin = Zeroizing::new(pin.to_owned());
        self.run_blocking(move |service| service.reveal_secret(&pin))
            .await
    }

    pub async fn change_pin(&self, old_pin: &str, new_pin: &str) -> Result<()> {
        self.require_unlocked().await?;

        let old_pin = Zeroizing::new(old_pin.to_owned());
        let new_pin = Zeroizing::new(new_pin.to_owned());
        let record = self
            .run_blocking(move |service| service.change_pin(&old_pin, &new_pin))
            .await?;

        *self.wallet.write().await = Some(record);
        Ok(())
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<()> {
        *self.theme.write().await = theme;

        if self.wallet.read().await.is_some() {
            let record = self
                .run_blocking(move |service| service.update_settings(|s| s.theme = theme))
                .await?;
            *self.wallet.write().await = Some(record);
        }
        debug!("Theme set to {}", theme);
        Ok(())
    }

    /// Forgot-PIN reset: delete the stored wallet and return to onboarding.
    pub async fn reset(&self) -> Result<()> {
        self.run_blocking(|service| service.reset()).await?;

        *self.wallet.write().await = None;
        *self.status.write().await = WalletStatus::NotSetup;
        Ok(())
    }

    async fn require_unlocked(&self) -> Result<()> {
        match *self.status.read().await {
            WalletStatus::Unlocked => Ok(()),
            WalletStatus::Locked => Err(WalletError::Locked),
            WalletStatus::NotSetup => Err(WalletError::NotSetup),
        }
    }

    async fn run_blocking<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(WalletService) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let service = self.service.clone();
        tokio::task::spawn_blocking(move || f(service))
            .await
            .map_err(|e| WalletError::Task(e.to_string()))?
    }
}
