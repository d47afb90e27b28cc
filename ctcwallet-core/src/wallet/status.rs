//! Wallet lock state as seen by the UI layer.

use serde::{Deserialize, Serialize};

/// Represents the current state of the wallet.
///
/// The wallet transitions between these states:
/// - `NotSetup` → `Unlocked` (after creating or importing a wallet)
/// - `Unlocked` → `Locked` (when the user locks or the app backgrounds)
/// - `Locked` → `Unlocked` (after successful PIN authentication)
/// - any → `NotSetup` (after a reset)
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum WalletStatus {
    /// No wallet record exists (first-time user)
    #[default]
    NotSetup,
    /// A wallet exists but the PIN has not been entered
    Locked,
    /// PIN accepted; wallet data may be shown
    Unlocked,
}

impl std::fmt::Display for WalletStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotSetup => write!(f, "NotSetup"),
            Self::Locked => write!(f, "Locked"),
            Self::Unlocked => write!(f, "Unlocked"),
        }
    }
}
