use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

/// Per-wallet preferences, persisted inside the wallet record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletSettings {
    pub currency: String,
    pub biometric: bool,
    pub notifications: bool,
    pub theme: Theme,
    pub language: String,
}

impl Default for WalletSettings {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            biometric: false,
            notifications: true,
            theme: Theme::default(),
            language: "en".to_string(),
        }
    }
}
