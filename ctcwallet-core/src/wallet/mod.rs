//! Wallet lifecycle: creation, PIN authentication, backup reveal, reset.

mod service;
mod status;

pub use service::{RevealedSecret, WalletService};
pub use status::WalletStatus;
