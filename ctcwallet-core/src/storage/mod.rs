mod config;
mod kv;
mod wallet;

pub use config::{Theme, WalletSettings};
pub use kv::{FileStore, KeyValueStore, MemoryStore, STORE_FILE_NAME};
pub use wallet::{
    delete_wallet, load_wallet, save_wallet, SecretType, TokenBalance, WalletRecord, WALLET_KEY,
};
