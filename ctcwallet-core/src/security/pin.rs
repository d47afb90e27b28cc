//! PIN format checks and the stored PIN credential.
//!
//! The PIN plays two separate roles. As a credential it is checked against
//! an Argon2id hash kept in the wallet record. As a password it feeds the
//! vault's PBKDF2 derivation. The plaintext PIN is never persisted.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WalletError};

/// Number of digits on the PIN pad.
pub const PIN_LENGTH: usize = 6;

/// Argon2id parameters for the PIN credential hash.
/// - Memory: 64 MB (provides strong resistance to GPU attacks)
/// - Time: 3 iterations
/// - Parallelism: 4 lanes
const ARGON2_MEMORY_COST: u32 = 65536; // 64 MB in KiB
const ARGON2_TIME_COST: u32 = 3;
const ARGON2_PARALLELISM: u32 = 4;

fn hasher(memory_cost: u32, time_cost: u32, parallelism: u32) -> Result<Argon2<'static>> {
    let params = Params::new(memory_cost, time_cost, parallelism, None)
        .map_err(|e| WalletError::Encryption(format!("Invalid Argon2 params: {}", e)))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Check that a PIN is exactly six ASCII digits.
pub fn validate_pin(pin: &str) -> Result<()> {
    if pin.len() == PIN_LENGTH && pin.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(WalletError::InvalidPin)
    }
}

/// Salted Argon2id hash of the PIN in PHC string format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PinHash(String);

impl PinHash {
    /// Hash a PIN with a fresh random salt.
    pub fn new(pin: &str) -> Result<Self> {
        let argon2 = hasher(ARGON2_MEMORY_COST, ARGON2_TIME_COST, ARGON2_PARALLELISM)?;

        let salt = SaltString::generate(&mut OsRng);
        let hash = argon2
            .hash_password(pin.as_bytes(), &salt)
            .map_err(|e| WalletError::Encryption(format!("PIN hashing failed: {}", e)))?;

        Ok(Self(hash.to_string()))
    }

    /// Check a candidate PIN. A malformed stored hash never verifies.
    pub fn verify(&self, pin: &str) -> bool {
        let parsed = match PasswordHash::new(&self.0) {
            Ok(parsed) => parsed,
            Err(_) => return false,
        };
        // Parameters are read back from the PHC string
        Argon2::default()
            .verify_password(pin.as_bytes(), &parsed)
            .is_ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
