//! BIP39 recovery phrases.

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use bip39::{Language, Mnemonic};
use zeroize::Zeroize;

use crate::error::{Result, WalletError};

/// Entropy for a 12-word phrase (128 bits).
const MNEMONIC_ENTROPY_SIZE: usize = 16;

/// Generate a fresh 12-word English recovery phrase.
pub fn generate_mnemonic() -> Result<String> {
    let mut entropy = [0u8; MNEMONIC_ENTROPY_SIZE];
    OsRng.fill_bytes(&mut entropy);

    let mnemonic = Mnemonic::from_entropy(&entropy)
        .map_err(|e| WalletError::InvalidSecret(format!("mnemonic generation failed: {}", e)));
    entropy.zeroize();

    Ok(mnemonic?.to_string())
}

/// Normalise and validate a user-supplied recovery phrase.
///
/// Words are lowercased and joined by single spaces; the checksum and word
/// list are checked. Returns the normalised phrase.
pub fn validate_mnemonic(phrase: &str) -> Result<String> {
    let normalized = phrase
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ");

    if normalized.is_empty() {
        return Err(WalletError::InvalidSecret("recovery phrase is empty".into()));
    }

    Mnemonic::parse_in_normalized(Language::English, &normalized)
        .map_err(|e| WalletError::InvalidSecret(format!("invalid recovery phrase: {}", e)))?;

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_mnemonic_has_twelve_valid_words() {
        let phrase = generate_mnemonic().unwrap();

        assert_eq!(phrase.split(' ').count(), 12);
        assert_eq!(validate_mnemonic(&phrase).unwrap(), phrase);
    }

    #[test]
    fn test_generated_phrases_differ() {
        assert_ne!(generate_mnemonic().unwrap(), generate_mnemonic().unwrap());
    }

    #[test]
    fn test_validate_normalises_whitespace_and_case() {
        let messy = "  Abandon abandon ABANDON abandon\tabandon abandon\nabandon abandon abandon abandon abandon About ";
        assert_eq!(
            validate_mnemonic(messy).unwrap(),
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about"
        );
    }

    #[test]
    fn test_validate_rejects_bad_phrases() {
        // Bad checksum
        let bad_checksum = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon";
        // Not in the word list
        let unknown_word = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon zzzz";

        for phrase in ["", "   ", bad_checksum, unknown_word, "abandon about"] {
            assert!(
                matches!(validate_mnemonic(phrase), Err(WalletError::InvalidSecret(_))),
                "{phrase:?} should be rejected"
            );
        }
    }
}
