use zeroize::Zeroizing;

use crate::error::{Result, WalletError};

/// Raw private key length in bytes.
const PRIVATE_KEY_SIZE: usize = 32;

/// Validate an imported private key: 64 hex chars with an optional `0x` prefix.
///
/// Returns the key lowercased and without prefix, which is what gets encrypted.
pub fn validate_private_key(key: &str) -> Result<String> {
    let trimmed = key.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let mut bytes = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
    hex::decode_to_slice(body, bytes.as_mut_slice()).map_err(|_| {
        WalletError::InvalidSecret(format!(
            "private key must be {} hex characters",
            PRIVATE_KEY_SIZE * 2
        ))
    })?;

    if bytes.iter().all(|b| *b == 0) {
        return Err(WalletError::InvalidSecret("private key must not be zero".into()));
    }

    Ok(body.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    #[test]
    fn test_accepts_plain_and_prefixed_keys() {
        assert_eq!(validate_private_key(KEY).unwrap(), KEY);
        assert_eq!(validate_private_key(&format!("0x{KEY}")).unwrap(), KEY);
        assert_eq!(
            validate_private_key(&format!("  0X{}  ", KEY.to_uppercase())).unwrap(),
            KEY
        );
    }

    #[test]
    fn test_rejects_malformed_keys() {
        let zero = "0".repeat(64);
        let too_long = format!("{KEY}00");
        let not_hex = KEY.replace('4', "g");
        let bad_keys: [&str; 7] = ["", "0x", "abc", &KEY[..63], &too_long, &not_hex, &zero];
        for bad in bad_keys {
            assert!(
                matches!(validate_private_key(bad), Err(WalletError::InvalidSecret(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
