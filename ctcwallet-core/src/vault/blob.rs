//! Persisted secret blob layout.
//!
//! Format: base64 of `[16-byte salt][12-byte nonce][ciphertext with 16-byte auth tag]`.
//! There is no version byte; this layout is version 0 and must not change.

use data_encoding::BASE64;

use super::error::{VaultError, VaultResult};
use super::salt::{NONCE_SIZE, SALT_SIZE};

/// AES-GCM authentication tag length.
pub const TAG_SIZE: usize = 16;

/// Smallest decodable blob: salt, nonce and a tag over an empty plaintext.
pub const MIN_BLOB_SIZE: usize = SALT_SIZE + NONCE_SIZE + TAG_SIZE;

/// Decoded view of a secret blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretBlob {
    salt: [u8; SALT_SIZE],
    nonce: [u8; NONCE_SIZE],
    ciphertext: Vec<u8>,
}

impl SecretBlob {
    pub fn from_parts(salt: [u8; SALT_SIZE], nonce: [u8; NONCE_SIZE], ciphertext: Vec<u8>) -> Self {
        Self {
            salt,
            nonce,
            ciphertext,
        }
    }

    /// Decode a persisted blob string.
    ///
    /// Malformed base64 and blobs too short to hold salt, nonce and tag are
    /// both reported as `DecryptionFailed`.
    pub fn decode(encoded: &str) -> VaultResult<Self> {
        let bytes = BASE64
            .decode(encoded.trim().as_bytes())
            .map_err(|_| VaultError::DecryptionFailed)?;

        if bytes.len() < MIN_BLOB_SIZE {
            return Err(VaultError::DecryptionFailed);
        }

        let (salt_bytes, rest) = bytes.split_at(SALT_SIZE);
        let (nonce_bytes, ciphertext) = rest.split_at(NONCE_SIZE);

        let mut salt = [0u8; SALT_SIZE];
        salt.copy_from_slice(salt_bytes);
        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(nonce_bytes);

        Ok(Self {
            salt,
            nonce,
            ciphertext: ciphertext.to_vec(),
        })
    }

    /// Encode as the persisted string, segments in their fixed order.
    pub fn encode(&self) -> String {
        BASE64.encode(&self.to_bytes())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.byte_len());
        bytes.extend_from_slice(&self.salt);
        bytes.extend_from_slice(&self.nonce);
        bytes.extend_from_slice(&self.ciphertext);
        bytes
    }

    pub fn salt(&self) -> &[u8; SALT_SIZE] {
        &self.salt
    }

    pub fn nonce(&self) -> &[u8; NONCE_SIZE] {
        &self.nonce
    }

    /// Ciphertext with the trailing authentication tag.
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Decoded length in bytes.
    pub fn byte_len(&self) -> usize {
        SALT_SIZE + NONCE_SIZE + self.ciphertext.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parts_land_in_order() {
        let blob = SecretBlob::from_parts([1u8; 16], [2u8; 12], vec![3u8; 20]);

        assert_eq!(blob.byte_len(), 48);
        assert_eq!(blob.salt(), &[1u8; 16]);
        assert_eq!(blob.nonce(), &[2u8; 12]);
        assert_eq!(blob.ciphertext(), &[3u8; 20]);
        assert_eq!(&blob.to_bytes()[..16], &[1u8; 16]);
        assert_eq!(&blob.to_bytes()[16..28], &[2u8; 12]);
    }

    #[test]
    fn test_encode_is_standard_padded_base64() {
        let blob = SecretBlob::from_parts([0u8; 16], [0u8; 12], vec![0u8; 16]);
        let encoded = blob.encode();

        // 44 bytes -> 60 base64 chars, one padding char
        assert_eq!(encoded.len(), 60);
        assert!(encoded.ends_with('='));
        assert_eq!(SecretBlob::decode(&encoded).unwrap(), blob);
    }

    #[test]
    fn test_decode_rejects_short_blobs() {
        for len in [0usize, 1, 27, 28, 43] {
            let encoded = BASE64.encode(&vec![9u8; len]);
            assert_eq!(
                SecretBlob::decode(&encoded),
                Err(VaultError::DecryptionFailed),
                "length {len} should be rejected"
            );
        }
        let encoded = BASE64.encode(&[9u8; MIN_BLOB_SIZE]);
        assert!(SecretBlob::decode(&encoded).is_ok());
    }

    #[test]
    fn test_decode_rejects_malformed_encoding() {
        for input in ["not base64!!", "abc", "====", "\u{00e9}\u{00e9}\u{00e9}\u{00e9}"] {
            assert_eq!(SecretBlob::decode(input), Err(VaultError::DecryptionFailed));
        }
    }
}
