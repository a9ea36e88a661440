//! Encryption box for chief complaints at rest
//!
//! Tokens are `base64(nonce || ciphertext)` under AES-256-GCM with a fresh
//! 96-bit nonce per message. Decryption never fails outright: missing or
//! undecryptable tokens come back as visible sentinel strings.

use crate::error::{CdsError, Result};
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use log::warn;
use std::fmt;

/// Shown when a record carries no ciphertext
pub const MISSING_CIPHERTEXT: &str = "N/A (Encrypted data missing)";

/// Shown when a ciphertext cannot be decrypted
pub const DECRYPTION_ERROR: &str = "Decryption Error";

const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;

/// Symmetric encryption of free-text fields
pub trait ComplaintCipher: Send + Sync {
    /// Encrypt a value; missing or empty input yields `None`
    fn encrypt(&self, plaintext: Option<&str>) -> Option<String>;

    /// Decrypt a token, returning a sentinel instead of failing
    fn decrypt(&self, token: Option<&str>) -> String;
}

/// AES-256-GCM implementation of [`ComplaintCipher`]
#[derive(Clone)]
pub struct AesGcmCipher {
    cipher: Aes256Gcm,
    key: [u8; KEY_LEN],
}

impl fmt::Debug for AesGcmCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AesGcmCipher").finish_non_exhaustive()
    }
}

impl AesGcmCipher {
    /// Build from a base64-encoded 256-bit key
    pub fn from_base64_key(encoded: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| CdsError::Cipher(format!("key is not valid base64: {e}")))?;
        let key: [u8; KEY_LEN] = bytes.try_into().map_err(|bytes: Vec<u8>| {
            CdsError::Cipher(format!(
                "key must be {KEY_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        Self::from_key(key)
    }

    /// Generate a fresh random key
    pub fn generate() -> Result<Self> {
        Self::from_key(rand::random::<[u8; KEY_LEN]>())
    }

    fn from_key(key: [u8; KEY_LEN]) -> Result<Self> {
        let cipher = Aes256Gcm::new_from_slice(&key)
            .map_err(|e| CdsError::Cipher(format!("invalid key: {e}")))?;
        Ok(Self { cipher, key })
    }

    /// The key, base64-encoded, for storing alongside the deployment secrets
    #[must_use]
    pub fn key_base64(&self) -> String {
        STANDARD.encode(self.key)
    }

    fn open(&self, token: &str) -> Option<String> {
        let bytes = STANDARD.decode(token.trim()).ok()?;
        if bytes.len() <= NONCE_LEN {
            return None;
        }
        let (nonce, ciphertext) = bytes.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .ok()?;
        String::from_utf8(plaintext).ok()
    }
}

impl ComplaintCipher for AesGcmCipher {
    fn encrypt(&self, plaintext: Option<&str>) -> Option<String> {
        let plaintext = plaintext.filter(|text| !text.is_empty())?;

        let nonce_bytes = rand::random::<[u8; NONCE_LEN]>();
        let ciphertext = match self
            .cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
        {
            Ok(ciphertext) => ciphertext,
            Err(e) => {
                warn!("Encryption failed: {e}");
                return None;
            }
        };

        let mut token = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        token.extend_from_slice(&nonce_bytes);
        token.extend_from_slice(&ciphertext);
        Some(STANDARD.encode(token))
    }

    fn decrypt(&self, token: Option<&str>) -> String {
        let Some(token) = token.filter(|token| !token.trim().is_empty()) else {
            return MISSING_CIPHERTEXT.to_string();
        };
        self.open(token).unwrap_or_else(|| {
            warn!("Failed to decrypt a chief complaint token");
            DECRYPTION_ERROR.to_string()
        })
    }
}
