//! Credential cipher: AES-256-GCM over small credential blobs.
//!
//! Token format: base64(nonce_12bytes || ciphertext || tag_16bytes)

use std::fmt;

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use base64::Engine;
use thiserror::Error;
use zeroize::Zeroize;

const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;
pub const KEY_LEN: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CipherError {
    #[error("encryption key not available")]
    EncryptionUnavailable,
    #[error("encryption key must be base64")]
    KeyNotBase64,
    #[error("encryption key must be {KEY_LEN} bytes, got {0}")]
    KeyLength(usize),
    #[error("internal error during credential encryption")]
    InternalCryptoError,
    #[error("invalid credentials format")]
    InvalidFormat,
    #[error("failed to decrypt credentials")]
    DecryptionFailed,
}

/// Process-wide credential key. A cipher built with `Default` has no key and
/// refuses to encrypt or decrypt.
#[derive(Clone, Default)]
pub struct CredentialCipher {
    key: Option<[u8; KEY_LEN]>,
}

impl Drop for CredentialCipher {
    fn drop(&mut self) {
        if let Some(key) = self.key.as_mut() {
            key.zeroize();
        }
    }
}

impl fmt::Debug for CredentialCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialCipher")
            .field("loaded", &self.key.is_some())
            .finish()
    }
}

impl CredentialCipher {
    pub fn new(key: [u8; KEY_LEN]) -> Self {
        Self { key: Some(key) }
    }

    /// Decode a base64 key, rejecting anything that is not exactly 32 bytes.
    pub fn from_base64(encoded: &str) -> Result<Self, CipherError> {
        let mut bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|_| CipherError::KeyNotBase64)?;
        if bytes.len() != KEY_LEN {
            let len = bytes.len();
            bytes.zeroize();
            return Err(CipherError::KeyLength(len));
        }
        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&bytes);
        bytes.zeroize();
        let cipher = Self::new(key);
        key.zeroize();
        Ok(cipher)
    }

    pub fn is_loaded(&self) -> bool {
        self.key.is_some()
    }

    fn aead(&self) -> Result<Aes256Gcm, CipherError> {
        let key = self.key.as_ref().ok_or(CipherError::EncryptionUnavailable)?;
        Aes256Gcm::new_from_slice(key).map_err(|_| CipherError::InternalCryptoError)
    }

    /// Encrypt plaintext under a fresh random nonce and return the storage token.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<String, CipherError> {
        let cipher = self.aead()?;

        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext)
            .map_err(|_| CipherError::InternalCryptoError)?;

        let mut token = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        token.extend_from_slice(&nonce_bytes);
        token.extend_from_slice(&ciphertext);

        Ok(base64::engine::general_purpose::STANDARD.encode(&token))
    }

    /// Decrypt a storage token. Authentication failures never say why.
    pub fn decrypt(&self, token: &str) -> Result<Vec<u8>, CipherError> {
        let cipher = self.aead()?;

        let data = base64::engine::general_purpose::STANDARD
            .decode(token)
            .map_err(|_| CipherError::InvalidFormat)?;
        if data.len() < NONCE_LEN + TAG_LEN {
            return Err(CipherError::InvalidFormat);
        }

        let (nonce, ciphertext) = data.split_at(NONCE_LEN);
        cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| CipherError::DecryptionFailed)
    }
}
