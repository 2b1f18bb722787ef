use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};
use uuid::Uuid;

use crate::cancellation::ports::{TokenCodec, TokenError};

// ============================================================================
// Encrypted Guest Order Tokens
// ============================================================================
//
// Format: base64url(nonce || ChaCha20-Poly1305(payload))
// Payload: "number:email:postcode"
//
// The payload is unreadable without the key, and any tampering fails the
// authentication tag on decrypt.
//
// ============================================================================

const SEPARATOR: char = ':';
const NONCE_LEN: usize = 12;

pub struct EncryptedTokenCodec {
    cipher: ChaCha20Poly1305,
}

impl EncryptedTokenCodec {
    pub fn new(key: [u8; 32]) -> Self {
        Self {
            cipher: ChaCha20Poly1305::new(Key::from_slice(&key)),
        }
    }

    /// Build from a 64-character hex key
    pub fn from_hex(key_hex: &str) -> anyhow::Result<Self> {
        let bytes = hex::decode(key_hex.trim())?;
        let key: [u8; 32] = bytes
            .try_into()
            .map_err(|b: Vec<u8>| anyhow::anyhow!("Token key must be 32 bytes, got {}", b.len()))?;
        Ok(Self::new(key))
    }

    fn fresh_nonce() -> [u8; NONCE_LEN] {
        let random = Uuid::new_v4().into_bytes();
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&random[..NONCE_LEN]);
        nonce
    }
}

impl TokenCodec for EncryptedTokenCodec {
    fn encrypt(&self, number: &str, email: &str, postcode: &str) -> Result<String, TokenError> {
        let payload = format!("{number}{SEPARATOR}{email}{SEPARATOR}{postcode}");
        let nonce = Self::fresh_nonce();

        let ciphertext = self
            .cipher
            .encrypt(Nonce::from_slice(&nonce), payload.as_bytes())
            .map_err(|_| TokenError::Encryption)?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(URL_SAFE_NO_PAD.encode(sealed))
    }

    fn decrypt(&self, token: &str) -> Result<Vec<String>, TokenError> {
        let sealed = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|_| TokenError::Encoding)?;
        if sealed.len() <= NONCE_LEN {
            return Err(TokenError::Truncated);
        }

        let (nonce, ciphertext) = sealed.split_at(NONCE_LEN);
        let payload = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| TokenError::Decryption)?;

        let payload = String::from_utf8(payload).map_err(|_| TokenError::Payload)?;
        Ok(payload.split(SEPARATOR).map(str::to_string).collect())
    }
}
