//! Cryptographic error taxonomy.

use thiserror::Error;

/// Errors raised during RSA key generation, encoding, or PKCS#1v1.5
/// decryption, or AES/CFB8 stream-cipher setup.
#[derive(Debug, Error)]
pub enum CryptError {
    /// RSA key generation or decryption failed.
    #[error("RSA error: {0}")]
    Rsa(#[from] rsa::Error),
    /// The decrypted shared secret was not exactly 16 bytes.
    #[error("shared secret must be 16 bytes, got {0}")]
    InvalidSecretLength(usize),
}
