//! Ephemeral per-login RSA-1024 key pair.
//!
//! Grounded on `steel/src/server/key_store.rs`'s `KeyStore`, but generated
//! fresh per login rather than once server-wide: spec.md's `LoginContext`
//! owns its own key pair, destroyed after encryption is enabled.

use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};

use crate::error::CryptError;

/// The 1024-bit RSA strength the wire protocol dictates. Cryptographically
/// weak by modern standards, but protocol-mandated; do not strengthen it.
pub const RSA_KEY_BITS: usize = 1024;

/// A login session's ephemeral RSA key pair, plus its DER-encoded public key
/// ready for transmission in the Encryption Request packet.
pub struct EphemeralKeyPair {
    private_key: RsaPrivateKey,
    public_key_der: Vec<u8>,
}

impl EphemeralKeyPair {
    /// Generates a fresh 1024-bit key pair and encodes its public half as
    /// X.509 `SubjectPublicKeyInfo` DER.
    pub fn generate() -> Result<Self, CryptError> {
        let mut rng = rand::rng();
        let private_key = RsaPrivateKey::new(&mut rng, RSA_KEY_BITS)?;
        let public_key = RsaPublicKey::from(&private_key);
        let public_key_der =
            rsa_der::public_key_to_der(&public_key.n().to_be_bytes(), &public_key.e().to_be_bytes());
        Ok(Self {
            private_key,
            public_key_der,
        })
    }

    /// The DER-encoded public key, as sent in the Encryption Request packet
    /// and hashed into the server-id digest.
    #[must_use]
    pub fn public_key_der(&self) -> &[u8] {
        &self.public_key_der
    }

    /// Decrypts a PKCS#1v1.5-padded ciphertext with the private key.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptError> {
        Ok(self.private_key.decrypt(Pkcs1v15Encrypt, ciphertext)?)
    }

    /// Decrypts and validates the 16-byte AES-128 shared secret.
    pub fn decrypt_shared_secret(&self, ciphertext: &[u8]) -> Result<[u8; 16], CryptError> {
        let secret = self.decrypt(ciphertext)?;
        secret
            .clone()
            .try_into()
            .map_err(|_| CryptError::InvalidSecretLength(secret.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsa::Pkcs1v15Encrypt;

    #[test]
    fn generates_usable_key_pair_with_nonempty_der() {
        let pair = EphemeralKeyPair::generate().unwrap();
        assert!(!pair.public_key_der().is_empty());
    }

    #[test]
    fn decrypts_a_value_encrypted_under_its_own_public_key() {
        let pair = EphemeralKeyPair::generate().unwrap();
        let public_key = RsaPublicKey::from(&pair.private_key);
        let mut rng = rand::rng();
        let secret = [7u8; 16];
        let ciphertext = public_key
            .encrypt(&mut rng, Pkcs1v15Encrypt, &secret)
            .unwrap();
        let decrypted = pair.decrypt_shared_secret(&ciphertext).unwrap();
        assert_eq!(decrypted, secret);
    }
}
