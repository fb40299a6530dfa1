//! AES-128/CFB8 stream cipher pair, key doubling as IV.
//!
//! Built on the `aes` + `cfb8` crates exactly as `steel-protocol::utils`
//! does, rather than hand-rolling AES: for a 1-byte block size, `cfb8`
//! already implements the byte-at-a-time, ciphertext-fed-back transform
//! spec.md §4.4 describes.

use cfb8::cipher::{AsyncStreamCipher, KeyIvInit};

/// An AES-128 CFB-8 encryptor.
pub type Aes128Cfb8Enc = cfb8::Encryptor<aes::Aes128>;
/// An AES-128 CFB-8 decryptor.
pub type Aes128Cfb8Dec = cfb8::Decryptor<aes::Aes128>;

/// A matched encrypt/decrypt pair sharing one 16-byte key, which also serves
/// as the IV for both — protocol-dictated, not a general CFB8 recommendation.
///
/// Each side holds independent shift-register state from construction; the
/// two are never interchangeable and must not be reused once a session ends.
pub struct CipherPair {
    encryptor: Aes128Cfb8Enc,
    decryptor: Aes128Cfb8Dec,
}

impl CipherPair {
    /// Initializes a fresh encrypt/decrypt pair from the 16-byte shared
    /// secret, which doubles as both AES key and CFB8 IV.
    #[must_use]
    pub fn from_shared_secret(secret: &[u8; 16]) -> Self {
        Self {
            encryptor: Aes128Cfb8Enc::new(secret.into(), secret.into()),
            decryptor: Aes128Cfb8Dec::new(secret.into(), secret.into()),
        }
    }

    /// Encrypts `data` in place using this session's encrypt stream.
    pub fn encrypt_in_place(&mut self, data: &mut [u8]) {
        self.encryptor.encrypt(data);
    }

    /// Decrypts `data` in place using this session's decrypt stream.
    pub fn decrypt_in_place(&mut self, data: &mut [u8]) {
        self.decryptor.decrypt(data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_fresh_instances() {
        let secret = [0x2Bu8; 16];
        let mut enc = CipherPair::from_shared_secret(&secret);
        let mut dec = CipherPair::from_shared_secret(&secret);

        let plaintext = b"the quick brown fox jumps".to_vec();
        let mut ciphertext = plaintext.clone();
        enc.encrypt_in_place(&mut ciphertext);
        assert_ne!(ciphertext, plaintext);

        let mut recovered = ciphertext.clone();
        dec.decrypt_in_place(&mut recovered);
        assert_eq!(recovered, plaintext);
    }

    #[test]
    fn is_stateful_across_calls() {
        let secret = [0x11u8; 16];
        let mut enc = CipherPair::from_shared_secret(&secret);
        let mut dec = CipherPair::from_shared_secret(&secret);

        let mut first = b"aaaaaaaa".to_vec();
        enc.encrypt_in_place(&mut first);
        let mut decoded_first = first.clone();
        dec.decrypt_in_place(&mut decoded_first);
        assert_eq!(decoded_first, b"aaaaaaaa");

        // Replaying the same ciphertext through the decryptor a second time
        // must NOT reproduce the plaintext: the register has advanced.
        let mut replay = first.clone();
        dec.decrypt_in_place(&mut replay);
        assert_ne!(replay, b"aaaaaaaa");
    }
}
