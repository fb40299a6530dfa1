//! # Palisade Crypto
//!
//! The cryptographic primitives backing the login handshake: ephemeral RSA
//! key pairs, the AES-128/CFB8 stream cipher pair, and the server-id hash
//! used against the identity service.

pub mod cfb8;
pub mod error;
pub mod rsa_keys;
pub mod server_hash;

pub use cfb8::{Aes128Cfb8Dec, Aes128Cfb8Enc, CipherPair};
pub use error::CryptError;
pub use rsa_keys::EphemeralKeyPair;
pub use server_hash::{compute as compute_server_hash, signed_bytes_be_to_hex};
