//! Server-ID hash used in the online-authentication handshake.
//!
//! Grounded on `original_source/server/auth.go`'s `generateHash`/
//! `twosComplement`, not the teacher's `BigInt`-based approach: the Go
//! two's-complement-by-hand algorithm is what this core's documented test
//! vector (§8 invariant 4) is defined against.

use sha1::{Digest, Sha1};

/// Computes the server-id hash over `server_id || shared_secret || public_key_der`
/// and formats it as a signed hex string.
#[must_use]
pub fn compute(server_id: &str, shared_secret: &[u8], public_key_der: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(server_id.as_bytes());
    hasher.update(shared_secret);
    hasher.update(public_key_der);
    signed_bytes_be_to_hex(&hasher.finalize())
}

/// Formats a SHA-1 digest as a big-endian signed integer in lowercase hex,
/// with leading zeros stripped and a `-` prefix if the high bit of byte 0 is
/// set.
#[must_use]
pub fn signed_bytes_be_to_hex(digest: &[u8]) -> String {
    let negative = digest[0] & 0x80 != 0;
    let magnitude = if negative {
        twos_complement(digest)
    } else {
        digest.to_vec()
    };

    let hex = hex::encode(magnitude);
    let trimmed = hex.trim_start_matches('0');
    let trimmed = if trimmed.is_empty() { "0" } else { trimmed };

    if negative {
        format!("-{trimmed}")
    } else {
        trimmed.to_string()
    }
}

fn twos_complement(bytes: &[u8]) -> Vec<u8> {
    let mut out = bytes.to_vec();
    let mut carry = true;
    for byte in out.iter_mut().rev() {
        *byte = !*byte;
        if carry {
            let (sum, overflow) = byte.overflowing_add(1);
            *byte = sum;
            carry = overflow;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The classic "Notch" reference vector for this hash, documented
    /// upstream in the wire-protocol community wiki.
    #[test]
    fn notch_reference_vector() {
        let mut hasher = Sha1::new();
        hasher.update(b"Notch");
        let digest = hasher.finalize();
        assert_eq!(
            signed_bytes_be_to_hex(&digest),
            "4ed1f46bbe04bc756bcb17c0c7ce3e4632f06a48"
        );
    }

    #[test]
    fn negative_case_reference_vector() {
        let mut hasher = Sha1::new();
        hasher.update(b"jeb_");
        let digest = hasher.finalize();
        assert_eq!(
            signed_bytes_be_to_hex(&digest),
            "-7c9d5b0044c130109a5d7b5fb5c317c02b4e28c1"
        );
    }

    #[test]
    fn simply_a_reference_vector() {
        let mut hasher = Sha1::new();
        hasher.update(b"simon");
        let digest = hasher.finalize();
        assert_eq!(
            signed_bytes_be_to_hex(&digest),
            "88e16a1019277b15d58faf0541e11910eb756f6"
        );
    }
}
