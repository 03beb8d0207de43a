//! Cryptographic primitives for Ethereum-style accounts and signatures.
//!
//! This module provides:
//! - secp256k1 keypairs and Ethereum address derivation
//! - Recoverable `(v, r, s)` signatures over a domain-separated Keccak-256 digest
//! - Hashing helpers shared by the transaction types

mod address;
mod keypair;
mod signature;

use std::sync::OnceLock;

use secp256k1::{All, Secp256k1};
use sha2::{Digest, Sha256};
use tiny_keccak::{Hasher, Keccak};

pub use address::Address;
pub use keypair::{KeyError, Keypair};
pub use signature::{signing_digest, Signature, RECOVERY_ID_OFFSET, SIGNED_MESSAGE_PREFIX};

/// Keccak-256 of arbitrary bytes (output 32 bytes).
pub fn keccak256(input: &[u8]) -> [u8; 32] {
    keccak256_concat(&[input])
}

/// Keccak-256 of the concatenation of `parts`, without copying them.
pub fn keccak256_concat(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; 32];
    hasher.finalize(&mut out);
    out
}

/// SHA-256 of arbitrary bytes (output 32 bytes).
pub fn sha256(input: &[u8]) -> [u8; 32] {
    Sha256::digest(input).into()
}

/// Shared signing/verification context.
pub(crate) fn secp() -> &'static Secp256k1<All> {
    static SECP: OnceLock<Secp256k1<All>> = OnceLock::new();
    SECP.get_or_init(Secp256k1::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak_empty_input() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_keccak_concat_matches_single_input() {
        let parts: [&[u8]; 3] = [b"hello ", b"", b"world"];
        assert_eq!(keccak256_concat(&parts), keccak256(b"hello world"));
        assert_eq!(keccak256_concat(&[]), keccak256(b""));
    }

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
