//! Ethereum keypair generation and digest signing.

use std::fmt;

use secp256k1::{Message, PublicKey, SecretKey};

use super::{secp, Address, Signature};
use crate::transaction::AccountId;

/// Errors raised while building a keypair from external key material.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("Invalid private key hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Invalid private key: {0}")]
    InvalidKey(#[from] secp256k1::Error),
}

/// Represents an Ethereum keypair (private key + derived address).
#[derive(Clone)]
pub struct Keypair {
    /// The private key
    secret_key: SecretKey,
    /// The derived Ethereum address
    address: Address,
}

impl Keypair {
    /// Generates a new random keypair.
    ///
    /// Uses a cryptographically secure random number generator.
    pub fn generate() -> Self {
        let (secret_key, public_key) = secp().generate_keypair(&mut rand::thread_rng());

        Self {
            secret_key,
            address: Address::from_public_key(&public_key),
        }
    }

    /// Builds a keypair from raw secret key bytes.
    ///
    /// Fails if the bytes are zero or not below the curve order.
    pub fn from_secret_key(secret_bytes: [u8; 32]) -> Result<Self, KeyError> {
        let secret_key = SecretKey::from_slice(&secret_bytes)?;
        let public_key = PublicKey::from_secret_key(secp(), &secret_key);

        Ok(Self {
            secret_key,
            address: Address::from_public_key(&public_key),
        })
    }

    /// Builds a keypair from a hex encoded secret key (0x prefix optional).
    pub fn from_hex(secret_hex: &str) -> Result<Self, KeyError> {
        let secret_hex = secret_hex.trim();
        let secret_hex = secret_hex.strip_prefix("0x").unwrap_or(secret_hex);

        let mut secret_bytes = [0u8; 32];
        hex::decode_to_slice(secret_hex, &mut secret_bytes)?;
        Self::from_secret_key(secret_bytes)
    }

    /// Signs a 32-byte digest, producing a recoverable `(v, r, s)` signature.
    pub fn sign_digest(&self, digest: &[u8; 32]) -> Signature {
        let message = Message::from_digest(*digest);
        let recoverable = secp().sign_ecdsa_recoverable(&message, &self.secret_key);
        Signature::from_recoverable(&recoverable)
    }

    /// Returns the private key as a hex string (without 0x prefix).
    pub fn private_key_hex(&self) -> String {
        hex::encode(self.secret_key.secret_bytes())
    }

    /// Returns a reference to the derived address.
    #[inline]
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Returns the account id owned by this keypair.
    pub fn account_id(&self) -> AccountId {
        AccountId::from_address(&self.address)
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
