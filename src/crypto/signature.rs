//! Recoverable secp256k1 signatures in `(v, r, s)` form.
//!
//! Messages are never signed directly. The payload is stamped with
//! [`SIGNED_MESSAGE_PREFIX`] and its decimal byte length, then hashed with
//! Keccak-256:
//!
//! ```text
//! digest = keccak256("\x19Ledger Signed Message:\n" || len(payload) || payload)
//! ```
//!
//! `r` and `s` are the two ECDSA scalars, `v` is the recovery id shifted by
//! [`RECOVERY_ID_OFFSET`] so a signature produced here is never mistaken for
//! a plain Ethereum one (27/28).

use std::fmt;

use alloy_primitives::U256;
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::Message;
use serde::{Deserialize, Serialize};
use super::{keccak256_concat, secp, Address};
use crate::error::{Result, TxError};

/// Domain separation prefix prepended to every signed payload.
pub const SIGNED_MESSAGE_PREFIX: &str = "\x19Ledger Signed Message:\n";

/// Added to the secp256k1 recovery id (0 or 1) to form `v`.
pub const RECOVERY_ID_OFFSET: u64 = 29;

/// secp256k1 group order n.
const CURVE_ORDER: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];

/// Length of an `r || s || v` signature whose `v` fits in one byte.
const SIGNATURE_LEN: usize = 65;

/// Length of an `r || s || v` signature whose `v` takes all 32 bytes.
const MAX_SIGNATURE_LEN: usize = 32 + 32 + 32;

/// Computes the domain-separated digest of an encoded payload.
pub fn signing_digest(payload: &[u8]) -> [u8; 32] {
    let stamp = format!("{}{}", SIGNED_MESSAGE_PREFIX, payload.len());

    keccak256_concat(&[stamp.as_bytes(), payload])
}

/// A detached recoverable ECDSA signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    /// Recovery identifier, 29 or 30.
    pub v: U256,
    /// First scalar of the ECDSA signature.
    pub r: U256,
    /// Second scalar of the ECDSA signature.
    pub s: U256,
}

impl Signature {
    /// Creates a signature from its components. No range check is made here,
    /// see [`Signature::check_values`].
    pub fn new(v: U256, r: U256, s: U256) -> Self {
        Self { v, r, s }
    }

    /// Converts a libsecp256k1 recoverable signature.
    pub(crate) fn from_recoverable(signature: &RecoverableSignature) -> Self {
        let (recovery_id, compact) = signature.serialize_compact();

        Self {
            v: U256::from(recovery_id.to_i32() as u64 + RECOVERY_ID_OFFSET),
            r: U256::from_be_slice(&compact[..32]),
            s: U256::from_be_slice(&compact[32..]),
        }
    }

    /// Parses the textual form produced by [`Signature::to_hex`].
    ///
    /// The input must carry the `0x` prefix and hold `r` (32 bytes), `s`
    /// (32 bytes) and then `v` as big-endian bytes.
    pub fn from_hex(signature: &str) -> Result<Self> {
        let digits = signature
            .strip_prefix("0x")
            .ok_or_else(|| TxError::malformed("signature is missing the 0x prefix"))?;
        let bytes = hex::decode(digits)
            .map_err(|e| TxError::malformed(format!("invalid signature hex: {}", e)))?;

        if bytes.len() < SIGNATURE_LEN || bytes.len() > MAX_SIGNATURE_LEN {
            return Err(TxError::malformed(format!(
                "signature must be between {} and {} bytes, got {}",
                SIGNATURE_LEN,
                MAX_SIGNATURE_LEN,
                bytes.len()
            )));
        }

        Ok(Self {
            r: U256::from_be_slice(&bytes[..32]),
            s: U256::from_be_slice(&bytes[32..64]),
            v: U256::from_be_slice(&bytes[64..]),
        })
    }

    /// Checks that `r` and `s` lie in `[1, n-1]` and that `v` is one of the
    /// two accepted recovery values.
    pub fn check_values(&self) -> Result<()> {
        self.recovery_id()?;

        let order = U256::from_be_bytes(CURVE_ORDER);
        if self.r.is_zero() || self.r >= order {
            return Err(TxError::malformed("r is outside the curve order"));
        }
        if self.s.is_zero() || self.s >= order {
            return Err(TxError::malformed("s is outside the curve order"));
        }

        Ok(())
    }

    /// Recovers the address that produced this signature over `digest`.
    pub fn recover_address(&self, digest: &[u8; 32]) -> Result<Address> {
        let recovery_id = self.recovery_id()?;

        let mut compact = [0u8; 64];
        compact[..32].copy_from_slice(&self.r.to_be_bytes::<32>());
        compact[32..].copy_from_slice(&self.s.to_be_bytes::<32>());

        let recoverable = RecoverableSignature::from_compact(&compact, recovery_id)
            .map_err(|e| TxError::RecoveryFailure {
                reason: e.to_string(),
            })?;
        let public_key = secp()
            .recover_ecdsa(&Message::from_digest(*digest), &recoverable)
            .map_err(|e| TxError::RecoveryFailure {
                reason: e.to_string(),
            })?;

        Ok(Address::from_public_key(&public_key))
    }

    /// Serializes as `r (32 bytes) || s (32 bytes) || v` with `v` in its
    /// shortest big-endian form (at least one byte).
    pub fn to_bytes(&self) -> Vec<u8> {
        let v = self.v.to_be_bytes::<32>();
        let v_start = v.iter().position(|b| *b != 0).unwrap_or(31);

        let mut bytes = Vec::with_capacity(64 + (32 - v_start));
        bytes.extend_from_slice(&self.r.to_be_bytes::<32>());
        bytes.extend_from_slice(&self.s.to_be_bytes::<32>());
        bytes.extend_from_slice(&v[v_start..]);
        bytes
    }

    /// Returns the 0x prefixed lowercase hex form of [`Signature::to_bytes`].
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_bytes()))
    }

    fn recovery_id(&self) -> Result<RecoveryId> {
        let offset = U256::from(RECOVERY_ID_OFFSET);
        if self.v < offset || self.v > offset + U256::from(1u64) {
            return Err(TxError::malformed(format!(
                "invalid recovery id v={}",
                self.v
            )));
        }

        let id = if self.v == offset { 0 } else { 1 };
        RecoveryId::from_i32(id).map_err(|e| TxError::malformed(e.to_string()))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
