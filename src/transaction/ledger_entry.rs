//! Signed transactions accepted for block inclusion.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::encoding::to_canonical_bytes;
use super::SignedTransaction;
use crate::crypto::sha256;
use crate::error::Result;

/// A signed transaction annotated with acceptance time and fee accounting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    #[serde(flatten)]
    signed: SignedTransaction,
    /// Milliseconds since the Unix epoch (UTC) at acceptance.
    timestamp: u64,
    /// Price of one unit of gas.
    gas_price: u64,
    /// Units of gas consumed by the transaction.
    gas_units: u64,
}

impl LedgerEntry {
    /// Wraps `signed`, stamping it with the current time.
    ///
    /// A system clock set before the Unix epoch stamps the entry with 0 and
    /// logs a warning; use [`LedgerEntry::with_timestamp`] to supply the time.
    pub fn new(signed: SignedTransaction, gas_price: u64, gas_units: u64) -> Self {
        let timestamp = millis_since_epoch(Utc::now().timestamp_millis());
        Self::with_timestamp(signed, timestamp, gas_price, gas_units)
    }

    /// Wraps `signed` with an explicit acceptance timestamp.
    pub fn with_timestamp(
        signed: SignedTransaction,
        timestamp: u64,
        gas_price: u64,
        gas_units: u64,
    ) -> Self {
        Self {
            signed,
            timestamp,
            gas_price,
            gas_units,
        }
    }

    /// SHA-256 of the entry's JSON encoding.
    pub fn hash(&self) -> Result<[u8; 32]> {
        let encoded =
            to_canonical_bytes(self, || format!("hashing ledger entry {}", self.signed))?;
        Ok(sha256(&encoded))
    }

    /// [`LedgerEntry::hash`] as `0x` prefixed hex.
    pub fn hash_hex(&self) -> Result<String> {
        Ok(format!("0x{}", hex::encode(self.hash()?)))
    }

    /// Gas fee plus tip, saturating at `u64::MAX`.
    pub fn fee(&self) -> u64 {
        self.gas_price
            .saturating_mul(self.gas_units)
            .saturating_add(self.signed.tx().tip())
    }

    /// Key that equal entries share: the nonce and the signature bytes.
    pub fn identity(&self) -> (u64, Vec<u8>) {
        (self.signed.tx().nonce(), self.signed.signature().to_bytes())
    }

    pub fn signed(&self) -> &SignedTransaction {
        &self.signed
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn gas_price(&self) -> u64 {
        self.gas_price
    }

    pub fn gas_units(&self) -> u64 {
        self.gas_units
    }
}

/// Two entries are the same submission when their nonces match and their
/// signatures encode to the same bytes. Payload differences are ignored.
impl PartialEq for LedgerEntry {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for LedgerEntry {}

/// Converts a signed millisecond clock reading, clamping pre-epoch values to 0.
fn millis_since_epoch(millis: i64) -> u64 {
    match u64::try_from(millis) {
        Ok(millis) => millis,
        Err(_) => {
            warn!(millis, "system clock is before the Unix epoch, using timestamp 0");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{Keypair, Signature};
    use crate::transaction::Transaction;

    const TO: &str = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed";

    fn signed(keypair: &Keypair, nonce: u64, value: u64, data: &[u8]) -> SignedTransaction {
        Transaction::new(1, nonce, keypair.account_id(), TO.into(), value, 2, data)
            .unwrap()
            .sign(keypair)
            .unwrap()
    }

    #[test]
    fn test_new_stamps_current_time() {
        let before = u64::try_from(Utc::now().timestamp_millis()).unwrap();
        let entry = LedgerEntry::new(signed(&Keypair::generate(), 1, 10, &[]), 3, 21_000);
        let after = u64::try_from(Utc::now().timestamp_millis()).unwrap();

        assert!(entry.timestamp() >= before && entry.timestamp() <= after);
        assert_eq!(entry.gas_price(), 3);
        assert_eq!(entry.gas_units(), 21_000);
    }

    #[test]
    fn test_pre_epoch_clock_clamps_to_zero() {
        assert_eq!(millis_since_epoch(-1), 0);
        assert_eq!(millis_since_epoch(i64::MIN), 0);
        assert_eq!(millis_since_epoch(0), 0);
        assert_eq!(millis_since_epoch(1_700_000_000_000), 1_700_000_000_000);
    }

    #[test]
    fn test_equality_uses_nonce_and_signature() {
        let keypair = Keypair::generate();
        let original = signed(&keypair, 1, 10, b"a");
        let entry = LedgerEntry::with_timestamp(original.clone(), 1, 1, 1);

        // Same signature and nonce, different value and data.
        let relabeled = Transaction::new(1, 1, keypair.account_id(), TO.into(), 99, 2, b"b".to_vec())
            .unwrap();
        let same = LedgerEntry::with_timestamp(
            SignedTransaction::from_parts(relabeled, *original.signature()),
            2,
            5,
            5,
        );
        assert_eq!(entry, same);

        // Same nonce, different signature.
        let resigned = LedgerEntry::with_timestamp(signed(&keypair, 1, 11, b"a"), 1, 1, 1);
        assert_ne!(entry, resigned);

        // Same signature, different nonce.
        let renonced_tx =
            Transaction::new(1, 2, keypair.account_id(), TO.into(), 10, 2, b"a".to_vec()).unwrap();
        let renonced = LedgerEntry::with_timestamp(
            SignedTransaction::from_parts(renonced_tx, *original.signature()),
            1,
            1,
            1,
        );
        assert_ne!(entry, renonced);
    }

    #[test]
    fn test_equality_compares_signature_bytes() {
        let keypair = Keypair::generate();
        let original = signed(&keypair, 1, 10, &[]);
        let sig = *original.signature();
        let entry = LedgerEntry::with_timestamp(original.clone(), 1, 1, 1);

        let parsed = Signature::from_hex(&sig.to_hex()).unwrap();
        let reparsed = LedgerEntry::with_timestamp(
            SignedTransaction::from_parts(original.tx().clone(), parsed),
            1,
            1,
            1,
        );
        assert_eq!(entry, reparsed);
    }

    #[test]
    fn test_hash_covers_metadata() {
        let signed = signed(&Keypair::generate(), 1, 10, &[]);
        let a = LedgerEntry::with_timestamp(signed.clone(), 100, 1, 1);
        let b = LedgerEntry::with_timestamp(signed, 101, 1, 1);

        assert_eq!(a.hash().unwrap(), a.hash().unwrap());
        assert_ne!(a.hash().unwrap(), b.hash().unwrap());
        assert_eq!(a.hash_hex().unwrap().len(), 66);
    }

    #[test]
    fn test_fee() {
        let signed = signed(&Keypair::generate(), 1, 10, &[]);
        assert_eq!(LedgerEntry::with_timestamp(signed.clone(), 0, 3, 7).fee(), 23);
        assert_eq!(
            LedgerEntry::with_timestamp(signed, 0, u64::MAX, 2).fee(),
            u64::MAX
        );
    }

    #[test]
    fn test_json_layout() {
        let entry = LedgerEntry::with_timestamp(signed(&Keypair::generate(), 1, 10, &[]), 5, 6, 7);
        let json: serde_json::Value =
            serde_json::from_slice(&serde_json::to_vec(&entry).unwrap()).unwrap();

        assert_eq!(json["nonce"], 1);
        assert_eq!(json["timestamp"], 5);
        assert_eq!(json["gas_price"], 6);
        assert_eq!(json["gas_units"], 7);
        assert!(json["s"].is_string());
    }
}
