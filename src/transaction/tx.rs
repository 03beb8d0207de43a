//! Unsigned transfer intents.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::encoding::{from_canonical_bytes, hex_bytes, to_canonical_bytes};
use super::{AccountId, SignedTransaction};
use crate::crypto::{signing_digest, Keypair};
use crate::error::{Result, TxError};

/// A transfer of `value` from one account to another.
///
/// Fields are encoded in declaration order; that order is part of the
/// signing format and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    chain_id: u16,
    nonce: u64,
    from: AccountId,
    to: AccountId,
    value: u64,
    tip: u64,
    #[serde(with = "hex_bytes")]
    data: Vec<u8>,
}

impl Transaction {
    /// Creates a transaction.
    ///
    /// Only the account ids are checked; zero chain id, nonce or value are
    /// accepted.
    pub fn new(
        chain_id: u16,
        nonce: u64,
        from: AccountId,
        to: AccountId,
        value: u64,
        tip: u64,
        data: impl Into<Vec<u8>>,
    ) -> Result<Self> {
        for account in [&from, &to] {
            if !account.is_account_id() {
                return Err(TxError::InvalidAccountFormat {
                    account: account.to_string(),
                });
            }
        }

        Ok(Self {
            chain_id,
            nonce,
            from,
            to,
            value,
            tip,
            data: data.into(),
        })
    }

    /// Decodes a transaction from its canonical encoding.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        from_canonical_bytes(bytes, "decoding transaction")
    }

    /// Returns the canonical encoding that is stamped, hashed and signed.
    pub fn encode(&self) -> Result<Vec<u8>> {
        to_canonical_bytes(self, || format!("encoding transaction {}", self))
    }

    /// Returns the domain-separated digest a signature over this transaction
    /// commits to.
    pub fn signing_digest(&self) -> Result<[u8; 32]> {
        Ok(signing_digest(&self.encode()?))
    }

    /// Signs the transaction.
    ///
    /// The produced signature is recovered once before returning, so a
    /// faulty signer is reported here rather than at validation time.
    pub fn sign(&self, keypair: &Keypair) -> Result<SignedTransaction> {
        let digest = self.signing_digest()?;
        let signature = keypair.sign_digest(&digest);

        let signing_failure = |reason: String| TxError::SigningFailure {
            tx: self.to_string(),
            reason,
        };
        signature
            .check_values()
            .map_err(|e| signing_failure(e.to_string()))?;
        let recovered = signature
            .recover_address(&digest)
            .map_err(|e| signing_failure(e.to_string()))?;
        if recovered != *keypair.address() {
            return Err(signing_failure(format!(
                "signature recovers to {} instead of {}",
                recovered,
                keypair.address()
            )));
        }

        debug!(tx = %self, signer = %keypair.address(), "transaction signed");
        Ok(SignedTransaction::from_parts(self.clone(), signature))
    }

    pub fn chain_id(&self) -> u16 {
        self.chain_id
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn from(&self) -> &AccountId {
        &self.from
    }

    pub fn to(&self) -> &AccountId {
        &self.to
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn tip(&self) -> u64 {
        self.tip
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Renders `from:nonce`, the key used when logging a transaction.
impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.from, self.nonce)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TxErrorKind;

    const FROM: &str = "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf";
    const TO: &str = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed";

    fn make_tx(data: &[u8]) -> Transaction {
        Transaction::new(1, 1, FROM.into(), TO.into(), 1000, 0, data).unwrap()
    }

    #[test]
    fn test_new_accepts_zero_values() {
        let tx = Transaction::new(0, 0, FROM.into(), TO.into(), 0, 0, Vec::new()).unwrap();
        assert_eq!(tx.chain_id(), 0);
        assert_eq!(tx.nonce(), 0);
        assert_eq!(tx.value(), 0);
        assert!(tx.data().is_empty());
    }

    #[test]
    fn test_new_rejects_bad_accounts() {
        let err = Transaction::new(1, 1, "Sosun".into(), TO.into(), 1, 0, Vec::new()).unwrap_err();
        assert_eq!(err.kind(), TxErrorKind::InvalidAccountFormat);
        assert!(err.to_string().contains("Sosun"));

        let err = Transaction::new(1, 1, FROM.into(), "Bibas".into(), 1, 0, Vec::new()).unwrap_err();
        assert_eq!(err.kind(), TxErrorKind::InvalidAccountFormat);
        assert!(err.to_string().contains("Bibas"));
    }

    #[test]
    fn test_canonical_encoding_layout() {
        let tx = make_tx(&[0x01, 0xff]);
        let encoded = String::from_utf8(tx.encode().unwrap()).unwrap();
        assert_eq!(
            encoded,
            format!(
                r#"{{"chain_id":1,"nonce":1,"from":"{}","to":"{}","value":1000,"tip":0,"data":"0x01ff"}}"#,
                FROM, TO
            )
        );
    }

    #[test]
    fn test_encoding_is_idempotent() {
        let tx = make_tx(b"memo");
        let encoded = tx.encode().unwrap();
        let decoded = Transaction::decode(&encoded).unwrap();

        assert_eq!(decoded, tx);
        assert_eq!(decoded.encode().unwrap(), encoded);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = Transaction::decode(b"{\"chain_id\":1}").unwrap_err();
        assert_eq!(err.kind(), TxErrorKind::EncodingFailure);
    }

    #[test]
    fn test_digest_depends_on_payload() {
        assert_ne!(
            make_tx(b"a").signing_digest().unwrap(),
            make_tx(b"b").signing_digest().unwrap()
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(make_tx(&[]).to_string(), format!("{}:1", FROM));
    }
}
