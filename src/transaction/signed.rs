//! Signed transactions and their validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::encoding::{from_canonical_bytes, to_canonical_bytes};
use super::{AccountId, Transaction};
use crate::crypto::Signature;
use crate::error::{Result, TxError};

/// A transaction together with the signature of its sender.
///
/// This is what wallets hand over for inclusion in the ledger. On the wire
/// the transaction fields and `v`, `r`, `s` sit side by side in one object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    #[serde(flatten)]
    tx: Transaction,
    #[serde(flatten)]
    signature: Signature,
}

impl SignedTransaction {
    /// Reassembles a signed transaction from parts, e.g. as received from a
    /// client. Nothing is checked until [`SignedTransaction::validate`].
    pub fn from_parts(tx: Transaction, signature: Signature) -> Self {
        Self { tx, signature }
    }

    /// Decodes a signed transaction from JSON.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        from_canonical_bytes(bytes, "decoding signed transaction")
    }

    /// Encodes the signed transaction as JSON.
    pub fn encode(&self) -> Result<Vec<u8>> {
        to_canonical_bytes(self, || format!("encoding signed transaction {}", self))
    }

    /// Checks the transaction for `expected_chain_id`.
    ///
    /// Checks run in a fixed order and stop at the first failure:
    /// chain id, from format, to format, self transfer, signature values,
    /// signer recovery, signer == from.
    pub fn validate(&self, expected_chain_id: u16) -> Result<()> {
        let tx = &self.tx;

        if tx.chain_id() != expected_chain_id {
            return Err(TxError::WrongChain {
                got: tx.chain_id(),
                expected: expected_chain_id,
            });
        }

        if !tx.from().is_account_id() {
            return Err(TxError::InvalidFromAddress {
                account: tx.from().to_string(),
            });
        }

        if !tx.to().is_account_id() {
            return Err(TxError::InvalidToAddress {
                account: tx.to().to_string(),
            });
        }

        if tx.from() == tx.to() {
            return Err(TxError::SelfTransfer {
                account: tx.from().to_string(),
            });
        }

        self.signature.check_values()?;

        let recovered = self.signer()?;
        if recovered != *tx.from() {
            return Err(TxError::SignatureMismatch {
                recovered: recovered.to_string(),
                from: tx.from().to_string(),
            });
        }

        debug!(tx = %self, chain_id = expected_chain_id, "transaction validated");
        Ok(())
    }

    /// Recovers the account that signed this transaction.
    pub fn signer(&self) -> Result<AccountId> {
        let digest = self.tx.signing_digest()?;
        let address = self.signature.recover_address(&digest)?;
        Ok(AccountId::from_address(&address))
    }

    /// Returns the signature as `0x` prefixed hex (`r || s || v`).
    pub fn signature_string(&self) -> String {
        self.signature.to_hex()
    }

    pub fn tx(&self) -> &Transaction {
        &self.tx
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }
}

/// Renders `from:nonce`, the key used when logging a transaction.
impl fmt::Display for SignedTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.tx, f)
    }
}
