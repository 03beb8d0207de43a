//! Error types for transaction construction, signing and validation.

use thiserror::Error;

/// Errors raised by [`Transaction`](crate::Transaction) and
/// [`SignedTransaction`](crate::SignedTransaction) operations.
///
/// Validation failures are reported, never fatal: the caller decides whether
/// to reject the transaction or just log it.
#[derive(Error, Debug)]
pub enum TxError {
    #[error("account {account:?} is not properly formatted")]
    InvalidAccountFormat { account: String },

    #[error("signing transaction {tx} failed: {reason}")]
    SigningFailure { tx: String, reason: String },

    #[error("invalid chain id, got[{got}] exp[{expected}]")]
    WrongChain { got: u16, expected: u16 },

    #[error("from account {account:?} is not properly formatted")]
    InvalidFromAddress { account: String },

    #[error("to account {account:?} is not properly formatted")]
    InvalidToAddress { account: String },

    #[error("transaction invalid, sending money to yourself: {account}")]
    SelfTransfer { account: String },

    #[error("malformed signature: {reason}")]
    MalformedSignature { reason: String },

    #[error("public key recovery failed: {reason}")]
    RecoveryFailure { reason: String },

    #[error("signature address {recovered} doesn't match from address {from}")]
    SignatureMismatch { recovered: String, from: String },

    #[error("encoding failed while {context}")]
    EncodingFailure {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Classification of a [`TxError`], without its context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxErrorKind {
    InvalidAccountFormat,
    SigningFailure,
    WrongChain,
    InvalidFromAddress,
    InvalidToAddress,
    SelfTransfer,
    MalformedSignature,
    RecoveryFailure,
    SignatureMismatch,
    EncodingFailure,
}

impl TxError {
    /// Returns the class of this error.
    pub fn kind(&self) -> TxErrorKind {
        match self {
            TxError::InvalidAccountFormat { .. } => TxErrorKind::InvalidAccountFormat,
            TxError::SigningFailure { .. } => TxErrorKind::SigningFailure,
            TxError::WrongChain { .. } => TxErrorKind::WrongChain,
            TxError::InvalidFromAddress { .. } => TxErrorKind::InvalidFromAddress,
            TxError::InvalidToAddress { .. } => TxErrorKind::InvalidToAddress,
            TxError::SelfTransfer { .. } => TxErrorKind::SelfTransfer,
            TxError::MalformedSignature { .. } => TxErrorKind::MalformedSignature,
            TxError::RecoveryFailure { .. } => TxErrorKind::RecoveryFailure,
            TxError::SignatureMismatch { .. } => TxErrorKind::SignatureMismatch,
            TxError::EncodingFailure { .. } => TxErrorKind::EncodingFailure,
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        TxError::MalformedSignature {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TxError>;
