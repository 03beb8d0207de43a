//! # eth_ledger_tx
//!
//! Ethereum-style transaction signing and validation.
//!
//! ## Architecture
//!
//! - `crypto`: secp256k1 keys, addresses and recoverable signatures
//! - `transaction`: transactions, signed transactions and ledger entries
//! - `ledger`: an owned, deduplicating collection of ledger entries
//! - `config` / `logging`: command line and tracing setup for the binary

pub mod config;
pub mod crypto;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod transaction;

pub use config::Config;
pub use crypto::{Address, Keypair, Signature};
pub use error::{TxError, TxErrorKind};
pub use ledger::{Ledger, LedgerError};
pub use transaction::{AccountId, LedgerEntry, SignedTransaction, Transaction};
