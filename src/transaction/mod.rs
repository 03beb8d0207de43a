//! Transactions and their signed and ledger forms.
//!
//! - `Transaction`: an unsigned transfer intent
//! - `SignedTransaction`: a transaction plus its `(v, r, s)` signature
//! - `LedgerEntry`: a signed transaction accepted for block inclusion

mod account;
mod encoding;
mod ledger_entry;
mod signed;
mod tx;

pub use account::AccountId;
pub use ledger_entry::LedgerEntry;
pub use signed::SignedTransaction;
pub use tx::Transaction;
