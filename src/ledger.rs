//! An owned collection of ledger entries for a single chain.

use std::collections::HashSet;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::TxError;
use crate::transaction::LedgerEntry;

/// Errors raised when submitting an entry to a [`Ledger`].
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("transaction {tx} rejected: {source}")]
    Rejected {
        tx: String,
        #[source]
        source: TxError,
    },

    #[error("transaction {tx} is already in the ledger")]
    Duplicate { tx: String },
}

/// Failure reported by [`Ledger::revalidate`].
#[derive(Debug)]
pub struct ValidationFailure {
    /// Position of the entry in the ledger
    pub index: usize,
    /// Why the entry failed
    pub error: TxError,
}

/// Entries accepted for one chain, in submission order.
///
/// The ledger is a plain owned value; wrap it in a lock if it has to be
/// shared between threads.
#[derive(Debug, Clone)]
pub struct Ledger {
    chain_id: u16,
    entries: Vec<LedgerEntry>,
    /// [`LedgerEntry::identity`] of every entry, for duplicate lookups.
    seen: HashSet<(u64, Vec<u8>)>,
}

impl Ledger {
    /// Creates an empty ledger for `chain_id`.
    pub fn new(chain_id: u16) -> Self {
        Self {
            chain_id,
            entries: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Restores a ledger from entries of unknown provenance (e.g. a block
    /// read back from storage). Nothing is validated; see [`Ledger::revalidate`].
    pub fn from_entries(chain_id: u16, entries: Vec<LedgerEntry>) -> Self {
        let seen = entries.iter().map(LedgerEntry::identity).collect();
        Self {
            chain_id,
            entries,
            seen,
        }
    }

    /// Validates `entry` against this ledger's chain and appends it.
    ///
    /// An entry equal to one already present (same nonce and signature) is
    /// rejected as a duplicate.
    pub fn submit(&mut self, entry: LedgerEntry) -> Result<(), LedgerError> {
        let tx = entry.signed().to_string();

        if let Err(source) = entry.signed().validate(self.chain_id) {
            warn!(%tx, error = %source, "rejecting transaction");
            return Err(LedgerError::Rejected { tx, source });
        }

        if !self.seen.insert(entry.identity()) {
            warn!(%tx, "rejecting duplicate transaction");
            return Err(LedgerError::Duplicate { tx });
        }

        debug!(%tx, index = self.entries.len(), "transaction accepted");
        self.entries.push(entry);
        Ok(())
    }

    /// Validates every entry in parallel.
    ///
    /// Returns the failures ordered by index; an empty result means every
    /// entry is valid for this ledger's chain.
    pub fn revalidate(&self) -> Vec<ValidationFailure> {
        self.entries
            .par_iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                entry
                    .signed()
                    .validate(self.chain_id)
                    .err()
                    .map(|error| ValidationFailure { index, error })
            })
            .collect()
    }

    /// Reports whether an equal entry (same nonce and signature) is present.
    pub fn contains(&self, entry: &LedgerEntry) -> bool {
        self.seen.contains(&entry.identity())
    }

    /// Sum of [`LedgerEntry::fee`] over all entries, saturating.
    pub fn total_fees(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |total, entry| total.saturating_add(entry.fee()))
    }

    pub fn chain_id(&self) -> u16 {
        self.chain_id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LedgerEntry> + '_ {
        self.entries.iter()
    }
}
