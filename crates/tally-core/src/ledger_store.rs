//! Durability of the transaction collection.

use tracing::{info, warn};

use tally_domain::{Transaction, WeekRange};

use crate::storage::{ledger_warnings, LedgerStorage};
use crate::CoreError;

/// Outcome of reading the durable slot.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub transactions: Vec<Transaction>,
    /// Problems found while reading; a corrupt slot is reported here rather than failing.
    pub warnings: Vec<String>,
    /// True when the slot could not be read and the ledger started empty.
    pub recovered: bool,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Loads and saves the whole collection through a [`LedgerStorage`] backend.
pub struct LedgerStore {
    storage: Box<dyn LedgerStorage>,
}

impl LedgerStore {
    pub fn new(storage: Box<dyn LedgerStorage>) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &dyn LedgerStorage {
        self.storage.as_ref()
    }

    /// Reads the persisted collection. Never fails: unreadable payloads
    /// yield an empty ledger plus a warning, and entries dated too close to
    /// the calendar limits are skipped with a warning.
    pub fn load(&self) -> LoadReport {
        let slot = self.storage.slot_label();
        match self.storage.read_ledger() {
            Ok(Some(mut transactions)) => {
                let warnings = ledger_warnings(&transactions);
                for message in &warnings {
                    warn!(%slot, "{message}");
                }
                transactions.retain(|txn| WeekRange::is_representable(txn.date()));
                info!(%slot, count = transactions.len(), "ledger loaded");
                LoadReport {
                    transactions,
                    warnings,
                    recovered: false,
                }
            }
            Ok(None) => {
                info!(%slot, "no saved ledger, starting empty");
                LoadReport::default()
            }
            Err(err) => {
                warn!(%slot, error = %err, "stored ledger unreadable, starting empty");
                LoadReport {
                    transactions: Vec::new(),
                    warnings: vec![format!("stored ledger unreadable: {err}")],
                    recovered: true,
                }
            }
        }
    }

    /// Overwrites the slot with `transactions`.
    pub fn save(&self, transactions: &[Transaction]) -> Result<(), CoreError> {
        self.storage.write_ledger(transactions)
    }
}
