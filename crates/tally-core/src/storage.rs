use std::collections::HashSet;

use tally_domain::{Transaction, WeekRange};

use crate::CoreError;

/// Abstraction over the durable slot holding the whole transaction collection.
pub trait LedgerStorage: Send + Sync {
    /// Reads the persisted collection. A slot that was never written yields `Ok(None)`.
    fn read_ledger(&self) -> Result<Option<Vec<Transaction>>, CoreError>;

    /// Replaces the persisted collection with `transactions`.
    fn write_ledger(&self, transactions: &[Transaction]) -> Result<(), CoreError>;

    /// Human-readable name of the slot, used in logs.
    fn slot_label(&self) -> String;
}

/// Detects duplicate ids and values that could not have been recorded through `add`.
///
/// Entries whose date has no representable week are reported here and
/// dropped by [`crate::LedgerStore::load`].
pub fn ledger_warnings(transactions: &[Transaction]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut warnings = Vec::new();

    for txn in transactions {
        if !seen.insert(txn.id()) {
            warnings.push(format!("transaction id {} appears more than once", txn.id()));
        }
        if txn.amount().is_nan() || txn.amount() <= 0.0 {
            warnings.push(format!(
                "transaction {} has non-positive amount {}",
                txn.id(),
                txn.amount()
            ));
        }
        if !WeekRange::is_representable(txn.date()) {
            warnings.push(format!(
                "transaction {} dated {} is outside the supported calendar and was skipped",
                txn.id(),
                txn.date()
            ));
        }
        if txn.description().trim().is_empty() {
            warnings.push(format!("transaction {} has an empty description", txn.id()));
        }
    }
    warnings
}
