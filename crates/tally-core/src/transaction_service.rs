//! Validation and pure add/remove transformations over the ledger sequence.

use chrono::NaiveDate;
use tracing::debug;

use tally_domain::{NewSale, SaleDraft, Transaction, TransactionId, ValidationError};

use crate::time::Clock;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Provides validated add/remove helpers for the transaction sequence.
///
/// None of these persist; the caller saves the returned sequence.
pub struct TransactionService;

impl TransactionService {
    /// Turns raw user input into a [`NewSale`], or the reason it was rejected.
    pub fn validate(draft: &SaleDraft) -> Result<NewSale, ValidationError> {
        let date_raw = draft.date.trim();
        let amount_raw = draft.amount.trim();
        if date_raw.is_empty() {
            return Err(ValidationError::MissingField("date"));
        }
        if amount_raw.is_empty() {
            return Err(ValidationError::MissingField("amount"));
        }
        if draft.description.trim().is_empty() {
            return Err(ValidationError::MissingField("description"));
        }

        let date = NaiveDate::parse_from_str(date_raw, DATE_FORMAT)
            .map_err(|_| ValidationError::InvalidDate(date_raw.to_string()))?;
        let amount: f64 = amount_raw
            .parse()
            .map_err(|_| ValidationError::InvalidAmount)?;
        NewSale::new(date, amount, &draft.description)
    }

    /// Records `sale` at the front of `transactions` (newest first).
    pub fn add(
        mut transactions: Vec<Transaction>,
        sale: NewSale,
        clock: &dyn Clock,
    ) -> (Transaction, Vec<Transaction>) {
        let txn = Transaction::record(sale, clock.now());
        debug!(id = %txn.id(), date = %txn.date(), amount = txn.amount(), "recorded sale");
        transactions.insert(0, txn.clone());
        (txn, transactions)
    }

    /// Drops the transaction with `id`. Unknown ids leave the sequence untouched.
    pub fn remove(mut transactions: Vec<Transaction>, id: &TransactionId) -> Vec<Transaction> {
        let before = transactions.len();
        transactions.retain(|txn| txn.id() != id);
        if transactions.len() == before {
            debug!(%id, "remove ignored unknown transaction id");
        } else {
            debug!(%id, "removed transaction");
        }
        transactions
    }

    /// Returns the transaction with `id`, if present.
    pub fn find<'a>(transactions: &'a [Transaction], id: &TransactionId) -> Option<&'a Transaction> {
        transactions.iter().find(|txn| txn.id() == id)
    }
}
