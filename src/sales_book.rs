//! Coordinating layer: the single owner and mutator of the ledger.

use chrono::NaiveDate;
use tracing::{debug, error, info};

use tally_config::Config;
use tally_core::{
    Clock, CurrencyFormatter, LedgerStorage, LedgerStore, LocaleFormatter, SystemClock,
    TransactionService, WeekAggregator,
};
use tally_domain::{
    NewSale, SaleDraft, Transaction, TransactionId, TransactionListing, WeekSummary, WeekView,
};
use tally_storage_json::JsonSlotStorage;

use crate::errors::{Result, TallyError};

/// Owns the ledger, persists it after every mutation and derives views from it.
///
/// When a save fails the in-memory ledger keeps the mutation and the call
/// returns [`TallyError::Persistence`]; the next successful mutation writes
/// the full ledger again.
pub struct SalesBook {
    transactions: Vec<Transaction>,
    store: LedgerStore,
    clock: Box<dyn Clock>,
    formatter: LocaleFormatter,
    currency: String,
    load_warnings: Vec<String>,
}

impl SalesBook {
    /// Loads the ledger from `storage` using the system clock and default locale.
    pub fn open(storage: Box<dyn LedgerStorage>) -> Self {
        Self::open_with(storage, Box::new(SystemClock), LocaleFormatter::default())
    }

    pub fn open_with(
        storage: Box<dyn LedgerStorage>,
        clock: Box<dyn Clock>,
        formatter: LocaleFormatter,
    ) -> Self {
        let store = LedgerStore::new(storage);
        let report = store.load();
        info!(
            count = report.transactions.len(),
            recovered = report.recovered,
            "sales book opened"
        );
        Self {
            transactions: report.transactions,
            store,
            clock,
            formatter,
            currency: Config::default_currency(),
            load_warnings: report.warnings,
        }
    }

    /// Opens the file slot described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let storage = JsonSlotStorage::new(config.resolve_data_dir(), &config.slot)?;
        let book = Self::open_with(
            Box::new(storage),
            Box::new(SystemClock),
            LocaleFormatter::for_tag(&config.locale),
        );
        Ok(book.with_currency(&config.currency))
    }

    pub fn with_currency(mut self, code: &str) -> Self {
        self.currency = code.trim().to_ascii_uppercase();
        self
    }

    /// Newest-created first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Problems reported while opening, e.g. an unreadable slot.
    pub fn load_warnings(&self) -> &[String] {
        &self.load_warnings
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn formatter(&self) -> &LocaleFormatter {
        &self.formatter
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Renders `amount` in the configured currency and locale.
    pub fn format_amount(&self, amount: f64) -> String {
        self.formatter.format_amount(amount, &self.currency)
    }

    /// Validates raw input, records it and saves the ledger.
    ///
    /// Rejections leave both the ledger and the slot untouched.
    pub fn add(&mut self, draft: &SaleDraft) -> Result<Transaction> {
        let sale = TransactionService::validate(draft).map_err(|reason| {
            debug!(reason = reason.kind(), "sale rejected");
            TallyError::Rejected(reason)
        })?;
        self.add_sale(sale)
    }

    /// Records an already validated sale and saves the ledger.
    pub fn add_sale(&mut self, sale: NewSale) -> Result<Transaction> {
        let current = std::mem::take(&mut self.transactions);
        let (txn, updated) = TransactionService::add(current, sale, self.clock.as_ref());
        self.commit(updated)?;
        Ok(txn)
    }

    /// Removes the transaction with `id` and saves the ledger.
    ///
    /// Unknown ids are a no-op and do not touch the slot.
    pub fn delete(&mut self, id: &TransactionId) -> Result<&[Transaction]> {
        if TransactionService::find(&self.transactions, id).is_none() {
            debug!(%id, "delete ignored unknown transaction id");
            return Ok(&self.transactions);
        }
        let current = std::mem::take(&mut self.transactions);
        let updated = TransactionService::remove(current, id);
        self.commit(updated)?;
        Ok(&self.transactions)
    }

    /// Filtered newest-first entries with their total. `None` or an empty term lists everything.
    pub fn list(&self, term: Option<&str>) -> TransactionListing {
        let matches = WeekAggregator::search(
            &self.transactions,
            term.unwrap_or_default(),
            &self.formatter,
        );
        TransactionListing {
            total: WeekAggregator::total(matches.iter().copied()),
            transactions: matches.into_iter().cloned().collect(),
            available: self.transactions.len(),
        }
    }

    /// Every week that has sales, most recent first, flagged against today.
    pub fn weekly_view(&self) -> Vec<WeekView> {
        WeekAggregator::weekly_view(&self.transactions, self.today())
    }

    /// Total and count for the week containing today.
    pub fn current_week(&self) -> WeekSummary {
        WeekAggregator::current_week_summary(&self.transactions, self.today())
    }

    fn commit(&mut self, updated: Vec<Transaction>) -> Result<()> {
        self.transactions = updated;
        self.store.save(&self.transactions).map_err(|err| {
            error!(
                slot = %self.store.storage().slot_label(),
                error = %err,
                "failed to save ledger"
            );
            TallyError::Persistence(err.to_string())
        })
    }
}
