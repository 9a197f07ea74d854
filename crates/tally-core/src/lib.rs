//! tally-core
//!
//! Week rules, aggregation and ledger services for the sales tally.
//! Depends on tally-domain. No terminal I/O, no direct storage interactions:
//! persistence goes through the [`storage::LedgerStorage`] trait.

pub mod aggregator;
pub mod error;
pub mod format;
pub mod ledger_store;
pub mod storage;
pub mod time;
pub mod transaction_service;
pub mod week;


pub use aggregator::WeekAggregator;
pub use error::CoreError;
pub use format::{CurrencyFormatter, DateFormatter, LocaleConfig, LocaleFormatter};
pub use ledger_store::{LedgerStore, LoadReport};
pub use storage::LedgerStorage;
pub use time::{Clock, FixedClock, SystemClock};
pub use transaction_service::TransactionService;
pub use week::{days_since_saturday, week_range, week_start};
