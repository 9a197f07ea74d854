#![doc(test(attr(deny(warnings))))]

//! Tally records sales and summarizes them over Saturday-to-Friday weeks.
//!
//! [`SalesBook`] owns the ledger, persists it after every change and derives
//! weekly views on demand.

pub mod errors;
pub mod sales_book;
pub mod utils;

pub use errors::{Result, TallyError};
pub use sales_book::SalesBook;

pub use tally_config::{Config, ConfigManager};
pub use tally_core::{
    Clock, CurrencyFormatter, DateFormatter, FixedClock, LedgerStorage, LocaleFormatter,
    SystemClock, WeekAggregator,
};
pub use tally_domain::{
    NewSale, SaleDraft, Transaction, TransactionId, TransactionListing, ValidationError,
    WeekBucket, WeekRange, WeekSummary, WeekView,
};
pub use tally_storage_json::{JsonSlotStorage, MemorySlotStorage};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        let build = utils::build_info::current();
        tracing::info!(
            version = build.version,
            git = build.git_hash,
            profile = build.profile,
            "Tally tracing initialized."
        );
    });
}
