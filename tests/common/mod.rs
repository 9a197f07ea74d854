#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, TimeZone, Utc};
use once_cell::sync::Lazy;
use tally::{
    FixedClock, JsonSlotStorage, LedgerStorage, LocaleFormatter, MemorySlotStorage, SalesBook,
    Transaction,
};
use tally_core::CoreError;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated data directory for one test.
pub fn temp_data_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Clock pinned to Monday 2024-06-10, 09:00 UTC.
pub fn monday_clock() -> FixedClock {
    FixedClock::at(Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap())
}

/// Book over a file slot in a fresh temp dir; returns the slot path too.
pub fn file_book() -> (SalesBook, PathBuf) {
    let storage = JsonSlotStorage::new(temp_data_dir(), "sales").expect("json slot");
    let path = storage.path().to_path_buf();
    (reopen_file_book(&path), path)
}

pub fn reopen_file_book(path: &std::path::Path) -> SalesBook {
    SalesBook::open_with(
        Box::new(JsonSlotStorage::at_path(path.to_path_buf())),
        Box::new(monday_clock()),
        LocaleFormatter::for_tag("en-US"),
    )
}

/// In-memory slot whose writes can be switched to fail.
#[derive(Clone, Default)]
pub struct FlakySlot {
    inner: Arc<MemorySlotStorage>,
    fail_writes: Arc<AtomicBool>,
}

impl FlakySlot {
    pub fn set_failing(&self, failing: bool) {
        self.fail_writes.store(failing, Ordering::SeqCst);
    }

    pub fn stored(&self) -> Vec<Transaction> {
        self.inner
            .read_ledger()
            .expect("readable slot")
            .unwrap_or_default()
    }

    pub fn payload(&self) -> Option<String> {
        self.inner.payload()
    }
}

impl LedgerStorage for FlakySlot {
    fn read_ledger(&self) -> Result<Option<Vec<Transaction>>, CoreError> {
        self.inner.read_ledger()
    }

    fn write_ledger(&self, transactions: &[Transaction]) -> Result<(), CoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CoreError::Storage("disk full".into()));
        }
        self.inner.write_ledger(transactions)
    }

    fn slot_label(&self) -> String {
        "flaky".into()
    }
}

pub fn flaky_book() -> (SalesBook, FlakySlot) {
    let slot = FlakySlot::default();
    let book = SalesBook::open_with(
        Box::new(slot.clone()),
        Box::new(monday_clock()),
        LocaleFormatter::default(),
    );
    (book, slot)
}
