//! Derived weekly views. None of these are persisted.

use chrono::{Days, Duration, NaiveDate};
use serde::Serialize;

use crate::common::sum_amounts;
use crate::transaction::Transaction;

/// Number of days covered by a sales week.
pub const DAYS_PER_WEEK: i64 = 7;

/// Inclusive date span of one sales week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct WeekRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekRange {
    /// Builds the range that begins on `start` and spans a full week.
    pub fn starting(start: NaiveDate) -> Self {
        Self {
            start,
            end: start + Duration::days(DAYS_PER_WEEK - 1),
        }
    }

    /// Whether the week containing `date` fits inside chrono's calendar.
    ///
    /// Dates within six days of either calendar limit have no representable
    /// week and must not reach the ledger.
    pub fn is_representable(date: NaiveDate) -> bool {
        let span = Days::new((DAYS_PER_WEEK - 1) as u64);
        date.checked_sub_days(span).is_some() && date.checked_add_days(span).is_some()
    }

    /// Inclusive on both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Transactions sharing one computed week start, with their summed amount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekBucket {
    pub range: WeekRange,
    pub transactions: Vec<Transaction>,
    pub total: f64,
}

impl WeekBucket {
    pub fn new(range: WeekRange, transactions: Vec<Transaction>) -> Self {
        let total = sum_amounts(&transactions);
        Self {
            range,
            transactions,
            total,
        }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// A week bucket paired with whether it is the week containing "today".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekView {
    pub bucket: WeekBucket,
    pub is_current: bool,
}

/// Totals for the week containing a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeekSummary {
    pub range: WeekRange,
    pub total: f64,
    pub count: usize,
}

/// Result of a list or search request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionListing {
    pub transactions: Vec<Transaction>,
    pub total: f64,
    /// Number of entries in the ledger before filtering.
    pub available: usize,
}

impl TransactionListing {
    pub fn shown(&self) -> usize {
        self.transactions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::NewSale;
    use chrono::Utc;

    #[test]
    fn range_spans_seven_days_inclusive() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 8).unwrap();
        let range = WeekRange::starting(start);
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2024, 6, 14).unwrap());
        assert!(range.contains(start));
        assert!(range.contains(range.end));
        assert!(!range.contains(range.end.succ_opt().unwrap()));
        assert!(!range.contains(start.pred_opt().unwrap()));
    }

    #[test]
    fn calendar_edges_have_no_week() {
        assert!(WeekRange::is_representable(NaiveDate::from_ymd_opt(2024, 6, 8).unwrap()));
        assert!(!WeekRange::is_representable(NaiveDate::MAX));
        assert!(!WeekRange::is_representable(NaiveDate::MIN));
        let inner = NaiveDate::MAX - Duration::days(DAYS_PER_WEEK - 1);
        assert!(WeekRange::is_representable(inner));
        assert!(!WeekRange::is_representable(inner.succ_opt().unwrap()));
    }

    #[test]
    fn bucket_total_sums_amounts() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 8).unwrap();
        let txns = vec![
            Transaction::record(NewSale::new(start, 10.5, "a").unwrap(), Utc::now()),
            Transaction::record(NewSale::new(start, 4.5, "b").unwrap(), Utc::now()),
        ];
        let bucket = WeekBucket::new(WeekRange::starting(start), txns);
        assert_eq!(bucket.total, 15.0);
        assert_eq!(bucket.len(), 2);
    }
}
