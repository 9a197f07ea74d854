//! Weekly grouping, totals and search over a transaction sequence.
//!
//! Everything here is derived on demand; nothing mutates the ledger.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use tally_domain::{sum_amounts, Transaction, WeekBucket, WeekRange, WeekSummary, WeekView};

use crate::format::DateFormatter;
use crate::week::{week_range, week_start};

pub struct WeekAggregator;

impl WeekAggregator {
    /// Partitions `transactions` into Saturday-to-Friday buckets, most recent week first.
    ///
    /// Inside a bucket entries are ordered by date descending; entries sharing a
    /// date keep their ledger order. Weeks without sales are not materialized.
    pub fn group_by_week(transactions: &[Transaction]) -> Vec<WeekBucket> {
        let mut weeks: BTreeMap<NaiveDate, Vec<Transaction>> = BTreeMap::new();
        for txn in transactions {
            weeks
                .entry(week_start(txn.date()))
                .or_default()
                .push(txn.clone());
        }

        weeks
            .into_iter()
            .rev()
            .map(|(start, mut entries)| {
                entries.sort_by(|a, b| b.date().cmp(&a.date()));
                WeekBucket::new(WeekRange::starting(start), entries)
            })
            .collect()
    }

    /// Buckets paired with the current-week flag for `today`.
    pub fn weekly_view(transactions: &[Transaction], today: NaiveDate) -> Vec<WeekView> {
        Self::group_by_week(transactions)
            .into_iter()
            .map(|bucket| WeekView {
                is_current: Self::is_current_week(bucket.range.start, today),
                bucket,
            })
            .collect()
    }

    pub fn current_week_range(today: NaiveDate) -> WeekRange {
        week_range(today)
    }

    /// Total and count of sales dated inside the week containing `today`.
    pub fn current_week_summary(transactions: &[Transaction], today: NaiveDate) -> WeekSummary {
        let range = Self::current_week_range(today);
        let in_week: Vec<&Transaction> = transactions
            .iter()
            .filter(|txn| range.contains(txn.date()))
            .collect();
        WeekSummary {
            range,
            total: Self::total(in_week.iter().copied()),
            count: in_week.len(),
        }
    }

    /// Exact start-date equality with the week containing `today`.
    pub fn is_current_week(week_start: NaiveDate, today: NaiveDate) -> bool {
        week_start == Self::current_week_range(today).start
    }

    /// Week badge for a single transaction.
    pub fn week_of(transaction: &Transaction) -> WeekRange {
        week_range(transaction.date())
    }

    /// Case-insensitive substring search over description, amount and the
    /// locale-rendered date. Keeps the input order; an empty term matches all.
    pub fn search<'a>(
        transactions: &'a [Transaction],
        term: &str,
        dates: &dyn DateFormatter,
    ) -> Vec<&'a Transaction> {
        let needle = term.to_lowercase();
        transactions
            .iter()
            .filter(|txn| {
                txn.description().to_lowercase().contains(&needle)
                    || amount_text(txn.amount()).contains(&needle)
                    || dates.format_date(txn.date()).to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn total<'a, I>(transactions: I) -> f64
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        sum_amounts(transactions)
    }
}

/// Shortest decimal rendering: `150000`, `12.5`.
fn amount_text(amount: f64) -> String {
    amount.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::LocaleFormatter;
    use chrono::{Datelike, Duration, TimeZone, Utc, Weekday};
    use tally_domain::{NewSale, TransactionId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(id: &str, on: NaiveDate, amount: f64, description: &str) -> Transaction {
        let created = Utc.with_ymd_and_hms(2024, 6, 10, 8, 0, 0).unwrap();
        Transaction::with_id(
            TransactionId::from(id),
            NewSale::new(on, amount, description).unwrap(),
            created,
        )
    }

    #[test]
    fn empty_ledger_yields_nothing() {
        let today = date(2024, 6, 10);
        assert!(WeekAggregator::group_by_week(&[]).is_empty());
        let summary = WeekAggregator::current_week_summary(&[], today);
        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.count, 0);
        assert_eq!(WeekAggregator::total(&[]), 0.0);
    }

    #[test]
    fn friday_and_saturday_split_into_two_weeks() {
        let ledger = vec![
            txn("sat", date(2024, 6, 8), 200.0, "Saturday sale"),
            txn("fri", date(2024, 6, 7), 100.0, "Friday sale"),
        ];
        let buckets = WeekAggregator::group_by_week(&ledger);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].range, WeekRange::starting(date(2024, 6, 8)));
        assert_eq!(buckets[0].range.end, date(2024, 6, 14));
        assert_eq!(buckets[0].total, 200.0);
        assert_eq!(buckets[1].range.start, date(2024, 6, 1));
        assert_eq!(buckets[1].range.end, date(2024, 6, 7));
        assert_eq!(buckets[1].total, 100.0);
        assert_eq!(buckets[1].len(), 1);
    }

    #[test]
    fn buckets_partition_the_input_in_descending_order() {
        let start = date(2024, 1, 3);
        let ledger: Vec<Transaction> = (0..90)
            .map(|i| {
                let on = start + Duration::days((i * 37) % 120);
                txn(&format!("t{i}"), on, (i + 1) as f64, "bulk")
            })
            .collect();

        let buckets = WeekAggregator::group_by_week(&ledger);

        let count: usize = buckets.iter().map(WeekBucket::len).sum();
        assert_eq!(count, ledger.len());
        let mut ids: Vec<_> = buckets
            .iter()
            .flat_map(|b| b.transactions.iter().map(|t| t.id().clone()))
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), ledger.len());

        let bucket_sum: f64 = buckets.iter().map(|b| b.total).sum();
        assert!((bucket_sum - WeekAggregator::total(&ledger)).abs() < 1e-9);

        for pair in buckets.windows(2) {
            assert!(pair[0].range.start > pair[1].range.start);
        }
        for bucket in &buckets {
            assert_eq!(bucket.range.start.weekday(), Weekday::Sat);
            assert!(!bucket.is_empty());
            for pair in bucket.transactions.windows(2) {
                assert!(pair[0].date() >= pair[1].date());
            }
            assert!(bucket.transactions.iter().all(|t| bucket.range.contains(t.date())));
        }
    }

    #[test]
    fn same_day_entries_keep_ledger_order() {
        let day = date(2024, 6, 11);
        let ledger = vec![
            txn("newer", day, 1.0, "second"),
            txn("mid", date(2024, 6, 12), 1.0, "later date"),
            txn("older", day, 1.0, "first"),
        ];
        let buckets = WeekAggregator::group_by_week(&ledger);
        let order: Vec<&str> = buckets[0]
            .transactions
            .iter()
            .map(|t| t.id().as_str())
            .collect();
        assert_eq!(order, vec!["mid", "newer", "older"]);
    }

    #[test]
    fn current_week_summary_counts_inclusive_bounds() {
        let today = date(2024, 6, 10);
        let ledger = vec![
            txn("a", date(2024, 6, 8), 150000.0, "Dress sale"),
            txn("b", date(2024, 6, 14), 50.0, "week end"),
            txn("c", date(2024, 6, 7), 999.0, "previous week"),
            txn("d", date(2024, 6, 15), 999.0, "next week"),
        ];
        let summary = WeekAggregator::current_week_summary(&ledger, today);
        assert_eq!(summary.range.start, date(2024, 6, 8));
        assert_eq!(summary.total, 150050.0);
        assert_eq!(summary.count, 2);
    }

    #[test]
    fn current_week_is_start_equality() {
        let today = date(2024, 6, 10);
        assert!(WeekAggregator::is_current_week(date(2024, 6, 8), today));
        assert!(!WeekAggregator::is_current_week(date(2024, 6, 9), today));
        assert!(!WeekAggregator::is_current_week(date(2024, 6, 1), today));
    }

    #[test]
    fn weekly_view_flags_only_the_current_week() {
        let ledger = vec![
            txn("now", date(2024, 6, 13), 1.0, "this week"),
            txn("old", date(2024, 5, 30), 1.0, "older"),
        ];
        let view = WeekAggregator::weekly_view(&ledger, date(2024, 6, 14));
        assert_eq!(view.len(), 2);
        assert!(view[0].is_current);
        assert!(!view[1].is_current);
    }

    #[test]
    fn search_matches_description_amount_and_date() {
        let fmt = LocaleFormatter::for_tag("en-US");
        let ledger = vec![
            txn("1", date(2024, 6, 8), 150000.0, "Dress sale"),
            txn("2", date(2024, 6, 9), 12.5, "Shoe sale"),
        ];

        let hits = WeekAggregator::search(&ledger, "DRESS", &fmt);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].description(), "Dress sale");

        let hits = WeekAggregator::search(&ledger, "150000", &fmt);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id().as_str(), "1");

        let hits = WeekAggregator::search(&ledger, "12.5", &fmt);
        assert_eq!(hits[0].id().as_str(), "2");

        let hits = WeekAggregator::search(&ledger, "6/9/2024", &fmt);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id().as_str(), "2");

        assert!(WeekAggregator::search(&ledger, "hat", &fmt).is_empty());
    }

    #[test]
    fn empty_search_returns_everything_in_order() {
        let fmt = LocaleFormatter::default();
        let ledger = vec![
            txn("1", date(2024, 6, 1), 1.0, "x"),
            txn("2", date(2024, 6, 20), 2.0, "y"),
            txn("3", date(2024, 6, 5), 3.0, "z"),
        ];
        let hits: Vec<Transaction> = WeekAggregator::search(&ledger, "", &fmt)
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(hits, ledger);
    }

    #[test]
    fn week_of_matches_grouping() {
        let t = txn("1", date(2024, 6, 12), 1.0, "mid week");
        assert_eq!(WeekAggregator::week_of(&t).start, date(2024, 6, 8));
    }
}
