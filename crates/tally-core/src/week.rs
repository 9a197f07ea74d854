//! Saturday-to-Friday week boundaries.
//!
//! Every grouping and current-week computation goes through [`week_start`].

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use tally_domain::WeekRange;

/// Days elapsed since the most recent Saturday (Saturday itself is 0).
pub fn days_since_saturday(weekday: Weekday) -> i64 {
    match weekday.num_days_from_sunday() {
        0 => 1,
        index => (index as i64 + 1) % 7,
    }
}

/// The Saturday that opens the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(days_since_saturday(date.weekday()))
}

/// The full Saturday-to-Friday span containing `date`.
pub fn week_range(date: NaiveDate) -> WeekRange {
    WeekRange::starting(week_start(date))
}
