//! Locale-aware rendering of amounts, dates and week labels.

use chrono::{Datelike, NaiveDate};

use tally_domain::WeekRange;

/// Formats currency amounts for presentation.
pub trait CurrencyFormatter: Send + Sync {
    fn format_amount(&self, amount: f64, currency: &str) -> String;
}

/// Formats dates for presentation and for date search.
pub trait DateFormatter: Send + Sync {
    /// Numeric locale rendering, e.g. `6/8/2024` for `en-US`.
    fn format_date(&self, date: NaiveDate) -> String;

    /// Month and day, e.g. `Jun 8`.
    fn format_day(&self, date: NaiveDate) -> String {
        format!("{} {}", month_label(date.month()), date.day())
    }

    /// Week heading, e.g. `Jun 8 - Jun 14, 2024`.
    fn format_week(&self, range: &WeekRange) -> String {
        format!(
            "{} - {}, {}",
            self.format_day(range.start),
            self.format_day(range.end),
            range.end.year()
        )
    }

    /// Compact week badge without the year, e.g. `Jun 8 - Jun 14`.
    fn format_week_badge(&self, range: &WeekRange) -> String {
        format!(
            "{} - {}",
            self.format_day(range.start),
            self.format_day(range.end)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Field order and padding of numeric dates.
pub enum DateStyle {
    /// `6/8/2024`
    MonthFirst,
    /// `8/6/2024`
    DayFirst,
    /// `08/06/2024`
    DayFirstPadded,
    /// `8.6.2024`
    Dotted,
    /// `2024-06-08`
    Iso,
}

/// Separators and date style for one language tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub date_style: DateStyle,
}

impl LocaleConfig {
    /// Resolves the known conventions for `tag`; unknown tags fall back to
    /// `en-US` separators and ISO dates.
    pub fn for_tag(tag: &str) -> Self {
        let normalized = tag.trim().replace('_', "-");
        let (decimal, grouping, style) = match normalized.to_ascii_lowercase().as_str() {
            "en-us" | "en" => ('.', ',', DateStyle::MonthFirst),
            "id-id" | "id" => (',', '.', DateStyle::DayFirst),
            "en-gb" => ('.', ',', DateStyle::DayFirstPadded),
            "de-de" | "de" => (',', '.', DateStyle::Dotted),
            _ => ('.', ',', DateStyle::Iso),
        };
        Self {
            language_tag: normalized,
            decimal_separator: decimal,
            grouping_separator: grouping,
            date_style: style,
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::for_tag("en-US")
    }
}

/// Formatter driven by a [`LocaleConfig`].
#[derive(Debug, Clone, Default)]
pub struct LocaleFormatter {
    locale: LocaleConfig,
}

impl LocaleFormatter {
    pub fn new(locale: LocaleConfig) -> Self {
        Self { locale }
    }

    pub fn for_tag(tag: &str) -> Self {
        Self::new(LocaleConfig::for_tag(tag))
    }

    pub fn locale(&self) -> &LocaleConfig {
        &self.locale
    }
}

impl CurrencyFormatter for LocaleFormatter {
    fn format_amount(&self, amount: f64, currency: &str) -> String {
        let code = currency.trim().to_ascii_uppercase();
        let body = format_number(&self.locale, amount.abs(), minor_units_for(&code));
        let sign = if amount < 0.0 { "-" } else { "" };
        format!("{sign}{}{body}", symbol_for(&code))
    }
}

impl DateFormatter for LocaleFormatter {
    fn format_date(&self, date: NaiveDate) -> String {
        let (y, m, d) = (date.year(), date.month(), date.day());
        match self.locale.date_style {
            DateStyle::MonthFirst => format!("{m}/{d}/{y}"),
            DateStyle::DayFirst => format!("{d}/{m}/{y}"),
            DateStyle::DayFirstPadded => format!("{d:02}/{m:02}/{y}"),
            DateStyle::Dotted => format!("{d}.{m}.{y}"),
            DateStyle::Iso => date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Currency prefix, including the separating space where the locale uses one.
pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "IDR" => "Rp ".into(),
        _ => format!("{code} "),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let raw = format!("{:.*}", precision as usize, value);
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (raw.as_str(), None),
    };
    let mut body = group_digits(int_part, locale.grouping_separator);
    if let Some(frac) = frac_part {
        body.push(locale.decimal_separator);
        body.push_str(frac);
    }
    body
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "",
    }
}
