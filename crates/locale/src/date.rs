//! Date format presets and tolerant timestamp parsing

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// English month names for the long date form
const MONTHS_LONG: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Closed set of date output formats
///
/// The day/month/year ordering and separators are fixed by the chosen
/// format, independent of how the source timestamp was encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `2025-01-22`
    Iso,
    /// `22/01/2025`
    DayMonthYear,
    /// `01/22/2025`
    MonthDayYear,
    /// `22 January 2025`
    Long,
}

impl DateFormat {
    /// Look up a format by its pattern string
    ///
    /// Returns `None` for patterns outside the closed set.
    pub fn from_pattern(pattern: &str) -> Option<Self> {
        match pattern {
            "YYYY-MM-DD" => Some(Self::Iso),
            "DD/MM/YYYY" => Some(Self::DayMonthYear),
            "MM/DD/YYYY" => Some(Self::MonthDayYear),
            "DD MMMM YYYY" => Some(Self::Long),
            _ => None,
        }
    }

    /// The pattern string this format answers to
    pub fn pattern(&self) -> &'static str {
        match self {
            Self::Iso => "YYYY-MM-DD",
            Self::DayMonthYear => "DD/MM/YYYY",
            Self::MonthDayYear => "MM/DD/YYYY",
            Self::Long => "DD MMMM YYYY",
        }
    }

    /// Format a date according to this preset
    pub fn format(&self, date: NaiveDate) -> String {
        let (y, m, d) = (date.year(), date.month(), date.day());
        match self {
            Self::Iso => format!("{y:04}-{m:02}-{d:02}"),
            Self::DayMonthYear => format!("{d:02}/{m:02}/{y:04}"),
            Self::MonthDayYear => format!("{m:02}/{d:02}/{y:04}"),
            Self::Long => {
                let month = MONTHS_LONG
                    .get((m.saturating_sub(1)) as usize)
                    .unwrap_or(&"");
                format!("{d} {month} {y}")
            }
        }
    }
}

/// Parse a source timestamp string into a date
///
/// Accepts RFC 3339, ISO date-time without offset, and plain ISO dates.
/// Returns `None` for anything else; callers treat that as a missing value.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(d) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(d);
    }

    None
}

/// Interpret a numeric timestamp as a date
///
/// Values with a magnitude above 10^12 are taken as epoch milliseconds,
/// anything else as epoch seconds.
pub fn parse_epoch(value: f64) -> Option<NaiveDate> {
    if !value.is_finite() {
        return None;
    }

    let secs = if value.abs() >= 1.0e12 {
        (value / 1000.0) as i64
    } else {
        value as i64
    };

    DateTime::from_timestamp(secs, 0).map(|dt| dt.date_naive())
}
