//! Locale - locale-aware value formatting
//!
//! This crate provides:
//! - Closed-vocabulary date formats (ISO, day-first, month-first, long form)
//! - Currency presets (`<code>:<locale>` pairs with locale separators)
//! - Fixed decimal-place number presets (0, 2, 4 places)
//! - Tolerant timestamp parsing (RFC 3339, ISO date, epoch seconds/millis)
//!
//! # Example
//!
//! ```
//! use locale::{CurrencyPreset, DateFormat, parse_date};
//!
//! let date = parse_date("2025-01-22T09:30:00Z").unwrap();
//! assert_eq!(DateFormat::DayMonthYear.format(date), "22/01/2025");
//!
//! let preset = CurrencyPreset::from_code("TRY:tr-TR").unwrap();
//! assert_eq!(preset.format(1500.0), "₺1.500,00");
//! ```

mod currency;
mod date;
mod number;

pub use currency::CurrencyPreset;
pub use date::{parse_date, parse_epoch, DateFormat};
pub use number::NumberFormat;

pub(crate) fn group_digits(digits: &str, sep: char) -> String {
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, sep);
        }
        result.insert(0, c);
    }
    result
}

/// Split a non-negative amount into integer digits and a zero-padded
/// fractional part with the requested precision.
pub(crate) fn split_decimal(value: f64, places: usize) -> (String, String) {
    let multiplier = 10_f64.powi(places as i32);
    let rounded = (value.abs() * multiplier).round() / multiplier;

    let int_part = rounded.trunc() as i64;
    let frac_part = ((rounded - rounded.trunc()) * multiplier).round() as i64;

    let frac_str = if places > 0 {
        format!("{frac_part:0>places$}")
    } else {
        String::new()
    };

    (int_part.to_string(), frac_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("1000", ','), "1,000");
        assert_eq!(group_digits("1000000", '.'), "1.000.000");
        assert_eq!(group_digits("100", ','), "100");
        assert_eq!(group_digits("", ','), "");
    }

    #[test]
    fn test_split_decimal() {
        assert_eq!(split_decimal(1234.56, 2), ("1234".to_string(), "56".to_string()));
        assert_eq!(split_decimal(1234.5, 2), ("1234".to_string(), "50".to_string()));
        assert_eq!(split_decimal(1.999, 2), ("2".to_string(), "00".to_string()));
        assert_eq!(split_decimal(7.0, 0), ("7".to_string(), String::new()));
    }
}
