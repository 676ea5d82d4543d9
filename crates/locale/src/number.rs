//! Plain numeric presets with fixed decimal places

use crate::{group_digits, split_decimal};

/// Fixed decimal-place number formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumberFormat {
    /// No decimal places
    Integer,
    /// Two decimal places
    #[default]
    TwoPlaces,
    /// Four decimal places
    FourPlaces,
}

impl NumberFormat {
    /// Look up a preset by its pattern string ("0", "2", or "4")
    pub fn from_pattern(pattern: &str) -> Option<Self> {
        match pattern {
            "0" => Some(Self::Integer),
            "2" => Some(Self::TwoPlaces),
            "4" => Some(Self::FourPlaces),
            _ => None,
        }
    }

    fn places(&self) -> usize {
        match self {
            Self::Integer => 0,
            Self::TwoPlaces => 2,
            Self::FourPlaces => 4,
        }
    }

    /// Format a number with comma grouping and this preset's precision
    pub fn format(&self, value: f64) -> String {
        if value.is_nan() {
            return String::new();
        }

        let places = self.places();
        let (int_digits, frac_digits) = split_decimal(value, places);
        let grouped = group_digits(&int_digits, ',');
        let sign = if value < 0.0 && (int_digits != "0" || frac_digits.contains(|c| c != '0')) {
            "-"
        } else {
            ""
        };

        if places > 0 {
            format!("{sign}{grouped}.{frac_digits}")
        } else {
            format!("{sign}{grouped}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_integer_preset() {
        assert_eq!(NumberFormat::Integer.format(1234.56), "1,235");
        assert_eq!(NumberFormat::Integer.format(3.0), "3");
    }

    #[test]
    fn test_two_places() {
        assert_eq!(NumberFormat::TwoPlaces.format(1234.5), "1,234.50");
        assert_eq!(NumberFormat::TwoPlaces.format(-100.5), "-100.50");
        assert_eq!(NumberFormat::TwoPlaces.format(0.0), "0.00");
    }

    #[test]
    fn test_four_places() {
        assert_eq!(NumberFormat::FourPlaces.format(0.12345), "0.1235");
        assert_eq!(NumberFormat::FourPlaces.format(1000000.0), "1,000,000.0000");
    }

    #[test]
    fn test_from_pattern() {
        assert_eq!(NumberFormat::from_pattern("0"), Some(NumberFormat::Integer));
        assert_eq!(NumberFormat::from_pattern("2"), Some(NumberFormat::TwoPlaces));
        assert_eq!(NumberFormat::from_pattern("4"), Some(NumberFormat::FourPlaces));
        assert_eq!(NumberFormat::from_pattern("3"), None);
    }

    #[test]
    fn test_negative_rounds_to_zero() {
        assert_eq!(NumberFormat::Integer.format(-0.2), "0");
    }
}
