//! Currency presets keyed by `<code>:<locale>` pairs

use crate::{group_digits, split_decimal};

/// Closed set of currency formats
///
/// Each preset fixes the symbol, its placement, and the locale's grouping
/// and decimal separators. Precision is two decimal places throughout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyPreset {
    /// `TRY:tr-TR` — `₺1.500,00`
    TryTr,
    /// `USD:en-US` — `$1,500.00`
    UsdUs,
    /// `EUR:de-DE` — `1.500,00 €`
    EurDe,
    /// `GBP:en-GB` — `£1,500.00`
    GbpGb,
}

/// Where the currency symbol sits relative to the amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SymbolPosition {
    Prefix,
    SuffixSpaced,
}

impl CurrencyPreset {
    /// Look up a preset by its `<code>:<locale>` key
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "TRY:tr-TR" => Some(Self::TryTr),
            "USD:en-US" => Some(Self::UsdUs),
            "EUR:de-DE" => Some(Self::EurDe),
            "GBP:en-GB" => Some(Self::GbpGb),
            _ => None,
        }
    }

    /// The `<code>:<locale>` key this preset answers to
    pub fn code(&self) -> &'static str {
        match self {
            Self::TryTr => "TRY:tr-TR",
            Self::UsdUs => "USD:en-US",
            Self::EurDe => "EUR:de-DE",
            Self::GbpGb => "GBP:en-GB",
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Self::TryTr => "\u{20ba}",
            Self::UsdUs => "$",
            Self::EurDe => "\u{20ac}",
            Self::GbpGb => "\u{a3}",
        }
    }

    fn separators(&self) -> (char, char) {
        match self {
            Self::TryTr | Self::EurDe => ('.', ','),
            Self::UsdUs | Self::GbpGb => (',', '.'),
        }
    }

    fn symbol_position(&self) -> SymbolPosition {
        match self {
            Self::EurDe => SymbolPosition::SuffixSpaced,
            _ => SymbolPosition::Prefix,
        }
    }

    /// Format an amount with this preset's locale conventions
    pub fn format(&self, amount: f64) -> String {
        if amount.is_nan() {
            return String::new();
        }

        let (group_sep, decimal_sep) = self.separators();
        let (int_digits, frac_digits) = split_decimal(amount, 2);
        let grouped = group_digits(&int_digits, group_sep);

        let sign = if amount < -0.005 { "-" } else { "" };
        let number = format!("{grouped}{decimal_sep}{frac_digits}");

        match self.symbol_position() {
            SymbolPosition::Prefix => format!("{sign}{}{number}", self.symbol()),
            SymbolPosition::SuffixSpaced => format!("{sign}{number} {}", self.symbol()),
        }
    }
}
