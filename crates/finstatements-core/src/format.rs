//! Cell formatting for rendered statements

use finstatements_config::CurrencyConfig;
use finstatements_utils::group_thousands;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Result of formatting one amount
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formatted {
    Text(String),
    /// The input had no numeric value; carries the input for diagnostics
    Unformattable { input: String },
}

impl Formatted {
    pub fn is_unformattable(&self) -> bool {
        matches!(self, Formatted::Unformattable { .. })
    }

    /// Table cell text. Unformattable values become an empty cell and are
    /// logged, never raised.
    pub fn into_cell(self) -> String {
        match self {
            Formatted::Text(text) => text,
            Formatted::Unformattable { input } => {
                log::warn!("Could not format '{}' as an amount; rendering an empty cell", input);
                String::new()
            }
        }
    }
}

/// Values the currency formatter accepts
pub trait ToAmount {
    /// Numeric value, or `None` when there is none
    fn to_amount(&self) -> Option<Decimal>;

    /// Text shown in diagnostics when conversion fails
    fn describe(&self) -> String;
}

impl ToAmount for Decimal {
    fn to_amount(&self) -> Option<Decimal> {
        Some(*self)
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl ToAmount for f64 {
    fn to_amount(&self) -> Option<Decimal> {
        Decimal::from_f64_retain(*self)
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl ToAmount for str {
    fn to_amount(&self) -> Option<Decimal> {
        let trimmed = self.trim();
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .ok()
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl<T: ToAmount + ?Sized> ToAmount for &T {
    fn to_amount(&self) -> Option<Decimal> {
        (**self).to_amount()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Currency cell format: symbol, then sign, then grouped integer part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    symbol: String,
    thousands_separator: String,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::from_config(&CurrencyConfig::default())
    }
}

impl CurrencyFormat {
    pub fn new(symbol: impl Into<String>, thousands_separator: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            thousands_separator: thousands_separator.into(),
        }
    }

    pub fn from_config(config: &CurrencyConfig) -> Self {
        Self::new(config.symbol.clone(), config.thousands_separator.clone())
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Integer part only, truncated toward zero: `-1500.99` becomes `₹-1,500`
    pub fn format<T: ToAmount + ?Sized>(&self, value: &T) -> Formatted {
        let whole = value.to_amount().and_then(|amount| amount.trunc().to_i128());
        match whole {
            Some(whole) => Formatted::Text(format!(
                "{}{}",
                self.symbol,
                group_thousands(whole, &self.thousands_separator)
            )),
            None => Formatted::Unformattable {
                input: value.describe(),
            },
        }
    }

    /// Cell for an optional amount; `None` is an empty cell
    pub fn cell(&self, value: Option<Decimal>) -> String {
        value
            .map(|amount| self.format(&amount).into_cell())
            .unwrap_or_default()
    }
}

/// One decimal place, half-to-even, trailing `%`
pub fn format_percent(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointNearestEven);
    let rounded = if rounded.is_zero() { Decimal::ZERO } else { rounded };
    format!("{:.1}%", rounded)
}

/// Percent cell; `None` is an empty cell
pub fn percent_cell(value: Option<Decimal>) -> String {
    value.map(format_percent).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_truncates_and_groups() {
        let fmt = CurrencyFormat::default();
        assert_eq!(fmt.format(&dec!(100000)), Formatted::Text("₹100,000".to_string()));
        assert_eq!(fmt.format(&dec!(1234567.99)), Formatted::Text("₹1,234,567".to_string()));
        assert_eq!(fmt.format(&dec!(-1500.99)), Formatted::Text("₹-1,500".to_string()));
        assert_eq!(fmt.format(&dec!(-0.5)), Formatted::Text("₹0".to_string()));
        assert_eq!(fmt.format(&dec!(999)), Formatted::Text("₹999".to_string()));
    }

    #[test]
    fn test_currency_from_other_inputs() {
        let fmt = CurrencyFormat::new("$", ",");
        assert_eq!(fmt.format(&2500.75_f64), Formatted::Text("$2,500".to_string()));
        assert_eq!(fmt.format(" 42000 "), Formatted::Text("$42,000".to_string()));
        assert_eq!(fmt.format("1e3"), Formatted::Text("$1,000".to_string()));
    }

    #[test]
    fn test_unformattable_is_explicit() {
        let fmt = CurrencyFormat::default();
        let result = fmt.format("n/a");
        assert!(result.is_unformattable());
        assert_eq!(result.into_cell(), "");

        assert!(fmt.format(&f64::NAN).is_unformattable());
        assert!(fmt.format(&f64::INFINITY).is_unformattable());
    }

    #[test]
    fn test_custom_separator() {
        let fmt = CurrencyFormat::new("€", ".");
        assert_eq!(fmt.format(&dec!(1234567)).into_cell(), "€1.234.567");
    }

    #[test]
    fn test_cell_blank_for_none() {
        let fmt = CurrencyFormat::default();
        assert_eq!(fmt.cell(None), "");
        assert_eq!(fmt.cell(Some(dec!(20000))), "₹20,000");
    }

    #[test]
    fn test_percent() {
        assert_eq!(format_percent(dec!(25)), "25.0%");
        assert_eq!(format_percent(dec!(0)), "0.0%");
        assert_eq!(format_percent(dec!(11.1111)), "11.1%");
        assert_eq!(format_percent(dec!(0.25)), "0.2%");
        assert_eq!(format_percent(dec!(0.35)), "0.4%");
        assert_eq!(format_percent(dec!(-100)), "-100.0%");
        assert_eq!(format_percent(dec!(-0.04)), "0.0%");
    }

    #[test]
    fn test_percent_cell() {
        assert_eq!(percent_cell(None), "");
        assert_eq!(percent_cell(Some(dec!(12.5))), "12.5%");
    }
}
