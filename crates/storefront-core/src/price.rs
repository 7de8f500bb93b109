//! Price type as delivered by the catalog.
//!
//! Catalog dumps carry a free-form currency code next to a decimal value.
//! Only display formatting and cart totals touch the value, so it stays a
//! float rather than being converted to minor units.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A product price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Price {
    /// ISO currency code (e.g., "USD").
    pub currency: String,
    /// Amount in major units.
    pub value: f64,
}

impl Price {
    /// Create a new price.
    pub fn new(currency: impl Into<String>, value: f64) -> Self {
        Self {
            currency: currency.into(),
            value,
        }
    }

    /// Format as a display string (e.g., "$49.99", "1200₽", "EUR 15").
    pub fn display(&self) -> String {
        let amount = format_amount(self.value);
        match self.currency.as_str() {
            "USD" => format!("${}", amount),
            "RUB" => format!("{}\u{20bd}", amount),
            code => format!("{} {}", code, amount),
        }
    }

    /// Price of `quantity` units.
    pub fn times(&self, quantity: u32) -> f64 {
        self.value * f64::from(quantity)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Integral amounts print without a fractional part.
fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usd_display() {
        assert_eq!(Price::new("USD", 49.99).display(), "$49.99");
        assert_eq!(Price::new("USD", 20.0).display(), "$20");
    }

    #[test]
    fn test_rub_display() {
        assert_eq!(Price::new("RUB", 1200.0).display(), "1200\u{20bd}");
    }

    #[test]
    fn test_other_currency_display() {
        assert_eq!(Price::new("EUR", 15.5).to_string(), "EUR 15.5");
    }

    #[test]
    fn test_times() {
        assert_eq!(Price::new("USD", 2.5).times(4), 10.0);
    }
}
