//! # Currency Formatting
//!
//! Converts a USD [`Money`] amount into the string a screen displays.
//!
//! ```text
//! Money(4500) ──► CurrencyFormatter { Usd }        ──► "$45.00"
//!             └─► CurrencyFormatter { Inr, 83.12 } ──► "₹3,740"
//! ```
//!
//! Listing prices and price-bucket filters always stay in USD; conversion
//! happens only here, at display time. The conversion rate is configuration,
//! not a constant baked into the formatter.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Currency
// =============================================================================

/// Display currency selected by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum Currency {
    #[default]
    Usd,
    Inr,
}

impl Currency {
    /// ISO 4217 code.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Inr => "INR",
        }
    }

    pub const fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Inr => "₹",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "INR" => Ok(Currency::Inr),
            _ => Err(ValidationError::NotAllowed {
                field: "currency".to_string(),
                allowed: vec!["USD".to_string(), "INR".to_string()],
            }),
        }
    }
}

// =============================================================================
// Conversion Rate
// =============================================================================

/// Rupees per US dollar, in hundredths (8312 = 83.12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UsdToInrRate(u32);

impl UsdToInrRate {
    /// Rate used when nothing is configured.
    pub const DEFAULT: UsdToInrRate = UsdToInrRate(8312);

    /// Highest accepted configured rate (10,000 rupees per dollar).
    pub const MAX: UsdToInrRate = UsdToInrRate(1_000_000);

    #[inline]
    pub const fn from_hundredths(hundredths: u32) -> Self {
        UsdToInrRate(hundredths)
    }

    #[inline]
    pub const fn hundredths(&self) -> u32 {
        self.0
    }

    /// Converts USD cents to whole rupees, rounding half up.
    ///
    /// `cents × rate / 10000`, since both sides carry two implied decimals.
    /// Results past `i64` saturate.
    pub fn convert_to_rupees(&self, amount: Money) -> i64 {
        let scaled = amount.cents().unsigned_abs() as u128 * self.0 as u128;
        let rupees = i64::try_from((scaled + 5000) / 10000).unwrap_or(i64::MAX);
        if amount.cents() < 0 {
            -rupees
        } else {
            rupees
        }
    }
}

impl Default for UsdToInrRate {
    fn default() -> Self {
        UsdToInrRate::DEFAULT
    }
}

// =============================================================================
// Formatter
// =============================================================================

/// Stateless price formatter for the currently selected currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormatter {
    pub currency: Currency,
    pub rate: UsdToInrRate,
}

impl CurrencyFormatter {
    pub const fn new(currency: Currency, rate: UsdToInrRate) -> Self {
        CurrencyFormatter { currency, rate }
    }

    /// Returns a formatter for another currency with the same rate.
    pub const fn with_currency(self, currency: Currency) -> Self {
        CurrencyFormatter { currency, ..self }
    }

    /// Formats a USD amount for display.
    ///
    /// ## Example
    /// ```rust
    /// use ecofinds_core::currency::{Currency, CurrencyFormatter, UsdToInrRate};
    /// use ecofinds_core::money::Money;
    ///
    /// let usd = CurrencyFormatter::new(Currency::Usd, UsdToInrRate::DEFAULT);
    /// assert_eq!(usd.format(Money::from_cents(123_456)), "$1,234.56");
    ///
    /// let inr = usd.with_currency(Currency::Inr);
    /// assert_eq!(inr.format(Money::from_cents(4500)), "₹3,740");
    /// ```
    pub fn format(&self, amount: Money) -> String {
        match self.currency {
            Currency::Usd => {
                let sign = if amount.cents() < 0 { "-" } else { "" };
                format!(
                    "{}${}.{:02}",
                    sign,
                    group_western(amount.dollars().unsigned_abs()),
                    amount.cents_part()
                )
            }
            Currency::Inr => {
                let rupees = self.rate.convert_to_rupees(amount);
                let sign = if rupees < 0 { "-" } else { "" };
                format!("{}₹{}", sign, group_indian(rupees.unsigned_abs()))
            }
        }
    }
}

/// `1234567` → `"1,234,567"`
fn group_western(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `1234567` → `"12,34,567"` (last three digits, then pairs)
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);
    for (i, ch) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push(',');
    out.push_str(tail);
    out
}

// =============================================================================
// Unit Tests
// =============================================================================
