//! # Money Module
//!
//! Provides the `Money` type for handling listing prices and cart totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floating point prices:                                            │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    165 × 0.08 = 13.200000000000001  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    16500 cents × 800 bps / 10000 = 1320 cents = $13.20                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ecofinds_core::money::Money;
//!
//! let price = Money::from_cents(4500); // $45.00
//! let total = price + Money::from_cents(12000);
//! assert_eq!(total.cents(), 16500);
//!
//! let parsed = Money::parse_decimal("12.5").unwrap();
//! assert_eq!(parsed.cents(), 1250);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents of USD).
///
/// Listing prices are always stored in USD; other currencies exist only
/// at display time (see [`crate::currency`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use ecofinds_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole dollars.
    #[inline]
    pub const fn from_dollars(dollars: i64) -> Self {
        Money(dollars * 100)
    }

    /// Parses a decimal amount typed into a form ("45", "12.5", "0.01").
    ///
    /// ## Rules
    /// - Surrounding whitespace is ignored
    /// - At most two decimal places
    /// - Digits only (no sign, no exponent, no thousands separators)
    ///
    /// ## Example
    /// ```rust
    /// use ecofinds_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("199.99").unwrap().cents(), 19999);
    /// assert!(Money::parse_decimal("-5").is_err());
    /// assert!(Money::parse_decimal("1.999").is_err());
    /// ```
    pub fn parse_decimal(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        if input.is_empty() {
            return Err(ValidationError::required("price"));
        }

        let (whole, frac) = match input.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (input, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid("must be a number"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid("must be a non-negative number"));
        }
        if frac.len() > 2 {
            return Err(invalid("at most two decimal places"));
        }

        let whole_cents = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<i64>()
                .ok()
                .and_then(|w| w.checked_mul(100))
                .ok_or_else(|| invalid("amount is too large"))?
        };

        // "5" → 50 cents, "05" → 5 cents
        let frac_cents = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid("must be a number"))? * 10,
            _ => frac.parse::<i64>().map_err(|_| invalid("must be a number"))?,
        };

        whole_cents
            .checked_add(frac_cents)
            .map(Money)
            .ok_or_else(|| invalid("amount is too large"))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Calculates tax, rounding half a cent up.
    ///
    /// ## Implementation
    /// Integer math: `(amount * rate + 5000) / 10000`
    ///
    /// ## Example
    /// ```rust
    /// use ecofinds_core::money::Money;
    /// use ecofinds_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(16500); // $165.00
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(800));
    /// assert_eq!(tax.cents(), 1320); // $13.20
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Cart subtotal: $165.00
    ///      │
    ///      ▼
    /// calculate_tax(8%) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Tax: $13.20 ──► Total: $178.20
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 keeps large carts from overflowing
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(i64::try_from(tax_cents).unwrap_or(i64::MAX))
    }

    /// Multiplies money by a quantity, saturating at the i64 bounds.
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain `$12.34` rendering for logs and debugging.
///
/// Screens go through [`crate::currency::CurrencyFormatter`] instead.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Saturating: summaries over many listings never wrap.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

/// Multiplication by a cart quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
