//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats:                                                           │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    int(amount × 0.21) is only right while the product never lands a    │
//! │    hair below an integer                                                │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units + basis points                       │
//! │    300 × 2100 / 10000 = 63                                              │
//! │    Truncation is explicit and identical on every platform               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::money::Money;
//!
//! // Create from minor units (cents for USD)
//! let price = Money::from_minor(1099);
//!
//! // Line total and a 10% portion
//! let line = price.checked_mul_qty(2).unwrap();  // 2198
//! assert_eq!(line.portion_bps(1000).unwrap().minor(), 219); // truncated, not rounded
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::types::TaxRate;

/// Basis points in 100%.
pub const BPS_SCALE: i128 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: intermediate differences may go negative before the
///   discount clamp is applied
/// - **Single field tuple struct**: serializes as a bare integer
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  LineItem.price × qty ──► subtotal ──► − discount ──► after_discount    │
/// │                                                           │             │
/// │                                              calculate_tax (truncate)   │
/// │                                                           │             │
/// │                                       after_discount + tax = total      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let price = Money::from_minor(1099);
    /// assert_eq!(price.minor(), 1099);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor remainder (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Returns `bps / 10000` of this amount, truncated toward zero, or `None`
    /// when the result does not fit in `i64`.
    ///
    /// ## Truncation, Not Rounding
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  amount × bps / 10000, integer division                             │
    /// │                                                                     │
    /// │    180 × 2100 / 10000 = 378000 / 10000 = 37   (37.8 → 37)           │
    /// │    199 × 1000 / 10000 =  199000 / 10000 = 19  (19.9 → 19)           │
    /// │                                                                     │
    /// │  Discounts and tax both use this, so neither ever rounds up.        │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor(199).portion_bps(2000), Some(Money::from_minor(39)));
    /// assert_eq!(Money::from_minor(300).portion_bps(2100), Some(Money::from_minor(63)));
    /// assert_eq!(Money::from_minor(i64::MAX).portion_bps(20_000), None);
    /// ```
    pub fn portion_bps(&self, bps: u32) -> Option<Money> {
        // i128 keeps the product exact; only rates above 100% can push the
        // quotient past i64.
        let portion = self.0 as i128 * bps as i128 / BPS_SCALE;
        i64::try_from(portion).ok().map(Money)
    }

    /// Calculates tax at `rate`, truncated toward zero, `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    /// use checkout_core::types::TaxRate;
    ///
    /// let after_discount = Money::from_minor(180);
    /// let tax = after_discount.calculate_tax(TaxRate::from_bps(2100));
    /// assert_eq!(tax.unwrap().minor(), 37);
    /// ```
    #[inline]
    pub fn calculate_tax(&self, rate: TaxRate) -> Option<Money> {
        self.portion_bps(rate.bps())
    }

    /// Multiplies a unit price by a quantity, `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let unit_price = Money::from_minor(299);
    /// assert_eq!(unit_price.checked_mul_qty(3).unwrap().minor(), 897);
    /// assert!(Money::from_minor(i64::MAX).checked_mul_qty(2).is_none());
    /// ```
    #[inline]
    pub fn checked_mul_qty(&self, qty: i64) -> Option<Money> {
        self.0.checked_mul(qty).map(Money)
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Subtracts `other`, never going below zero.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let subtotal = Money::from_minor(40);
    /// assert_eq!(subtotal.clamped_sub(Money::from_minor(50)), Money::zero());
    /// assert_eq!(subtotal.clamped_sub(Money::from_minor(10)).minor(), 30);
    /// ```
    #[inline]
    pub fn clamped_sub(&self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0).max(0))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount as `major.minor` without a currency symbol, since the
/// currency travels separately on the summary.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
