//! # Coupon Module
//!
//! The closed set of coupon codes and the discount each one grants.
//!
//! ## Discount Table
//! ```text
//! ┌──────────┬──────────────────┬──────────────────────────────────────────┐
//! │ coupon   │ condition        │ discount                                 │
//! ├──────────┼──────────────────┼──────────────────────────────────────────┤
//! │ (none)   │ absent or ""     │ 0                                        │
//! │ SAVE10   │ always           │ 10% of subtotal, truncated               │
//! │ SAVE20   │ subtotal >= 200  │ 20% of subtotal, truncated               │
//! │ SAVE20   │ subtotal <  200  │  5% of subtotal, truncated               │
//! │ VIP      │ subtotal >= 100  │ 50 flat                                  │
//! │ VIP      │ subtotal <  100  │ 10 flat                                  │
//! │ other    │                  │ UnknownCoupon                            │
//! └──────────┴──────────────────┴──────────────────────────────────────────┘
//! ```
//!
//! Codes are case-sensitive: `"save10"` is an unknown coupon.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

/// SAVE10: percentage off any subtotal.
pub const SAVE10_BPS: u32 = 1000;

/// SAVE20: subtotal needed for the full 20%.
pub const SAVE20_THRESHOLD: Money = Money::from_minor(200);
pub const SAVE20_BPS: u32 = 2000;
pub const SAVE20_SMALL_BPS: u32 = 500;

/// VIP: subtotal needed for the large flat discount.
pub const VIP_MIN_SUBTOTAL: Money = Money::from_minor(100);
pub const VIP_DISCOUNT: Money = Money::from_minor(50);
pub const VIP_SMALL_DISCOUNT: Money = Money::from_minor(10);

// =============================================================================
// Coupon
// =============================================================================

/// A recognised coupon code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Coupon {
    #[serde(rename = "SAVE10")]
    Save10,
    #[serde(rename = "SAVE20")]
    Save20,
    #[serde(rename = "VIP")]
    Vip,
}

impl Coupon {
    /// Every known coupon, in table order.
    pub const ALL: [Coupon; 3] = [Coupon::Save10, Coupon::Save20, Coupon::Vip];

    /// The code a customer types in.
    pub const fn code(&self) -> &'static str {
        match self {
            Coupon::Save10 => "SAVE10",
            Coupon::Save20 => "SAVE20",
            Coupon::Vip => "VIP",
        }
    }

    /// Discount this coupon grants on `subtotal`, `None` if it cannot be
    /// represented.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::coupon::Coupon;
    /// use checkout_core::money::Money;
    ///
    /// assert_eq!(Coupon::Save20.discount_for(Money::from_minor(300)).unwrap().minor(), 60);
    /// assert_eq!(Coupon::Save20.discount_for(Money::from_minor(100)).unwrap().minor(), 5);
    /// assert_eq!(Coupon::Vip.discount_for(Money::from_minor(99)).unwrap().minor(), 10);
    /// ```
    pub fn discount_for(&self, subtotal: Money) -> Option<Money> {
        match self {
            Coupon::Save10 => subtotal.portion_bps(SAVE10_BPS),
            Coupon::Save20 if subtotal >= SAVE20_THRESHOLD => subtotal.portion_bps(SAVE20_BPS),
            Coupon::Save20 => subtotal.portion_bps(SAVE20_SMALL_BPS),
            Coupon::Vip if subtotal >= VIP_MIN_SUBTOTAL => Some(VIP_DISCOUNT),
            Coupon::Vip => Some(VIP_SMALL_DISCOUNT),
        }
    }

    /// Resolves an optional code: absent or empty means no coupon.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::coupon::Coupon;
    ///
    /// assert_eq!(Coupon::resolve(None).unwrap(), None);
    /// assert_eq!(Coupon::resolve(Some("")).unwrap(), None);
    /// assert_eq!(Coupon::resolve(Some("VIP")).unwrap(), Some(Coupon::Vip));
    /// assert!(Coupon::resolve(Some("FOO")).is_err());
    /// ```
    pub fn resolve(code: Option<&str>) -> Result<Option<Coupon>, ValidationError> {
        match code {
            None | Some("") => Ok(None),
            Some(code) => code.parse().map(Some),
        }
    }
}

impl FromStr for Coupon {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Coupon::ALL
            .into_iter()
            .find(|coupon| coupon.code() == s)
            .ok_or_else(|| ValidationError::UnknownCoupon {
                code: s.to_string(),
            })
    }
}

impl fmt::Display for Coupon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
