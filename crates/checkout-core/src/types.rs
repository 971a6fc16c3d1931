//! # Domain Types
//!
//! Core domain types used throughout the checkout calculator.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ CheckoutPayload │──►│ CheckoutRequest │──►│  OrderSummary   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  raw fields     │   │  user_id        │   │  order_id       │       │
//! │  │  (extract)      │   │  items          │   │  subtotal       │       │
//! │  │                 │   │  coupon         │   │  discount       │       │
//! │  │                 │   │  currency       │   │  tax / total    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    LineItem     │   │ CheckoutPolicy  │                             │
//! │  │  price (Money)  │   │ default_currency│                             │
//! │  │  qty            │   │ tax_rate (bps)  │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::money::Money;
use crate::{DEFAULT_CURRENCY, DEFAULT_TAX_RATE_BPS};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 2100 bps = 21%
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    ///
    /// Rates above 10000 are not rejected here; pricing reports
    /// `AmountOverflow` if the resulting tax does not fit.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate(DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One line of the cart: a unit price and a quantity.
///
/// Both values are strictly positive once the item has been through
/// validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Unit price in minor currency units.
    pub price: Money,

    /// Quantity ordered.
    pub qty: i64,
}

impl LineItem {
    /// Creates a line item from a price in minor units and a quantity.
    pub fn new(price: i64, qty: i64) -> Self {
        LineItem {
            price: Money::from_minor(price),
            qty,
        }
    }

    /// Line total (`price × qty`), `None` on overflow.
    #[inline]
    pub fn line_total(&self) -> Option<Money> {
        self.price.checked_mul_qty(self.qty)
    }
}

// =============================================================================
// Checkout Payload
// =============================================================================

/// The raw fields read out of a request payload.
///
/// Nothing is defaulted or checked here beyond the JSON type of the scalar
/// fields; `items` is kept as an untyped value so validation can tell a
/// missing list from a value that is not a list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutPayload {
    pub user_id: Option<i64>,
    pub items: Option<Value>,
    pub coupon: Option<String>,
    pub currency: Option<String>,
}

// =============================================================================
// Checkout Request
// =============================================================================

/// A validated checkout request.
///
/// ## Invariants
/// - `items` is non-empty
/// - every item has `price > 0` and `qty > 0`
/// - `currency` is never empty
///
/// The coupon is carried as the caller sent it; it is resolved (and may be
/// rejected) when the discount is calculated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutRequest {
    pub user_id: i64,
    pub items: Vec<LineItem>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub coupon: Option<String>,
    pub currency: String,
}

impl CheckoutRequest {
    /// Number of line items (not total quantity).
    #[inline]
    pub fn items_count(&self) -> usize {
        self.items.len()
    }
}

// =============================================================================
// Order Summary
// =============================================================================

/// The result of a checkout computation.
///
/// ## Serialization
/// ```json
/// {
///   "order_id": "7-1-X",
///   "user_id": 7,
///   "currency": "USD",
///   "subtotal": 200,
///   "discount": 20,
///   "tax": 37,
///   "total": 217,
///   "items_count": 1
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderSummary {
    pub order_id: String,
    pub user_id: i64,
    pub currency: String,
    pub subtotal: Money,
    pub discount: Money,
    pub tax: Money,
    pub total: Money,
    pub items_count: usize,
}

impl OrderSummary {
    /// Amount the tax was computed on (`subtotal − discount`, floored at 0).
    #[inline]
    pub fn total_after_discount(&self) -> Money {
        self.subtotal.clamped_sub(self.discount)
    }
}

// =============================================================================
// Checkout Policy
// =============================================================================

/// Store-wide settings the calculator needs.
///
/// `CheckoutPolicy::default()` is the fixed policy: `"USD"` and a 21% tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutPolicy {
    /// Currency used when the request carries none.
    pub default_currency: String,

    /// Flat tax rate applied after the discount.
    pub tax_rate: TaxRate,
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        CheckoutPolicy {
            default_currency: DEFAULT_CURRENCY.to_string(),
            tax_rate: TaxRate::default(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
