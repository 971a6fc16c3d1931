//! # checkout-core: Pure Checkout Pricing
//!
//! This crate prices a cart: it validates the request payload, sums the
//! line items, applies a coupon discount and a flat tax, and returns an
//! order summary. Every function is pure; there is no I/O here.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 checkout-cli (apps/checkout-cli)                │   │
//! │  │     config ──► read JSON (file/stdin) ──► print JSON            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ checkout-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  coupon   │  │ validation│  │   │
//! │  │   │ LineItem  │  │   Money   │  │  Coupon   │  │  extract  │  │   │
//! │  │   │ Summary   │  │  TaxRate  │  │  table    │  │  validate │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                        checkout (pipeline)                      │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STATE • PURE FUNCTIONS                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, CheckoutRequest, OrderSummary, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`coupon`] - Coupon codes and their discount rules
//! - [`validation`] - Payload extraction and validation
//! - [`checkout`] - The pricing pipeline
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::compute;
//! use serde_json::json;
//!
//! let summary = compute(&json!({
//!     "user_id": 7,
//!     "items": [{ "price": 100, "qty": 2 }],
//!     "coupon": "SAVE10"
//! }))
//! .unwrap();
//!
//! assert_eq!(summary.subtotal.minor(), 200);
//! assert_eq!(summary.discount.minor(), 20);
//! assert_eq!(summary.tax.minor(), 37);
//! assert_eq!(summary.total.minor(), 217);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod coupon;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::{compute, CheckoutCalculator};
pub use coupon::Coupon;
pub use error::{CheckoutError, CheckoutResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency used when a request carries none.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Flat tax rate in basis points (21%).
pub const DEFAULT_TAX_RATE_BPS: u32 = 2100;

/// Fixed last segment of every order identifier.
pub const ORDER_ID_SUFFIX: &str = "X";
