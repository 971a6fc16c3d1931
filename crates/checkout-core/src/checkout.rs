//! # Checkout Calculator
//!
//! The pricing pipeline: payload in, [`OrderSummary`] out.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      compute(payload)                                   │
//! │                                                                         │
//! │  (a) extract ──► (b) validate ──► (c) subtotal ──► (d) discount         │
//! │                                                         │               │
//! │                                                         ▼               │
//! │  (g) summary ◄── (f) order id ◄── (e) tax ◄── apply_discount (>= 0)    │
//! │                                                                         │
//! │  Any stage may fail; the first error is returned and nothing after it   │
//! │  runs. There is no state between calls.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use checkout_core::checkout::compute;
//! use serde_json::json;
//!
//! let summary = compute(&json!({
//!     "user_id": 7,
//!     "items": [{ "price": 100, "qty": 2 }],
//!     "coupon": "SAVE10"
//! }))
//! .unwrap();
//!
//! assert_eq!(summary.order_id, "7-1-X");
//! assert_eq!(summary.total.minor(), 217);
//! ```

use serde_json::Value;
use tracing::debug;

use crate::coupon::Coupon;
use crate::error::{CheckoutError, CheckoutResult};
use crate::money::Money;
use crate::types::{CheckoutPolicy, CheckoutRequest, LineItem, OrderSummary, TaxRate};
use crate::validation::{extract, validate};
use crate::ORDER_ID_SUFFIX;

// =============================================================================
// Calculator
// =============================================================================

/// Runs the checkout pipeline under a [`CheckoutPolicy`].
///
/// The calculator holds no mutable state, so one instance can serve any
/// number of threads.
#[derive(Debug, Clone, Default)]
pub struct CheckoutCalculator {
    policy: CheckoutPolicy,
}

impl CheckoutCalculator {
    pub fn new(policy: CheckoutPolicy) -> Self {
        CheckoutCalculator { policy }
    }

    pub fn policy(&self) -> &CheckoutPolicy {
        &self.policy
    }

    /// Validates `payload` and prices it.
    pub fn compute(&self, payload: &Value) -> CheckoutResult<OrderSummary> {
        let request = extract(payload)
            .and_then(|fields| validate(fields, &self.policy.default_currency))
            .inspect_err(|err| debug!(code = err.code(), %err, "Checkout payload rejected"))?;

        self.compute_request(&request)
    }

    /// Prices an already validated request (stages c to g).
    pub fn compute_request(&self, request: &CheckoutRequest) -> CheckoutResult<OrderSummary> {
        let subtotal = calculate_subtotal(&request.items)?;
        let discount = calculate_discount(subtotal, request.coupon.as_deref())?;
        let total_after_discount = apply_discount(subtotal, discount);
        let tax = calculate_tax(total_after_discount, self.policy.tax_rate)?;
        let total = total_after_discount
            .checked_add(tax)
            .ok_or(CheckoutError::AmountOverflow { stage: "total" })?;

        let items_count = request.items_count();
        let order_id = generate_order_id(request.user_id, items_count);

        debug!(
            %order_id,
            %subtotal,
            %discount,
            %tax,
            %total,
            currency = %request.currency,
            "Checkout computed"
        );

        Ok(OrderSummary {
            order_id,
            user_id: request.user_id,
            currency: request.currency.clone(),
            subtotal,
            discount,
            tax,
            total,
            items_count,
        })
    }
}

/// Computes a summary under the default policy (`"USD"`, 21% tax).
pub fn compute(payload: &Value) -> CheckoutResult<OrderSummary> {
    CheckoutCalculator::default().compute(payload)
}

// =============================================================================
// Pipeline Stages
// =============================================================================

/// Sum of `price × qty` over all items.
///
/// ## Example
/// ```rust
/// use checkout_core::checkout::calculate_subtotal;
/// use checkout_core::types::LineItem;
///
/// let items = [LineItem::new(100, 2), LineItem::new(5, 3)];
/// assert_eq!(calculate_subtotal(&items).unwrap().minor(), 215);
/// ```
pub fn calculate_subtotal(items: &[LineItem]) -> CheckoutResult<Money> {
    items.iter().try_fold(Money::zero(), |subtotal, item| {
        item.line_total()
            .and_then(|line| subtotal.checked_add(line))
            .ok_or(CheckoutError::AmountOverflow { stage: "subtotal" })
    })
}

/// Discount granted by `coupon` on `subtotal`.
///
/// Absent or empty coupons give zero; unknown codes fail with
/// [`ValidationError::UnknownCoupon`](crate::error::ValidationError::UnknownCoupon).
pub fn calculate_discount(subtotal: Money, coupon: Option<&str>) -> CheckoutResult<Money> {
    match Coupon::resolve(coupon)? {
        Some(coupon) => coupon
            .discount_for(subtotal)
            .ok_or(CheckoutError::AmountOverflow { stage: "discount" }),
        None => Ok(Money::zero()),
    }
}

/// `subtotal − discount`, never below zero.
#[inline]
pub fn apply_discount(subtotal: Money, discount: Money) -> Money {
    subtotal.clamped_sub(discount)
}

/// Tax on the discounted amount, truncated toward zero.
///
/// Only a rate above 100% can overflow; that is reported rather than wrapped.
#[inline]
pub fn calculate_tax(total_after_discount: Money, rate: TaxRate) -> CheckoutResult<Money> {
    total_after_discount
        .calculate_tax(rate)
        .ok_or(CheckoutError::AmountOverflow { stage: "tax" })
}

/// Builds the order identifier `"{user_id}-{items_count}-X"`.
///
/// Two orders from the same user with the same number of lines get the same
/// identifier; callers that persist orders need their own unique key.
pub fn generate_order_id(user_id: i64, items_count: usize) -> String {
    format!("{user_id}-{items_count}-{ORDER_ID_SUFFIX}")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn error_code(payload: Value) -> &'static str {
        compute(&payload).unwrap_err().code()
    }

    #[test]
    fn test_end_to_end_save10() {
        let summary = compute(&json!({
            "user_id": 7,
            "items": [{ "price": 100, "qty": 2 }],
            "coupon": "SAVE10"
        }))
        .unwrap();

        assert_eq!(
            summary,
            OrderSummary {
                order_id: "7-1-X".to_string(),
                user_id: 7,
                currency: "USD".to_string(),
                subtotal: Money::from_minor(200),
                discount: Money::from_minor(20),
                tax: Money::from_minor(37),
                total: Money::from_minor(217),
                items_count: 1,
            }
        );
        assert_eq!(summary.total_after_discount().minor(), 180);
    }

    #[test]
    fn test_save20_below_and_above_threshold() {
        let small = compute(&json!({
            "user_id": 1,
            "items": [{ "price": 100, "qty": 1 }],
            "coupon": "SAVE20"
        }))
        .unwrap();
        assert_eq!(small.subtotal.minor(), 100);
        assert_eq!(small.discount.minor(), 5);

        let large = compute(&json!({
            "user_id": 1,
            "items": [{ "price": 150, "qty": 2 }],
            "coupon": "SAVE20"
        }))
        .unwrap();
        assert_eq!(large.subtotal.minor(), 300);
        assert_eq!(large.discount.minor(), 60);
        // 240 × 0.21 = 50.4
        assert_eq!(large.tax.minor(), 50);
        assert_eq!(large.total.minor(), 290);
    }

    #[test]
    fn test_vip_boundary() {
        let at = compute(&json!({
            "user_id": 3,
            "items": [{ "price": 50, "qty": 2 }],
            "coupon": "VIP"
        }))
        .unwrap();
        assert_eq!(at.discount.minor(), 50);

        let below = compute(&json!({
            "user_id": 3,
            "items": [{ "price": 33, "qty": 3 }],
            "coupon": "VIP"
        }))
        .unwrap();
        assert_eq!(below.subtotal.minor(), 99);
        assert_eq!(below.discount.minor(), 10);
    }

    #[test]
    fn test_discount_never_drives_total_negative() {
        let summary = compute(&json!({
            "user_id": 3,
            "items": [{ "price": 4, "qty": 1 }],
            "coupon": "VIP"
        }))
        .unwrap();

        assert_eq!(summary.discount.minor(), 10);
        assert_eq!(summary.total_after_discount(), Money::zero());
        assert_eq!(summary.tax, Money::zero());
        assert_eq!(summary.total, Money::zero());
    }

    #[test]
    fn test_no_coupon_or_empty_coupon() {
        for coupon in [json!(null), json!("")] {
            let summary = compute(&json!({
                "user_id": 9,
                "items": [{ "price": 10, "qty": 1 }, { "price": 20, "qty": 2 }],
                "coupon": coupon
            }))
            .unwrap();

            assert_eq!(summary.subtotal.minor(), 50);
            assert_eq!(summary.discount, Money::zero());
            assert_eq!(summary.tax.minor(), 10);
            assert_eq!(summary.total.minor(), 60);
            assert_eq!(summary.order_id, "9-2-X");
            assert_eq!(summary.items_count, 2);
        }
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            error_code(json!({ "user_id": 1, "items": [{ "price": 1, "qty": 1 }], "coupon": "FOO" })),
            "UNKNOWN_COUPON"
        );
        assert_eq!(error_code(json!({ "user_id": 1, "items": [] })), "EMPTY_ITEMS");
        assert_eq!(
            error_code(json!({ "user_id": 1, "items": [{ "price": 0, "qty": 1 }] })),
            "NON_POSITIVE_VALUE"
        );
        assert_eq!(
            error_code(json!({ "user_id": 1, "items": [{ "price": 1 }] })),
            "MISSING_ITEM_FIELD"
        );
        assert_eq!(error_code(json!({ "items": [] })), "MISSING_FIELD");
        assert_eq!(error_code(json!({ "user_id": 1, "items": {} })), "INVALID_TYPE");
    }

    #[test]
    fn test_validation_errors_take_precedence_over_coupon() {
        assert_eq!(
            error_code(json!({ "user_id": 1, "items": [], "coupon": "FOO" })),
            "EMPTY_ITEMS"
        );
    }

    #[test]
    fn test_overflow_is_reported() {
        let err = compute(&json!({
            "user_id": 1,
            "items": [{ "price": i64::MAX, "qty": 2 }]
        }))
        .unwrap_err();
        assert!(matches!(err, CheckoutError::AmountOverflow { stage: "subtotal" }));

        let err = compute(&json!({
            "user_id": 1,
            "items": [{ "price": i64::MAX, "qty": 1 }]
        }))
        .unwrap_err();
        assert!(matches!(err, CheckoutError::AmountOverflow { stage: "total" }));
    }

    #[test]
    fn test_oversized_tax_rate_reports_overflow() {
        let calculator = CheckoutCalculator::new(CheckoutPolicy {
            default_currency: "USD".to_string(),
            tax_rate: TaxRate::from_bps(u32::MAX),
        });
        let request = CheckoutRequest {
            user_id: 1,
            items: vec![LineItem::new(i64::MAX / 2, 1)],
            coupon: None,
            currency: "USD".to_string(),
        };

        let err = calculator.compute_request(&request).unwrap_err();
        assert!(matches!(err, CheckoutError::AmountOverflow { stage: "tax" }));
        assert_eq!(err.code(), "AMOUNT_OVERFLOW");

        let err = calculate_tax(Money::from_minor(i64::MAX), TaxRate::from_bps(20_000)).unwrap_err();
        assert!(matches!(err, CheckoutError::AmountOverflow { stage: "tax" }));
    }

    #[test]
    fn test_custom_policy() {
        let calculator = CheckoutCalculator::new(CheckoutPolicy {
            default_currency: "EUR".to_string(),
            tax_rate: TaxRate::from_bps(1000),
        });

        let summary = calculator
            .compute(&json!({ "user_id": 2, "items": [{ "price": 99, "qty": 1 }] }))
            .unwrap();

        assert_eq!(summary.currency, "EUR");
        assert_eq!(summary.tax.minor(), 9);
        assert_eq!(summary.total.minor(), 108);
        assert_eq!(calculator.policy().tax_rate.bps(), 1000);
    }

    #[test]
    fn test_compute_request_on_typed_input() {
        let request = CheckoutRequest {
            user_id: 5,
            items: vec![LineItem::new(25, 4), LineItem::new(1, 1)],
            coupon: Some("SAVE10".to_string()),
            currency: "USD".to_string(),
        };

        let summary = CheckoutCalculator::default().compute_request(&request).unwrap();
        assert_eq!(summary.subtotal.minor(), 101);
        assert_eq!(summary.discount.minor(), 10);
        // 91 × 0.21 = 19.11
        assert_eq!(summary.tax.minor(), 19);
        assert_eq!(summary.total.minor(), 110);
        assert_eq!(summary.order_id, "5-2-X");
    }

    #[test]
    fn test_totals_hold_across_a_range_of_subtotals() {
        for price in 1..=400 {
            for coupon in [None, Some("SAVE10"), Some("SAVE20"), Some("VIP")] {
                let request = CheckoutRequest {
                    user_id: 1,
                    items: vec![LineItem::new(price, 1)],
                    coupon: coupon.map(str::to_string),
                    currency: "USD".to_string(),
                };
                let summary = CheckoutCalculator::default().compute_request(&request).unwrap();

                let after = summary.total_after_discount();
                assert!(after.minor() >= 0);
                assert_eq!(summary.tax.minor(), after.minor() * 21 / 100);
                assert_eq!(Some(summary.total), after.checked_add(summary.tax));
            }
        }
    }

    #[test]
    fn test_generate_order_id_collides_by_construction() {
        assert_eq!(generate_order_id(7, 1), "7-1-X");
        assert_eq!(generate_order_id(7, 1), generate_order_id(7, 1));
        assert_eq!(generate_order_id(-3, 12), "-3-12-X");
    }

    #[test]
    fn test_calculate_discount_directly() {
        let subtotal = Money::from_minor(250);
        assert_eq!(calculate_discount(subtotal, None).unwrap(), Money::zero());
        assert_eq!(calculate_discount(subtotal, Some("SAVE20")).unwrap().minor(), 50);
        assert!(calculate_discount(subtotal, Some("BOGUS")).is_err());
    }
}
