//! # Validation Module
//!
//! Turns an untyped request payload into a [`CheckoutRequest`].
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: extract(payload)                                             │
//! │  ├── Payload must be a JSON object                                     │
//! │  └── Scalar fields must have the right JSON type (null = absent)       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: validate(payload)                                            │
//! │  ├── user_id and items are required                                    │
//! │  ├── currency falls back to the policy default                         │
//! │  ├── items must be a non-empty list                                    │
//! │  └── every item needs price > 0 and qty > 0                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: discount resolution (checkout.rs)                            │
//! │  └── coupon code must be known                                         │
//! │                                                                         │
//! │  First failure wins; nothing after it runs.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::validation::{extract, validate};
//! use serde_json::json;
//!
//! let payload = extract(&json!({ "user_id": 7, "items": [{ "price": 100, "qty": 2 }] })).unwrap();
//! let request = validate(payload, "USD").unwrap();
//! assert_eq!(request.currency, "USD");
//! ```

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::types::{CheckoutPayload, CheckoutRequest, LineItem};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Extraction
// =============================================================================

/// Reads `user_id`, `items`, `coupon` and `currency` out of `payload`.
///
/// Missing keys and JSON `null` both become `None`. Nothing is defaulted.
pub fn extract(payload: &Value) -> ValidationResult<CheckoutPayload> {
    let object = payload.as_object().ok_or_else(|| invalid_type("request", "an object"))?;

    Ok(CheckoutPayload {
        user_id: optional_field(object, "user_id")
            .map(|v| v.as_i64().ok_or_else(|| invalid_type("user_id", "an integer")))
            .transpose()?,
        items: optional_field(object, "items").cloned(),
        coupon: optional_string(object, "coupon")?,
        currency: optional_string(object, "currency")?,
    })
}

fn optional_field<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|v| !v.is_null())
}

fn optional_string(object: &Map<String, Value>, key: &str) -> ValidationResult<Option<String>> {
    optional_field(object, key)
        .map(|v| {
            v.as_str()
                .map(str::to_string)
                .ok_or_else(|| invalid_type(key, "a string"))
        })
        .transpose()
}

fn invalid_type(field: &str, expected: &'static str) -> ValidationError {
    ValidationError::InvalidType {
        field: field.to_string(),
        expected,
    }
}

// =============================================================================
// Request Validation
// =============================================================================

/// Validates an extracted payload and normalizes it into a typed request.
///
/// ## Check Order
/// ```text
/// user_id absent?        → MissingField("user_id")
/// items absent?          → MissingField("items")
/// currency absent/""?    → default_currency
/// items not a list?      → InvalidType("items")
/// items empty?           → EmptyItems
/// for each item, in order:
///   price or qty absent? → MissingItemField
///   price <= 0?          → NonPositiveValue("price")
///   qty <= 0?            → NonPositiveValue("qty")
/// ```
///
/// ## Example
/// ```rust
/// use checkout_core::error::ValidationError;
/// use checkout_core::validation::{extract, validate};
/// use serde_json::json;
///
/// let payload = extract(&json!({ "user_id": 1, "items": [] })).unwrap();
/// assert_eq!(validate(payload, "USD").unwrap_err(), ValidationError::EmptyItems);
/// ```
pub fn validate(payload: CheckoutPayload, default_currency: &str) -> ValidationResult<CheckoutRequest> {
    let user_id = payload.user_id.ok_or_else(|| missing("user_id"))?;
    let items = payload.items.ok_or_else(|| missing("items"))?;

    let currency = match payload.currency {
        Some(currency) if !currency.is_empty() => currency,
        _ => default_currency.to_string(),
    };

    let items = items.as_array().ok_or_else(|| invalid_type("items", "a list"))?;
    if items.is_empty() {
        return Err(ValidationError::EmptyItems);
    }

    let items = items
        .iter()
        .enumerate()
        .map(|(index, item)| validate_item(index, item))
        .collect::<ValidationResult<Vec<_>>>()?;

    Ok(CheckoutRequest {
        user_id,
        items,
        coupon: payload.coupon,
        currency,
    })
}

fn missing(field: &str) -> ValidationError {
    ValidationError::MissingField {
        field: field.to_string(),
    }
}

/// Validates one entry of the `items` list.
fn validate_item(index: usize, item: &Value) -> ValidationResult<LineItem> {
    let object = item
        .as_object()
        .ok_or_else(|| invalid_type(&format!("items[{index}]"), "an object"))?;

    let price = item_field(object, index, "price")?;
    let qty = item_field(object, index, "qty")?;

    let price = integer(price, index, "price")?;
    let qty = integer(qty, index, "qty")?;
    validate_positive(price, index, "price")?;
    validate_positive(qty, index, "qty")?;

    Ok(LineItem::new(price, qty))
}

fn item_field<'a>(
    object: &'a Map<String, Value>,
    index: usize,
    field: &str,
) -> ValidationResult<&'a Value> {
    optional_field(object, field).ok_or_else(|| ValidationError::MissingItemField {
        index,
        field: field.to_string(),
    })
}

fn integer(value: &Value, index: usize, field: &str) -> ValidationResult<i64> {
    value
        .as_i64()
        .ok_or_else(|| invalid_type(&format!("items[{index}].{field}"), "an integer"))
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates that a line item value is strictly positive.
///
/// ## Example
/// ```rust
/// use checkout_core::validation::validate_positive;
///
/// assert!(validate_positive(1, 0, "qty").is_ok());
/// assert!(validate_positive(0, 0, "qty").is_err());
/// assert!(validate_positive(-5, 3, "price").is_err());
/// ```
pub fn validate_positive(value: i64, index: usize, field: &str) -> ValidationResult<()> {
    if value <= 0 {
        return Err(ValidationError::NonPositiveValue {
            index,
            field: field.to_string(),
            value,
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate_bps".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

/// Validates a currency code and returns it trimmed.
///
/// ## Rules
/// - Must not be blank
/// - At most 8 characters
pub fn validate_currency(code: &str) -> ValidationResult<String> {
    let code = code.trim();

    if code.is_empty() {
        return Err(missing("currency"));
    }

    if code.chars().count() > 8 {
        return Err(ValidationError::OutOfRange {
            field: "currency length".to_string(),
            min: 1,
            max: 8,
        });
    }

    Ok(code.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
