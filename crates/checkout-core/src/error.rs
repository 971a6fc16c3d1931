//! # Error Types
//!
//! Domain-specific error types for checkout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  checkout-core errors (this file)                                      │
//! │  ├── CheckoutError    - Anything that aborts the pipeline              │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  checkout-cli errors (separate crate)                                  │
//! │  ├── ConfigError      - Bad configuration values                       │
//! │  └── ErrorResponse    - What the caller sees (serialized)              │
//! │                                                                         │
//! │  Flow: ValidationError → CheckoutError → ErrorResponse → Caller        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, item index, coupon code)
//! 3. Errors are enum variants, never String
//! 4. Each variant has a stable machine-readable code

use thiserror::Error;

// =============================================================================
// Checkout Error
// =============================================================================

/// Errors that abort a checkout computation.
///
/// Nothing here is retryable: the same payload always produces the same
/// error.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The payload failed validation (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A monetary amount no longer fits in an `i64`.
    ///
    /// ## When This Occurs
    /// - `price × qty` of a single line exceeds `i64::MAX`
    /// - The running subtotal or the taxed total overflows
    #[error("Amount overflow while computing {stage}")]
    AmountOverflow { stage: &'static str },
}

impl CheckoutError {
    /// Machine-readable error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            CheckoutError::Validation(err) => err.code(),
            CheckoutError::AmountOverflow { .. } => "AMOUNT_OVERFLOW",
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when the request payload doesn't meet requirements.
/// They are raised before any monetary computation runs, except
/// `UnknownCoupon`, which is raised when the discount is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required top-level field is missing.
    #[error("{field} is required")]
    MissingField { field: String },

    /// A field holds a value of the wrong JSON type.
    #[error("{field} must be {expected}")]
    InvalidType {
        field: String,
        expected: &'static str,
    },

    /// The items list is present but empty.
    #[error("items must not be empty")]
    EmptyItems,

    /// A line item lacks `price` or `qty`.
    ///
    /// ## User Workflow
    /// ```text
    /// items: [{ "price": 100 }]
    ///      │
    ///      ▼
    /// MissingItemField { index: 0, field: "qty" }
    ///      │
    ///      ▼
    /// Caller shows: "item 0 must have price and qty (missing qty)"
    /// ```
    #[error("item {index} must have price and qty (missing {field})")]
    MissingItemField { index: usize, field: String },

    /// A line item has `price <= 0` or `qty <= 0`.
    #[error("item {index}: {field} must be positive (got {value})")]
    NonPositiveValue {
        index: usize,
        field: String,
        value: i64,
    },

    /// The coupon code is not one of the known codes.
    #[error("unknown coupon: {code}")]
    UnknownCoupon { code: String },

    /// A configured value is outside its allowed range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

impl ValidationError {
    /// Machine-readable error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingField { .. } => "MISSING_FIELD",
            ValidationError::InvalidType { .. } => "INVALID_TYPE",
            ValidationError::EmptyItems => "EMPTY_ITEMS",
            ValidationError::MissingItemField { .. } => "MISSING_ITEM_FIELD",
            ValidationError::NonPositiveValue { .. } => "NON_POSITIVE_VALUE",
            ValidationError::UnknownCoupon { .. } => "UNKNOWN_COUPON",
            ValidationError::OutOfRange { .. } => "OUT_OF_RANGE",
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CheckoutError.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::MissingItemField {
            index: 2,
            field: "qty".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "item 2 must have price and qty (missing qty)"
        );

        let err = ValidationError::NonPositiveValue {
            index: 0,
            field: "price".to_string(),
            value: 0,
        };
        assert_eq!(err.to_string(), "item 0: price must be positive (got 0)");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MissingField {
            field: "user_id".to_string(),
        };
        assert_eq!(err.to_string(), "user_id is required");

        let err = ValidationError::InvalidType {
            field: "items".to_string(),
            expected: "a list",
        };
        assert_eq!(err.to_string(), "items must be a list");
    }

    #[test]
    fn test_validation_converts_to_checkout_error() {
        let validation_err = ValidationError::EmptyItems;
        let err: CheckoutError = validation_err.into();
        assert!(matches!(err, CheckoutError::Validation(_)));
        assert_eq!(err.code(), "EMPTY_ITEMS");
    }

    #[test]
    fn test_codes_are_stable() {
        let err = ValidationError::UnknownCoupon {
            code: "FOO".to_string(),
        };
        assert_eq!(err.code(), "UNKNOWN_COUPON");

        let err = CheckoutError::AmountOverflow { stage: "subtotal" };
        assert_eq!(err.code(), "AMOUNT_OVERFLOW");
        assert_eq!(err.to_string(), "Amount overflow while computing subtotal");
    }
}
