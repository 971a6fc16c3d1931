//! Error response written to stdout when a checkout is rejected.
//!
//! ```json
//! {
//!   "code": "UNKNOWN_COUPON",
//!   "message": "unknown coupon: FOO"
//! }
//! ```
//!
//! Callers switch on `code`; `message` is for humans.

use serde::{Deserialize, Serialize};

use checkout_core::CheckoutError;

/// A rejected checkout as the caller sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,
}

impl From<&CheckoutError> for ErrorResponse {
    fn from(error: &CheckoutError) -> Self {
        // Validation messages are shown without the "Validation error:" wrapper.
        let message = match error {
            CheckoutError::Validation(inner) => inner.to_string(),
            other => other.to_string(),
        };

        ErrorResponse {
            code: error.code().to_string(),
            message,
        }
    }
}
