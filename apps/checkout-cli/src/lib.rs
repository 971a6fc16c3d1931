//! # Checkout CLI
//!
//! Reads a checkout request as JSON, prices it with `checkout-core`, and
//! renders the result.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PATH or stdin ──► read_input ──► run ──┬──► Outcome::Priced            │
//! │                                         │      (OrderSummary)           │
//! │                                         └──► Outcome::Rejected          │
//! │                                                (ErrorResponse)          │
//! │                                                                         │
//! │  Malformed JSON is not a checkout outcome; it surfaces as an error.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config`] for the `checkout.toml` keys and `CHECKOUT_*` variables.

pub mod config;
pub mod error;

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use checkout_core::{CheckoutCalculator, OrderSummary};

pub use self::config::{CliConfig, ConfigError};
pub use self::error::ErrorResponse;

/// Process exit code for a priced order.
pub const EXIT_PRICED: u8 = 0;

/// Process exit code for unreadable input, malformed JSON or bad configuration.
pub const EXIT_FAILURE: u8 = 1;

/// Process exit code for a request the calculator rejected.
pub const EXIT_REJECTED: u8 = 2;

/// Result of pricing one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Priced(OrderSummary),
    Rejected(ErrorResponse),
}

impl Outcome {
    /// Renders the outcome as JSON.
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        match (self, pretty) {
            (Outcome::Priced(summary), true) => serde_json::to_string_pretty(summary),
            (Outcome::Priced(summary), false) => serde_json::to_string(summary),
            (Outcome::Rejected(response), true) => serde_json::to_string_pretty(response),
            (Outcome::Rejected(response), false) => serde_json::to_string(response),
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }

    /// Exit code the binary reports for this outcome.
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Priced(_) => EXIT_PRICED,
            Outcome::Rejected(_) => EXIT_REJECTED,
        }
    }
}

/// Parses `input` and prices it.
///
/// Returns `Err` only when `input` is not JSON at all.
pub fn run(input: &str, calculator: &CheckoutCalculator) -> serde_json::Result<Outcome> {
    let payload: Value = serde_json::from_str(input)?;

    let outcome = match calculator.compute(&payload) {
        Ok(summary) => {
            info!(order_id = %summary.order_id, total = %summary.total, "Order priced");
            Outcome::Priced(summary)
        }
        Err(err) => {
            info!(code = err.code(), %err, "Order rejected");
            Outcome::Rejected(ErrorResponse::from(&err))
        }
    };

    Ok(outcome)
}

/// Reads the request from `path`, or stdin when `path` is `None` or `-`.
pub fn read_input(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => {
            debug!(path = %path.display(), "Reading request file");
            fs::read_to_string(path)
        }
        _ => {
            debug!("Reading request from stdin");
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}
