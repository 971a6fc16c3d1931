//! # Checkout CLI
//!
//! `checkout [PATH]` prices the request in PATH (or stdin) and prints the
//! order summary as JSON.
//!
//! ## Exit Codes
//! ```text
//! 0  priced, summary on stdout
//! 1  configuration, I/O, or malformed JSON (message on stderr)
//! 2  request rejected, {code, message} on stdout
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use checkout_cli::{read_input, run, CliConfig, EXIT_FAILURE};
use checkout_core::CheckoutCalculator;

fn main() -> ExitCode {
    match try_main() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn try_main() -> anyhow::Result<ExitCode> {
    // Load configuration
    let config = CliConfig::load()?;

    // Initialize tracing; stdout is reserved for JSON
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .with_context(|| format!("invalid log level '{}'", config.log_level))?;
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let policy = config.policy()?;
    info!(
        currency = %policy.default_currency,
        tax_rate_bps = policy.tax_rate.bps(),
        "Configuration loaded"
    );
    let calculator = CheckoutCalculator::new(policy);

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let input = read_input(path.as_deref()).context("failed to read request")?;

    let outcome = run(&input, &calculator).context("request is not valid JSON")?;
    println!("{}", outcome.to_json(config.pretty)?);

    Ok(ExitCode::from(outcome.exit_code()))
}
