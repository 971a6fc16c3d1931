//! CLI configuration module.
//!
//! Configuration is layered with the `config` crate:
//!
//! ```text
//! 1. Environment variables (highest priority)
//!    CHECKOUT_DEFAULT_CURRENCY=EUR
//!    CHECKOUT_TAX_RATE_BPS=1900
//!    CHECKOUT_LOG_LEVEL=debug
//!    CHECKOUT_PRETTY=true
//!
//! 2. checkout.toml in the working directory (optional)
//!
//! 3. Defaults: USD, 2100 bps, info, compact output
//! ```

use config::{Config, Environment, File, Source};
use serde::{Deserialize, Serialize};

use checkout_core::validation::{validate_currency, validate_tax_rate_bps};
use checkout_core::{CheckoutPolicy, TaxRate, ValidationError, DEFAULT_CURRENCY, DEFAULT_TAX_RATE_BPS};

/// Config file looked up in the working directory (extension optional).
pub const CONFIG_FILE: &str = "checkout";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "CHECKOUT";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Currency for requests that carry none
    pub default_currency: String,

    /// Flat tax rate in basis points
    pub tax_rate_bps: u32,

    /// Default tracing filter (RUST_LOG wins when set)
    pub log_level: String,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl CliConfig {
    /// Load configuration from `checkout.toml` and `CHECKOUT_*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_sources(
            File::with_name(CONFIG_FILE).required(false),
            Environment::with_prefix(ENV_PREFIX).try_parsing(true),
        )
    }

    /// Load configuration from an explicit file source and environment.
    pub fn from_sources<F>(file: F, env: Environment) -> Result<Self, ConfigError>
    where
        F: Source + Send + Sync + 'static,
    {
        let settings = Config::builder()
            .set_default("default_currency", DEFAULT_CURRENCY)?
            .set_default("tax_rate_bps", DEFAULT_TAX_RATE_BPS as i64)?
            .set_default("log_level", "info")?
            .set_default("pretty", false)?
            .add_source(file)
            .add_source(env)
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Validates the pricing settings into a [`CheckoutPolicy`].
    pub fn policy(&self) -> Result<CheckoutPolicy, ConfigError> {
        let default_currency =
            validate_currency(&self.default_currency).map_err(ConfigError::invalid("default_currency"))?;
        validate_tax_rate_bps(self.tax_rate_bps).map_err(ConfigError::invalid("tax_rate_bps"))?;

        Ok(CheckoutPolicy {
            default_currency,
            tax_rate: TaxRate::from_bps(self.tax_rate_bps),
        })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {field}: {source}")]
    InvalidValue {
        field: &'static str,
        source: ValidationError,
    },
}

impl ConfigError {
    fn invalid(field: &'static str) -> impl FnOnce(ValidationError) -> ConfigError {
        move |source| ConfigError::InvalidValue { field, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .source(Some(map))
    }

    fn no_file() -> impl Source + Send + Sync + 'static {
        File::from_str("", FileFormat::Toml)
    }

    #[test]
    fn test_defaults() {
        let config = CliConfig::from_sources(no_file(), env(&[])).unwrap();
        assert_eq!(config.default_currency, "USD");
        assert_eq!(config.tax_rate_bps, 2100);
        assert_eq!(config.log_level, "info");
        assert!(!config.pretty);

        assert_eq!(config.policy().unwrap(), CheckoutPolicy::default());
    }

    #[test]
    fn test_file_then_env_override() {
        let file = File::from_str(
            "default_currency = \"EUR\"\ntax_rate_bps = 1900\npretty = true\n",
            FileFormat::Toml,
        );
        let config =
            CliConfig::from_sources(file, env(&[("CHECKOUT_TAX_RATE_BPS", "700")])).unwrap();

        assert_eq!(config.default_currency, "EUR");
        assert_eq!(config.tax_rate_bps, 700);
        assert!(config.pretty);
    }

    #[test]
    fn test_policy_rejects_bad_values() {
        let config = CliConfig::from_sources(
            no_file(),
            env(&[("CHECKOUT_TAX_RATE_BPS", "10001")]),
        )
        .unwrap();
        let err = config.policy().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "tax_rate_bps", .. }));

        let config = CliConfig::from_sources(
            no_file(),
            env(&[("CHECKOUT_DEFAULT_CURRENCY", "   ")]),
        )
        .unwrap();
        assert!(matches!(
            config.policy().unwrap_err(),
            ConfigError::InvalidValue { field: "default_currency", .. }
        ));
    }

    #[test]
    fn test_unparseable_value_fails_to_load() {
        let err = CliConfig::from_sources(no_file(), env(&[("CHECKOUT_TAX_RATE_BPS", "lots")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }
}
