//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Underwriting policy configuration.
    #[serde(default)]
    pub underwriting: UnderwritingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Underwriting policy configuration.
///
/// The debt rate is an index rate plus a fixed spread. The original policy
/// values are the defaults; all four parameters can be overridden per
/// deployment (config file or `QUOIN__UNDERWRITING__*` environment).
#[derive(Debug, Clone, Deserialize)]
pub struct UnderwritingConfig {
    /// Market index rate, percent per annum.
    #[serde(default = "default_index_rate")]
    pub index_rate: Decimal,
    /// Lender spread over the index, percent per annum.
    #[serde(default = "default_spread")]
    pub spread: Decimal,
    /// Debt-service-coverage target (NOI / annual debt payment).
    #[serde(default = "default_dscr_target")]
    pub dscr_target: Decimal,
    /// Amortization horizon in months.
    #[serde(default = "default_amortization_months")]
    pub amortization_months: u32,
}

fn default_index_rate() -> Decimal {
    Decimal::new(298, 2) // 2.98%
}

fn default_spread() -> Decimal {
    Decimal::new(200, 2) // 2.00%
}

fn default_dscr_target() -> Decimal {
    Decimal::new(125, 2) // 1.25x
}

fn default_amortization_months() -> u32 {
    120 // 10 years
}

impl Default for UnderwritingConfig {
    fn default() -> Self {
        Self {
            index_rate: default_index_rate(),
            spread: default_spread(),
            dscr_target: default_dscr_target(),
            amortization_months: default_amortization_months(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("QUOIN").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_underwriting_defaults() {
        let cfg = UnderwritingConfig::default();
        assert_eq!(cfg.index_rate, dec!(2.98));
        assert_eq!(cfg.spread, dec!(2.00));
        assert_eq!(cfg.dscr_target, dec!(1.25));
        assert_eq!(cfg.amortization_months, 120);
    }

    #[test]
    fn test_underwriting_deserializes_with_overrides() {
        let cfg: UnderwritingConfig =
            serde_json::from_str(r#"{"index_rate": "3.10", "spread": "1.75"}"#).unwrap();
        assert_eq!(cfg.index_rate, dec!(3.10));
        assert_eq!(cfg.spread, dec!(1.75));
        // Untouched fields keep the policy defaults.
        assert_eq!(cfg.dscr_target, dec!(1.25));
        assert_eq!(cfg.amortization_months, 120);
    }
}
