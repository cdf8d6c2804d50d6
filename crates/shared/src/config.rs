//! Application configuration management.

use serde::Deserialize;

use crate::types::CutoffRule;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Fiscal calendar and scenario configuration.
    #[serde(default)]
    pub fiscal: FiscalConfig,
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

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
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

/// Fiscal calendar and scenario configuration.
///
/// The start month is read once at start-up and handed to the batch jobs
/// as a value; nothing reads it from global state afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct FiscalConfig {
    /// First calendar month of the fiscal year (1-12).
    #[serde(default = "default_start_month")]
    pub start_month: u32,
    /// Scenario name carried by ledger data and aggregated actuals.
    #[serde(default = "default_actual_scenario")]
    pub actual_scenario: String,
    /// Scenario name used for seeded forecasts.
    #[serde(default = "default_forecast_scenario")]
    pub forecast_scenario: String,
    /// How the forecast seeder compares actuals against the cutoff.
    #[serde(default)]
    pub cutoff_rule: CutoffRule,
}

impl Default for FiscalConfig {
    fn default() -> Self {
        Self {
            start_month: default_start_month(),
            actual_scenario: default_actual_scenario(),
            forecast_scenario: default_forecast_scenario(),
            cutoff_rule: CutoffRule::default(),
        }
    }
}

fn default_start_month() -> u32 {
    10 // October
}

fn default_actual_scenario() -> String {
    "ACTUAL".to_string()
}

fn default_forecast_scenario() -> String {
    "FORECAST".to_string()
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
            .add_source(config::Environment::with_prefix("FISCORA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fiscal_defaults() {
        let fiscal = FiscalConfig::default();
        assert_eq!(fiscal.start_month, 10);
        assert_eq!(fiscal.actual_scenario, "ACTUAL");
        assert_eq!(fiscal.forecast_scenario, "FORECAST");
        assert_eq!(fiscal.cutoff_rule, CutoffRule::Chronological);
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("FISCORA__DATABASE__URL", Some("sqlite::memory:")),
                ("FISCORA__FISCAL__START_MONTH", Some("7")),
                ("FISCORA__FISCAL__FORECAST_SCENARIO", Some("BUDGET_FORECAST")),
                ("FISCORA__FISCAL__CUTOFF_RULE", Some("field_wise")),
                ("RUN_MODE", Some("test")),
            ],
            || {
                let config = AppConfig::load().expect("config should load");
                assert_eq!(config.database.url, "sqlite::memory:");
                assert_eq!(config.database.max_connections, 10);
                assert_eq!(config.fiscal.start_month, 7);
                assert_eq!(config.fiscal.actual_scenario, "ACTUAL");
                assert_eq!(config.fiscal.forecast_scenario, "BUDGET_FORECAST");
                assert_eq!(config.fiscal.cutoff_rule, CutoffRule::FieldWise);
                assert_eq!(config.server.port, 8080);
            },
        );
    }

    #[test]
    fn test_load_requires_database_url() {
        temp_env::with_vars_unset(["FISCORA__DATABASE__URL"], || {
            assert!(AppConfig::load().is_err());
        });
    }
}
