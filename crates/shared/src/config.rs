//! Application configuration management.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Report engine configuration.
    #[serde(default)]
    pub engine: EngineConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which balance the statement balance is compared against during reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconciliationBaseline {
    /// `difference = statement - book balance`.
    BookBalance,
    /// `difference = statement - (book balance - uncleared cheques)`.
    #[default]
    AdjustedBankBalance,
}

/// Report engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Timeout applied to every collaborator fetch, in milliseconds.
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
    /// Baseline for the reconciliation difference.
    #[serde(default)]
    pub reconciliation_baseline: ReconciliationBaseline,
    /// Substitute account balances in profit & loss when a period has no transactions.
    #[serde(default)]
    pub profit_loss_account_fallback: bool,
    /// Number of recent transactions the dashboard metrics cover.
    #[serde(default = "default_dashboard_recent_limit")]
    pub dashboard_recent_limit: usize,
}

fn default_fetch_timeout_ms() -> u64 {
    5000
}

fn default_dashboard_recent_limit() -> usize {
    10
}

impl EngineConfig {
    /// Returns the fetch timeout as a `Duration`.
    #[must_use]
    pub const fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: default_fetch_timeout_ms(),
            reconciliation_baseline: ReconciliationBaseline::default(),
            profit_loss_account_fallback: false,
            dashboard_recent_limit: default_dashboard_recent_limit(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "ledgerline=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
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
            .add_source(config::Environment::with_prefix("LEDGERLINE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
