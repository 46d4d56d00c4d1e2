//! Configuration for dashboard runs

use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-ticker fetch timeout in seconds
pub const FETCH_TIMEOUT_ENV: &str = "STOCKDASH_FETCH_TIMEOUT_SECS";
/// Number of tickers fetched at once
pub const CONCURRENCY_ENV: &str = "STOCKDASH_CONCURRENCY";
/// Request quota against the data source
pub const REQUESTS_PER_MINUTE_ENV: &str = "STOCKDASH_REQUESTS_PER_MINUTE";

/// Configuration for fetch and derivation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Trailing calendar-day window of price history
    pub lookback_days: u32,

    /// Trading days per year used to annualise CAGR
    pub trading_days_per_year: u32,

    /// Days past the last observation the forecast targets
    pub forecast_horizon_days: u32,

    /// Per-ticker fetch timeout; `None` waits indefinitely
    pub fetch_timeout: Option<Duration>,

    /// How many tickers may be fetched at the same time
    pub max_concurrent_fetches: usize,

    /// Request quota against the data source
    pub requests_per_minute: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            lookback_days: 365,
            trading_days_per_year: 252,
            forecast_horizon_days: 126, // calendar days past the last close
            fetch_timeout: None,
            max_concurrent_fetches: 1,
            requests_per_minute: 120,
        }
    }
}

impl DashboardConfig {
    /// Create a new configuration builder
    pub fn builder() -> DashboardConfigBuilder {
        DashboardConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.lookback_days == 0 {
            return Err(DashboardError::ConfigError(
                "lookback_days must be greater than 0".to_string(),
            ));
        }

        if self.trading_days_per_year == 0 {
            return Err(DashboardError::ConfigError(
                "trading_days_per_year must be greater than 0".to_string(),
            ));
        }

        if self.max_concurrent_fetches == 0 {
            return Err(DashboardError::ConfigError(
                "max_concurrent_fetches must be greater than 0".to_string(),
            ));
        }

        if self.requests_per_minute == 0 {
            return Err(DashboardError::ConfigError(
                "requests_per_minute must be greater than 0".to_string(),
            ));
        }

        if self.fetch_timeout.is_some_and(|t| t.is_zero()) {
            return Err(DashboardError::ConfigError(
                "fetch_timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for DashboardConfig
#[derive(Debug, Default)]
pub struct DashboardConfigBuilder {
    lookback_days: Option<u32>,
    trading_days_per_year: Option<u32>,
    forecast_horizon_days: Option<u32>,
    fetch_timeout: Option<Duration>,
    max_concurrent_fetches: Option<usize>,
    requests_per_minute: Option<u32>,
}

impl DashboardConfigBuilder {
    /// Set the trailing history window
    pub fn lookback_days(mut self, days: u32) -> Self {
        self.lookback_days = Some(days);
        self
    }

    /// Set the CAGR annualisation factor
    pub fn trading_days_per_year(mut self, days: u32) -> Self {
        self.trading_days_per_year = Some(days);
        self
    }

    /// Set the forecast horizon
    pub fn forecast_horizon_days(mut self, days: u32) -> Self {
        self.forecast_horizon_days = Some(days);
        self
    }

    /// Set the per-ticker fetch timeout
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    /// Set the number of concurrent fetches
    pub fn max_concurrent_fetches(mut self, n: usize) -> Self {
        self.max_concurrent_fetches = Some(n);
        self
    }

    /// Set the request quota
    pub fn requests_per_minute(mut self, n: u32) -> Self {
        self.requests_per_minute = Some(n);
        self
    }

    /// Apply `STOCKDASH_*` environment overrides
    ///
    /// Values that fail to parse are logged and ignored.
    pub fn with_env(mut self) -> Self {
        if let Some(secs) = env_parse::<u64>(FETCH_TIMEOUT_ENV) {
            self.fetch_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(n) = env_parse::<usize>(CONCURRENCY_ENV) {
            self.max_concurrent_fetches = Some(n);
        }
        if let Some(n) = env_parse::<u32>(REQUESTS_PER_MINUTE_ENV) {
            self.requests_per_minute = Some(n);
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<DashboardConfig> {
        let defaults = DashboardConfig::default();

        let config = DashboardConfig {
            lookback_days: self.lookback_days.unwrap_or(defaults.lookback_days),
            trading_days_per_year: self
                .trading_days_per_year
                .unwrap_or(defaults.trading_days_per_year),
            forecast_horizon_days: self
                .forecast_horizon_days
                .unwrap_or(defaults.forecast_horizon_days),
            fetch_timeout: self.fetch_timeout.or(defaults.fetch_timeout),
            max_concurrent_fetches: self
                .max_concurrent_fetches
                .unwrap_or(defaults.max_concurrent_fetches),
            requests_per_minute: self
                .requests_per_minute
                .unwrap_or(defaults.requests_per_minute),
        };

        config.validate()?;
        Ok(config)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring unparsable environment override");
            None
        }
    }
}
