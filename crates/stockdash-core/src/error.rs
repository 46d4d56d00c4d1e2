//! Error types for dashboard operations

use std::time::Duration;
use thiserror::Error;

/// Dashboard specific errors
///
/// Everything except `InvalidSelection` and `ConfigError` is recovered per
/// ticker by the pipeline and shown as a warning or "N/A" value.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Sector or ticker outside the catalog, or a duplicated ticker
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// The data source returned no rows for the requested window
    #[error("No price data for {symbol} in the requested window")]
    EmptySeries { symbol: String },

    /// Too few usable rows to compute a value
    #[error("Not enough data for {symbol}: {points} usable point(s), need at least 2")]
    DegenerateFit { symbol: String, points: usize },

    /// Network or lookup failure for a single ticker
    #[error("Failed to fetch {symbol}: {reason}")]
    FetchFailure { symbol: String, reason: String },

    /// Fetch did not complete within the configured timeout
    #[error("Fetching {symbol} timed out after {}s", .after.as_secs())]
    Timeout { symbol: String, after: Duration },

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinanceError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl DashboardError {
    /// Ticker the error belongs to, if any
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Self::EmptySeries { symbol }
            | Self::DegenerateFit { symbol, .. }
            | Self::FetchFailure { symbol, .. }
            | Self::Timeout { symbol, .. } => Some(symbol),
            _ => None,
        }
    }

    /// Whether the error means the data source could not be reached
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::FetchFailure { .. } | Self::Timeout { .. } | Self::YahooFinanceError(_)
        )
    }
}

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Convert anyhow::Error to DashboardError
impl From<anyhow::Error> for DashboardError {
    fn from(err: anyhow::Error) -> Self {
        DashboardError::Other(err.to_string())
    }
}
