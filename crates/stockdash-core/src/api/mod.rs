//! Price history providers

pub mod yahoo;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::PriceBar;

pub use yahoo::YahooFinanceClient;

/// Inclusive date range requested from a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl FetchWindow {
    /// `[end - days, end]`
    pub fn trailing(days: u32, end: DateTime<Utc>) -> Self {
        Self {
            start: end - Duration::days(i64::from(days)),
            end,
        }
    }

    /// Trailing window ending now
    pub fn trailing_from_now(days: u32) -> Self {
        Self::trailing(days, Utc::now())
    }
}

/// Source of daily price history
///
/// Implementations return the raw rows for the window; sorting and
/// per-ticker error isolation happen in the fetch stage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Daily OHLC rows for `symbol` within `window`
    async fn daily_history(&self, symbol: &str, window: &FetchWindow) -> Result<Vec<PriceBar>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_trailing_window() {
        let end = Utc.with_ymd_and_hms(2025, 6, 30, 0, 0, 0).unwrap();
        let window = FetchWindow::trailing(365, end);
        assert_eq!(window.end, end);
        assert_eq!((window.end - window.start).num_days(), 365);
        assert_eq!(
            window.start,
            Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap()
        );
    }
}
