//! Yahoo Finance price history client

use async_trait::async_trait;
use chrono::DateTime;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use time::OffsetDateTime;
use tracing::debug;
use yahoo_finance_api as yahoo;

use super::{FetchWindow, PriceSource};
use crate::error::{DashboardError, Result};
use crate::models::PriceBar;

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Yahoo Finance API client
///
/// Clones share one rate limiter, so concurrent fetches stay within the
/// configured quota.
#[derive(Clone)]
pub struct YahooFinanceClient {
    rate_limiter: SharedRateLimiter,
}

impl YahooFinanceClient {
    /// Create a new client limited to `requests_per_minute`
    pub fn new(requests_per_minute: u32) -> Self {
        let per_minute = NonZeroU32::new(requests_per_minute).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(per_minute)));

        Self { rate_limiter }
    }

    /// Get historical daily quotes for a symbol
    pub async fn get_historical_quotes(
        &self,
        symbol: &str,
        window: &FetchWindow,
    ) -> Result<Vec<PriceBar>> {
        self.rate_limiter.until_ready().await;

        let provider = yahoo::YahooConnector::new()
            .map_err(|e| DashboardError::YahooFinanceError(e.to_string()))?;

        // Convert chrono DateTime to time OffsetDateTime
        let start = OffsetDateTime::from_unix_timestamp(window.start.timestamp()).map_err(|e| {
            DashboardError::YahooFinanceError(format!("Invalid start timestamp: {e}"))
        })?;
        let end = OffsetDateTime::from_unix_timestamp(window.end.timestamp()).map_err(|e| {
            DashboardError::YahooFinanceError(format!("Invalid end timestamp: {e}"))
        })?;

        let response = match provider.get_quote_history(symbol, start, end).await {
            Ok(response) => response,
            Err(e) if is_empty_window(&e) => {
                debug!(symbol, "No quotes in the requested window");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(DashboardError::FetchFailure {
                    symbol: symbol.to_string(),
                    reason: e.to_string(),
                });
            }
        };

        bars_from_response(symbol, &response)
    }
}

/// Yahoo reports a window without trading data as an error
fn is_empty_window(err: &yahoo::YahooError) -> bool {
    matches!(
        err,
        yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult
    )
}

/// Daily bars from a chart response; an empty window yields no bars
fn bars_from_response(symbol: &str, response: &yahoo::YResponse) -> Result<Vec<PriceBar>> {
    let quotes = match response.quotes() {
        Ok(quotes) => quotes,
        Err(e) if is_empty_window(&e) => return Ok(Vec::new()),
        Err(e) => {
            return Err(DashboardError::FetchFailure {
                symbol: symbol.to_string(),
                reason: e.to_string(),
            });
        }
    };

    Ok(quotes
        .iter()
        .filter_map(|q| {
            let date = DateTime::from_timestamp(q.timestamp as i64, 0)?.date_naive();
            Some(PriceBar {
                symbol: symbol.to_string(),
                date,
                open: q.open,
                high: q.high,
                low: q.low,
                close: q.close,
                volume: q.volume,
            })
        })
        .collect())
}

impl Default for YahooFinanceClient {
    fn default() -> Self {
        Self::new(120)
    }
}

#[async_trait]
impl PriceSource for YahooFinanceClient {
    async fn daily_history(&self, symbol: &str, window: &FetchWindow) -> Result<Vec<PriceBar>> {
        self.get_historical_quotes(symbol, window).await
    }
}
