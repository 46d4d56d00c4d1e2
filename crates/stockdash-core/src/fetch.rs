//! Fetch stage: one independent history request per selected ticker

use futures::stream::{self, StreamExt};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::api::{FetchWindow, PriceSource};
use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};
use crate::models::PriceSeries;

/// Result of fetching one ticker
#[derive(Debug)]
pub struct FetchOutcome {
    pub symbol: String,
    /// Date-ordered series (possibly empty) or the isolated failure
    pub result: Result<PriceSeries>,
}

impl FetchOutcome {
    pub fn series(&self) -> Option<&PriceSeries> {
        self.result.as_ref().ok()
    }
}

/// Fetch every ticker, in selection order
///
/// A failure for one ticker is kept in its outcome and never aborts the
/// others. At most `config.max_concurrent_fetches` requests are in flight.
pub async fn fetch_all<S>(
    source: &S,
    tickers: &[String],
    window: &FetchWindow,
    config: &DashboardConfig,
) -> Vec<FetchOutcome>
where
    S: PriceSource + ?Sized,
{
    let concurrency = config.max_concurrent_fetches.max(1);
    debug!(tickers = tickers.len(), concurrency, "Starting fetch stage");

    stream::iter(tickers)
        .map(|symbol| async move {
            let result = fetch_one(source, symbol, window, config.fetch_timeout).await;
            FetchOutcome {
                symbol: symbol.clone(),
                result,
            }
        })
        .buffered(concurrency)
        .collect()
        .await
}

async fn fetch_one<S>(
    source: &S,
    symbol: &str,
    window: &FetchWindow,
    timeout: Option<Duration>,
) -> Result<PriceSeries>
where
    S: PriceSource + ?Sized,
{
    let request = source.daily_history(symbol, window);
    let rows = match timeout {
        Some(after) => tokio::time::timeout(after, request)
            .await
            .map_err(|_| DashboardError::Timeout {
                symbol: symbol.to_string(),
                after,
            })
            .and_then(|r| r),
        None => request.await,
    };

    match rows {
        Ok(rows) => {
            let series = PriceSeries::new(symbol, rows);
            info!(symbol, rows = series.len(), "Fetched price history");
            Ok(series)
        }
        Err(e) => {
            warn!(symbol, error = %e, "Price history fetch failed");
            Err(match e {
                e @ (DashboardError::FetchFailure { .. } | DashboardError::Timeout { .. }) => e,
                other => DashboardError::FetchFailure {
                    symbol: symbol.to_string(),
                    reason: other.to_string(),
                },
            })
        }
    }
}
