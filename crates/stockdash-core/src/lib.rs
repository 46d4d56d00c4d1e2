//! Sector stock comparison dashboard core
//!
//! This crate holds everything behind the dashboard screen:
//!
//! - A fixed sector → ticker catalog and the user's [`Selection`]
//! - Daily price history fetched per ticker through a [`PriceSource`]
//!   (Yahoo Finance by default), with per-ticker failure isolation
//! - Comparison metrics: CAGR plus placeholder valuation ratios
//! - A naive linear-trend forecast 126 days past the last observation
//! - Plain-text rendering of the resulting report
//!
//! # Architecture
//!
//! The flow is fetch → derive → render and is recomputed from scratch for
//! every selection:
//! - [`fetch::fetch_all`]: one independent request per ticker, results in
//!   selection order
//! - [`dashboard::compute`]: pure derivation of charts, metrics and forecasts
//! - [`formatter`]: text tables and sparklines; the CLI crate adds the
//!   interactive terminal UI
//!
//! # Example
//!
//! ```rust,ignore
//! use stockdash_core::{Dashboard, DashboardConfig, Sector, Selection};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let dashboard = Dashboard::yahoo(DashboardConfig::default());
//!     let selection = Selection::with_tickers(Sector::Technology, ["AAPL", "MSFT"])?;
//!
//!     let report = dashboard.run(&selection).await;
//!     for row in &report.forecasts {
//!         println!("{}: {:?}", row.symbol, row.predicted_close);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod fetch;
pub mod forecast;
pub mod formatter;
pub mod metrics;
pub mod models;
pub mod selection;

// Re-export main types for convenience
pub use api::{FetchWindow, PriceSource, YahooFinanceClient};
pub use catalog::Sector;
pub use config::DashboardConfig;
pub use dashboard::{Dashboard, DashboardReport, TickerWarning, WarningKind, compute};
pub use error::{DashboardError, Result};
pub use fetch::FetchOutcome;
pub use forecast::{ForecastRow, LinearFit};
pub use metrics::{MetricsRow, PlaceholderRatios};
pub use models::{PriceBar, PriceSeries};
pub use selection::Selection;
