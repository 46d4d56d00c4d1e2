//! The dashboard pipeline: fetch, derive, report
//!
//! [`compute`] is the pure part: given a selection and the fetch outcomes it
//! builds the charts, metrics and forecast tables. [`Dashboard`] wires a
//! [`PriceSource`] in front of it. Every call recomputes from scratch.

use rand::Rng;
use serde::Serialize;
use tracing::{info, warn};

use crate::api::{FetchWindow, PriceSource, YahooFinanceClient};
use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::fetch::{FetchOutcome, fetch_all};
use crate::forecast::{ForecastRow, forecast};
use crate::metrics::{MetricsRow, PlaceholderRatios};
use crate::models::PriceSeries;
use crate::selection::Selection;

/// Shown when no selected ticker could be fetched
pub const SOURCE_UNAVAILABLE_NOTICE: &str =
    "Price data service unavailable: no selected ticker could be fetched";

/// Category of a per-ticker problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningKind {
    /// The source returned no rows
    EmptySeries,
    /// The source errored or timed out
    FetchFailure,
    /// Too few rows for CAGR or the trend fit
    DegenerateFit,
}

/// A problem confined to one ticker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerWarning {
    pub symbol: String,
    pub kind: WarningKind,
    pub message: String,
}

impl TickerWarning {
    fn from_error(symbol: &str, err: &DashboardError) -> Self {
        let kind = match err {
            DashboardError::EmptySeries { .. } => WarningKind::EmptySeries,
            DashboardError::DegenerateFit { .. } => WarningKind::DegenerateFit,
            _ => WarningKind::FetchFailure,
        };
        Self {
            symbol: symbol.to_string(),
            kind,
            message: err.to_string(),
        }
    }
}

/// Everything the render stage needs for one selection
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardReport {
    pub selection: Selection,
    /// Series with at least one row, in selection order
    pub charts: Vec<PriceSeries>,
    pub metrics: Vec<MetricsRow>,
    pub forecasts: Vec<ForecastRow>,
    pub warnings: Vec<TickerWarning>,
    /// Single notice when the data source is unreachable for the whole batch
    pub notice: Option<String>,
}

impl DashboardReport {
    /// Report for a selection with no tickers: controls only
    pub fn empty(selection: Selection) -> Self {
        Self {
            selection,
            ..Default::default()
        }
    }

    /// Whether there is anything beyond the controls to render
    pub fn has_content(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn warning_for(&self, symbol: &str) -> Option<&TickerWarning> {
        self.warnings.iter().find(|w| w.symbol == symbol)
    }
}

/// Derive the report from fetched data
///
/// Tickers whose fetch failed or returned no rows produce a warning and no
/// chart or table rows. Tickers with too few rows keep their rows with the
/// affected values marked unavailable.
pub fn compute<R>(
    selection: &Selection,
    outcomes: Vec<FetchOutcome>,
    config: &DashboardConfig,
    rng: &mut R,
) -> DashboardReport
where
    R: Rng + ?Sized,
{
    let mut report = DashboardReport::empty(selection.clone());
    if selection.is_empty() {
        return report;
    }

    let total = outcomes.len();
    let mut failed = 0;

    for outcome in outcomes {
        let series = match outcome.result {
            Ok(series) => series,
            Err(e) => {
                failed += 1;
                report
                    .warnings
                    .push(TickerWarning::from_error(&outcome.symbol, &e));
                continue;
            }
        };

        if series.is_empty() {
            let err = DashboardError::EmptySeries {
                symbol: outcome.symbol.clone(),
            };
            report
                .warnings
                .push(TickerWarning::from_error(&outcome.symbol, &err));
            continue;
        }

        // The trend fit needs at least two distinct dates
        let mut days = series.days_elapsed();
        days.dedup();
        if days.len() < 2 {
            let err = DashboardError::DegenerateFit {
                symbol: outcome.symbol.clone(),
                points: days.len(),
            };
            report
                .warnings
                .push(TickerWarning::from_error(&outcome.symbol, &err));
        }

        let ratios = PlaceholderRatios::sample(rng);
        report.metrics.push(MetricsRow::new(
            &series,
            ratios,
            config.trading_days_per_year,
        ));
        report
            .forecasts
            .push(forecast(&series, config.forecast_horizon_days));
        report.charts.push(series);
    }

    if total > 0 && failed == total {
        warn!(tickers = total, "Every ticker failed to fetch");
        report.notice = Some(SOURCE_UNAVAILABLE_NOTICE.to_string());
    }

    report
}

/// Runs fetch and derivation for a selection against one price source
pub struct Dashboard<S> {
    source: S,
    config: DashboardConfig,
}

impl Dashboard<YahooFinanceClient> {
    /// Dashboard backed by Yahoo Finance
    pub fn yahoo(config: DashboardConfig) -> Self {
        let source = YahooFinanceClient::new(config.requests_per_minute);
        Self::new(source, config)
    }
}

impl<S: PriceSource> Dashboard<S> {
    pub fn new(source: S, config: DashboardConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Fetch stage only, for the trailing window ending now
    pub async fn fetch(&self, selection: &Selection) -> Vec<FetchOutcome> {
        let window = FetchWindow::trailing_from_now(self.config.lookback_days);
        fetch_all(&self.source, selection.tickers(), &window, &self.config).await
    }

    /// Full recomputation for `selection`
    pub async fn run(&self, selection: &Selection) -> DashboardReport {
        if selection.is_empty() {
            return DashboardReport::empty(selection.clone());
        }

        let outcomes = self.fetch(selection).await;
        let report = compute(selection, outcomes, &self.config, &mut rand::rng());
        info!(
            sector = %selection.sector(),
            tickers = selection.tickers().len(),
            charts = report.charts.len(),
            warnings = report.warnings.len(),
            "Dashboard recomputed"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockPriceSource;
    use crate::catalog::Sector;
    use crate::models::fixtures::{bar, linear_bars};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn outcome(symbol: &str, result: crate::error::Result<PriceSeries>) -> FetchOutcome {
        FetchOutcome {
            symbol: symbol.to_string(),
            result,
        }
    }

    fn series(symbol: &str, n: usize, from: f64, to: f64) -> PriceSeries {
        PriceSeries::new(symbol, linear_bars(symbol, n, from, to))
    }

    #[test]
    fn test_empty_selection_renders_nothing() {
        let selection = Selection::new(Sector::Technology);
        let report = compute(
            &selection,
            Vec::new(),
            &DashboardConfig::default(),
            &mut StdRng::seed_from_u64(0),
        );

        assert!(!report.has_content());
        assert!(report.charts.is_empty());
        assert!(report.metrics.is_empty());
        assert!(report.forecasts.is_empty());
        assert!(report.notice.is_none());
    }

    #[test]
    fn test_doubling_scenario() {
        let selection = Selection::with_tickers(Sector::Technology, ["AAPL"]).unwrap();
        let outcomes = vec![outcome("AAPL", Ok(series("AAPL", 252, 100.0, 200.0)))];
        let report = compute(
            &selection,
            outcomes,
            &DashboardConfig::default(),
            &mut StdRng::seed_from_u64(0),
        );

        assert_eq!(report.charts.len(), 1);
        let cagr = report.metrics[0].cagr_pct.unwrap();
        assert!((cagr - 100.0).abs() < 1e-6);
        assert!(report.forecasts[0].predicted_close.unwrap() > 200.0);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_rows_follow_selection_order() {
        let selection = Selection::with_tickers(Sector::Energy, ["VLO", "XOM", "CVX"]).unwrap();
        let outcomes = vec![
            outcome("VLO", Ok(series("VLO", 10, 1.0, 2.0))),
            outcome("XOM", Ok(series("XOM", 10, 2.0, 1.0))),
            outcome("CVX", Ok(series("CVX", 10, 3.0, 3.5))),
        ];
        let report = compute(
            &selection,
            outcomes,
            &DashboardConfig::default(),
            &mut StdRng::seed_from_u64(3),
        );

        let symbols: Vec<_> = report.metrics.iter().map(|m| m.symbol.as_str()).collect();
        assert_eq!(symbols, ["VLO", "XOM", "CVX"]);
        let symbols: Vec<_> = report.forecasts.iter().map(|f| f.symbol.as_str()).collect();
        assert_eq!(symbols, ["VLO", "XOM", "CVX"]);
    }

    #[test]
    fn test_empty_and_failed_tickers_are_isolated() {
        let selection =
            Selection::with_tickers(Sector::Finance, ["JPM", "BAC", "GS", "C"]).unwrap();
        let outcomes = vec![
            outcome("JPM", Ok(series("JPM", 20, 150.0, 160.0))),
            outcome("BAC", Ok(PriceSeries::new("BAC", Vec::new()))),
            outcome(
                "GS",
                Err(DashboardError::FetchFailure {
                    symbol: "GS".to_string(),
                    reason: "timeout".to_string(),
                }),
            ),
            outcome("C", Ok(series("C", 1, 60.0, 60.0))),
        ];
        let report = compute(
            &selection,
            outcomes,
            &DashboardConfig::default(),
            &mut StdRng::seed_from_u64(9),
        );

        let charted: Vec<_> = report.charts.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(charted, ["JPM", "C"]);
        assert_eq!(report.metrics.len(), 2);
        assert_eq!(report.metrics[1].cagr_pct, None);
        assert!(!report.forecasts[1].is_available());

        assert_eq!(
            report.warning_for("BAC").map(|w| w.kind),
            Some(WarningKind::EmptySeries)
        );
        assert_eq!(
            report.warning_for("GS").map(|w| w.kind),
            Some(WarningKind::FetchFailure)
        );
        assert_eq!(
            report.warning_for("C").map(|w| w.kind),
            Some(WarningKind::DegenerateFit)
        );
        assert!(report.warning_for("JPM").is_none());
        assert!(report.notice.is_none());
    }

    #[test]
    fn test_same_day_rows_warn_degenerate_fit() {
        let selection = Selection::with_tickers(Sector::Energy, ["COP"]).unwrap();
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let rows = vec![bar("COP", date, 100.0), bar("COP", date, 101.0)];
        let outcomes = vec![outcome("COP", Ok(PriceSeries::new("COP", rows)))];
        let report = compute(
            &selection,
            outcomes,
            &DashboardConfig::default(),
            &mut StdRng::seed_from_u64(4),
        );

        assert_eq!(report.charts.len(), 1);
        assert!(!report.forecasts[0].is_available());
        let warning = report.warning_for("COP").unwrap();
        assert_eq!(warning.kind, WarningKind::DegenerateFit);
        assert!(warning.message.contains("1 usable point"));
    }

    #[test]
    fn test_total_failure_sets_notice() {
        let selection = Selection::with_tickers(Sector::Utilities, ["SO", "D"]).unwrap();
        let fail = |s: &str| {
            outcome(
                s,
                Err(DashboardError::FetchFailure {
                    symbol: s.to_string(),
                    reason: "dns".to_string(),
                }),
            )
        };
        let report = compute(
            &selection,
            vec![fail("SO"), fail("D")],
            &DashboardConfig::default(),
            &mut StdRng::seed_from_u64(0),
        );

        assert_eq!(report.notice.as_deref(), Some(SOURCE_UNAVAILABLE_NOTICE));
        assert_eq!(report.warnings.len(), 2);
        assert!(report.metrics.is_empty());
    }

    #[tokio::test]
    async fn test_run_is_idempotent_except_ratios() {
        let mut source = MockPriceSource::new();
        source
            .expect_daily_history()
            .times(4)
            .returning(|symbol, _| Ok(linear_bars(symbol, 50, 80.0, 95.0)));
        let dashboard = Dashboard::new(source, DashboardConfig::default());
        let selection = Selection::with_tickers(Sector::Healthcare, ["MRK", "UNH"]).unwrap();

        let first = dashboard.run(&selection).await;
        let second = dashboard.run(&selection).await;

        assert_eq!(first.forecasts, second.forecasts);
        let cagrs = |r: &DashboardReport| r.metrics.iter().map(|m| m.cagr_pct).collect::<Vec<_>>();
        assert_eq!(cagrs(&first), cagrs(&second));
        assert_eq!(first.charts, second.charts);
    }

    #[tokio::test]
    async fn test_run_empty_selection_skips_fetch() {
        let mut source = MockPriceSource::new();
        source.expect_daily_history().never();
        let dashboard = Dashboard::new(source, DashboardConfig::default());

        let report = dashboard.run(&Selection::new(Sector::Energy)).await;
        assert!(!report.has_content());
    }
}
