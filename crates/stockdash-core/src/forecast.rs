//! Linear-trend price projection
//!
//! Close is regressed on calendar days elapsed since the first observation
//! and extrapolated `horizon` days past the last observed day. This is a
//! naive trend line, not a forecasting model.

use serde::{Deserialize, Serialize};

use crate::error::DashboardError;
use crate::models::PriceSeries;

/// Ordinary-least-squares line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Fit `ys` on `xs`
    ///
    /// `None` when the inputs differ in length, hold fewer than two points,
    /// or all `xs` are equal (the line is not identifiable).
    pub fn fit(xs: &[f64], ys: &[f64]) -> Option<Self> {
        if xs.len() != ys.len() || xs.len() < 2 {
            return None;
        }

        let n = xs.len() as f64;
        let mean_x = xs.iter().sum::<f64>() / n;
        let mean_y = ys.iter().sum::<f64>() / n;

        let (sxy, sxx) = xs
            .iter()
            .zip(ys)
            .fold((0.0, 0.0), |(sxy, sxx), (&x, &y)| {
                let dx = x - mean_x;
                (sxy + dx * (y - mean_y), sxx + dx * dx)
            });

        if sxx <= f64::EPSILON {
            return None;
        }

        let slope = sxy / sxx;
        let fit = Self {
            slope,
            intercept: mean_y - slope * mean_x,
        };
        (fit.slope.is_finite() && fit.intercept.is_finite()).then_some(fit)
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// One row of the forecast table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub symbol: String,
    /// Day offset (from the first observation) the prediction targets
    pub target_day: Option<i64>,
    /// Predicted close; `None` when no trend could be fitted
    pub predicted_close: Option<f64>,
    pub fit: Option<LinearFit>,
    /// Why the prediction is unavailable
    pub unavailable_reason: Option<String>,
}

impl ForecastRow {
    fn unavailable(symbol: &str, err: DashboardError) -> Self {
        Self {
            symbol: symbol.to_string(),
            target_day: None,
            predicted_close: None,
            fit: None,
            unavailable_reason: Some(err.to_string()),
        }
    }

    pub fn is_available(&self) -> bool {
        self.predicted_close.is_some()
    }
}

/// Fit the trend for `series` and project `horizon_days` past its last day
pub fn forecast(series: &PriceSeries, horizon_days: u32) -> ForecastRow {
    let symbol = series.symbol.as_str();
    if series.is_empty() {
        return ForecastRow::unavailable(
            symbol,
            DashboardError::EmptySeries {
                symbol: symbol.to_string(),
            },
        );
    }

    let days = series.days_elapsed();
    let xs: Vec<f64> = days.iter().map(|&d| d as f64).collect();
    let ys = series.closes();

    let Some(fit) = LinearFit::fit(&xs, &ys) else {
        let mut distinct = days.clone();
        distinct.dedup();
        return ForecastRow::unavailable(
            symbol,
            DashboardError::DegenerateFit {
                symbol: symbol.to_string(),
                points: distinct.len(),
            },
        );
    };

    let last_day = days.iter().copied().max().unwrap_or(0);
    let target_day = last_day + i64::from(horizon_days);
    ForecastRow {
        symbol: symbol.to_string(),
        target_day: Some(target_day),
        predicted_close: Some(fit.predict(target_day as f64)),
        fit: Some(fit),
        unavailable_reason: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PriceSeries;
    use crate::models::fixtures::{bar, linear_series};
    use chrono::NaiveDate;

    #[test]
    fn test_fit_exact_line() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [1.0, 3.0, 5.0, 7.0];
        let fit = LinearFit::fit(&xs, &ys).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.intercept - 1.0).abs() < 1e-12);
        assert!((fit.predict(10.0) - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_degenerate_inputs() {
        assert_eq!(LinearFit::fit(&[], &[]), None);
        assert_eq!(LinearFit::fit(&[1.0], &[5.0]), None);
        assert_eq!(LinearFit::fit(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]), None);
        assert_eq!(LinearFit::fit(&[1.0, 2.0], &[1.0]), None);
    }

    #[test]
    fn test_increasing_series_forecast_above_last_close() {
        let series = linear_series("AAPL", 252, 100.0, 200.0);
        let row = forecast(&series, 126);
        let predicted = row.predicted_close.unwrap();
        assert!(predicted > 200.0, "got {predicted}");
        assert_eq!(row.target_day, Some(251 + 126));
        // slope is 100/251 per day, so 126 more days adds ~50.2
        assert!((predicted - (200.0 + 126.0 * 100.0 / 251.0)).abs() < 1e-6);
    }

    #[test]
    fn test_decreasing_series_forecast_below_last_close() {
        let series = linear_series("PFE", 60, 40.0, 25.0);
        let row = forecast(&series, 126);
        assert!(row.predicted_close.unwrap() < 25.0);
        assert!(row.fit.unwrap().slope < 0.0);
    }

    #[test]
    fn test_uses_calendar_days() {
        // Weekend gap: closes on day 0, 1 and 4 lie on the line y = 10 + x
        let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        let series = PriceSeries::new(
            "KO",
            vec![bar("KO", d(5), 10.0), bar("KO", d(6), 11.0), bar("KO", d(9), 14.0)],
        );
        let row = forecast(&series, 6);
        assert_eq!(row.target_day, Some(10));
        assert!((row.predicted_close.unwrap() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_horizon_counts_calendar_days() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        let series = PriceSeries::new(
            "KO",
            vec![bar("KO", d(5), 10.0), bar("KO", d(6), 11.0), bar("KO", d(9), 14.0)],
        );
        let horizon = crate::config::DashboardConfig::default().forecast_horizon_days;
        let row = forecast(&series, horizon);

        // 126 days after 2024-01-09, not 126 trading sessions
        assert_eq!(row.target_day, Some(4 + 126));
        assert!((row.predicted_close.unwrap() - 140.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_series_unavailable() {
        let series = PriceSeries::new("GS", Vec::new());
        let row = forecast(&series, 126);
        assert!(!row.is_available());
        assert!(row.unavailable_reason.unwrap().contains("No price data"));
    }

    #[test]
    fn test_single_point_unavailable() {
        let series = linear_series("JPM", 1, 150.0, 150.0);
        let row = forecast(&series, 126);
        assert_eq!(row.predicted_close, None);
        assert!(row.unavailable_reason.unwrap().contains("1 usable point"));
    }

    #[test]
    fn test_forecast_is_idempotent() {
        let series = linear_series("NEE", 30, 70.0, 75.0);
        assert_eq!(forecast(&series, 126), forecast(&series, 126));
    }
}
