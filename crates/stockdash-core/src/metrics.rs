//! Comparison metrics: CAGR and placeholder valuation ratios
//!
//! The PER, PBR and EV/EBITDA columns are NOT derived from fundamentals.
//! They are uniform random draws kept as a clearly labelled stand-in until a
//! fundamentals source is wired in.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::models::PriceSeries;

/// Sampling range for the average PER placeholder
pub const PER_RANGE: Range<f64> = 10.0..30.0;
/// Sampling range for the average PBR placeholder
pub const PBR_RANGE: Range<f64> = 1.0..5.0;
/// Sampling range for the EV/EBITDA placeholder
pub const EV_EBITDA_RANGE: Range<f64> = 8.0..20.0;

/// Randomly generated valuation ratios
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderRatios {
    pub avg_per: f64,
    pub avg_pbr: f64,
    pub ev_ebitda: f64,
}

impl PlaceholderRatios {
    /// Draw one set of ratios
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            avg_per: rng.random_range(PER_RANGE),
            avg_pbr: rng.random_range(PBR_RANGE),
            ev_ebitda: rng.random_range(EV_EBITDA_RANGE),
        }
    }
}

/// One row of the metrics comparison table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRow {
    pub symbol: String,
    pub ratios: PlaceholderRatios,
    /// CAGR in percent; `None` when the series is too short
    pub cagr_pct: Option<f64>,
}

impl MetricsRow {
    pub fn new(
        series: &PriceSeries,
        ratios: PlaceholderRatios,
        trading_days_per_year: u32,
    ) -> Self {
        Self {
            symbol: series.symbol.clone(),
            ratios,
            cagr_pct: cagr_percent(&series.closes(), trading_days_per_year),
        }
    }
}

/// Compound annual growth rate as a fraction
///
/// `(last / first) ^ (trading_days_per_year / n) - 1` where `n` is the
/// number of closes. `None` for fewer than two closes, a non-positive first
/// close, or a non-finite result.
pub fn cagr(closes: &[f64], trading_days_per_year: u32) -> Option<f64> {
    if closes.len() < 2 || trading_days_per_year == 0 {
        return None;
    }
    let first = *closes.first()?;
    let last = *closes.last()?;
    if first <= 0.0 || !first.is_finite() || !last.is_finite() {
        return None;
    }

    let years = closes.len() as f64 / f64::from(trading_days_per_year);
    let value = (last / first).powf(1.0 / years) - 1.0;
    value.is_finite().then_some(value)
}

/// CAGR in percent
pub fn cagr_percent(closes: &[f64], trading_days_per_year: u32) -> Option<f64> {
    cagr(closes, trading_days_per_year).map(|v| v * 100.0)
}
