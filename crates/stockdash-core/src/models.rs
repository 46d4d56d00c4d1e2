//! Price data shared by the fetch, metrics and forecast stages

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily OHLC record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Date-ordered daily history for one ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Build a series, sorting bars by date and stamping the ticker on each
    pub fn new(symbol: impl Into<String>, mut bars: Vec<PriceBar>) -> Self {
        let symbol = symbol.into();
        bars.sort_by_key(|b| b.date);
        for bar in &mut bars {
            if bar.symbol != symbol {
                bar.symbol.clone_from(&symbol);
            }
        }
        Self { symbol, bars }
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    pub fn first(&self) -> Option<&PriceBar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    /// Calendar days elapsed since the first observation, per bar
    pub fn days_elapsed(&self) -> Vec<i64> {
        let Some(start) = self.first().map(|b| b.date) else {
            return Vec::new();
        };
        self.bars
            .iter()
            .map(|b| (b.date - start).num_days())
            .collect()
    }

    /// Lowest and highest close
    pub fn close_range(&self) -> Option<(f64, f64)> {
        if self.is_empty() {
            return None;
        }
        let (min, max) = self
            .bars
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), b| {
                (lo.min(b.close), hi.max(b.close))
            });
        Some((min, max))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Bar with all prices equal to `close`
    pub fn bar(symbol: &str, date: NaiveDate, close: f64) -> PriceBar {
        PriceBar {
            symbol: symbol.to_string(),
            date,
            open: close,
            high: close,
            low: close,
            close,
            volume: 1_000,
        }
    }

    /// `n` consecutive-day bars with closes linearly spaced from `from` to `to`
    pub fn linear_bars(symbol: &str, n: usize, from: f64, to: f64) -> Vec<PriceBar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let step = if n > 1 { (to - from) / (n - 1) as f64 } else { 0.0 };
        (0..n)
            .map(|i| {
                let date = start + chrono::Duration::days(i as i64);
                bar(symbol, date, from + step * i as f64)
            })
            .collect()
    }

    pub fn linear_series(symbol: &str, n: usize, from: f64, to: f64) -> PriceSeries {
        PriceSeries::new(symbol, linear_bars(symbol, n, from, to))
    }
}
