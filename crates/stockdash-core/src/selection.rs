//! The user's current sector and ticker choice

use serde::Serialize;

use crate::catalog::Sector;
use crate::error::{DashboardError, Result};

/// Current sector and chosen tickers
///
/// Tickers are always a duplicate-free subset of the sector's catalog list,
/// kept in the order they were chosen. That order is the presentation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    sector: Sector,
    tickers: Vec<String>,
}

impl Selection {
    /// Empty selection for `sector`
    pub fn new(sector: Sector) -> Self {
        Self {
            sector,
            tickers: Vec::new(),
        }
    }

    /// Build a selection, validating every ticker against the catalog
    pub fn with_tickers<I, S>(sector: Sector, tickers: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selection = Self::new(sector);
        for ticker in tickers {
            let ticker = normalize(ticker.as_ref());
            if !sector.contains(&ticker) {
                return Err(DashboardError::InvalidSelection(format!(
                    "{ticker} is not listed under {sector}"
                )));
            }
            if selection.contains(&ticker) {
                return Err(DashboardError::InvalidSelection(format!(
                    "{ticker} selected more than once"
                )));
            }
            selection.tickers.push(ticker);
        }
        Ok(selection)
    }

    pub fn sector(&self) -> Sector {
        self.sector
    }

    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    pub fn contains(&self, ticker: &str) -> bool {
        self.tickers.iter().any(|t| t.eq_ignore_ascii_case(ticker))
    }

    /// Selection for another sector; the ticker choice starts empty
    pub fn with_sector(&self, sector: Sector) -> Self {
        if sector == self.sector {
            return self.clone();
        }
        Self::new(sector)
    }

    /// Selection with `ticker` added or removed
    pub fn toggled(&self, ticker: &str) -> Result<Self> {
        let ticker = normalize(ticker);
        if !self.sector.contains(&ticker) {
            return Err(DashboardError::InvalidSelection(format!(
                "{ticker} is not listed under {}",
                self.sector
            )));
        }

        let mut next = self.clone();
        if let Some(pos) = next.tickers.iter().position(|t| *t == ticker) {
            next.tickers.remove(pos);
        } else {
            next.tickers.push(ticker);
        }
        Ok(next)
    }

    /// Same sector, no tickers
    pub fn cleared(&self) -> Self {
        Self::new(self.sector)
    }
}

fn normalize(ticker: &str) -> String {
    ticker.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty_technology() {
        let selection = Selection::default();
        assert_eq!(selection.sector(), Sector::Technology);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_with_tickers_normalizes_and_keeps_order() {
        let selection = Selection::with_tickers(Sector::Technology, ["nvda", " aapl"]).unwrap();
        assert_eq!(selection.tickers(), ["NVDA", "AAPL"]);
    }

    #[test]
    fn test_with_tickers_rejects_foreign_ticker() {
        let err = Selection::with_tickers(Sector::Energy, ["AAPL"]).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidSelection(_)));
    }

    #[test]
    fn test_with_tickers_rejects_duplicates() {
        let err = Selection::with_tickers(Sector::Finance, ["GS", "gs"]).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_toggle() {
        let selection = Selection::new(Sector::Healthcare);
        let selection = selection.toggled("PFE").unwrap();
        let selection = selection.toggled("JNJ").unwrap();
        assert_eq!(selection.tickers(), ["PFE", "JNJ"]);

        let selection = selection.toggled("pfe").unwrap();
        assert_eq!(selection.tickers(), ["JNJ"]);

        assert!(selection.toggled("XOM").is_err());
    }

    #[test]
    fn test_sector_change_resets_tickers() {
        let selection = Selection::with_tickers(Sector::Technology, ["AAPL"]).unwrap();
        assert_eq!(selection.with_sector(Sector::Technology), selection);

        let changed = selection.with_sector(Sector::Energy);
        assert_eq!(changed.sector(), Sector::Energy);
        assert!(changed.is_empty());
    }

    #[test]
    fn test_cleared() {
        let selection = Selection::with_tickers(Sector::Utilities, ["SO", "D"]).unwrap();
        let cleared = selection.cleared();
        assert_eq!(cleared.sector(), Sector::Utilities);
        assert!(cleared.is_empty());
    }
}
