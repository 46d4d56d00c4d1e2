//! Sector catalog
//!
//! The fixed mapping of sectors to the tickers offered for comparison.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;

/// Market sectors offered by the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sector {
    #[default]
    Technology,
    Healthcare,
    Finance,
    Energy,
    Utilities,
}

impl Sector {
    /// All sectors in catalog order
    pub const ALL: [Sector; 5] = [
        Sector::Technology,
        Sector::Healthcare,
        Sector::Finance,
        Sector::Energy,
        Sector::Utilities,
    ];

    /// Get sector name
    pub fn name(&self) -> &'static str {
        match self {
            Sector::Technology => "Technology",
            Sector::Healthcare => "Healthcare",
            Sector::Finance => "Finance",
            Sector::Energy => "Energy",
            Sector::Utilities => "Utilities",
        }
    }

    /// Tickers offered for this sector, in display order
    pub fn tickers(&self) -> &'static [&'static str] {
        match self {
            Sector::Technology => &["AAPL", "MSFT", "GOOGL", "META", "NVDA"],
            Sector::Healthcare => &["JNJ", "PFE", "MRK", "ABBV", "UNH"],
            Sector::Finance => &["JPM", "BAC", "WFC", "C", "GS"],
            Sector::Energy => &["XOM", "CVX", "COP", "PSX", "VLO"],
            Sector::Utilities => &["NEE", "DUK", "SO", "D", "AEP"],
        }
    }

    /// Whether `ticker` belongs to this sector (case-insensitive)
    pub fn contains(&self, ticker: &str) -> bool {
        self.tickers()
            .iter()
            .any(|t| t.eq_ignore_ascii_case(ticker))
    }

    /// Position of this sector in [`Sector::ALL`]
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    /// Next sector, wrapping around
    pub fn next(&self) -> Sector {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous sector, wrapping around
    pub fn previous(&self) -> Sector {
        let len = Self::ALL.len();
        Self::ALL[(self.index() + len - 1) % len]
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Sector {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "technology" | "tech" => Ok(Sector::Technology),
            "healthcare" | "health" => Ok(Sector::Healthcare),
            "finance" | "financials" | "financial" => Ok(Sector::Finance),
            "energy" => Ok(Sector::Energy),
            "utilities" | "utility" => Ok(Sector::Utilities),
            other => Err(DashboardError::InvalidSelection(format!(
                "unknown sector '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order() {
        let names: Vec<_> = Sector::ALL.iter().map(Sector::name).collect();
        assert_eq!(
            names,
            ["Technology", "Healthcare", "Finance", "Energy", "Utilities"]
        );
    }

    #[test]
    fn test_sector_tickers_exact() {
        let expected: [(Sector, [&str; 5]); 5] = [
            (Sector::Technology, ["AAPL", "MSFT", "GOOGL", "META", "NVDA"]),
            (Sector::Healthcare, ["JNJ", "PFE", "MRK", "ABBV", "UNH"]),
            (Sector::Finance, ["JPM", "BAC", "WFC", "C", "GS"]),
            (Sector::Energy, ["XOM", "CVX", "COP", "PSX", "VLO"]),
            (Sector::Utilities, ["NEE", "DUK", "SO", "D", "AEP"]),
        ];
        for (sector, tickers) in expected {
            assert_eq!(sector.tickers(), tickers, "{sector}");
        }
    }

    #[test]
    fn test_sector_from_str() {
        assert_eq!("tech".parse::<Sector>().unwrap(), Sector::Technology);
        assert_eq!(" Finance ".parse::<Sector>().unwrap(), Sector::Finance);
        assert_eq!("financials".parse::<Sector>().unwrap(), Sector::Finance);
        assert_eq!("UTILITY".parse::<Sector>().unwrap(), Sector::Utilities);
        assert!("Materials".parse::<Sector>().is_err());
    }

    #[test]
    fn test_sector_cycle() {
        assert_eq!(Sector::Technology.next(), Sector::Healthcare);
        assert_eq!(Sector::Utilities.next(), Sector::Technology);
        assert_eq!(Sector::Technology.previous(), Sector::Utilities);
    }

    #[test]
    fn test_contains() {
        assert!(Sector::Energy.contains("xom"));
        assert!(!Sector::Energy.contains("AAPL"));
    }
}
