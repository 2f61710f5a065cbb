//! Lookback ranges accepted by the price-history sources.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryRange {
    FiveDays,
    OneMonth,
    #[default]
    ThreeMonths,
    SixMonths,
    OneYear,
}

impl HistoryRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryRange::FiveDays => "5d",
            HistoryRange::OneMonth => "1mo",
            HistoryRange::ThreeMonths => "3mo",
            HistoryRange::SixMonths => "6mo",
            HistoryRange::OneYear => "1y",
        }
    }

    /// Calendar days covered, used to filter offline data.
    pub fn calendar_days(&self) -> i64 {
        match self {
            HistoryRange::FiveDays => 7,
            HistoryRange::OneMonth => 31,
            HistoryRange::ThreeMonths => 92,
            HistoryRange::SixMonths => 183,
            HistoryRange::OneYear => 366,
        }
    }
}

impl fmt::Display for HistoryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "5d" => Ok(HistoryRange::FiveDays),
            "1mo" => Ok(HistoryRange::OneMonth),
            "3mo" => Ok(HistoryRange::ThreeMonths),
            "6mo" => Ok(HistoryRange::SixMonths),
            "1y" => Ok(HistoryRange::OneYear),
            other => Err(format!(
                "unknown history range {other:?} (expected 5d, 1mo, 3mo, 6mo or 1y)"
            )),
        }
    }
}
