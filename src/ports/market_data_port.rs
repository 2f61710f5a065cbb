//! Market data port traits.

use crate::domain::error::OllieError;
use crate::domain::fundamentals::CompanyProfile;
use crate::domain::history_range::HistoryRange;
use crate::domain::ohlcv::OhlcvBar;

pub trait PriceHistoryPort {
    /// Daily bars for `symbol` covering `range`, sorted ascending by date.
    fn fetch_ohlcv(&self, symbol: &str, range: HistoryRange) -> Result<Vec<OhlcvBar>, OllieError>;
}

pub trait ProfilePort {
    fn fetch_profile(&self, symbol: &str) -> Result<CompanyProfile, OllieError>;
}
