//! Market-wide context: volatility, rates and the benchmark's week.

use crate::domain::history_range::HistoryRange;
use crate::domain::technicals::period_change_pct;
use crate::ports::market_data_port::PriceHistoryPort;

pub const VIX_SYMBOL: &str = "^VIX";
pub const TEN_YEAR_SYMBOL: &str = "^TNX";
pub const BENCHMARK_SYMBOL: &str = "SPY";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MacroContext {
    pub vix: Option<f64>,
    /// Already quoted in percent.
    pub ten_year_yield: Option<f64>,
    pub spy_change_pct: Option<f64>,
}

/// Best-effort: each figure is fetched independently and left empty on failure.
pub fn gather(prices: &dyn PriceHistoryPort) -> MacroContext {
    MacroContext {
        vix: latest_close(prices, VIX_SYMBOL),
        ten_year_yield: latest_close(prices, TEN_YEAR_SYMBOL),
        spy_change_pct: match prices.fetch_ohlcv(BENCHMARK_SYMBOL, HistoryRange::FiveDays) {
            Ok(bars) => period_change_pct(&bars),
            Err(e) => {
                log::warn!("benchmark {} unavailable: {}", BENCHMARK_SYMBOL, e);
                None
            }
        },
    }
}

fn latest_close(prices: &dyn PriceHistoryPort, symbol: &str) -> Option<f64> {
    match prices.fetch_ohlcv(symbol, HistoryRange::FiveDays) {
        Ok(bars) => bars.last().map(|b| b.close),
        Err(e) => {
            log::warn!("{} unavailable: {}", symbol, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::OllieError;
    use crate::domain::ohlcv::OhlcvBar;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    struct Quotes(HashMap<&'static str, Vec<f64>>);

    impl PriceHistoryPort for Quotes {
        fn fetch_ohlcv(&self, symbol: &str, range: HistoryRange) -> Result<Vec<OhlcvBar>, OllieError> {
            assert_eq!(range, HistoryRange::FiveDays);
            let closes = self.0.get(symbol).ok_or_else(|| OllieError::NoData {
                symbol: symbol.to_string(),
            })?;
            let start = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
            Ok(closes
                .iter()
                .enumerate()
                .map(|(i, &close)| OhlcvBar {
                    symbol: symbol.to_string(),
                    date: start + chrono::Duration::days(i as i64),
                    open: close,
                    high: close,
                    low: close,
                    close,
                    volume: 0,
                })
                .collect())
        }
    }

    #[test]
    fn gathers_all_figures() {
        let quotes = Quotes(HashMap::from([
            (VIX_SYMBOL, vec![14.0, 13.2]),
            (TEN_YEAR_SYMBOL, vec![4.41, 4.28]),
            (BENCHMARK_SYMBOL, vec![500.0, 505.0, 510.0]),
        ]));
        let ctx = gather(&quotes);
        assert_eq!(ctx.vix, Some(13.2));
        assert_eq!(ctx.ten_year_yield, Some(4.28));
        assert!((ctx.spy_change_pct.unwrap() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn missing_symbols_left_empty() {
        let quotes = Quotes(HashMap::from([(VIX_SYMBOL, vec![18.5])]));
        let ctx = gather(&quotes);
        assert_eq!(ctx.vix, Some(18.5));
        assert_eq!(ctx.ten_year_yield, None);
        assert_eq!(ctx.spy_change_pct, None);
    }
}
