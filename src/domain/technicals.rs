//! Price-action snapshot derived from a daily bar series.

use chrono::NaiveDate;

use crate::domain::error::OllieError;
use crate::domain::indicator::macd::{DEFAULT_FAST, DEFAULT_SIGNAL, DEFAULT_SLOW};
use crate::domain::indicator::{
    calculate_macd, calculate_rsi, calculate_sma, IndicatorValue, RsiSmoothing,
};
use crate::domain::ohlcv::OhlcvBar;

#[derive(Debug, Clone, PartialEq)]
pub struct TechnicalsConfig {
    pub ma_period: usize,
    pub rsi_period: usize,
    pub rsi_smoothing: RsiSmoothing,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    /// Bars counted back (inclusive of the latest) for the reference close.
    pub change_lookback: usize,
}

impl Default for TechnicalsConfig {
    fn default() -> Self {
        Self {
            ma_period: 20,
            rsi_period: 14,
            rsi_smoothing: RsiSmoothing::Simple,
            macd_fast: DEFAULT_FAST,
            macd_slow: DEFAULT_SLOW,
            macd_signal: DEFAULT_SIGNAL,
            change_lookback: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdSnapshot {
    pub line: f64,
    pub signal: f64,
    pub histogram: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceSummary {
    pub symbol: String,
    pub as_of: NaiveDate,
    pub latest_close: f64,
    pub change_pct: Option<f64>,
    pub moving_average: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<MacdSnapshot>,
    pub volume: i64,
}

pub fn summarize(
    symbol: &str,
    bars: &[OhlcvBar],
    config: &TechnicalsConfig,
) -> Result<PriceSummary, OllieError> {
    let latest = bars.last().ok_or_else(|| OllieError::NoData {
        symbol: symbol.to_string(),
    })?;

    let moving_average = calculate_sma(bars, config.ma_period).latest_simple();
    let rsi = calculate_rsi(bars, config.rsi_period, config.rsi_smoothing).latest_simple();
    let macd = calculate_macd(bars, config.macd_fast, config.macd_slow, config.macd_signal)
        .latest()
        .and_then(|p| match p.value {
            IndicatorValue::Macd {
                line,
                signal,
                histogram,
            } => Some(MacdSnapshot {
                line,
                signal,
                histogram,
            }),
            IndicatorValue::Simple(_) => None,
        });

    Ok(PriceSummary {
        symbol: symbol.to_string(),
        as_of: latest.date,
        latest_close: latest.close,
        change_pct: lookback_change_pct(bars, config.change_lookback),
        moving_average,
        rsi,
        macd,
        volume: latest.volume,
    })
}

/// Percent change of the latest close against the close `lookback - 1` bars earlier.
pub fn lookback_change_pct(bars: &[OhlcvBar], lookback: usize) -> Option<f64> {
    if lookback < 2 || bars.len() < lookback {
        return None;
    }
    let reference = bars[bars.len() - lookback].close;
    let latest = bars[bars.len() - 1].close;
    percent_change(reference, latest)
}

/// Percent change from the first to the last bar.
pub fn period_change_pct(bars: &[OhlcvBar]) -> Option<f64> {
    let (first, last) = (bars.first()?, bars.last()?);
    if bars.len() < 2 {
        return None;
    }
    percent_change(first.close, last.close)
}

fn percent_change(from: f64, to: f64) -> Option<f64> {
    if from == 0.0 {
        return None;
    }
    Some((to - from) / from * 100.0)
}
