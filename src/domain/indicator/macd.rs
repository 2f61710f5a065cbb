//! MACD (Moving Average Convergence Divergence) indicator.
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of MACD Line, seeded once the line exists
//! Histogram = MACD Line - Signal Line
//!
//! Default parameters: fast=12, slow=26, signal=9
//! Warmup: slow - 1 + signal - 1 bars for fast < slow

use crate::domain::indicator::ema::ema_of;
use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::{closes, OhlcvBar};

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

pub fn calculate_macd(
    bars: &[OhlcvBar],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> IndicatorSeries {
    let indicator_type = IndicatorType::Macd {
        fast,
        slow,
        signal: signal_period,
    };

    if bars.is_empty() || fast == 0 || slow == 0 || signal_period == 0 {
        return IndicatorSeries {
            indicator_type,
            values: Vec::new(),
        };
    }

    let prices = closes(bars);
    let ema_fast = ema_of(&prices, fast);
    let ema_slow = ema_of(&prices, slow);

    let macd_line: Vec<Option<f64>> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| Some((*f)? - (*s)?))
        .collect();

    // Signal EMA runs over the defined part of the line only.
    let line_start = macd_line.iter().position(Option::is_some);
    let mut signal_line: Vec<Option<f64>> = vec![None; bars.len()];
    if let Some(start) = line_start {
        let defined: Vec<f64> = macd_line[start..].iter().flatten().copied().collect();
        for (offset, value) in ema_of(&defined, signal_period).into_iter().enumerate() {
            signal_line[start + offset] = value;
        }
    }

    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| match (macd_line[i], signal_line[i]) {
            (Some(line), Some(signal)) => IndicatorPoint {
                date: bar.date,
                valid: true,
                value: IndicatorValue::Macd {
                    line,
                    signal,
                    histogram: line - signal,
                },
            },
            (line, _) => IndicatorPoint {
                date: bar.date,
                valid: false,
                value: IndicatorValue::Macd {
                    line: line.unwrap_or(0.0),
                    signal: 0.0,
                    histogram: 0.0,
                },
            },
        })
        .collect();

    IndicatorSeries {
        indicator_type,
        values,
    }
}
