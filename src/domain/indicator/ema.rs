//! Exponential Moving Average indicator.
//!
//! k = 2/(n+1), seed with first SMA, then EMA[i] = C[i]*k + EMA[i-1]*(1-k).
//! Warmup: first (n-1) bars are invalid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_ema(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let values = ema_of(&crate::domain::ohlcv::closes(bars), period)
        .into_iter()
        .zip(bars)
        .map(|(ema, bar)| IndicatorPoint {
            date: bar.date,
            valid: ema.is_some(),
            value: IndicatorValue::Simple(ema.unwrap_or(0.0)),
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Ema(period),
        values,
    }
}

/// EMA over a raw value series; `None` during warmup.
///
/// Returns an empty vector for a zero period.
pub(crate) fn ema_of(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return Vec::new();
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut ema = 0.0;
    let mut sum = 0.0;

    for (i, &v) in values.iter().enumerate() {
        if i < period - 1 {
            sum += v;
            out.push(None);
        } else if i == period - 1 {
            sum += v;
            ema = sum / period as f64;
            out.push(Some(ema));
        } else {
            ema = v * k + ema * (1.0 - k);
            out.push(Some(ema));
        }
    }

    out
}
