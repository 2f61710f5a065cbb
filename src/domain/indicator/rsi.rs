//! RSI (Relative Strength Index) indicator implementation.
//!
//! Price changes are split into gains and losses and averaged over n changes:
//! - `Simple`: rolling arithmetic mean of the last n gains/losses
//! - `Wilder`: first average is the simple mean, subsequent
//!   avg = (prev_avg * (n-1) + current) / n
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//! If avg_loss == 0: RSI = 100, unless avg_gain is also 0 (point invalid).
//!
//! Warmup: first n bars are invalid (need n price changes).

use std::fmt;
use std::str::FromStr;

use crate::domain::indicator::{
    invalid_points, IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue,
};
use crate::domain::ohlcv::OhlcvBar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RsiSmoothing {
    #[default]
    Simple,
    Wilder,
}

impl fmt::Display for RsiSmoothing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RsiSmoothing::Simple => write!(f, "simple"),
            RsiSmoothing::Wilder => write!(f, "wilder"),
        }
    }
}

impl FromStr for RsiSmoothing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" | "sma" => Ok(RsiSmoothing::Simple),
            "wilder" => Ok(RsiSmoothing::Wilder),
            other => Err(format!("unknown RSI smoothing {other:?} (expected simple or wilder)")),
        }
    }
}

pub fn calculate_rsi(bars: &[OhlcvBar], period: usize, smoothing: RsiSmoothing) -> IndicatorSeries {
    let indicator_type = IndicatorType::Rsi { period, smoothing };

    if period == 0 || bars.len() < 2 {
        return IndicatorSeries {
            indicator_type,
            values: invalid_points(bars),
        };
    }

    let mut gains: Vec<f64> = Vec::with_capacity(bars.len() - 1);
    let mut losses: Vec<f64> = Vec::with_capacity(bars.len() - 1);
    for pair in bars.windows(2) {
        let change = pair[1].change_from(pair[0].close);
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    let mut values = Vec::with_capacity(bars.len());
    values.push(IndicatorPoint {
        date: bars[0].date,
        valid: false,
        value: IndicatorValue::Simple(0.0),
    });

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;

    for (i, bar) in bars.iter().enumerate().skip(1) {
        let change_idx = i - 1;

        if change_idx + 1 < period {
            values.push(IndicatorPoint {
                date: bar.date,
                valid: false,
                value: IndicatorValue::Simple(0.0),
            });
            continue;
        }

        let window = change_idx + 1 - period..=change_idx;
        match smoothing {
            RsiSmoothing::Simple => {
                avg_gain = gains[window.clone()].iter().sum::<f64>() / period as f64;
                avg_loss = losses[window].iter().sum::<f64>() / period as f64;
            }
            RsiSmoothing::Wilder if change_idx + 1 == period => {
                avg_gain = gains[window.clone()].iter().sum::<f64>() / period as f64;
                avg_loss = losses[window].iter().sum::<f64>() / period as f64;
            }
            RsiSmoothing::Wilder => {
                avg_gain = (avg_gain * (period - 1) as f64 + gains[change_idx]) / period as f64;
                avg_loss = (avg_loss * (period - 1) as f64 + losses[change_idx]) / period as f64;
            }
        }

        let point = match rsi_from_averages(avg_gain, avg_loss) {
            Some(rsi) => IndicatorPoint {
                date: bar.date,
                valid: true,
                value: IndicatorValue::Simple(rsi),
            },
            None => IndicatorPoint {
                date: bar.date,
                valid: false,
                value: IndicatorValue::Simple(0.0),
            },
        };
        values.push(point);
    }

    IndicatorSeries {
        indicator_type,
        values,
    }
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            return None;
        }
        return Some(100.0);
    }
    Some(100.0 - (100.0 / (1.0 + avg_gain / avg_loss)))
}
