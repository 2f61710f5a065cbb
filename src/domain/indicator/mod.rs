//! Technical indicator implementations.
//!
//! This module provides types for representing indicator values and series:
//! - `IndicatorPoint`: A single point in an indicator time series
//! - `IndicatorValue`: Enum for different indicator output shapes
//! - `IndicatorType`: Enum for indicator identity + parameters
//! - `IndicatorSeries`: A time series of indicator values

pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use ema::calculate_ema;
pub use macd::calculate_macd;
pub use rsi::{calculate_rsi, RsiSmoothing};
pub use sma::calculate_sma;

use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub value: IndicatorValue,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorValue {
    Simple(f64),
    Macd {
        line: f64,
        signal: f64,
        histogram: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Ema(usize),
    Rsi {
        period: usize,
        smoothing: RsiSmoothing,
    },
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// The most recent point, only when it is past the warmup.
    pub fn latest(&self) -> Option<&IndicatorPoint> {
        self.values.last().filter(|p| p.valid)
    }

    /// The most recent value of a single-valued series.
    pub fn latest_simple(&self) -> Option<f64> {
        match self.latest()?.value {
            IndicatorValue::Simple(v) => Some(v),
            IndicatorValue::Macd { .. } => None,
        }
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Ema(period) => write!(f, "EMA({})", period),
            IndicatorType::Rsi { period, smoothing } => match smoothing {
                RsiSmoothing::Simple => write!(f, "RSI({})", period),
                RsiSmoothing::Wilder => write!(f, "RSI_WILDER({})", period),
            },
            IndicatorType::Macd { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
        }
    }
}

/// Invalid placeholder points for every bar, used when a series cannot be computed.
pub(crate) fn invalid_points(bars: &[crate::domain::ohlcv::OhlcvBar]) -> Vec<IndicatorPoint> {
    bars.iter()
        .map(|b| IndicatorPoint {
            date: b.date,
            valid: false,
            value: IndicatorValue::Simple(0.0),
        })
        .collect()
}
