//! Property tests for indicator bounds and identities.

mod common;

use approx::assert_relative_eq;
use common::bars_from_closes;
use ollie::domain::indicator::{
    calculate_ema, calculate_macd, calculate_rsi, calculate_sma, IndicatorValue, RsiSmoothing,
};
use proptest::prelude::*;

fn closes_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0f64..1_000.0, 1..120)
}

proptest! {
    #[test]
    fn rsi_bounded(closes in closes_strategy(), period in 2usize..30, wilder in any::<bool>()) {
        let smoothing = if wilder { RsiSmoothing::Wilder } else { RsiSmoothing::Simple };
        let series = calculate_rsi(&bars_from_closes("X", &closes), period, smoothing);

        prop_assert_eq!(series.values.len(), closes.len());
        for point in series.values.iter().filter(|p| p.valid) {
            if let IndicatorValue::Simple(v) = point.value {
                prop_assert!((0.0..=100.0).contains(&v), "RSI {} out of range", v);
            }
        }
        for point in series.values.iter().take(period) {
            prop_assert!(!point.valid);
        }
    }

    #[test]
    fn sma_of_constant_is_constant(value in 1.0f64..500.0, len in 1usize..80, period in 1usize..40) {
        let closes = vec![value; len];
        let series = calculate_sma(&bars_from_closes("X", &closes), period);

        for point in series.values.iter().filter(|p| p.valid) {
            if let IndicatorValue::Simple(v) = point.value {
                assert_relative_eq!(v, value, max_relative = 1e-9);
            }
        }
        prop_assert_eq!(series.values.iter().filter(|p| p.valid).count(), len.saturating_sub(period - 1));
    }

    #[test]
    fn ema_stays_within_price_range(closes in closes_strategy(), period in 1usize..30) {
        let series = calculate_ema(&bars_from_closes("X", &closes), period);
        let min = closes.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = closes.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        for point in series.values.iter().filter(|p| p.valid) {
            if let IndicatorValue::Simple(v) = point.value {
                prop_assert!(v >= min - 1e-9 && v <= max + 1e-9);
            }
        }
    }

    #[test]
    fn macd_histogram_is_line_minus_signal(closes in prop::collection::vec(1.0f64..1_000.0, 40..120)) {
        let series = calculate_macd(&bars_from_closes("X", &closes), 12, 26, 9);

        for point in series.values.iter().filter(|p| p.valid) {
            if let IndicatorValue::Macd { line, signal, histogram } = point.value {
                assert_relative_eq!(histogram, line - signal, epsilon = 1e-9);
            }
        }
        prop_assert!(series.latest().is_some());
    }
}
