//! Unit tests for the stochastic oscillator

use chartschool::config::IndicatorConfig;
use chartschool::indicators::momentum::{calculate_stochastic, calculate_stochastic_default, FLAT_WINDOW_K};
use chartschool::models::Signal;

use crate::fixtures::{candle, falling, from_closes, rising};

#[test]
fn test_stochastic_starts_at_period_minus_one() {
    let candles = rising(20, 1.0, 0.001);
    let points = calculate_stochastic_default(&candles);
    assert_eq!(points.len(), 20 - 13);
    assert_eq!(points[0].index, 13);
}

#[test]
fn test_stochastic_close_at_high_is_overbought() {
    let candles: Vec<_> = (0..20)
        .map(|i| {
            let close = 1.0 + 0.001 * i as f64;
            candle(i, close - 0.0005, close, close - 0.001, close)
        })
        .collect();
    for point in calculate_stochastic_default(&candles) {
        assert!((point.value - 100.0).abs() < 1e-9);
        assert_eq!(point.signal, Some(Signal::Sell));
    }
}

#[test]
fn test_stochastic_downtrend_is_oversold() {
    let candles = falling(20, 2.0, 0.001);
    for point in calculate_stochastic_default(&candles) {
        assert!(point.value < 20.0);
        assert_eq!(point.signal, Some(Signal::Buy));
    }
}

#[test]
fn test_stochastic_flat_window() {
    let candles: Vec<_> = (0..15).map(|i| candle(i, 1.1, 1.1, 1.1, 1.1)).collect();
    let points = calculate_stochastic_default(&candles);
    assert!(!points.is_empty());
    for point in points {
        assert_eq!(point.value, FLAT_WINDOW_K);
        assert_eq!(point.signal, Some(Signal::Neutral));
    }
}

#[test]
fn test_stochastic_within_bounds() {
    let closes: Vec<f64> = (0..150)
        .map(|i| 1.2 + ((i * 53 % 89) as f64 - 44.0) * 0.0007)
        .collect();
    let candles = from_closes(&closes);
    for period in [1, 3, 14] {
        let config = IndicatorConfig {
            stochastic_period: period,
            ..IndicatorConfig::default()
        };
        for point in calculate_stochastic(&candles, &config).unwrap() {
            assert!((0.0..=100.0).contains(&point.value));
        }
    }
}
