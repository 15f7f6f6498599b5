//! Unit tests for indicator registry

use chartschool::config::IndicatorConfig;
use chartschool::indicators::{compute_indicator, try_compute_indicator, IndicatorKind};

use crate::fixtures::zigzag;

#[test]
fn test_registry_lists_every_kind_once() {
    let kinds = IndicatorKind::all();
    assert_eq!(kinds.len(), 4);
    for kind in kinds {
        assert_eq!(kinds.iter().filter(|k| *k == kind).count(), 1);
    }
}

#[test]
fn test_first_point_index_matches_lookback() {
    let candles = zigzag(60, 1.10, 1.11);
    let config = IndicatorConfig::default();
    for &kind in IndicatorKind::all() {
        let points = compute_indicator(kind, &candles, &config);
        assert!(!points.is_empty(), "{} produced no points", kind.name());
        assert_eq!(points[0].index, kind.lookback(&config), "{}", kind.name());
        assert_eq!(points.last().unwrap().index, candles.len() - 1);
    }
}

#[test]
fn test_bollinger_points_carry_middle_band() {
    let candles = zigzag(20, 1.10, 1.12);
    let points = compute_indicator(IndicatorKind::Bollinger, &candles, &IndicatorConfig::default());
    assert_eq!(points.len(), 1);
    assert!((points[0].value - 1.11).abs() < 1e-9);
}

#[test]
fn test_invalid_config_yields_empty_output() {
    let candles = zigzag(60, 1.10, 1.11);
    let config = IndicatorConfig {
        rsi_period: 0,
        ..IndicatorConfig::default()
    };
    assert!(try_compute_indicator(IndicatorKind::Rsi, &candles, &config).is_err());
    assert!(compute_indicator(IndicatorKind::Rsi, &candles, &config).is_empty());
}

#[test]
fn test_oscillator_classification() {
    assert!(IndicatorKind::Rsi.is_oscillator());
    assert!(IndicatorKind::Stochastic.is_oscillator());
    assert!(!IndicatorKind::Macd.is_oscillator());
    assert!(!IndicatorKind::Bollinger.is_oscillator());
}

#[test]
fn test_kind_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&IndicatorKind::Macd).unwrap(), "\"macd\"");
}
