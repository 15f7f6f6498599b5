//! Unit tests for candlestick recognizers

use chartschool::config::PatternConfig;
use chartschool::models::PatternBias;
use chartschool::patterns::candlestick::{
    evening_star, inside_bar, is_bearish_engulfing, is_bullish_engulfing, is_doji, is_hammer,
    is_inverted_hammer, morning_star, outside_bar,
};

use crate::fixtures::candle;

#[test]
fn test_hammer_shape() {
    // body 0.0001, lower shadow 0.0009, no upper shadow
    let hammer = candle(0, 1.1044, 1.1045, 1.1035, 1.1045);
    assert!(is_hammer(&hammer));
    assert!(!is_inverted_hammer(&hammer));
}

#[test]
fn test_hammer_rejects_long_upper_shadow() {
    let c = candle(0, 1.1044, 1.1050, 1.1035, 1.1045);
    assert!(!is_hammer(&c));
}

#[test]
fn test_inverted_hammer_shape() {
    let c = candle(0, 1.1036, 1.1045, 1.1035, 1.1035);
    assert!(is_inverted_hammer(&c));
    assert!(!is_hammer(&c));
}

#[test]
fn test_zero_range_candle_matches_nothing() {
    let flat = candle(0, 1.1, 1.1, 1.1, 1.1);
    assert!(!is_hammer(&flat));
    assert!(!is_inverted_hammer(&flat));
    assert!(!is_doji(&flat));
}

#[test]
fn test_doji() {
    assert!(is_doji(&candle(0, 1.1000, 1.1010, 1.0990, 1.1001)));
    assert!(!is_doji(&candle(0, 1.1000, 1.1010, 1.0990, 1.1008)));
}

#[test]
fn test_bullish_engulfing() {
    let previous = candle(0, 1.1010, 1.1012, 1.0998, 1.1000);
    let current = candle(1, 1.0998, 1.1030, 1.0995, 1.1025);
    assert!(is_bullish_engulfing(&previous, &current, 1.5));
    assert!(!is_bearish_engulfing(&previous, &current, 1.5));
}

#[test]
fn test_engulfing_requires_body_ratio() {
    let previous = candle(0, 1.1010, 1.1012, 1.0998, 1.1000);
    // body exactly 1.5x the previous body, covering it
    let current = candle(1, 1.1000, 1.1020, 1.0995, 1.1015);
    assert!(!is_bullish_engulfing(&previous, &current, 1.5));
    let bigger = candle(1, 1.1000, 1.1020, 1.0995, 1.1016);
    assert!(is_bullish_engulfing(&previous, &bigger, 1.5));
}

#[test]
fn test_engulfing_never_flags_smaller_bodies() {
    let previous = candle(0, 1.1000, 1.1012, 1.0998, 1.1010);
    for step in 1..=15 {
        let body = 0.001 * step as f64 / 10.0;
        let current = candle(1, 1.1010, 1.1015, 1.1010 - body - 0.0001, 1.1010 - body);
        let flagged = is_bearish_engulfing(&previous, &current, 1.5);
        if current.body_size() <= previous.body_size() * 1.5 {
            assert!(!flagged, "body {} flagged", current.body_size());
        }
    }
}

#[test]
fn test_morning_and_evening_star() {
    let config = PatternConfig::default();
    let morning = [
        candle(0, 1.1100, 1.1102, 1.1048, 1.1050),
        candle(1, 1.1045, 1.1050, 1.1040, 1.1046),
        candle(2, 1.1050, 1.1102, 1.1048, 1.1100),
    ];
    let found = morning_star(&morning, &config).unwrap();
    assert_eq!(found.bias, PatternBias::Bullish);

    let evening = [
        candle(0, 1.1050, 1.1102, 1.1048, 1.1100),
        candle(1, 1.1105, 1.1110, 1.1100, 1.1104),
        candle(2, 1.1100, 1.1102, 1.1048, 1.1050),
    ];
    assert_eq!(evening_star(&evening, &config).unwrap().bias, PatternBias::Bearish);
    assert!(morning_star(&evening, &config).is_none());
}

#[test]
fn test_inside_and_outside_bars() {
    let config = PatternConfig::default();
    let wide = candle(0, 1.1000, 1.1050, 1.0950, 1.1020);
    let narrow = candle(1, 1.1010, 1.1030, 1.0990, 1.1020);
    assert!(inside_bar(&[wide, narrow], &config).is_some());
    assert!(outside_bar(&[wide, narrow], &config).is_none());

    let engulf = candle(1, 1.1040, 1.1060, 1.0940, 1.0950);
    let found = outside_bar(&[wide, engulf], &config).unwrap();
    assert_eq!(found.bias, PatternBias::Bearish);
}
