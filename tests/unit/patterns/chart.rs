//! Unit tests for chart pattern recognizers

use chartschool::config::PatternConfig;
use chartschool::models::{Candle, PatternBias, PatternKind};
use chartschool::patterns::chart::{double_top, flag, head_and_shoulders, is_double_bottom, is_double_top, pennant, triangle};
use chartschool::patterns::detect_pattern;

use crate::fixtures::{candle, rising};

/// Bullish bar spanning `[low, high]`
fn bar(i: usize, low: f64, high: f64) -> Candle {
    let span = high - low;
    candle(i, low + span * 0.3, high, low, low + span * 0.7)
}

fn bars(ranges: &[(f64, f64)]) -> Vec<Candle> {
    ranges
        .iter()
        .enumerate()
        .map(|(i, &(low, high))| bar(i, low, high))
        .collect()
}

fn double_top_window(second_peak: f64) -> Vec<Candle> {
    bars(&[
        (1.1970, 1.1990),
        (1.1985, 1.2000),
        (1.1980, 1.1995),
        (1.1980, 1.1990),
        (1.1982, 1.1988),
        (1.1985, 1.1992),
        (1.1985, 1.1995),
        (1.1990, second_peak),
        (1.1985, 1.1990),
    ])
}

#[test]
fn test_double_top_peaks_at_tolerance_accepted() {
    let config = PatternConfig::default();
    assert!(is_double_top(1.2000, 1.1989, 1.2005, &config));
}

#[test]
fn test_double_top_peaks_beyond_tolerance_rejected() {
    let config = PatternConfig::default();
    assert!(!is_double_top(1.2000, 1.1989, 1.2006, &config));
}

#[test]
fn test_double_top_requires_trough_depth() {
    let config = PatternConfig::default();
    assert!(is_double_top(1.2000, 1.1989, 1.2000, &config));
    assert!(!is_double_top(1.2000, 1.1991, 1.2000, &config));
}

#[test]
fn test_double_bottom_mirrors_double_top() {
    let config = PatternConfig::default();
    assert!(is_double_bottom(1.1000, 1.1016, 1.1005, &config));
    assert!(!is_double_bottom(1.1000, 1.1016, 1.1006, &config));
    assert!(!is_double_bottom(1.1000, 1.1009, 1.1000, &config));
}

#[test]
fn test_double_top_window() {
    let config = PatternConfig::default();
    let found = double_top(&double_top_window(1.2003), &config).unwrap();
    assert_eq!(found.bias, PatternBias::Bearish);
    assert!(double_top(&double_top_window(1.2006), &config).is_none());
}

#[test]
fn test_double_top_scan_reports_window_span() {
    let config = PatternConfig {
        chart_window: 9,
        ..PatternConfig::default()
    };
    let matches = detect_pattern(PatternKind::DoubleTop, &double_top_window(1.2003), &config);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].start_index, 0);
    assert_eq!(matches[0].end_index, 8);
}

#[test]
fn test_short_window_is_ignored() {
    let config = PatternConfig::default();
    assert!(double_top(&double_top_window(1.2003)[..5], &config).is_none());
}

#[test]
fn test_head_and_shoulders() {
    let window = bars(&[
        (1.1980, 1.1995),
        (1.1985, 1.2000),
        (1.1985, 1.1995),
        (1.1990, 1.2005),
        (1.2000, 1.2020),
        (1.1990, 1.2008),
        (1.1985, 1.2005),
        (1.1985, 1.2000),
        (1.1980, 1.1995),
    ]);
    let found = head_and_shoulders(&window, &PatternConfig::default()).unwrap();
    assert_eq!(found.bias, PatternBias::Bearish);
}

fn pole() -> Vec<Candle> {
    (0..6)
        .map(|i| {
            let open = 1.1000 + 0.001 * i as f64;
            let close = open + 0.001;
            candle(i, open, close + 0.0001, open - 0.0001, close)
        })
        .collect()
}

#[test]
fn test_bull_flag() {
    let mut window = pole();
    for k in 0..6 {
        let open = 1.1058 - 0.0002 * k as f64;
        let close = open - 0.0002;
        window.push(candle(6 + k, open, open + 0.0001, close - 0.0001, close));
    }
    let found = flag(&window, &PatternConfig::default()).unwrap();
    assert_eq!(found.bias, PatternBias::Bullish);
    assert!(pennant(&window, &PatternConfig::default()).is_none());
}

#[test]
fn test_flag_needs_pole() {
    let window = rising(12, 1.1, 0.0001);
    assert!(flag(&window, &PatternConfig::default()).is_none());
}

#[test]
fn test_bull_pennant() {
    let mut window = pole();
    for k in 0..6 {
        let high = 1.1060 - 0.0001 * k as f64;
        let low = 1.1045 + 0.0001 * k as f64;
        window.push(bar(6 + k, low, high));
    }
    let found = pennant(&window, &PatternConfig::default()).unwrap();
    assert_eq!(found.bias, PatternBias::Bullish);
}

#[test]
fn test_symmetric_triangle() {
    let window = bars(&[
        (1.1000, 1.1100),
        (1.1010, 1.1090),
        (1.1005, 1.1095),
        (1.1015, 1.1085),
        (1.1020, 1.1080),
        (1.1010, 1.1090),
        (1.1030, 1.1070),
        (1.1035, 1.1065),
        (1.1040, 1.1060),
        (1.1038, 1.1062),
        (1.1042, 1.1058),
        (1.1045, 1.1055),
    ]);
    let found = triangle(&window, &PatternConfig::default()).unwrap();
    assert_eq!(found.bias, PatternBias::Neutral);
}

#[test]
fn test_trending_window_is_not_a_triangle() {
    assert!(triangle(&rising(12, 1.1, 0.001), &PatternConfig::default()).is_none());
}
