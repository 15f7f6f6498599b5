//! Unit tests for harmonic recognizers

use chartschool::config::PatternConfig;
use chartschool::models::{PatternBias, PatternKind};
use chartschool::patterns::harmonic::{direction, harmonic_points, harmonic_ratios};
use chartschool::patterns::{detect_pattern, detect_patterns};

use crate::fixtures::{falling, from_closes, rising};

#[test]
fn test_points_are_segment_midpoints() {
    let closes: Vec<f64> = (0..25).map(|i| 1.0 + 0.01 * i as f64).collect();
    let points = harmonic_points(&from_closes(&closes)).unwrap();
    assert_eq!(points.indices, [2, 7, 12, 17, 22]);
    assert!((points.x - 1.02).abs() < 1e-12);
    assert!((points.d - 1.22).abs() < 1e-12);
}

#[test]
fn test_ratios_of_equal_legs() {
    let closes: Vec<f64> = (0..25).map(|i| 1.0 + 0.01 * i as f64).collect();
    let ratios = harmonic_ratios(&harmonic_points(&from_closes(&closes)).unwrap());
    assert!((ratios.xb_xa - 1.0).abs() < 1e-9);
    assert!((ratios.ac_ab - 1.0).abs() < 1e-9);
    assert!((ratios.bd_bc - 1.0).abs() < 1e-9);
}

#[test]
fn test_too_short_window() {
    assert!(harmonic_points(&rising(4, 1.0, 0.01)).is_none());
}

#[test]
fn test_direction_from_d_against_x() {
    let up = harmonic_points(&rising(25, 1.0, 0.001)).unwrap();
    let down = harmonic_points(&falling(25, 2.0, 0.001)).unwrap();
    assert_eq!(direction(&up), PatternBias::Bearish);
    assert_eq!(direction(&down), PatternBias::Bullish);
}

#[test]
fn test_harmonic_scan_uses_latest_window() {
    let candles = falling(30, 2.0, 0.001);
    let matches = detect_pattern(PatternKind::Butterfly, &candles, &PatternConfig::default());
    assert_eq!(matches.len(), 1);
    let found = &matches[0];
    assert_eq!(found.start_index, 5);
    assert_eq!(found.end_index, 29);
    assert_eq!(found.bias, PatternBias::Bullish);
    assert_eq!(found.harmonic.unwrap().indices, [7, 12, 17, 22, 27]);
    assert!(found.ratios.is_some());
}

#[test]
fn test_harmonic_kinds_are_opt_in() {
    let candles = falling(40, 2.0, 0.001);
    let defaults = detect_patterns(&candles, &PatternConfig::default());
    assert!(defaults.iter().all(|m| !m.kind.is_harmonic()));

    let config = PatternConfig {
        kinds: vec![PatternKind::Bat, PatternKind::Shark],
        max_patterns: 5,
        ..PatternConfig::default()
    };
    let found = detect_patterns(&candles, &config);
    // both claim the same span; the first listed kind wins
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind, PatternKind::Bat);
}
