//! Unit tests for numeric helpers

use chartschool::common::math::{clamp, ema_series, max_of, min_of, safe_ratio, sma, standard_deviation};

#[test]
fn test_sma_uses_trailing_window() {
    let values = [1.0, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(sma(&values, 2), Some(4.5));
    assert_eq!(sma(&values, 5), Some(3.0));
}

#[test]
fn test_sma_insufficient_data() {
    assert!(sma(&[1.0, 2.0], 3).is_none());
    assert!(sma(&[1.0, 2.0], 0).is_none());
}

#[test]
fn test_standard_deviation_is_population() {
    let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    let std = standard_deviation(&values, 8).unwrap();
    assert!((std - 2.0).abs() < 1e-12);
}

#[test]
fn test_ema_series_seeded_with_first_value() {
    let ema = ema_series(&[10.0, 20.0, 20.0], 3);
    assert_eq!(ema.len(), 3);
    assert_eq!(ema[0], 10.0);
    // k = 0.5
    assert!((ema[1] - 15.0).abs() < 1e-12);
    assert!((ema[2] - 17.5).abs() < 1e-12);
}

#[test]
fn test_ema_series_empty() {
    assert!(ema_series(&[], 5).is_empty());
}

#[test]
fn test_extremes_ignore_nan() {
    let values = [1.0, f64::NAN, 3.0, -2.0];
    assert_eq!(max_of(values), Some(3.0));
    assert_eq!(min_of(values), Some(-2.0));
    assert_eq!(max_of(Vec::<f64>::new()), None);
}

#[test]
fn test_safe_ratio_fallback() {
    assert_eq!(safe_ratio(1.0, 0.0, 7.0), 7.0);
    assert_eq!(safe_ratio(1.0, 4.0, 7.0), 0.25);
}

#[test]
fn test_clamp_handles_inverted_range() {
    assert_eq!(clamp(5.0, 0.0, 3.0), 3.0);
    assert_eq!(clamp(-1.0, 0.0, 3.0), 0.0);
    assert_eq!(clamp(1.0, 0.0, -10.0), 0.0);
}
