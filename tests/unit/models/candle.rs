//! Unit tests for the candle model and series validation

use chartschool::models::{Candle, CandleSeries, SeriesId, Timeframe};
use chartschool::ChartError;

use crate::fixtures::{candle, rising, time_at};

#[test]
fn test_candle_geometry() {
    let c = candle(0, 1.10, 1.13, 1.05, 1.12);
    assert!((c.body_size() - 0.02).abs() < 1e-12);
    assert!((c.upper_shadow() - 0.01).abs() < 1e-12);
    assert!((c.lower_shadow() - 0.05).abs() < 1e-12);
    assert!((c.total_range() - 0.08).abs() < 1e-12);
    assert!(c.is_bullish());
    assert!(!c.is_bearish());
}

#[test]
fn test_candle_validate_rejects_high_below_body() {
    let c = Candle::ohlc(1.10, 1.09, 1.05, 1.08, time_at(0));
    assert!(c.validate().is_err());
}

#[test]
fn test_candle_validate_rejects_negative_volume() {
    let c = candle(0, 1.0, 1.1, 0.9, 1.0).with_volume(-1.0);
    assert!(c.validate().is_err());
}

#[test]
fn test_series_rejects_empty() {
    assert!(matches!(CandleSeries::new(Vec::new()), Err(ChartError::EmptySeries)));
}

#[test]
fn test_series_rejects_invalid_candle() {
    let mut candles = rising(5, 1.0, 0.01);
    candles[3].low = candles[3].close + 0.5;
    match CandleSeries::new(candles) {
        Err(ChartError::InvalidCandle { index, .. }) => assert_eq!(index, 3),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_series_rejects_non_increasing_time() {
    let mut candles = rising(5, 1.0, 0.01);
    candles[2].time = candles[1].time;
    match CandleSeries::new(candles) {
        Err(ChartError::NonIncreasingTime { index }) => assert_eq!(index, 2),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_series_id_tracks_content() {
    let a = CandleSeries::new(rising(10, 1.0, 0.01)).unwrap();
    let b = CandleSeries::new(rising(10, 1.0, 0.01)).unwrap();
    let c = CandleSeries::new(rising(10, 1.0, 0.02)).unwrap();
    assert_eq!(a.id(), b.id());
    assert_ne!(a.id(), c.id());
    assert_eq!(a.id(), SeriesId::of(a.candles()));
}

#[test]
fn test_timeframe_parse() {
    assert_eq!("1h".parse::<Timeframe>().unwrap(), Timeframe::H1);
    assert_eq!(" 4H ".parse::<Timeframe>().unwrap().minutes(), 240);
    assert!("7m".parse::<Timeframe>().is_err());
}
