//! Candle builders shared by the unit tests
#![allow(dead_code)]

use chartschool::models::{Candle, CandleSeries};
use chrono::{DateTime, Duration, TimeZone, Utc};

pub fn time_at(i: usize) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::hours(i as i64)
}

pub fn candle(i: usize, open: f64, high: f64, low: f64, close: f64) -> Candle {
    Candle::new(open, high, low, close, 1000.0, time_at(i))
}

/// Each candle opens at the previous close, with a fixed wick on both sides
pub fn from_closes(closes: &[f64]) -> Vec<Candle> {
    let mut candles = Vec::with_capacity(closes.len());
    for (i, &close) in closes.iter().enumerate() {
        let open = if i == 0 { close } else { closes[i - 1] };
        let high = open.max(close) + 0.0002;
        let low = open.min(close) - 0.0002;
        candles.push(candle(i, open, high, low, close));
    }
    candles
}

/// Strictly rising bullish staircase: `close[i] = base + step * i`
pub fn rising(count: usize, base: f64, step: f64) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            let close = base + step * i as f64;
            let open = close - step / 2.0;
            candle(i, open, close + step / 4.0, open - step / 4.0, close)
        })
        .collect()
}

pub fn falling(count: usize, base: f64, step: f64) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            let close = base - step * i as f64;
            let open = close + step / 2.0;
            candle(i, open, open + step / 4.0, close - step / 4.0, close)
        })
        .collect()
}

/// Closes alternating between two prices
pub fn zigzag(count: usize, low: f64, high: f64) -> Vec<Candle> {
    let closes: Vec<f64> = (0..count)
        .map(|i| if i % 2 == 0 { low } else { high })
        .collect();
    from_closes(&closes)
}

pub fn series(candles: Vec<Candle>) -> CandleSeries {
    CandleSeries::new(candles).unwrap()
}

/// 20 candles oscillating between 1.1030 and 1.1045 whose lows touch
/// 1.1000 exactly at indices 5, 9 and 13
pub fn triple_support() -> Vec<Candle> {
    (0..20)
        .map(|i| {
            if matches!(i, 5 | 9 | 13) {
                candle(i, 1.1025, 1.1030, 1.1000, 1.1020)
            } else if i % 2 == 0 {
                candle(i, 1.1030, 1.1050, 1.1015, 1.1045)
            } else {
                candle(i, 1.1045, 1.1050, 1.1025, 1.1030)
            }
        })
        .collect()
}

/// Five rising bullish candles then a hammer at index 5
pub fn hammer_series() -> Vec<Candle> {
    let mut candles: Vec<Candle> = (0..5)
        .map(|i| {
            let open = 1.1000 + 0.001 * i as f64;
            let close = open + 0.0008;
            candle(i, open, close + 0.0001, open - 0.0001, close)
        })
        .collect();
    // body 10% of range, no upper shadow, lower shadow 90%
    candles.push(candle(5, 1.1044, 1.1045, 1.1035, 1.1045));
    candles
}
