//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::config::IndicatorConfig;
use crate::indicators::IndicatorError;
use crate::models::{Candle, IndicatorPoint, Signal};

/// Calculate the MACD line for every candle from index `slow - 1` on
///
/// MACD = (EMA(fast) - EMA(slow)) * scale
///
/// The signal compares each signed value with the previous point: rising is
/// `buy`, falling is `sell`, so a deepening negative reading is a `sell`. The
/// first point has nothing to compare with and is `neutral`.
pub fn calculate_macd(
    candles: &[Candle],
    config: &IndicatorConfig,
) -> Result<Vec<IndicatorPoint>, IndicatorError> {
    let (fast, slow) = (config.macd_fast, config.macd_slow);
    if fast == 0 {
        return Err(IndicatorError::InvalidPeriod {
            name: "macd fast",
            period: fast,
            min: 1,
        });
    }
    if slow <= fast {
        return Err(IndicatorError::InvalidPeriod {
            name: "macd slow",
            period: slow,
            min: fast + 1,
        });
    }
    if candles.len() < slow {
        return Ok(Vec::new());
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let fast_ema = math::ema_series(&closes, fast);
    let slow_ema = math::ema_series(&closes, slow);

    let mut points: Vec<IndicatorPoint> = Vec::with_capacity(candles.len() + 1 - slow);
    for i in slow - 1..candles.len() {
        let value = (fast_ema[i] - slow_ema[i]) * config.macd_scale;
        let signal = match points.last() {
            Some(previous) if value > previous.value => Signal::Buy,
            Some(previous) if value < previous.value => Signal::Sell,
            _ => Signal::Neutral,
        };
        points.push(IndicatorPoint::new(candles[i].time, i, value, signal));
    }

    Ok(points)
}

/// Calculate MACD with default periods (12, 26)
pub fn calculate_macd_default(candles: &[Candle]) -> Vec<IndicatorPoint> {
    calculate_macd(candles, &IndicatorConfig::default()).unwrap_or_default()
}
