//! Stochastic oscillator (%K)

use crate::common::math;
use crate::config::IndicatorConfig;
use crate::indicators::IndicatorError;
use crate::models::{Candle, IndicatorPoint, Signal};

/// %K reported for a flat window
pub const FLAT_WINDOW_K: f64 = 50.0;

/// %K = (close - lowest low) / (highest high - lowest low) * 100
pub fn calculate_stochastic(
    candles: &[Candle],
    config: &IndicatorConfig,
) -> Result<Vec<IndicatorPoint>, IndicatorError> {
    let period = config.stochastic_period;
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod {
            name: "stochastic",
            period,
            min: 1,
        });
    }
    if candles.len() < period {
        return Ok(Vec::new());
    }

    let mut points = Vec::with_capacity(candles.len() + 1 - period);
    for i in period - 1..candles.len() {
        let window = &candles[i + 1 - period..=i];
        let (Some(highest), Some(lowest)) = (
            math::max_of(window.iter().map(|c| c.high)),
            math::min_of(window.iter().map(|c| c.low)),
        ) else {
            continue;
        };

        let k = math::safe_ratio(candles[i].close - lowest, highest - lowest, FLAT_WINDOW_K / 100.0)
            * 100.0;
        let k = k.clamp(0.0, 100.0);

        let signal = if k < config.stochastic_oversold {
            Signal::Buy
        } else if k > config.stochastic_overbought {
            Signal::Sell
        } else {
            Signal::Neutral
        };
        points.push(IndicatorPoint::new(candles[i].time, i, k, signal));
    }

    Ok(points)
}

/// Calculate %K with default period (14) and thresholds (20/80)
pub fn calculate_stochastic_default(candles: &[Candle]) -> Vec<IndicatorPoint> {
    calculate_stochastic(candles, &IndicatorConfig::default()).unwrap_or_default()
}
