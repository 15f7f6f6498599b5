//! RSI (Relative Strength Index) indicator

use crate::config::IndicatorConfig;
use crate::indicators::IndicatorError;
use crate::models::{Candle, IndicatorPoint, Signal};

/// Value used for RS when the window has no losses
pub const RS_NO_LOSS: f64 = 100.0;

/// Calculate RSI for every candle after the first `period` deltas
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss over the trailing `period` deltas
pub fn calculate_rsi(
    candles: &[Candle],
    config: &IndicatorConfig,
) -> Result<Vec<IndicatorPoint>, IndicatorError> {
    let period = config.rsi_period;
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod {
            name: "rsi",
            period,
            min: 1,
        });
    }
    if candles.len() < period + 1 {
        return Ok(Vec::new());
    }

    let mut gains = Vec::with_capacity(candles.len() - 1);
    let mut losses = Vec::with_capacity(candles.len() - 1);
    for i in 1..candles.len() {
        let change = candles[i].close - candles[i - 1].close;
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    let mut points = Vec::with_capacity(candles.len() - period);
    for i in period..candles.len() {
        // delta j covers candles j..=j+1
        let window = i - period..i;
        let avg_gain = gains[window.clone()].iter().sum::<f64>() / period as f64;
        let avg_loss = losses[window].iter().sum::<f64>() / period as f64;

        let rs = if avg_loss == 0.0 {
            RS_NO_LOSS
        } else {
            avg_gain / avg_loss
        };
        let rsi = (100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0);

        let signal = if rsi < config.rsi_oversold {
            Signal::Buy
        } else if rsi > config.rsi_overbought {
            Signal::Sell
        } else {
            Signal::Neutral
        };
        points.push(IndicatorPoint::new(candles[i].time, i, rsi, signal));
    }

    Ok(points)
}

/// Calculate RSI with default period (14) and thresholds (30/70)
pub fn calculate_rsi_default(candles: &[Candle]) -> Vec<IndicatorPoint> {
    calculate_rsi(candles, &IndicatorConfig::default()).unwrap_or_default()
}
