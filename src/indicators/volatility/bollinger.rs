//! Bollinger Bands indicator

use crate::common::math;
use crate::config::IndicatorConfig;
use crate::indicators::IndicatorError;
use crate::models::{BollingerPoint, Candle, Signal};

/// Calculate Bollinger Bands for every candle with a full window
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (std_dev * standard deviation)
/// Lower Band = Middle - (std_dev * standard deviation)
///
/// A close above the upper band is `sell`, below the lower band `buy`.
pub fn calculate_bollinger_bands(
    candles: &[Candle],
    config: &IndicatorConfig,
) -> Result<Vec<BollingerPoint>, IndicatorError> {
    let period = config.bollinger_period;
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod {
            name: "bollinger",
            period,
            min: 1,
        });
    }
    if !config.bollinger_std_dev.is_finite() || config.bollinger_std_dev < 0.0 {
        return Err(IndicatorError::InvalidParameter {
            name: "bollinger std_dev",
            reason: format!("{} is not a non-negative number", config.bollinger_std_dev),
        });
    }
    if candles.len() < period {
        return Ok(Vec::new());
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let mut points = Vec::with_capacity(candles.len() + 1 - period);

    for i in period - 1..candles.len() {
        let window = &closes[..=i];
        let (Some(middle), Some(std)) = (
            math::sma(window, period),
            math::standard_deviation(window, period),
        ) else {
            continue;
        };

        let upper = middle + config.bollinger_std_dev * std;
        let lower = middle - config.bollinger_std_dev * std;
        let close = closes[i];

        let signal = if close > upper {
            Signal::Sell
        } else if close < lower {
            Signal::Buy
        } else {
            Signal::Neutral
        };

        points.push(BollingerPoint {
            time: candles[i].time,
            index: i,
            upper,
            middle,
            lower,
            close,
            signal,
        });
    }

    Ok(points)
}

/// Calculate Bollinger Bands with default parameters (20 SMA, 2σ)
pub fn calculate_bollinger_bands_default(candles: &[Candle]) -> Vec<BollingerPoint> {
    calculate_bollinger_bands(candles, &IndicatorConfig::default()).unwrap_or_default()
}
