//! Indicator registry: kinds, lookbacks and dispatch

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::IndicatorConfig;
use crate::indicators::momentum::{calculate_macd, calculate_rsi, calculate_stochastic};
use crate::indicators::volatility::calculate_bollinger_bands;
use crate::indicators::IndicatorError;
use crate::models::{Candle, IndicatorPoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorKind {
    Rsi,
    Macd,
    Stochastic,
    Bollinger,
}

type IndicatorFn = fn(&[Candle], &IndicatorConfig) -> Result<Vec<IndicatorPoint>, IndicatorError>;

fn bollinger_points(
    candles: &[Candle],
    config: &IndicatorConfig,
) -> Result<Vec<IndicatorPoint>, IndicatorError> {
    Ok(calculate_bollinger_bands(candles, config)?
        .into_iter()
        .map(IndicatorPoint::from)
        .collect())
}

impl IndicatorKind {
    pub fn all() -> &'static [IndicatorKind] {
        &[
            IndicatorKind::Rsi,
            IndicatorKind::Macd,
            IndicatorKind::Stochastic,
            IndicatorKind::Bollinger,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            IndicatorKind::Rsi => "RSI",
            IndicatorKind::Macd => "MACD",
            IndicatorKind::Stochastic => "Stochastic",
            IndicatorKind::Bollinger => "Bollinger Bands",
        }
    }

    /// Candles consumed before the first output point
    pub fn lookback(&self, config: &IndicatorConfig) -> usize {
        match self {
            IndicatorKind::Rsi => config.rsi_period,
            IndicatorKind::Macd => config.macd_slow.saturating_sub(1),
            IndicatorKind::Stochastic => config.stochastic_period.saturating_sub(1),
            IndicatorKind::Bollinger => config.bollinger_period.saturating_sub(1),
        }
    }

    fn compute_fn(&self) -> IndicatorFn {
        match self {
            IndicatorKind::Rsi => calculate_rsi,
            IndicatorKind::Macd => calculate_macd,
            IndicatorKind::Stochastic => calculate_stochastic,
            IndicatorKind::Bollinger => bollinger_points,
        }
    }

    /// Whether values live on a fixed 0..100 scale (drawn in a separate
    /// panel) rather than on the price axis
    pub fn is_oscillator(&self) -> bool {
        matches!(self, IndicatorKind::Rsi | IndicatorKind::Stochastic)
    }
}

/// Compute one indicator, surfacing parameter errors
pub fn try_compute_indicator(
    kind: IndicatorKind,
    candles: &[Candle],
    config: &IndicatorConfig,
) -> Result<Vec<IndicatorPoint>, IndicatorError> {
    (kind.compute_fn())(candles, config)
}

/// Compute one indicator; errors are logged and yield no points
pub fn compute_indicator(
    kind: IndicatorKind,
    candles: &[Candle],
    config: &IndicatorConfig,
) -> Vec<IndicatorPoint> {
    match try_compute_indicator(kind, candles, config) {
        Ok(points) => points,
        Err(e) => {
            warn!(indicator = kind.name(), error = %e, "indicator computation skipped");
            Vec::new()
        }
    }
}
