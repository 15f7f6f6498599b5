//! Synthetic candle series, used when a chart has no real data.
//!
//! A slow `trend` term is resampled every [`TREND_RESAMPLE_EVERY`] candles and
//! blended into `momentum` by exponential smoothing. Each close is the
//! previous close plus momentum plus noise; shadows are added on top of the
//! body independently, so the OHLC invariants hold by construction.

pub mod seeded;

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::{Candle, CandleSeries};

pub use seeded::{generate_seeded, seed_from_points};

pub const TREND_RESAMPLE_EVERY: usize = 10;
const MOMENTUM_DECAY: f64 = 0.7;
const TREND_WEIGHT: f64 = 0.3;
const SHADOW_SCALE: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SyntheticParams {
    pub count: usize,
    pub base_price: f64,
    pub volatility: f64,
    pub timeframe_minutes: u32,
    pub start: DateTime<Utc>,
    /// Volume per unit of body size
    pub volume_scale: f64,
    pub min_volume: f64,
}

impl Default for SyntheticParams {
    fn default() -> Self {
        Self {
            count: 100,
            base_price: 1.1,
            volatility: 0.001,
            timeframe_minutes: 60,
            start: default_start(),
            volume_scale: 1_000_000.0,
            min_volume: 100.0,
        }
    }
}

impl SyntheticParams {
    pub fn new(count: usize, base_price: f64, volatility: f64, timeframe_minutes: u32) -> Self {
        Self {
            count,
            base_price,
            volatility,
            timeframe_minutes,
            ..Self::default()
        }
    }

    pub fn with_start(mut self, start: DateTime<Utc>) -> Self {
        self.start = start;
        self
    }
}

/// Fixed anchor so that generated fixtures do not depend on the wall clock
pub fn default_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Generate a series from any random source
pub fn generate_series<R: Rng + ?Sized>(params: &SyntheticParams, rng: &mut R) -> CandleSeries {
    CandleSeries::from_unchecked(generate_candles(params, rng, None))
}

/// Generate a series from OS entropy
pub fn generate_random(params: &SyntheticParams) -> CandleSeries {
    let mut rng = StdRng::from_entropy();
    generate_series(params, &mut rng)
}

/// Core recursion. `targets`, when given, holds one target price per candle
/// that the momentum term is pulled towards.
pub(crate) fn generate_candles<R: Rng + ?Sized>(
    params: &SyntheticParams,
    rng: &mut R,
    targets: Option<&[f64]>,
) -> Vec<Candle> {
    let mut candles = Vec::with_capacity(params.count);
    let volatility = params.volatility.abs();
    let step = Duration::minutes(i64::from(params.timeframe_minutes.max(1)));

    let mut trend = 0.0;
    let mut momentum = 0.0;
    let mut previous_close = params.base_price;

    for i in 0..params.count {
        if i % TREND_RESAMPLE_EVERY == 0 {
            trend = (rng.gen::<f64>() - 0.5) * volatility;
        }
        momentum = momentum * MOMENTUM_DECAY + trend * TREND_WEIGHT;

        let drift = targets
            .and_then(|t| t.get(i))
            .map(|target| (target - previous_close) * 0.5)
            .unwrap_or(0.0);

        let noise = (rng.gen::<f64>() - 0.5) * volatility;
        let open = previous_close;
        let close = open + momentum + drift + noise;

        let high = open.max(close) + rng.gen::<f64>() * volatility * SHADOW_SCALE;
        let low = open.min(close) - rng.gen::<f64>() * volatility * SHADOW_SCALE;
        let volume = (close - open).abs() * params.volume_scale + params.min_volume;

        let time = params.start + step * i as i32;
        candles.push(Candle::new(open, high, low, close, volume, time));
        previous_close = close;
    }

    candles
}
