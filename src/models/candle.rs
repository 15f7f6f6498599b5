use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::ChartError;

/// One OHLCV observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub volume: Option<f64>,
}

impl Candle {
    pub fn new(open: f64, high: f64, low: f64, close: f64, volume: f64, time: DateTime<Utc>) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume: Some(volume),
        }
    }

    /// Candle without volume
    pub fn ohlc(open: f64, high: f64, low: f64, close: f64, time: DateTime<Utc>) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume: None,
        }
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn body_size(&self) -> f64 {
        (self.close - self.open).abs()
    }

    pub fn upper_shadow(&self) -> f64 {
        self.high - self.open.max(self.close)
    }

    pub fn lower_shadow(&self) -> f64 {
        self.open.min(self.close) - self.low
    }

    pub fn total_range(&self) -> f64 {
        self.high - self.low
    }

    pub fn body_top(&self) -> f64 {
        self.open.max(self.close)
    }

    pub fn body_bottom(&self) -> f64 {
        self.open.min(self.close)
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// Midpoint of the body
    pub fn midpoint(&self) -> f64 {
        (self.open + self.close) / 2.0
    }

    /// Check the OHLC invariants
    pub fn validate(&self) -> Result<(), String> {
        let prices = [self.open, self.high, self.low, self.close];
        if prices.iter().any(|p| !p.is_finite()) {
            return Err("non-finite price".to_string());
        }
        if self.high < self.open.max(self.close) {
            return Err(format!(
                "high {} below body top {}",
                self.high,
                self.body_top()
            ));
        }
        if self.low > self.open.min(self.close) {
            return Err(format!(
                "low {} above body bottom {}",
                self.low,
                self.body_bottom()
            ));
        }
        if let Some(volume) = self.volume {
            if !volume.is_finite() || volume < 0.0 {
                return Err(format!("invalid volume {}", volume));
            }
        }
        Ok(())
    }
}

/// Content hash of a series, used as its identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesId(pub u64);

impl SeriesId {
    pub fn of(candles: &[Candle]) -> Self {
        let mut hasher = DefaultHasher::new();
        candles.len().hash(&mut hasher);
        for candle in candles {
            candle.time.timestamp_millis().hash(&mut hasher);
            candle.open.to_bits().hash(&mut hasher);
            candle.high.to_bits().hash(&mut hasher);
            candle.low.to_bits().hash(&mut hasher);
            candle.close.to_bits().hash(&mut hasher);
            candle.volume.map(f64::to_bits).hash(&mut hasher);
        }
        Self(hasher.finish())
    }
}

/// Validated, strictly time-ordered candle sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandleSeries {
    id: SeriesId,
    candles: Vec<Candle>,
}

impl CandleSeries {
    pub fn new(candles: Vec<Candle>) -> Result<Self, ChartError> {
        if candles.is_empty() {
            return Err(ChartError::EmptySeries);
        }
        for (index, candle) in candles.iter().enumerate() {
            candle
                .validate()
                .map_err(|reason| ChartError::InvalidCandle { index, reason })?;
            if index > 0 && candle.time <= candles[index - 1].time {
                return Err(ChartError::NonIncreasingTime { index });
            }
        }
        Ok(Self::from_unchecked(candles))
    }

    /// Wrap candles that are already known to satisfy the invariants
    pub fn from_unchecked(candles: Vec<Candle>) -> Self {
        let id = SeriesId::of(&candles);
        Self { id, candles }
    }

    pub fn id(&self) -> SeriesId {
        self.id
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Candle> {
        self.candles.get(index)
    }

    pub fn into_candles(self) -> Vec<Candle> {
        self.candles
    }
}

impl AsRef<[Candle]> for CandleSeries {
    fn as_ref(&self) -> &[Candle] {
        &self.candles
    }
}

/// Candle interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    M1,
    M5,
    M15,
    M30,
    H1,
    H4,
    D1,
}

impl Timeframe {
    pub fn minutes(&self) -> u32 {
        match self {
            Timeframe::M1 => 1,
            Timeframe::M5 => 5,
            Timeframe::M15 => 15,
            Timeframe::M30 => 30,
            Timeframe::H1 => 60,
            Timeframe::H4 => 240,
            Timeframe::D1 => 1440,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::M1 => "1m",
            Timeframe::M5 => "5m",
            Timeframe::M15 => "15m",
            Timeframe::M30 => "30m",
            Timeframe::H1 => "1h",
            Timeframe::H4 => "4h",
            Timeframe::D1 => "1d",
        }
    }
}

impl FromStr for Timeframe {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1m" => Ok(Timeframe::M1),
            "5m" => Ok(Timeframe::M5),
            "15m" => Ok(Timeframe::M15),
            "30m" => Ok(Timeframe::M30),
            "1h" | "60m" => Ok(Timeframe::H1),
            "4h" => Ok(Timeframe::H4),
            "1d" | "d" => Ok(Timeframe::D1),
            other => Err(ChartError::InvalidConfig(format!(
                "unknown timeframe '{}'",
                other
            ))),
        }
    }
}
