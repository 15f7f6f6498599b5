use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelType {
    Support,
    Resistance,
}

impl LevelType {
    pub fn label(&self) -> &'static str {
        match self {
            LevelType::Support => "Support",
            LevelType::Resistance => "Resistance",
        }
    }
}

/// Price band around a strong level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub upper: f64,
    pub lower: f64,
}

impl Zone {
    pub fn contains(&self, price: f64) -> bool {
        price >= self.lower && price <= self.upper
    }
}

/// Clustered support or resistance level.
///
/// `strength` always equals `touches.len()`; `zone` is only set once the
/// level has enough touches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportResistanceLevel {
    pub price: f64,
    #[serde(rename = "type")]
    pub level_type: LevelType,
    pub strength: usize,
    pub touches: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<Zone>,
    pub is_psychological: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SupportResistanceLevel {
    /// Text for the level: its description, or type and price when unset
    pub fn summary(&self) -> String {
        match &self.description {
            Some(description) => description.clone(),
            None => format!("{} at {:.4}", self.level_type.label(), self.price),
        }
    }
}

/// Price moving away from a level right after touching it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounce {
    pub level_price: f64,
    pub level_type: LevelType,
    /// Index of the touching candle
    pub index: usize,
    pub time: DateTime<Utc>,
    /// Distance travelled by the next close, in units of that candle's range
    pub strength: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendLine {
    pub start_price: f64,
    pub end_price: f64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub start_index: usize,
    pub end_index: usize,
    #[serde(rename = "type")]
    pub direction: TrendDirection,
}

impl TrendLine {
    pub fn slope_per_candle(&self) -> f64 {
        let span = self.end_index.saturating_sub(self.start_index);
        if span == 0 {
            return 0.0;
        }
        (self.end_price - self.start_price) / span as f64
    }

    /// Price on the line at a candle index (extrapolated outside the anchors)
    pub fn price_at(&self, index: usize) -> f64 {
        let offset = index as f64 - self.start_index as f64;
        self.start_price + self.slope_per_candle() * offset
    }
}
