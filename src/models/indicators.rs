use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Buy,
    Sell,
    Neutral,
}

/// One evaluated indicator value, aligned with candle `index`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    pub time: DateTime<Utc>,
    pub index: usize,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<Signal>,
}

impl IndicatorPoint {
    pub fn new(time: DateTime<Utc>, index: usize, value: f64, signal: Signal) -> Self {
        Self {
            time,
            index,
            value,
            signal: Some(signal),
        }
    }
}

/// Bollinger bands at one candle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerPoint {
    pub time: DateTime<Utc>,
    pub index: usize,
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    pub close: f64,
    pub signal: Signal,
}

impl From<BollingerPoint> for IndicatorPoint {
    fn from(point: BollingerPoint) -> Self {
        IndicatorPoint::new(point.time, point.index, point.middle, point.signal)
    }
}
