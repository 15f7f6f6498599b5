//! Crate-level error type

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("candle series is empty")]
    EmptySeries,

    #[error("invalid candle at index {index}: {reason}")]
    InvalidCandle { index: usize, reason: String },

    #[error("candle time does not increase at index {index}")]
    NonIncreasingTime { index: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("data source error: {0}")]
    DataSource(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
