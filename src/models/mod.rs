//! Shared data models spanning the analysis layers.

pub mod candle;
pub mod indicators;
pub mod levels;
pub mod patterns;

pub use candle::{Candle, CandleSeries, SeriesId, Timeframe};
pub use indicators::{BollingerPoint, IndicatorPoint, Signal};
pub use levels::{Bounce, LevelType, SupportResistanceLevel, TrendDirection, TrendLine, Zone};
pub use patterns::{
    HarmonicPoints, HarmonicRatios, PatternBias, PatternCategory, PatternKind, PatternMatch,
};
