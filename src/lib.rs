//! Chart analysis and interaction engine for the trading school app.
//!
//! A candle series (loaded, supplied or synthesized) feeds the indicator
//! engine, the pattern detector, the support/resistance extractor and the
//! trend line builder. The viewport maps their outputs to screen space and the
//! gesture controller drives pan, zoom and selection over it.

pub mod analysis;
pub mod common;
pub mod config;
pub mod error;
pub mod generator;
pub mod indicators;
pub mod interaction;
pub mod logging;
pub mod models;
pub mod patterns;
pub mod reveal;
pub mod services;
pub mod viewport;

pub use analysis::{analyze, AnalysisCache, ChartAnalysis};
pub use error::ChartError;
pub use models::{Candle, CandleSeries, SeriesId};
