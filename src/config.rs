//! Configuration for the analysis pipeline and chart display.
//!
//! Analysis knobs have defaults tuned for forex-style prices (around 1.0) and
//! can be overridden from the environment or from lesson JSON. Display
//! settings resolve explicit props first, then lesson config, then defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use crate::error::ChartError;
use crate::indicators::IndicatorKind;
use crate::patterns::PatternKind;

/// Current deployment environment (`APP_ENV`), defaults to `development`
pub fn get_environment() -> String {
    dotenvy::dotenv().ok();
    env::var("APP_ENV").unwrap_or_else(|_| "development".to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub rsi_period: usize,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub macd_fast: usize,
    pub macd_slow: usize,
    /// Display multiplier applied to the EMA difference
    pub macd_scale: f64,
    pub stochastic_period: usize,
    pub stochastic_oversold: f64,
    pub stochastic_overbought: f64,
    pub bollinger_period: usize,
    pub bollinger_std_dev: f64,
    /// Indicators computed by the analysis pass
    pub enabled: Vec<IndicatorKind>,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            macd_fast: 12,
            macd_slow: 26,
            macd_scale: 10_000.0,
            stochastic_period: 14,
            stochastic_oversold: 20.0,
            stochastic_overbought: 80.0,
            bollinger_period: 20,
            bollinger_std_dev: 2.0,
            enabled: IndicatorKind::all().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Kinds scanned by `detect_patterns`; harmonic kinds are opt-in
    pub kinds: Vec<PatternKind>,
    pub max_patterns: usize,
    /// Window used by the double top/bottom, head-and-shoulders, flag,
    /// pennant and triangle recognizers
    pub chart_window: usize,
    /// Window split into five segments by the harmonic recognizers
    pub harmonic_window: usize,
    /// Max distance between twin peaks/troughs
    pub peak_tolerance: f64,
    /// Min drop from the peaks to the trough between them
    pub min_trough_depth: f64,
    /// Min height of the head above both shoulders
    pub min_head_height: f64,
    /// Max distance between the two shoulders
    pub shoulder_tolerance: f64,
    /// Min absolute move of a flag/pennant pole
    pub min_pole_move: f64,
    /// Engulfing body must exceed the previous body by this factor
    pub engulfing_ratio: f64,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            kinds: PatternKind::all()
                .iter()
                .copied()
                .filter(|kind| !kind.is_harmonic())
                .collect(),
            max_patterns: 3,
            chart_window: 20,
            harmonic_window: 25,
            peak_tolerance: 0.0005,
            min_trough_depth: 0.001,
            min_head_height: 0.001,
            shoulder_tolerance: 0.001,
            min_pole_move: 0.003,
            engulfing_ratio: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub lookback: usize,
    pub tolerance: f64,
    /// Touches needed before a level gets a zone
    pub zone_min_strength: usize,
    pub max_levels_per_side: usize,
    pub psychological_levels: Vec<f64>,
    /// Fraction of the next candle's range the close must travel away from
    /// the level for a touch to count as a bounce
    pub bounce_threshold: f64,
    pub max_bounces: usize,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            lookback: 5,
            tolerance: 0.0005,
            zone_min_strength: 3,
            max_levels_per_side: 4,
            psychological_levels: vec![
                1.0, 1.05, 1.1, 1.15, 1.2, 1.25, 1.3, 1.35, 1.4, 1.45, 1.5,
            ],
            bounce_threshold: 0.3,
            max_bounces: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    pub lookback: usize,
    pub up: bool,
    pub down: bool,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            lookback: 2,
            up: true,
            down: true,
        }
    }
}

/// Everything the analysis pass depends on besides the series itself
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub indicators: IndicatorConfig,
    pub patterns: PatternConfig,
    pub levels: LevelConfig,
    pub trends: TrendConfig,
}

impl AnalysisConfig {
    /// Defaults with overrides from `CHART_*` environment variables.
    /// Unparsable values are ignored.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let mut config = Self::default();
        if let Some(lookback) = env_parse::<usize>("CHART_SR_LOOKBACK") {
            config.levels.lookback = lookback;
        }
        if let Some(tolerance) = env_parse::<f64>("CHART_SR_TOLERANCE") {
            config.levels.tolerance = tolerance;
        }
        if let Some(max) = env_parse::<usize>("CHART_MAX_PATTERNS") {
            config.patterns.max_patterns = max;
        }
        if let Some(max) = env_parse::<usize>("CHART_MAX_LEVELS_PER_SIDE") {
            config.levels.max_levels_per_side = max;
        }
        if let Some(max) = env_parse::<usize>("CHART_MAX_BOUNCES") {
            config.levels.max_bounces = max;
        }
        config
    }

    pub fn from_json(json: &str) -> Result<Self, ChartError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        let ind = &self.indicators;
        if ind.rsi_period == 0 || ind.stochastic_period == 0 || ind.bollinger_period == 0 {
            return Err(ChartError::InvalidConfig(
                "indicator periods must be at least 1".to_string(),
            ));
        }
        if ind.macd_fast == 0 || ind.macd_fast >= ind.macd_slow {
            return Err(ChartError::InvalidConfig(format!(
                "macd fast period {} must be positive and below slow period {}",
                ind.macd_fast, ind.macd_slow
            )));
        }
        if self.levels.tolerance <= 0.0 || !self.levels.tolerance.is_finite() {
            return Err(ChartError::InvalidConfig(
                "level tolerance must be a positive number".to_string(),
            ));
        }
        if self.patterns.chart_window < 6 || self.patterns.harmonic_window < 5 {
            return Err(ChartError::InvalidConfig(
                "pattern windows are too small".to_string(),
            ));
        }
        Ok(())
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Resolved display settings for one chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub timeframe: String,
    pub show_levels: bool,
    pub show_volume: bool,
    pub show_patterns: bool,
    pub interactive: bool,
    pub height: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            timeframe: "1h".to_string(),
            show_levels: true,
            show_volume: false,
            show_patterns: true,
            interactive: true,
            height: 400.0,
        }
    }
}

/// Partial display settings, as given by a consumer or a lesson
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplayOverrides {
    pub timeframe: Option<String>,
    pub show_levels: Option<bool>,
    pub show_volume: Option<bool>,
    pub show_patterns: Option<bool>,
    pub interactive: Option<bool>,
    pub height: Option<f64>,
}

impl DisplayConfig {
    /// Explicit props win over lesson config, which wins over defaults
    pub fn resolve(explicit: &DisplayOverrides, lesson: Option<&DisplayOverrides>) -> Self {
        let defaults = Self::default();
        let lesson = lesson.cloned().unwrap_or_default();
        Self {
            timeframe: explicit
                .timeframe
                .clone()
                .or(lesson.timeframe)
                .unwrap_or(defaults.timeframe),
            show_levels: explicit
                .show_levels
                .or(lesson.show_levels)
                .unwrap_or(defaults.show_levels),
            show_volume: explicit
                .show_volume
                .or(lesson.show_volume)
                .unwrap_or(defaults.show_volume),
            show_patterns: explicit
                .show_patterns
                .or(lesson.show_patterns)
                .unwrap_or(defaults.show_patterns),
            interactive: explicit
                .interactive
                .or(lesson.interactive)
                .unwrap_or(defaults.interactive),
            height: explicit
                .height
                .or(lesson.height)
                .filter(|h| h.is_finite() && *h > 0.0)
                .unwrap_or(defaults.height),
        }
    }
}
