//! Lesson-side chart data, and resolution of the series a chart displays.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::config::{DisplayConfig, DisplayOverrides};
use crate::error::ChartError;
use crate::generator::{generate_random, generate_seeded, SyntheticParams};
use crate::models::{Candle, CandleSeries, Timeframe};

/// Which surface is asking for the chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumerKind {
    Lesson,
    Quiz,
    PredictionGame,
    Assistant,
}

/// Per-lesson chart settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LessonChartConfig {
    pub display: DisplayOverrides,
    /// Parameters for the synthetic fallback series
    pub synthetic: Option<SyntheticParams>,
    /// Prices the synthetic series should pass through
    pub points: Option<Vec<f64>>,
}

pub trait LessonDataSource {
    fn chart_config(
        &self,
        lesson_id: &str,
        consumer: ConsumerKind,
    ) -> Result<Option<LessonChartConfig>, ChartError>;

    fn candlestick_data(
        &self,
        lesson_id: &str,
        consumer: ConsumerKind,
    ) -> Result<Option<Vec<Candle>>, ChartError>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LessonEntry {
    pub config: Option<LessonChartConfig>,
    pub candles: Option<Vec<Candle>>,
    /// Consumers allowed to see this entry; empty means all
    pub consumers: Vec<ConsumerKind>,
}

impl LessonEntry {
    fn serves(&self, consumer: ConsumerKind) -> bool {
        self.consumers.is_empty() || self.consumers.contains(&consumer)
    }
}

/// Lesson data held in memory, typically loaded from bundled JSON
#[derive(Debug, Clone, Default)]
pub struct InMemoryLessonSource {
    lessons: HashMap<String, LessonEntry>,
}

impl InMemoryLessonSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `{ "<lesson id>": { "config": ..., "candles": [...] } }`
    pub fn from_json(json: &str) -> Result<Self, ChartError> {
        let lessons: HashMap<String, LessonEntry> = serde_json::from_str(json)?;
        debug!(lessons = lessons.len(), "lesson data loaded");
        Ok(Self { lessons })
    }

    pub fn insert(&mut self, lesson_id: impl Into<String>, entry: LessonEntry) {
        self.lessons.insert(lesson_id.into(), entry);
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    fn entry(&self, lesson_id: &str, consumer: ConsumerKind) -> Option<&LessonEntry> {
        self.lessons.get(lesson_id).filter(|e| e.serves(consumer))
    }
}

impl LessonDataSource for InMemoryLessonSource {
    fn chart_config(
        &self,
        lesson_id: &str,
        consumer: ConsumerKind,
    ) -> Result<Option<LessonChartConfig>, ChartError> {
        Ok(self.entry(lesson_id, consumer).and_then(|e| e.config.clone()))
    }

    fn candlestick_data(
        &self,
        lesson_id: &str,
        consumer: ConsumerKind,
    ) -> Result<Option<Vec<Candle>>, ChartError> {
        Ok(self.entry(lesson_id, consumer).and_then(|e| e.candles.clone()))
    }
}

/// Where the resolved series came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesOrigin {
    Explicit,
    Lesson,
    Seeded,
    Synthetic,
}

#[derive(Debug, Clone)]
pub struct ResolvedChart {
    pub series: CandleSeries,
    pub display: DisplayConfig,
    pub origin: SeriesOrigin,
}

/// Decide what a chart shows.
///
/// Series: explicit candles, then lesson candles, then a series seeded from
/// the lesson's points, then a random synthetic series. Display: explicit
/// overrides, then lesson overrides, then defaults. Data source failures are
/// logged and treated as missing data.
pub fn resolve_chart(
    source: Option<&dyn LessonDataSource>,
    lesson_id: Option<&str>,
    consumer: ConsumerKind,
    explicit_series: Option<CandleSeries>,
    explicit_display: &DisplayOverrides,
    fallback: &SyntheticParams,
) -> ResolvedChart {
    let lookup = source.zip(lesson_id);

    let lesson_config = lookup.and_then(|(source, id)| match source.chart_config(id, consumer) {
        Ok(config) => config,
        Err(e) => {
            warn!(lesson = id, error = %e, "failed to load lesson chart config");
            None
        }
    });

    let display = DisplayConfig::resolve(explicit_display, lesson_config.as_ref().map(|c| &c.display));

    if let Some(series) = explicit_series.filter(|s| !s.is_empty()) {
        return ResolvedChart {
            series,
            display,
            origin: SeriesOrigin::Explicit,
        };
    }

    if let Some(series) = lookup.and_then(|(source, id)| load_lesson_series(source, id, consumer)) {
        return ResolvedChart {
            series,
            display,
            origin: SeriesOrigin::Lesson,
        };
    }

    let mut params = lesson_config
        .as_ref()
        .and_then(|c| c.synthetic.clone())
        .unwrap_or_else(|| fallback.clone());
    if let Ok(timeframe) = display.timeframe.parse::<Timeframe>() {
        params.timeframe_minutes = timeframe.minutes();
    }

    let points = lesson_config
        .as_ref()
        .and_then(|c| c.points.as_deref())
        .filter(|p| !p.is_empty());
    let (series, origin) = match points {
        Some(points) => (generate_seeded(points, &params), SeriesOrigin::Seeded),
        None => (generate_random(&params), SeriesOrigin::Synthetic),
    };
    debug!(
        lesson = lesson_id.unwrap_or("-"),
        candles = series.len(),
        origin = ?origin,
        "using synthetic series"
    );

    ResolvedChart {
        series,
        display,
        origin,
    }
}

fn load_lesson_series(source: &dyn LessonDataSource, lesson_id: &str, consumer: ConsumerKind) -> Option<CandleSeries> {
    let candles = match source.candlestick_data(lesson_id, consumer) {
        Ok(Some(candles)) if !candles.is_empty() => candles,
        Ok(_) => return None,
        Err(e) => {
            warn!(lesson = lesson_id, error = %e, "failed to load lesson candles");
            return None;
        }
    };
    match CandleSeries::new(candles) {
        Ok(series) => Some(series),
        Err(e) => {
            warn!(lesson = lesson_id, error = %e, "lesson candles rejected");
            None
        }
    }
}
