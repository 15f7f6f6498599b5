//! One analysis pass over a series, and the cache that keeps it from being
//! recomputed on every interaction frame.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, trace, warn};

use crate::config::AnalysisConfig;
use crate::indicators::structure::{calculate_support_resistance, calculate_trend_lines, detect_bounces};
use crate::indicators::volatility::calculate_bollinger_bands;
use crate::indicators::{compute_indicator, IndicatorKind};
use crate::models::{
    BollingerPoint, Bounce, CandleSeries, IndicatorPoint, PatternMatch, SeriesId,
    SupportResistanceLevel, TrendLine,
};
use crate::patterns::detect_patterns;

/// Everything derived from one series under one configuration
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChartAnalysis {
    pub indicators: BTreeMap<IndicatorKind, Vec<IndicatorPoint>>,
    pub bollinger: Vec<BollingerPoint>,
    pub patterns: Vec<PatternMatch>,
    pub levels: Vec<SupportResistanceLevel>,
    pub bounces: Vec<Bounce>,
    pub trend_lines: Vec<TrendLine>,
}

impl ChartAnalysis {
    pub fn indicator(&self, kind: IndicatorKind) -> &[IndicatorPoint] {
        self.indicators.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Run every analytic over the series
pub fn analyze(series: &CandleSeries, config: &AnalysisConfig) -> ChartAnalysis {
    let candles = series.candles();

    let mut indicators = BTreeMap::new();
    let mut bollinger = Vec::new();
    for &kind in &config.indicators.enabled {
        if kind == IndicatorKind::Bollinger {
            // Bands and the middle-line series come from one pass
            bollinger = match calculate_bollinger_bands(candles, &config.indicators) {
                Ok(bands) => bands,
                Err(e) => {
                    warn!(indicator = kind.name(), error = %e, "indicator computation skipped");
                    Vec::new()
                }
            };
            indicators.insert(kind, bollinger.iter().copied().map(IndicatorPoint::from).collect());
        } else {
            indicators.insert(kind, compute_indicator(kind, candles, &config.indicators));
        }
    }

    let levels = calculate_support_resistance(candles, &config.levels);
    let bounces = detect_bounces(&levels, candles, &config.levels);

    let analysis = ChartAnalysis {
        indicators,
        bollinger,
        patterns: detect_patterns(candles, &config.patterns),
        levels,
        bounces,
        trend_lines: calculate_trend_lines(candles, &config.trends),
    };

    debug!(
        series = series.id().0,
        candles = candles.len(),
        patterns = analysis.patterns.len(),
        levels = analysis.levels.len(),
        trend_lines = analysis.trend_lines.len(),
        "chart analysis computed"
    );
    analysis
}

struct CacheEntry {
    series: SeriesId,
    config: AnalysisConfig,
    analysis: Arc<ChartAnalysis>,
}

/// Single-entry memo keyed by series identity and configuration.
///
/// Pan and zoom never touch the key, so they never trigger a recompute.
#[derive(Default)]
pub struct AnalysisCache {
    entry: Option<CacheEntry>,
    hits: u64,
    misses: u64,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(&mut self, series: &CandleSeries, config: &AnalysisConfig) -> Arc<ChartAnalysis> {
        if let Some(entry) = &self.entry {
            if entry.series == series.id() && entry.config == *config {
                self.hits += 1;
                trace!(series = series.id().0, "analysis cache hit");
                return Arc::clone(&entry.analysis);
            }
        }

        self.misses += 1;
        let analysis = Arc::new(analyze(series, config));
        self.entry = Some(CacheEntry {
            series: series.id(),
            config: config.clone(),
            analysis: Arc::clone(&analysis),
        });
        analysis
    }

    /// Cached result for this key, without computing
    pub fn peek(&self, series: SeriesId, config: &AnalysisConfig) -> Option<Arc<ChartAnalysis>> {
        self.entry
            .as_ref()
            .filter(|e| e.series == series && e.config == *config)
            .map(|e| Arc::clone(&e.analysis))
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
