//! Candlestick, chart and harmonic pattern detection.
//!
//! Every [`PatternKind`] has one entry in [`RECOGNIZERS`]: the window it needs
//! and a pure predicate over that window. Scanning, de-duplication and the
//! result cap live here; the recognizers only look at their slice.

pub mod candlestick;
pub mod chart;
pub mod harmonic;

use tracing::debug;

use crate::config::PatternConfig;
use crate::models::{Candle, HarmonicPoints, HarmonicRatios, PatternBias, PatternCategory};

pub use crate::models::{PatternKind, PatternMatch};

/// What a recognizer reports about its window. Indices inside
/// `harmonic` are relative to the window.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub bias: PatternBias,
    pub description: String,
    pub harmonic: Option<(HarmonicPoints, HarmonicRatios)>,
}

impl Detection {
    pub fn new(bias: PatternBias, description: impl Into<String>) -> Self {
        Self {
            bias,
            description: description.into(),
            harmonic: None,
        }
    }

    /// Detection carrying the kind's usual bias
    pub fn typical(kind: PatternKind, description: impl Into<String>) -> Self {
        Self::new(kind.bias(), description)
    }
}

pub type DetectFn = fn(&[Candle], &PatternConfig) -> Option<Detection>;

pub struct Recognizer {
    pub kind: PatternKind,
    pub window: fn(&PatternConfig) -> usize,
    pub detect: DetectFn,
}

fn one(_: &PatternConfig) -> usize {
    1
}

fn two(_: &PatternConfig) -> usize {
    2
}

fn three(_: &PatternConfig) -> usize {
    3
}

fn chart_window(config: &PatternConfig) -> usize {
    config.chart_window.max(chart::MIN_WINDOW)
}

fn harmonic_window(config: &PatternConfig) -> usize {
    config.harmonic_window.max(harmonic::MIN_WINDOW)
}

pub const RECOGNIZERS: &[Recognizer] = &[
    Recognizer { kind: PatternKind::Hammer, window: one, detect: candlestick::hammer },
    Recognizer { kind: PatternKind::InvertedHammer, window: one, detect: candlestick::inverted_hammer },
    Recognizer { kind: PatternKind::Doji, window: one, detect: candlestick::doji },
    Recognizer { kind: PatternKind::BullishEngulfing, window: two, detect: candlestick::bullish_engulfing },
    Recognizer { kind: PatternKind::BearishEngulfing, window: two, detect: candlestick::bearish_engulfing },
    Recognizer { kind: PatternKind::MorningStar, window: three, detect: candlestick::morning_star },
    Recognizer { kind: PatternKind::EveningStar, window: three, detect: candlestick::evening_star },
    Recognizer { kind: PatternKind::InsideBar, window: two, detect: candlestick::inside_bar },
    Recognizer { kind: PatternKind::OutsideBar, window: two, detect: candlestick::outside_bar },
    Recognizer { kind: PatternKind::DoubleTop, window: chart_window, detect: chart::double_top },
    Recognizer { kind: PatternKind::DoubleBottom, window: chart_window, detect: chart::double_bottom },
    Recognizer { kind: PatternKind::HeadAndShoulders, window: chart_window, detect: chart::head_and_shoulders },
    Recognizer { kind: PatternKind::Flag, window: chart_window, detect: chart::flag },
    Recognizer { kind: PatternKind::Pennant, window: chart_window, detect: chart::pennant },
    Recognizer { kind: PatternKind::Triangle, window: chart_window, detect: chart::triangle },
    Recognizer { kind: PatternKind::Butterfly, window: harmonic_window, detect: harmonic::butterfly },
    Recognizer { kind: PatternKind::Bat, window: harmonic_window, detect: harmonic::bat },
    Recognizer { kind: PatternKind::Crab, window: harmonic_window, detect: harmonic::crab },
    Recognizer { kind: PatternKind::Shark, window: harmonic_window, detect: harmonic::shark },
    Recognizer { kind: PatternKind::FiveZero, window: harmonic_window, detect: harmonic::five_zero },
];

pub fn recognizer(kind: PatternKind) -> Option<&'static Recognizer> {
    RECOGNIZERS.iter().find(|r| r.kind == kind)
}

/// Minimum number of candles `kind` needs
pub fn min_window(kind: PatternKind, config: &PatternConfig) -> usize {
    recognizer(kind).map_or(usize::MAX, |r| (r.window)(config))
}

/// Window start offsets scanned for a category
fn window_starts(category: PatternCategory, len: usize, window: usize) -> Vec<usize> {
    if window == 0 || len < window {
        return Vec::new();
    }
    let last = len - window;
    match category {
        PatternCategory::Candlestick => (0..=last).collect(),
        PatternCategory::Chart => {
            let step = (window / 2).max(1);
            let mut starts: Vec<usize> = (0..=last).step_by(step).collect();
            if starts.last() != Some(&last) {
                starts.push(last);
            }
            starts
        }
        PatternCategory::Harmonic => vec![last],
    }
}

/// Every match of one kind, oldest first. Overlapping chart and harmonic
/// windows collapse onto the earliest one; candlestick hits are all kept.
pub fn detect_pattern(kind: PatternKind, candles: &[Candle], config: &PatternConfig) -> Vec<PatternMatch> {
    let Some(recognizer) = recognizer(kind) else {
        return Vec::new();
    };
    let window = (recognizer.window)(config);
    if candles.len() < window {
        debug!(?kind, candles = candles.len(), required = window, "not enough candles for pattern");
        return Vec::new();
    }

    let collapse = kind.category() != PatternCategory::Candlestick;
    let mut matches: Vec<PatternMatch> = Vec::new();
    for start in window_starts(kind.category(), candles.len(), window) {
        let end = (start + window).min(candles.len());
        let slice = &candles[start..end];
        let Some(detection) = (recognizer.detect)(slice, config) else {
            continue;
        };
        let found = to_match(kind, candles, start, end - 1, detection);
        if collapse && matches.last().is_some_and(|previous| previous.overlaps(&found)) {
            continue;
        }
        matches.push(found);
    }
    matches
}

fn to_match(kind: PatternKind, candles: &[Candle], start: usize, end: usize, detection: Detection) -> PatternMatch {
    let (harmonic, ratios) = match detection.harmonic {
        Some((mut points, ratios)) => {
            for index in points.indices.iter_mut() {
                *index += start;
            }
            (Some(points), Some(ratios))
        }
        None => (None, None),
    };
    PatternMatch {
        kind,
        start_time: candles[start].time,
        end_time: candles[end].time,
        start_index: start,
        end_index: end,
        bias: detection.bias,
        description: detection.description,
        harmonic,
        ratios,
    }
}

/// Scan all configured kinds and keep the most recent `max_patterns`.
///
/// When several kinds claim the exact same span, the one listed first in
/// [`RECOGNIZERS`] wins (a hammer is not also reported as a doji).
pub fn detect_patterns(candles: &[Candle], config: &PatternConfig) -> Vec<PatternMatch> {
    let mut all: Vec<PatternMatch> = Vec::new();

    for recognizer in RECOGNIZERS {
        if !config.kinds.contains(&recognizer.kind) {
            continue;
        }
        for found in detect_pattern(recognizer.kind, candles, config) {
            if all.iter().any(|m| m.span() == found.span()) {
                continue;
            }
            all.push(found);
        }
    }

    all.sort_by(|a, b| b.end_index.cmp(&a.end_index).then(a.start_index.cmp(&b.start_index)));
    all.truncate(config.max_patterns);
    all
}
