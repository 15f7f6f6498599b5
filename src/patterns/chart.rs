//! Geometric chart patterns.
//!
//! Each recognizer cuts its window into thirds or halves, picks the extreme
//! high/low in each part and checks the shape. Segment bounds are clamped to
//! the window so a short slice can never index out of range.

use super::Detection;
use crate::common::math;
use crate::config::PatternConfig;
use crate::models::{Candle, PatternBias, PatternKind};

pub const MIN_WINDOW: usize = 6;

/// Slack for comparing prices against configured tolerances
const EPSILON: f64 = 1e-12;

/// Convergence required of a triangle's second half relative to its first
const TRIANGLE_CONTRACTION: f64 = 0.6;
/// Max consolidation range relative to the flag/pennant pole
const CONSOLIDATION_RATIO: f64 = 0.5;

fn segment(window: &[Candle], from: usize, to: usize) -> &[Candle] {
    let to = to.min(window.len());
    let from = from.min(to);
    &window[from..to]
}

fn thirds(window: &[Candle]) -> [&[Candle]; 3] {
    let n = window.len();
    [
        segment(window, 0, n / 3),
        segment(window, n / 3, 2 * n / 3),
        segment(window, 2 * n / 3, n),
    ]
}

fn halves(window: &[Candle]) -> [&[Candle]; 2] {
    let n = window.len();
    [segment(window, 0, n / 2), segment(window, n / 2, n)]
}

fn highest(candles: &[Candle]) -> Option<f64> {
    math::max_of(candles.iter().map(|c| c.high))
}

fn lowest(candles: &[Candle]) -> Option<f64> {
    math::min_of(candles.iter().map(|c| c.low))
}

fn range(candles: &[Candle]) -> Option<f64> {
    Some(highest(candles)? - lowest(candles)?)
}

/// Twin peaks within `peak_tolerance` and a trough more than
/// `min_trough_depth` below the lower of the two
pub fn is_double_top(peak1: f64, trough: f64, peak2: f64, config: &PatternConfig) -> bool {
    (peak1 - peak2).abs() <= config.peak_tolerance + EPSILON
        && peak1.min(peak2) - trough > config.min_trough_depth
}

/// Mirror of [`is_double_top`]
pub fn is_double_bottom(trough1: f64, peak: f64, trough2: f64, config: &PatternConfig) -> bool {
    (trough1 - trough2).abs() <= config.peak_tolerance + EPSILON
        && peak - trough1.max(trough2) > config.min_trough_depth
}

pub fn double_top(window: &[Candle], config: &PatternConfig) -> Option<Detection> {
    if window.len() < MIN_WINDOW {
        return None;
    }
    let [left, middle, right] = thirds(window);
    let (peak1, trough, peak2) = (highest(left)?, lowest(middle)?, highest(right)?);
    is_double_top(peak1, trough, peak2, config).then(|| {
        Detection::typical(
            PatternKind::DoubleTop,
            format!(
                "Double top near {:.4} with neckline at {:.4}",
                peak1.max(peak2),
                trough
            ),
        )
    })
}

pub fn double_bottom(window: &[Candle], config: &PatternConfig) -> Option<Detection> {
    if window.len() < MIN_WINDOW {
        return None;
    }
    let [left, middle, right] = thirds(window);
    let (trough1, peak, trough2) = (lowest(left)?, highest(middle)?, lowest(right)?);
    is_double_bottom(trough1, peak, trough2, config).then(|| {
        Detection::typical(
            PatternKind::DoubleBottom,
            format!(
                "Double bottom near {:.4} with neckline at {:.4}",
                trough1.min(trough2),
                peak
            ),
        )
    })
}

pub fn head_and_shoulders(window: &[Candle], config: &PatternConfig) -> Option<Detection> {
    if window.len() < MIN_WINDOW {
        return None;
    }
    let [left, middle, right] = thirds(window);
    let (left_shoulder, head, right_shoulder) = (highest(left)?, highest(middle)?, highest(right)?);
    let matched = head - left_shoulder.max(right_shoulder) > config.min_head_height
        && (left_shoulder - right_shoulder).abs() <= config.shoulder_tolerance + EPSILON;
    matched.then(|| {
        Detection::typical(
            PatternKind::HeadAndShoulders,
            format!(
                "Head and shoulders: head {:.4}, shoulders {:.4} / {:.4}",
                head, left_shoulder, right_shoulder
            ),
        )
    })
}

/// Net open-to-close move over the first half, if it qualifies as a pole
fn pole_move(pole: &[Candle], config: &PatternConfig) -> Option<f64> {
    let first = pole.first()?;
    let last = pole.last()?;
    let change = last.close - first.open;
    (change.abs() >= config.min_pole_move).then_some(change)
}

fn pole_bias(change: f64) -> PatternBias {
    if change > 0.0 {
        PatternBias::Bullish
    } else {
        PatternBias::Bearish
    }
}

/// Strong pole, then a tight consolidation drifting against it
pub fn flag(window: &[Candle], config: &PatternConfig) -> Option<Detection> {
    if window.len() < MIN_WINDOW {
        return None;
    }
    let [pole, body] = halves(window);
    let change = pole_move(pole, config)?;
    let consolidation = range(body)?;
    let drift = body.last()?.close - body.first()?.open;

    let matched =
        consolidation < CONSOLIDATION_RATIO * change.abs() && drift * change.signum() <= 0.0;
    matched.then(|| {
        Detection::new(
            pole_bias(change),
            format!(
                "Flag: pole of {:.4} followed by a {:.4} counter-trend channel",
                change.abs(),
                consolidation
            ),
        )
    })
}

/// Strong pole, then a small symmetric contraction
pub fn pennant(window: &[Candle], config: &PatternConfig) -> Option<Detection> {
    if window.len() < MIN_WINDOW {
        return None;
    }
    let [pole, body] = halves(window);
    let change = pole_move(pole, config)?;
    let consolidation = range(body)?;
    let [early, late] = halves(body);

    let converging = highest(late)? < highest(early)? && lowest(late)? > lowest(early)?;
    let matched = converging && consolidation < CONSOLIDATION_RATIO * change.abs();
    matched.then(|| {
        Detection::new(
            pole_bias(change),
            format!(
                "Pennant: pole of {:.4} followed by converging swings",
                change.abs()
            ),
        )
    })
}

/// Lower highs and higher lows with a clearly narrower second half
pub fn triangle(window: &[Candle], _config: &PatternConfig) -> Option<Detection> {
    if window.len() < MIN_WINDOW {
        return None;
    }
    let [first, second] = halves(window);
    let (first_range, second_range) = (range(first)?, range(second)?);
    if first_range <= 0.0 {
        return None;
    }
    let matched = highest(second)? < highest(first)?
        && lowest(second)? > lowest(first)?
        && second_range < TRIANGLE_CONTRACTION * first_range;
    matched.then(|| {
        Detection::typical(
            PatternKind::Triangle,
            format!(
                "Triangle: range narrowing from {:.4} to {:.4}",
                first_range, second_range
            ),
        )
    })
}
