//! Harmonic patterns (butterfly, bat, crab, shark, 5-0).
//!
//! The window is split into five equal segments whose middle closes become
//! the X, A, B, C and D pivots. Direction comes from D relative to X. The leg
//! ratios are reported but not checked against the Fibonacci proportions of
//! each pattern, so every kind matches any window of sufficient length; the
//! kinds differ only in naming and lesson context.

use super::Detection;
use crate::common::math;
use crate::config::PatternConfig;
use crate::models::{Candle, HarmonicPoints, HarmonicRatios, PatternBias, PatternKind};

pub const MIN_WINDOW: usize = 5;

/// X, A, B, C, D pivots from the middle close of each fifth of the window
pub fn harmonic_points(window: &[Candle]) -> Option<HarmonicPoints> {
    let n = window.len();
    if n < MIN_WINDOW {
        return None;
    }
    let mut prices = [0.0; 5];
    let mut indices = [0usize; 5];
    for k in 0..5 {
        let start = k * n / 5;
        let end = ((k + 1) * n / 5).clamp(start + 1, n);
        let mid = (start + (end - start) / 2).min(n - 1);
        indices[k] = mid;
        prices[k] = window[mid].close;
    }
    Some(HarmonicPoints {
        x: prices[0],
        a: prices[1],
        b: prices[2],
        c: prices[3],
        d: prices[4],
        indices,
    })
}

pub fn harmonic_ratios(points: &HarmonicPoints) -> HarmonicRatios {
    let xa = (points.a - points.x).abs();
    let ab = (points.b - points.a).abs();
    let bc = (points.c - points.b).abs();
    let cd = (points.d - points.c).abs();
    HarmonicRatios {
        xb_xa: math::safe_ratio(ab, xa, 0.0),
        ac_ab: math::safe_ratio(bc, ab, 0.0),
        bd_bc: math::safe_ratio(cd, bc, 0.0),
    }
}

pub fn direction(points: &HarmonicPoints) -> PatternBias {
    if points.d < points.x {
        PatternBias::Bullish
    } else {
        PatternBias::Bearish
    }
}

fn detect(kind: PatternKind, window: &[Candle]) -> Option<Detection> {
    let points = harmonic_points(window)?;
    let ratios = harmonic_ratios(&points);
    let bias = direction(&points);
    let side = match bias {
        PatternBias::Bullish => "Bullish",
        _ => "Bearish",
    };
    Some(Detection {
        bias,
        description: format!(
            "{} {}: X {:.4}, D {:.4} (approximate, ratios not validated)",
            side,
            kind.label(),
            points.x,
            points.d
        ),
        harmonic: Some((points, ratios)),
    })
}

pub fn butterfly(window: &[Candle], _config: &PatternConfig) -> Option<Detection> {
    detect(PatternKind::Butterfly, window)
}

pub fn bat(window: &[Candle], _config: &PatternConfig) -> Option<Detection> {
    detect(PatternKind::Bat, window)
}

pub fn crab(window: &[Candle], _config: &PatternConfig) -> Option<Detection> {
    detect(PatternKind::Crab, window)
}

pub fn shark(window: &[Candle], _config: &PatternConfig) -> Option<Detection> {
    detect(PatternKind::Shark, window)
}

pub fn five_zero(window: &[Candle], _config: &PatternConfig) -> Option<Detection> {
    detect(PatternKind::FiveZero, window)
}
