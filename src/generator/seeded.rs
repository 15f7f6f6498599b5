//! Reproducible series steered through a list of price points.
//!
//! The seed is a hash of the point prices, so the same points always give the
//! same candles while different sketches give different noise.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use super::{generate_candles, SyntheticParams};
use crate::models::CandleSeries;

pub fn seed_from_points(points: &[f64]) -> u64 {
    let mut hasher = DefaultHasher::new();
    points.len().hash(&mut hasher);
    for point in points {
        point.to_bits().hash(&mut hasher);
    }
    hasher.finish()
}

/// Generate `params.count` candles passing near `points`.
///
/// The first point replaces `params.base_price`; the rest are spread evenly
/// over the series and linearly interpolated to a per-candle target.
pub fn generate_seeded(points: &[f64], params: &SyntheticParams) -> CandleSeries {
    let mut rng = StdRng::seed_from_u64(seed_from_points(points));
    let mut params = params.clone();
    if let Some(&first) = points.first() {
        params.base_price = first;
    }
    let targets = interpolate_targets(points, params.count);
    let candles = generate_candles(&params, &mut rng, targets.as_deref());
    CandleSeries::from_unchecked(candles)
}

fn interpolate_targets(points: &[f64], count: usize) -> Option<Vec<f64>> {
    if points.len() < 2 || count == 0 {
        return None;
    }
    let segments = (points.len() - 1) as f64;
    let last = count.saturating_sub(1).max(1) as f64;
    let targets = (0..count)
        .map(|i| {
            let position = (i as f64 + 1.0).min(last) / last * segments;
            let segment = (position.floor() as usize).min(points.len() - 2);
            let t = position - segment as f64;
            points[segment] + (points[segment + 1] - points[segment]) * t
        })
        .collect();
    Some(targets)
}
