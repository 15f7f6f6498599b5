//! Support and resistance levels from clustered local extrema

use std::cmp::Ordering;
use tracing::debug;

use super::extrema::{find_local_extrema, Extremum, ExtremumKind};
use crate::config::LevelConfig;
use crate::models::{Bounce, Candle, LevelType, SupportResistanceLevel, Zone};

struct Cluster {
    sum: f64,
    touches: Vec<usize>,
}

impl Cluster {
    fn price(&self) -> f64 {
        self.sum / self.touches.len() as f64
    }
}

/// Group extrema whose price is within `tolerance` of a cluster's mean.
/// Extrema are visited in index order and join the first matching cluster.
fn cluster_extrema<'a>(
    extrema: impl Iterator<Item = &'a Extremum>,
    tolerance: f64,
) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = Vec::new();
    for extremum in extrema {
        match clusters
            .iter_mut()
            .find(|c| (c.price() - extremum.price).abs() <= tolerance)
        {
            Some(cluster) => {
                cluster.sum += extremum.price;
                cluster.touches.push(extremum.index);
            }
            None => clusters.push(Cluster {
                sum: extremum.price,
                touches: vec![extremum.index],
            }),
        }
    }
    clusters
}

/// Round number within `2 * tolerance` of `price`, if any
pub fn psychological_match(price: f64, config: &LevelConfig) -> Option<f64> {
    config
        .psychological_levels
        .iter()
        .copied()
        .filter(|level| (level - price).abs() <= 2.0 * config.tolerance)
        .min_by(|a, b| {
            (a - price)
                .abs()
                .partial_cmp(&(b - price).abs())
                .unwrap_or(Ordering::Equal)
        })
}

fn build_levels(clusters: Vec<Cluster>, level_type: LevelType, config: &LevelConfig) -> Vec<SupportResistanceLevel> {
    let mut levels: Vec<SupportResistanceLevel> = Vec::new();

    for cluster in clusters {
        let raw_price = cluster.price();
        let snapped = psychological_match(raw_price, config);
        let price = snapped.unwrap_or(raw_price);

        // two clusters can snap onto the same round number
        if let Some(existing) = levels
            .iter_mut()
            .find(|l| l.is_psychological && snapped.is_some() && l.price == price)
        {
            existing.touches.extend(cluster.touches);
            existing.touches.sort_unstable();
            existing.touches.dedup();
            continue;
        }

        levels.push(SupportResistanceLevel {
            price,
            level_type,
            strength: 0,
            touches: cluster.touches,
            zone: None,
            is_psychological: snapped.is_some(),
            description: None,
        });
    }

    for level in &mut levels {
        finalize_level(level, config);
    }

    levels.sort_by(compare_levels);
    levels.truncate(config.max_levels_per_side);
    levels
}

fn finalize_level(level: &mut SupportResistanceLevel, config: &LevelConfig) {
    level.strength = level.touches.len();
    level.zone = (level.strength >= config.zone_min_strength).then(|| Zone {
        upper: level.price + 0.5 * config.tolerance,
        lower: level.price - 0.5 * config.tolerance,
    });
    level.description = Some(format!(
        "{} at {:.4} ({} touch{}{})",
        level.level_type.label(),
        level.price,
        level.strength,
        if level.strength == 1 { "" } else { "es" },
        if level.is_psychological {
            ", psychological"
        } else {
            ""
        },
    ));
}

/// Psychological first, then strength, then most recent touch
fn compare_levels(a: &SupportResistanceLevel, b: &SupportResistanceLevel) -> Ordering {
    b.is_psychological
        .cmp(&a.is_psychological)
        .then(b.strength.cmp(&a.strength))
        .then(b.touches.last().cmp(&a.touches.last()))
}

/// Calculate support and resistance levels.
///
/// Returns resistance levels followed by support levels, each side sorted and
/// capped at `max_levels_per_side`.
pub fn calculate_support_resistance(
    candles: &[Candle],
    config: &LevelConfig,
) -> Vec<SupportResistanceLevel> {
    let window = 2 * config.lookback + 1;
    if candles.len() < window {
        debug!(
            candles = candles.len(),
            required = window,
            "not enough candles for support/resistance"
        );
        return Vec::new();
    }

    let extrema = find_local_extrema(candles, config.lookback);
    let highs = cluster_extrema(
        extrema.iter().filter(|e| e.kind == ExtremumKind::High),
        config.tolerance,
    );
    let lows = cluster_extrema(
        extrema.iter().filter(|e| e.kind == ExtremumKind::Low),
        config.tolerance,
    );

    let mut levels = build_levels(highs, LevelType::Resistance, config);
    levels.extend(build_levels(lows, LevelType::Support, config));

    debug!(
        extrema = extrema.len(),
        levels = levels.len(),
        "support/resistance levels computed"
    );
    levels
}

/// Calculate support/resistance with default parameters
pub fn calculate_support_resistance_default(candles: &[Candle]) -> Vec<SupportResistanceLevel> {
    calculate_support_resistance(candles, &LevelConfig::default())
}

/// Touches followed by a candle closing away from the level by more than
/// `bounce_threshold` of its range, strongest first
pub fn detect_bounces(
    levels: &[SupportResistanceLevel],
    candles: &[Candle],
    config: &LevelConfig,
) -> Vec<Bounce> {
    let mut bounces = Vec::new();

    for level in levels {
        for &index in &level.touches {
            let (Some(touch), Some(next)) = (candles.get(index), candles.get(index + 1)) else {
                continue;
            };
            let range = next.total_range();
            if range <= 0.0 {
                continue;
            }
            let distance = match level.level_type {
                LevelType::Support => next.close - level.price,
                LevelType::Resistance => level.price - next.close,
            };
            let strength = distance / range;
            if strength > config.bounce_threshold {
                bounces.push(Bounce {
                    level_price: level.price,
                    level_type: level.level_type,
                    index,
                    time: touch.time,
                    strength,
                });
            }
        }
    }

    bounces.sort_by(|a, b| b.strength.partial_cmp(&a.strength).unwrap_or(Ordering::Equal));
    bounces.truncate(config.max_bounces);
    bounces
}

/// Nearest support at or below `price` and nearest resistance at or above it
pub fn nearest_levels(
    levels: &[SupportResistanceLevel],
    price: f64,
) -> (Option<&SupportResistanceLevel>, Option<&SupportResistanceLevel>) {
    let support = levels
        .iter()
        .filter(|l| l.level_type == LevelType::Support && l.price <= price)
        .max_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal));
    let resistance = levels
        .iter()
        .filter(|l| l.level_type == LevelType::Resistance && l.price >= price)
        .min_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal));
    (support, resistance)
}
