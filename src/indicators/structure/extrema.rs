//! Local highs and lows over a sliding window

use serde::{Deserialize, Serialize};

use crate::common::math;
use crate::models::Candle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtremumKind {
    High,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extremum {
    pub index: usize,
    pub price: f64,
    pub kind: ExtremumKind,
}

/// Find candles whose high (low) equals the max high (min low) of the
/// `2 * lookback + 1` window centred on them.
///
/// Only candles with a full window are considered, so the first and last
/// `lookback` candles never qualify. Ties all qualify. Results are ordered by
/// index; a candle may appear once as a high and once as a low.
pub fn find_local_extrema(candles: &[Candle], lookback: usize) -> Vec<Extremum> {
    let mut extrema = Vec::new();
    if candles.len() < 2 * lookback + 1 {
        return extrema;
    }

    for i in lookback..candles.len() - lookback {
        let window = &candles[i - lookback..=i + lookback];
        let candle = &candles[i];

        if math::max_of(window.iter().map(|c| c.high)) == Some(candle.high) {
            extrema.push(Extremum {
                index: i,
                price: candle.high,
                kind: ExtremumKind::High,
            });
        }
        if math::min_of(window.iter().map(|c| c.low)) == Some(candle.low) {
            extrema.push(Extremum {
                index: i,
                price: candle.low,
                kind: ExtremumKind::Low,
            });
        }
    }

    extrema
}

pub fn local_highs(candles: &[Candle], lookback: usize) -> Vec<Extremum> {
    find_local_extrema(candles, lookback)
        .into_iter()
        .filter(|e| e.kind == ExtremumKind::High)
        .collect()
}

pub fn local_lows(candles: &[Candle], lookback: usize) -> Vec<Extremum> {
    find_local_extrema(candles, lookback)
        .into_iter()
        .filter(|e| e.kind == ExtremumKind::Low)
        .collect()
}
