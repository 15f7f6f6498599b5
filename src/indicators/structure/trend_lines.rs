//! Trend lines anchored on local extrema

use tracing::debug;

use super::extrema::{find_local_extrema, ExtremumKind};
use crate::config::TrendConfig;
use crate::models::{Candle, TrendDirection, TrendLine};

/// Build at most one line per requested direction
pub fn calculate_trend_lines(candles: &[Candle], config: &TrendConfig) -> Vec<TrendLine> {
    let mut lines = Vec::new();
    if config.up {
        lines.extend(build_trend_line(candles, TrendDirection::Up, config.lookback));
    }
    if config.down {
        lines.extend(build_trend_line(candles, TrendDirection::Down, config.lookback));
    }
    lines
}

/// Connect the earliest and latest local low (up) or high (down).
///
/// With fewer than two extrema of the needed kind, the first and last candle
/// anchor the line instead. The line is dropped unless it actually rises
/// (up) or falls (down).
pub fn build_trend_line(
    candles: &[Candle],
    direction: TrendDirection,
    lookback: usize,
) -> Option<TrendLine> {
    if candles.len() < 2 {
        return None;
    }

    let kind = match direction {
        TrendDirection::Up => ExtremumKind::Low,
        TrendDirection::Down => ExtremumKind::High,
    };
    let anchor_price = |c: &Candle| match direction {
        TrendDirection::Up => c.low,
        TrendDirection::Down => c.high,
    };

    let extrema: Vec<_> = find_local_extrema(candles, lookback)
        .into_iter()
        .filter(|e| e.kind == kind)
        .collect();

    let (start_index, end_index) = match (extrema.first(), extrema.last()) {
        (Some(first), Some(last)) if extrema.len() >= 2 && first.index < last.index => {
            (first.index, last.index)
        }
        _ => (0, candles.len() - 1),
    };

    let start = &candles[start_index];
    let end = &candles[end_index];
    let (start_price, end_price) = (anchor_price(start), anchor_price(end));

    let valid = match direction {
        TrendDirection::Up => end_price > start_price,
        TrendDirection::Down => end_price < start_price,
    };
    if !valid {
        debug!(?direction, start_price, end_price, "trend line rejected");
        return None;
    }

    Some(TrendLine {
        start_price,
        end_price,
        start_time: start.time,
        end_time: end.time,
        start_index,
        end_index,
        direction,
    })
}
