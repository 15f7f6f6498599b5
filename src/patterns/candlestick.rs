//! Single, two and three candle recognizers.
//!
//! Each function looks at the trailing candles of its window. Candles with a
//! zero range never match.

use super::Detection;
use crate::config::PatternConfig;
use crate::models::{Candle, PatternBias, PatternKind};

/// A "large" directional candle has a body of at least this share of its range
const LARGE_BODY_RATIO: f64 = 0.5;
/// Star candle body must stay below this share of its range
const STAR_BODY_RATIO: f64 = 0.3;
const DOJI_BODY_RATIO: f64 = 0.15;

fn last_n<const N: usize>(window: &[Candle]) -> Option<[&Candle; N]> {
    if window.len() < N {
        return None;
    }
    let tail = &window[window.len() - N..];
    let mut out = [&tail[0]; N];
    for (slot, candle) in out.iter_mut().zip(tail) {
        *slot = candle;
    }
    Some(out)
}

pub fn is_hammer(candle: &Candle) -> bool {
    let range = candle.total_range();
    if range <= 0.0 {
        return false;
    }
    let body = candle.body_size();
    let lower = candle.lower_shadow();
    lower > 2.0 * body
        && candle.upper_shadow() < 0.5 * body
        && body < 0.3 * range
        && lower > 0.6 * range
}

pub fn is_inverted_hammer(candle: &Candle) -> bool {
    let range = candle.total_range();
    if range <= 0.0 {
        return false;
    }
    let body = candle.body_size();
    let upper = candle.upper_shadow();
    upper > 2.0 * body
        && candle.lower_shadow() < 0.5 * body
        && body < 0.3 * range
        && upper > 0.6 * range
}

pub fn is_doji(candle: &Candle) -> bool {
    let range = candle.total_range();
    range > 0.0 && candle.body_size() < DOJI_BODY_RATIO * range
}

fn is_large(candle: &Candle) -> bool {
    let range = candle.total_range();
    range > 0.0 && candle.body_size() >= LARGE_BODY_RATIO * range
}

/// `current` is bullish, `previous` bearish, the current body covers the
/// previous one and is more than `ratio` times larger
pub fn is_bullish_engulfing(previous: &Candle, current: &Candle, ratio: f64) -> bool {
    previous.is_bearish()
        && current.is_bullish()
        && current.open <= previous.close
        && current.close >= previous.open
        && current.body_size() > ratio * previous.body_size()
}

pub fn is_bearish_engulfing(previous: &Candle, current: &Candle, ratio: f64) -> bool {
    previous.is_bullish()
        && current.is_bearish()
        && current.open >= previous.close
        && current.close <= previous.open
        && current.body_size() > ratio * previous.body_size()
}

pub fn hammer(window: &[Candle], _config: &PatternConfig) -> Option<Detection> {
    let [candle] = last_n::<1>(window)?;
    is_hammer(candle).then(|| {
        Detection::typical(
            PatternKind::Hammer,
            "Hammer: long lower shadow, buyers rejected lower prices",
        )
    })
}

pub fn inverted_hammer(window: &[Candle], _config: &PatternConfig) -> Option<Detection> {
    let [candle] = last_n::<1>(window)?;
    is_inverted_hammer(candle).then(|| {
        Detection::typical(
            PatternKind::InvertedHammer,
            "Inverted hammer: long upper shadow after selling pressure",
        )
    })
}

pub fn doji(window: &[Candle], _config: &PatternConfig) -> Option<Detection> {
    let [candle] = last_n::<1>(window)?;
    is_doji(candle).then(|| {
        Detection::typical(
            PatternKind::Doji,
            "Doji: open and close almost equal, market indecision",
        )
    })
}

pub fn bullish_engulfing(window: &[Candle], config: &PatternConfig) -> Option<Detection> {
    let [previous, current] = last_n::<2>(window)?;
    is_bullish_engulfing(previous, current, config.engulfing_ratio).then(|| {
        Detection::typical(
            PatternKind::BullishEngulfing,
            "Bullish engulfing: buyers overwhelm the previous bearish candle",
        )
    })
}

pub fn bearish_engulfing(window: &[Candle], config: &PatternConfig) -> Option<Detection> {
    let [previous, current] = last_n::<2>(window)?;
    is_bearish_engulfing(previous, current, config.engulfing_ratio).then(|| {
        Detection::typical(
            PatternKind::BearishEngulfing,
            "Bearish engulfing: sellers overwhelm the previous bullish candle",
        )
    })
}

fn is_star(candle: &Candle) -> bool {
    let range = candle.total_range();
    range > 0.0 && candle.body_size() < STAR_BODY_RATIO * range
}

pub fn morning_star(window: &[Candle], _config: &PatternConfig) -> Option<Detection> {
    let [first, star, last] = last_n::<3>(window)?;
    let matched = first.is_bearish()
        && is_large(first)
        && is_star(star)
        && last.is_bullish()
        && is_large(last)
        && last.close > first.midpoint();
    matched.then(|| {
        Detection::typical(
            PatternKind::MorningStar,
            "Morning star: decline, pause, then a strong bullish recovery",
        )
    })
}

pub fn evening_star(window: &[Candle], _config: &PatternConfig) -> Option<Detection> {
    let [first, star, last] = last_n::<3>(window)?;
    let matched = first.is_bullish()
        && is_large(first)
        && is_star(star)
        && last.is_bearish()
        && is_large(last)
        && last.close < first.midpoint();
    matched.then(|| {
        Detection::typical(
            PatternKind::EveningStar,
            "Evening star: rally, pause, then a strong bearish reversal",
        )
    })
}

pub fn inside_bar(window: &[Candle], _config: &PatternConfig) -> Option<Detection> {
    let [previous, current] = last_n::<2>(window)?;
    (current.high < previous.high && current.low > previous.low).then(|| {
        Detection::typical(
            PatternKind::InsideBar,
            "Inside bar: range contracts inside the previous candle",
        )
    })
}

pub fn outside_bar(window: &[Candle], _config: &PatternConfig) -> Option<Detection> {
    let [previous, current] = last_n::<2>(window)?;
    (current.high > previous.high && current.low < previous.low).then(|| {
        let bias = if current.is_bullish() {
            PatternBias::Bullish
        } else if current.is_bearish() {
            PatternBias::Bearish
        } else {
            PatternBias::Neutral
        };
        Detection::new(bias, "Outside bar: range expands beyond the previous candle")
    })
}
