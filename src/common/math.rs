//! Numeric helpers shared by the indicator and structure modules

/// Simple moving average over the last `period` values
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Population standard deviation over the last `period` values
pub fn standard_deviation(values: &[f64], period: usize) -> Option<f64> {
    let mean = sma(values, period)?;
    let window = &values[values.len() - period..];
    let variance = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / period as f64;
    Some(variance.sqrt())
}

/// Smoothing factor `2 / (period + 1)`
pub fn ema_multiplier(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

/// One EMA step from the previous value
pub fn ema_from_previous(value: f64, previous: f64, period: usize) -> f64 {
    (value - previous) * ema_multiplier(period) + previous
}

/// Full EMA series seeded with the first value.
///
/// `ema[0] = values[0]`, `ema[i] = (values[i] - ema[i-1]) * k + ema[i-1]`.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let Some(&first) = values.first() else {
        return out;
    };
    if period == 0 {
        return out;
    }
    out.push(first);
    for &value in &values[1..] {
        let previous = out[out.len() - 1];
        out.push(ema_from_previous(value, previous, period));
    }
    out
}

/// Max of a slice ignoring NaN, `None` when empty
pub fn max_of(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.max(v))))
}

/// Min of a slice ignoring NaN, `None` when empty
pub fn min_of(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.min(v))))
}

/// Ratio that falls back to `fallback` when the denominator is zero or the
/// result is not finite
pub fn safe_ratio(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if denominator == 0.0 {
        return fallback;
    }
    let ratio = numerator / denominator;
    if ratio.is_finite() {
        ratio
    } else {
        fallback
    }
}

/// Clamp that tolerates an inverted range by collapsing to `min`
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if max < min {
        return min;
    }
    value.max(min).min(max)
}
