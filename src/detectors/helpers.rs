//! Common helper functions for level and pattern detection
//!
//! Price tolerances, neighbourhood extrema and shared thresholds used across all detector modules.

// ============================================================
// THRESHOLDS
// ============================================================

/// Pip size of JPY-quoted symbols
pub const JPY_PIP_SIZE: f64 = 0.01;
/// Pip size of every other symbol
pub const DEFAULT_PIP_SIZE: f64 = 0.0001;

/// Radius (candles on each side) of the local extremum neighbourhood
pub const EXTREMA_ORDER: usize = 5;
/// Default number of trailing candles scanned for support/resistance levels
pub const DEFAULT_LEVEL_LOOKBACK: usize = 100;
/// Default rolling window of the rolling max/min touch strategy
pub const ROLLING_EXTREME_WINDOW: usize = 50;
/// Default window over which rolling touches are summed
pub const ROLLING_COUNT_WINDOW: usize = 30;

/// Long shadow: shadow > body * LONG_SHADOW_FACTOR
pub const LONG_SHADOW_FACTOR: f64 = 2.0;
/// Strict pattern set: opposite shadow < body * STRICT_SHORT_SHADOW_FACTOR
pub const STRICT_SHORT_SHADOW_FACTOR: f64 = 0.5;
/// Relaxed pattern set: opposite shadow < body * RELAXED_SHORT_SHADOW_FACTOR
pub const RELAXED_SHORT_SHADOW_FACTOR: f64 = 1.0;
/// Doji: body < pip_size * DOJI_PIP_FACTOR
pub const DOJI_PIP_FACTOR: f64 = 10.0;
/// Default engulfing body ratio
pub const DEFAULT_ENGULFING_RATIO: f64 = 1.3;

// ============================================================
// PRICE TOLERANCE
// ============================================================

/// Minimum quoted increment convention for `symbol`.
#[inline]
pub fn pip_size(symbol: &str) -> f64 {
    if symbol.contains("JPY") {
        JPY_PIP_SIZE
    } else {
        DEFAULT_PIP_SIZE
    }
}

/// Absolute price tolerance of `window` pips for `symbol`.
#[inline]
pub fn tolerance(symbol: &str, window: f64) -> f64 {
    pip_size(symbol) * window
}

/// `|price - level| <= tolerance`
#[inline]
pub fn within(price: f64, level: f64, tolerance: f64) -> bool {
    (price - level).abs() <= tolerance
}

#[inline]
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

// ============================================================
// EXTREMA
// ============================================================

/// Indices of strict local minima: each value is below every other value within `order`
/// positions, with the neighbourhood clipped to the slice. The first and last positions are
/// never extrema.
pub fn local_minima(values: &[f64], order: usize) -> Vec<usize> {
    relative_extrema(values, order, |v, other| v < other)
}

/// Indices of strict local maxima, see [`local_minima`].
pub fn local_maxima(values: &[f64], order: usize) -> Vec<usize> {
    relative_extrema(values, order, |v, other| v > other)
}

fn relative_extrema(values: &[f64], order: usize, beats: impl Fn(f64, f64) -> bool) -> Vec<usize> {
    let n = values.len();
    if n < 3 {
        return Vec::new();
    }
    let order = order.max(1);

    (1..n - 1)
        .filter(|&i| {
            let lo = i.saturating_sub(order);
            let hi = (i + order).min(n - 1);
            (lo..=hi)
                .filter(|&j| j != i)
                .all(|j| beats(values[i], values[j]))
        })
        .collect()
}
