//! Touch counting against support/resistance
//!
//! Two independent strategies decide whether the current candle sits on a validated level:
//!
//! - **Levels**: clustered extrema from [`find_levels`], validated by counting prior candles of
//!   the lookback window that came within tolerance of each touched level.
//! - **Rolling**: each candle is compared to the rolling max high / min low of the
//!   `extreme_window` candles ending at it, and touches are summed over the last `count_window`
//!   candles.
//!
//! The strategies answer different questions and are not interchangeable.

use super::helpers::{
    tolerance, within, DEFAULT_LEVEL_LOOKBACK, ROLLING_COUNT_WINDOW, ROLLING_EXTREME_WINDOW,
};
use super::levels::find_levels;
use crate::OHLCV;

/// Validated touches of the current candle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TouchFlags {
    /// High validated against resistance
    pub resistance: bool,
    /// Low validated against support
    pub support: bool,
}

/// Level-based touch validation.
///
/// Returns no touches when fewer than `lookback` candles are available or when the last candle
/// touches no level. Otherwise, for every touched level, candles of the trailing window
/// (the `lookback - 1` candles before the current one) whose high or low lies within tolerance of
/// that level are counted; counts are summed per side and compared to `min_touches`.
pub fn triple_touch<T: OHLCV>(
    bars: &[T],
    symbol: &str,
    min_touches: usize,
    window: f64,
    lookback: usize,
) -> TouchFlags {
    if bars.len() < lookback {
        return TouchFlags::default();
    }
    let Some(current) = bars.last() else {
        return TouchFlags::default();
    };

    let levels = find_levels(bars, symbol, window, lookback);
    let tol = tolerance(symbol, window);

    let resistance_hits: Vec<f64> = levels
        .resistance
        .iter()
        .copied()
        .filter(|&l| within(current.high(), l, tol))
        .collect();
    let support_hits: Vec<f64> = levels
        .support
        .iter()
        .copied()
        .filter(|&l| within(current.low(), l, tol))
        .collect();

    if resistance_hits.is_empty() && support_hits.is_empty() {
        return TouchFlags::default();
    }

    let end = bars.len() - 1;
    let start = (bars.len() - lookback).min(end);
    let recent = &bars[start..end];

    let count = |hits: &[f64]| -> usize {
        hits.iter()
            .map(|&level| {
                recent
                    .iter()
                    .filter(|b| within(b.high(), level, tol) || within(b.low(), level, tol))
                    .count()
            })
            .sum()
    };

    TouchFlags {
        resistance: !resistance_hits.is_empty() && count(&resistance_hits) >= min_touches,
        support: !support_hits.is_empty() && count(&support_hits) >= min_touches,
    }
}

/// Rolling-window touch validation.
///
/// A candle touches the high band when its high is within tolerance of the max high of the
/// `extreme_window` candles ending at it (low band: min low). Candles without a full rolling
/// window never touch. Touches over the last `count_window` candles are summed; fewer than
/// `count_window` candles yields no touches.
pub fn rolling_touch<T: OHLCV>(
    bars: &[T],
    symbol: &str,
    min_touches: usize,
    window: f64,
    extreme_window: usize,
    count_window: usize,
) -> TouchFlags {
    let n = bars.len();
    let extreme_window = extreme_window.max(1);
    let count_window = count_window.max(1);
    if n < count_window {
        return TouchFlags::default();
    }

    let tol = tolerance(symbol, window);
    let mut high_touches = 0;
    let mut low_touches = 0;

    for j in n - count_window..n {
        if j + 1 < extreme_window {
            continue;
        }
        let span = &bars[j + 1 - extreme_window..=j];
        let max_high = span.iter().map(|b| b.high()).fold(f64::NEG_INFINITY, f64::max);
        let min_low = span.iter().map(|b| b.low()).fold(f64::INFINITY, f64::min);

        if within(bars[j].high(), max_high, tol) {
            high_touches += 1;
        }
        if within(bars[j].low(), min_low, tol) {
            low_touches += 1;
        }
    }

    TouchFlags {
        resistance: high_touches >= min_touches,
        support: low_touches >= min_touches,
    }
}

/// Pluggable touch-validation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TouchStrategy {
    /// Clustered extrema over `lookback` candles, see [`triple_touch`]
    Levels { lookback: usize },
    /// Rolling max/min bands, see [`rolling_touch`]
    Rolling {
        extreme_window: usize,
        count_window: usize,
    },
}

impl TouchStrategy {
    pub const fn levels(lookback: usize) -> Self {
        Self::Levels { lookback }
    }

    pub const fn rolling() -> Self {
        Self::Rolling {
            extreme_window: ROLLING_EXTREME_WINDOW,
            count_window: ROLLING_COUNT_WINDOW,
        }
    }

    pub fn detect<T: OHLCV>(
        &self,
        bars: &[T],
        symbol: &str,
        min_touches: usize,
        window: f64,
    ) -> TouchFlags {
        match *self {
            Self::Levels { lookback } => triple_touch(bars, symbol, min_touches, window, lookback),
            Self::Rolling {
                extreme_window,
                count_window,
            } => rolling_touch(bars, symbol, min_touches, window, extreme_window, count_window),
        }
    }
}

impl Default for TouchStrategy {
    fn default() -> Self {
        Self::levels(DEFAULT_LEVEL_LOOKBACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Candle;

    fn flat(n: usize, price: f64) -> Vec<Candle> {
        (0..n)
            .map(|i| Candle::new(i as i64, price, price + 0.0005, price - 0.0005, price))
            .collect()
    }

    /// Support at 1.0950 made by a dip at index 10, with `extra` prior candles touching it.
    fn support_series(extra: &[usize]) -> Vec<Candle> {
        let mut bars = flat(40, 1.1000);
        bars[10].low = 1.0950;
        for &i in extra {
            bars[i].low = 1.0958;
        }
        bars.push(Candle::new(40, 1.0970, 1.0975, 1.0955, 1.0965));
        bars
    }

    #[test]
    fn test_short_series_no_touch() {
        let bars = flat(20, 1.1);
        assert_eq!(triple_touch(&bars, "EURUSD", 3, 15.0, 100), TouchFlags::default());
        assert_eq!(
            rolling_touch(&bars, "EURUSD", 3, 15.0, 50, 30),
            TouchFlags::default()
        );
    }

    #[test]
    fn test_triple_touch_validated() {
        // dip at 10 plus candles 20 and 30 within 15 pips of 1.0950
        let bars = support_series(&[20, 30]);
        let flags = triple_touch(&bars, "EURUSD", 3, 15.0, 41);
        assert!(flags.support);
        assert!(!flags.resistance);
    }

    #[test]
    fn test_triple_touch_not_enough_touches() {
        let bars = support_series(&[]);
        let flags = triple_touch(&bars, "EURUSD", 3, 15.0, 41);
        assert!(!flags.support);
        assert!(triple_touch(&bars, "EURUSD", 1, 15.0, 41).support);
    }

    #[test]
    fn test_triple_touch_requires_current_touch() {
        let mut bars = support_series(&[20, 30]);
        let last = bars.len() - 1;
        bars[last] = Candle::new(40, 1.1000, 1.1004, 1.0996, 1.1001);
        assert_eq!(
            triple_touch(&bars, "EURUSD", 3, 15.0, 41),
            TouchFlags::default()
        );
    }

    #[test]
    fn test_both_sides_can_touch() {
        // narrow market where one candle spans a support and a resistance cluster
        let mut bars = flat(40, 1.1000);
        bars[8].low = 1.0992;
        bars[22].high = 1.1008;
        bars.push(Candle::new(40, 1.1000, 1.1007, 1.0993, 1.1001));

        let flags = triple_touch(&bars, "EURUSD", 3, 15.0, 41);
        assert!(flags.support);
        assert!(flags.resistance);
    }

    #[test]
    fn test_rolling_touch_flat_market() {
        let bars = flat(60, 1.1);
        let flags = rolling_touch(&bars, "EURUSD", 3, 15.0, 50, 30);
        assert!(flags.support);
        assert!(flags.resistance);
    }

    #[test]
    fn test_rolling_touch_needs_full_window() {
        // 40 candles: no candle has a full 50-candle window
        let bars = flat(40, 1.1);
        assert_eq!(
            rolling_touch(&bars, "EURUSD", 1, 15.0, 50, 30),
            TouchFlags::default()
        );
    }

    #[test]
    fn test_rolling_touch_trend_away_from_low() {
        // rising market: every candle makes a new high, none revisits the rolling low
        let bars: Vec<Candle> = (0..60)
            .map(|i| {
                let p = 1.1 + i as f64 * 0.0020;
                Candle::new(i, p, p + 0.0005, p - 0.0005, p + 0.0002)
            })
            .collect();
        let flags = rolling_touch(&bars, "EURUSD", 3, 15.0, 50, 30);
        assert!(flags.resistance);
        assert!(!flags.support);
    }

    #[test]
    fn test_strategy_dispatch() {
        let bars = support_series(&[20, 30]);
        assert_eq!(
            TouchStrategy::levels(41).detect(&bars, "EURUSD", 3, 15.0),
            triple_touch(&bars, "EURUSD", 3, 15.0, 41)
        );
        assert_eq!(
            TouchStrategy::rolling().detect(&bars, "EURUSD", 3, 15.0),
            rolling_touch(&bars, "EURUSD", 3, 15.0, 50, 30)
        );
        assert_eq!(TouchStrategy::default(), TouchStrategy::levels(100));
    }
}
