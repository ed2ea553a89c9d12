//! Candlestick pattern detectors
//!
//! Every detector inspects the last candle of the slice it is given (engulfing: the last two)
//! and returns `false` when the slice is too short.
//!
//! Hammer and shooting star come in two named threshold variants, see [`PatternSet`].

use super::helpers::{
    pip_size, DOJI_PIP_FACTOR, LONG_SHADOW_FACTOR, RELAXED_SHORT_SHADOW_FACTOR,
    STRICT_SHORT_SHADOW_FACTOR,
};
use crate::{Direction, OHLCVExt, OHLCV};

// ============================================================
// PATTERN IDS
// ============================================================

/// Pattern that can trigger a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PatternKind {
    #[serde(rename = "Hammer")]
    Hammer,
    #[serde(rename = "Shooting Star")]
    ShootingStar,
    #[serde(rename = "Bullish Engulfing")]
    BullishEngulfing,
    #[serde(rename = "Bearish Engulfing")]
    BearishEngulfing,
    #[serde(rename = "Bullish Pin Bar")]
    BullishPinBar,
    #[serde(rename = "Bearish Pin Bar")]
    BearishPinBar,
    #[serde(rename = "Doji")]
    Doji,
}

impl PatternKind {
    /// Returns the display identifier
    pub fn as_str(self) -> &'static str {
        match self {
            PatternKind::Hammer => "Hammer",
            PatternKind::ShootingStar => "Shooting Star",
            PatternKind::BullishEngulfing => "Bullish Engulfing",
            PatternKind::BearishEngulfing => "Bearish Engulfing",
            PatternKind::BullishPinBar => "Bullish Pin Bar",
            PatternKind::BearishPinBar => "Bearish Pin Bar",
            PatternKind::Doji => "Doji",
        }
    }

    /// Returns the typical direction of this pattern.
    pub fn typical_direction(self) -> Direction {
        match self {
            PatternKind::Hammer | PatternKind::BullishEngulfing | PatternKind::BullishPinBar => {
                Direction::Bullish
            }
            PatternKind::ShootingStar
            | PatternKind::BearishEngulfing
            | PatternKind::BearishPinBar => Direction::Bearish,
            PatternKind::Doji => Direction::Neutral,
        }
    }
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================
// HAMMER / SHOOTING STAR VARIANTS
// ============================================================

/// Hammer/shooting-star threshold variant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternSet {
    /// Opposite shadow < 0.5 * body; a zero body never qualifies
    #[default]
    Strict,
    /// Opposite shadow < body
    Relaxed,
}

impl PatternSet {
    #[inline]
    fn short_shadow_factor(self) -> f64 {
        match self {
            PatternSet::Strict => STRICT_SHORT_SHADOW_FACTOR,
            PatternSet::Relaxed => RELAXED_SHORT_SHADOW_FACTOR,
        }
    }

    /// Long lower shadow, short upper shadow.
    pub fn hammer<T: OHLCV>(self, bars: &[T]) -> bool {
        let Some(bar) = bars.last() else {
            return false;
        };
        let body = bar.body();
        if self == PatternSet::Strict && body == 0.0 {
            return false;
        }
        bar.lower_shadow() > LONG_SHADOW_FACTOR * body
            && bar.upper_shadow() < body * self.short_shadow_factor()
    }

    /// Long upper shadow, short lower shadow.
    pub fn shooting_star<T: OHLCV>(self, bars: &[T]) -> bool {
        let Some(bar) = bars.last() else {
            return false;
        };
        let body = bar.body();
        if self == PatternSet::Strict && body == 0.0 {
            return false;
        }
        bar.upper_shadow() > LONG_SHADOW_FACTOR * body
            && bar.lower_shadow() < body * self.short_shadow_factor()
    }
}

/// Hammer under the [`PatternSet::Strict`] variant.
#[inline]
pub fn hammer<T: OHLCV>(bars: &[T]) -> bool {
    PatternSet::Strict.hammer(bars)
}

/// Shooting star under the [`PatternSet::Strict`] variant.
#[inline]
pub fn shooting_star<T: OHLCV>(bars: &[T]) -> bool {
    PatternSet::Strict.shooting_star(bars)
}

// ============================================================
// ENGULFING / PIN BAR / DOJI
// ============================================================

/// Engulfing flags for the last two candles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Engulfing {
    pub bullish: bool,
    pub bearish: bool,
}

/// Bullish: bearish candle followed by a bullish one whose body exceeds `ratio` times the
/// previous body. Bearish is the mirror.
pub fn engulfing<T: OHLCV>(bars: &[T], ratio: f64) -> Engulfing {
    let [.., prev, curr] = bars else {
        return Engulfing::default();
    };
    let larger = curr.body() > ratio * prev.body();

    Engulfing {
        bullish: curr.is_bullish() && prev.is_bearish() && larger,
        bearish: curr.is_bearish() && prev.is_bullish() && larger,
    }
}

/// Relaxed hammer (bullish) or shooting star (bearish) whose body points the same way.
pub fn pin_bar<T: OHLCV>(bars: &[T], bullish: bool) -> bool {
    let Some(bar) = bars.last() else {
        return false;
    };
    if bullish {
        PatternSet::Relaxed.hammer(bars) && bar.is_bullish()
    } else {
        PatternSet::Relaxed.shooting_star(bars) && bar.is_bearish()
    }
}

/// Body smaller than ten pips of `symbol`.
pub fn doji<T: OHLCV>(bars: &[T], symbol: &str) -> bool {
    bars.last()
        .is_some_and(|bar| bar.body() < pip_size(symbol) * DOJI_PIP_FACTOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Candle;

    fn bar(o: f64, h: f64, l: f64, c: f64) -> Candle {
        Candle::new(0, o, h, l, c)
    }

    #[test]
    fn test_empty_slices() {
        let bars: Vec<Candle> = vec![];
        assert!(!hammer(&bars));
        assert!(!shooting_star(&bars));
        assert!(!PatternSet::Relaxed.hammer(&bars));
        assert!(!pin_bar(&bars, true));
        assert!(!doji(&bars, "EURUSD"));
        assert_eq!(engulfing(&bars, 1.3), Engulfing::default());
        assert_eq!(engulfing(&[bar(1.0, 1.1, 0.9, 1.05)], 1.3), Engulfing::default());
    }

    #[test]
    fn test_hammer_both_variants() {
        // body 0.0010, lower shadow 0.0050, upper shadow 0.0004
        let bars = [bar(1.1000, 1.1014, 1.0950, 1.1010)];
        assert!(PatternSet::Strict.hammer(&bars));
        assert!(PatternSet::Relaxed.hammer(&bars));
        assert!(!shooting_star(&bars));
    }

    #[test]
    fn test_hammer_on_strict_boundary() {
        // upper shadow equals half the body: only the relaxed variant accepts it
        let bars = [bar(1.1000, 1.1015, 1.0950, 1.1010)];
        assert!(!PatternSet::Strict.hammer(&bars));
        assert!(PatternSet::Relaxed.hammer(&bars));
    }

    #[test]
    fn test_variants_differ() {
        // upper shadow 0.7 * body
        let bars = [bar(100.0, 117.0, 70.0, 110.0)];
        assert!(!PatternSet::Strict.hammer(&bars));
        assert!(PatternSet::Relaxed.hammer(&bars));
    }

    #[test]
    fn test_zero_body_rejected() {
        let bars = [bar(1.0, 1.0, 0.9, 1.0)];
        assert!(!hammer(&bars));
        assert!(!PatternSet::Relaxed.hammer(&bars));
    }

    #[test]
    fn test_shooting_star() {
        let bars = [bar(1.1010, 1.1060, 1.0996, 1.1000)];
        assert!(shooting_star(&bars));
        assert!(PatternSet::Relaxed.shooting_star(&bars));
        assert!(!hammer(&bars));
    }

    #[test]
    fn test_engulfing() {
        let bull = [bar(1.10, 1.11, 1.08, 1.09), bar(1.085, 1.12, 1.08, 1.105)];
        assert_eq!(
            engulfing(&bull, 1.3),
            Engulfing {
                bullish: true,
                bearish: false
            }
        );
        // body 0.02 vs 0.01: fails a 2.5x ratio
        assert!(!engulfing(&bull, 2.5).bullish);

        let bear = [bar(1.09, 1.11, 1.08, 1.10), bar(1.105, 1.11, 1.07, 1.085)];
        assert!(engulfing(&bear, 1.3).bearish);
        assert!(!engulfing(&bear, 1.3).bullish);
    }

    #[test]
    fn test_engulfing_uses_last_two() {
        let bars = [
            bar(1.0, 1.2, 0.8, 1.1),
            bar(1.10, 1.11, 1.08, 1.09),
            bar(1.085, 1.12, 1.08, 1.105),
        ];
        assert!(engulfing(&bars, 1.3).bullish);
    }

    #[test]
    fn test_pin_bar_direction_gate() {
        let bullish = [bar(1.1000, 1.1014, 1.0950, 1.1010)];
        assert!(pin_bar(&bullish, true));
        assert!(!pin_bar(&bullish, false));

        // same geometry, bearish body
        let bearish_body = [bar(1.1010, 1.1014, 1.0950, 1.1000)];
        assert!(!pin_bar(&bearish_body, true));
    }

    #[test]
    fn test_doji_pip_scaled() {
        let small = [bar(1.1000, 1.1020, 1.0980, 1.1005)];
        assert!(doji(&small, "EURUSD"));
        let large = [bar(1.1000, 1.1020, 1.0980, 1.1015)];
        assert!(!doji(&large, "EURUSD"));
        let jpy = [bar(150.00, 150.30, 149.80, 150.05)];
        assert!(doji(&jpy, "USDJPY"));
    }

    #[test]
    fn test_pattern_kind_ids() {
        assert_eq!(PatternKind::Hammer.as_str(), "Hammer");
        assert_eq!(PatternKind::ShootingStar.to_string(), "Shooting Star");
        assert!(PatternKind::BullishPinBar.typical_direction().is_bullish());
        assert_eq!(PatternKind::Doji.typical_direction(), Direction::Neutral);
    }
}
