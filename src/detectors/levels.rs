//! Support/resistance level discovery
//!
//! Levels are derived from strict local extrema of lows (support) and highs (resistance) over
//! the most recent `lookback` candles, then merged by a single ascending sweep: an extremum joins
//! the open cluster while it lies within tolerance of the cluster's last member, and each closed
//! cluster is reported by its mean.

use super::helpers::{local_maxima, local_minima, mean, tolerance, within, EXTREMA_ORDER};
use crate::OHLCV;

/// Side of the market a level sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum LevelKind {
    Support,
    Resistance,
}

impl LevelKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LevelKind::Support => "Support",
            LevelKind::Resistance => "Resistance",
        }
    }
}

/// A clustered price level
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PriceLevel {
    pub price: f64,
    pub kind: LevelKind,
}

/// Support and resistance cluster means found in one lookback window
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Levels {
    pub support: Vec<f64>,
    pub resistance: Vec<f64>,
}

impl Levels {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.support.is_empty() && self.resistance.is_empty()
    }

    /// Iterate over every level tagged with its side.
    pub fn iter(&self) -> impl Iterator<Item = PriceLevel> + '_ {
        let support = self.support.iter().map(|&price| PriceLevel {
            price,
            kind: LevelKind::Support,
        });
        let resistance = self.resistance.iter().map(|&price| PriceLevel {
            price,
            kind: LevelKind::Resistance,
        });
        support.chain(resistance)
    }
}

/// Find support/resistance levels over the last `lookback` candles.
///
/// Returns empty levels when fewer than `lookback` candles are available.
pub fn find_levels<T: OHLCV>(bars: &[T], symbol: &str, window: f64, lookback: usize) -> Levels {
    if bars.len() < lookback {
        return Levels::default();
    }

    let recent = &bars[bars.len() - lookback..];
    let lows: Vec<f64> = recent.iter().map(|b| b.low()).collect();
    let highs: Vec<f64> = recent.iter().map(|b| b.high()).collect();

    let support: Vec<f64> = local_minima(&lows, EXTREMA_ORDER)
        .into_iter()
        .map(|i| lows[i])
        .collect();
    let resistance: Vec<f64> = local_maxima(&highs, EXTREMA_ORDER)
        .into_iter()
        .map(|i| highs[i])
        .collect();

    let tol = tolerance(symbol, window);
    Levels {
        support: cluster_levels(&support, tol),
        resistance: cluster_levels(&resistance, tol),
    }
}

/// Merge nearby prices into cluster means.
///
/// Prices are sorted ascending and swept once; a price joins the open cluster when it is within
/// `tolerance` of the cluster's most recently added member (not its mean).
pub fn cluster_levels(levels: &[f64], tolerance: f64) -> Vec<f64> {
    let mut sorted = levels.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mut clusters = Vec::new();
    let mut current: Vec<f64> = Vec::new();

    for price in sorted {
        match current.last() {
            Some(&last) if price - last > tolerance => {
                clusters.push(mean(&current));
                current.clear();
            }
            _ => {}
        }
        current.push(price);
    }

    if !current.is_empty() {
        clusters.push(mean(&current));
    }

    clusters
}

/// The level touched by the last candle of `bars`.
///
/// Support is checked first (against the candle's low) when `touch_low` is set, then resistance
/// (against its high) when `touch_high` is set. Levels are recomputed on `bars` as given, so
/// callers pass the same truncated slice the signal was computed on.
pub fn touched_level<T: OHLCV>(
    bars: &[T],
    symbol: &str,
    window: f64,
    lookback: usize,
    touch_high: bool,
    touch_low: bool,
) -> Option<PriceLevel> {
    let last = bars.last()?;
    let levels = find_levels(bars, symbol, window, lookback);
    let tol = tolerance(symbol, window);

    if touch_low {
        if let Some(&price) = levels.support.iter().find(|&&l| within(last.low(), l, tol)) {
            return Some(PriceLevel {
                price,
                kind: LevelKind::Support,
            });
        }
    }

    if touch_high {
        if let Some(&price) = levels
            .resistance
            .iter()
            .find(|&&l| within(last.high(), l, tol))
        {
            return Some(PriceLevel {
                price,
                kind: LevelKind::Resistance,
            });
        }
    }

    None
}
