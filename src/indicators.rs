//! Momentum and volatility indicators
//!
//! Two RSI flavours are kept side by side:
//!
//! - [`rsi`] is the soft variant: too little data yields the neutral value 50.
//! - [`rsi_strict`] fails with [`SignalError::InsufficientData`] instead.
//!
//! Both average gains and losses with a simple mean over the last `period` close-to-close
//! changes; the first candle of a series contributes a zero change.
//!
//! [`bollinger_bands`] uses the population standard deviation of the last `period` closes.

use crate::{Result, SignalError, OHLCV};

/// Neutral RSI value
pub const RSI_NEUTRAL: f64 = 50.0;
/// Default RSI period
pub const DEFAULT_RSI_PERIOD: usize = 14;
/// Default Bollinger Bands period
pub const DEFAULT_BB_PERIOD: usize = 20;
/// Default Bollinger Bands width in standard deviations
pub const DEFAULT_BB_STD_DEV: f64 = 2.0;

// ============================================================
// RSI
// ============================================================

/// RSI of the last candle, or [`RSI_NEUTRAL`] when fewer than `period` candles are available.
pub fn rsi<T: OHLCV>(bars: &[T], period: usize) -> f64 {
    if period == 0 || bars.len() < period {
        return RSI_NEUTRAL;
    }
    rsi_unchecked(bars, period)
}

/// RSI of the last candle, failing when fewer than `period` candles are available.
pub fn rsi_strict<T: OHLCV>(bars: &[T], period: usize) -> Result<f64> {
    if period == 0 {
        return Err(SignalError::InvalidValue("RSI period must be > 0"));
    }
    if bars.len() < period {
        return Err(SignalError::InsufficientData {
            indicator: "rsi",
            need: period,
            got: bars.len(),
        });
    }
    Ok(rsi_unchecked(bars, period))
}

/// Requires `1 <= period <= bars.len()`.
fn rsi_unchecked<T: OHLCV>(bars: &[T], period: usize) -> f64 {
    let n = bars.len();
    let mut gains = 0.0;
    let mut losses = 0.0;

    for i in n - period..n {
        let change = if i == 0 {
            0.0
        } else {
            bars[i].close() - bars[i - 1].close()
        };
        if change > 0.0 {
            gains += change;
        } else {
            losses -= change;
        }
    }

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;

    if avg_loss == 0.0 {
        return if avg_gain > 0.0 { 100.0 } else { RSI_NEUTRAL };
    }

    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

// ============================================================
// BOLLINGER BANDS
// ============================================================

/// Bollinger Bands at the last candle
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Mean of the last `period` closes plus/minus `std_dev` population standard deviations.
pub fn bollinger_bands<T: OHLCV>(bars: &[T], period: usize, std_dev: f64) -> Result<BollingerBands> {
    if period == 0 {
        return Err(SignalError::InvalidValue("Bollinger period must be > 0"));
    }
    if bars.len() < period {
        return Err(SignalError::InsufficientData {
            indicator: "bollinger_bands",
            need: period,
            got: bars.len(),
        });
    }

    let window = &bars[bars.len() - period..];
    let n = period as f64;
    let middle = window.iter().map(|b| b.close()).sum::<f64>() / n;
    let variance = window
        .iter()
        .map(|b| {
            let d = b.close() - middle;
            d * d
        })
        .sum::<f64>()
        / n;
    let width = std_dev * variance.sqrt();

    Ok(BollingerBands {
        upper: middle + width,
        middle,
        lower: middle - width,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Candle;

    fn closes(values: &[f64]) -> Vec<Candle> {
        values
            .iter()
            .enumerate()
            .map(|(i, &c)| Candle::new(i as i64, c, c, c, c))
            .collect()
    }

    #[test]
    fn test_rsi_neutral_on_short_input() {
        let bars = closes(&[1.0, 1.1, 1.2]);
        assert_eq!(rsi(&bars, 14), 50.0);
        assert_eq!(rsi(&bars, 0), 50.0);
    }

    #[test]
    fn test_rsi_strict_errors_on_short_input() {
        let bars = closes(&[1.0, 1.1, 1.2]);
        assert_eq!(
            rsi_strict(&bars, 14),
            Err(SignalError::InsufficientData {
                indicator: "rsi",
                need: 14,
                got: 3
            })
        );
        assert!(rsi_strict(&bars, 0).is_err());
    }

    #[test]
    fn test_rsi_all_gains_and_flat() {
        let rising: Vec<f64> = (0..20).map(|i| 1.0 + i as f64 * 0.01).collect();
        assert_eq!(rsi(&closes(&rising), 14), 100.0);

        let flat = vec![1.1; 20];
        assert_eq!(rsi(&closes(&flat), 14), 50.0);
    }

    #[test]
    fn test_rsi_simple_means() {
        // last 4 changes: +2, -1, +1, -2 -> avg gain 0.75, avg loss 0.75
        let bars = closes(&[10.0, 10.0, 12.0, 11.0, 12.0, 10.0]);
        assert!((rsi(&bars, 4) - 50.0).abs() < 1e-9);

        // last 2 changes: +1, -2 -> rs = 0.5
        let expected = 100.0 - 100.0 / 1.5;
        assert!((rsi(&bars, 2) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_rsi_first_candle_contributes_zero() {
        // window covers the whole series: changes 0, -1, -1
        let bars = closes(&[3.0, 2.0, 1.0]);
        assert_eq!(rsi(&bars, 3), 0.0);
        assert_eq!(rsi_strict(&bars, 3), Ok(0.0));
    }

    #[test]
    fn test_rsi_variants_agree() {
        let bars = closes(&[1.0, 1.2, 1.1, 1.3, 1.25, 1.4, 1.35, 1.3]);
        assert_eq!(rsi_strict(&bars, 5).unwrap(), rsi(&bars, 5));
    }

    #[test]
    fn test_bollinger_population_std() {
        let bars = closes(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        let bb = bollinger_bands(&bars, 8, 2.0).unwrap();
        assert!((bb.middle - 5.0).abs() < 1e-12);
        assert!((bb.upper - 9.0).abs() < 1e-12);
        assert!((bb.lower - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_bollinger_uses_last_period() {
        let bars = closes(&[100.0, 1.0, 1.0, 1.0]);
        let bb = bollinger_bands(&bars, 3, 2.0).unwrap();
        assert_eq!(bb.middle, 1.0);
        assert_eq!(bb.upper, 1.0);
        assert_eq!(bb.lower, 1.0);
    }

    #[test]
    fn test_bollinger_insufficient_data() {
        let bars = closes(&[1.0; 5]);
        assert!(matches!(
            bollinger_bands(&bars, 20, 2.0),
            Err(SignalError::InsufficientData { need: 20, got: 5, .. })
        ));
        assert!(bollinger_bands(&bars, 0, 2.0).is_err());
    }
}
