//! # srsignal - support/resistance reversal signals
//!
//! Detects reversal setups at support/resistance levels on OHLC candle series, turns them into
//! directional CALL/PUT signals, and evaluates those signals against fixed-offset binary
//! expiries for backtesting.
//!
//! ## Quick Start
//!
//! ```rust
//! use srsignal::prelude::*;
//!
//! let config = StrategyConfig::default();
//! let backtester = Backtester::from_config(&config).unwrap();
//!
//! let candles: Vec<Candle> = vec![];
//! let records = backtester.run(&candles, "EURUSD").unwrap();
//! let stats = aggregate(&records);
//! assert_eq!(stats.total, 0);
//! ```
//!
//! All detectors, indicators and rules are pure functions of the candles they are given. They
//! never read past the index they are asked about and hold no global state, so distinct series
//! can be processed concurrently (see [`backtest::backtest_parallel`]).

pub mod backtest;
pub mod config;
pub mod detectors;
pub mod indicators;
pub mod rules;

pub mod prelude {
    pub use crate::{
        // Backtesting
        backtest::{
            aggregate, backtest_parallel, evaluate, evaluate_with, hit_rate_gate, recent_hit_rate,
            run_backtest, BacktestError, BacktestResult, BacktestStats, Backtester,
            ExpiryConvention, PriceSource, SetupRecord,
        },
        // Configuration
        config::{
            BacktestParams, BollingerParams, Filters, HistoryParams, LevelParams, PatternParams,
            RsiParams, RuleSetKind, StrategyConfig, TechnicalIndicators,
        },
        // Detectors
        detectors::*,
        // Indicators
        indicators::{bollinger_bands, rsi, rsi_strict, BollingerBands},
        // Rules
        rules::{
            BandReversal, Condition, ConditionSet, EngulfingReversal, Evaluation, RuleSet,
            SetupFilter, SetupOnly, SignalRule, TwoCandleConfirmation,
        },
        // Types
        Candle,
        Direction,
        OHLCVExt,
        Outcome,
        Period,
        Result,
        Signal,
        SignalError,
        OHLCV,
    };
}

// ============================================================
// ERRORS
// ============================================================

pub type Result<T> = std::result::Result<T, SignalError>;

/// Errors raised by configuration validation and the hard-failure indicators
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SignalError {
    #[error("Invalid value: {0}")]
    InvalidValue(&'static str),

    #[error("{field} = {value} out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Insufficient data for {indicator}: need {need} candles, got {got}")]
    InsufficientData {
        indicator: &'static str,
        need: usize,
        got: usize,
    },

    #[error("Invalid candle at index {index}: {reason}")]
    InvalidCandle { index: usize, reason: &'static str },
}

// ============================================================
// VALIDATED TYPES
// ============================================================

/// Period (must be > 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period(usize);

impl Period {
    /// Create a new Period, validating value is > 0
    pub fn new(value: usize) -> Result<Self> {
        if value == 0 {
            return Err(SignalError::InvalidValue("Period must be > 0"));
        }
        Ok(Self(value))
    }

    #[doc(hidden)]
    pub const fn new_const(value: usize) -> Self {
        Self(value)
    }

    #[inline]
    pub fn get(self) -> usize {
        self.0
    }
}

impl serde::Serialize for Period {
    fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.serialize(s)
    }
}

impl<'de> serde::Deserialize<'de> for Period {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let value = usize::deserialize(d)?;
        Period::new(value).map_err(serde::de::Error::custom)
    }
}

// ============================================================
// OHLCV TRAITS
// ============================================================

/// Core OHLCV data trait
pub trait OHLCV {
    fn open(&self) -> f64;
    fn high(&self) -> f64;
    fn low(&self) -> f64;
    fn close(&self) -> f64;

    /// Volume is never read by the signal engine.
    fn volume(&self) -> f64 {
        0.0
    }

    fn timestamp(&self) -> Option<i64> {
        None
    }
}

impl<T: OHLCV + ?Sized> OHLCV for &T {
    fn open(&self) -> f64 {
        (**self).open()
    }

    fn high(&self) -> f64 {
        (**self).high()
    }

    fn low(&self) -> f64 {
        (**self).low()
    }

    fn close(&self) -> f64 {
        (**self).close()
    }

    fn volume(&self) -> f64 {
        (**self).volume()
    }

    fn timestamp(&self) -> Option<i64> {
        (**self).timestamp()
    }
}

/// Extension trait with computed candle geometry
pub trait OHLCVExt: OHLCV {
    #[inline]
    fn body(&self) -> f64 {
        (self.close() - self.open()).abs()
    }

    #[inline]
    fn range(&self) -> f64 {
        self.high() - self.low()
    }

    #[inline]
    fn upper_shadow(&self) -> f64 {
        self.high() - self.open().max(self.close())
    }

    #[inline]
    fn lower_shadow(&self) -> f64 {
        self.open().min(self.close()) - self.low()
    }

    #[inline]
    fn is_bullish(&self) -> bool {
        self.close() > self.open()
    }

    #[inline]
    fn is_bearish(&self) -> bool {
        self.close() < self.open()
    }

    /// Validate OHLC consistency
    fn validate(&self) -> Result<()> {
        let values = [self.open(), self.high(), self.low(), self.close()];
        if values.iter().any(|v| v.is_nan()) {
            return Err(SignalError::InvalidCandle {
                index: 0,
                reason: "NaN in OHLC",
            });
        }
        if values.iter().any(|v| v.is_infinite()) {
            return Err(SignalError::InvalidCandle {
                index: 0,
                reason: "Infinite value in OHLC",
            });
        }
        if self.high() < self.low() {
            return Err(SignalError::InvalidCandle {
                index: 0,
                reason: "high < low",
            });
        }
        Ok(())
    }
}

impl<T: OHLCV + ?Sized> OHLCVExt for T {}

/// Validate every candle of a series, reporting the first offending index.
pub fn validate_series<T: OHLCV>(bars: &[T]) -> Result<()> {
    for (i, bar) in bars.iter().enumerate() {
        bar.validate().map_err(|e| match e {
            SignalError::InvalidCandle { reason, .. } => {
                SignalError::InvalidCandle { index: i, reason }
            }
            other => other,
        })?;
    }
    Ok(())
}

// ============================================================
// CANDLE
// ============================================================

/// One OHLC bar of a fixed interval. The timestamp unit is chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Candle {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
        }
    }
}

impl OHLCV for Candle {
    fn open(&self) -> f64 {
        self.open
    }

    fn high(&self) -> f64 {
        self.high
    }

    fn low(&self) -> f64 {
        self.low
    }

    fn close(&self) -> f64 {
        self.close
    }

    fn timestamp(&self) -> Option<i64> {
        Some(self.timestamp)
    }
}

// ============================================================
// SIGNALS AND OUTCOMES
// ============================================================

/// Direction/bias of a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    Bullish,
    Neutral,
    Bearish,
}

impl Direction {
    #[inline]
    pub fn is_bullish(self) -> bool {
        matches!(self, Direction::Bullish)
    }

    #[inline]
    pub fn is_bearish(self) -> bool {
        matches!(self, Direction::Bearish)
    }
}

/// Trading decision for one index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Call,
    Put,
    #[default]
    None,
}

impl Signal {
    #[inline]
    pub fn is_some(self) -> bool {
        !matches!(self, Signal::None)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Signal::Call => "CALL",
            Signal::Put => "PUT",
            Signal::None => "NONE",
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a backtested trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Win,
    Loss,
    /// Not enough candles after the signal to settle the trade
    Undetermined,
}

impl Outcome {
    #[inline]
    pub fn is_determined(self) -> bool {
        !matches!(self, Outcome::Undetermined)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Win => "WIN",
            Outcome::Loss => "LOSS",
            Outcome::Undetermined => "UNDETERMINED",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================
// TESTS
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_validation() {
        assert!(Period::new(1).is_ok());
        assert!(Period::new(100).is_ok());
        assert!(Period::new(0).is_err());
    }

    #[test]
    fn test_period_deserialize_rejects_zero() {
        assert_eq!(serde_json::from_str::<Period>("14").unwrap().get(), 14);
        assert!(serde_json::from_str::<Period>("0").is_err());
    }

    #[test]
    fn test_candle_geometry() {
        let bar = Candle::new(0, 100.0, 110.0, 90.0, 105.0);
        assert_eq!(bar.body(), 5.0);
        assert_eq!(bar.range(), 20.0);
        assert_eq!(bar.upper_shadow(), 5.0);
        assert_eq!(bar.lower_shadow(), 10.0);
        assert!(bar.is_bullish());
        assert!(!bar.is_bearish());
        assert_eq!(bar.volume(), 0.0);
        assert_eq!(OHLCV::timestamp(&bar), Some(0));
    }

    #[test]
    fn test_flat_candle_has_no_direction() {
        let bar = Candle::new(0, 1.1, 1.2, 1.0, 1.1);
        assert!(!bar.is_bullish());
        assert!(!bar.is_bearish());
    }

    #[test]
    fn test_validate_series_reports_index() {
        let bars = vec![
            Candle::new(0, 1.0, 1.1, 0.9, 1.05),
            Candle::new(1, 1.0, 0.8, 0.9, 1.05),
        ];
        assert_eq!(
            validate_series(&bars),
            Err(SignalError::InvalidCandle {
                index: 1,
                reason: "high < low"
            })
        );

        let nan = vec![Candle::new(0, f64::NAN, 1.1, 0.9, 1.0)];
        assert!(validate_series(&nan).is_err());
    }

    #[test]
    fn test_signal_and_outcome_serde() {
        assert_eq!(serde_json::to_string(&Signal::Call).unwrap(), "\"CALL\"");
        assert_eq!(serde_json::to_string(&Signal::None).unwrap(), "\"NONE\"");
        assert_eq!(
            serde_json::to_string(&Outcome::Undetermined).unwrap(),
            "\"UNDETERMINED\""
        );
        assert_eq!(Signal::Put.to_string(), "PUT");
        assert!(!Outcome::Undetermined.is_determined());
    }
}
