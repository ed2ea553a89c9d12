//! Strategy configuration
//!
//! The configuration tree is plain serde data. Reading it from a file is left to the caller:
//!
//! ```rust
//! use srsignal::prelude::*;
//!
//! let json = r#"{
//!     "filters": {
//!         "min_touches": 3,
//!         "touch_window_pips": 15.0,
//!         "rsi_oversold": 30.0,
//!         "rsi_overbought": 70.0
//!     }
//! }"#;
//! let config: StrategyConfig = serde_json::from_str(json).unwrap();
//! assert_eq!(config.levels.lookback.get(), 100);
//! assert!(config.validate().is_ok());
//! ```
//!
//! `filters` is required when deserializing; every other section falls back to its defaults.
//! [`StrategyConfig::validate`] checks ranges once, and rules are built from the validated value
//! with [`StrategyConfig::rule`].

use crate::backtest::ExpiryConvention;
use crate::detectors::helpers::{DEFAULT_ENGULFING_RATIO, DEFAULT_LEVEL_LOOKBACK};
use crate::indicators::{DEFAULT_BB_PERIOD, DEFAULT_BB_STD_DEV, DEFAULT_RSI_PERIOD};
use crate::rules::RuleSet;
use crate::{Period, Result, SignalError};

/// First index scanned by the backtest runner
pub const DEFAULT_START_INDEX: usize = 51;
/// Same-direction setups considered by the history gate
pub const DEFAULT_HISTORY_LOOKBACK: usize = 10;
/// Minimum recent win rate (fraction) for a signal to be alerted
pub const DEFAULT_MIN_WIN_RATE: f64 = 0.68;

// ============================================================
// SECTIONS
// ============================================================

/// Touch and soft-RSI thresholds shared by all rule sets
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Filters {
    pub min_touches: usize,
    pub touch_window_pips: f64,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            min_touches: 3,
            touch_window_pips: 15.0,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PatternParams {
    pub engulfing_min_ratio: f64,
}

impl Default for PatternParams {
    fn default() -> Self {
        Self {
            engulfing_min_ratio: DEFAULT_ENGULFING_RATIO,
        }
    }
}

/// RSI settings of the band-reversal rule set
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RsiParams {
    pub period: Period,
    pub oversold: f64,
    pub overbought: f64,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self {
            period: Period::new_const(DEFAULT_RSI_PERIOD),
            oversold: 30.0,
            overbought: 70.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BollingerParams {
    pub period: Period,
    pub std_dev: f64,
}

impl Default for BollingerParams {
    fn default() -> Self {
        Self {
            period: Period::new_const(DEFAULT_BB_PERIOD),
            std_dev: DEFAULT_BB_STD_DEV,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TechnicalIndicators {
    pub rsi: RsiParams,
    pub bollinger_bands: BollingerParams,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LevelParams {
    /// Trailing candles scanned for support/resistance levels
    pub lookback: Period,
}

impl Default for LevelParams {
    fn default() -> Self {
        Self {
            lookback: Period::new_const(DEFAULT_LEVEL_LOOKBACK),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BacktestParams {
    pub start_index: usize,
    pub expiry: ExpiryConvention,
}

impl Default for BacktestParams {
    fn default() -> Self {
        Self {
            start_index: DEFAULT_START_INDEX,
            expiry: ExpiryConvention::FIFTEEN_MINUTE,
        }
    }
}

/// Setup-history gate applied before alerting
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HistoryParams {
    /// Most recent settled setups of the same direction considered
    pub lookback_setups: usize,
    /// Minimum win rate as a fraction in `[0, 1]`
    pub min_win_rate: f64,
}

impl HistoryParams {
    /// Whether `hit_rate` (a percentage) clears the configured minimum.
    #[inline]
    pub fn admits(&self, hit_rate: f64) -> bool {
        hit_rate >= self.min_win_rate * 100.0
    }
}

impl Default for HistoryParams {
    fn default() -> Self {
        Self {
            lookback_setups: DEFAULT_HISTORY_LOOKBACK,
            min_win_rate: DEFAULT_MIN_WIN_RATE,
        }
    }
}

/// Named signal-rule variant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSetKind {
    #[default]
    TwoCandleConfirmation,
    SetupOnly,
    EngulfingReversal,
    BandReversal,
}

impl RuleSetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleSetKind::TwoCandleConfirmation => "two_candle_confirmation",
            RuleSetKind::SetupOnly => "setup_only",
            RuleSetKind::EngulfingReversal => "engulfing_reversal",
            RuleSetKind::BandReversal => "band_reversal",
        }
    }
}

// ============================================================
// STRATEGY CONFIG
// ============================================================

/// Complete strategy configuration
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StrategyConfig {
    #[serde(default)]
    pub rule_set: RuleSetKind,
    pub filters: Filters,
    #[serde(default)]
    pub patterns: PatternParams,
    #[serde(default)]
    pub technical_indicators: TechnicalIndicators,
    #[serde(default)]
    pub levels: LevelParams,
    #[serde(default)]
    pub backtest: BacktestParams,
    #[serde(default)]
    pub history: HistoryParams,
}

impl StrategyConfig {
    /// Check every numeric setting.
    pub fn validate(&self) -> Result<()> {
        let f = &self.filters;
        if f.min_touches == 0 {
            return Err(SignalError::InvalidValue("filters.min_touches must be >= 1"));
        }
        positive("filters.touch_window_pips", f.touch_window_pips)?;
        thresholds("filters", f.rsi_oversold, f.rsi_overbought)?;

        let ratio = self.patterns.engulfing_min_ratio;
        if !ratio.is_finite() || ratio < 0.0 {
            return Err(SignalError::OutOfRange {
                field: "patterns.engulfing_min_ratio",
                value: ratio,
                min: 0.0,
                max: f64::MAX,
            });
        }

        let rsi = &self.technical_indicators.rsi;
        thresholds("technical_indicators.rsi", rsi.oversold, rsi.overbought)?;
        positive(
            "technical_indicators.bollinger_bands.std_dev",
            self.technical_indicators.bollinger_bands.std_dev,
        )?;

        let history = &self.history;
        if history.lookback_setups == 0 {
            return Err(SignalError::InvalidValue("history.lookback_setups must be >= 1"));
        }
        if !(0.0..=1.0).contains(&history.min_win_rate) {
            return Err(SignalError::OutOfRange {
                field: "history.min_win_rate",
                value: history.min_win_rate,
                min: 0.0,
                max: 1.0,
            });
        }

        self.backtest.expiry.validate()
    }

    /// Validate and build the configured rule set.
    pub fn rule(&self) -> Result<RuleSet> {
        self.validate()?;
        Ok(RuleSet::from_config(self))
    }
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SignalError::OutOfRange {
            field,
            value,
            min: f64::MIN_POSITIVE,
            max: f64::MAX,
        })
    }
}

fn thresholds(section: &str, oversold: f64, overbought: f64) -> Result<()> {
    for (field, value) in [("oversold", oversold), ("overbought", overbought)] {
        if !(0.0..=100.0).contains(&value) {
            return Err(SignalError::InvalidConfig(format!(
                "{section}: RSI {field} threshold {value} outside [0, 100]"
            )));
        }
    }
    if oversold >= overbought {
        return Err(SignalError::InvalidConfig(format!(
            "{section}: oversold ({oversold}) must be below overbought ({overbought})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backtest::PriceSource;

    #[test]
    fn test_defaults() {
        let config = StrategyConfig::default();
        assert_eq!(config.rule_set, RuleSetKind::TwoCandleConfirmation);
        assert_eq!(config.filters.min_touches, 3);
        assert_eq!(config.filters.touch_window_pips, 15.0);
        assert_eq!(config.patterns.engulfing_min_ratio, 1.3);
        assert_eq!(config.technical_indicators.rsi.period.get(), 14);
        assert_eq!(config.technical_indicators.bollinger_bands.period.get(), 20);
        assert_eq!(config.levels.lookback.get(), 100);
        assert_eq!(config.backtest.start_index, 51);
        assert_eq!(config.backtest.expiry, ExpiryConvention::FIFTEEN_MINUTE);
        assert_eq!(config.history.lookback_setups, 10);
        assert_eq!(config.history.min_win_rate, 0.68);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_minimal() {
        let json = r#"{
            "filters": {
                "min_touches": 2,
                "touch_window_pips": 10.0,
                "rsi_oversold": 25.0,
                "rsi_overbought": 75.0
            }
        }"#;
        let config: StrategyConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.filters.min_touches, 2);
        assert_eq!(config.patterns, PatternParams::default());
        assert_eq!(config.backtest, BacktestParams::default());
        assert_eq!(config.history, HistoryParams::default());
    }

    #[test]
    fn test_deserialize_full() {
        let json = r#"{
            "rule_set": "band_reversal",
            "filters": {
                "min_touches": 3,
                "touch_window_pips": 15.0,
                "rsi_oversold": 30.0,
                "rsi_overbought": 70.0
            },
            "patterns": { "engulfing_min_ratio": 1.5 },
            "technical_indicators": {
                "rsi": { "period": 10, "oversold": 20.0, "overbought": 80.0 },
                "bollinger_bands": { "period": 30, "std_dev": 2.5 }
            },
            "levels": { "lookback": 80 },
            "backtest": {
                "start_index": 60,
                "expiry": { "entry_offset": 0, "expiry_offset": 1, "price": "close" }
            },
            "history": { "lookback_setups": 20, "min_win_rate": 0.6 }
        }"#;
        let config: StrategyConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.rule_set, RuleSetKind::BandReversal);
        assert_eq!(config.technical_indicators.rsi.period.get(), 10);
        assert_eq!(config.technical_indicators.bollinger_bands.std_dev, 2.5);
        assert_eq!(config.levels.lookback.get(), 80);
        assert_eq!(config.backtest.expiry.price, PriceSource::Close);
        assert_eq!(config.history.lookback_setups, 20);
        assert_eq!(config.history.min_win_rate, 0.6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_filters_rejected() {
        assert!(serde_json::from_str::<StrategyConfig>("{}").is_err());
    }

    #[test]
    fn test_zero_period_rejected_at_boundary() {
        let json = r#"{
            "filters": {
                "min_touches": 3,
                "touch_window_pips": 15.0,
                "rsi_oversold": 30.0,
                "rsi_overbought": 70.0
            },
            "levels": { "lookback": 0 }
        }"#;
        assert!(serde_json::from_str::<StrategyConfig>(json).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = StrategyConfig::default();
        config.filters.min_touches = 0;
        assert!(config.validate().is_err());

        let mut config = StrategyConfig::default();
        config.filters.touch_window_pips = -1.0;
        assert!(matches!(
            config.validate(),
            Err(SignalError::OutOfRange { field: "filters.touch_window_pips", .. })
        ));

        let mut config = StrategyConfig::default();
        config.filters.rsi_oversold = 80.0;
        assert!(matches!(config.validate(), Err(SignalError::InvalidConfig(_))));

        let mut config = StrategyConfig::default();
        config.technical_indicators.rsi.overbought = 120.0;
        assert!(config.validate().is_err());

        let mut config = StrategyConfig::default();
        config.technical_indicators.bollinger_bands.std_dev = 0.0;
        assert!(config.validate().is_err());

        let mut config = StrategyConfig::default();
        config.patterns.engulfing_min_ratio = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = StrategyConfig::default();
        config.backtest.expiry.expiry_offset = config.backtest.expiry.entry_offset;
        assert!(config.validate().is_err());

        let mut config = StrategyConfig::default();
        config.history.lookback_setups = 0;
        assert!(config.validate().is_err());

        let mut config = StrategyConfig::default();
        config.history.min_win_rate = 68.0;
        assert!(matches!(
            config.validate(),
            Err(SignalError::OutOfRange { field: "history.min_win_rate", .. })
        ));
    }

    #[test]
    fn test_history_threshold_is_inclusive() {
        let history = HistoryParams::default();
        assert!(history.admits(68.0));
        assert!(history.admits(100.0));
        assert!(!history.admits(67.9));
    }

    #[test]
    fn test_rule_follows_kind() {
        let mut config = StrategyConfig::default();
        for kind in [
            RuleSetKind::TwoCandleConfirmation,
            RuleSetKind::SetupOnly,
            RuleSetKind::EngulfingReversal,
            RuleSetKind::BandReversal,
        ] {
            config.rule_set = kind;
            assert_eq!(config.rule().unwrap().kind(), kind);
        }

        config.filters.min_touches = 0;
        assert!(config.rule().is_err());
    }
}
