//! Backtest evaluation
//!
//! Signals are settled against fixed-offset future candles: the trade enters at candle
//! `index + entry_offset` and expires at candle `index + expiry_offset`. A CALL wins when the
//! expiry price is above the entry price, a PUT when it is below; anything else (including an
//! exact tie) is a loss. Trades whose expiry candle does not exist yet are undetermined.
//!
//! [`Backtester`] replays a configured rule over every historical index, feeding it only the
//! candles up to that index, and settles the accepted signals.

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::config::{HistoryParams, StrategyConfig};
use crate::rules::{ConditionSet, RuleSet, SignalRule};
use crate::{validate_series, Outcome, Result, Signal, SignalError, OHLCV};

// ============================================================
// EXPIRY CONVENTION
// ============================================================

/// Candle price used to settle a trade
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    #[default]
    Open,
    Close,
}

impl PriceSource {
    #[inline]
    fn price<T: OHLCV>(self, bar: &T) -> f64 {
        match self {
            PriceSource::Open => bar.open(),
            PriceSource::Close => bar.close(),
        }
    }
}

/// Entry/expiry offsets relative to the signal index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ExpiryConvention {
    pub entry_offset: usize,
    pub expiry_offset: usize,
    #[serde(default)]
    pub price: PriceSource,
}

impl ExpiryConvention {
    /// Enter at the next open, expire three candles later (15 minutes on 5-minute candles).
    pub const FIFTEEN_MINUTE: Self = Self {
        entry_offset: 1,
        expiry_offset: 4,
        price: PriceSource::Open,
    };

    /// Enter at the next open, expire two candles later (10 minutes on 5-minute candles).
    pub const TEN_MINUTE: Self = Self {
        entry_offset: 1,
        expiry_offset: 2,
        price: PriceSource::Open,
    };

    /// Signal close against the next close.
    pub const NEXT_CLOSE: Self = Self {
        entry_offset: 0,
        expiry_offset: 1,
        price: PriceSource::Close,
    };

    pub fn new(entry_offset: usize, expiry_offset: usize, price: PriceSource) -> Result<Self> {
        let convention = Self {
            entry_offset,
            expiry_offset,
            price,
        };
        convention.validate()?;
        Ok(convention)
    }

    pub fn validate(&self) -> Result<()> {
        if self.expiry_offset <= self.entry_offset {
            return Err(SignalError::InvalidConfig(format!(
                "expiry offset ({}) must be after entry offset ({})",
                self.expiry_offset, self.entry_offset
            )));
        }
        Ok(())
    }
}

impl Default for ExpiryConvention {
    fn default() -> Self {
        Self::FIFTEEN_MINUTE
    }
}

// ============================================================
// OUTCOME EVALUATION
// ============================================================

/// Settle `signal` raised at `index` on opens at the given offsets.
pub fn evaluate<T: OHLCV>(
    bars: &[T],
    index: usize,
    signal: Signal,
    entry_offset: usize,
    expiry_offset: usize,
) -> Outcome {
    let convention = ExpiryConvention {
        entry_offset,
        expiry_offset,
        price: PriceSource::Open,
    };
    evaluate_with(bars, index, signal, &convention)
}

/// Settle `signal` raised at `index` under `convention`.
pub fn evaluate_with<T: OHLCV>(
    bars: &[T],
    index: usize,
    signal: Signal,
    convention: &ExpiryConvention,
) -> Outcome {
    settle(bars, index, signal, convention).outcome
}

struct Settlement {
    outcome: Outcome,
    entry_price: Option<f64>,
    expiry_price: Option<f64>,
}

fn settle<T: OHLCV>(
    bars: &[T],
    index: usize,
    signal: Signal,
    convention: &ExpiryConvention,
) -> Settlement {
    let price_at = |offset: usize| {
        index
            .checked_add(offset)
            .and_then(|i| bars.get(i))
            .map(|bar| convention.price.price(bar))
    };
    let entry_price = price_at(convention.entry_offset);
    let expiry_price = price_at(convention.expiry_offset);

    let outcome = match (signal, entry_price, expiry_price) {
        (Signal::None, _, _) | (_, None, _) | (_, _, None) => Outcome::Undetermined,
        (Signal::Call, Some(entry), Some(expiry)) if expiry > entry => Outcome::Win,
        (Signal::Put, Some(entry), Some(expiry)) if expiry < entry => Outcome::Win,
        _ => Outcome::Loss,
    };

    Settlement {
        outcome,
        entry_price,
        expiry_price,
    }
}

// ============================================================
// RECORDS AND STATISTICS
// ============================================================

/// One accepted signal of a backtest
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SetupRecord {
    /// Signal index
    pub index: usize,
    pub timestamp: Option<i64>,
    pub symbol: String,
    pub rule: &'static str,
    pub signal: Signal,
    pub result: Outcome,
    pub entry_price: Option<f64>,
    pub expiry_price: Option<f64>,
    pub conditions: ConditionSet,
}

/// Outcome counts
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BacktestStats {
    pub total: usize,
    pub wins: usize,
    pub losses: usize,
    pub undetermined: usize,
    /// Percentage of wins among determined outcomes, 0 when there are none
    pub win_rate: f64,
}

impl BacktestStats {
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = Outcome>) -> Self {
        let mut stats = Self::default();
        for outcome in outcomes {
            stats.total += 1;
            match outcome {
                Outcome::Win => stats.wins += 1,
                Outcome::Loss => stats.losses += 1,
                Outcome::Undetermined => stats.undetermined += 1,
            }
        }

        let determined = stats.wins + stats.losses;
        if determined > 0 {
            stats.win_rate = stats.wins as f64 / determined as f64 * 100.0;
        }
        stats
    }
}

/// Aggregate the outcomes of `records`.
pub fn aggregate(records: &[SetupRecord]) -> BacktestStats {
    BacktestStats::from_outcomes(records.iter().map(|r| r.result))
}

/// Win percentage of the last `lookback` settled setups raised in the direction of `signal`.
///
/// `records` are in chronological order. Undetermined setups are skipped. Fewer than `lookback`
/// settled setups in that direction yields 100.
pub fn recent_hit_rate(records: &[SetupRecord], signal: Signal, lookback: usize) -> f64 {
    let recent: Vec<Outcome> = records
        .iter()
        .rev()
        .filter(|r| r.signal == signal && r.result.is_determined())
        .take(lookback)
        .map(|r| r.result)
        .collect();

    if lookback == 0 || recent.len() < lookback {
        return 100.0;
    }
    let wins = recent.iter().filter(|&&o| o == Outcome::Win).count();
    wins as f64 / recent.len() as f64 * 100.0
}

/// Whether a new `signal` may be alerted given the setup history of its symbol.
pub fn hit_rate_gate(records: &[SetupRecord], signal: Signal, history: &HistoryParams) -> bool {
    let hit_rate = recent_hit_rate(records, signal, history.lookback_setups);
    let admitted = history.admits(hit_rate);
    if !admitted {
        debug!(
            signal = %signal,
            hit_rate,
            min_win_rate = history.min_win_rate,
            "signal suppressed by history"
        );
    }
    admitted
}

// ============================================================
// BACKTEST RUNNER
// ============================================================

/// Replays a rule over a candle series
#[derive(Debug, Clone)]
pub struct Backtester {
    rule: RuleSet,
    expiry: ExpiryConvention,
    start_index: usize,
    validate_data: bool,
}

impl Backtester {
    pub fn new(rule: impl Into<RuleSet>, expiry: ExpiryConvention, start_index: usize) -> Result<Self> {
        expiry.validate()?;
        Ok(Self {
            rule: rule.into(),
            expiry,
            start_index,
            validate_data: true,
        })
    }

    /// Validate `config` and build its rule set and backtest settings.
    pub fn from_config(config: &StrategyConfig) -> Result<Self> {
        Self::new(
            config.rule()?,
            config.backtest.expiry,
            config.backtest.start_index,
        )
    }

    /// Toggle candle validation before each run (on by default).
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate_data = validate;
        self
    }

    #[inline]
    pub fn rule(&self) -> &RuleSet {
        &self.rule
    }

    #[inline]
    pub fn expiry(&self) -> &ExpiryConvention {
        &self.expiry
    }

    /// First scanned index: the configured start, never below the rule's warmup.
    #[inline]
    pub fn start(&self) -> usize {
        self.start_index.max(self.rule.warmup())
    }

    /// Evaluate every index from [`start`](Self::start) on and settle the accepted signals.
    ///
    /// The rule at index `i` sees `bars[..=i]` only; settlement reads the entry and expiry
    /// candles after it.
    pub fn run<T: OHLCV>(&self, bars: &[T], symbol: &str) -> Result<Vec<SetupRecord>> {
        if self.validate_data {
            validate_series(bars)?;
        }

        let start = self.start();
        debug!(
            symbol,
            rule = self.rule.name(),
            candles = bars.len(),
            start,
            "backtest started"
        );

        let mut records = Vec::new();
        for i in start..bars.len() {
            let evaluation = self.rule.evaluate(&bars[..=i], symbol, Some(i))?;
            if !evaluation.signal.is_some() {
                continue;
            }

            let settlement = settle(bars, i, evaluation.signal, &self.expiry);
            trace!(
                symbol,
                index = i,
                signal = %evaluation.signal,
                result = %settlement.outcome,
                "setup recorded"
            );

            records.push(SetupRecord {
                index: i,
                timestamp: bars[i].timestamp(),
                symbol: symbol.to_string(),
                rule: self.rule.name(),
                signal: evaluation.signal,
                result: settlement.outcome,
                entry_price: settlement.entry_price,
                expiry_price: settlement.expiry_price,
                conditions: evaluation.conditions,
            });
        }

        debug!(symbol, setups = records.len(), "backtest finished");
        Ok(records)
    }

    /// [`run`](Self::run) plus aggregated statistics.
    pub fn run_with_stats<T: OHLCV>(&self, bars: &[T], symbol: &str) -> Result<BacktestResult> {
        let records = self.run(bars, symbol)?;
        let stats = aggregate(&records);
        Ok(BacktestResult {
            symbol: symbol.to_string(),
            records,
            stats,
        })
    }
}

/// Validate `config` and backtest its rule set over `bars`.
pub fn run_backtest<T: OHLCV>(
    bars: &[T],
    symbol: &str,
    config: &StrategyConfig,
) -> Result<Vec<SetupRecord>> {
    Backtester::from_config(config)?.run(bars, symbol)
}

// ============================================================
// PARALLEL BACKTESTING
// ============================================================

/// Backtest of a single instrument
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BacktestResult {
    pub symbol: String,
    pub records: Vec<SetupRecord>,
    pub stats: BacktestStats,
}

/// Error from backtesting a single instrument
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestError {
    pub symbol: String,
    pub error: SignalError,
}

/// Parallel backtest of multiple instruments
///
/// Returns successful results and per-instrument errors.
pub fn backtest_parallel<'a, T, I>(
    backtester: &Backtester,
    instruments: I,
) -> (Vec<BacktestResult>, Vec<BacktestError>)
where
    T: OHLCV + Sync + 'a,
    I: IntoParallelIterator<Item = (&'a str, &'a [T])>,
{
    let results: Vec<_> = instruments
        .into_par_iter()
        .map(|(symbol, bars)| {
            backtester
                .run_with_stats(bars, symbol)
                .map_err(|error| BacktestError {
                    symbol: symbol.to_string(),
                    error,
                })
        })
        .collect();

    let mut successes = Vec::new();
    let mut errors = Vec::new();

    for result in results {
        match result {
            Ok(r) => successes.push(r),
            Err(e) => errors.push(e),
        }
    }

    (successes, errors)
}
