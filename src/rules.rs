//! Signal rules
//!
//! A rule turns a candle series (and optionally a target index) into a [`Signal`] plus the full
//! set of intermediate conditions it looked at. Four rule sets are provided:
//!
//! | Rule set | Window | Touch strategy | Patterns | RSI |
//! |----------|--------|----------------|----------|-----|
//! | [`TwoCandleConfirmation`] | setup A = B-1, confirmation B | levels | strict hammer / star | soft |
//! | [`SetupOnly`] | setup A only | levels | strict hammer / star | soft |
//! | [`EngulfingReversal`] | last candle, >= 50 candles | rolling | engulfing or relaxed hammer / star | soft |
//! | [`BandReversal`] | last candle, >= 50 candles | rolling | engulfing, pin bar or doji | strict + Bollinger |
//!
//! Every rule only reads candles up to the target index. CALL conditions are checked before PUT
//! conditions.

use tracing::{debug, trace};

use crate::config::{Filters, RuleSetKind, StrategyConfig};
use crate::detectors::helpers::DEFAULT_ENGULFING_RATIO;
use crate::detectors::patterns::{doji, engulfing, pin_bar, PatternKind, PatternSet};
use crate::detectors::touch::{TouchFlags, TouchStrategy};
use crate::indicators::{
    bollinger_bands, rsi, rsi_strict, DEFAULT_BB_PERIOD, DEFAULT_BB_STD_DEV, DEFAULT_RSI_PERIOD,
};
use crate::{OHLCVExt, Result, Signal, OHLCV};

/// Minimum number of candles the single-candle rules need, whatever their touch strategy
pub const SINGLE_CANDLE_MIN_BARS: usize = 50;

// ============================================================
// CONDITION SET
// ============================================================

/// Condition names
pub mod keys {
    pub const CANDLE_A_TOUCH_HIGH: &str = "candle_a_touch_h";
    pub const CANDLE_A_TOUCH_LOW: &str = "candle_a_touch_l";
    pub const CANDLE_A_RSI: &str = "candle_a_rsi";
    pub const CANDLE_A_HAMMER: &str = "candle_a_hammer";
    pub const CANDLE_A_SHOOTING_STAR: &str = "candle_a_shooting_star";
    pub const CANDLE_B_BULLISH: &str = "candle_b_bullish";
    pub const CANDLE_B_BEARISH: &str = "candle_b_bearish";

    pub const TOUCH_HIGH: &str = "touch_h";
    pub const TOUCH_LOW: &str = "touch_l";
    pub const BULLISH_ENGULFING: &str = "bull_eng";
    pub const BEARISH_ENGULFING: &str = "bear_eng";
    pub const BULLISH_HAMMER: &str = "bull_hammer";
    pub const BEARISH_STAR: &str = "bear_star";
    pub const BULLISH_PIN_BAR: &str = "bull_pin";
    pub const BEARISH_PIN_BAR: &str = "bear_pin";
    pub const BULLISH_DOJI: &str = "bull_doji";
    pub const BEARISH_DOJI: &str = "bear_doji";
    pub const RSI: &str = "rsi";
    pub const UPPER_BAND: &str = "upper_bb";
    pub const MIDDLE_BAND: &str = "mid_bb";
    pub const LOWER_BAND: &str = "lower_bb";
    pub const DIRECTION_BULLISH: &str = "direction_bull";
    pub const DIRECTION_BEARISH: &str = "direction_bear";

    pub const TRIGGERED_PATTERN: &str = "triggered_pattern";
}

/// One diagnostic value
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Condition {
    Flag(bool),
    Value(f64),
    Pattern(Option<PatternKind>),
}

/// Ordered named diagnostics of one decision. Serializes as a map in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionSet {
    entries: Vec<(&'static str, Condition)>,
}

impl ConditionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `key`, keeping its original position.
    pub fn set(&mut self, key: &'static str, condition: Condition) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = condition,
            None => self.entries.push((key, condition)),
        }
    }

    pub fn flag(&mut self, key: &'static str, value: bool) -> &mut Self {
        self.set(key, Condition::Flag(value));
        self
    }

    pub fn value(&mut self, key: &'static str, value: f64) -> &mut Self {
        self.set(key, Condition::Value(value));
        self
    }

    pub fn pattern(&mut self, pattern: Option<PatternKind>) -> &mut Self {
        self.set(keys::TRIGGERED_PATTERN, Condition::Pattern(pattern));
        self
    }

    pub fn get(&self, key: &str) -> Option<Condition> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|&(_, condition)| condition)
    }

    pub fn get_flag(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            Condition::Flag(flag) => Some(flag),
            _ => None,
        }
    }

    pub fn get_value(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            Condition::Value(value) => Some(value),
            _ => None,
        }
    }

    /// The pattern that triggered the signal, if any.
    pub fn triggered_pattern(&self) -> Option<PatternKind> {
        match self.get(keys::TRIGGERED_PATTERN)? {
            Condition::Pattern(pattern) => pattern,
            _ => None,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Condition)> + '_ {
        self.entries.iter().copied()
    }
}

impl serde::Serialize for ConditionSet {
    fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = s.serialize_map(Some(self.entries.len()))?;
        for (key, condition) in &self.entries {
            map.serialize_entry(key, condition)?;
        }
        map.end()
    }
}

/// Decision of a rule at one index
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Evaluation {
    pub signal: Signal,
    pub conditions: ConditionSet,
}

impl Evaluation {
    /// NONE with no conditions: the index could not be evaluated.
    pub fn none() -> Self {
        Self::default()
    }
}

// ============================================================
// RULE TRAIT
// ============================================================

/// A named signal rule.
///
/// `index` selects the target candle in historical mode; `None` evaluates the latest candle.
/// Candles after the target index are never read.
pub trait SignalRule: Send + Sync {
    fn name(&self) -> &'static str;

    /// Smallest target index that can produce a signal.
    fn warmup(&self) -> usize;

    fn evaluate<T: OHLCV>(&self, bars: &[T], symbol: &str, index: Option<usize>)
        -> Result<Evaluation>;
}

// ============================================================
// SHARED SETUP FILTER
// ============================================================

/// Touch, pattern-variant and RSI parameters shared by the rules
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SetupFilter {
    pub min_touches: usize,
    pub touch_window_pips: f64,
    pub rsi_period: usize,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub touch: TouchStrategy,
    pub patterns: PatternSet,
}

impl SetupFilter {
    /// Filter with `filters` thresholds and the default RSI period.
    pub fn from_filters(filters: &Filters, touch: TouchStrategy, patterns: PatternSet) -> Self {
        Self {
            min_touches: filters.min_touches,
            touch_window_pips: filters.touch_window_pips,
            rsi_period: DEFAULT_RSI_PERIOD,
            rsi_oversold: filters.rsi_oversold,
            rsi_overbought: filters.rsi_overbought,
            touch,
            patterns,
        }
    }

    #[inline]
    pub fn touches<T: OHLCV>(&self, bars: &[T], symbol: &str) -> TouchFlags {
        self.touch
            .detect(bars, symbol, self.min_touches, self.touch_window_pips)
    }

    #[inline]
    pub fn is_oversold(&self, rsi: f64) -> bool {
        rsi < self.rsi_oversold
    }

    #[inline]
    pub fn is_overbought(&self, rsi: f64) -> bool {
        rsi > self.rsi_overbought
    }

    /// Touch, soft RSI and hammer/star of the last candle of `bars`.
    fn setup<T: OHLCV>(&self, bars: &[T], symbol: &str) -> CandleSetup {
        CandleSetup {
            touch: self.touches(bars, symbol),
            rsi: rsi(bars, self.rsi_period),
            hammer: self.patterns.hammer(bars),
            shooting_star: self.patterns.shooting_star(bars),
        }
    }
}

impl Default for SetupFilter {
    fn default() -> Self {
        Self::from_filters(
            &Filters::default(),
            TouchStrategy::default(),
            PatternSet::Strict,
        )
    }
}

struct CandleSetup {
    touch: TouchFlags,
    rsi: f64,
    hammer: bool,
    shooting_star: bool,
}

impl CandleSetup {
    fn record(&self, conditions: &mut ConditionSet) {
        conditions
            .flag(keys::CANDLE_A_TOUCH_HIGH, self.touch.resistance)
            .flag(keys::CANDLE_A_TOUCH_LOW, self.touch.support)
            .value(keys::CANDLE_A_RSI, self.rsi)
            .flag(keys::CANDLE_A_HAMMER, self.hammer)
            .flag(keys::CANDLE_A_SHOOTING_STAR, self.shooting_star);
    }

    fn call(&self, filter: &SetupFilter) -> bool {
        self.touch.support && self.hammer && filter.is_oversold(self.rsi)
    }

    fn put(&self, filter: &SetupFilter) -> bool {
        self.touch.resistance && self.shooting_star && filter.is_overbought(self.rsi)
    }
}

/// Confirmation index B for two-candle rules: `1 <= B < len`, or the last candle when live.
fn confirmation_index(len: usize, index: Option<usize>) -> Option<usize> {
    match index {
        Some(i) if i >= 1 && i < len => Some(i),
        Some(_) => None,
        None if len >= 2 => Some(len - 1),
        None => None,
    }
}

/// Candles up to and including the target index, when at least `min_bars` long.
fn single_candle_window<T>(bars: &[T], index: Option<usize>, min_bars: usize) -> Option<&[T]> {
    let window = match index {
        Some(i) if i < bars.len() => &bars[..=i],
        Some(_) => return None,
        None => bars,
    };
    (window.len() >= min_bars).then_some(window)
}

fn log_decision(rule: &'static str, symbol: &str, index: usize, evaluation: &Evaluation) {
    if evaluation.signal.is_some() {
        debug!(
            rule,
            symbol,
            index,
            signal = %evaluation.signal,
            pattern = ?evaluation.conditions.triggered_pattern(),
            "signal"
        );
    } else {
        trace!(rule, symbol, index, "no signal");
    }
}

// ============================================================
// TWO-CANDLE CONFIRMATION
// ============================================================

/// Setup on candle A (touch, strict hammer/star, soft RSI), direction confirmed by candle B.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TwoCandleConfirmation {
    pub filter: SetupFilter,
}

impl TwoCandleConfirmation {
    pub fn new(filter: SetupFilter) -> Self {
        Self { filter }
    }

    pub fn from_config(config: &StrategyConfig) -> Self {
        Self::new(SetupFilter::from_filters(
            &config.filters,
            TouchStrategy::levels(config.levels.lookback.get()),
            PatternSet::Strict,
        ))
    }
}

impl SignalRule for TwoCandleConfirmation {
    fn name(&self) -> &'static str {
        RuleSetKind::TwoCandleConfirmation.as_str()
    }

    fn warmup(&self) -> usize {
        1
    }

    fn evaluate<T: OHLCV>(
        &self,
        bars: &[T],
        symbol: &str,
        index: Option<usize>,
    ) -> Result<Evaluation> {
        let Some(b) = confirmation_index(bars.len(), index) else {
            return Ok(Evaluation::none());
        };

        let setup = self.filter.setup(&bars[..b], symbol);
        let confirm = &bars[b];
        let bullish = confirm.is_bullish();
        let bearish = confirm.is_bearish();

        let mut conditions = ConditionSet::new();
        setup.record(&mut conditions);
        conditions
            .flag(keys::CANDLE_B_BULLISH, bullish)
            .flag(keys::CANDLE_B_BEARISH, bearish)
            .pattern(None);

        let signal = if setup.call(&self.filter) && bullish {
            conditions.pattern(Some(PatternKind::Hammer));
            Signal::Call
        } else if setup.put(&self.filter) && bearish {
            conditions.pattern(Some(PatternKind::ShootingStar));
            Signal::Put
        } else {
            Signal::None
        };

        let evaluation = Evaluation { signal, conditions };
        log_decision(self.name(), symbol, b, &evaluation);
        Ok(evaluation)
    }
}

// ============================================================
// SETUP ONLY
// ============================================================

/// Setup on candle A without waiting for a confirmation candle.
///
/// Shares the index convention of [`TwoCandleConfirmation`]: for target index `i` the setup
/// candle is `i - 1`, and live evaluation treats the previous candle as the setup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetupOnly {
    pub filter: SetupFilter,
}

impl SetupOnly {
    pub fn new(filter: SetupFilter) -> Self {
        Self { filter }
    }

    pub fn from_config(config: &StrategyConfig) -> Self {
        Self::new(SetupFilter::from_filters(
            &config.filters,
            TouchStrategy::levels(config.levels.lookback.get()),
            PatternSet::Strict,
        ))
    }
}

impl SignalRule for SetupOnly {
    fn name(&self) -> &'static str {
        RuleSetKind::SetupOnly.as_str()
    }

    fn warmup(&self) -> usize {
        1
    }

    fn evaluate<T: OHLCV>(
        &self,
        bars: &[T],
        symbol: &str,
        index: Option<usize>,
    ) -> Result<Evaluation> {
        let Some(b) = confirmation_index(bars.len(), index) else {
            return Ok(Evaluation::none());
        };

        let setup = self.filter.setup(&bars[..b], symbol);
        let mut conditions = ConditionSet::new();
        setup.record(&mut conditions);
        conditions.pattern(None);

        let signal = if setup.call(&self.filter) {
            conditions.pattern(Some(PatternKind::Hammer));
            Signal::Call
        } else if setup.put(&self.filter) {
            conditions.pattern(Some(PatternKind::ShootingStar));
            Signal::Put
        } else {
            Signal::None
        };

        let evaluation = Evaluation { signal, conditions };
        log_decision(self.name(), symbol, b, &evaluation);
        Ok(evaluation)
    }
}

// ============================================================
// ENGULFING REVERSAL
// ============================================================

/// Single-candle reversal: rolling touch, engulfing or relaxed hammer/star, soft RSI and the
/// candle's own direction.
#[derive(Debug, Clone, PartialEq)]
pub struct EngulfingReversal {
    pub filter: SetupFilter,
    pub engulfing_ratio: f64,
}

impl EngulfingReversal {
    pub fn new(filter: SetupFilter, engulfing_ratio: f64) -> Self {
        Self {
            filter,
            engulfing_ratio,
        }
    }

    pub fn from_config(config: &StrategyConfig) -> Self {
        Self::new(
            SetupFilter::from_filters(
                &config.filters,
                TouchStrategy::rolling(),
                PatternSet::Relaxed,
            ),
            config.patterns.engulfing_min_ratio,
        )
    }
}

impl Default for EngulfingReversal {
    fn default() -> Self {
        Self::new(
            SetupFilter::from_filters(
                &Filters::default(),
                TouchStrategy::rolling(),
                PatternSet::Relaxed,
            ),
            DEFAULT_ENGULFING_RATIO,
        )
    }
}

impl SignalRule for EngulfingReversal {
    fn name(&self) -> &'static str {
        RuleSetKind::EngulfingReversal.as_str()
    }

    fn warmup(&self) -> usize {
        SINGLE_CANDLE_MIN_BARS - 1
    }

    fn evaluate<T: OHLCV>(
        &self,
        bars: &[T],
        symbol: &str,
        index: Option<usize>,
    ) -> Result<Evaluation> {
        let Some(window) = single_candle_window(bars, index, SINGLE_CANDLE_MIN_BARS) else {
            return Ok(Evaluation::none());
        };
        let Some(current) = window.last() else {
            return Ok(Evaluation::none());
        };

        let touch = self.filter.touches(window, symbol);
        let eng = engulfing(window, self.engulfing_ratio);
        let hammer = self.filter.patterns.hammer(window);
        let star = self.filter.patterns.shooting_star(window);
        let rsi_val = rsi(window, self.filter.rsi_period);
        let bullish = current.is_bullish();
        let bearish = current.is_bearish();

        let mut conditions = ConditionSet::new();
        conditions
            .flag(keys::TOUCH_HIGH, touch.resistance)
            .flag(keys::TOUCH_LOW, touch.support)
            .flag(keys::BULLISH_ENGULFING, eng.bullish)
            .flag(keys::BEARISH_ENGULFING, eng.bearish)
            .flag(keys::BULLISH_HAMMER, hammer)
            .flag(keys::BEARISH_STAR, star)
            .value(keys::RSI, rsi_val)
            .flag(keys::DIRECTION_BULLISH, bullish)
            .flag(keys::DIRECTION_BEARISH, bearish)
            .pattern(None);

        let signal = if touch.support
            && (eng.bullish || hammer)
            && self.filter.is_oversold(rsi_val)
            && bullish
        {
            conditions.pattern(Some(if eng.bullish {
                PatternKind::BullishEngulfing
            } else {
                PatternKind::Hammer
            }));
            Signal::Call
        } else if touch.resistance
            && (eng.bearish || star)
            && self.filter.is_overbought(rsi_val)
            && bearish
        {
            conditions.pattern(Some(if eng.bearish {
                PatternKind::BearishEngulfing
            } else {
                PatternKind::ShootingStar
            }));
            Signal::Put
        } else {
            Signal::None
        };

        let evaluation = Evaluation { signal, conditions };
        log_decision(self.name(), symbol, window.len() - 1, &evaluation);
        Ok(evaluation)
    }
}

// ============================================================
// BAND REVERSAL
// ============================================================

/// Single-candle reversal outside the Bollinger Bands: rolling touch, engulfing, pin bar or
/// doji, strict RSI and the candle's own direction.
///
/// Indicator failures (e.g. a Bollinger period longer than the window) are returned as errors.
#[derive(Debug, Clone, PartialEq)]
pub struct BandReversal {
    pub filter: SetupFilter,
    pub engulfing_ratio: f64,
    pub bb_period: usize,
    pub bb_std_dev: f64,
}

impl BandReversal {
    pub fn from_config(config: &StrategyConfig) -> Self {
        let indicators = &config.technical_indicators;
        let mut filter = SetupFilter::from_filters(
            &config.filters,
            TouchStrategy::rolling(),
            PatternSet::Relaxed,
        );
        filter.rsi_period = indicators.rsi.period.get();
        filter.rsi_oversold = indicators.rsi.oversold;
        filter.rsi_overbought = indicators.rsi.overbought;

        Self {
            filter,
            engulfing_ratio: config.patterns.engulfing_min_ratio,
            bb_period: indicators.bollinger_bands.period.get(),
            bb_std_dev: indicators.bollinger_bands.std_dev,
        }
    }
}

impl Default for BandReversal {
    fn default() -> Self {
        Self {
            filter: SetupFilter::from_filters(
                &Filters::default(),
                TouchStrategy::rolling(),
                PatternSet::Relaxed,
            ),
            engulfing_ratio: DEFAULT_ENGULFING_RATIO,
            bb_period: DEFAULT_BB_PERIOD,
            bb_std_dev: DEFAULT_BB_STD_DEV,
        }
    }
}

impl SignalRule for BandReversal {
    fn name(&self) -> &'static str {
        RuleSetKind::BandReversal.as_str()
    }

    fn warmup(&self) -> usize {
        SINGLE_CANDLE_MIN_BARS - 1
    }

    fn evaluate<T: OHLCV>(
        &self,
        bars: &[T],
        symbol: &str,
        index: Option<usize>,
    ) -> Result<Evaluation> {
        let Some(window) = single_candle_window(bars, index, SINGLE_CANDLE_MIN_BARS) else {
            return Ok(Evaluation::none());
        };
        let Some(current) = window.last() else {
            return Ok(Evaluation::none());
        };

        let touch = self.filter.touches(window, symbol);
        let eng = engulfing(window, self.engulfing_ratio);
        let bull_pin = pin_bar(window, true);
        let bear_pin = pin_bar(window, false);
        let is_doji = doji(window, symbol);
        let rsi_val = rsi_strict(window, self.filter.rsi_period)?;
        let bands = bollinger_bands(window, self.bb_period, self.bb_std_dev)?;
        let close = current.close();
        let bullish = current.is_bullish();
        let bearish = current.is_bearish();

        let mut conditions = ConditionSet::new();
        conditions
            .flag(keys::TOUCH_HIGH, touch.resistance)
            .flag(keys::TOUCH_LOW, touch.support)
            .flag(keys::BULLISH_ENGULFING, eng.bullish)
            .flag(keys::BEARISH_ENGULFING, eng.bearish)
            .flag(keys::BULLISH_PIN_BAR, bull_pin)
            .flag(keys::BEARISH_PIN_BAR, bear_pin)
            .flag(keys::BULLISH_DOJI, is_doji)
            .flag(keys::BEARISH_DOJI, is_doji)
            .value(keys::RSI, rsi_val)
            .value(keys::UPPER_BAND, bands.upper)
            .value(keys::MIDDLE_BAND, bands.middle)
            .value(keys::LOWER_BAND, bands.lower)
            .flag(keys::DIRECTION_BULLISH, bullish)
            .flag(keys::DIRECTION_BEARISH, bearish)
            .pattern(None);

        let bull_pattern = if eng.bullish {
            Some(PatternKind::BullishEngulfing)
        } else if bull_pin {
            Some(PatternKind::BullishPinBar)
        } else if is_doji {
            Some(PatternKind::Doji)
        } else {
            None
        };
        let bear_pattern = if eng.bearish {
            Some(PatternKind::BearishEngulfing)
        } else if bear_pin {
            Some(PatternKind::BearishPinBar)
        } else if is_doji {
            Some(PatternKind::Doji)
        } else {
            None
        };

        let call = touch.support
            && bull_pattern.is_some()
            && self.filter.is_oversold(rsi_val)
            && bullish
            && close < bands.lower;
        let put = touch.resistance
            && bear_pattern.is_some()
            && self.filter.is_overbought(rsi_val)
            && bearish
            && close > bands.upper;

        let signal = if call {
            conditions.pattern(bull_pattern);
            Signal::Call
        } else if put {
            conditions.pattern(bear_pattern);
            Signal::Put
        } else {
            Signal::None
        };

        let evaluation = Evaluation { signal, conditions };
        log_decision(self.name(), symbol, window.len() - 1, &evaluation);
        Ok(evaluation)
    }
}

// ============================================================
// RULE SET - enum dispatch
// ============================================================

macro_rules! define_rule_sets {
    ($($variant:ident($rule:ty)),* $(,)?) => {
        /// Rule selected by configuration - fast path via enum dispatch
        #[derive(Debug, Clone, PartialEq)]
        pub enum RuleSet {
            $($variant($rule)),*
        }

        impl RuleSet {
            pub fn kind(&self) -> RuleSetKind {
                match self {
                    $(Self::$variant(_) => RuleSetKind::$variant),*
                }
            }

            /// Build the rule named by `config.rule_set`. The config is expected to be validated.
            pub fn from_config(config: &StrategyConfig) -> Self {
                match config.rule_set {
                    $(RuleSetKind::$variant => Self::$variant(<$rule>::from_config(config))),*
                }
            }
        }

        impl SignalRule for RuleSet {
            #[inline]
            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant(r) => r.name()),*
                }
            }

            #[inline]
            fn warmup(&self) -> usize {
                match self {
                    $(Self::$variant(r) => r.warmup()),*
                }
            }

            #[inline]
            fn evaluate<T: OHLCV>(
                &self,
                bars: &[T],
                symbol: &str,
                index: Option<usize>,
            ) -> Result<Evaluation> {
                match self {
                    $(Self::$variant(r) => r.evaluate(bars, symbol, index)),*
                }
            }
        }

        $(impl From<$rule> for RuleSet {
            fn from(rule: $rule) -> Self {
                Self::$variant(rule)
            }
        })*
    };
}

define_rule_sets! {
    TwoCandleConfirmation(TwoCandleConfirmation),
    SetupOnly(SetupOnly),
    EngulfingReversal(EngulfingReversal),
    BandReversal(BandReversal),
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::TwoCandleConfirmation(TwoCandleConfirmation::default())
    }
}
