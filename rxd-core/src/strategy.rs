//! RxdStrategy: one finished bar in, at most one trade decision out.
//!
//! Per bar: both LWMA chains and every scorer advance, the filter bank reads
//! the indicator snapshot, the multiplexer picks a direction, and the
//! protective calculator sizes stop and take for a new entry.
//!
//! # Architecture invariant
//! The strategy never mutates position state. It reads a [`PositionState`]
//! only to suppress entries on the side already held and to flag reversals.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::config::StrategyConfig;
use crate::decision::{DecisionMode, DecisionMultiplexer, Scores};
use crate::domain::{Bar, Direction, Instrument, PositionState, Sample, TradeDecision};
use crate::error::ConfigError;
use crate::filters::FilterBank;
use crate::indicators::IndicatorSnapshot;
use crate::perceptron::{PerceptronScorer, ScorerRole};
use crate::protective::ProtectiveOrderCalculator;

#[derive(Debug)]
pub struct RxdStrategy {
    instrument: Instrument,
    supervisor: PerceptronScorer,
    long: PerceptronScorer,
    short: PerceptronScorer,
    bank: FilterBank,
    multiplexer: DecisionMultiplexer,
    protective: ProtectiveOrderCalculator,
    last_scores: Scores,
    bars_seen: usize,
}

impl RxdStrategy {
    pub fn new(config: &StrategyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            instrument: config.instrument()?,
            supervisor: PerceptronScorer::new(ScorerRole::Supervisor, config.supervisor.clone())?,
            long: PerceptronScorer::new(ScorerRole::Long, config.long.clone())?,
            short: PerceptronScorer::new(ScorerRole::Short, config.short.clone())?,
            bank: FilterBank::new(&config.filters),
            multiplexer: DecisionMultiplexer::new(config.mode),
            protective: ProtectiveOrderCalculator::new(config.protective.clone())?,
            last_scores: Scores::default(),
            bars_seen: 0,
        })
    }

    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    pub fn mode(&self) -> DecisionMode {
        self.multiplexer.mode()
    }

    pub fn filter_bank(&self) -> &FilterBank {
        &self.bank
    }

    /// Scores computed on the most recent bar.
    pub fn last_scores(&self) -> Scores {
        self.last_scores
    }

    pub fn bars_seen(&self) -> usize {
        self.bars_seen
    }

    /// Clear every buffer and score. Safe before any data and when repeated.
    pub fn reset(&mut self) {
        self.supervisor.reset();
        self.long.reset();
        self.short.reset();
        self.last_scores = Scores::default();
        self.bars_seen = 0;
    }

    /// Process one finished bar.
    ///
    /// Returns a decision only when it is actionable: a non-flat direction
    /// that the position does not already hold.
    pub fn on_bar(
        &mut self,
        bar: &Bar,
        snapshot: &IndicatorSnapshot,
        position: &PositionState,
    ) -> Option<TradeDecision> {
        let Some(sample) = Sample::from_bar(bar) else {
            warn!(date = %bar.date, "void bar skipped");
            return None;
        };
        self.bars_seen += 1;

        for scorer in [&mut self.supervisor, &mut self.long, &mut self.short] {
            scorer.update(&sample);
        }
        let scores = Scores {
            supervisor: self.supervisor.score(),
            long: self.long.score(),
            short: self.short.score(),
        };
        self.last_scores = scores;

        let permit = self.bank.evaluate(snapshot);
        let direction = self.multiplexer.decide(&scores, permit.as_ref());
        debug!(
            date = %bar.date,
            supervisor = ?scores.supervisor,
            long = ?scores.long,
            short = ?scores.short,
            long_allowed = permit.as_ref().map(|p| p.long_allowed),
            short_allowed = permit.as_ref().map(|p| p.short_allowed),
            blocked_long = ?permit.as_ref().map(|p| &p.blocked_long),
            blocked_short = ?permit.as_ref().map(|p| &p.blocked_short),
            ?direction,
            "bar evaluated"
        );

        if direction.is_flat() {
            return None;
        }
        let held = position.side();
        if held == direction {
            return None;
        }

        let atr = snapshot.atr.and_then(Decimal::from_f64);
        let distances = self
            .protective
            .compute(direction, self.instrument.price_step, atr)
            .unwrap_or_default();
        let decision = TradeDecision {
            date: bar.date,
            direction,
            take_profit_distance: distances.take,
            stop_loss_distance: distances.stop,
            flatten_first: held == direction.opposite(),
        };
        info!(
            date = %decision.date,
            direction = ?decision.direction,
            take = ?decision.take_profit_distance,
            stop = ?decision.stop_loss_distance,
            flatten_first = decision.flatten_first,
            "decision"
        );
        Some(decision)
    }
}
