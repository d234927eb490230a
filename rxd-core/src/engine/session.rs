//! Sequential replay of a bar series through strategy and broker.
//!
//! Indicators are precomputed once before the loop. Each bar then runs:
//! 1. Broker: protective levels checked against the new bar
//! 2. Strategy: scorers advance, a decision may be emitted
//! 3. Broker: the decision is executed at the bar's close

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::StrategyConfig;
use crate::decision::DecisionMode;
use crate::domain::{Bar, Direction, TradeDecision};
use crate::error::ConfigError;
use crate::indicators::IndicatorSet;
use crate::strategy::RxdStrategy;

use super::broker::{ClosedTrade, ExecutionPort, Fill, PaperBroker};

/// Ordered output of a session, one JSON line each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    Decision(TradeDecision),
    Fill(Fill),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub symbol: String,
    pub mode: DecisionMode,
    pub bars: usize,
    pub void_bars: usize,
    pub long_decisions: usize,
    pub short_decisions: usize,
    pub fills: usize,
    pub closed_trades: usize,
    pub realized_pnl: Decimal,
    /// Signed net position after the last bar.
    pub final_position: Decimal,
}

#[derive(Debug, Clone)]
pub struct SessionReport {
    pub events: Vec<SessionEvent>,
    pub trades: Vec<ClosedTrade>,
    pub summary: SessionSummary,
}

impl SessionReport {
    pub fn decisions(&self) -> impl Iterator<Item = &TradeDecision> {
        self.events.iter().filter_map(|e| match e {
            SessionEvent::Decision(d) => Some(d),
            SessionEvent::Fill(_) => None,
        })
    }

    pub fn fills(&self) -> impl Iterator<Item = &Fill> {
        self.events.iter().filter_map(|e| match e {
            SessionEvent::Fill(f) => Some(f),
            SessionEvent::Decision(_) => None,
        })
    }
}

/// Replay `bars` through a fresh strategy and paper broker.
pub fn run_session(config: &StrategyConfig, bars: &[Bar]) -> Result<SessionReport, ConfigError> {
    let mut strategy = RxdStrategy::new(config)?;
    let mut broker = PaperBroker::new(config.execution.volume);
    let indicators = IndicatorSet::precompute(&config.indicators, bars);

    let mut events = Vec::new();
    let mut void_bars = 0;
    let (mut long_decisions, mut short_decisions, mut fill_count) = (0, 0, 0);

    for (t, bar) in bars.iter().enumerate() {
        if bar.is_void() {
            void_bars += 1;
        }

        for fill in broker.on_bar(bar) {
            fill_count += 1;
            events.push(SessionEvent::Fill(fill));
        }

        let snapshot = indicators.snapshot(t);
        let position = broker.position();
        let Some(decision) = strategy.on_bar(bar, &snapshot, &position) else {
            continue;
        };
        match decision.direction {
            Direction::Long => long_decisions += 1,
            Direction::Short => short_decisions += 1,
            Direction::Flat => {}
        }

        let fills = broker.execute(&decision, bar);
        events.push(SessionEvent::Decision(decision));
        match fills {
            Ok(fills) => {
                fill_count += fills.len();
                events.extend(fills.into_iter().map(SessionEvent::Fill));
            }
            Err(e) => warn!(error = %e, "decision not executed"),
        }
    }

    let summary = SessionSummary {
        symbol: config.symbol.clone(),
        mode: config.mode,
        bars: bars.len(),
        void_bars,
        long_decisions,
        short_decisions,
        fills: fill_count,
        closed_trades: broker.trades().len(),
        realized_pnl: broker.realized_pnl(),
        final_position: broker.position().net,
    };
    info!(
        bars = summary.bars,
        long = summary.long_decisions,
        short = summary.short_decisions,
        trades = summary.closed_trades,
        pnl = %summary.realized_pnl,
        "session complete"
    );

    Ok(SessionReport {
        events,
        trades: broker.trades().to_vec(),
        summary,
    })
}
