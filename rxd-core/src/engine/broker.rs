//! Paper execution collaborator.
//!
//! Market orders fill at the decision bar's close with a fixed volume. An
//! opposite position is flattened first. Stop and take levels are anchored to
//! the entry fill and checked against each later bar, stop before take; a bar
//! that gaps through a level fills at its open.

use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{Bar, Direction, PositionState, TradeDecision};
use crate::error::ExecutionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillReason {
    Entry,
    Flatten,
    StopLoss,
    TakeProfit,
}

/// One executed market order. `side` is Long for a buy and Short for a sell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub date: NaiveDate,
    pub side: Direction,
    pub quantity: Decimal,
    pub price: Decimal,
    pub reason: FillReason,
}

/// A completed round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedTrade {
    pub side: Direction,
    pub quantity: Decimal,
    pub entry_date: NaiveDate,
    pub entry_price: Decimal,
    pub exit_date: NaiveDate,
    pub exit_price: Decimal,
    pub exit_reason: FillReason,
    pub pnl: Decimal,
}

/// Receives decisions from the strategy and owns the position.
pub trait ExecutionPort {
    /// Current position, read by the strategy before deciding.
    fn position(&self) -> PositionState;

    /// Check protective levels against a new bar. Called before the
    /// strategy sees the bar.
    fn on_bar(&mut self, bar: &Bar) -> Vec<Fill>;

    /// Act on a decision emitted for `bar`.
    fn execute(&mut self, decision: &TradeDecision, bar: &Bar) -> Result<Vec<Fill>, ExecutionError>;
}

#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    date: NaiveDate,
    price: Decimal,
}

#[derive(Debug, Clone)]
pub struct PaperBroker {
    volume: Decimal,
    position: PositionState,
    entry: Option<OpenEntry>,
    trades: Vec<ClosedTrade>,
}

impl PaperBroker {
    /// `volume` must be positive; the config layer validates it.
    pub fn new(volume: Decimal) -> Self {
        Self {
            volume,
            position: PositionState::flat(),
            entry: None,
            trades: Vec::new(),
        }
    }

    pub fn trades(&self) -> &[ClosedTrade] {
        &self.trades
    }

    pub fn realized_pnl(&self) -> Decimal {
        self.trades
            .iter()
            .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.pnl))
    }

    fn close(&mut self, date: NaiveDate, price: Decimal, reason: FillReason) -> Option<Fill> {
        let side = self.position.side();
        if side.is_flat() {
            return None;
        }
        let net = self.position.net;
        let quantity = net.abs();
        if let Some(entry) = self.entry.take() {
            let pnl = price.saturating_sub(entry.price).saturating_mul(net);
            info!(%date, ?side, %price, %pnl, ?reason, "position closed");
            self.trades.push(ClosedTrade {
                side,
                quantity,
                entry_date: entry.date,
                entry_price: entry.price,
                exit_date: date,
                exit_price: price,
                exit_reason: reason,
                pnl,
            });
        }
        self.position = PositionState::flat();
        Some(Fill {
            date,
            side: side.opposite(),
            quantity,
            price,
            reason,
        })
    }

    /// First protective level the bar touches, with its fill price.
    fn triggered(&self, bar: &Bar) -> Option<(Decimal, FillReason)> {
        let open = Decimal::from_f64(bar.open)?;
        let high = Decimal::from_f64(bar.high)?;
        let low = Decimal::from_f64(bar.low)?;
        let p = &self.position;
        match p.side() {
            Direction::Long => {
                if let Some(stop) = p.stop_price.filter(|s| low <= *s) {
                    return Some((stop.min(open), FillReason::StopLoss));
                }
                p.take_price
                    .filter(|t| high >= *t)
                    .map(|take| (take.max(open), FillReason::TakeProfit))
            }
            Direction::Short => {
                if let Some(stop) = p.stop_price.filter(|s| high >= *s) {
                    return Some((stop.max(open), FillReason::StopLoss));
                }
                p.take_price
                    .filter(|t| low <= *t)
                    .map(|take| (take.min(open), FillReason::TakeProfit))
            }
            Direction::Flat => None,
        }
    }
}

impl ExecutionPort for PaperBroker {
    fn position(&self) -> PositionState {
        self.position
    }

    fn on_bar(&mut self, bar: &Bar) -> Vec<Fill> {
        if bar.is_void() {
            return Vec::new();
        }
        match self.triggered(bar) {
            Some((price, reason)) => self.close(bar.date, price, reason).into_iter().collect(),
            None => Vec::new(),
        }
    }

    fn execute(&mut self, decision: &TradeDecision, bar: &Bar) -> Result<Vec<Fill>, ExecutionError> {
        let direction = decision.direction;
        let held = self.position.side();
        if direction.is_flat() || held == direction {
            return Ok(Vec::new());
        }
        let price = Decimal::from_f64(bar.close)
            .ok_or(ExecutionError::Unpriceable { date: bar.date })?;

        let mut fills = Vec::with_capacity(2);
        if !held.is_flat() {
            fills.extend(self.close(bar.date, price, FillReason::Flatten));
        }

        let sign = Decimal::from(direction.signum());
        self.position = PositionState {
            net: self.volume * sign,
            stop_price: decision
                .stop_loss_distance
                .and_then(|d| price.checked_sub(sign * d)),
            take_price: decision
                .take_profit_distance
                .and_then(|d| price.checked_add(sign * d)),
        };
        self.entry = Some(OpenEntry {
            date: bar.date,
            price,
        });
        info!(
            date = %bar.date,
            ?direction,
            %price,
            quantity = %self.volume,
            stop = ?self.position.stop_price,
            take = ?self.position.take_price,
            "entry filled"
        );
        fills.push(Fill {
            date: bar.date,
            side: direction,
            quantity: self.volume,
            price,
            reason: FillReason::Entry,
        });
        Ok(fills)
    }
}
