//! Decision multiplexer: mode-selected policy over scores and filter verdicts.
//!
//! Every mode is one arm of a single `match`; modes never fall through into
//! each other. A missing score is "no signal" and an exact zero is a tie,
//! both of which resolve to [`Direction::Flat`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::Direction;
use crate::filters::DirectionalPermit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionMode {
    /// Filter bank alone decides; long has priority.
    Indicator,
    /// Disabled: never trades.
    Grid,
    /// Short specialist gated by the bank.
    AiShort,
    /// Long specialist gated by the bank.
    AiLong,
    /// Supervisor and specialist must agree, and the bank must allow the side.
    #[default]
    AiFilter,
}

/// Scores of the three perceptrons for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scores {
    pub supervisor: Option<Decimal>,
    pub long: Option<Decimal>,
    pub short: Option<Decimal>,
}

fn positive(score: Option<Decimal>) -> bool {
    matches!(score, Some(v) if v > Decimal::ZERO)
}

fn negative(score: Option<Decimal>) -> bool {
    matches!(score, Some(v) if v < Decimal::ZERO)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionMultiplexer {
    mode: DecisionMode,
}

impl DecisionMultiplexer {
    pub fn new(mode: DecisionMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> DecisionMode {
        self.mode
    }

    /// `permit` is `None` when the filter bank is disabled.
    pub fn decide(&self, scores: &Scores, permit: Option<&DirectionalPermit>) -> Direction {
        let long_ok = permit.map_or(true, |p| p.long_allowed);
        let short_ok = permit.map_or(true, |p| p.short_allowed);

        match self.mode {
            DecisionMode::Indicator => match permit {
                Some(p) if p.long_allowed => Direction::Long,
                Some(p) if p.short_allowed => Direction::Short,
                _ => Direction::Flat,
            },
            DecisionMode::Grid => Direction::Flat,
            DecisionMode::AiShort => {
                if negative(scores.short) && short_ok {
                    Direction::Short
                } else {
                    Direction::Flat
                }
            }
            DecisionMode::AiLong => {
                if positive(scores.long) && long_ok {
                    Direction::Long
                } else {
                    Direction::Flat
                }
            }
            DecisionMode::AiFilter => {
                if positive(scores.supervisor) && positive(scores.long) && long_ok {
                    Direction::Long
                } else if negative(scores.supervisor) && negative(scores.short) && short_ok {
                    Direction::Short
                } else {
                    Direction::Flat
                }
            }
        }
    }
}
