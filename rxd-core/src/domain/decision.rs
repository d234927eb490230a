//! Trade decisions emitted to the execution collaborator.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a decision: short, flat (no decision) or long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Short,
    Flat,
    Long,
}

impl Direction {
    /// -1, 0 or +1.
    pub fn signum(self) -> i8 {
        match self {
            Self::Short => -1,
            Self::Flat => 0,
            Self::Long => 1,
        }
    }

    pub fn is_flat(self) -> bool {
        self == Self::Flat
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Short => Self::Long,
            Self::Flat => Self::Flat,
            Self::Long => Self::Short,
        }
    }
}

/// Stop-loss and take-profit distances in price units, already snapped to
/// the instrument's price step. A missing leg means no protective order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProtectiveDistances {
    pub take: Option<Decimal>,
    pub stop: Option<Decimal>,
}

/// One actionable decision for a finished bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeDecision {
    pub date: NaiveDate,
    pub direction: Direction,
    pub take_profit_distance: Option<Decimal>,
    pub stop_loss_distance: Option<Decimal>,
    /// An opposite position is open and must be closed before entering.
    pub flatten_first: bool,
}

impl TradeDecision {
    pub fn protective(&self) -> ProtectiveDistances {
        ProtectiveDistances {
            take: self.take_profit_distance,
            stop: self.stop_loss_distance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn direction_signum() {
        assert_eq!(Direction::Short.signum(), -1);
        assert_eq!(Direction::Flat.signum(), 0);
        assert_eq!(Direction::Long.signum(), 1);
        assert_eq!(Direction::Long.opposite(), Direction::Short);
        assert_eq!(Direction::Flat.opposite(), Direction::Flat);
    }

    #[test]
    fn decision_serializes_direction_lowercase() {
        let decision = TradeDecision {
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            direction: Direction::Long,
            take_profit_distance: Some(dec!(0.25)),
            stop_loss_distance: None,
            flatten_first: false,
        };
        let json = serde_json::to_string(&decision).unwrap();
        assert!(json.contains("\"direction\":\"long\""));
        let back: TradeDecision = serde_json::from_str(&json).unwrap();
        assert_eq!(back, decision);
        assert_eq!(back.protective().take, Some(dec!(0.25)));
    }
}
