use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::decision::Direction;

/// Read-only view of the collaborator's position, consulted when deciding
/// whether a signal needs a flatten before reversing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PositionState {
    /// Signed net position: positive long, negative short.
    pub net: Decimal,
    pub stop_price: Option<Decimal>,
    pub take_price: Option<Decimal>,
}

impl PositionState {
    pub fn flat() -> Self {
        Self::default()
    }

    pub fn side(&self) -> Direction {
        if self.net > Decimal::ZERO {
            Direction::Long
        } else if self.net < Decimal::ZERO {
            Direction::Short
        } else {
            Direction::Flat
        }
    }

    pub fn is_flat(&self) -> bool {
        self.net.is_zero()
    }
}
