use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Instrument metadata: the minimum price increment protective distances
/// snap to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Instrument {
    pub symbol: String,
    pub price_step: Decimal,
}

impl Instrument {
    /// Create an instrument. A non-positive price step is rejected.
    pub fn new(symbol: impl Into<String>, price_step: Decimal) -> Result<Self, InstrumentError> {
        if price_step <= Decimal::ZERO {
            return Err(InstrumentError::InvalidPriceStep(price_step));
        }
        Ok(Self {
            symbol: symbol.into(),
            price_step,
        })
    }
}

/// Round `value` to the nearest multiple of `step` (half away from zero).
///
/// `step` must be positive; callers validate it once at construction.
/// `None` when the step count leaves the decimal range.
pub fn round_to_step(value: Decimal, step: Decimal) -> Option<Decimal> {
    let steps = value
        .checked_div(step)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    Some(steps.checked_mul(step)?.normalize())
}

#[derive(Debug, Error, PartialEq)]
pub enum InstrumentError {
    #[error("price step must be positive, got {0}")]
    InvalidPriceStep(Decimal),
}
