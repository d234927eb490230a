//! Bar and Sample: the per-bar market data units.

use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// OHLCV bar for a single finished period.
///
/// Prices stay `f64` because every indicator in `crate::indicators` is a
/// float series. The scorers work on [`Sample`], the decimal projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: u64,
}

impl Bar {
    /// Returns true if any OHLC field is NaN (void bar).
    pub fn is_void(&self) -> bool {
        self.open.is_nan() || self.high.is_nan() || self.low.is_nan() || self.close.is_nan()
    }

    /// Basic OHLC sanity check: high >= low, high >= open, high >= close, etc.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
    }

    /// Median price (high + low) / 2, the input series of the Awesome Oscillator.
    pub fn median_price(&self) -> f64 {
        (self.high + self.low) / 2.0
    }

    /// Typical price (high + low + close) / 3, the input series of CCI.
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }
}

/// Decimal close and weighted price of one finished bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub close: Decimal,
    pub weighted: Decimal,
}

impl Sample {
    pub fn new(close: Decimal, weighted: Decimal) -> Self {
        Self { close, weighted }
    }

    /// Project a bar into decimal space: close and (high + low + 2·close) / 4.
    /// Void bars and values outside the decimal range produce `None`.
    pub fn from_bar(bar: &Bar) -> Option<Self> {
        if bar.is_void() {
            return None;
        }
        let high = Decimal::from_f64(bar.high)?;
        let low = Decimal::from_f64(bar.low)?;
        let close = Decimal::from_f64(bar.close)?;
        let weighted = high
            .checked_add(low)?
            .checked_add(close.checked_mul(Decimal::TWO)?)?
            .checked_div(Decimal::from(4))?;
        Some(Self { close, weighted })
    }
}
