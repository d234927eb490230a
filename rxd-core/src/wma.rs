//! Linear (triangular) weighted moving average.
//!
//! Over a window of `length` samples the newest weighs `length`, the one
//! before `length - 1`, down to 1 for the oldest:
//! LWMA = Σ(sample·weight) / Σ(weight), Σ(weight) = length·(length+1)/2.

use rust_decimal::Decimal;
use std::collections::VecDeque;

use crate::domain::Sample;
use crate::error::ConfigError;

/// Rolling LWMA over a single series. Not ready until `length` samples.
#[derive(Debug, Clone)]
pub struct LinearWeightedAverage {
    length: usize,
    denominator: Decimal,
    window: VecDeque<Decimal>,
}

impl LinearWeightedAverage {
    pub fn new(length: usize) -> Result<Self, ConfigError> {
        if length == 0 {
            return Err(ConfigError::ZeroMaLength);
        }
        let n = Decimal::from(length as u64);
        Ok(Self {
            length,
            denominator: n * (n + Decimal::ONE) / Decimal::TWO,
            window: VecDeque::with_capacity(length),
        })
    }

    /// Push a sample; returns the average once the window is full and the
    /// weighted sum stays inside the decimal range.
    pub fn update(&mut self, value: Decimal) -> Option<Decimal> {
        if self.window.len() == self.length {
            self.window.pop_front();
        }
        self.window.push_back(value);
        self.value()
    }

    pub fn value(&self) -> Option<Decimal> {
        if self.window.len() < self.length {
            return None;
        }
        let numerator = self
            .window
            .iter()
            .enumerate()
            .try_fold(Decimal::ZERO, |acc, (i, v)| {
                acc.checked_add(v.checked_mul(Decimal::from(i as u64 + 1))?)
            })?;
        numerator.checked_div(self.denominator)
    }

    pub fn clear(&mut self) {
        self.window.clear();
    }
}

/// Close and weighted-price LWMAs advanced together.
///
/// Only the weighted-price average feeds the scorer; the close average gates
/// readiness.
#[derive(Debug, Clone)]
pub struct WeightedAverageChain {
    close: LinearWeightedAverage,
    weighted: LinearWeightedAverage,
}

impl WeightedAverageChain {
    pub fn new(length: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            close: LinearWeightedAverage::new(length)?,
            weighted: LinearWeightedAverage::new(length)?,
        })
    }

    /// Advance both series; returns the weighted-price average once both are ready.
    pub fn update(&mut self, sample: &Sample) -> Option<Decimal> {
        let close = self.close.update(sample.close);
        let weighted = self.weighted.update(sample.weighted);
        close.and(weighted)
    }

    pub fn clear(&mut self) {
        self.close.clear();
        self.weighted.clear();
    }
}
