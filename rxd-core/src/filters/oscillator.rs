//! Oscillator filters: MACD, OsMA, RSI, CCI, AO and AC.

use super::{ConfirmationFilter, SideVerdict};
use crate::indicators::IndicatorSnapshot;

fn sign(value: f64) -> SideVerdict {
    SideVerdict::new(value > 0.0, value < 0.0)
}

/// Sign of the MACD line, or a line/signal crossover when `require_cross`.
#[derive(Debug, Clone)]
pub struct MacdFilter {
    pub require_cross: bool,
}

impl MacdFilter {
    pub fn new(require_cross: bool) -> Self {
        Self { require_cross }
    }
}

impl ConfirmationFilter for MacdFilter {
    fn name(&self) -> &'static str {
        "macd"
    }

    fn check(&self, snapshot: &IndicatorSnapshot) -> Option<SideVerdict> {
        let current = snapshot.macd?;
        if !self.require_cross {
            return Some(sign(current.line));
        }
        let previous = snapshot.prev_macd?;
        Some(SideVerdict::new(
            previous.line <= previous.signal && current.line > current.signal,
            previous.line >= previous.signal && current.line < current.signal,
        ))
    }
}

/// Sign of the MACD histogram.
#[derive(Debug, Clone)]
pub struct OsmaFilter;

impl ConfirmationFilter for OsmaFilter {
    fn name(&self) -> &'static str {
        "osma"
    }

    fn check(&self, snapshot: &IndicatorSnapshot) -> Option<SideVerdict> {
        Some(sign(snapshot.macd?.histogram))
    }
}

#[derive(Debug, Clone)]
pub struct RsiFilter {
    pub long_level: f64,
    pub short_level: f64,
}

impl RsiFilter {
    pub fn new(long_level: f64, short_level: f64) -> Self {
        Self { long_level, short_level }
    }
}

impl ConfirmationFilter for RsiFilter {
    fn name(&self) -> &'static str {
        "rsi"
    }

    fn check(&self, snapshot: &IndicatorSnapshot) -> Option<SideVerdict> {
        let rsi = snapshot.rsi?;
        Some(SideVerdict::new(rsi > self.long_level, rsi < self.short_level))
    }
}

#[derive(Debug, Clone)]
pub struct CciFilter {
    pub long_level: f64,
    pub short_level: f64,
}

impl CciFilter {
    pub fn new(long_level: f64, short_level: f64) -> Self {
        Self { long_level, short_level }
    }
}

impl ConfirmationFilter for CciFilter {
    fn name(&self) -> &'static str {
        "cci"
    }

    fn check(&self, snapshot: &IndicatorSnapshot) -> Option<SideVerdict> {
        let cci = snapshot.cci?;
        Some(SideVerdict::new(cci > self.long_level, cci < self.short_level))
    }
}

#[derive(Debug, Clone)]
pub struct AoFilter;

impl ConfirmationFilter for AoFilter {
    fn name(&self) -> &'static str {
        "ao"
    }

    fn check(&self, snapshot: &IndicatorSnapshot) -> Option<SideVerdict> {
        Some(sign(snapshot.ao?))
    }
}

#[derive(Debug, Clone)]
pub struct AcFilter;

impl ConfirmationFilter for AcFilter {
    fn name(&self) -> &'static str {
        "ac"
    }

    fn check(&self, snapshot: &IndicatorSnapshot) -> Option<SideVerdict> {
        Some(sign(snapshot.ac?))
    }
}
