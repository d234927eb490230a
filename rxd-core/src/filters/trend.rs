//! Trend filters: ADX strength with DI direction, Parabolic SAR side.

use super::{ConfirmationFilter, SideVerdict};
use crate::indicators::IndicatorSnapshot;

/// Passes a side when ADX >= threshold and that side's DI leads.
#[derive(Debug, Clone)]
pub struct AdxFilter {
    pub threshold: f64,
}

impl AdxFilter {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl ConfirmationFilter for AdxFilter {
    fn name(&self) -> &'static str {
        "adx"
    }

    fn check(&self, snapshot: &IndicatorSnapshot) -> Option<SideVerdict> {
        let reading = snapshot.adx?;
        let strong = reading.adx >= self.threshold;
        Some(SideVerdict::new(
            strong && reading.plus_di > reading.minus_di,
            strong && reading.minus_di > reading.plus_di,
        ))
    }
}

/// Price above SAR confirms long, below confirms short.
///
/// With `require_cross` the previous bar must have been on the other side.
#[derive(Debug, Clone)]
pub struct SarFilter {
    pub require_cross: bool,
}

impl SarFilter {
    pub fn new(require_cross: bool) -> Self {
        Self { require_cross }
    }
}

impl ConfirmationFilter for SarFilter {
    fn name(&self) -> &'static str {
        "sar"
    }

    fn check(&self, snapshot: &IndicatorSnapshot) -> Option<SideVerdict> {
        let close = snapshot.close?;
        let sar = snapshot.sar?;
        let above = close > sar;
        let below = close < sar;
        if !self.require_cross {
            return Some(SideVerdict::new(above, below));
        }
        let prev_close = snapshot.prev_close?;
        let prev_sar = snapshot.prev_sar?;
        Some(SideVerdict::new(
            above && prev_close <= prev_sar,
            below && prev_close >= prev_sar,
        ))
    }
}
