//! Filter bank: per-direction confirmation from classical indicators.
//!
//! Both directions start allowed; every enabled filter ANDs in its own
//! verdict. An enabled filter whose reading is not final blocks both
//! directions for the bar.

pub mod oscillator;
pub mod trend;

use serde::{Deserialize, Serialize};

use crate::indicators::IndicatorSnapshot;

pub use oscillator::{AcFilter, AoFilter, CciFilter, MacdFilter, OsmaFilter, RsiFilter};
pub use trend::{AdxFilter, SarFilter};

/// Verdict of one filter for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideVerdict {
    pub long: bool,
    pub short: bool,
}

impl SideVerdict {
    pub fn new(long: bool, short: bool) -> Self {
        Self { long, short }
    }
}

/// A single confirmation filter.
///
/// # Architecture invariant
/// Filters see market readings only, never position state.
pub trait ConfirmationFilter: Send + Sync + std::fmt::Debug {
    /// Stable name used in logs (e.g., "adx", "sar").
    fn name(&self) -> &'static str;

    /// `None` when a required reading is not final.
    fn check(&self, snapshot: &IndicatorSnapshot) -> Option<SideVerdict>;
}

/// Filter switches and levels, fixed for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Master switch. When off the bank is disabled and evaluates to `None`.
    pub enabled: bool,
    pub use_adx: bool,
    pub adx_threshold: f64,
    pub use_macd: bool,
    pub macd_cross: bool,
    pub use_osma: bool,
    pub use_sar: bool,
    pub sar_cross: bool,
    pub use_rsi: bool,
    pub rsi_long_level: f64,
    pub rsi_short_level: f64,
    pub use_cci: bool,
    pub cci_long_level: f64,
    pub cci_short_level: f64,
    pub use_ao: bool,
    pub use_ac: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            use_adx: false,
            adx_threshold: 25.0,
            use_macd: false,
            macd_cross: false,
            use_osma: false,
            use_sar: false,
            sar_cross: false,
            use_rsi: false,
            rsi_long_level: 50.0,
            rsi_short_level: 50.0,
            use_cci: false,
            cci_long_level: 100.0,
            cci_short_level: -100.0,
            use_ao: false,
            use_ac: false,
        }
    }
}

/// Combined verdict of the bank for one bar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectionalPermit {
    pub long_allowed: bool,
    pub short_allowed: bool,
    /// Filters that vetoed the long side.
    pub blocked_long: Vec<&'static str>,
    /// Filters that vetoed the short side.
    pub blocked_short: Vec<&'static str>,
}

impl DirectionalPermit {
    pub fn both() -> Self {
        Self {
            long_allowed: true,
            short_allowed: true,
            ..Default::default()
        }
    }
}

#[derive(Debug)]
pub struct FilterBank {
    enabled: bool,
    filters: Vec<Box<dyn ConfirmationFilter>>,
}

impl FilterBank {
    pub fn new(config: &FilterConfig) -> Self {
        let mut filters: Vec<Box<dyn ConfirmationFilter>> = Vec::new();
        if config.use_adx {
            filters.push(Box::new(AdxFilter::new(config.adx_threshold)));
        }
        if config.use_macd {
            filters.push(Box::new(MacdFilter::new(config.macd_cross)));
        }
        if config.use_osma {
            filters.push(Box::new(OsmaFilter));
        }
        if config.use_sar {
            filters.push(Box::new(SarFilter::new(config.sar_cross)));
        }
        if config.use_rsi {
            filters.push(Box::new(RsiFilter::new(
                config.rsi_long_level,
                config.rsi_short_level,
            )));
        }
        if config.use_cci {
            filters.push(Box::new(CciFilter::new(
                config.cci_long_level,
                config.cci_short_level,
            )));
        }
        if config.use_ao {
            filters.push(Box::new(AoFilter));
        }
        if config.use_ac {
            filters.push(Box::new(AcFilter));
        }
        Self {
            enabled: config.enabled,
            filters,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Names of the active filters, in evaluation order.
    pub fn filter_names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// `None` when the bank is disabled.
    pub fn evaluate(&self, snapshot: &IndicatorSnapshot) -> Option<DirectionalPermit> {
        if !self.enabled {
            return None;
        }
        let mut permit = DirectionalPermit::both();
        for filter in &self.filters {
            let verdict = filter.check(snapshot).unwrap_or(SideVerdict::new(false, false));
            if !verdict.long {
                permit.long_allowed = false;
                permit.blocked_long.push(filter.name());
            }
            if !verdict.short {
                permit.short_allowed = false;
                permit.blocked_short.push(filter.name());
            }
        }
        Some(permit)
    }
}
