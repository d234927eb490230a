//! Indicator trait and precomputed indicator values container.
//!
//! Indicators are pure functions: bar history in, numeric series out.
//! They are precomputed once before the replay and sampled per bar into an
//! [`IndicatorSnapshot`](super::IndicatorSnapshot).

use crate::domain::Bar;
use std::collections::HashMap;

/// Trait for indicators.
///
/// Indicators take a full bar series and produce a numeric output series of
/// the same length. Warmup positions are `f64::NAN`, which the snapshot layer
/// maps to "not final".
///
/// # Look-ahead contamination guard
/// No indicator value at bar t may depend on price data from bar t+1 or later.
pub trait Indicator: Send + Sync {
    /// Series key (e.g., "rsi_14", "macd_12_26_9_signal").
    fn name(&self) -> &str;

    /// Number of bars needed before the indicator produces valid output.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    fn compute(&self, bars: &[Bar]) -> Vec<f64>;
}

/// Container for precomputed indicator values, queried by bar index.
#[derive(Debug, Clone, Default)]
pub struct IndicatorValues {
    series: HashMap<String, Vec<f64>>,
}

impl IndicatorValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a named indicator series.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.series.insert(name.into(), values);
    }

    /// Raw value at a bar index, NaN included.
    pub fn get(&self, name: &str, bar_index: usize) -> Option<f64> {
        self.series
            .get(name)
            .and_then(|v| v.get(bar_index).copied())
    }

    /// Value at a bar index if it is final (present and not NaN).
    pub fn get_final(&self, name: &str, bar_index: usize) -> Option<f64> {
        self.get(name, bar_index).filter(|v| v.is_finite())
    }

    pub fn get_series(&self, name: &str) -> Option<&[f64]> {
        self.series.get(name).map(|v| v.as_slice())
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Compute every indicator over `bars` into one container.
pub fn precompute(bars: &[Bar], indicators: &[Box<dyn Indicator>]) -> IndicatorValues {
    let mut iv = IndicatorValues::new();
    for indicator in indicators {
        let series = indicator.compute(bars);
        debug_assert_eq!(
            series.len(),
            bars.len(),
            "indicator '{}' produced {} values for {} bars",
            indicator.name(),
            series.len(),
            bars.len(),
        );
        iv.insert(indicator.name(), series);
    }
    iv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{make_bars, Rsi};

    #[test]
    fn indicator_values_insert_and_get() {
        let mut iv = IndicatorValues::new();
        iv.insert("rsi_3", vec![f64::NAN, f64::NAN, 55.0]);
        assert!(iv.get("rsi_3", 0).unwrap().is_nan());
        assert_eq!(iv.get_final("rsi_3", 0), None);
        assert_eq!(iv.get_final("rsi_3", 2), Some(55.0));
        assert_eq!(iv.get("rsi_3", 3), None);
        assert_eq!(iv.get("nonexistent", 0), None);
    }

    #[test]
    fn precompute_keys_by_name() {
        let bars = make_bars(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let indicators: Vec<Box<dyn Indicator>> = vec![Box::new(Rsi::new(3))];
        let iv = precompute(&bars, &indicators);
        assert_eq!(iv.len(), 1);
        assert_eq!(iv.get_series("rsi_3").map(|s| s.len()), Some(5));
    }
}
