//! Concrete indicator implementations and the per-bar snapshot layer.
//!
//! All indicators implement [`Indicator`]. They are precomputed once before
//! the replay; [`IndicatorSet::snapshot`] then assembles the immutable
//! per-bar input the strategy consumes.
//!
//! Multi-line indicators (ADX, MACD) are exposed as separate named instances
//! per band, keeping the single-series trait unchanged.

pub mod adx;
pub mod atr;
pub mod awesome;
pub mod cci;
pub mod ema;
pub mod indicator;
pub mod macd;
pub mod parabolic_sar;
pub mod rsi;
pub mod sma;
pub mod snapshot;

pub use adx::{Adx, AdxBand};
pub use atr::Atr;
pub use awesome::{AcceleratorOscillator, AwesomeOscillator};
pub use cci::Cci;
pub use indicator::{Indicator, IndicatorValues};
pub use macd::{Macd, MacdBand};
pub use parabolic_sar::ParabolicSar;
pub use rsi::Rsi;
pub use snapshot::{AdxReading, IndicatorConfig, IndicatorSet, IndicatorSnapshot, MacdReading};

/// Synthetic bars from closes: open = prev close, high/low = ±1 around the body.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::Bar> {
    let data: Vec<_> = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            (open, open.max(close) + 1.0, open.min(close) - 1.0, close)
        })
        .collect();
    make_ohlc_bars(&data)
}

#[cfg(test)]
pub fn make_ohlc_bars(data: &[(f64, f64, f64, f64)]) -> Vec<crate::domain::Bar> {
    use crate::domain::Bar;
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| Bar {
            date: base_date + chrono::Duration::days(i as i64),
            open,
            high,
            low,
            close,
            volume: 1000,
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
