//! ADX: Average Directional Index (Wilder), with its +DI and -DI lines.
//!
//! 1. +DM / -DM from consecutive bars
//! 2. Wilder-smooth +DM, -DM and TR
//! 3. +DI = 100·sm(+DM)/sm(TR), -DI = 100·sm(-DM)/sm(TR)
//! 4. DX = 100·|+DI - -DI| / (+DI + -DI)
//! 5. ADX = Wilder-smoothed DX
//!
//! The three lines are exposed as separate named series, one per [`AdxBand`].

use super::atr::{true_range, wilder_smooth};
use super::indicator::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdxBand {
    Adx,
    PlusDi,
    MinusDi,
}

#[derive(Debug, Clone)]
pub struct Adx {
    period: usize,
    band: AdxBand,
    name: String,
}

impl Adx {
    pub fn new(period: usize, band: AdxBand) -> Self {
        assert!(period >= 1, "ADX period must be >= 1");
        Self {
            period,
            band,
            name: Self::key(period, band),
        }
    }

    /// Series key for a band, e.g. `adx_14`, `adx_14_plus_di`.
    pub fn key(period: usize, band: AdxBand) -> String {
        match band {
            AdxBand::Adx => format!("adx_{period}"),
            AdxBand::PlusDi => format!("adx_{period}_plus_di"),
            AdxBand::MinusDi => format!("adx_{period}_minus_di"),
        }
    }
}

/// Directional lines: (adx, +DI, -DI).
pub fn directional_lines(bars: &[Bar], period: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let n = bars.len();
    let mut plus_di = vec![f64::NAN; n];
    let mut minus_di = vec![f64::NAN; n];

    if n < 2 {
        return (vec![f64::NAN; n], plus_di, minus_di);
    }

    let mut plus_dm = vec![f64::NAN; n];
    let mut minus_dm = vec![f64::NAN; n];

    for i in 1..n {
        let high_diff = bars[i].high - bars[i - 1].high;
        let low_diff = bars[i - 1].low - bars[i].low;
        if high_diff.is_nan() || low_diff.is_nan() {
            continue;
        }
        plus_dm[i] = if high_diff > low_diff && high_diff > 0.0 { high_diff } else { 0.0 };
        minus_dm[i] = if low_diff > high_diff && low_diff > 0.0 { low_diff } else { 0.0 };
    }

    let smooth_tr = wilder_smooth(&true_range(bars), period);
    let smooth_plus_dm = wilder_smooth(&plus_dm, period);
    let smooth_minus_dm = wilder_smooth(&minus_dm, period);

    let mut dx = vec![f64::NAN; n];
    for i in 0..n {
        if smooth_tr[i].is_nan()
            || smooth_plus_dm[i].is_nan()
            || smooth_minus_dm[i].is_nan()
            || smooth_tr[i] == 0.0
        {
            continue;
        }

        let pdi = 100.0 * smooth_plus_dm[i] / smooth_tr[i];
        let mdi = 100.0 * smooth_minus_dm[i] / smooth_tr[i];
        plus_di[i] = pdi;
        minus_di[i] = mdi;

        let di_sum = pdi + mdi;
        dx[i] = if di_sum == 0.0 { 0.0 } else { 100.0 * (pdi - mdi).abs() / di_sum };
    }

    (wilder_smooth(&dx, period), plus_di, minus_di)
}

impl Indicator for Adx {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.band {
            AdxBand::Adx => 2 * self.period,
            AdxBand::PlusDi | AdxBand::MinusDi => self.period,
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let (adx, plus_di, minus_di) = directional_lines(bars, self.period);
        match self.band {
            AdxBand::Adx => adx,
            AdxBand::PlusDi => plus_di,
            AdxBand::MinusDi => minus_di,
        }
    }
}
