//! Bill Williams' Awesome Oscillator (AO) and Accelerator Oscillator (AC).
//!
//! AO = SMA(median, fast) - SMA(median, slow), median = (high + low) / 2
//! AC = AO - SMA(AO, fast)

use super::indicator::Indicator;
use super::sma::sma_of_series;
use crate::domain::Bar;

pub const AO_FAST: usize = 5;
pub const AO_SLOW: usize = 34;

pub fn awesome_series(bars: &[Bar]) -> Vec<f64> {
    let median: Vec<f64> = bars.iter().map(Bar::median_price).collect();
    let fast = sma_of_series(&median, AO_FAST);
    let slow = sma_of_series(&median, AO_SLOW);
    fast.iter().zip(&slow).map(|(f, s)| f - s).collect()
}

#[derive(Debug, Clone, Default)]
pub struct AwesomeOscillator;

impl AwesomeOscillator {
    pub const KEY: &'static str = "ao";
}

impl Indicator for AwesomeOscillator {
    fn name(&self) -> &str {
        Self::KEY
    }

    fn lookback(&self) -> usize {
        AO_SLOW - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        awesome_series(bars)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AcceleratorOscillator;

impl AcceleratorOscillator {
    pub const KEY: &'static str = "ac";
}

impl Indicator for AcceleratorOscillator {
    fn name(&self) -> &str {
        Self::KEY
    }

    fn lookback(&self) -> usize {
        AO_SLOW + AO_FAST - 2
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let ao = awesome_series(bars);
        let ao_mean = sma_of_series(&ao, AO_FAST);
        ao.iter().zip(&ao_mean).map(|(a, m)| a - m).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    fn ramp(n: usize, step: f64) -> Vec<Bar> {
        let closes: Vec<f64> = (0..n).map(|i| 100.0 + i as f64 * step).collect();
        make_bars(&closes)
    }

    #[test]
    fn ao_sign_follows_trend() {
        let up = AwesomeOscillator.compute(&ramp(60, 1.0));
        let down = AwesomeOscillator.compute(&ramp(60, -1.0));
        assert!(up[32].is_nan());
        assert!(up[59] > 0.0);
        assert!(down[59] < 0.0);
    }

    #[test]
    fn ac_warmup() {
        let ac = AcceleratorOscillator.compute(&ramp(60, 1.0));
        let lb = AcceleratorOscillator.lookback();
        assert!(ac[lb - 1].is_nan());
        assert!(!ac[lb].is_nan());
    }

    #[test]
    fn ac_accelerating_trend_positive() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i * i) as f64 * 0.05).collect();
        let ac = AcceleratorOscillator.compute(&make_bars(&closes));
        assert!(ac[59] > 0.0);
    }
}
