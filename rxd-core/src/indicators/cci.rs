//! Commodity Channel Index (CCI).
//!
//! CCI = (TP - SMA(TP)) / (0.015 · mean absolute deviation of TP),
//! TP = (high + low + close) / 3. Lookback: period - 1.

use super::indicator::Indicator;
use super::sma::sma_of_series;
use crate::domain::Bar;

const LAMBERT: f64 = 0.015;

#[derive(Debug, Clone)]
pub struct Cci {
    period: usize,
    name: String,
}

impl Cci {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "CCI period must be >= 1");
        Self {
            period,
            name: format!("cci_{period}"),
        }
    }
}

impl Indicator for Cci {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let tp: Vec<f64> = bars.iter().map(Bar::typical_price).collect();
        let mean = sma_of_series(&tp, self.period);
        let mut result = vec![f64::NAN; bars.len()];

        for i in 0..bars.len() {
            if mean[i].is_nan() {
                continue;
            }
            let window = &tp[(i + 1 - self.period)..=i];
            let deviation =
                window.iter().map(|v| (v - mean[i]).abs()).sum::<f64>() / self.period as f64;
            result[i] = if deviation == 0.0 {
                0.0
            } else {
                (tp[i] - mean[i]) / (LAMBERT * deviation)
            };
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_ohlc_bars};

    #[test]
    fn cci_known_value() {
        // TP = 10, 11, 12 -> mean 11, MAD 2/3, CCI = 1 / (0.015 · 2/3) = 100
        let bars = make_ohlc_bars(&[
            (10.0, 10.0, 10.0, 10.0),
            (11.0, 11.0, 11.0, 11.0),
            (12.0, 12.0, 12.0, 12.0),
        ]);
        let result = Cci::new(3).compute(&bars);
        assert!(result[1].is_nan());
        assert_approx(result[2], 100.0, 1e-9);
    }

    #[test]
    fn cci_flat_is_zero() {
        let bars = make_ohlc_bars(&[(5.0, 6.0, 4.0, 5.0); 4]);
        let result = Cci::new(3).compute(&bars);
        assert_approx(result[3], 0.0, 1e-12);
    }
}
