//! Relative Strength Index over closes.
//!
//! Gains and losses are Wilder-smoothed separately; the first reading lands
//! on bar `period` because bar 0 has no change.

use super::atr::wilder_smooth;
use super::indicator::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    key: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            key: format!("rsi_{period}"),
        }
    }
}

/// 100 - 100 / (1 + gain/loss), with the degenerate cases pinned.
fn rsi_value(gain: f64, loss: f64) -> f64 {
    match (gain > 0.0, loss > 0.0) {
        (false, false) => 50.0,
        (true, false) => 100.0,
        (false, true) => 0.0,
        (true, true) => 100.0 - 100.0 / (1.0 + gain / loss),
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.key
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let mut gains = vec![f64::NAN; bars.len()];
        let mut losses = vec![f64::NAN; bars.len()];
        for (i, w) in bars.windows(2).enumerate() {
            let change = w[1].close - w[0].close;
            if change.is_finite() {
                gains[i + 1] = change.max(0.0);
                losses[i + 1] = (-change).max(0.0);
            }
        }
        let avg_gain = wilder_smooth(&gains, self.period);
        let avg_loss = wilder_smooth(&losses, self.period);
        avg_gain
            .iter()
            .zip(&avg_loss)
            .map(|(&g, &l)| {
                if g.is_nan() || l.is_nan() {
                    f64::NAN
                } else {
                    rsi_value(g, l)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars};

    #[test]
    fn first_reading_on_bar_period() {
        let bars = make_bars(&[10.0, 11.0, 10.5, 11.5, 12.0]);
        let rsi = Rsi::new(3).compute(&bars);
        assert!(rsi[..3].iter().all(|v| v.is_nan()));
        // gains 1, 0, 1 -> 2/3; losses 0, 0.5, 0 -> 1/6
        assert_approx(rsi[3], 100.0 - 100.0 / (1.0 + 4.0), 1e-9);
        assert!(rsi[4] > rsi[3]);
    }

    #[test]
    fn one_sided_series_pin_to_extremes() {
        let up = Rsi::new(4).compute(&make_bars(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]));
        assert_approx(up[5], 100.0, 1e-9);
        let down = Rsi::new(4).compute(&make_bars(&[6.0, 5.0, 4.0, 3.0, 2.0, 1.0]));
        assert_approx(down[5], 0.0, 1e-9);
        let flat = Rsi::new(4).compute(&make_bars(&[3.0; 6]));
        assert_approx(flat[5], 50.0, 1e-9);
    }

    #[test]
    fn stays_in_bounds_on_whipsaw() {
        let bars = make_bars(&[20.0, 26.0, 18.0, 29.0, 15.0, 31.0, 12.0, 35.0, 10.0]);
        for v in Rsi::new(3).compute(&bars).into_iter().filter(|v| !v.is_nan()) {
            assert!((0.0..=100.0).contains(&v));
        }
    }

    #[test]
    fn missing_close_inside_seed_window() {
        let mut bars = make_bars(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        bars[2].close = f64::NAN;
        assert!(Rsi::new(3).compute(&bars).iter().all(|v| v.is_nan()));
    }

    #[test]
    fn resumes_after_missing_close() {
        let closes: Vec<f64> = (0..20).map(|i| 50.0 + i as f64).collect();
        let mut bars = make_bars(&closes);
        bars[10].close = f64::NAN;
        let rsi = Rsi::new(3).compute(&bars);
        assert!(rsi[10].is_nan() && rsi[11].is_nan());
        for v in &rsi[12..] {
            assert_approx(*v, 100.0, 1e-9);
        }
    }
}
