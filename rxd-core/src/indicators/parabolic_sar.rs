//! Parabolic SAR: Wilder's acceleration factor system.
//!
//! Sequential: tracks direction, extreme point (EP) and acceleration
//! factor (AF). Lookback: 1.

use super::indicator::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct ParabolicSar {
    af_start: f64,
    af_step: f64,
    af_max: f64,
    name: String,
}

impl ParabolicSar {
    pub fn new(af_start: f64, af_step: f64, af_max: f64) -> Self {
        assert!(af_start > 0.0, "AF start must be > 0");
        assert!(af_step > 0.0, "AF step must be > 0");
        assert!(af_max >= af_start, "AF max must be >= AF start");
        Self {
            af_start,
            af_step,
            af_max,
            name: Self::key(af_start, af_step, af_max),
        }
    }

    pub fn key(af_start: f64, af_step: f64, af_max: f64) -> String {
        format!("psar_{af_start}_{af_step}_{af_max}")
    }
}

impl Indicator for ParabolicSar {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        if n < 2 || bars[0].is_void() || bars[1].is_void() {
            return result;
        }

        let mut is_long = bars[1].close >= bars[0].close;
        let mut af = self.af_start;
        let (mut sar, mut ep) = if is_long {
            (bars[0].low, bars[1].high)
        } else {
            (bars[0].high, bars[1].low)
        };

        result[1] = sar;

        for i in 2..n {
            if bars[i].is_void() {
                continue;
            }

            let mut new_sar = sar + af * (ep - sar);

            if is_long {
                // SAR may not sit above the two previous lows.
                for low in [bars[i - 1].low, bars[i - 2].low] {
                    if !low.is_nan() {
                        new_sar = new_sar.min(low);
                    }
                }
                if bars[i].low < new_sar {
                    is_long = false;
                    new_sar = ep;
                    ep = bars[i].low;
                    af = self.af_start;
                } else if bars[i].high > ep {
                    ep = bars[i].high;
                    af = (af + self.af_step).min(self.af_max);
                }
            } else {
                for high in [bars[i - 1].high, bars[i - 2].high] {
                    if !high.is_nan() {
                        new_sar = new_sar.max(high);
                    }
                }
                if bars[i].high > new_sar {
                    is_long = true;
                    new_sar = ep;
                    ep = bars[i].high;
                    af = self.af_start;
                } else if bars[i].low < ep {
                    ep = bars[i].low;
                    af = (af + self.af_step).min(self.af_max);
                }
            }

            sar = new_sar;
            result[i] = sar;
        }

        result
    }
}
