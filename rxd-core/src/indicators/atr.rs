//! Average True Range, the volatility unit of ATR-scaled protective orders.
//!
//! True range needs the previous close, so the first bar has none and the
//! first ATR value lands on bar `period`.

use super::indicator::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
    key: String,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ATR period must be >= 1");
        Self {
            period,
            key: format!("atr_{period}"),
        }
    }
}

/// max(high - low, |high - prev_close|, |low - prev_close|) per bar.
///
/// Bar 0 (no previous close) and bars touching a NaN price are NaN.
pub fn true_range(bars: &[Bar]) -> Vec<f64> {
    let mut tr = Vec::with_capacity(bars.len());
    if !bars.is_empty() {
        tr.push(f64::NAN);
    }
    tr.extend(bars.windows(2).map(|w| {
        let (prev_close, bar) = (w[0].close, &w[1]);
        let range = bar.high - bar.low;
        let up = (bar.high - prev_close).abs();
        let down = (bar.low - prev_close).abs();
        // NaN.max(x) yields x, so NaN must be checked explicitly
        if range.is_nan() || prev_close.is_nan() {
            f64::NAN
        } else {
            range.max(up).max(down)
        }
    }));
    tr
}

/// Wilder's running average with `alpha = 1/period`.
///
/// Seeded with the simple mean of the first `period` consecutive finite
/// values. A non-finite input after the seed yields NaN at that bar and
/// leaves the running average untouched, so output resumes on the next
/// finite value.
pub fn wilder_smooth(values: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }
    let Some(start) = values
        .windows(period)
        .position(|w| w.iter().all(|v| v.is_finite()))
    else {
        return out;
    };

    let seed_at = start + period - 1;
    let mut avg = values[start..=seed_at].iter().sum::<f64>() / period as f64;
    out[seed_at] = avg;

    let keep = (period - 1) as f64 / period as f64;
    for (slot, &v) in out.iter_mut().zip(values).skip(seed_at + 1) {
        if !v.is_finite() {
            continue;
        }
        avg = avg * keep + v / period as f64;
        *slot = avg;
    }
    out
}

impl Indicator for Atr {
    fn name(&self) -> &str {
        &self.key
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        wilder_smooth(&true_range(bars), self.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_ohlc_bars, DEFAULT_EPSILON};

    #[test]
    fn true_range_takes_widest_leg() {
        let bars = make_ohlc_bars(&[
            (50.0, 51.0, 49.0, 50.0),
            (50.5, 52.0, 50.0, 51.5), // range 2, up 2, down 0
            (45.0, 46.0, 44.0, 45.0), // gap down: down leg 7.5
        ]);
        let tr = true_range(&bars);
        assert!(tr[0].is_nan());
        assert_approx(tr[1], 2.0, DEFAULT_EPSILON);
        assert_approx(tr[2], 7.5, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_seed_then_wilder() {
        let bars = make_ohlc_bars(&[
            (10.0, 11.0, 9.0, 10.0),
            (10.0, 12.0, 10.0, 11.0), // TR 2
            (11.0, 13.0, 11.0, 12.0), // TR 2
            (12.0, 12.0, 8.0, 9.0),   // TR 4
            (9.0, 11.0, 9.0, 10.0),   // TR 2
        ]);
        let atr = Atr::new(2).compute(&bars);
        assert!(atr[1].is_nan());
        assert_approx(atr[2], 2.0, DEFAULT_EPSILON);
        assert_approx(atr[3], 3.0, DEFAULT_EPSILON);
        assert_approx(atr[4], 2.5, DEFAULT_EPSILON);
    }

    #[test]
    fn smoothing_holds_state_across_gap() {
        let out = wilder_smooth(&[f64::NAN, 4.0, 8.0, 2.0, f64::NAN, 6.0], 2);
        assert!(out[1].is_nan());
        assert_approx(out[2], 6.0, DEFAULT_EPSILON);
        assert_approx(out[3], 4.0, DEFAULT_EPSILON);
        assert!(out[4].is_nan());
        // 4·0.5 + 6·0.5
        assert_approx(out[5], 5.0, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_recovers_after_void_bar() {
        let data: Vec<_> = (0..12)
            .map(|i| {
                let base = 100.0 + i as f64;
                (base, base + 1.0, base - 1.0, base)
            })
            .collect();
        let mut bars = make_ohlc_bars(&data);
        bars[6].close = f64::NAN;
        let atr = Atr::new(3).compute(&bars);
        assert!(atr[7].is_nan());
        assert!(atr[8..].iter().all(|v| v.is_finite()));
    }

    #[test]
    fn short_input_is_all_nan() {
        let bars = make_ohlc_bars(&[(10.0, 11.0, 9.0, 10.0); 3]);
        assert!(Atr::new(5).compute(&bars).iter().all(|v| v.is_nan()));
        assert!(true_range(&[]).is_empty());
    }
}
