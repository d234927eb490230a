//! Exponential moving average over an arbitrary series.
//!
//! EMA[t] = alpha·x[t] + (1 - alpha)·EMA[t-1], alpha = 2/(period+1).
//! Seeded with the SMA of the first `period` values after any leading NaN
//! warmup, so EMAs can be chained on other indicators (MACD signal line).

/// EMA of `values`.
///
/// Seeded at the first run of `period` consecutive finite values. A NaN
/// after the seed yields NaN at that index and carries the previous EMA
/// forward unchanged.
pub fn ema_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if period == 0 || n < period {
        return result;
    }
    let Some(start) = values
        .windows(period)
        .position(|w| w.iter().all(|v| v.is_finite()))
    else {
        return result;
    };

    let alpha = 2.0 / (period as f64 + 1.0);
    let seed_at = start + period - 1;
    let mut prev = values[start..=seed_at].iter().sum::<f64>() / period as f64;
    result[seed_at] = prev;

    for i in (seed_at + 1)..n {
        if !values[i].is_finite() {
            continue;
        }
        prev = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = prev;
    }

    result
}
