//! Bar input: CSV files and seeded synthetic series.
//!
//! CSV columns are `date,open,high,low,close,volume` with ISO dates. Bars
//! must be strictly ascending by date and pass OHLC sanity checks.

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

use crate::domain::Bar;
use crate::error::DataError;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default()
}

/// Load and validate bars from a CSV file.
pub fn load_bars_csv(path: &Path) -> Result<Vec<Bar>, DataError> {
    let csv_err = |source: csv::Error| DataError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;

    let mut bars = Vec::new();
    for row in reader.deserialize::<Bar>() {
        bars.push(row.map_err(csv_err)?);
    }
    validate_bars(&bars)?;
    Ok(bars)
}

/// Sanity and ordering checks. Void bars pass; they are skipped downstream.
pub fn validate_bars(bars: &[Bar]) -> Result<(), DataError> {
    if bars.is_empty() {
        return Err(DataError::Empty);
    }
    for (index, bar) in bars.iter().enumerate() {
        if !bar.is_void() && !bar.is_sane() {
            return Err(DataError::InsaneBar {
                index,
                date: bar.date,
            });
        }
        if index > 0 && bar.date <= bars[index - 1].date {
            return Err(DataError::Unordered { index });
        }
    }
    Ok(())
}

/// Geometric random walk with `drift` and `volatility` per bar, as fractions.
///
/// The same seed always yields the same series.
pub fn synthetic_bars(n: usize, seed: u64, drift: f64, volatility: f64) -> Vec<Bar> {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = base_date();
    let mut close = 100.0_f64;
    (0..n)
        .map(|i| {
            let open = close;
            let shock: f64 = rng.gen_range(-1.0..1.0);
            close = (open * (1.0 + drift + volatility * shock)).max(0.01);
            let wick_up: f64 = rng.gen_range(0.0..volatility.max(1e-6));
            let wick_down: f64 = rng.gen_range(0.0..volatility.max(1e-6));
            Bar {
                date: start + Duration::days(i as i64),
                open,
                high: open.max(close) * (1.0 + wick_up),
                low: open.min(close) * (1.0 - wick_down),
                close,
                volume: rng.gen_range(1_000..100_000),
            }
        })
        .collect()
}

/// Straight line of closes: `start`, `start + step`, ... with a one-step
/// range around each body.
pub fn ramp_bars(n: usize, start: f64, step: f64) -> Vec<Bar> {
    let first = base_date();
    let wick = step.abs().max(0.01);
    (0..n)
        .map(|i| {
            let close = start + step * i as f64;
            let open = if i == 0 { close } else { close - step };
            Bar {
                date: first + Duration::days(i as i64),
                open,
                high: open.max(close) + wick,
                low: open.min(close) - wick,
                close,
                volume: 1_000,
            }
        })
        .collect()
}
