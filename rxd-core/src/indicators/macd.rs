//! MACD: moving average convergence/divergence.
//!
//! line = EMA(close, fast) - EMA(close, slow)
//! signal = EMA(line, signal)
//! histogram (OsMA) = line - signal

use super::ema::ema_of_series;
use super::indicator::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdBand {
    Line,
    Signal,
    Histogram,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    band: MacdBand,
    name: String,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize, band: MacdBand) -> Self {
        assert!(fast >= 1 && signal >= 1, "MACD periods must be >= 1");
        assert!(slow > fast, "MACD slow period must exceed fast period");
        Self {
            fast,
            slow,
            signal,
            band,
            name: Self::key(fast, slow, signal, band),
        }
    }

    pub fn key(fast: usize, slow: usize, signal: usize, band: MacdBand) -> String {
        let suffix = match band {
            MacdBand::Line => "line",
            MacdBand::Signal => "signal",
            MacdBand::Histogram => "hist",
        };
        format!("macd_{fast}_{slow}_{signal}_{suffix}")
    }
}

/// (line, signal, histogram)
pub fn macd_lines(bars: &[Bar], fast: usize, slow: usize, signal: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let fast_ema = ema_of_series(&closes, fast);
    let slow_ema = ema_of_series(&closes, slow);
    let line: Vec<f64> = fast_ema.iter().zip(&slow_ema).map(|(f, s)| f - s).collect();
    let signal_line = ema_of_series(&line, signal);
    let histogram: Vec<f64> = line.iter().zip(&signal_line).map(|(l, s)| l - s).collect();
    (line, signal_line, histogram)
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.band {
            MacdBand::Line => self.slow - 1,
            MacdBand::Signal | MacdBand::Histogram => self.slow + self.signal - 2,
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let (line, signal, histogram) = macd_lines(bars, self.fast, self.slow, self.signal);
        match self.band {
            MacdBand::Line => line,
            MacdBand::Signal => signal,
            MacdBand::Histogram => histogram,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars};

    #[test]
    fn warmup_matches_lookback() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let bars = make_bars(&closes);
        for band in [MacdBand::Line, MacdBand::Signal, MacdBand::Histogram] {
            let macd = Macd::new(3, 6, 4, band);
            let result = macd.compute(&bars);
            let lb = macd.lookback();
            assert!(result[lb - 1].is_nan(), "{band:?} valid before lookback");
            assert!(!result[lb].is_nan(), "{band:?} not valid at lookback");
        }
    }

    #[test]
    fn rising_prices_give_positive_line() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64 * 2.0).collect();
        let (line, signal, hist) = macd_lines(&make_bars(&closes), 3, 6, 4);
        assert!(line[39] > 0.0);
        // linear ramp: line converges to a constant, histogram towards zero
        assert_approx(hist[39], line[39] - signal[39], 1e-12);
    }

    #[test]
    fn keys() {
        assert_eq!(Macd::new(12, 26, 9, MacdBand::Histogram).name(), "macd_12_26_9_hist");
    }
}
