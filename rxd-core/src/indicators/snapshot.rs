//! Per-bar indicator input assembled from the precomputed series.
//!
//! The filter bank and the protective calculator only ever see an
//! [`IndicatorSnapshot`]; non-final values (warmup NaN, missing series) are
//! `None`.

use serde::{Deserialize, Serialize};

use super::adx::{Adx, AdxBand};
use super::atr::Atr;
use super::awesome::{AcceleratorOscillator, AwesomeOscillator};
use super::cci::Cci;
use super::indicator::{precompute, Indicator, IndicatorValues};
use super::macd::{Macd, MacdBand};
use super::parabolic_sar::ParabolicSar;
use super::rsi::Rsi;
use crate::domain::Bar;
use crate::error::ConfigError;

/// Periods of the indicators feeding the filter bank and ATR distances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub atr_period: usize,
    pub adx_period: usize,
    pub rsi_period: usize,
    pub cci_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub sar_step: f64,
    pub sar_max: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            atr_period: 14,
            adx_period: 14,
            rsi_period: 14,
            cci_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            sar_step: 0.02,
            sar_max: 0.2,
        }
    }
}

impl IndicatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let periods = [
            ("atr_period", self.atr_period),
            ("adx_period", self.adx_period),
            ("rsi_period", self.rsi_period),
            ("cci_period", self.cci_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
        ];
        for (name, period) in periods {
            if period == 0 {
                return Err(ConfigError::ZeroPeriod { name });
            }
        }
        if self.macd_slow <= self.macd_fast {
            return Err(ConfigError::InvalidIndicator {
                name: "macd_slow",
                reason: "must exceed macd_fast",
            });
        }
        if !(self.sar_step > 0.0 && self.sar_max >= self.sar_step) {
            return Err(ConfigError::InvalidIndicator {
                name: "sar_step",
                reason: "must be positive and no larger than sar_max",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdxReading {
    pub adx: f64,
    pub plus_di: f64,
    pub minus_di: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdReading {
    pub line: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Final indicator readings for one bar, plus the previous bar's readings
/// where a filter needs a crossover.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub close: Option<f64>,
    pub prev_close: Option<f64>,
    pub atr: Option<f64>,
    pub rsi: Option<f64>,
    pub cci: Option<f64>,
    pub macd: Option<MacdReading>,
    pub prev_macd: Option<MacdReading>,
    pub adx: Option<AdxReading>,
    pub sar: Option<f64>,
    pub prev_sar: Option<f64>,
    pub ao: Option<f64>,
    pub ac: Option<f64>,
}

/// The configured indicator bank, precomputed over a bar series.
#[derive(Debug, Clone)]
pub struct IndicatorSet {
    config: IndicatorConfig,
    values: IndicatorValues,
    closes: Vec<f64>,
}

impl IndicatorSet {
    pub fn indicators(config: &IndicatorConfig) -> Vec<Box<dyn Indicator>> {
        let (f, s, g) = (config.macd_fast, config.macd_slow, config.macd_signal);
        vec![
            Box::new(Atr::new(config.atr_period)),
            Box::new(Rsi::new(config.rsi_period)),
            Box::new(Cci::new(config.cci_period)),
            Box::new(Adx::new(config.adx_period, AdxBand::Adx)),
            Box::new(Adx::new(config.adx_period, AdxBand::PlusDi)),
            Box::new(Adx::new(config.adx_period, AdxBand::MinusDi)),
            Box::new(Macd::new(f, s, g, MacdBand::Line)),
            Box::new(Macd::new(f, s, g, MacdBand::Signal)),
            Box::new(Macd::new(f, s, g, MacdBand::Histogram)),
            Box::new(ParabolicSar::new(config.sar_step, config.sar_step, config.sar_max)),
            Box::new(AwesomeOscillator),
            Box::new(AcceleratorOscillator),
        ]
    }

    /// Precompute every series. `config` must already be validated.
    pub fn precompute(config: &IndicatorConfig, bars: &[Bar]) -> Self {
        let values = precompute(bars, &Self::indicators(config));
        Self {
            config: config.clone(),
            values,
            closes: bars.iter().map(|b| b.close).collect(),
        }
    }

    /// Largest lookback across the bank.
    pub fn warmup(config: &IndicatorConfig) -> usize {
        Self::indicators(config)
            .iter()
            .map(|i| i.lookback())
            .max()
            .unwrap_or(0)
    }

    pub fn snapshot(&self, bar_index: usize) -> IndicatorSnapshot {
        let prev = bar_index.checked_sub(1);
        IndicatorSnapshot {
            close: self.close(bar_index),
            prev_close: prev.and_then(|i| self.close(i)),
            atr: self.get(&format!("atr_{}", self.config.atr_period), bar_index),
            rsi: self.get(&format!("rsi_{}", self.config.rsi_period), bar_index),
            cci: self.get(&format!("cci_{}", self.config.cci_period), bar_index),
            macd: self.macd(bar_index),
            prev_macd: prev.and_then(|i| self.macd(i)),
            adx: self.adx(bar_index),
            sar: self.sar(bar_index),
            prev_sar: prev.and_then(|i| self.sar(i)),
            ao: self.get(AwesomeOscillator::KEY, bar_index),
            ac: self.get(AcceleratorOscillator::KEY, bar_index),
        }
    }

    fn get(&self, key: &str, bar_index: usize) -> Option<f64> {
        self.values.get_final(key, bar_index)
    }

    fn close(&self, bar_index: usize) -> Option<f64> {
        self.closes.get(bar_index).copied().filter(|c| c.is_finite())
    }

    fn macd(&self, bar_index: usize) -> Option<MacdReading> {
        let (f, s, g) = (self.config.macd_fast, self.config.macd_slow, self.config.macd_signal);
        Some(MacdReading {
            line: self.get(&Macd::key(f, s, g, MacdBand::Line), bar_index)?,
            signal: self.get(&Macd::key(f, s, g, MacdBand::Signal), bar_index)?,
            histogram: self.get(&Macd::key(f, s, g, MacdBand::Histogram), bar_index)?,
        })
    }

    fn adx(&self, bar_index: usize) -> Option<AdxReading> {
        let p = self.config.adx_period;
        Some(AdxReading {
            adx: self.get(&Adx::key(p, AdxBand::Adx), bar_index)?,
            plus_di: self.get(&Adx::key(p, AdxBand::PlusDi), bar_index)?,
            minus_di: self.get(&Adx::key(p, AdxBand::MinusDi), bar_index)?,
        })
    }

    fn sar(&self, bar_index: usize) -> Option<f64> {
        let key = ParabolicSar::key(self.config.sar_step, self.config.sar_step, self.config.sar_max);
        self.get(&key, bar_index)
    }
}
