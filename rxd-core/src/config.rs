//! Serializable strategy configuration.
//!
//! One TOML document carries everything a run needs. Every section and
//! field is optional and falls back to its default. `validate()` fails fast
//! on settings that could only break mid-run.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::decision::DecisionMode;
use crate::domain::Instrument;
use crate::error::ConfigError;
use crate::filters::FilterConfig;
use crate::indicators::IndicatorConfig;
use crate::perceptron::{PerceptronModel, ScorerRole};
use crate::protective::ProtectiveConfig;

/// Settings of the in-crate paper execution collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Units per entry.
    pub volume: Decimal,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            volume: Decimal::ONE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    pub symbol: String,
    pub mode: DecisionMode,
    /// Minimum price increment of the instrument.
    pub price_step: Decimal,
    pub supervisor: PerceptronModel,
    pub long: PerceptronModel,
    pub short: PerceptronModel,
    pub filters: FilterConfig,
    pub protective: ProtectiveConfig,
    pub indicators: IndicatorConfig,
    pub execution: ExecutionConfig,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            symbol: "SYNTH".to_string(),
            mode: DecisionMode::default(),
            price_step: Decimal::new(1, 2),
            supervisor: PerceptronModel::default(),
            long: PerceptronModel::default(),
            short: PerceptronModel::default(),
            filters: FilterConfig::default(),
            protective: ProtectiveConfig::default(),
            indicators: IndicatorConfig::default(),
            execution: ExecutionConfig::default(),
        }
    }
}

impl StrategyConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn instrument(&self) -> Result<Instrument, ConfigError> {
        Ok(Instrument::new(self.symbol.clone(), self.price_step)?)
    }

    pub fn model(&self, role: ScorerRole) -> &PerceptronModel {
        match role {
            ScorerRole::Supervisor => &self.supervisor,
            ScorerRole::Long => &self.long,
            ScorerRole::Short => &self.short,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.instrument()?;
        for role in [ScorerRole::Supervisor, ScorerRole::Long, ScorerRole::Short] {
            self.model(role).validate(role)?;
        }
        self.protective.validate()?;
        self.indicators.validate()?;
        if self.execution.volume <= Decimal::ZERO {
            return Err(ConfigError::NonPositive {
                name: "execution.volume",
                value: self.execution.volume,
            });
        }
        Ok(())
    }

    /// Bars before every perceptron can score.
    pub fn scorer_warmup(&self) -> usize {
        [&self.supervisor, &self.long, &self.short]
            .iter()
            .map(|m| m.warmup_bars())
            .max()
            .unwrap_or(0)
    }
}
