//! Perceptron scorer: a linear combination of lagged LWMA differences.
//!
//! With `s = shift_step` and `v(k)` the weighted-price LWMA `k` bars back:
//!
//! ```text
//! a1 = current - v(s)     a2 = v(s)  - v(2s)
//! a3 = v(2s)   - v(3s)    a4 = v(3s) - v(4s)
//! score = (w1-100)·a1 + (w2-100)·a2 + (w3-100)·a3 + (w4-100)·a4 + (threshold-100)
//! ```
//!
//! Weights are centred on 100, so a weight of 100 switches its term off.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::Sample;
use crate::error::ConfigError;
use crate::history::HistoryBuffer;
use crate::wma::WeightedAverageChain;

/// Which of the three scorers a model drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorerRole {
    Supervisor,
    Long,
    Short,
}

impl ScorerRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Supervisor => "supervisor",
            Self::Long => "long",
            Self::Short => "short",
        }
    }
}

/// Parameters of one perceptron, fixed for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerceptronModel {
    pub ma_length: usize,
    pub shift_step: usize,
    pub weight1: Decimal,
    pub weight2: Decimal,
    pub weight3: Decimal,
    pub weight4: Decimal,
    pub threshold: Decimal,
}

impl Default for PerceptronModel {
    /// Neutral model: every term weighs zero, so the score is always 0.
    fn default() -> Self {
        Self {
            ma_length: 10,
            shift_step: 5,
            weight1: Decimal::ONE_HUNDRED,
            weight2: Decimal::ONE_HUNDRED,
            weight3: Decimal::ONE_HUNDRED,
            weight4: Decimal::ONE_HUNDRED,
            threshold: Decimal::ONE_HUNDRED,
        }
    }
}

impl PerceptronModel {
    pub fn validate(&self, role: ScorerRole) -> Result<(), ConfigError> {
        if self.ma_length == 0 {
            return Err(ConfigError::ZeroMaLength);
        }
        if self.shift_step == 0 {
            return Err(ConfigError::ZeroShiftStep {
                model: role.as_str(),
            });
        }
        Ok(())
    }

    /// Bars of input consumed before the first score: the LWMA window plus
    /// `4·shift_step` stored averages.
    pub fn warmup_bars(&self) -> usize {
        self.ma_length + 4 * self.shift_step
    }

    fn centred(&self) -> Option<[Decimal; 4]> {
        Some([
            self.weight1.checked_sub(Decimal::ONE_HUNDRED)?,
            self.weight2.checked_sub(Decimal::ONE_HUNDRED)?,
            self.weight3.checked_sub(Decimal::ONE_HUNDRED)?,
            self.weight4.checked_sub(Decimal::ONE_HUNDRED)?,
        ])
    }
}

/// One perceptron with its own LWMA chain and history.
#[derive(Debug, Clone)]
pub struct PerceptronScorer {
    model: PerceptronModel,
    chain: WeightedAverageChain,
    history: HistoryBuffer,
    current: Option<Decimal>,
}

impl PerceptronScorer {
    pub fn new(role: ScorerRole, model: PerceptronModel) -> Result<Self, ConfigError> {
        model.validate(role)?;
        Ok(Self {
            chain: WeightedAverageChain::new(model.ma_length)?,
            history: HistoryBuffer::new(model.shift_step),
            current: None,
            model,
        })
    }

    /// Feed one finished bar.
    ///
    /// The previous bar's average moves into history before the chain
    /// advances, so history never contains the current value.
    pub fn update(&mut self, sample: &Sample) {
        if let Some(previous) = self.current.take() {
            self.history.add(previous);
        }
        self.current = self.chain.update(sample);
    }

    /// Score for the current bar.
    ///
    /// `None` while history is short, or when a product or sum leaves the
    /// decimal range.
    pub fn score(&self) -> Option<Decimal> {
        let current = self.current?;
        let s = self.model.shift_step;
        let v1 = self.history.get_shifted(s)?;
        let v2 = self.history.get_shifted(2 * s)?;
        let v3 = self.history.get_shifted(3 * s)?;
        let v4 = self.history.get_shifted(4 * s)?;

        let diffs = [
            current.checked_sub(v1)?,
            v1.checked_sub(v2)?,
            v2.checked_sub(v3)?,
            v3.checked_sub(v4)?,
        ];
        let bias = self.model.threshold.checked_sub(Decimal::ONE_HUNDRED)?;
        self.model
            .centred()?
            .iter()
            .zip(diffs)
            .try_fold(bias, |acc, (w, a)| acc.checked_add(w.checked_mul(a)?))
    }

    pub fn reset(&mut self) {
        self.chain.clear();
        self.history.clear();
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn model(ma_length: usize, shift_step: usize, weights: [Decimal; 4], threshold: Decimal) -> PerceptronModel {
        PerceptronModel {
            ma_length,
            shift_step,
            weight1: weights[0],
            weight2: weights[1],
            weight3: weights[2],
            weight4: weights[3],
            threshold,
        }
    }

    fn flat_sample(v: Decimal) -> Sample {
        Sample::new(v, v)
    }

    #[test]
    fn zero_shift_is_rejected() {
        let m = model(3, 0, [dec!(100); 4], dec!(100));
        let err = PerceptronScorer::new(ScorerRole::Long, m).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroShiftStep { model: "long" }));
    }

    #[test]
    fn zero_length_is_rejected() {
        let m = model(0, 1, [dec!(100); 4], dec!(100));
        assert!(matches!(
            PerceptronScorer::new(ScorerRole::Short, m),
            Err(ConfigError::ZeroMaLength)
        ));
    }

    #[test]
    fn hand_computed_score() {
        // ma_length 1 makes the LWMA the raw weighted price.
        let m = model(1, 1, [dec!(101), dec!(102), dec!(103), dec!(104)], dec!(90));
        let mut scorer = PerceptronScorer::new(ScorerRole::Supervisor, m).unwrap();
        for v in [dec!(10), dec!(12), dec!(15), dec!(19), dec!(24)] {
            scorer.update(&flat_sample(v));
        }
        // a1 = 24-19 = 5, a2 = 19-15 = 4, a3 = 15-12 = 3, a4 = 12-10 = 2
        // 1·5 + 2·4 + 3·3 + 4·2 + (90-100) = 5 + 8 + 9 + 8 - 10 = 20
        assert_eq!(scorer.score(), Some(dec!(20)));
    }

    #[test]
    fn none_until_four_shifts_of_history() {
        let m = model(3, 2, [dec!(110); 4], dec!(100));
        let mut scorer = PerceptronScorer::new(ScorerRole::Long, m.clone()).unwrap();
        let warmup = m.warmup_bars();
        assert_eq!(warmup, 11);
        for i in 0..warmup {
            assert_eq!(scorer.score(), None, "score defined too early at bar {i}");
            scorer.update(&flat_sample(Decimal::from(100 + i as i64)));
        }
        assert_eq!(scorer.history.len(), 8);
        assert!(scorer.score().is_some());
    }

    #[test]
    fn reset_clears_history() {
        let m = model(1, 1, [dec!(120); 4], dec!(100));
        let mut scorer = PerceptronScorer::new(ScorerRole::Long, m).unwrap();
        for i in 0..6 {
            scorer.update(&flat_sample(Decimal::from(i)));
        }
        assert!(scorer.score().is_some());
        scorer.reset();
        scorer.reset();
        assert_eq!(scorer.score(), None);
        assert!(scorer.history.is_empty());
    }

    #[test]
    fn neutral_model_scores_zero() {
        let mut scorer =
            PerceptronScorer::new(ScorerRole::Supervisor, PerceptronModel::default()).unwrap();
        for i in 0..PerceptronModel::default().warmup_bars() {
            scorer.update(&flat_sample(Decimal::from(i as i64 * 3)));
        }
        assert_eq!(scorer.score(), Some(Decimal::ZERO));
    }

    #[test]
    fn oversized_weight_yields_no_score() {
        let huge = Decimal::from_i128_with_scale(10_i128.pow(28), 0);
        let m = model(1, 1, [huge, dec!(100), dec!(100), dec!(100)], dec!(100));
        let mut scorer = PerceptronScorer::new(ScorerRole::Long, m).unwrap();
        for v in [dec!(100), dec!(110), dec!(120), dec!(130), dec!(140)] {
            scorer.update(&flat_sample(v));
        }
        // (1e28 - 100)·10 exceeds Decimal::MAX
        assert_eq!(scorer.score(), None);
    }

    #[test]
    fn extreme_threshold_yields_no_score() {
        let m = model(1, 1, [dec!(100); 4], Decimal::MIN);
        let mut scorer = PerceptronScorer::new(ScorerRole::Short, m).unwrap();
        for i in 0..5 {
            scorer.update(&flat_sample(Decimal::from(i)));
        }
        assert_eq!(scorer.score(), None);
    }

    proptest! {
        /// Strictly increasing input with all weights above 100 keeps the score positive.
        #[test]
        fn rising_series_scores_positive(
            ma_length in 1usize..8,
            shift in 1usize..4,
            steps in prop::collection::vec(1i64..500, 60),
            w in 101i64..200,
        ) {
            let w = Decimal::from(w);
            let m = model(ma_length, shift, [w; 4], dec!(100));
            let mut scorer = PerceptronScorer::new(ScorerRole::Long, m.clone()).unwrap();
            let mut price = dec!(100);
            for (i, step) in steps.iter().enumerate() {
                price += Decimal::new(*step, 2);
                scorer.update(&flat_sample(price));
                if i + 1 >= m.warmup_bars() {
                    let score = scorer.score();
                    prop_assert!(score.is_some());
                    prop_assert!(score.unwrap() > Decimal::ZERO);
                }
            }
        }
    }
}
