//! Protective order distances: ATR-scaled or fixed in price steps.
//!
//! ATR mode:   take = atr · (take_profit_points / 100) · atr_take_factor
//!             stop = atr · (stop_loss_points / 100) · atr_stop_factor
//! Fixed mode: take = take_profit_points · price_step
//!             stop = stop_loss_points · price_step
//!
//! Both legs snap to the nearest price step; a leg that rounds to zero or
//! below is dropped.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::instrument::round_to_step;
use crate::domain::{Direction, ProtectiveDistances};
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtectiveConfig {
    pub use_atr: bool,
    pub take_profit_points: Decimal,
    pub stop_loss_points: Decimal,
    pub atr_take_factor: Decimal,
    pub atr_stop_factor: Decimal,
}

impl Default for ProtectiveConfig {
    fn default() -> Self {
        Self {
            use_atr: false,
            take_profit_points: Decimal::from(50),
            stop_loss_points: Decimal::from(50),
            atr_take_factor: Decimal::ONE,
            atr_stop_factor: Decimal::ONE,
        }
    }
}

impl ProtectiveConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("take_profit_points", self.take_profit_points),
            ("stop_loss_points", self.stop_loss_points),
            ("atr_take_factor", self.atr_take_factor),
            ("atr_stop_factor", self.atr_stop_factor),
        ];
        for (name, value) in fields {
            if value < Decimal::ZERO {
                return Err(ConfigError::Negative { name, value });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ProtectiveOrderCalculator {
    config: ProtectiveConfig,
}

impl ProtectiveOrderCalculator {
    pub fn new(config: ProtectiveConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Distances for a new position, or `None` when nothing should be placed.
    ///
    /// `price_step` must be positive.
    pub fn compute(
        &self,
        direction: Direction,
        price_step: Decimal,
        atr: Option<Decimal>,
    ) -> Option<ProtectiveDistances> {
        if direction.is_flat() {
            return None;
        }
        let c = &self.config;
        let (take, stop) = if c.use_atr {
            let atr = atr.filter(|a| *a > Decimal::ZERO)?;
            (
                atr_leg(atr, c.take_profit_points, c.atr_take_factor),
                atr_leg(atr, c.stop_loss_points, c.atr_stop_factor),
            )
        } else {
            (
                c.take_profit_points.checked_mul(price_step),
                c.stop_loss_points.checked_mul(price_step),
            )
        };

        let distances = ProtectiveDistances {
            take: take.and_then(|v| snap(v, price_step)),
            stop: stop.and_then(|v| snap(v, price_step)),
        };
        if distances.take.is_none() && distances.stop.is_none() {
            return None;
        }
        Some(distances)
    }
}

fn atr_leg(atr: Decimal, points: Decimal, factor: Decimal) -> Option<Decimal> {
    atr.checked_mul(points / Decimal::ONE_HUNDRED)?.checked_mul(factor)
}

fn snap(value: Decimal, price_step: Decimal) -> Option<Decimal> {
    round_to_step(value, price_step).filter(|rounded| *rounded > Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn calc(config: ProtectiveConfig) -> ProtectiveOrderCalculator {
        ProtectiveOrderCalculator::new(config).unwrap()
    }

    fn atr_config() -> ProtectiveConfig {
        ProtectiveConfig {
            use_atr: true,
            take_profit_points: dec!(200),
            stop_loss_points: dec!(150),
            atr_take_factor: dec!(1),
            atr_stop_factor: dec!(0.5),
        }
    }

    #[test]
    fn atr_mode_requires_positive_atr() {
        let c = calc(atr_config());
        assert_eq!(c.compute(Direction::Long, dec!(0.01), Some(Decimal::ZERO)), None);
        assert_eq!(c.compute(Direction::Long, dec!(0.01), None), None);
        assert_eq!(c.compute(Direction::Long, dec!(0.01), Some(dec!(-1))), None);
    }

    #[test]
    fn atr_mode_scales_and_rounds() {
        let c = calc(atr_config());
        let d = c.compute(Direction::Short, dec!(0.01), Some(dec!(1.2345))).unwrap();
        // take = 1.2345 · 2 · 1 = 2.469 -> 2.47; stop = 1.2345 · 1.5 · 0.5 = 0.925875 -> 0.93
        assert_eq!(d.take, Some(dec!(2.47)));
        assert_eq!(d.stop, Some(dec!(0.93)));
    }

    #[test]
    fn fixed_mode_multiplies_price_step() {
        let c = calc(ProtectiveConfig {
            take_profit_points: dec!(25),
            stop_loss_points: dec!(10),
            ..Default::default()
        });
        let d = c.compute(Direction::Long, dec!(0.01), None).unwrap();
        assert_eq!(d.take, Some(dec!(0.25)));
        assert_eq!(d.stop, Some(dec!(0.10)));
    }

    #[test]
    fn zero_leg_is_omitted() {
        let c = calc(ProtectiveConfig {
            take_profit_points: dec!(25),
            stop_loss_points: Decimal::ZERO,
            ..Default::default()
        });
        let d = c.compute(Direction::Long, dec!(0.01), None).unwrap();
        assert_eq!(d.take, Some(dec!(0.25)));
        assert_eq!(d.stop, None);
    }

    #[test]
    fn leg_rounding_to_zero_is_omitted() {
        let c = calc(ProtectiveConfig {
            take_profit_points: dec!(1),
            stop_loss_points: dec!(1),
            ..atr_config()
        });
        // take 0.004 and stop 0.002 both round to 0 at a 0.01 step
        assert_eq!(c.compute(Direction::Long, dec!(0.01), Some(dec!(0.4))), None);
    }

    #[test]
    fn overflowing_leg_is_dropped() {
        let c = calc(ProtectiveConfig {
            atr_take_factor: Decimal::MAX,
            ..atr_config()
        });
        let d = c.compute(Direction::Long, dec!(0.01), Some(dec!(3))).unwrap();
        assert_eq!(d.take, None);
        // 3 · 1.5 · 0.5 = 2.25
        assert_eq!(d.stop, Some(dec!(2.25)));
    }

    #[test]
    fn flat_direction_places_nothing() {
        let c = calc(ProtectiveConfig::default());
        assert_eq!(c.compute(Direction::Flat, dec!(0.01), None), None);
    }

    #[test]
    fn negative_points_rejected() {
        let err = ProtectiveOrderCalculator::new(ProtectiveConfig {
            stop_loss_points: dec!(-5),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::Negative { name: "stop_loss_points", .. }));
    }
}
