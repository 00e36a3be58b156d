//! Price computation pipeline
//!
//! The engine turns a base price, a rule set, and a timeslot into a final
//! price with an audit trail of every rule that contributed.
//!
//! # Evaluation Flow
//!
//! ```text
//! rules -> filter is_active -> sort by priority (ascending, stable)
//!       -> for each rule: match? -> apply adjustment to running price
//!                                -> record audit entry
//!                                -> stop if the rule is non-stackable
//! running price -> snap to rounding unit -> final price
//! ```
//!
//! Evaluation is deterministic: the same inputs and the same evaluation
//! instant always produce the same result. The clock is a parameter, never
//! read from the environment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use core_kernel::{Money, RuleId};

use crate::conditions::RuleType;
use crate::error::PricingError;
use crate::rule::PricingRule;
use crate::timeslot::TimeslotContext;

/// Default snapping unit for final prices, in minor currency units
pub const DEFAULT_ROUNDING_UNIT: u32 = 1000;

/// Rounding policy applied to final prices
///
/// Final prices snap to the nearest multiple of `unit` minor currency
/// units, with midpoints rounding away from zero. The unit must be
/// positive; a would-be zero unit is rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RoundingConfig")]
pub struct PriceRounding {
    unit: u32,
}

/// Raw config shape; validated into [`PriceRounding`] on deserialization
#[derive(Debug, Clone, Copy, Deserialize)]
struct RoundingConfig {
    unit: u32,
}

impl PriceRounding {
    /// Creates a rounding policy with the given unit
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidRoundingUnit`] when `unit` is zero.
    pub fn new(unit: u32) -> Result<Self, PricingError> {
        if unit == 0 {
            return Err(PricingError::InvalidRoundingUnit);
        }
        Ok(Self { unit })
    }

    /// Returns the snapping unit in minor currency units
    pub fn unit(&self) -> u32 {
        self.unit
    }

    /// Snaps a price to the nearest multiple of the unit
    pub fn snap(&self, price: Money) -> Money {
        price.round_to_unit(self.unit)
    }
}

impl Default for PriceRounding {
    fn default() -> Self {
        Self {
            unit: DEFAULT_ROUNDING_UNIT,
        }
    }
}

impl TryFrom<RoundingConfig> for PriceRounding {
    type Error = PricingError;

    fn try_from(config: RoundingConfig) -> Result<Self, Self::Error> {
        Self::new(config.unit)
    }
}

/// Audit record for a single rule application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedRule {
    /// Identifier of the applied rule
    #[serde(rename = "id")]
    pub rule_id: RuleId,
    /// Category of the applied rule
    pub rule_type: RuleType,
    /// Concrete amount the rule added to the running price; negative for
    /// discounts
    pub adjustment: Money,
}

/// Outcome of a price computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Price after all applicable rules and final rounding
    pub final_price: Money,
    /// Rules that contributed to the price, in application order
    pub applied_rules: Vec<AppliedRule>,
}

/// Evaluates pricing rules against timeslots
///
/// The engine holds no rule state of its own; rules are passed per call so
/// one engine instance can price any number of services.
pub struct PricingEngine {
    rounding: PriceRounding,
}

impl PricingEngine {
    /// Creates an engine with the default rounding policy
    pub fn new() -> Self {
        Self {
            rounding: PriceRounding::default(),
        }
    }

    /// Overrides the rounding policy
    pub fn with_rounding(mut self, rounding: PriceRounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// Returns the rounding policy in effect
    pub fn rounding(&self) -> PriceRounding {
        self.rounding
    }

    /// Computes the price of a timeslot under the given rules
    ///
    /// Inactive rules are skipped. The remaining rules are ordered by
    /// ascending priority, with ties keeping their input order, and each
    /// matching rule adjusts the running price in turn. Percentage rules
    /// compound on the running price. The first applied non-stackable rule
    /// ends the evaluation for every rule after it. The final price snaps
    /// to the engine's rounding unit.
    ///
    /// # Arguments
    ///
    /// * `base_price` - The service's list price
    /// * `rules` - Candidate rules, in stored order
    /// * `timeslot` - The slot being priced
    /// * `now` - The evaluation instant, used for lead-time matching
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let engine = PricingEngine::new();
    /// let result = engine.compute_price(base_price, &rules, &slot, Utc::now());
    /// println!("{} via {} rules", result.final_price, result.applied_rules.len());
    /// ```
    #[instrument(skip(self, rules, timeslot), fields(rule_count = rules.len()))]
    pub fn compute_price(
        &self,
        base_price: Money,
        rules: &[PricingRule],
        timeslot: &TimeslotContext,
        now: DateTime<Utc>,
    ) -> PricingResult {
        let mut ordered: Vec<&PricingRule> = rules.iter().filter(|r| r.is_active).collect();
        ordered.sort_by_key(|r| r.priority);

        let mut price = base_price;
        let mut applied_rules = Vec::new();

        for rule in ordered {
            if !rule.matches(timeslot, now) {
                continue;
            }

            let adjustment = rule.adjustment.amount_on(&price);
            price = price + adjustment;
            applied_rules.push(AppliedRule {
                rule_id: rule.id.clone(),
                rule_type: rule.rule_type(),
                adjustment,
            });

            // A non-stackable rule ends the evaluation outright, including
            // for not-yet-visited rules of higher priority.
            if !rule.stackable {
                break;
            }
        }

        let final_price = self.rounding.snap(price);
        debug!(%final_price, applied = applied_rules.len(), "Price computed");

        PricingResult {
            final_price,
            applied_rules,
        }
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use core_kernel::Currency;

    #[test]
    fn test_rounding_rejects_zero_unit() {
        let result = PriceRounding::new(0);
        assert!(matches!(result, Err(PricingError::InvalidRoundingUnit)));
    }

    #[test]
    fn test_default_rounding_unit_is_1000() {
        assert_eq!(PriceRounding::default().unit(), 1000);
        assert_eq!(PricingEngine::new().rounding().unit(), 1000);
    }

    #[test]
    fn test_snap_uses_the_configured_unit() {
        let rounding = PriceRounding::new(500).unwrap();
        let snapped = rounding.snap(Money::from_minor(100249, Currency::IDR));
        assert_eq!(snapped.amount(), dec!(100000));

        let snapped = rounding.snap(Money::from_minor(100250, Currency::IDR));
        assert_eq!(snapped.amount(), dec!(100500));
    }

    #[test]
    fn test_rounding_config_deserialization_validates_unit() {
        let ok: PriceRounding = serde_json::from_str(r#"{ "unit": 500 }"#).unwrap();
        assert_eq!(ok.unit(), 500);

        let zero: Result<PriceRounding, _> = serde_json::from_str(r#"{ "unit": 0 }"#);
        assert!(zero.is_err());
    }
}
