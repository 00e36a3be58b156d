//! Pricing rule model
//!
//! A pricing rule pairs an adjustment (percentage or fixed amount) with the
//! typed conditions that decide which timeslots it applies to. Rules decode
//! from the stored row shape used by the booking platform:
//!
//! ```json
//! {
//!   "id": "clx2k9f0a0001",
//!   "rule_type": "TIME_RANGE",
//!   "adjustment_type": "PERCENTAGE",
//!   "value": 20,
//!   "priority": 0,
//!   "stackable": true,
//!   "is_active": true,
//!   "conditions": { "days_of_week": [6] }
//! }
//! ```
//!
//! `priority`, `stackable`, and `is_active` may be omitted and default to
//! `0`, `true`, and `true`. Unknown `rule_type` or `adjustment_type` values
//! fail the decode outright.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use core_kernel::{Money, Rate, RuleId};

use crate::conditions::{RuleConditions, RuleType};
use crate::error::PricingError;
use crate::timeslot::TimeslotContext;

/// How a rule's value alters the running price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdjustmentType {
    /// `value` is a percentage of the running price at application time
    Percentage,
    /// `value` is an absolute amount in minor currency units
    Fixed,
}

/// The magnitude of a rule, relative or absolute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjustment {
    /// How `value` is interpreted
    pub adjustment_type: AdjustmentType,
    /// Percentage points or minor currency units; negative values discount
    pub value: Decimal,
}

impl Adjustment {
    /// Creates a percentage adjustment (e.g., `20` for +20%)
    pub fn percentage(value: Decimal) -> Self {
        Self {
            adjustment_type: AdjustmentType::Percentage,
            value,
        }
    }

    /// Creates a fixed adjustment in minor currency units
    pub fn fixed(value: Decimal) -> Self {
        Self {
            adjustment_type: AdjustmentType::Fixed,
            value,
        }
    }

    /// Computes the concrete amount this adjustment adds to the running price
    ///
    /// Percentage adjustments compound: they are taken from the running
    /// price at the moment the rule applies, not from the base price.
    pub fn amount_on(&self, current_price: &Money) -> Money {
        match self.adjustment_type {
            AdjustmentType::Percentage => Rate::from_percentage(self.value).apply(current_price),
            AdjustmentType::Fixed => Money::new(self.value, current_price.currency()),
        }
    }
}

/// A dynamic pricing rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RuleRow", into = "RuleRow")]
pub struct PricingRule {
    /// Identifier carried over from the stored row
    pub id: RuleId,
    /// The price change this rule makes when it applies
    pub adjustment: Adjustment,
    /// Application order; lower priorities apply first
    pub priority: i32,
    /// When false, no further rule applies after this one
    pub stackable: bool,
    /// Inactive rules are skipped entirely
    pub is_active: bool,
    /// Typed conditions, keyed by the rule's type
    pub conditions: RuleConditions,
}

impl PricingRule {
    /// Creates an active, stackable rule with priority 0
    pub fn new(id: RuleId, adjustment: Adjustment, conditions: RuleConditions) -> Self {
        Self {
            id,
            adjustment,
            priority: 0,
            stackable: true,
            is_active: true,
            conditions,
        }
    }

    /// Sets the application priority
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Marks the rule as non-stackable
    pub fn non_stackable(mut self) -> Self {
        self.stackable = false;
        self
    }

    /// Marks the rule as inactive
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Returns the rule's type
    pub fn rule_type(&self) -> RuleType {
        self.conditions.rule_type()
    }

    /// Checks whether this rule applies to the given timeslot at `now`
    pub fn matches(&self, timeslot: &TimeslotContext, now: DateTime<Utc>) -> bool {
        self.conditions.matches(timeslot, now)
    }

    /// Parses a single rule from its stored JSON row
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Rule`] when the JSON is malformed or the
    /// row's `rule_type` or `adjustment_type` is unsupported.
    pub fn from_json(json: &str) -> Result<Self, PricingError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Parses a batch of rules from a JSON array of stored rows
///
/// The whole batch fails if any row fails; a rule set containing rows the
/// engine cannot interpret is not safe to price against.
pub fn rules_from_json(json: &str) -> Result<Vec<PricingRule>, PricingError> {
    Ok(serde_json::from_str(json)?)
}

fn default_true() -> bool {
    true
}

/// The flat row shape rules are stored and transported in
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RuleRow {
    id: RuleId,
    rule_type: RuleType,
    adjustment_type: AdjustmentType,
    value: Decimal,
    #[serde(default)]
    priority: i32,
    #[serde(default = "default_true")]
    stackable: bool,
    #[serde(default = "default_true")]
    is_active: bool,
    #[serde(default)]
    conditions: Value,
}

impl From<RuleRow> for PricingRule {
    fn from(row: RuleRow) -> Self {
        let conditions = RuleConditions::from_parts(row.rule_type, &row.conditions, &row.id);
        PricingRule {
            id: row.id,
            adjustment: Adjustment {
                adjustment_type: row.adjustment_type,
                value: row.value,
            },
            priority: row.priority,
            stackable: row.stackable,
            is_active: row.is_active,
            conditions,
        }
    }
}

impl From<PricingRule> for RuleRow {
    fn from(rule: PricingRule) -> Self {
        RuleRow {
            id: rule.id,
            rule_type: rule.conditions.rule_type(),
            adjustment_type: rule.adjustment.adjustment_type,
            value: rule.adjustment.value,
            priority: rule.priority,
            stackable: rule.stackable,
            is_active: rule.is_active,
            conditions: rule.conditions.to_value(),
        }
    }
}
