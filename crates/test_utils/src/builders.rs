//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else. The default rule is an unconstrained
//! time-range rule, so it matches every slot until a test narrows it down.

use chrono::{DateTime, Duration, Utc};
use core_kernel::RuleId;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use domain_pricing::{
    Adjustment, PricingRule, RuleConditions, TimeRangeConditions, TimeslotContext,
};

use crate::fixtures::TemporalFixtures;

/// Builder for constructing test pricing rules
pub struct PricingRuleBuilder {
    id: RuleId,
    adjustment: Adjustment,
    priority: i32,
    stackable: bool,
    is_active: bool,
    conditions: RuleConditions,
}

impl Default for PricingRuleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PricingRuleBuilder {
    /// Creates a new builder with default values
    ///
    /// The default rule is a +10% time-range rule with no constraints,
    /// priority 0, stackable and active.
    pub fn new() -> Self {
        Self {
            id: RuleId::generate(),
            adjustment: Adjustment::percentage(dec!(10)),
            priority: 0,
            stackable: true,
            is_active: true,
            conditions: RuleConditions::TimeRange(TimeRangeConditions::default()),
        }
    }

    /// Sets the rule ID
    pub fn with_id(mut self, id: RuleId) -> Self {
        self.id = id;
        self
    }

    /// Sets a percentage adjustment
    pub fn with_percentage(mut self, value: Decimal) -> Self {
        self.adjustment = Adjustment::percentage(value);
        self
    }

    /// Sets a fixed adjustment in minor currency units
    pub fn with_fixed(mut self, value: Decimal) -> Self {
        self.adjustment = Adjustment::fixed(value);
        self
    }

    /// Sets the priority
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
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Sets the conditions, replacing the unconstrained default
    pub fn with_conditions(mut self, conditions: RuleConditions) -> Self {
        self.conditions = conditions;
        self
    }

    /// Builds the pricing rule
    pub fn build(self) -> PricingRule {
        PricingRule {
            id: self.id,
            adjustment: self.adjustment,
            priority: self.priority,
            stackable: self.stackable,
            is_active: self.is_active,
            conditions: self.conditions,
        }
    }
}

/// Builder for constructing test timeslots
pub struct TimeslotContextBuilder {
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    capacity: u32,
    booked_count: u32,
}

impl Default for TimeslotContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeslotContextBuilder {
    /// Creates a new builder seeded with the canonical Saturday slot
    pub fn new() -> Self {
        Self {
            start_time: TemporalFixtures::saturday_slot_start(),
            end_time: TemporalFixtures::saturday_slot_end(),
            capacity: 10,
            booked_count: 0,
        }
    }

    /// Sets the start time
    pub fn with_start_time(mut self, start: DateTime<Utc>) -> Self {
        self.start_time = start;
        self
    }

    /// Sets the end time
    pub fn with_end_time(mut self, end: DateTime<Utc>) -> Self {
        self.end_time = end;
        self
    }

    /// Sets the end time relative to the start
    pub fn with_duration_hours(mut self, hours: i64) -> Self {
        self.end_time = self.start_time + Duration::hours(hours);
        self
    }

    /// Sets the capacity
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the number of existing bookings
    pub fn with_booked_count(mut self, booked: u32) -> Self {
        self.booked_count = booked;
        self
    }

    /// Builds the timeslot context
    pub fn build(self) -> TimeslotContext {
        TimeslotContext {
            start_time: self.start_time,
            end_time: self.end_time,
            capacity: self.capacity,
            booked_count: self.booked_count,
        }
    }
}
