//! Rule conditions and matching
//!
//! Each pricing rule carries a conditions document that, in stored form, is
//! an open JSON object interpreted according to the rule's type. This module
//! gives every rule type its own typed condition struct so that a rule can
//! only ever be matched through the semantics of its own type.
//!
//! # Decoding
//!
//! Condition documents come from hand-edited admin payloads and legacy rows,
//! so decoding is deliberately lenient: a missing or null field means "no
//! constraint", and a field of the wrong type or out of range degrades to the
//! same, with a warning. Invalid entries inside day or date lists are dropped
//! individually. Absent constraints make a rule match *more* slots, never
//! fewer, with one exception: a demand rule never matches a slot without
//! capacity, and a date-specific rule without dates never matches at all.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use core_kernel::RuleId;

use crate::timeslot::TimeslotContext;

/// The supported rule categories
///
/// The set is closed: rows carrying any other tag are rejected when the rule
/// is decoded, never silently skipped at evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleType {
    /// Matches on day of week and hour of day of the slot start
    TimeRange,
    /// Matches on the slot's occupancy fraction
    Demand,
    /// Matches on how far in advance the slot is being priced
    LeadTime,
    /// Matches on the slot's calendar date
    DateSpecific,
}

/// Typed conditions, keyed by rule type
///
/// Constructing this enum is the only way to attach conditions to a rule,
/// which makes it impossible to evaluate, say, demand thresholds against a
/// time-range rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleConditions {
    TimeRange(TimeRangeConditions),
    Demand(DemandConditions),
    LeadTime(LeadTimeConditions),
    DateSpecific(DateSpecificConditions),
}

impl RuleConditions {
    /// Decodes a stored conditions document under the given rule type
    pub(crate) fn from_parts(rule_type: RuleType, conditions: &Value, rule_id: &RuleId) -> Self {
        if !conditions.is_null() && !conditions.is_object() {
            warn!(
                rule_id = %rule_id,
                "rule conditions are not a JSON object; treating all constraints as absent"
            );
        }

        match rule_type {
            RuleType::TimeRange => {
                RuleConditions::TimeRange(TimeRangeConditions::from_value(conditions, rule_id))
            }
            RuleType::Demand => {
                RuleConditions::Demand(DemandConditions::from_value(conditions, rule_id))
            }
            RuleType::LeadTime => {
                RuleConditions::LeadTime(LeadTimeConditions::from_value(conditions, rule_id))
            }
            RuleType::DateSpecific => {
                RuleConditions::DateSpecific(DateSpecificConditions::from_value(conditions, rule_id))
            }
        }
    }

    /// Re-encodes the conditions as a stored JSON document
    pub(crate) fn to_value(&self) -> Value {
        match self {
            RuleConditions::TimeRange(c) => c.to_value(),
            RuleConditions::Demand(c) => c.to_value(),
            RuleConditions::LeadTime(c) => c.to_value(),
            RuleConditions::DateSpecific(c) => c.to_value(),
        }
    }

    /// Returns the rule type these conditions belong to
    pub fn rule_type(&self) -> RuleType {
        match self {
            RuleConditions::TimeRange(_) => RuleType::TimeRange,
            RuleConditions::Demand(_) => RuleType::Demand,
            RuleConditions::LeadTime(_) => RuleType::LeadTime,
            RuleConditions::DateSpecific(_) => RuleType::DateSpecific,
        }
    }

    /// Checks the conditions against a timeslot at the evaluation instant
    pub fn matches(&self, timeslot: &TimeslotContext, now: DateTime<Utc>) -> bool {
        match self {
            RuleConditions::TimeRange(c) => c.matches(timeslot),
            RuleConditions::Demand(c) => c.matches(timeslot),
            RuleConditions::LeadTime(c) => c.matches(timeslot, now),
            RuleConditions::DateSpecific(c) => c.matches(timeslot),
        }
    }
}

/// Conditions for [`RuleType::TimeRange`] rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeRangeConditions {
    /// Days of week the rule applies on, 0 = Sunday through 6 = Saturday
    ///
    /// An empty set matches nothing; an absent set matches every day.
    pub days_of_week: Option<BTreeSet<u8>>,
    /// First hour of day the rule applies in, 0-23 inclusive
    pub start_hour: Option<u8>,
    /// Hour of day the rule stops applying, exclusive, 0-24
    pub end_hour: Option<u8>,
}

impl TimeRangeConditions {
    fn from_value(conditions: &Value, rule_id: &RuleId) -> Self {
        Self {
            days_of_week: read_day_set(conditions, "days_of_week", rule_id),
            start_hour: read_bounded_int(conditions, "start_hour", 23, rule_id),
            end_hour: read_bounded_int(conditions, "end_hour", 24, rule_id),
        }
    }

    fn to_value(&self) -> Value {
        let mut conditions = Map::new();
        if let Some(days) = &self.days_of_week {
            let entries = days.iter().map(|d| Value::from(*d)).collect();
            conditions.insert("days_of_week".to_string(), Value::Array(entries));
        }
        if let Some(start) = self.start_hour {
            conditions.insert("start_hour".to_string(), Value::from(start));
        }
        if let Some(end) = self.end_hour {
            conditions.insert("end_hour".to_string(), Value::from(end));
        }
        Value::Object(conditions)
    }

    /// True when the slot start falls on an allowed day and inside the
    /// half-open hour window `[start_hour, end_hour)`
    pub fn matches(&self, timeslot: &TimeslotContext) -> bool {
        if let Some(days) = &self.days_of_week {
            if !days.contains(&timeslot.weekday_index()) {
                return false;
            }
        }

        let hour = timeslot.start_hour();
        if let Some(start) = self.start_hour {
            if hour < start {
                return false;
            }
        }
        if let Some(end) = self.end_hour {
            if hour >= end {
                return false;
            }
        }

        true
    }
}

/// Conditions for [`RuleType::Demand`] rules
///
/// Occupancy is the fraction `booked_count / capacity`. The minimum bound is
/// inclusive and the maximum bound exclusive, so adjacent demand bands can
/// share an edge without both firing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemandConditions {
    /// Occupancy at or above which the rule applies
    pub min_occupancy: Option<Decimal>,
    /// Occupancy below which the rule applies
    pub max_occupancy: Option<Decimal>,
}

impl DemandConditions {
    fn from_value(conditions: &Value, rule_id: &RuleId) -> Self {
        Self {
            min_occupancy: read_decimal(conditions, "min_occupancy", rule_id),
            max_occupancy: read_decimal(conditions, "max_occupancy", rule_id),
        }
    }

    fn to_value(&self) -> Value {
        let mut conditions = Map::new();
        if let Some(min) = self.min_occupancy {
            if let Some(n) = decimal_to_number(min) {
                conditions.insert("min_occupancy".to_string(), n);
            }
        }
        if let Some(max) = self.max_occupancy {
            if let Some(n) = decimal_to_number(max) {
                conditions.insert("max_occupancy".to_string(), n);
            }
        }
        Value::Object(conditions)
    }

    /// True when the slot has a defined occupancy inside the band
    pub fn matches(&self, timeslot: &TimeslotContext) -> bool {
        let occupancy = match timeslot.occupancy() {
            Some(o) => o,
            None => return false,
        };

        if let Some(min) = self.min_occupancy {
            if occupancy < min {
                return false;
            }
        }
        if let Some(max) = self.max_occupancy {
            if occupancy >= max {
                return false;
            }
        }

        true
    }
}

/// Conditions for [`RuleType::LeadTime`] rules
///
/// Lead time is the signed number of hours between the evaluation instant
/// and the slot start. The maximum bound is exclusive and the minimum bound
/// inclusive, mirroring the demand band edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadTimeConditions {
    /// Lead time below which the rule applies (last-minute bookings)
    pub max_hours: Option<Decimal>,
    /// Lead time at or above which the rule applies (early-bird bookings)
    pub min_hours: Option<Decimal>,
}

impl LeadTimeConditions {
    fn from_value(conditions: &Value, rule_id: &RuleId) -> Self {
        Self {
            max_hours: read_decimal(conditions, "max_hours", rule_id),
            min_hours: read_decimal(conditions, "min_hours", rule_id),
        }
    }

    fn to_value(&self) -> Value {
        let mut conditions = Map::new();
        if let Some(max) = self.max_hours {
            if let Some(n) = decimal_to_number(max) {
                conditions.insert("max_hours".to_string(), n);
            }
        }
        if let Some(min) = self.min_hours {
            if let Some(n) = decimal_to_number(min) {
                conditions.insert("min_hours".to_string(), n);
            }
        }
        Value::Object(conditions)
    }

    /// True when the lead time at `now` falls inside the window
    pub fn matches(&self, timeslot: &TimeslotContext, now: DateTime<Utc>) -> bool {
        let lead = timeslot.lead_time_hours(now);

        if let Some(max) = self.max_hours {
            if lead >= max {
                return false;
            }
        }
        if let Some(min) = self.min_hours {
            if lead < min {
                return false;
            }
        }

        true
    }
}

/// Conditions for [`RuleType::DateSpecific`] rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateSpecificConditions {
    /// Calendar dates the rule applies on
    ///
    /// Unlike the other condition fields, an absent or empty date set means
    /// the rule never matches. A date-specific rule without dates has
    /// nothing to anchor to.
    pub dates: Option<BTreeSet<NaiveDate>>,
}

impl DateSpecificConditions {
    fn from_value(conditions: &Value, rule_id: &RuleId) -> Self {
        Self {
            dates: read_date_set(conditions, "dates", rule_id),
        }
    }

    fn to_value(&self) -> Value {
        let mut conditions = Map::new();
        if let Some(dates) = &self.dates {
            let entries = dates.iter().map(|d| Value::String(d.to_string())).collect();
            conditions.insert("dates".to_string(), Value::Array(entries));
        }
        Value::Object(conditions)
    }

    /// True when the slot's date is one of the listed dates
    pub fn matches(&self, timeslot: &TimeslotContext) -> bool {
        match &self.dates {
            Some(dates) if !dates.is_empty() => dates.contains(&timeslot.start_date()),
            _ => false,
        }
    }
}

// ---- lenient field readers ----
//
// These accept the field shapes real stored rows contain. Missing and null
// fields are normal and read silently; anything else that cannot be
// interpreted degrades to "no constraint" with a warning.

fn read_bounded_int(conditions: &Value, field: &'static str, max: u64, rule_id: &RuleId) -> Option<u8> {
    let value = match conditions.get(field) {
        Some(v) if !v.is_null() => v,
        _ => return None,
    };

    match value.as_u64() {
        Some(n) if n <= max => Some(n as u8),
        _ => {
            warn!(
                rule_id = %rule_id,
                field,
                "ignoring non-integer or out-of-range hour in rule conditions"
            );
            None
        }
    }
}

fn read_decimal(conditions: &Value, field: &'static str, rule_id: &RuleId) -> Option<Decimal> {
    let value = match conditions.get(field) {
        Some(v) if !v.is_null() => v,
        _ => return None,
    };

    match decimal_from_number(value) {
        Some(d) => Some(d),
        None => {
            warn!(
                rule_id = %rule_id,
                field,
                "ignoring non-numeric value in rule conditions"
            );
            None
        }
    }
}

fn read_day_set(conditions: &Value, field: &'static str, rule_id: &RuleId) -> Option<BTreeSet<u8>> {
    let value = match conditions.get(field) {
        Some(v) if !v.is_null() => v,
        _ => return None,
    };

    let entries = match value.as_array() {
        Some(a) => a,
        None => {
            warn!(
                rule_id = %rule_id,
                field,
                "ignoring non-array day-of-week list in rule conditions"
            );
            return None;
        }
    };

    let mut days = BTreeSet::new();
    for entry in entries {
        match entry.as_u64() {
            Some(d) if d <= 6 => {
                days.insert(d as u8);
            }
            _ => {
                warn!(
                    rule_id = %rule_id,
                    field,
                    "dropping invalid day-of-week entry in rule conditions"
                );
            }
        }
    }
    Some(days)
}

fn read_date_set(
    conditions: &Value,
    field: &'static str,
    rule_id: &RuleId,
) -> Option<BTreeSet<NaiveDate>> {
    let value = match conditions.get(field) {
        Some(v) if !v.is_null() => v,
        _ => return None,
    };

    let entries = match value.as_array() {
        Some(a) => a,
        None => {
            warn!(
                rule_id = %rule_id,
                field,
                "ignoring non-array date list in rule conditions"
            );
            return None;
        }
    };

    let mut dates = BTreeSet::new();
    for entry in entries {
        let parsed = entry
            .as_str()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());
        match parsed {
            Some(date) => {
                dates.insert(date);
            }
            None => {
                warn!(
                    rule_id = %rule_id,
                    field,
                    "dropping unparseable date entry in rule conditions"
                );
            }
        }
    }
    Some(dates)
}

fn decimal_from_number(value: &Value) -> Option<Decimal> {
    if let Some(i) = value.as_i64() {
        Some(Decimal::from(i))
    } else if let Some(u) = value.as_u64() {
        Some(Decimal::from(u))
    } else if let Some(f) = value.as_f64() {
        Decimal::from_f64(f)
    } else {
        None
    }
}

fn decimal_to_number(value: Decimal) -> Option<Value> {
    value
        .to_f64()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
}
