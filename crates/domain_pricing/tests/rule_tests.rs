//! Pricing Rule Decode and Encode Tests
//!
//! This module contains comprehensive tests for rule (de)serialization:
//! - Decoding stored rule rows into typed rules
//! - Wire defaults for optional row fields
//! - Rejection of unknown rule and adjustment kinds
//! - Lenient handling of malformed condition documents
//! - Batch decoding of rule lists
//!
//! # Test Organization
//!
//! - `decoding_tests` - well-formed row decoding and wire defaults
//! - `rejection_tests` - rows the decoder must refuse
//! - `lenient_conditions_tests` - malformed conditions degrade per field
//! - `serialization_tests` - rules re-encode into the stored row shape
//! - `batch_tests` - decoding whole rule lists

use chrono::{TimeZone, Utc};
use core_kernel::RuleId;
use domain_pricing::{
    rules_from_json, Adjustment, AdjustmentType, PricingError, PricingRule, RuleConditions,
    RuleType, TimeslotContext,
};
use rust_decimal_macros::dec;

fn saturday_morning() -> TimeslotContext {
    // 2026-06-13 is a Saturday
    TimeslotContext::new(
        Utc.with_ymd_and_hms(2026, 6, 13, 10, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2026, 6, 13, 11, 0, 0).unwrap(),
        10,
        0,
    )
}

fn three_days_before() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 10, 10, 0, 0).unwrap()
}

// ============================================================================
// DECODING TESTS
// ============================================================================

mod decoding_tests {
    use super::*;

    /// Verifies a fully populated stored row decodes field for field
    #[test]
    fn test_full_time_range_row_decodes() {
        let json = r#"{
            "id": "clx1a2b3c4d5e6f7g8h9i0j1k",
            "rule_type": "TIME_RANGE",
            "adjustment_type": "PERCENTAGE",
            "value": 20,
            "priority": 10,
            "stackable": false,
            "is_active": true,
            "conditions": {
                "days_of_week": [5, 6],
                "start_hour": 18,
                "end_hour": 22
            }
        }"#;

        let rule = PricingRule::from_json(json).unwrap();

        assert_eq!(rule.id, RuleId::new("clx1a2b3c4d5e6f7g8h9i0j1k"));
        assert_eq!(rule.rule_type(), RuleType::TimeRange);
        assert_eq!(rule.adjustment, Adjustment::percentage(dec!(20)));
        assert_eq!(rule.priority, 10);
        assert!(!rule.stackable);
        assert!(rule.is_active);

        match &rule.conditions {
            RuleConditions::TimeRange(c) => {
                assert_eq!(c.days_of_week, Some([5, 6].into()));
                assert_eq!(c.start_hour, Some(18));
                assert_eq!(c.end_hour, Some(22));
            }
            other => panic!("expected time-range conditions, got {other:?}"),
        }
    }

    /// Verifies missing optional row fields take their wire defaults
    #[test]
    fn test_wire_defaults() {
        let json = r#"{
            "id": "r1",
            "rule_type": "TIME_RANGE",
            "adjustment_type": "FIXED",
            "value": 5000
        }"#;

        let rule = PricingRule::from_json(json).unwrap();

        assert_eq!(rule.priority, 0, "missing priority defaults to 0");
        assert!(rule.stackable, "missing stackable defaults to true");
        assert!(rule.is_active, "missing is_active defaults to true");
        assert!(
            rule.matches(&saturday_morning(), three_days_before()),
            "missing conditions leave the rule unconstrained"
        );
    }

    /// Verifies the adjustment value decodes from string, integer, and float
    #[test]
    fn test_value_decodes_from_all_number_shapes() {
        for (raw, expected) in [
            (r#""20""#, dec!(20)),
            ("20", dec!(20)),
            ("12.5", dec!(12.5)),
            ("-500", dec!(-500)),
        ] {
            let json = format!(
                r#"{{"id": "r1", "rule_type": "DEMAND", "adjustment_type": "PERCENTAGE", "value": {raw}}}"#
            );
            let rule = PricingRule::from_json(&json).unwrap();
            assert_eq!(rule.adjustment.value, expected, "value {raw} should decode");
        }
    }

    /// Verifies null conditions decode like absent conditions
    #[test]
    fn test_null_conditions_decode_unconstrained() {
        let json = r#"{
            "id": "r1",
            "rule_type": "TIME_RANGE",
            "adjustment_type": "PERCENTAGE",
            "value": 10,
            "conditions": null
        }"#;

        let rule = PricingRule::from_json(json).unwrap();
        assert!(rule.matches(&saturday_morning(), three_days_before()));
    }

    /// Verifies each rule type decodes under its own conditions shape
    #[test]
    fn test_all_rule_types_decode() {
        let rows = [
            (r#"{"id": "r1", "rule_type": "TIME_RANGE", "adjustment_type": "PERCENTAGE", "value": 10}"#, RuleType::TimeRange),
            (r#"{"id": "r2", "rule_type": "DEMAND", "adjustment_type": "PERCENTAGE", "value": 10}"#, RuleType::Demand),
            (r#"{"id": "r3", "rule_type": "LEAD_TIME", "adjustment_type": "FIXED", "value": 10}"#, RuleType::LeadTime),
            (r#"{"id": "r4", "rule_type": "DATE_SPECIFIC", "adjustment_type": "FIXED", "value": 10}"#, RuleType::DateSpecific),
        ];

        for (json, expected) in rows {
            let rule = PricingRule::from_json(json).unwrap();
            assert_eq!(rule.rule_type(), expected);
        }
    }
}

// ============================================================================
// REJECTION TESTS
// ============================================================================

mod rejection_tests {
    use super::*;

    /// Verifies an unknown rule type is rejected at decode time
    #[test]
    fn test_unknown_rule_type_rejected() {
        let json = r#"{
            "id": "r1",
            "rule_type": "SEASONAL",
            "adjustment_type": "PERCENTAGE",
            "value": 10
        }"#;

        let err = PricingRule::from_json(json).unwrap_err();
        assert!(matches!(err, PricingError::Rule(_)));
    }

    /// Verifies an unknown adjustment type is rejected at decode time
    #[test]
    fn test_unknown_adjustment_type_rejected() {
        let json = r#"{
            "id": "r1",
            "rule_type": "TIME_RANGE",
            "adjustment_type": "MULTIPLIER",
            "value": 2
        }"#;

        assert!(PricingRule::from_json(json).is_err());
    }

    /// Verifies rows missing required fields are rejected
    #[test]
    fn test_missing_required_fields_rejected() {
        let missing_id = r#"{"rule_type": "DEMAND", "adjustment_type": "PERCENTAGE", "value": 10}"#;
        let missing_value = r#"{"id": "r1", "rule_type": "DEMAND", "adjustment_type": "PERCENTAGE"}"#;
        let missing_type = r#"{"id": "r1", "adjustment_type": "PERCENTAGE", "value": 10}"#;

        assert!(PricingRule::from_json(missing_id).is_err());
        assert!(PricingRule::from_json(missing_value).is_err());
        assert!(PricingRule::from_json(missing_type).is_err());
    }

    /// Verifies a non-numeric adjustment value is rejected
    #[test]
    fn test_unparseable_value_rejected() {
        let json = r#"{
            "id": "r1",
            "rule_type": "DEMAND",
            "adjustment_type": "PERCENTAGE",
            "value": "twenty"
        }"#;

        assert!(PricingRule::from_json(json).is_err());
    }
}

// ============================================================================
// LENIENT CONDITIONS TESTS
// ============================================================================

mod lenient_conditions_tests {
    use super::*;

    /// Verifies a wrong-typed day list degrades to "no day constraint"
    #[test]
    fn test_non_array_day_list_degrades() {
        let json = r#"{
            "id": "r1",
            "rule_type": "TIME_RANGE",
            "adjustment_type": "PERCENTAGE",
            "value": 10,
            "conditions": {"days_of_week": "weekend"}
        }"#;

        let rule = PricingRule::from_json(json).unwrap();
        assert!(
            rule.matches(&saturday_morning(), three_days_before()),
            "unreadable day list leaves the rule matching every day"
        );
    }

    /// Verifies invalid day entries are dropped while valid ones survive
    #[test]
    fn test_invalid_day_entries_dropped_individually() {
        let json = r#"{
            "id": "r1",
            "rule_type": "TIME_RANGE",
            "adjustment_type": "PERCENTAGE",
            "value": 10,
            "conditions": {"days_of_week": [6, 9, "sat", -1]}
        }"#;

        let rule = PricingRule::from_json(json).unwrap();
        match &rule.conditions {
            RuleConditions::TimeRange(c) => {
                assert_eq!(c.days_of_week, Some([6].into()), "only day 6 is valid");
            }
            other => panic!("expected time-range conditions, got {other:?}"),
        }
    }

    /// Verifies an all-invalid day list leaves an empty set that matches nothing
    #[test]
    fn test_all_invalid_day_entries_match_nothing() {
        let json = r#"{
            "id": "r1",
            "rule_type": "TIME_RANGE",
            "adjustment_type": "PERCENTAGE",
            "value": 10,
            "conditions": {"days_of_week": ["sat", "sun"]}
        }"#;

        let rule = PricingRule::from_json(json).unwrap();
        assert!(!rule.matches(&saturday_morning(), three_days_before()));
    }

    /// Verifies an out-of-range hour degrades to "no hour constraint"
    #[test]
    fn test_out_of_range_hour_degrades() {
        let json = r#"{
            "id": "r1",
            "rule_type": "TIME_RANGE",
            "adjustment_type": "PERCENTAGE",
            "value": 10,
            "conditions": {"start_hour": 25}
        }"#;

        let rule = PricingRule::from_json(json).unwrap();
        assert!(rule.matches(&saturday_morning(), three_days_before()));
    }

    /// Verifies a non-numeric occupancy bound degrades, leaving the other bound
    #[test]
    fn test_demand_bound_degrades_independently() {
        let json = r#"{
            "id": "r1",
            "rule_type": "DEMAND",
            "adjustment_type": "PERCENTAGE",
            "value": 10,
            "conditions": {"min_occupancy": "high", "max_occupancy": 0.5}
        }"#;

        let rule = PricingRule::from_json(json).unwrap();
        let empty_slot = saturday_morning();
        assert!(
            rule.matches(&empty_slot, three_days_before()),
            "only the max bound survives, and 0.0 is below it"
        );
    }

    /// Verifies unparseable date entries are dropped and an empty set never matches
    #[test]
    fn test_unparseable_dates_dropped() {
        let json = r#"{
            "id": "r1",
            "rule_type": "DATE_SPECIFIC",
            "adjustment_type": "FIXED",
            "value": 10000,
            "conditions": {"dates": ["13/06/2026", "someday"]}
        }"#;

        let rule = PricingRule::from_json(json).unwrap();
        assert!(!rule.matches(&saturday_morning(), three_days_before()));
    }

    /// Verifies a date-specific rule without dates never matches
    #[test]
    fn test_date_specific_without_dates_never_matches() {
        let json = r#"{
            "id": "r1",
            "rule_type": "DATE_SPECIFIC",
            "adjustment_type": "FIXED",
            "value": 10000
        }"#;

        let rule = PricingRule::from_json(json).unwrap();
        assert!(!rule.matches(&saturday_morning(), three_days_before()));
    }

    /// Verifies non-object conditions degrade to an unconstrained rule
    #[test]
    fn test_non_object_conditions_degrade() {
        let json = r#"{
            "id": "r1",
            "rule_type": "TIME_RANGE",
            "adjustment_type": "PERCENTAGE",
            "value": 10,
            "conditions": "weekends only"
        }"#;

        let rule = PricingRule::from_json(json).unwrap();
        assert!(rule.matches(&saturday_morning(), three_days_before()));
    }
}

// ============================================================================
// SERIALIZATION TESTS
// ============================================================================

mod serialization_tests {
    use super::*;
    use serde_json::json;

    /// Verifies a rule re-encodes into the flat stored row shape
    #[test]
    fn test_rule_encodes_as_stored_row() {
        let json = r#"{
            "id": "r1",
            "rule_type": "TIME_RANGE",
            "adjustment_type": "PERCENTAGE",
            "value": 20,
            "priority": 5,
            "stackable": true,
            "is_active": true,
            "conditions": {"days_of_week": [0, 6]}
        }"#;

        let rule = PricingRule::from_json(json).unwrap();
        let row = serde_json::to_value(&rule).unwrap();

        assert_eq!(row["id"], json!("r1"));
        assert_eq!(row["rule_type"], json!("TIME_RANGE"));
        assert_eq!(row["adjustment_type"], json!("PERCENTAGE"));
        assert_eq!(row["value"], json!("20"), "decimal values encode as strings");
        assert_eq!(row["priority"], json!(5));
        assert_eq!(row["conditions"], json!({"days_of_week": [0, 6]}));
    }

    /// Verifies decode followed by encode preserves matching behavior
    #[test]
    fn test_reencoded_rule_behaves_identically() {
        let json = r#"{
            "id": "r1",
            "rule_type": "LEAD_TIME",
            "adjustment_type": "FIXED",
            "value": -15000,
            "conditions": {"min_hours": 48}
        }"#;

        let original = PricingRule::from_json(json).unwrap();
        let reencoded = serde_json::to_string(&original).unwrap();
        let decoded = PricingRule::from_json(&reencoded).unwrap();

        assert_eq!(decoded, original);

        let slot = saturday_morning();
        let now = three_days_before();
        assert_eq!(decoded.matches(&slot, now), original.matches(&slot, now));
    }

    /// Verifies the adjustment kind encodes with its screaming-snake tag
    #[test]
    fn test_adjustment_type_tags() {
        assert_eq!(
            serde_json::to_value(AdjustmentType::Percentage).unwrap(),
            json!("PERCENTAGE")
        );
        assert_eq!(
            serde_json::to_value(AdjustmentType::Fixed).unwrap(),
            json!("FIXED")
        );
    }
}

// ============================================================================
// BATCH TESTS
// ============================================================================

mod batch_tests {
    use super::*;

    /// Verifies a list of rows decodes in order
    #[test]
    fn test_rule_list_decodes_in_order() {
        let json = r#"[
            {"id": "r1", "rule_type": "TIME_RANGE", "adjustment_type": "PERCENTAGE", "value": 20},
            {"id": "r2", "rule_type": "DEMAND", "adjustment_type": "FIXED", "value": 5000}
        ]"#;

        let rules = rules_from_json(json).unwrap();

        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].id, RuleId::new("r1"));
        assert_eq!(rules[1].id, RuleId::new("r2"));
    }

    /// Verifies one malformed row fails the whole batch
    #[test]
    fn test_one_bad_row_fails_the_batch() {
        let json = r#"[
            {"id": "r1", "rule_type": "TIME_RANGE", "adjustment_type": "PERCENTAGE", "value": 20},
            {"id": "r2", "rule_type": "BOGUS", "adjustment_type": "FIXED", "value": 5000}
        ]"#;

        assert!(rules_from_json(json).is_err());
    }

    /// Verifies an empty list decodes to no rules
    #[test]
    fn test_empty_list_decodes() {
        let rules = rules_from_json("[]").unwrap();
        assert!(rules.is_empty());
    }
}
