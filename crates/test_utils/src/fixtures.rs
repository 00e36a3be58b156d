//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the pricing
//! system. These fixtures are designed to be consistent and predictable for
//! unit tests: the canonical slot is a Saturday morning so that weekend
//! time-range rules match it out of the box.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use core_kernel::{Currency, Money, RuleId, ServiceId, TimeslotId};
use domain_pricing::TimeslotContext;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// The standard list price, 100 000 rupiah in minor units
    pub fn base_price() -> Money {
        Money::from_minor(100_000, Currency::IDR)
    }

    /// A list price that does not sit on a thousand boundary
    pub fn off_unit_price() -> Money {
        Money::from_minor(100_100, Currency::IDR)
    }

    /// A USD list price for cross-currency tests ($50.00)
    pub fn usd_base_price() -> Money {
        Money::from_minor(5_000, Currency::USD)
    }

    /// A zero amount
    pub fn idr_zero() -> Money {
        Money::zero(Currency::IDR)
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Start of the canonical slot, a Saturday at 10:00 UTC
    pub fn saturday_slot_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 13, 10, 0, 0).unwrap()
    }

    /// End of the canonical slot, one hour after the start
    pub fn saturday_slot_end() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 13, 11, 0, 0).unwrap()
    }

    /// Calendar date of the canonical slot
    pub fn saturday_slot_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 13).unwrap()
    }

    /// Evaluation instant three days before the canonical slot (72h lead)
    pub fn three_days_before() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 10, 10, 0, 0).unwrap()
    }

    /// Evaluation instant on the morning of the slot (2h lead)
    pub fn two_hours_before() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 13, 8, 0, 0).unwrap()
    }

    /// Start of a Monday afternoon slot for day-of-week mismatch tests
    pub fn monday_slot_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 15, 14, 0, 0).unwrap()
    }

    /// End of the Monday afternoon slot
    pub fn monday_slot_end() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 15, 15, 0, 0).unwrap()
    }
}

/// Fixture for timeslot test data
pub struct SlotFixtures;

impl SlotFixtures {
    /// The canonical slot: Saturday 10:00-11:00 UTC, capacity 10, empty
    pub fn saturday_morning() -> TimeslotContext {
        TimeslotContext::new(
            TemporalFixtures::saturday_slot_start(),
            TemporalFixtures::saturday_slot_end(),
            10,
            0,
        )
    }

    /// The canonical slot at 70% occupancy
    pub fn saturday_morning_busy() -> TimeslotContext {
        TimeslotContext::new(
            TemporalFixtures::saturday_slot_start(),
            TemporalFixtures::saturday_slot_end(),
            10,
            7,
        )
    }

    /// A Monday afternoon slot, capacity 10, empty
    pub fn monday_afternoon() -> TimeslotContext {
        TimeslotContext::new(
            TemporalFixtures::monday_slot_start(),
            TemporalFixtures::monday_slot_end(),
            10,
            0,
        )
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// Creates a deterministic rule ID for testing
    pub fn rule_id() -> RuleId {
        RuleId::new("rule-0001")
    }

    /// Creates a second distinct rule ID for ordering tests
    pub fn other_rule_id() -> RuleId {
        RuleId::new("rule-0002")
    }

    /// Creates a deterministic service ID for testing
    pub fn service_id() -> ServiceId {
        ServiceId::new("svc-0001")
    }

    /// Creates a deterministic timeslot ID for testing
    pub fn timeslot_id() -> TimeslotId {
        TimeslotId::new("slot-0001")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_slot_is_a_saturday_morning() {
        let slot = SlotFixtures::saturday_morning();
        assert_eq!(slot.weekday_index(), 6);
        assert_eq!(slot.start_hour(), 10);
        assert_eq!(slot.start_date(), TemporalFixtures::saturday_slot_date());
    }

    #[test]
    fn test_busy_slot_occupancy() {
        use rust_decimal_macros::dec;

        let slot = SlotFixtures::saturday_morning_busy();
        assert_eq!(slot.occupancy(), Some(dec!(0.7)));
    }

    #[test]
    fn test_temporal_fixtures_ordering() {
        assert!(TemporalFixtures::three_days_before() < TemporalFixtures::two_hours_before());
        assert!(TemporalFixtures::two_hours_before() < TemporalFixtures::saturday_slot_start());
        assert!(TemporalFixtures::saturday_slot_start() < TemporalFixtures::saturday_slot_end());
    }

    #[test]
    fn test_id_fixtures_are_deterministic() {
        assert_eq!(IdFixtures::rule_id(), IdFixtures::rule_id());
        assert_ne!(IdFixtures::rule_id(), IdFixtures::other_rule_id());
    }
}
