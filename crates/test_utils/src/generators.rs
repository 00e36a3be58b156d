//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::{DateTime, Duration, TimeZone, Utc};
use core_kernel::{Currency, Money, RuleId};
use domain_pricing::{
    Adjustment, PricingRule, RuleConditions, TimeRangeConditions, TimeslotContext,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating valid Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::IDR),
        Just(Currency::USD),
        Just(Currency::SGD),
        Just(Currency::MYR),
        Just(Currency::THB),
        Just(Currency::PHP),
        Just(Currency::VND),
    ]
}

/// Strategy for generating positive amounts in minor units
pub fn positive_amount_minor_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000_000_000i64
}

/// Strategy for generating positive Money values
pub fn positive_money_strategy() -> impl Strategy<Value = Money> {
    (positive_amount_minor_strategy(), currency_strategy())
        .prop_map(|(amount, currency)| Money::from_minor(amount, currency))
}

/// Strategy for generating positive IDR prices
pub fn idr_price_strategy() -> impl Strategy<Value = Money> {
    (1i64..100_000_000i64).prop_map(|amount| Money::from_minor(amount, Currency::IDR))
}

/// Strategy for generating percentage adjustment values (-90% to +300%)
pub fn percentage_value_strategy() -> impl Strategy<Value = Decimal> {
    (-9000i64..30000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for generating fixed adjustment values in minor units
pub fn fixed_value_strategy() -> impl Strategy<Value = Decimal> {
    (-100_000i64..100_000i64).prop_map(Decimal::from)
}

/// Strategy for generating adjustments of either kind
pub fn adjustment_strategy() -> impl Strategy<Value = Adjustment> {
    prop_oneof![
        percentage_value_strategy().prop_map(Adjustment::percentage),
        fixed_value_strategy().prop_map(Adjustment::fixed),
    ]
}

/// Strategy for generating rule priorities
pub fn priority_strategy() -> impl Strategy<Value = i32> {
    -100i32..100i32
}

/// Strategy for generating rule IDs
pub fn rule_id_strategy() -> impl Strategy<Value = RuleId> {
    "[a-z0-9]{8}".prop_map(RuleId::new)
}

/// Strategy for generating active, stackable rules that match every slot
///
/// Useful for properties about rule application itself, where condition
/// filtering would only get in the way.
pub fn stackable_rule_strategy() -> impl Strategy<Value = PricingRule> {
    (rule_id_strategy(), adjustment_strategy(), priority_strategy()).prop_map(
        |(id, adjustment, priority)| PricingRule {
            id,
            adjustment,
            priority,
            stackable: true,
            is_active: true,
            conditions: RuleConditions::TimeRange(TimeRangeConditions::default()),
        },
    )
}

/// Strategy for generating rounding units
pub fn rounding_unit_strategy() -> impl Strategy<Value = u32> {
    1u32..10_000u32
}

/// Strategy for generating timeslots during 2026
///
/// Capacity and bookings vary independently, so a slot can be empty, full,
/// overbooked, or have zero capacity.
pub fn timeslot_strategy() -> impl Strategy<Value = TimeslotContext> {
    (0i64..365i64, 0u32..24u32, 1i64..4i64, 0u32..50u32, 0u32..60u32).prop_map(
        |(days, hour, duration_hours, capacity, booked_count)| {
            let start = Utc.with_ymd_and_hms(2026, 1, 1, hour, 0, 0).unwrap()
                + Duration::days(days);
            TimeslotContext {
                start_time: start,
                end_time: start + Duration::hours(duration_hours),
                capacity,
                booked_count,
            }
        },
    )
}

/// Strategy for generating evaluation instants around the 2026 slot range
pub fn evaluation_instant_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (-30i64..400i64, 0u32..24u32).prop_map(|(days, hour)| {
        Utc.with_ymd_and_hms(2026, 1, 1, hour, 0, 0).unwrap() + Duration::days(days)
    })
}
