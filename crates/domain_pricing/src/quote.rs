//! Batch quoting for service timeslots
//!
//! This module prices a service's timeslots the way an availability listing
//! needs them: one row per slot, carrying the slot's booking state, the list
//! price, the final price, and the audit trail of applied rules.
//!
//! Services that have not enabled dynamic pricing skip the engine entirely;
//! their slots quote the list price as-is, unrounded, with an empty audit
//! trail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use core_kernel::{Money, ServiceId, TimeslotId};

use crate::engine::{AppliedRule, PricingEngine};
use crate::rule::PricingRule;
use crate::timeslot::TimeslotContext;

/// Pricing configuration of a bookable service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicePricing {
    /// The service being quoted
    pub service_id: ServiceId,
    /// List price in minor currency units
    pub base_price: Money,
    /// When false, rules are ignored and every slot quotes the list price
    pub dynamic_pricing_enabled: bool,
    /// Rules attached to the service
    #[serde(default)]
    pub rules: Vec<PricingRule>,
}

impl ServicePricing {
    /// Creates a service with dynamic pricing disabled and no rules
    pub fn new(service_id: ServiceId, base_price: Money) -> Self {
        Self {
            service_id,
            base_price,
            dynamic_pricing_enabled: false,
            rules: Vec::new(),
        }
    }

    /// Enables dynamic pricing with the given rules
    pub fn with_dynamic_pricing(mut self, rules: Vec<PricingRule>) -> Self {
        self.dynamic_pricing_enabled = true;
        self.rules = rules;
        self
    }
}

/// A bookable timeslot belonging to a service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeslot {
    /// Identifier carried over from the stored row
    pub id: TimeslotId,
    /// Booking state and schedule of the slot
    #[serde(flatten)]
    pub context: TimeslotContext,
}

impl Timeslot {
    /// Creates a new timeslot
    pub fn new(id: TimeslotId, context: TimeslotContext) -> Self {
        Self { id, context }
    }
}

/// A priced timeslot row, ready for an availability response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeslotQuote {
    /// The quoted slot
    pub timeslot_id: TimeslotId,
    /// When the slot starts (UTC)
    pub start_time: DateTime<Utc>,
    /// When the slot ends (UTC)
    pub end_time: DateTime<Utc>,
    /// Maximum number of bookings the slot can hold
    pub capacity: u32,
    /// Bookings already taken
    pub booked_count: u32,
    /// True while the slot still has room for another booking
    pub available: bool,
    /// List price before any rules
    pub base_price: Money,
    /// Price to charge; equals `base_price` when dynamic pricing is off
    pub final_price: Money,
    /// Rules that contributed to `final_price`, in application order
    pub applied_rules: Vec<AppliedRule>,
}

/// Quotes every timeslot of a service at one evaluation instant
///
/// All slots in the batch share the same `now`, so lead-time rules see a
/// consistent clock across the whole listing. Quotes come back in the same
/// order as the input slots.
#[instrument(
    skip(engine, service, slots),
    fields(service_id = %service.service_id, slot_count = slots.len())
)]
pub fn quote_timeslots(
    engine: &PricingEngine,
    service: &ServicePricing,
    slots: &[Timeslot],
    now: DateTime<Utc>,
) -> Vec<TimeslotQuote> {
    debug!(
        dynamic_pricing = service.dynamic_pricing_enabled,
        "Quoting timeslots"
    );

    slots
        .iter()
        .map(|slot| {
            let (final_price, applied_rules) = if service.dynamic_pricing_enabled {
                let result =
                    engine.compute_price(service.base_price, &service.rules, &slot.context, now);
                (result.final_price, result.applied_rules)
            } else {
                // List price passes through untouched, not even rounded.
                (service.base_price, Vec::new())
            };

            TimeslotQuote {
                timeslot_id: slot.id.clone(),
                start_time: slot.context.start_time,
                end_time: slot.context.end_time,
                capacity: slot.context.capacity,
                booked_count: slot.context.booked_count,
                available: slot.context.has_availability(),
                base_price: service.base_price,
                final_price,
                applied_rules,
            }
        })
        .collect()
}
