//! Dynamic Pricing Domain
//!
//! This crate implements the dynamic pricing engine for a bookable-timeslot
//! booking platform. Services attach pricing rules to their list price;
//! the engine decides which rules apply to a given timeslot and computes
//! the final price with a full audit trail.
//!
//! # Architecture
//!
//! The domain layer is infrastructure-agnostic, containing only business logic:
//! - **Rule model**: [`PricingRule`] with typed, per-rule-type conditions
//! - **Matching**: day/hour windows, occupancy bands, lead-time windows,
//!   and specific calendar dates
//! - **Pipeline**: [`PricingEngine`] applies matching rules in priority
//!   order and snaps the result to a rounding unit
//! - **Quoting**: [`quote_timeslots`] prices a whole availability listing
//!
//! # Evaluation Flow
//!
//! ```text
//! rules -> filter is_active -> sort by priority (stable, ascending)
//!       -> apply matching rules to the running price
//!       -> stop after the first non-stackable rule that applies
//!       -> snap to the rounding unit
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use chrono::Utc;
//! use domain_pricing::{rules_from_json, PricingEngine, TimeslotContext};
//!
//! let rules = rules_from_json(rows_json)?;
//! let engine = PricingEngine::new();
//! let result = engine.compute_price(base_price, &rules, &slot, Utc::now());
//!
//! for applied in &result.applied_rules {
//!     println!("{}: {}", applied.rule_id, applied.adjustment);
//! }
//! ```

pub mod conditions;
pub mod engine;
pub mod error;
pub mod quote;
pub mod rule;
pub mod timeslot;

pub use conditions::{
    DateSpecificConditions, DemandConditions, LeadTimeConditions, RuleConditions, RuleType,
    TimeRangeConditions,
};
pub use engine::{AppliedRule, PriceRounding, PricingEngine, PricingResult, DEFAULT_ROUNDING_UNIT};
pub use error::PricingError;
pub use quote::{quote_timeslots, ServicePricing, Timeslot, TimeslotQuote};
pub use rule::{rules_from_json, Adjustment, AdjustmentType, PricingRule};
pub use timeslot::TimeslotContext;
