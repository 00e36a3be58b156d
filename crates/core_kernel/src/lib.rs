//! Core Kernel - Foundational types and utilities for the pricing system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic in minor currency units
//! - Percentage rates for surcharge and discount calculations
//! - Strongly-typed identifiers for rules, services, and timeslots

pub mod identifiers;
pub mod money;

pub use identifiers::{RuleId, ServiceId, TimeslotId};
pub use money::{Currency, Money, MoneyError, Rate};
