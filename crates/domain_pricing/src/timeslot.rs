//! Timeslot context for rule evaluation
//!
//! This module provides the read-only view of a bookable timeslot that
//! pricing rules are evaluated against. All temporal fields are UTC; the
//! derived day-of-week, hour, and date use the UTC calendar.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// The slice of a bookable timeslot that pricing rules evaluate against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeslotContext {
    /// When the slot starts (UTC)
    pub start_time: DateTime<Utc>,
    /// When the slot ends (UTC)
    pub end_time: DateTime<Utc>,
    /// Maximum number of bookings the slot can hold
    pub capacity: u32,
    /// Bookings already taken
    pub booked_count: u32,
}

impl TimeslotContext {
    /// Creates a new timeslot context
    pub fn new(
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        capacity: u32,
        booked_count: u32,
    ) -> Self {
        Self {
            start_time,
            end_time,
            capacity,
            booked_count,
        }
    }

    /// Fraction of capacity already booked, if the slot has any capacity
    ///
    /// A slot with zero capacity has no meaningful occupancy; demand rules
    /// never match it. The fraction can exceed 1 when a slot is overbooked.
    pub fn occupancy(&self) -> Option<Decimal> {
        if self.capacity == 0 {
            return None;
        }
        Some(Decimal::from(self.booked_count) / Decimal::from(self.capacity))
    }

    /// Day of week of the slot start, 0 = Sunday through 6 = Saturday
    pub fn weekday_index(&self) -> u8 {
        self.start_time.weekday().num_days_from_sunday() as u8
    }

    /// Hour of day of the slot start, 0 through 23
    pub fn start_hour(&self) -> u8 {
        self.start_time.hour() as u8
    }

    /// Calendar date of the slot start
    pub fn start_date(&self) -> NaiveDate {
        self.start_time.date_naive()
    }

    /// Hours between `now` and the slot start, at millisecond precision
    ///
    /// Negative once the slot has already begun.
    pub fn lead_time_hours(&self, now: DateTime<Utc>) -> Decimal {
        let millis = (self.start_time - now).num_milliseconds();
        Decimal::from(millis) / dec!(3_600_000)
    }

    /// True while the slot still has room for another booking
    pub fn has_availability(&self) -> bool {
        self.booked_count < self.capacity
    }
}
