//! Pricing domain errors
//!
//! This module defines all error types that can occur within the
//! dynamic pricing domain.

use thiserror::Error;

/// Errors that can occur in the pricing domain
#[derive(Debug, Error)]
pub enum PricingError {
    /// A rule row could not be decoded
    ///
    /// Raised for structurally broken JSON and for rows whose `rule_type`
    /// or `adjustment_type` is not one of the supported values. Rules the
    /// engine cannot interpret are rejected at the boundary rather than
    /// silently skipped during evaluation.
    #[error("Failed to parse pricing rule: {0}")]
    Rule(#[from] serde_json::Error),

    /// Rounding unit must be a positive number of minor units
    #[error("Rounding unit must be greater than zero")]
    InvalidRoundingUnit,
}
