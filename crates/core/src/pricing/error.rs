//! Pricing error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors from the discount/tax pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PricingError {
    /// A negative amount where a non-negative value is required.
    #[error("Amount cannot be negative, got {0}")]
    InvalidAmount(Decimal),

    /// A percentage outside [0, 100].
    #[error("Percent must be between 0 and 100, got {0}")]
    InvalidPercent(Decimal),

    /// A positive discount2 with no claim account to settle it against.
    #[error("Discount2 requires a claim account when the percent is positive")]
    ClaimAccountRequired,
}
