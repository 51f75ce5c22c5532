//! Ledger error types for validation, lookup, and write errors.

use bahi_shared::types::{AccountId, LedgerEntryId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use super::entry::ReferenceType;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    // ========== Write-time Validation ==========
    /// Entry amount must be strictly positive.
    #[error("Entry amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    /// Exchange rate must be strictly positive.
    #[error("Exchange rate must be positive, got {0}")]
    InvalidExchangeRate(Decimal),

    /// Transaction date lies in the future.
    #[error("Transaction date {date} is in the future (now: {now})")]
    FutureTransactionDate {
        /// The offending transaction date.
        date: DateTime<Utc>,
        /// The clock value the write was validated against.
        now: DateTime<Utc>,
    },

    /// The reference type demands a reference id and none was given.
    #[error("Reference type {0} requires a reference id")]
    MissingReferenceId(ReferenceType),

    /// Entry description is empty.
    #[error("Entry description cannot be empty")]
    EmptyDescription,

    /// Entry description exceeds the stored bound.
    #[error("Entry description is {len} characters, maximum is {max}")]
    DescriptionTooLong {
        /// Actual length.
        len: usize,
        /// Allowed maximum.
        max: usize,
    },

    // ========== Pair Invariants ==========
    /// The two halves of a pair do not balance.
    #[error("Double entry does not balance. Debit: {debit}, Credit: {credit}")]
    UnbalancedPair {
        /// Debit-side amount.
        debit: Decimal,
        /// Credit-side amount.
        credit: Decimal,
    },

    /// The two halves of a pair disagree on a shared field.
    #[error("Double entry halves disagree on {0}")]
    MismatchedPair(&'static str),

    // ========== Lookup Errors ==========
    /// Ledger entry not found.
    #[error("Ledger entry not found: {0}")]
    EntryNotFound(LedgerEntryId),

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Account is inactive and cannot accept postings.
    #[error("Account '{name}' ({id}) is inactive")]
    AccountInactive {
        /// The account ID.
        id: AccountId,
        /// The account name.
        name: String,
    },

    // ========== Write Errors ==========
    /// Transactional write conflict after retries were exhausted.
    #[error("Concurrent write conflict, retries exhausted")]
    ConcurrencyConflict,

    /// Storage-layer failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::InvalidExchangeRate(_) => "INVALID_EXCHANGE_RATE",
            Self::FutureTransactionDate { .. } => "FUTURE_TRANSACTION_DATE",
            Self::MissingReferenceId(_) => "MISSING_REFERENCE_ID",
            Self::EmptyDescription => "EMPTY_DESCRIPTION",
            Self::DescriptionTooLong { .. } => "DESCRIPTION_TOO_LONG",
            Self::UnbalancedPair { .. } => "UNBALANCED_PAIR",
            Self::MismatchedPair(_) => "MISMATCHED_PAIR",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::AccountInactive { .. } => "ACCOUNT_INACTIVE",
            Self::ConcurrencyConflict => "CONCURRENCY_CONFLICT",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Returns true if retrying the operation may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrencyConflict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(LedgerError::InvalidAmount(dec!(0)).error_code(), "INVALID_AMOUNT");
        assert_eq!(
            LedgerError::MissingReferenceId(ReferenceType::Invoice).error_code(),
            "MISSING_REFERENCE_ID"
        );
        assert_eq!(LedgerError::ConcurrencyConflict.error_code(), "CONCURRENCY_CONFLICT");
    }

    #[test]
    fn test_retryable() {
        assert!(LedgerError::ConcurrencyConflict.is_retryable());
        assert!(!LedgerError::InvalidAmount(dec!(-5)).is_retryable());
        assert!(!LedgerError::Storage("boom".to_string()).is_retryable());
    }

    #[test]
    fn test_error_display_names_reference_type() {
        let err = LedgerError::MissingReferenceId(ReferenceType::CashReceipt);
        assert_eq!(err.to_string(), "Reference type cash_receipt requires a reference id");
    }
}
