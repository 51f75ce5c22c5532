//! Scheme settlement errors.

use bahi_shared::types::{AccountId, InvoiceId, InvoiceLineId};
use thiserror::Error;

use crate::account::ClaimAccountError;
use crate::ledger::LedgerError;

/// Errors that can occur while recording or settling scheme quantities.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemeError {
    // ========== Argument Validation ==========
    /// No invoice id was supplied.
    #[error("Invoice id is required")]
    MissingInvoiceId,

    /// No scheme items were supplied.
    #[error("Scheme items are required")]
    MissingSchemeItems,

    /// No claim account id was supplied.
    #[error("Claim account id is required")]
    MissingClaimAccountId,

    /// No actor was supplied.
    #[error("Actor is required")]
    MissingActor,

    /// A scheme quantity is negative.
    #[error("Scheme quantity cannot be negative on line {line_id}")]
    InvalidQuantity {
        /// The offending line.
        line_id: InvoiceLineId,
    },

    /// A line carries scheme2 quantity but names no claim account.
    #[error("Line {line_id} has a scheme2 quantity but no claim account")]
    ClaimAccountRequiredForScheme2 {
        /// The offending line.
        line_id: InvoiceLineId,
    },

    /// The scheme2 items disagree on which claim account settles them.
    #[error("Scheme2 items name conflicting claim accounts: {first} and {second}")]
    ConflictingClaimAccounts {
        /// The first claim account seen.
        first: AccountId,
        /// The conflicting claim account.
        second: AccountId,
    },

    // ========== Settlement ==========
    /// A claim link was requested but the invoice has nothing to settle.
    #[error("Invoice has no scheme2 quantities to settle")]
    NoScheme2Quantities,

    /// The invoice does not exist.
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(InvoiceId),

    /// A referenced invoice line does not exist on the invoice.
    #[error("Invoice line not found: {0}")]
    LineNotFound(InvoiceLineId),

    // ========== Wrapped Collaborator Errors ==========
    /// Claim-account validation failed.
    #[error(transparent)]
    ClaimAccount(#[from] ClaimAccountError),

    /// Ledger posting failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Storage-layer failure.
    #[error("Storage error: {0}")]
    Storage(String),
}
