//! Scheme quantity recording and claim settlement computation.
//!
//! Scheme1 quantities are free goods with no accounting effect; scheme2
//! quantities carry monetary value and must settle against a claim account
//! through the ledger. This module holds the pure half: request validation,
//! totals, and the settlement value; the storage layer drives the posting.

pub mod error;
pub mod service;
pub mod types;

pub use error::SchemeError;
pub use service::SchemeService;
pub use types::{
    ClaimLinkRequest, SchemeApplicationOutcome, SchemeApplicationRequest, SchemeQuantities,
    SchemeRecording, SchemeSettlement, SchemeTotals, SchemeValuedLine, ValidatedApplication,
    ValidatedClaimLink,
};
