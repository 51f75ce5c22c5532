//! Account snapshots and claim-account validation.
//!
//! The account store itself is owned by account administration; this module
//! defines the snapshot the core reads and the gate every scheme-claim
//! settlement must pass before a posting is attempted.

pub mod claim;
pub mod error;
pub mod types;

pub use claim::validate_claim_account;
pub use error::ClaimAccountError;
pub use types::{AccountSnapshot, AccountType};
