//! Claim-account validation errors.

use bahi_shared::types::AccountId;
use thiserror::Error;

use super::types::AccountType;

/// Errors from validating a claim-account reference.
///
/// Every variant carries enough context (account name, type) for the caller
/// to act on without a second lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimAccountError {
    /// No claim account id was supplied.
    #[error("Claim account id is required")]
    MissingAccountId,

    /// The referenced account does not exist.
    #[error("Claim account not found: {0}")]
    NotFound(AccountId),

    /// The account exists but has been deactivated.
    #[error("Account '{name}' ({id}) is inactive and cannot be used for claims")]
    Inactive {
        /// The account ID.
        id: AccountId,
        /// The account name, for actionable messages.
        name: String,
    },

    /// The account is active but its type forbids claim usage.
    #[error("Account '{name}' ({id}) has type {account_type}, which is not claim-eligible")]
    NotClaimEligible {
        /// The account ID.
        id: AccountId,
        /// The account name.
        name: String,
        /// The offending account type.
        account_type: AccountType,
    },
}
