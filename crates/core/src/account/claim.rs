//! Claim-account validation gate.
//!
//! Must run before any scheme-claim posting. The result is a snapshot taken
//! at validation time and must not be cached across requests: activation
//! state can change between calls.

use bahi_shared::types::AccountId;

use super::error::ClaimAccountError;
use super::types::AccountSnapshot;

/// Validates that an account reference is usable as a scheme-claim target.
///
/// The account lookup enters as a closure so this stays synchronous and
/// side-effect free; storage-backed callers adapt their fetch to it.
///
/// # Errors
///
/// - [`ClaimAccountError::MissingAccountId`] when no id is supplied
/// - [`ClaimAccountError::NotFound`] when the lookup yields nothing
/// - [`ClaimAccountError::Inactive`] when the account is deactivated
/// - [`ClaimAccountError::NotClaimEligible`] when the type forbids claims
pub fn validate_claim_account<L>(
    account_id: Option<AccountId>,
    lookup: L,
) -> Result<AccountSnapshot, ClaimAccountError>
where
    L: Fn(AccountId) -> Option<AccountSnapshot>,
{
    let id = account_id.ok_or(ClaimAccountError::MissingAccountId)?;
    let account = lookup(id).ok_or(ClaimAccountError::NotFound(id))?;

    if !account.is_active {
        return Err(ClaimAccountError::Inactive {
            id,
            name: account.name,
        });
    }

    if !account.account_type.is_claim_eligible() {
        return Err(ClaimAccountError::NotClaimEligible {
            id,
            name: account.name,
            account_type: account.account_type,
        });
    }

    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::types::AccountType;
    use rust_decimal::Decimal;

    fn stored_account(id: AccountId, account_type: AccountType, is_active: bool) -> AccountSnapshot {
        AccountSnapshot {
            id,
            name: "Dealer Scheme Claims".to_string(),
            code: "SCHEME-CLAIMS".to_string(),
            account_type,
            is_active,
            balance: Decimal::ZERO,
        }
    }

    #[test]
    fn test_missing_id() {
        let result = validate_claim_account(None, |_| None);
        assert_eq!(result, Err(ClaimAccountError::MissingAccountId));
    }

    #[test]
    fn test_not_found() {
        let id = AccountId::new();
        let result = validate_claim_account(Some(id), |_| None);
        assert_eq!(result, Err(ClaimAccountError::NotFound(id)));
    }

    #[test]
    fn test_inactive_account_named_in_error() {
        let id = AccountId::new();
        let result =
            validate_claim_account(Some(id), |lookup_id| {
                Some(stored_account(lookup_id, AccountType::Claim, false))
            });

        match result {
            Err(ClaimAccountError::Inactive { id: err_id, name }) => {
                assert_eq!(err_id, id);
                assert_eq!(name, "Dealer Scheme Claims");
            }
            other => panic!("expected Inactive, got {other:?}"),
        }
    }

    #[test]
    fn test_asset_account_not_claim_eligible() {
        let id = AccountId::new();
        let result =
            validate_claim_account(Some(id), |lookup_id| {
                Some(stored_account(lookup_id, AccountType::Asset, true))
            });

        match result {
            Err(ClaimAccountError::NotClaimEligible {
                account_type, name, ..
            }) => {
                assert_eq!(account_type, AccountType::Asset);
                assert_eq!(name, "Dealer Scheme Claims");
            }
            other => panic!("expected NotClaimEligible, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_claim_account_returns_snapshot() {
        let id = AccountId::new();
        let result =
            validate_claim_account(Some(id), |lookup_id| {
                Some(stored_account(lookup_id, AccountType::Expense, true))
            });

        let snapshot = result.unwrap();
        assert_eq!(snapshot.id, id);
        assert_eq!(snapshot.account_type, AccountType::Expense);
    }
}
