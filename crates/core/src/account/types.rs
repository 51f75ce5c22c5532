//! Account domain types.

use bahi_shared::types::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account type classification.
///
/// The claim-eligible subset (`Expense`, `Adjustment`, `Claim`) is the only
/// place this distinction carries behavior; everything else is reporting
/// taxonomy owned by account administration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Asset account.
    Asset,
    /// Liability account.
    Liability,
    /// Income account.
    Income,
    /// Expense account.
    Expense,
    /// Adjustment account.
    Adjustment,
    /// Scheme/claim settlement account.
    Claim,
    /// Bank account.
    Bank,
    /// Cash account.
    Cash,
}

impl AccountType {
    /// Returns true if accounts of this type may absorb scheme-claim value.
    #[must_use]
    pub fn is_claim_eligible(self) -> bool {
        matches!(self, Self::Expense | Self::Adjustment | Self::Claim)
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Adjustment => "adjustment",
            Self::Claim => "claim",
            Self::Bank => "bank",
            Self::Cash => "cash",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asset" => Ok(Self::Asset),
            "liability" => Ok(Self::Liability),
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "adjustment" => Ok(Self::Adjustment),
            "claim" => Ok(Self::Claim),
            "bank" => Ok(Self::Bank),
            "cash" => Ok(Self::Cash),
            _ => Err(format!("Unknown account type: {s}")),
        }
    }
}

/// A point-in-time view of an account.
///
/// `balance` is the cached projection maintained by the ledger engine; the
/// authoritative value is always the fold over posted entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    /// The account ID.
    pub id: AccountId,
    /// Display name.
    pub name: String,
    /// Human-readable unique code (e.g., "SCHEME-CLAIMS").
    pub code: String,
    /// Account type classification.
    pub account_type: AccountType,
    /// Whether the account accepts postings.
    pub is_active: bool,
    /// Cached signed balance.
    pub balance: Decimal,
}

impl AccountSnapshot {
    /// Returns true if this account can be used as a scheme-claim target.
    #[must_use]
    pub fn can_be_used_for_claims(&self) -> bool {
        self.is_active && self.account_type.is_claim_eligible()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn snapshot(account_type: AccountType, is_active: bool) -> AccountSnapshot {
        AccountSnapshot {
            id: AccountId::new(),
            name: "Scheme Claims".to_string(),
            code: "SCHEME-CLAIMS".to_string(),
            account_type,
            is_active,
            balance: Decimal::ZERO,
        }
    }

    #[test]
    fn test_claim_eligible_types() {
        assert!(AccountType::Expense.is_claim_eligible());
        assert!(AccountType::Adjustment.is_claim_eligible());
        assert!(AccountType::Claim.is_claim_eligible());

        assert!(!AccountType::Asset.is_claim_eligible());
        assert!(!AccountType::Liability.is_claim_eligible());
        assert!(!AccountType::Income.is_claim_eligible());
        assert!(!AccountType::Bank.is_claim_eligible());
        assert!(!AccountType::Cash.is_claim_eligible());
    }

    #[test]
    fn test_can_be_used_for_claims_requires_both() {
        assert!(snapshot(AccountType::Claim, true).can_be_used_for_claims());
        assert!(!snapshot(AccountType::Claim, false).can_be_used_for_claims());
        assert!(!snapshot(AccountType::Asset, true).can_be_used_for_claims());
    }

    #[test]
    fn test_account_type_round_trip() {
        for account_type in [
            AccountType::Asset,
            AccountType::Liability,
            AccountType::Income,
            AccountType::Expense,
            AccountType::Adjustment,
            AccountType::Claim,
            AccountType::Bank,
            AccountType::Cash,
        ] {
            let parsed = AccountType::from_str(&account_type.to_string()).unwrap();
            assert_eq!(parsed, account_type);
        }
        assert!(AccountType::from_str("equity").is_err());
    }
}
