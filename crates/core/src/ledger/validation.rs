//! Write-time validation for ledger entries.
//!
//! Applied on every path that creates entries, regardless of how the entry
//! was produced. Validation always runs before anything is persisted.

use rust_decimal::Decimal;
use chrono::{DateTime, Utc};

use super::entry::LedgerEntry;
use super::error::LedgerError;
use super::types::EntryPair;

/// Maximum stored description length, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Validates a single entry against the write-time rules.
///
/// The clock enters as a parameter so validation stays deterministic and
/// testable; callers pass the write-time `Utc::now()`.
///
/// # Errors
///
/// Returns the first violated rule: non-positive amount, non-positive
/// exchange rate, future transaction date, missing required reference id,
/// or an out-of-bounds description.
pub fn validate_entry(entry: &LedgerEntry, now: DateTime<Utc>) -> Result<(), LedgerError> {
    if entry.amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(entry.amount));
    }

    if entry.exchange_rate <= Decimal::ZERO {
        return Err(LedgerError::InvalidExchangeRate(entry.exchange_rate));
    }

    if entry.transaction_date > now {
        return Err(LedgerError::FutureTransactionDate {
            date: entry.transaction_date,
            now,
        });
    }

    if entry.reference_type.requires_reference_id() && entry.reference_id.is_none() {
        return Err(LedgerError::MissingReferenceId(entry.reference_type));
    }

    let description = entry.description.trim();
    if description.is_empty() {
        return Err(LedgerError::EmptyDescription);
    }
    let len = entry.description.chars().count();
    if len > MAX_DESCRIPTION_LEN {
        return Err(LedgerError::DescriptionTooLong {
            len,
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

/// Validates the double-entry invariants on a constructed pair.
///
/// # Errors
///
/// `MismatchedPair` when the halves disagree on a shared field or carry the
/// same direction; `UnbalancedPair` when the amounts differ.
pub fn validate_pair(pair: &EntryPair) -> Result<(), LedgerError> {
    if pair.debit.entry_type == pair.credit.entry_type {
        return Err(LedgerError::MismatchedPair("entry_type"));
    }
    if pair.debit.amount != pair.credit.amount {
        return Err(LedgerError::UnbalancedPair {
            debit: pair.debit.amount,
            credit: pair.credit.amount,
        });
    }
    if pair.debit.currency != pair.credit.currency {
        return Err(LedgerError::MismatchedPair("currency"));
    }
    if pair.debit.exchange_rate != pair.credit.exchange_rate {
        return Err(LedgerError::MismatchedPair("exchange_rate"));
    }
    if pair.debit.reference_type != pair.credit.reference_type {
        return Err(LedgerError::MismatchedPair("reference_type"));
    }
    if pair.debit.reference_id != pair.credit.reference_id {
        return Err(LedgerError::MismatchedPair("reference_id"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bahi_shared::types::{AccountId, LedgerEntryId, UserId};
    use bahi_shared::Currency;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    use crate::ledger::entry::{EntryType, PartyRef, ReferenceType};

    fn entry(entry_type: EntryType, amount: Decimal, now: DateTime<Utc>) -> LedgerEntry {
        LedgerEntry {
            id: LedgerEntryId::new(),
            party: PartyRef::Account(AccountId::new()),
            entry_type,
            amount,
            description: "Opening stock value".to_string(),
            reference_type: ReferenceType::OpeningBalance,
            reference_id: None,
            transaction_date: now,
            currency: Currency::home(),
            exchange_rate: Decimal::ONE,
            created_by: UserId::new(),
            created_at: now,
        }
    }

    #[test]
    fn test_valid_entry_passes() {
        let now = Utc::now();
        assert!(validate_entry(&entry(EntryType::Debit, dec!(100), now), now).is_ok());
    }

    #[test]
    fn test_zero_and_negative_amounts_rejected() {
        let now = Utc::now();
        assert_eq!(
            validate_entry(&entry(EntryType::Debit, dec!(0), now), now),
            Err(LedgerError::InvalidAmount(dec!(0)))
        );
        assert_eq!(
            validate_entry(&entry(EntryType::Debit, dec!(-10), now), now),
            Err(LedgerError::InvalidAmount(dec!(-10)))
        );
    }

    #[test]
    fn test_future_transaction_date_rejected() {
        let now = Utc::now();
        let mut e = entry(EntryType::Debit, dec!(100), now);
        e.transaction_date = now + Duration::hours(1);

        assert!(matches!(
            validate_entry(&e, now),
            Err(LedgerError::FutureTransactionDate { .. })
        ));
    }

    #[test]
    fn test_missing_reference_id_rejected() {
        let now = Utc::now();
        let mut e = entry(EntryType::Debit, dec!(100), now);
        e.reference_type = ReferenceType::Invoice;
        e.reference_id = None;

        assert_eq!(
            validate_entry(&e, now),
            Err(LedgerError::MissingReferenceId(ReferenceType::Invoice))
        );
    }

    #[test]
    fn test_reference_id_optional_for_adjustment() {
        let now = Utc::now();
        let mut e = entry(EntryType::Debit, dec!(100), now);
        e.reference_type = ReferenceType::Adjustment;
        e.reference_id = None;

        assert!(validate_entry(&e, now).is_ok());
    }

    #[test]
    fn test_empty_description_rejected() {
        let now = Utc::now();
        let mut e = entry(EntryType::Debit, dec!(100), now);
        e.description = "   ".to_string();

        assert_eq!(validate_entry(&e, now), Err(LedgerError::EmptyDescription));
    }

    #[test]
    fn test_overlong_description_rejected() {
        let now = Utc::now();
        let mut e = entry(EntryType::Debit, dec!(100), now);
        e.description = "x".repeat(MAX_DESCRIPTION_LEN + 1);

        assert!(matches!(
            validate_entry(&e, now),
            Err(LedgerError::DescriptionTooLong { .. })
        ));
    }

    #[test]
    fn test_pair_same_direction_rejected() {
        let now = Utc::now();
        let pair = EntryPair {
            debit: entry(EntryType::Debit, dec!(100), now),
            credit: entry(EntryType::Debit, dec!(100), now),
        };

        assert_eq!(
            validate_pair(&pair),
            Err(LedgerError::MismatchedPair("entry_type"))
        );
    }

    #[test]
    fn test_pair_unequal_amounts_rejected() {
        let now = Utc::now();
        let pair = EntryPair {
            debit: entry(EntryType::Debit, dec!(100), now),
            credit: entry(EntryType::Credit, dec!(50), now),
        };

        assert!(matches!(
            validate_pair(&pair),
            Err(LedgerError::UnbalancedPair { .. })
        ));
    }
}
