//! Double-entry construction and reversal.
//!
//! Pure logic only: this service builds and validates entry pairs; the
//! storage layer owns persisting them atomically.

use bahi_shared::types::{LedgerEntryId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::entry::{EntryType, LedgerEntry, ReferenceType};
use super::error::LedgerError;
use super::types::{DoubleEntryInput, EntryPair};
use super::validation;

/// Stateless service for constructing ledger entries.
pub struct LedgerService;

impl LedgerService {
    /// Builds a balanced double entry from the input.
    ///
    /// Creates exactly two entries, one debit and one credit, sharing the
    /// amount, currency, exchange rate, reference, actor, and timestamps.
    /// The clock enters as a parameter; callers pass the write-time
    /// `Utc::now()`.
    ///
    /// # Errors
    ///
    /// `InvalidAmount` for a non-positive amount, plus every write-time
    /// rule from [`validation::validate_entry`].
    pub fn build_double_entry(
        input: &DoubleEntryInput,
        now: DateTime<Utc>,
    ) -> Result<EntryPair, LedgerError> {
        if input.amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(input.amount));
        }

        let debit = LedgerEntry {
            id: LedgerEntryId::new(),
            party: input.debit_party,
            entry_type: EntryType::Debit,
            amount: input.amount,
            description: input.description.clone(),
            reference_type: input.reference_type,
            reference_id: input.reference_id,
            transaction_date: input.transaction_date,
            currency: input.currency,
            exchange_rate: input.exchange_rate,
            created_by: input.created_by,
            created_at: now,
        };

        let credit = LedgerEntry {
            id: LedgerEntryId::new(),
            party: input.credit_party,
            entry_type: EntryType::Credit,
            ..debit.clone()
        };

        validation::validate_entry(&debit, now)?;
        validation::validate_entry(&credit, now)?;

        let pair = EntryPair { debit, credit };
        validation::validate_pair(&pair)?;

        Ok(pair)
    }

    /// Constructs the reversal of a posted entry.
    ///
    /// The reversal carries the opposite direction, the same party, amount,
    /// currency, and exchange rate, an `adjustment` reference type, and a
    /// reference id pointing back at the original entry. The description
    /// records the reason and the original wording. The original entry is
    /// never touched.
    #[must_use]
    pub fn reverse_entry(
        original: &LedgerEntry,
        reason: &str,
        actor: UserId,
        now: DateTime<Utc>,
    ) -> LedgerEntry {
        LedgerEntry {
            id: LedgerEntryId::new(),
            party: original.party,
            entry_type: original.entry_type.opposite(),
            amount: original.amount,
            description: format!("Reversal: {reason} (original: {})", original.description),
            reference_type: ReferenceType::Adjustment,
            reference_id: Some(original.id.into_inner()),
            transaction_date: now,
            currency: original.currency,
            exchange_rate: original.exchange_rate,
            created_by: actor,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bahi_shared::types::{AccountId, CustomerId};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use crate::ledger::entry::PartyRef;

    fn input(amount: Decimal, now: DateTime<Utc>) -> DoubleEntryInput {
        DoubleEntryInput::home_currency(
            PartyRef::Account(AccountId::new()),
            PartyRef::Customer(CustomerId::new()),
            amount,
            "Scheme claim settlement",
            ReferenceType::SchemeClaim,
            Some(Uuid::new_v4()),
            now,
            UserId::new(),
        )
    }

    #[test]
    fn test_build_double_entry_shapes_the_pair() {
        let now = Utc::now();
        let input = input(dec!(150), now);
        let pair = LedgerService::build_double_entry(&input, now).unwrap();

        assert_eq!(pair.debit.entry_type, EntryType::Debit);
        assert_eq!(pair.credit.entry_type, EntryType::Credit);
        assert_eq!(pair.debit.amount, dec!(150));
        assert_eq!(pair.credit.amount, dec!(150));
        assert_eq!(pair.debit.party, input.debit_party);
        assert_eq!(pair.credit.party, input.credit_party);
        assert_eq!(pair.debit.reference_id, pair.credit.reference_id);
        assert_eq!(pair.debit.created_at, pair.credit.created_at);
        assert_ne!(pair.debit.id, pair.credit.id);
        assert_eq!(pair.net(), dec!(0));
    }

    #[test]
    fn test_build_double_entry_rejects_non_positive_amounts() {
        let now = Utc::now();
        assert_eq!(
            LedgerService::build_double_entry(&input(dec!(0), now), now),
            Err(LedgerError::InvalidAmount(dec!(0)))
        );
        assert_eq!(
            LedgerService::build_double_entry(&input(dec!(-150), now), now),
            Err(LedgerError::InvalidAmount(dec!(-150)))
        );
    }

    #[test]
    fn test_build_double_entry_requires_reference_id_for_invoice() {
        let now = Utc::now();
        let mut input = input(dec!(150), now);
        input.reference_type = ReferenceType::Invoice;
        input.reference_id = None;

        assert_eq!(
            LedgerService::build_double_entry(&input, now),
            Err(LedgerError::MissingReferenceId(ReferenceType::Invoice))
        );
    }

    #[test]
    fn test_reverse_entry_swaps_direction_only() {
        let now = Utc::now();
        let pair = LedgerService::build_double_entry(&input(dec!(150), now), now).unwrap();
        let actor = UserId::new();

        let reversal = LedgerService::reverse_entry(&pair.debit, "Posted twice", actor, now);

        assert_eq!(reversal.entry_type, EntryType::Credit);
        assert_eq!(reversal.amount, pair.debit.amount);
        assert_eq!(reversal.party, pair.debit.party);
        assert_eq!(reversal.currency, pair.debit.currency);
        assert_eq!(reversal.exchange_rate, pair.debit.exchange_rate);
        assert_eq!(reversal.reference_type, ReferenceType::Adjustment);
        assert_eq!(reversal.reference_id, Some(pair.debit.id.into_inner()));
        assert_eq!(reversal.created_by, actor);
        assert!(reversal.description.contains("Posted twice"));
        assert!(reversal.description.contains(&pair.debit.description));
    }

    #[test]
    fn test_reversal_nets_to_zero_against_original() {
        let now = Utc::now();
        let pair = LedgerService::build_double_entry(&input(dec!(150), now), now).unwrap();
        let reversal = LedgerService::reverse_entry(&pair.debit, "Error", UserId::new(), now);

        assert_eq!(pair.debit.signed_amount() + reversal.signed_amount(), dec!(0));
    }
}
