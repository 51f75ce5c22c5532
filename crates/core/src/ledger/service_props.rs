//! Property-based tests for double-entry construction and balance folds.

use bahi_shared::types::{AccountId, CustomerId, LedgerEntryId, UserId};
use bahi_shared::Currency;
use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::balance::{balance_as_of, statement};
use super::entry::{EntryType, LedgerEntry, PartyRef, ReferenceType};
use super::service::LedgerService;
use super::types::DoubleEntryInput;

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap()
}

/// Strategy for positive amounts (0.01 to 100,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|paise| Decimal::new(paise, 2))
}

/// Strategy for entry directions.
fn entry_type_strategy() -> impl Strategy<Value = EntryType> {
    prop_oneof![Just(EntryType::Debit), Just(EntryType::Credit)]
}

/// Strategy for a day offset within a two-month window.
fn day_offset() -> impl Strategy<Value = i64> {
    0i64..60
}

fn make_entry(entry_type: EntryType, amount: Decimal, day: i64) -> LedgerEntry {
    let at = base_time() + Duration::days(day);
    LedgerEntry {
        id: LedgerEntryId::new(),
        party: PartyRef::Account(AccountId::from_uuid(uuid::Uuid::nil())),
        entry_type,
        amount,
        description: "Posting".to_string(),
        reference_type: ReferenceType::Adjustment,
        reference_id: None,
        transaction_date: at,
        currency: Currency::home(),
        exchange_rate: Decimal::ONE,
        created_by: UserId::new(),
        created_at: at,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* positive amount, a constructed pair has equal amounts,
    /// opposite directions, identical references, and a signed sum of zero.
    #[test]
    fn prop_pair_is_balanced(amount in positive_amount()) {
        let now = base_time();
        let input = DoubleEntryInput::home_currency(
            PartyRef::Account(AccountId::new()),
            PartyRef::Customer(CustomerId::new()),
            amount,
            "Settlement",
            ReferenceType::SchemeClaim,
            Some(uuid::Uuid::new_v4()),
            now,
            UserId::new(),
        );

        let pair = LedgerService::build_double_entry(&input, now).unwrap();

        prop_assert_eq!(pair.debit.amount, pair.credit.amount);
        prop_assert_eq!(pair.debit.entry_type, EntryType::Debit);
        prop_assert_eq!(pair.credit.entry_type, EntryType::Credit);
        prop_assert_eq!(pair.debit.reference_type, pair.credit.reference_type);
        prop_assert_eq!(pair.debit.reference_id, pair.credit.reference_id);
        prop_assert_eq!(pair.net(), Decimal::ZERO);
    }

    /// *For any* entry set, the balance fold equals the plain sum of signed
    /// amounts up to the cutoff.
    #[test]
    fn prop_balance_fold_equals_signed_sum(
        specs in prop::collection::vec(
            (entry_type_strategy(), positive_amount(), day_offset()),
            0..20,
        ),
        cutoff_day in day_offset(),
    ) {
        let entries: Vec<LedgerEntry> = specs
            .iter()
            .map(|(entry_type, amount, day)| make_entry(*entry_type, *amount, *day))
            .collect();
        let cutoff = base_time() + Duration::days(cutoff_day);

        let expected: Decimal = entries
            .iter()
            .filter(|e| e.transaction_date <= cutoff)
            .map(LedgerEntry::signed_amount)
            .sum();

        prop_assert_eq!(balance_as_of(&entries, cutoff), expected);
    }

    /// *For any* entry, posting it and its reversal changes the balance by
    /// exactly zero while adding two entries to the party's history.
    #[test]
    fn prop_reversal_round_trips_to_zero(
        entry_type in entry_type_strategy(),
        amount in positive_amount(),
    ) {
        let original = make_entry(entry_type, amount, 10);
        let now = base_time() + Duration::days(20);
        let reversal = LedgerService::reverse_entry(&original, "correction", UserId::new(), now);

        let mut history = vec![original.clone()];
        let before = balance_as_of(&history, now);
        history.push(reversal);
        let after = balance_as_of(&history, now);

        prop_assert_eq!(after, before - original.signed_amount());
        prop_assert_eq!(history.len(), 2);
    }

    /// *For any* entry set and range, the statement closing balance equals
    /// the fold at the range end.
    #[test]
    fn prop_statement_closing_equals_balance_at_end(
        specs in prop::collection::vec(
            (entry_type_strategy(), positive_amount(), day_offset()),
            0..20,
        ),
        start_day in day_offset(),
        len in 0i64..30,
    ) {
        let entries: Vec<LedgerEntry> = specs
            .iter()
            .map(|(entry_type, amount, day)| make_entry(*entry_type, *amount, *day))
            .collect();
        let start = base_time() + Duration::days(start_day);
        let end = start + Duration::days(len);

        let stmt = statement(&entries, start, end);

        prop_assert_eq!(stmt.closing, balance_as_of(&entries, end));
        prop_assert_eq!(
            stmt.opening,
            stmt.closing
                - stmt.lines.iter().map(|l| l.entry.signed_amount()).sum::<Decimal>()
        );
    }
}
