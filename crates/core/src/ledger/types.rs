//! Input and result types for double-entry construction.

use bahi_shared::types::UserId;
use bahi_shared::Currency;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entry::{LedgerEntry, PartyRef, ReferenceType};

/// Input for creating a balanced double entry.
#[derive(Debug, Clone)]
pub struct DoubleEntryInput {
    /// The party to debit.
    pub debit_party: PartyRef,
    /// The party to credit.
    pub credit_party: PartyRef,
    /// The amount posted to both sides (must be positive).
    pub amount: Decimal,
    /// Description shared by both entries.
    pub description: String,
    /// Business event kind shared by both entries.
    pub reference_type: ReferenceType,
    /// Source document id, required for some reference types.
    pub reference_id: Option<Uuid>,
    /// When the financial event occurred.
    pub transaction_date: DateTime<Utc>,
    /// Currency of `amount`.
    pub currency: Currency,
    /// Rate to the home currency.
    pub exchange_rate: Decimal,
    /// Actor creating the entries.
    pub created_by: UserId,
}

impl DoubleEntryInput {
    /// Creates an input in the home currency at rate 1.
    #[must_use]
    pub fn home_currency(
        debit_party: PartyRef,
        credit_party: PartyRef,
        amount: Decimal,
        description: impl Into<String>,
        reference_type: ReferenceType,
        reference_id: Option<Uuid>,
        transaction_date: DateTime<Utc>,
        created_by: UserId,
    ) -> Self {
        Self {
            debit_party,
            credit_party,
            amount,
            description: description.into(),
            reference_type,
            reference_id,
            transaction_date,
            currency: Currency::home(),
            exchange_rate: Decimal::ONE,
            created_by,
        }
    }
}

/// A matched debit/credit pair, the only shape entries are created in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryPair {
    /// The debit half.
    pub debit: LedgerEntry,
    /// The credit half.
    pub credit: LedgerEntry,
}

impl EntryPair {
    /// The amount carried by both halves.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.debit.amount
    }

    /// Sum of the signed amounts. Zero for every valid pair.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.debit.signed_amount() + self.credit.signed_amount()
    }

    /// Both halves, debit first.
    #[must_use]
    pub fn entries(&self) -> [&LedgerEntry; 2] {
        [&self.debit, &self.credit]
    }
}
