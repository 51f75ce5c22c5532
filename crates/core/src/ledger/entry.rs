//! Ledger entry domain types.

use bahi_shared::types::{AccountId, CustomerId, LedgerEntryId, SupplierId, UserId};
use bahi_shared::{Currency, Money};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Type of ledger entry.
///
/// Direction is encoded here and only here; `amount` is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Debit entry.
    Debit,
    /// Credit entry.
    Credit,
}

impl EntryType {
    /// The opposite direction, used when constructing reversals.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debit => write!(f, "debit"),
            Self::Credit => write!(f, "credit"),
        }
    }
}

impl std::str::FromStr for EntryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debit" => Ok(Self::Debit),
            "credit" => Ok(Self::Credit),
            _ => Err(format!("Unknown entry type: {s}")),
        }
    }
}

/// What kind of business event an entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceType {
    /// Sales invoice.
    Invoice,
    /// Payment (incoming or outgoing).
    Payment,
    /// Correction/reversal entry.
    Adjustment,
    /// Opening balance entry.
    OpeningBalance,
    /// Cash receipt.
    CashReceipt,
    /// Cash payment.
    CashPayment,
    /// Scheme-claim settlement.
    SchemeClaim,
}

impl ReferenceType {
    /// Returns true if entries of this type must carry a reference id.
    #[must_use]
    pub fn requires_reference_id(self) -> bool {
        matches!(
            self,
            Self::Invoice | Self::Payment | Self::CashReceipt | Self::CashPayment
        )
    }
}

impl std::fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Invoice => "invoice",
            Self::Payment => "payment",
            Self::Adjustment => "adjustment",
            Self::OpeningBalance => "opening_balance",
            Self::CashReceipt => "cash_receipt",
            Self::CashPayment => "cash_payment",
            Self::SchemeClaim => "scheme_claim",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for ReferenceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "invoice" => Ok(Self::Invoice),
            "payment" => Ok(Self::Payment),
            "adjustment" => Ok(Self::Adjustment),
            "opening_balance" => Ok(Self::OpeningBalance),
            "cash_receipt" => Ok(Self::CashReceipt),
            "cash_payment" => Ok(Self::CashPayment),
            "scheme_claim" => Ok(Self::SchemeClaim),
            _ => Err(format!("Unknown reference type: {s}")),
        }
    }
}

/// Discriminator for the collections a ledger party can resolve against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyKind {
    /// Customer sub-ledger.
    Customer,
    /// Supplier sub-ledger.
    Supplier,
    /// Back-office user (e.g., cash custodian).
    User,
    /// General-ledger account.
    Account,
}

impl std::fmt::Display for PartyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Customer => "customer",
            Self::Supplier => "supplier",
            Self::User => "user",
            Self::Account => "account",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for PartyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "supplier" => Ok(Self::Supplier),
            "user" => Ok(Self::User),
            "account" => Ok(Self::Account),
            _ => Err(format!("Unknown party kind: {s}")),
        }
    }
}

/// Polymorphic reference to the party an entry posts against.
///
/// A closed enum of reference kinds, each carrying its typed id; the
/// discriminator selects which store the id resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum PartyRef {
    /// A customer.
    Customer(CustomerId),
    /// A supplier.
    Supplier(SupplierId),
    /// A back-office user.
    User(UserId),
    /// A general-ledger account.
    Account(AccountId),
}

impl PartyRef {
    /// The discriminator for this reference.
    #[must_use]
    pub fn kind(self) -> PartyKind {
        match self {
            Self::Customer(_) => PartyKind::Customer,
            Self::Supplier(_) => PartyKind::Supplier,
            Self::User(_) => PartyKind::User,
            Self::Account(_) => PartyKind::Account,
        }
    }

    /// The raw id, independent of kind.
    #[must_use]
    pub fn id(self) -> Uuid {
        match self {
            Self::Customer(id) => id.into_inner(),
            Self::Supplier(id) => id.into_inner(),
            Self::User(id) => id.into_inner(),
            Self::Account(id) => id.into_inner(),
        }
    }

    /// Reassembles a reference from its stored parts.
    #[must_use]
    pub fn from_parts(kind: PartyKind, id: Uuid) -> Self {
        match kind {
            PartyKind::Customer => Self::Customer(CustomerId::from_uuid(id)),
            PartyKind::Supplier => Self::Supplier(SupplierId::from_uuid(id)),
            PartyKind::User => Self::User(UserId::from_uuid(id)),
            PartyKind::Account => Self::Account(AccountId::from_uuid(id)),
        }
    }

    /// The account id, if this reference is an account.
    #[must_use]
    pub fn as_account(self) -> Option<AccountId> {
        match self {
            Self::Account(id) => Some(id),
            _ => None,
        }
    }
}

/// One half of a financial event.
///
/// Immutable after creation: corrections are expressed as a new entry with
/// the opposite direction and an `adjustment` reference type, never as an
/// update or delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier for this entry.
    pub id: LedgerEntryId,
    /// The party this entry posts against.
    pub party: PartyRef,
    /// Whether this is a debit or credit.
    pub entry_type: EntryType,
    /// Amount in `currency`. Always strictly positive.
    pub amount: Decimal,
    /// Free-text description (bounded length).
    pub description: String,
    /// The kind of business event recorded.
    pub reference_type: ReferenceType,
    /// Source document id, required for some reference types.
    pub reference_id: Option<Uuid>,
    /// When the financial event occurred. Never in the future at write time.
    pub transaction_date: DateTime<Utc>,
    /// Currency of `amount`.
    pub currency: Currency,
    /// Rate to the home currency. 1 for home-currency entries.
    pub exchange_rate: Decimal,
    /// Actor who created the entry.
    pub created_by: UserId,
    /// When the entry was written.
    pub created_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// Returns the signed amount (positive for debit, negative for credit).
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.entry_type {
            EntryType::Debit => self.amount,
            EntryType::Credit => -self.amount,
        }
    }

    /// Returns the amount in the home currency.
    #[must_use]
    pub fn base_amount(&self) -> Decimal {
        self.amount * self.exchange_rate
    }

    /// The entry's amount with its currency.
    #[must_use]
    pub fn money(&self) -> Money {
        Money::new(self.amount, self.currency)
    }
}
