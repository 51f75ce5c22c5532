//! Scheme domain types.

use bahi_shared::types::{AccountId, InvoiceId, InvoiceLineId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::account::AccountSnapshot;
use crate::ledger::EntryPair;

/// Scheme quantities for one invoice line, as submitted by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeQuantities {
    /// The invoice line these quantities attach to.
    pub line_id: InvoiceLineId,
    /// Free-goods bonus quantity. No ledger effect.
    pub scheme1_quantity: i32,
    /// Claim-based bonus quantity. Carries monetary value.
    pub scheme2_quantity: i32,
    /// Claim account to settle scheme2 value against.
    /// Required whenever `scheme2_quantity > 0`.
    pub claim_account_id: Option<AccountId>,
}

/// Aggregate scheme quantities across an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeTotals {
    /// Sum of scheme1 quantities.
    pub total_scheme1: i64,
    /// Sum of scheme2 quantities.
    pub total_scheme2: i64,
}

impl SchemeTotals {
    /// Returns true if any scheme2 quantity exists, i.e. a settlement is due.
    #[must_use]
    pub const fn has_scheme2(&self) -> bool {
        self.total_scheme2 > 0
    }
}

/// An invoice line's scheme2 quantity with the price it values at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeValuedLine {
    /// The invoice line.
    pub line_id: InvoiceLineId,
    /// Recorded scheme2 quantity.
    pub scheme2_quantity: i32,
    /// The line's unit price.
    pub unit_price: Decimal,
}

/// Boundary request for applying scheme quantities to an invoice.
///
/// Fields arrive optional from the outer layers; `SchemeService` turns this
/// into a [`ValidatedApplication`] or a typed error before anything runs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemeApplicationRequest {
    /// The invoice to apply schemes to.
    pub invoice_id: Option<InvoiceId>,
    /// Per-line scheme quantities.
    pub items: Vec<SchemeQuantities>,
    /// The actor performing the application.
    pub actor: Option<UserId>,
}

/// A scheme application that passed argument validation.
#[derive(Debug, Clone)]
pub struct ValidatedApplication {
    /// The invoice to apply schemes to.
    pub invoice_id: InvoiceId,
    /// Per-line scheme quantities.
    pub items: Vec<SchemeQuantities>,
    /// The actor performing the application.
    pub actor: UserId,
    /// The single claim account named by the scheme2 items, when any exist.
    pub claim_account_id: Option<AccountId>,
}

/// Boundary request for linking an invoice's scheme2 value to a claim
/// account.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClaimLinkRequest {
    /// The invoice whose scheme2 value settles.
    pub invoice_id: Option<InvoiceId>,
    /// The claim account absorbing the value.
    pub claim_account_id: Option<AccountId>,
    /// The actor performing the link.
    pub actor: Option<UserId>,
}

/// A claim link request that passed argument validation.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedClaimLink {
    /// The invoice whose scheme2 value settles.
    pub invoice_id: InvoiceId,
    /// The claim account absorbing the value.
    pub claim_account_id: AccountId,
    /// The actor performing the link.
    pub actor: UserId,
}

/// Result of recording scheme quantities on an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeRecording {
    /// The recorded per-line quantities.
    pub items: Vec<SchemeQuantities>,
    /// Aggregate totals over the recorded items.
    pub totals: SchemeTotals,
}

/// Result of settling an invoice's scheme2 value against a claim account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeSettlement {
    /// The settled invoice.
    pub invoice_id: InvoiceId,
    /// Snapshot of the claim account at validation time.
    pub claim_account: AccountSnapshot,
    /// The posted debit/credit pair.
    pub entries: EntryPair,
    /// `sum(scheme2_quantity * unit_price)` over the invoice's lines.
    pub total_scheme2_value: Decimal,
}

/// Result of a full scheme application.
///
/// `settlement` is `None` when no scheme2 quantity existed, in which case
/// the ledger was never touched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeApplicationOutcome {
    /// The recorded quantities and totals.
    pub recording: SchemeRecording,
    /// The ledger settlement, when scheme2 quantities existed.
    pub settlement: Option<SchemeSettlement>,
}
