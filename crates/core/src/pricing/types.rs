//! Pricing domain types.
//!
//! All of these are transient computation results; nothing here persists.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One invoice line as the pricing pipeline sees it.
///
/// Supplied by the invoice subsystem; the calculator never resolves items,
/// customers, or accounts itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Billed quantity.
    pub quantity: Decimal,
    /// Price per unit.
    pub unit_price: Decimal,
    /// First-stage discount percent, applied to the line subtotal.
    pub discount1_percent: Decimal,
    /// Second-stage (scheme) discount percent, applied after discount1.
    pub discount2_percent: Decimal,
    /// Nominal tax rate percent.
    pub tax_rate: Decimal,
}

/// Result of applying the two-stage discount pipeline to one amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountBreakdown {
    /// The amount before any discount.
    pub original_amount: Decimal,
    /// First-stage discount percent.
    pub discount1_percent: Decimal,
    /// First-stage discount value.
    pub discount1_amount: Decimal,
    /// Amount remaining after discount1.
    pub amount_after_discount1: Decimal,
    /// Second-stage discount percent.
    pub discount2_percent: Decimal,
    /// Second-stage discount value, computed on the post-discount1 base.
    pub discount2_amount: Decimal,
    /// Amount remaining after both discounts. Tax applies to this.
    pub amount_after_discount2: Decimal,
}

impl DiscountBreakdown {
    /// The base the tax calculation runs on.
    #[must_use]
    pub const fn taxable_amount(&self) -> Decimal {
        self.amount_after_discount2
    }
}

/// Full totals for one invoice line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineTotals {
    /// quantity x unit price.
    pub line_subtotal: Decimal,
    /// First-stage discount value.
    pub discount1_amount: Decimal,
    /// Second-stage discount value.
    pub discount2_amount: Decimal,
    /// Sum of both discount values.
    pub total_discount: Decimal,
    /// Base the tax was computed on.
    pub taxable_amount: Decimal,
    /// Tax value.
    pub tax_amount: Decimal,
    /// taxable + tax.
    pub line_total: Decimal,
}

/// GST component label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GstComponent {
    /// Central GST (intrastate half).
    Cgst,
    /// State GST (intrastate half).
    Sgst,
    /// Integrated GST (interstate, full rate).
    Igst,
}

impl std::fmt::Display for GstComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cgst => write!(f, "CGST"),
            Self::Sgst => write!(f, "SGST"),
            Self::Igst => write!(f, "IGST"),
        }
    }
}

/// One component of a tax split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxComponent {
    /// Component label.
    pub kind: GstComponent,
    /// Rate percent for this component.
    pub rate: Decimal,
    /// Tax value for this component.
    pub amount: Decimal,
}

/// Jurisdiction-dependent decomposition of a line's tax.
///
/// Components always sum exactly to the undivided tax amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSplit {
    /// One component (IGST) or two (CGST + SGST).
    pub components: Vec<TaxComponent>,
}

impl TaxSplit {
    /// Sum of all component amounts.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.components.iter().map(|c| c.amount).sum()
    }
}
