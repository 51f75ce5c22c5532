//! Discount sequencing and GST calculation.
//!
//! Pure computation over invoice-line numbers: subtotal, two-stage discount,
//! taxable amount, jurisdiction-split tax, line total. No lookups, no I/O;
//! claim-account existence is the caller's problem (see `crate::account`).

pub mod discount;
pub mod error;
pub mod service;
pub mod tax;
pub mod types;

#[cfg(test)]
mod service_props;

pub use discount::{apply_discounts, discount1, discount2};
pub use error::PricingError;
pub use service::PricingService;
pub use tax::{line_tax, split_tax, TaxRegime};
pub use types::{DiscountBreakdown, GstComponent, LineItem, LineTotals, TaxComponent, TaxSplit};
