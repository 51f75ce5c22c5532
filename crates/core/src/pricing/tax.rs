//! Tax calculation and jurisdiction split.
//!
//! Tax always runs on the post-discount taxable amount, never the raw
//! subtotal. The split rule: counterparty in the home jurisdiction → the
//! nominal rate divides evenly into CGST + SGST; otherwise a single IGST
//! component carries the full rate. Which region code the counterparty
//! supplies is the embedding application's choice; this module only sees
//! the equality.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::discount::{ensure_non_negative, ensure_percent};
use super::error::PricingError;
use super::types::{GstComponent, TaxComponent, TaxSplit};

/// Decimal places for money amounts.
const MONEY_DP: u32 = 2;

/// Tax value for a line: `taxable * rate / 100`.
///
/// # Errors
///
/// `InvalidAmount` for a negative taxable amount, `InvalidPercent` for a
/// rate outside [0, 100].
pub fn line_tax(taxable_amount: Decimal, tax_rate: Decimal) -> Result<Decimal, PricingError> {
    ensure_non_negative(taxable_amount)?;
    ensure_percent(tax_rate)?;
    Ok(taxable_amount * tax_rate / Decimal::ONE_HUNDRED)
}

/// Splits a line's tax into jurisdiction components.
///
/// Same jurisdiction: two components at `rate / 2` each. The first is
/// rounded to money precision with banker's rounding and the second takes
/// the remainder, so the components always sum exactly to the undivided
/// tax.
///
/// # Errors
///
/// As [`line_tax`].
pub fn split_tax(
    taxable_amount: Decimal,
    tax_rate: Decimal,
    same_jurisdiction: bool,
) -> Result<TaxSplit, PricingError> {
    let total = line_tax(taxable_amount, tax_rate)?;

    if same_jurisdiction {
        let half_rate = tax_rate / Decimal::TWO;
        let central = (total / Decimal::TWO)
            .round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointNearestEven);
        let state = total - central;

        Ok(TaxSplit {
            components: vec![
                TaxComponent {
                    kind: GstComponent::Cgst,
                    rate: half_rate,
                    amount: central,
                },
                TaxComponent {
                    kind: GstComponent::Sgst,
                    rate: half_rate,
                    amount: state,
                },
            ],
        })
    } else {
        Ok(TaxSplit {
            components: vec![TaxComponent {
                kind: GstComponent::Igst,
                rate: tax_rate,
                amount: total,
            }],
        })
    }
}

/// Configurable source of the jurisdiction-equality decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRegime {
    /// The business's home region code (e.g., a state code).
    pub home_region: String,
}

impl TaxRegime {
    /// Creates a regime with the given home region.
    #[must_use]
    pub fn new(home_region: impl Into<String>) -> Self {
        Self {
            home_region: home_region.into(),
        }
    }

    /// Returns true if the counterparty region matches the home region.
    ///
    /// Comparison is trimmed and case-insensitive; region code formats vary
    /// across upstream master data.
    #[must_use]
    pub fn same_jurisdiction(&self, counterparty_region: &str) -> bool {
        self.home_region
            .trim()
            .eq_ignore_ascii_case(counterparty_region.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_line_tax_after_discounts() {
        // 855 taxable at 18% -> 153.90
        assert_eq!(line_tax(dec!(855), dec!(18)).unwrap(), dec!(153.90));
    }

    #[test]
    fn test_line_tax_zero_rate() {
        assert_eq!(line_tax(dec!(855), dec!(0)).unwrap(), dec!(0));
    }

    #[test]
    fn test_line_tax_rejects_negative_taxable() {
        assert_eq!(
            line_tax(dec!(-1), dec!(18)),
            Err(PricingError::InvalidAmount(dec!(-1)))
        );
    }

    #[test]
    fn test_split_same_jurisdiction_halves_rate() {
        let split = split_tax(dec!(1000), dec!(18), true).unwrap();

        assert_eq!(split.components.len(), 2);
        assert_eq!(split.components[0].kind, GstComponent::Cgst);
        assert_eq!(split.components[0].rate, dec!(9));
        assert_eq!(split.components[0].amount, dec!(90));
        assert_eq!(split.components[1].kind, GstComponent::Sgst);
        assert_eq!(split.components[1].rate, dec!(9));
        assert_eq!(split.components[1].amount, dec!(90));
        assert_eq!(split.total(), dec!(180));
    }

    #[test]
    fn test_split_different_jurisdiction_single_component() {
        let split = split_tax(dec!(1000), dec!(18), false).unwrap();

        assert_eq!(split.components.len(), 1);
        assert_eq!(split.components[0].kind, GstComponent::Igst);
        assert_eq!(split.components[0].rate, dec!(18));
        assert_eq!(split.components[0].amount, dec!(180));
    }

    #[test]
    fn test_split_odd_paise_still_sums_exactly() {
        // 5% of 100.30 = 5.015; halves cannot both round to 2 dp evenly.
        let split = split_tax(dec!(100.30), dec!(5), true).unwrap();
        let total = line_tax(dec!(100.30), dec!(5)).unwrap();

        assert_eq!(split.total(), total);
        // CGST rounds to 2.51; SGST takes the remainder.
        assert_eq!(split.components[0].amount, dec!(2.51));
        assert_eq!(split.components[1].amount, dec!(2.505));
    }

    #[test]
    fn test_tax_regime_equality() {
        let regime = TaxRegime::new("MH");
        assert!(regime.same_jurisdiction("MH"));
        assert!(regime.same_jurisdiction(" mh "));
        assert!(!regime.same_jurisdiction("KA"));
    }
}
