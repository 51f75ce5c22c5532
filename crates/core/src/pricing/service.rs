//! Line-total composition.

use bahi_shared::types::AccountId;
use rust_decimal::Decimal;

use super::discount::{apply_discounts, ensure_non_negative};
use super::error::PricingError;
use super::tax::line_tax;
use super::types::{LineItem, LineTotals};

/// Stateless pricing service composing the discount and tax steps.
pub struct PricingService;

impl PricingService {
    /// Computes full totals for one invoice line.
    ///
    /// Pipeline: `quantity x unit_price` → discount1 → discount2 → tax.
    /// The claim account is passed through to the discount2 gate; it is not
    /// resolved here.
    ///
    /// # Errors
    ///
    /// Returns `PricingError` if any quantity, price, or percent fails
    /// validation, or discount2 is positive with no claim account.
    pub fn line_totals(
        line: &LineItem,
        claim_account: Option<AccountId>,
    ) -> Result<LineTotals, PricingError> {
        ensure_non_negative(line.quantity)?;
        ensure_non_negative(line.unit_price)?;

        let line_subtotal = line.quantity * line.unit_price;

        let breakdown = apply_discounts(
            line_subtotal,
            line.discount1_percent,
            line.discount2_percent,
            claim_account,
        )?;

        let taxable_amount = breakdown.taxable_amount();
        let tax_amount = line_tax(taxable_amount, line.tax_rate)?;

        Ok(LineTotals {
            line_subtotal,
            discount1_amount: breakdown.discount1_amount,
            discount2_amount: breakdown.discount2_amount,
            total_discount: breakdown.discount1_amount + breakdown.discount2_amount,
            taxable_amount,
            tax_amount,
            line_total: taxable_amount + tax_amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(
        quantity: Decimal,
        unit_price: Decimal,
        d1: Decimal,
        d2: Decimal,
        tax_rate: Decimal,
    ) -> LineItem {
        LineItem {
            quantity,
            unit_price,
            discount1_percent: d1,
            discount2_percent: d2,
            tax_rate,
        }
    }

    #[test]
    fn test_line_totals_full_pipeline() {
        // 10 x 100 = 1000; -10% -> 900; -5% -> 855; +18% tax -> 1008.90
        let claim = Some(AccountId::new());
        let item = line(dec!(10), dec!(100), dec!(10), dec!(5), dec!(18));

        let totals = PricingService::line_totals(&item, claim).unwrap();

        assert_eq!(totals.line_subtotal, dec!(1000));
        assert_eq!(totals.discount1_amount, dec!(100));
        assert_eq!(totals.discount2_amount, dec!(45));
        assert_eq!(totals.total_discount, dec!(145));
        assert_eq!(totals.taxable_amount, dec!(855));
        assert_eq!(totals.tax_amount, dec!(153.90));
        assert_eq!(totals.line_total, dec!(1008.90));
    }

    #[test]
    fn test_line_totals_no_discounts() {
        let item = line(dec!(4), dec!(25), dec!(0), dec!(0), dec!(5));

        let totals = PricingService::line_totals(&item, None).unwrap();

        assert_eq!(totals.line_subtotal, dec!(100));
        assert_eq!(totals.total_discount, dec!(0));
        assert_eq!(totals.taxable_amount, dec!(100));
        assert_eq!(totals.tax_amount, dec!(5));
        assert_eq!(totals.line_total, dec!(105));
    }

    #[test]
    fn test_line_totals_scheme_discount_without_claim_account_fails() {
        let item = line(dec!(10), dec!(100), dec!(0), dec!(5), dec!(18));

        assert_eq!(
            PricingService::line_totals(&item, None),
            Err(PricingError::ClaimAccountRequired)
        );
    }

    #[test]
    fn test_line_totals_rejects_negative_quantity() {
        let item = line(dec!(-1), dec!(100), dec!(0), dec!(0), dec!(0));

        assert_eq!(
            PricingService::line_totals(&item, None),
            Err(PricingError::InvalidAmount(dec!(-1)))
        );
    }
}
