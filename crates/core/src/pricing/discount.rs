//! Two-stage discount pipeline.
//!
//! Sequencing is load-bearing: discount2 always applies to the
//! post-discount1 base, bounding the combined discount by
//! `1 - (1 - d1)(1 - d2)` and keeping the final amount non-negative for any
//! valid percents.

use bahi_shared::types::AccountId;
use rust_decimal::Decimal;

use super::error::PricingError;
use super::types::DiscountBreakdown;

/// Rejects negative amounts.
pub(super) fn ensure_non_negative(amount: Decimal) -> Result<(), PricingError> {
    if amount.is_sign_negative() {
        return Err(PricingError::InvalidAmount(amount));
    }
    Ok(())
}

/// Rejects percents outside [0, 100].
pub(super) fn ensure_percent(percent: Decimal) -> Result<(), PricingError> {
    if percent.is_sign_negative() || percent > Decimal::ONE_HUNDRED {
        return Err(PricingError::InvalidPercent(percent));
    }
    Ok(())
}

/// First-stage discount value: `amount * percent / 100`.
///
/// # Errors
///
/// `InvalidAmount` for negative amounts, `InvalidPercent` outside [0, 100].
pub fn discount1(amount: Decimal, percent: Decimal) -> Result<Decimal, PricingError> {
    ensure_non_negative(amount)?;
    ensure_percent(percent)?;
    Ok(amount * percent / Decimal::ONE_HUNDRED)
}

/// Second-stage discount value, computed on the post-discount1 base.
///
/// A positive percent must name a claim account to settle against; callers
/// are expected to have validated the account via
/// [`crate::account::validate_claim_account`] already; this function stays
/// pure and never resolves accounts.
///
/// # Errors
///
/// As [`discount1`], plus `ClaimAccountRequired` when `percent > 0` and no
/// claim account is supplied.
pub fn discount2(
    amount_after_discount1: Decimal,
    percent: Decimal,
    claim_account: Option<AccountId>,
) -> Result<Decimal, PricingError> {
    ensure_non_negative(amount_after_discount1)?;
    ensure_percent(percent)?;

    if percent > Decimal::ZERO && claim_account.is_none() {
        return Err(PricingError::ClaimAccountRequired);
    }

    Ok(amount_after_discount1 * percent / Decimal::ONE_HUNDRED)
}

/// Applies discount1 then discount2 and returns the full breakdown.
///
/// # Errors
///
/// Propagates the validation failures of [`discount1`] and [`discount2`].
pub fn apply_discounts(
    amount: Decimal,
    discount1_percent: Decimal,
    discount2_percent: Decimal,
    claim_account: Option<AccountId>,
) -> Result<DiscountBreakdown, PricingError> {
    let discount1_amount = discount1(amount, discount1_percent)?;
    let amount_after_discount1 = amount - discount1_amount;

    let discount2_amount = discount2(amount_after_discount1, discount2_percent, claim_account)?;
    let amount_after_discount2 = amount_after_discount1 - discount2_amount;

    Ok(DiscountBreakdown {
        original_amount: amount,
        discount1_percent,
        discount1_amount,
        amount_after_discount1,
        discount2_percent,
        discount2_amount,
        amount_after_discount2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(1000), dec!(10), dec!(100))]
    #[case(dec!(1000), dec!(0), dec!(0))]
    #[case(dec!(0), dec!(50), dec!(0))]
    #[case(dec!(250), dec!(100), dec!(250))]
    #[case(dec!(199.99), dec!(12.5), dec!(24.998750))]
    fn test_discount1_values(
        #[case] amount: Decimal,
        #[case] percent: Decimal,
        #[case] expected: Decimal,
    ) {
        assert_eq!(discount1(amount, percent).unwrap(), expected);
    }

    #[test]
    fn test_discount1_rejects_negative_amount() {
        assert_eq!(
            discount1(dec!(-1), dec!(10)),
            Err(PricingError::InvalidAmount(dec!(-1)))
        );
    }

    #[rstest]
    #[case(dec!(-0.01))]
    #[case(dec!(100.01))]
    #[case(dec!(500))]
    fn test_discount1_rejects_bad_percent(#[case] percent: Decimal) {
        assert_eq!(
            discount1(dec!(100), percent),
            Err(PricingError::InvalidPercent(percent))
        );
    }

    #[test]
    fn test_discount2_requires_claim_account_when_positive() {
        assert_eq!(
            discount2(dec!(900), dec!(5), None),
            Err(PricingError::ClaimAccountRequired)
        );
    }

    #[test]
    fn test_discount2_zero_percent_needs_no_claim_account() {
        assert_eq!(discount2(dec!(900), dec!(0), None).unwrap(), dec!(0));
    }

    #[test]
    fn test_apply_discounts_sequencing() {
        // 1000 -10% -> 900, then -5% of 900 -> 855
        let claim = Some(bahi_shared::types::AccountId::new());
        let breakdown = apply_discounts(dec!(1000), dec!(10), dec!(5), claim).unwrap();

        assert_eq!(breakdown.discount1_amount, dec!(100));
        assert_eq!(breakdown.amount_after_discount1, dec!(900));
        assert_eq!(breakdown.discount2_amount, dec!(45));
        assert_eq!(breakdown.amount_after_discount2, dec!(855));
        assert_eq!(breakdown.taxable_amount(), dec!(855));
    }

    #[test]
    fn test_apply_discounts_full_discount_is_zero_not_negative() {
        let claim = Some(bahi_shared::types::AccountId::new());
        let breakdown = apply_discounts(dec!(500), dec!(100), dec!(100), claim).unwrap();
        assert_eq!(breakdown.amount_after_discount2, dec!(0));
    }
}
