//! Property-based tests for the pricing pipeline.

use proptest::prelude::*;
use rust_decimal::Decimal;

use bahi_shared::types::AccountId;

use super::discount::{apply_discounts, discount1, discount2};
use super::error::PricingError;
use super::tax::{line_tax, split_tax};

/// Strategy for non-negative amounts (0.00 to 100,000.00).
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|paise| Decimal::new(paise, 2))
}

/// Strategy for percents in [0.00, 100.00].
fn percent_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000i64).prop_map(|bp| Decimal::new(bp, 2))
}

/// Strategy for strictly positive percents in (0.00, 100.00].
fn positive_percent_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=10_000i64).prop_map(|bp| Decimal::new(bp, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* amount >= 0 and percent in [0, 100], discount1 equals
    /// `amount * percent / 100` and lands in [0, amount].
    #[test]
    fn prop_discount1_formula_and_range(
        amount in amount_strategy(),
        percent in percent_strategy(),
    ) {
        let value = discount1(amount, percent).unwrap();

        prop_assert_eq!(value, amount * percent / Decimal::ONE_HUNDRED);
        prop_assert!(value >= Decimal::ZERO);
        prop_assert!(value <= amount);
    }

    /// *For any* valid inputs, the sequenced pipeline equals the closed-form
    /// product `amount * (1 - d1/100) * (1 - d2/100)`, and the final amount
    /// stays within [0, amount].
    #[test]
    fn prop_apply_discounts_product_formula(
        amount in amount_strategy(),
        d1 in percent_strategy(),
        d2 in percent_strategy(),
    ) {
        let claim = Some(AccountId::new());
        let breakdown = apply_discounts(amount, d1, d2, claim).unwrap();

        let one = Decimal::ONE;
        let expected = amount
            * (one - d1 / Decimal::ONE_HUNDRED)
            * (one - d2 / Decimal::ONE_HUNDRED);

        prop_assert_eq!(breakdown.amount_after_discount2, expected);
        prop_assert!(breakdown.amount_after_discount2 >= Decimal::ZERO);
        prop_assert!(breakdown.amount_after_discount2 <= amount);
    }

    /// *For any* amount, a positive discount2 percent with no claim account
    /// fails with `ClaimAccountRequired`.
    #[test]
    fn prop_discount2_requires_claim_account(
        amount in amount_strategy(),
        percent in positive_percent_strategy(),
    ) {
        prop_assert_eq!(
            discount2(amount, percent, None),
            Err(PricingError::ClaimAccountRequired)
        );
    }

    /// *For any* taxable amount and rate, the split components sum exactly
    /// to the undivided tax, with two equal-rate components in the same
    /// jurisdiction and one full-rate component otherwise.
    #[test]
    fn prop_split_components_sum_to_tax(
        taxable in amount_strategy(),
        rate in percent_strategy(),
        same_jurisdiction in any::<bool>(),
    ) {
        let total = line_tax(taxable, rate).unwrap();
        let split = split_tax(taxable, rate, same_jurisdiction).unwrap();

        prop_assert_eq!(split.total(), total);

        if same_jurisdiction {
            prop_assert_eq!(split.components.len(), 2);
            prop_assert_eq!(split.components[0].rate, rate / Decimal::TWO);
            prop_assert_eq!(split.components[1].rate, rate / Decimal::TWO);
        } else {
            prop_assert_eq!(split.components.len(), 1);
            prop_assert_eq!(split.components[0].rate, rate);
        }
    }

    /// *For any* valid line, tax is computed on the post-discount base, so
    /// it never exceeds the tax on the undiscounted amount.
    #[test]
    fn prop_tax_on_discounted_base_is_bounded(
        amount in amount_strategy(),
        d1 in percent_strategy(),
        rate in percent_strategy(),
    ) {
        let breakdown = apply_discounts(amount, d1, Decimal::ZERO, None).unwrap();
        let tax_after = line_tax(breakdown.amount_after_discount2, rate).unwrap();
        let tax_before = line_tax(amount, rate).unwrap();

        prop_assert!(tax_after <= tax_before);
    }
}
