//! Property-based tests for tax calculations.
//!
//! - Grand total is the rounded sub total plus the separately rounded VAT
//! - Rounding is idempotent and always yields two decimal places
//! - Breakdown invariants hold for every input

use proptest::prelude::*;
use rust_decimal::Decimal;
use thaibooks_shared::types::money::{MONEY_SCALE, round2};

use super::calculator::TaxCalculator;

/// Strategy for non-negative amounts with up to 4 decimals (0 to 10,000,000).
fn non_negative_amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy for signed amounts with up to 6 decimals.
fn any_amount() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000_000i64..1_000_000_000_000i64).prop_map(|v| Decimal::new(v, 6))
}

/// Strategy for rates from 0.00% to 100.00%.
fn rate() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000i64).prop_map(|v| Decimal::new(v, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For all sub_total >= 0 and vat_rate >= 0, grand_total equals
    /// round2(sub_total) + vat_amount exactly.
    #[test]
    fn prop_grand_total_is_rounded_sum(
        sub_total in non_negative_amount(),
        vat_rate in rate(),
    ) {
        let grand = TaxCalculator::grand_total(sub_total, vat_rate);
        let vat = TaxCalculator::vat_amount(sub_total, vat_rate);
        prop_assert_eq!(grand.amount(), round2(sub_total) + vat.amount());
    }

    /// round2 is idempotent.
    #[test]
    fn prop_round2_idempotent(value in any_amount()) {
        let once = round2(value);
        prop_assert_eq!(round2(once), once);
    }

    /// round2 always yields exactly two fractional digits and moves the
    /// value by at most half a satang.
    #[test]
    fn prop_round2_scale_and_distance(value in any_amount()) {
        let rounded = round2(value);
        prop_assert_eq!(rounded.scale(), MONEY_SCALE);
        prop_assert!((rounded - value).abs() <= Decimal::new(5, 3));
    }

    /// round2 is symmetric around zero (half away from zero).
    #[test]
    fn prop_round2_symmetric(value in any_amount()) {
        prop_assert_eq!(round2(-value), -round2(value));
    }

    /// Every calculator output carries exactly two decimal places.
    #[test]
    fn prop_outputs_have_two_decimals(
        a in any_amount(),
        b in any_amount(),
        r in rate(),
    ) {
        for money in [
            TaxCalculator::vat_amount(a, r),
            TaxCalculator::grand_total(a, r),
            TaxCalculator::wht_amount(a, r),
            TaxCalculator::net_received(a, b),
            TaxCalculator::vat_payable(a, b),
            TaxCalculator::line_total(a, b),
        ] {
            prop_assert_eq!(money.amount().scale(), MONEY_SCALE);
        }
    }

    /// vat_payable is antisymmetric: swapping output and input flips the sign.
    #[test]
    fn prop_vat_payable_antisymmetric(
        output in non_negative_amount(),
        input in non_negative_amount(),
    ) {
        let forward = TaxCalculator::vat_payable(output, input);
        let backward = TaxCalculator::vat_payable(input, output);
        prop_assert_eq!(forward.amount(), -backward.amount());
    }

    /// Breakdown invariants hold with and without withholding.
    #[test]
    fn prop_breakdown_invariants(
        sub_total in non_negative_amount(),
        vat_rate in rate(),
        wht_rate in rate(),
        wht_base in non_negative_amount(),
        withhold in any::<bool>(),
    ) {
        let b = if withhold {
            TaxCalculator::tax_breakdown(sub_total, vat_rate, Some(wht_rate), Some(wht_base))
        } else {
            TaxCalculator::tax_breakdown(sub_total, vat_rate, None, None)
        };

        prop_assert_eq!(b.grand_total, b.sub_total + b.vat_amount);
        if b.has_withholding() {
            prop_assert_eq!(b.net_received, b.grand_total - b.wht_amount);
        } else {
            prop_assert_eq!(b.net_received, b.grand_total);
        }
    }
}
