//! Property tests over the advance installment arithmetic

use payroll_service::{monthly_deduction, net_salary, MAX_REPAYMENT_MONTHS};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

proptest! {
    #[test]
    fn installments_reconstruct_the_amount_within_rounding_tolerance(
        amount_cents in 1i64..5_000_000,
        months in 1u32..=MAX_REPAYMENT_MONTHS,
    ) {
        let amount = Decimal::new(amount_cents, 2);
        let installment = monthly_deduction(amount, months, 2);

        // One rounding unit of slack per installment
        let tolerance = dec!(0.01) * Decimal::from(months);
        let drift = (installment * Decimal::from(months) - amount).abs();
        prop_assert!(
            drift <= tolerance,
            "drift {} exceeds tolerance {} for {} over {} months",
            drift, tolerance, amount, months
        );
    }

    #[test]
    fn single_month_advances_repay_in_one_exact_installment(
        amount_cents in 1i64..5_000_000,
    ) {
        let amount = Decimal::new(amount_cents, 2);
        prop_assert_eq!(monthly_deduction(amount, 1, 2), amount);
    }

    #[test]
    fn net_salary_is_linear_in_its_inputs(
        base in 0i64..2_000_000,
        bonuses in 0i64..200_000,
        advances in 0i64..200_000,
        deductions in 0i64..200_000,
    ) {
        let net = net_salary(
            Decimal::new(base, 2),
            Decimal::new(bonuses, 2),
            Decimal::new(advances, 2),
            Decimal::new(deductions, 2),
        );
        prop_assert_eq!(
            net,
            Decimal::new(base + bonuses - advances - deductions, 2)
        );
    }
}
