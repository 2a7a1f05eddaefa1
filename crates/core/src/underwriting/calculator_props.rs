//! Property-based tests for quote derivation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::calculator::derive_quote;
use super::policy::DebtPolicy;
use super::types::{ExpenseSchedule, QuoteInputs, annual_unit_rent};

/// Strategy for a monthly rent between $0.01 and $50,000.00.
fn monthly_rent() -> impl Strategy<Value = Decimal> {
    (1i64..5_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for a non-negative expense category up to $1,000,000.00.
fn expense_amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for a cap rate between 0.01% and 20.00%.
fn cap_rate() -> impl Strategy<Value = Decimal> {
    (1i64..2_000i64).prop_map(|bps_hundredths| Decimal::new(bps_hundredths, 2))
}

fn expense_schedule() -> impl Strategy<Value = ExpenseSchedule> {
    (
        expense_amount(),
        expense_amount(),
        expense_amount(),
        expense_amount(),
        expense_amount(),
    )
        .prop_map(
            |(marketing, taxes, insurance, repairs, administration)| ExpenseSchedule {
                marketing,
                taxes,
                insurance,
                repairs,
                administration,
            },
        )
}

fn quote_inputs() -> impl Strategy<Value = QuoteInputs> {
    (
        prop::collection::vec(monthly_rent(), 0..8),
        expense_schedule(),
        cap_rate(),
    )
        .prop_map(|(rents, expenses, cap_rate)| QuoteInputs {
            unit_annual_rents: rents.into_iter().map(annual_unit_rent).collect(),
            annual_expense: expenses.annual_total(),
            cap_rate,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Deriving twice from unchanged inputs yields identical figures.
    #[test]
    fn prop_derivation_idempotent(inputs in quote_inputs()) {
        let policy = DebtPolicy::default();
        let first = derive_quote(&inputs, &policy).unwrap();
        let second = derive_quote(&inputs, &policy).unwrap();
        prop_assert_eq!(first, second);
    }

    /// The underwritten loan is always the lesser of the two sizings.
    #[test]
    fn prop_loan_is_min_of_sizings(inputs in quote_inputs()) {
        let figures = derive_quote(&inputs, &DebtPolicy::default()).unwrap();
        prop_assert_eq!(
            figures.loan_amount,
            figures.property_value.min(figures.dscr_loan_amount)
        );
    }

    /// NOI is exactly rent minus expense, never clamped.
    #[test]
    fn prop_noi_is_rent_minus_expense(inputs in quote_inputs()) {
        let figures = derive_quote(&inputs, &DebtPolicy::default()).unwrap();
        prop_assert_eq!(
            figures.noi,
            figures.annual_property_rent - figures.annual_property_expense
        );
    }

    /// Raising any unit's rent never lowers NOI, value, or loan amount.
    #[test]
    fn prop_rent_increase_is_monotone(
        inputs in quote_inputs(),
        extra in 1i64..1_000_000i64,
        slot in any::<prop::sample::Index>(),
    ) {
        let policy = DebtPolicy::default();
        let base = derive_quote(&inputs, &policy).unwrap();

        let mut raised = inputs.clone();
        let bump = annual_unit_rent(Decimal::new(extra, 2));
        if raised.unit_annual_rents.is_empty() {
            raised.unit_annual_rents.push(bump);
        } else {
            let i = slot.index(raised.unit_annual_rents.len());
            raised.unit_annual_rents[i] += bump;
        }
        let raised = derive_quote(&raised, &policy).unwrap();

        prop_assert!(raised.noi >= base.noi);
        prop_assert!(raised.property_value >= base.property_value);
        prop_assert!(raised.dscr_loan_amount >= base.dscr_loan_amount);
        prop_assert!(raised.loan_amount >= base.loan_amount);
    }

    /// The expense total is the sum of its five categories.
    #[test]
    fn prop_expense_total_is_category_sum(expenses in expense_schedule()) {
        prop_assert_eq!(
            expenses.annual_total(),
            expenses.marketing
                + expenses.taxes
                + expenses.insurance
                + expenses.repairs
                + expenses.administration
        );
    }

    /// Annualized rent is exactly twelve monthly payments.
    #[test]
    fn prop_annual_rent_is_twelve_months(rent in monthly_rent()) {
        prop_assert_eq!(annual_unit_rent(rent), rent * Decimal::from(12));
    }
}
