//! Unit tests for quote derivation.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use super::calculator::derive_quote;
use super::error::UnderwritingError;
use super::policy::DebtPolicy;
use super::types::{ExpenseSchedule, QuoteFigures, QuoteInputs, annual_unit_rent};

fn sample_expenses() -> ExpenseSchedule {
    ExpenseSchedule {
        marketing: dec!(500),
        taxes: dec!(1000),
        insurance: dec!(300),
        repairs: dec!(200),
        administration: dec!(500),
    }
}

fn sample_inputs() -> QuoteInputs {
    // One unit at $1,000/month against $2,500 of annual expense at a
    // 6.00% cap rate.
    QuoteInputs {
        unit_annual_rents: vec![annual_unit_rent(dec!(1000))],
        annual_expense: sample_expenses().annual_total(),
        cap_rate: dec!(6.00),
    }
}

/// Reference annuity PV, computed independently of the calculator.
fn annuity_pv(annual_payment: Decimal, annual_rate_pct: Decimal, months: u64) -> Decimal {
    let r = annual_rate_pct / dec!(100) / dec!(12);
    let pmt = annual_payment / dec!(12);
    (pmt * (Decimal::ONE - Decimal::ONE / (Decimal::ONE + r).powu(months)) / r).round_dp(2)
}

#[test]
fn test_annual_unit_rent() {
    assert_eq!(annual_unit_rent(dec!(1000)), dec!(12000));
    assert_eq!(annual_unit_rent(dec!(833.33)), dec!(9999.96));
}

#[test]
fn test_expense_schedule_total() {
    assert_eq!(sample_expenses().annual_total(), dec!(2500));
}

#[test]
fn test_worked_scenario() {
    let figures = derive_quote(&sample_inputs(), &DebtPolicy::default()).unwrap();

    assert_eq!(figures.annual_property_rent, dec!(12000));
    assert_eq!(figures.annual_property_expense, dec!(2500));
    assert_eq!(figures.debt_rate, dec!(4.98));
    assert_eq!(figures.noi, dec!(9500));
    assert_eq!(figures.annual_debt_payment, dec!(7600));
    assert_eq!(figures.property_value, dec!(158333.33));
    assert_eq!(figures.dscr_loan_amount, annuity_pv(dec!(7600), dec!(4.98), 120));
    // A 120-month amortization at ~5% supports roughly 7.9x the annual
    // payment, so the DSCR sizing lands well under the cap-rate value.
    assert!(figures.dscr_loan_amount > dec!(59000));
    assert!(figures.dscr_loan_amount < dec!(60500));
    assert_eq!(figures.loan_amount, figures.dscr_loan_amount);
}

#[test]
fn test_loan_amount_takes_property_value_when_lower() {
    // A 50% cap rate pushes the value-based sizing below the DSCR sizing.
    let inputs = QuoteInputs {
        cap_rate: dec!(50.00),
        ..sample_inputs()
    };
    let figures = derive_quote(&inputs, &DebtPolicy::default()).unwrap();

    assert_eq!(figures.property_value, dec!(19000));
    assert!(figures.property_value < figures.dscr_loan_amount);
    assert_eq!(figures.loan_amount, figures.property_value);
}

#[test]
fn test_empty_rent_roll_yields_zero_rent() {
    let inputs = QuoteInputs {
        unit_annual_rents: vec![],
        ..sample_inputs()
    };
    let figures = derive_quote(&inputs, &DebtPolicy::default()).unwrap();

    assert_eq!(figures.annual_property_rent, Decimal::ZERO);
    // NOI goes negative and is not clamped.
    assert_eq!(figures.noi, dec!(-2500));
    assert!(figures.property_value.is_sign_negative());
    assert!(figures.loan_amount.is_sign_negative());
}

#[test]
fn test_zero_cap_rate_fails() {
    let inputs = QuoteInputs {
        cap_rate: Decimal::ZERO,
        ..sample_inputs()
    };
    assert!(matches!(
        derive_quote(&inputs, &DebtPolicy::default()),
        Err(UnderwritingError::ZeroCapRate)
    ));
}

#[test]
fn test_zero_debt_rate_fails() {
    let policy = DebtPolicy {
        index_rate: Decimal::ZERO,
        spread: Decimal::ZERO,
        ..DebtPolicy::default()
    };
    assert!(matches!(
        derive_quote(&sample_inputs(), &policy),
        Err(UnderwritingError::ZeroDebtRate)
    ));
}

#[test]
fn test_zero_dscr_target_fails() {
    let policy = DebtPolicy {
        dscr_target: Decimal::ZERO,
        ..DebtPolicy::default()
    };
    assert!(matches!(
        derive_quote(&sample_inputs(), &policy),
        Err(UnderwritingError::ZeroDscrTarget)
    ));
}

#[test]
fn test_derivation_is_idempotent() {
    let inputs = sample_inputs();
    let policy = DebtPolicy::default();
    let first: QuoteFigures = derive_quote(&inputs, &policy).unwrap();
    let second: QuoteFigures = derive_quote(&inputs, &policy).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_assemble_requires_expenses_and_cap_rate() {
    assert!(matches!(
        QuoteInputs::assemble(vec![], None, Some(dec!(6.00))),
        Err(UnderwritingError::MissingExpenses)
    ));
    assert!(matches!(
        QuoteInputs::assemble(vec![], Some(dec!(2500)), None),
        Err(UnderwritingError::MissingCapRate)
    ));

    let inputs = QuoteInputs::assemble(
        vec![dec!(12000)],
        Some(dec!(2500)),
        Some(dec!(6.00)),
    )
    .unwrap();
    assert_eq!(inputs.cap_rate, dec!(6.00));
}

#[test]
fn test_missing_input_classification() {
    assert!(UnderwritingError::MissingExpenses.is_missing_input());
    assert!(UnderwritingError::MissingCapRate.is_missing_input());
    assert!(!UnderwritingError::ZeroCapRate.is_missing_input());
    assert!(!UnderwritingError::ZeroDebtRate.is_missing_input());
}
