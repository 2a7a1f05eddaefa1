//! The quote derivation calculation.

use rust_decimal::{Decimal, MathematicalOps};

use super::error::UnderwritingError;
use super::policy::DebtPolicy;
use super::types::{QuoteFigures, QuoteInputs};

/// Decimal places carried by currency figures.
const CURRENCY_DP: u32 = 2;
/// Decimal places carried by rates.
const RATE_DP: u32 = 4;

/// Derives the full quote snapshot from a property's inputs.
///
/// Pure and deterministic: identical inputs always produce identical
/// figures. Internal arithmetic runs at full decimal precision; only the
/// output fields are rounded.
///
/// # Errors
///
/// Returns `ZeroCapRate`, `ZeroDebtRate`, or `ZeroDscrTarget` when the
/// corresponding divisor is zero. No stored state is touched on error.
pub fn derive_quote(
    inputs: &QuoteInputs,
    policy: &DebtPolicy,
) -> Result<QuoteFigures, UnderwritingError> {
    let twelve = Decimal::from(12);

    let annual_property_rent: Decimal = inputs.unit_annual_rents.iter().copied().sum();
    let annual_property_expense = inputs.annual_expense;
    let debt_rate = policy.debt_rate();

    let noi = annual_property_rent - annual_property_expense;

    if policy.dscr_target.is_zero() {
        return Err(UnderwritingError::ZeroDscrTarget);
    }
    let annual_debt_payment = noi / policy.dscr_target;

    if inputs.cap_rate.is_zero() {
        return Err(UnderwritingError::ZeroCapRate);
    }
    let property_value = noi / (inputs.cap_rate / Decimal::ONE_HUNDRED);

    if debt_rate.is_zero() {
        return Err(UnderwritingError::ZeroDebtRate);
    }

    // Present value of an annuity of annual_debt_payment/12 per month at
    // the monthly debt rate over the amortization horizon:
    //   pmt * (1 - (1 + r)^-n) / r
    let monthly_rate = debt_rate / Decimal::ONE_HUNDRED / twelve;
    let monthly_payment = annual_debt_payment / twelve;
    let discount = Decimal::ONE / (Decimal::ONE + monthly_rate).powu(u64::from(policy.amortization_months));
    let dscr_loan_amount = monthly_payment * (Decimal::ONE - discount) / monthly_rate;

    // Round before taking the minimum so the stored loan amount equals the
    // minimum of the stored sizing figures exactly.
    let property_value = property_value.round_dp(CURRENCY_DP);
    let dscr_loan_amount = dscr_loan_amount.round_dp(CURRENCY_DP);
    let loan_amount = property_value.min(dscr_loan_amount);

    Ok(QuoteFigures {
        annual_property_rent: annual_property_rent.round_dp(CURRENCY_DP),
        annual_property_expense: annual_property_expense.round_dp(CURRENCY_DP),
        debt_rate: debt_rate.round_dp(RATE_DP),
        noi: noi.round_dp(CURRENCY_DP),
        annual_debt_payment: annual_debt_payment.round_dp(CURRENCY_DP),
        property_value,
        dscr_loan_amount,
        loan_amount,
    })
}
