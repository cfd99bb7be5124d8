//! EMI and BMI calculations plus numeric display formatting
//!
//! All calculations run at full `f64` precision. Rounding happens only in the
//! `format_*` helpers used by the presentation layer.

use tracing::debug;

use crate::models::{BmiCategory, BmiInput, BmiResult, EmiResult, LoanInput};

/// Compute the equated monthly installment for a validated loan
pub fn compute_emi(loan: &LoanInput) -> EmiResult {
    emi(loan.principal(), loan.annual_rate_percent(), loan.term_years())
}

/// Amortization on raw values
///
/// `annual_rate_percent == 0` is handled explicitly as an interest-free loan
/// (`principal / months`). Callers must pass `term_years > 0`.
///
/// `(1 + r)^n - 1` is evaluated as `expm1(n * ln1p(r))` so rates too small
/// to change `1 + r` still give a finite payment.
pub fn emi(principal: f64, annual_rate_percent: f64, term_years: f64) -> EmiResult {
    let r = annual_rate_percent / 100.0 / 12.0;
    let n = term_years * 12.0;

    let growth_minus_one = (n * r.ln_1p()).exp_m1();
    let interest_free = r == 0.0 || growth_minus_one == 0.0 || !growth_minus_one.is_finite();
    let monthly_payment = if interest_free {
        principal / n
    } else {
        principal * r * (growth_minus_one + 1.0) / growth_minus_one
    };

    // Interest below one ulp of the principal rounds away; never report it negative
    let total_amount = (monthly_payment * n).max(principal);
    let total_interest = total_amount - principal;

    debug!(
        principal,
        annual_rate_percent, term_years, monthly_payment, "computed EMI"
    );

    EmiResult {
        monthly_payment,
        total_amount,
        total_interest,
        months: n,
    }
}

/// Compute BMI and its category
pub fn compute_bmi(input: &BmiInput) -> BmiResult {
    let height_m = input.height_m();
    let bmi = input.weight_kg() / (height_m * height_m);
    let category = BmiCategory::from_bmi(bmi);

    debug!(bmi, ?category, "computed BMI");

    BmiResult { bmi, category }
}

/// Format with a fixed number of decimals
pub fn format_fixed(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

/// Format a monetary amount with two decimals, thousands separators and a symbol
pub fn format_amount(value: f64, symbol: &str) -> String {
    let fixed = format_fixed(value.abs(), 2);
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}{}.{}", sign, symbol, grouped, frac)
}

/// Format an exchange rate with four decimals
pub fn format_rate(rate: f64) -> String {
    format_fixed(rate, 4)
}
