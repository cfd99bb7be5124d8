//! Loan model for the EMI calculator

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Highest accepted annual interest rate, in percent
pub const MAX_ANNUAL_RATE_PERCENT: f64 = 50.0;

/// Longest accepted loan term, in years
pub const MAX_TERM_YEARS: f64 = 30.0;

/// A validated loan request
///
/// Fields are private so a `LoanInput` can only be obtained through
/// [`LoanInput::new`], which enforces every bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoanInput {
    principal: f64,
    annual_rate_percent: f64,
    term_years: f64,
}

impl LoanInput {
    /// Create a loan input, checking `principal > 0`, `0 < rate <= 50`
    /// and `0 < term <= 30`
    pub fn new(
        principal: f64,
        annual_rate_percent: f64,
        term_years: f64,
    ) -> Result<Self, ValidationError> {
        if !(principal.is_finite() && principal > 0.0) {
            return Err(ValidationError::OutOfRange {
                field: "Loan amount",
                value: principal,
                range: "greater than 0",
            });
        }
        if !(annual_rate_percent > 0.0 && annual_rate_percent <= MAX_ANNUAL_RATE_PERCENT) {
            return Err(ValidationError::OutOfRange {
                field: "Interest rate",
                value: annual_rate_percent,
                range: "greater than 0 and at most 50",
            });
        }
        if !(term_years > 0.0 && term_years <= MAX_TERM_YEARS) {
            return Err(ValidationError::OutOfRange {
                field: "Loan term",
                value: term_years,
                range: "greater than 0 and at most 30",
            });
        }

        Ok(Self {
            principal,
            annual_rate_percent,
            term_years,
        })
    }

    pub fn principal(&self) -> f64 {
        self.principal
    }

    pub fn annual_rate_percent(&self) -> f64 {
        self.annual_rate_percent
    }

    pub fn term_years(&self) -> f64 {
        self.term_years
    }
}

/// Result of an EMI calculation, kept at full precision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmiResult {
    /// Fixed monthly installment
    pub monthly_payment: f64,
    /// Sum of all installments
    pub total_amount: f64,
    /// `total_amount - principal`
    pub total_interest: f64,
    /// Number of monthly installments
    pub months: f64,
}
