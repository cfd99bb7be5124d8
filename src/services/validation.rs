//! Field validation rules
//!
//! Each rule turns raw text into a parsed value or a [`ValidationError`].
//! Rules are pure: surfacing a failure is the caller's job.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;
use crate::models::{BmiInput, ConversionQuery, Currency, LoanInput, SecretString};

/// Shortest password the generator will produce
pub const MIN_GENERATED_LENGTH: usize = 4;

/// Longest password the generator will produce
pub const MAX_GENERATED_LENGTH: usize = 64;

/// Minimum length of an account password
pub const MIN_ACCOUNT_PASSWORD: usize = 6;

/// Minimum length of a person's name
pub const MIN_NAME_LENGTH: usize = 2;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// The kind of field being validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind<'a> {
    LoanPrincipal,
    AnnualRate,
    LoanTerm,
    Weight,
    Height,
    Amount,
    PasswordLength,
    /// Image compression quality, in percent
    Quality,
    Email,
    /// Account password
    Password,
    /// Must equal the primary password
    PasswordConfirmation { primary: &'a str },
    Name,
    Currency,
    /// Any non-blank text, labelled for error messages
    Required(&'static str),
}

impl FieldKind<'_> {
    /// Label used in error messages
    pub fn label(&self) -> &'static str {
        match self {
            Self::LoanPrincipal => "Loan amount",
            Self::AnnualRate => "Interest rate",
            Self::LoanTerm => "Loan term",
            Self::Weight => "Weight",
            Self::Height => "Height",
            Self::Amount => "Amount",
            Self::PasswordLength => "Password length",
            Self::Quality => "Quality",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::PasswordConfirmation { .. } => "Confirm password",
            Self::Name => "Name",
            Self::Currency => "Currency",
            Self::Required(label) => *label,
        }
    }
}

/// A successfully parsed field value
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedValue {
    Number(f64),
    Count(usize),
    Text(String),
    Secret(SecretString),
    Currency(Currency),
}

impl ParsedValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Count(c) => Some(*c as f64),
            _ => None,
        }
    }

    pub fn as_count(&self) -> Option<usize> {
        match self {
            Self::Count(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Secret(s) => Some(s.expose()),
            _ => None,
        }
    }

    pub fn as_currency(&self) -> Option<Currency> {
        match self {
            Self::Currency(c) => Some(*c),
            _ => None,
        }
    }
}

/// Validate one raw field value
pub fn validate(field: FieldKind<'_>, raw: &str) -> Result<ParsedValue, ValidationError> {
    let label = field.label();

    match field {
        FieldKind::LoanPrincipal | FieldKind::Weight | FieldKind::Height | FieldKind::Amount => {
            let value = parse_number(label, raw)?;
            check_range(label, value, value > 0.0, "greater than 0")?;
            Ok(ParsedValue::Number(value))
        }
        FieldKind::AnnualRate => {
            let value = parse_number(label, raw)?;
            check_range(
                label,
                value,
                value > 0.0 && value <= 50.0,
                "greater than 0 and at most 50",
            )?;
            Ok(ParsedValue::Number(value))
        }
        FieldKind::LoanTerm => {
            let value = parse_number(label, raw)?;
            check_range(
                label,
                value,
                value > 0.0 && value <= 30.0,
                "greater than 0 and at most 30",
            )?;
            Ok(ParsedValue::Number(value))
        }
        FieldKind::PasswordLength => {
            let count = parse_count(label, raw)?;
            check_range(
                label,
                count as f64,
                (MIN_GENERATED_LENGTH..=MAX_GENERATED_LENGTH).contains(&count),
                "between 4 and 64",
            )?;
            Ok(ParsedValue::Count(count))
        }
        FieldKind::Quality => {
            let count = parse_count(label, raw)?;
            check_range(
                label,
                count as f64,
                (1..=100).contains(&count),
                "between 1 and 100",
            )?;
            Ok(ParsedValue::Count(count))
        }
        FieldKind::Email => {
            let value = raw.trim();
            if !EMAIL_RE.is_match(value) {
                return Err(ValidationError::InvalidFormat {
                    field: label,
                    message: "Please enter a valid email address",
                });
            }
            Ok(ParsedValue::Text(value.to_string()))
        }
        FieldKind::Password => {
            let value = raw.trim();
            check_length(label, value, MIN_ACCOUNT_PASSWORD)?;
            Ok(ParsedValue::Secret(SecretString::new(value)))
        }
        FieldKind::PasswordConfirmation { primary } => {
            let value = raw.trim();
            if value != primary.trim() {
                return Err(ValidationError::Mismatch { field: label });
            }
            Ok(ParsedValue::Secret(SecretString::new(value)))
        }
        FieldKind::Name => {
            let value = raw.trim();
            check_length(label, value, MIN_NAME_LENGTH)?;
            Ok(ParsedValue::Text(value.to_string()))
        }
        FieldKind::Currency => Currency::parse(raw)
            .map(ParsedValue::Currency)
            .ok_or(ValidationError::InvalidFormat {
                field: label,
                message: "Unsupported currency code (use USD, EUR, GBP, JPY, CAD, AUD, CHF, CNY or INR)",
            }),
        FieldKind::Required(_) => {
            let value = raw.trim();
            if value.is_empty() {
                return Err(ValidationError::Required { field: label });
            }
            Ok(ParsedValue::Text(value.to_string()))
        }
    }
}

/// Validate the three EMI inputs together
pub fn validate_loan(principal: &str, rate: &str, term: &str) -> Result<LoanInput, ValidationError> {
    let principal = number(FieldKind::LoanPrincipal, principal)?;
    let rate = number(FieldKind::AnnualRate, rate)?;
    let term = number(FieldKind::LoanTerm, term)?;
    LoanInput::new(principal, rate, term)
}

/// Validate BMI weight (kg) and height (cm)
pub fn validate_bmi(weight_kg: &str, height_cm: &str) -> Result<BmiInput, ValidationError> {
    let weight = number(FieldKind::Weight, weight_kg)?;
    let height = number(FieldKind::Height, height_cm)?;
    BmiInput::new(weight, height)
}

/// Validate a currency conversion request
pub fn validate_conversion(
    amount: &str,
    from: &str,
    to: &str,
) -> Result<ConversionQuery, ValidationError> {
    let amount = number(FieldKind::Amount, amount)?;
    let from = currency(from)?;
    let to = currency(to)?;
    Ok(ConversionQuery::new(amount, from, to))
}

/// Check an email address without keeping the parsed value
pub fn is_valid_email(raw: &str) -> bool {
    validate(FieldKind::Email, raw).is_ok()
}

fn number(field: FieldKind<'_>, raw: &str) -> Result<f64, ValidationError> {
    validate(field, raw)?
        .as_number()
        .ok_or_else(|| ValidationError::NotANumber {
            field: field.label(),
            value: raw.trim().to_string(),
        })
}

fn currency(raw: &str) -> Result<Currency, ValidationError> {
    validate(FieldKind::Currency, raw)?
        .as_currency()
        .ok_or(ValidationError::InvalidFormat {
            field: "Currency",
            message: "Unsupported currency code",
        })
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::NotANumber {
            field,
            value: trimmed.to_string(),
        }),
    }
}

fn parse_count(field: &'static str, raw: &str) -> Result<usize, ValidationError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<usize>()
        .map_err(|_| ValidationError::NotANumber {
            field,
            value: trimmed.to_string(),
        })
}

fn check_range(
    field: &'static str,
    value: f64,
    in_range: bool,
    range: &'static str,
) -> Result<(), ValidationError> {
    if in_range {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange { field, value, range })
    }
}

fn check_length(field: &'static str, value: &str, min: usize) -> Result<(), ValidationError> {
    if value.chars().count() < min {
        return Err(ValidationError::TooShort { field, min });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_rule() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("  first.last@example.org "));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("ab.co"));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("a@@b.co"));
    }

    #[test]
    fn test_email_error_kind() {
        assert!(matches!(
            validate(FieldKind::Email, "nobody"),
            Err(ValidationError::InvalidFormat { field: "Email", .. })
        ));
    }

    #[test]
    fn test_not_a_number() {
        let err = validate(FieldKind::Amount, "12abc").unwrap_err();
        assert_eq!(
            err,
            ValidationError::NotANumber {
                field: "Amount",
                value: "12abc".into()
            }
        );
        assert!(matches!(
            validate(FieldKind::Weight, "NaN"),
            Err(ValidationError::NotANumber { .. })
        ));
        assert!(matches!(
            validate(FieldKind::Height, "inf"),
            Err(ValidationError::NotANumber { .. })
        ));
    }

    #[test]
    fn test_rate_bounds() {
        assert_eq!(
            validate(FieldKind::AnnualRate, "50").unwrap(),
            ParsedValue::Number(50.0)
        );
        assert!(matches!(
            validate(FieldKind::AnnualRate, "50.5"),
            Err(ValidationError::OutOfRange { field: "Interest rate", .. })
        ));
        assert!(matches!(
            validate(FieldKind::AnnualRate, "0"),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_term_bounds() {
        assert!(validate(FieldKind::LoanTerm, "30").is_ok());
        assert!(validate(FieldKind::LoanTerm, "31").is_err());
    }

    #[test]
    fn test_password_length_bounds() {
        assert_eq!(
            validate(FieldKind::PasswordLength, "12").unwrap().as_count(),
            Some(12)
        );
        assert!(matches!(
            validate(FieldKind::PasswordLength, "3"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            validate(FieldKind::PasswordLength, "12.5"),
            Err(ValidationError::NotANumber { .. })
        ));
    }

    #[test]
    fn test_password_confirmation() {
        assert!(validate(FieldKind::PasswordConfirmation { primary: "secret1" }, "secret1").is_ok());
        assert_eq!(
            validate(FieldKind::PasswordConfirmation { primary: "secret1" }, "secret2"),
            Err(ValidationError::Mismatch { field: "Confirm password" })
        );
    }

    #[test]
    fn test_password_and_name_length() {
        assert_eq!(
            validate(FieldKind::Password, "12345"),
            Err(ValidationError::TooShort { field: "Password", min: 6 })
        );
        assert!(validate(FieldKind::Password, "123456").is_ok());
        assert!(validate(FieldKind::Name, " A ").is_err());
        assert_eq!(
            validate(FieldKind::Name, " Al ").unwrap().as_text(),
            Some("Al")
        );
    }

    #[test]
    fn test_required() {
        assert_eq!(
            validate(FieldKind::Required("Subject"), "   "),
            Err(ValidationError::Required { field: "Subject" })
        );
    }

    #[test]
    fn test_currency_rule() {
        assert_eq!(
            validate(FieldKind::Currency, "eur").unwrap().as_currency(),
            Some(Currency::Eur)
        );
        assert!(validate(FieldKind::Currency, "BTC").is_err());
    }

    #[test]
    fn test_validate_loan() {
        let loan = validate_loan("100000", "10", "5").unwrap();
        assert_eq!(loan.principal(), 100_000.0);

        assert!(matches!(
            validate_loan("100000", "abc", "5"),
            Err(ValidationError::NotANumber { field: "Interest rate", .. })
        ));
        assert!(matches!(
            validate_loan("-5", "10", "5"),
            Err(ValidationError::OutOfRange { field: "Loan amount", .. })
        ));
    }

    #[test]
    fn test_validate_conversion() {
        let query = validate_conversion("10", "usd", "INR").unwrap();
        assert_eq!(query.from, Currency::Usd);
        assert_eq!(query.to, Currency::Inr);
        assert!(validate_conversion("0", "USD", "INR").is_err());
    }
}
