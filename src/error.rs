//! Custom error types for PupilTools
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Each engine component has its own error
//! enum; `PupilError` wraps them for the CLI and presentation layers.

use thiserror::Error;

use crate::models::Currency;

/// Field-level validation failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Input could not be parsed as a finite number
    #[error("{field} must be a number (got '{value}')")]
    NotANumber { field: &'static str, value: String },

    /// Parsed number falls outside the documented bound
    #[error("{field} must be {range} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        range: &'static str,
    },

    /// Text does not have the expected shape
    #[error("{message}")]
    InvalidFormat {
        field: &'static str,
        message: &'static str,
    },

    /// Confirmation field differs from its primary field
    #[error("Passwords do not match")]
    Mismatch { field: &'static str },

    /// Text shorter than the minimum length
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    /// Required field left blank
    #[error("{field} is required")]
    Required { field: &'static str },
}

impl ValidationError {
    /// Name of the field that failed
    pub fn field(&self) -> &'static str {
        match self {
            Self::NotANumber { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::InvalidFormat { field, .. }
            | Self::Mismatch { field }
            | Self::TooShort { field, .. }
            | Self::Required { field } => field,
        }
    }
}

/// Calculation engine failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Please select at least one character type!")]
    NoCharsetSelected,
}

/// An async operation was cancelled before it completed
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Operation cancelled")]
pub struct Cancelled;

/// Rate lookup failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RateError {
    /// Transport error, non-success HTTP status or undecodable body
    #[error("Rate lookup failed ({source_name}): {reason}")]
    NetworkFailure {
        source_name: &'static str,
        reason: String,
    },

    /// The response decoded but did not contain a usable rate for the pair
    #[error("Rate for {from} -> {to} missing from {source_name} response")]
    MissingRateInPair {
        source_name: &'static str,
        from: Currency,
        to: Currency,
    },

    /// Every tier failed and the fallback table does not cover the pair
    #[error("No exchange rate available for {from} -> {to}")]
    NoRateAvailable { from: Currency, to: Currency },

    #[error("Currency conversion cancelled")]
    Cancelled,
}

impl From<Cancelled> for RateError {
    fn from(_: Cancelled) -> Self {
        Self::Cancelled
    }
}

/// A validation failure tied to a named form field
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{error}")]
pub struct FieldError {
    pub field: &'static str,
    pub error: ValidationError,
}

impl From<ValidationError> for FieldError {
    fn from(error: ValidationError) -> Self {
        Self {
            field: error.field(),
            error,
        }
    }
}

/// Mocked auth and contact form failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("Please fill all required fields!")]
    MissingFields(Vec<&'static str>),

    #[error("Please agree to the Terms & Conditions!")]
    TermsNotAccepted,

    #[error("Please correct the errors in the form!")]
    Invalid(Vec<FieldError>),

    /// A submission for this form is already in flight
    #[error("A submission is already in progress")]
    Busy,

    #[error("Submission cancelled")]
    Cancelled,
}

impl From<Cancelled> for FormError {
    fn from(_: Cancelled) -> Self {
        Self::Cancelled
    }
}

/// File conversion planning failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("Please select a file first!")]
    NoFileSelected,

    #[error("Unsupported file format '{extension}'! Please select DOC, DOCX, TXT, JPG, PNG, or HTML files.")]
    UnsupportedFormat { extension: String },
}

/// The main error type for PupilTools operations
#[derive(Error, Debug)]
pub enum PupilError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Rate(#[from] RateError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error(transparent)]
    Cancelled(#[from] Cancelled),
}

impl PupilError {
    /// Check if this is a validation error (field or form level)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::Form(FormError::MissingFields(_))
                | Self::Form(FormError::Invalid(_))
                | Self::Form(FormError::TermsNotAccepted)
        )
    }

    /// Check if the operation was cancelled rather than failed
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            Self::Cancelled(_) | Self::Rate(RateError::Cancelled) | Self::Form(FormError::Cancelled)
        )
    }
}

impl From<std::io::Error> for PupilError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PupilError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for PupilTools operations
pub type PupilResult<T> = Result<T, PupilError>;
