//! Core data models for PupilTools
//!
//! Value objects consumed and produced by the calculation engine: loan and
//! BMI inputs/results, password specs, currency queries, notifications,
//! form inputs and file conversion plans.

pub mod bmi;
pub mod currency;
pub mod file;
pub mod forms;
pub mod loan;
pub mod notification;
pub mod password;

pub use bmi::{BmiCategory, BmiInput, BmiResult};
pub use currency::{ConversionQuery, ConversionResult, Currency, LiveTier, Provenance};
pub use file::{ConversionPlan, FileInfo, PageLayout, SourceKind};
pub use forms::{ContactForm, LoginForm, SignupForm};
pub use loan::{EmiResult, LoanInput};
pub use notification::{NotificationEvent, NotificationId, Severity};
pub use password::{
    CharClass, CharsetFlags, GeneratedPassword, PasswordSpec, PasswordStrength, SecretString,
};
