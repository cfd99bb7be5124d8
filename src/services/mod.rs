//! Service layer for PupilTools
//!
//! The service layer holds the calculation engine: validation rules, the
//! EMI/BMI calculators, password generation, exchange-rate lookup, the mocked
//! form flows and PDF conversion planning.

pub mod calculator;
pub mod converter;
pub mod forms;
pub mod password;
pub mod rates;
pub mod task;
pub mod validation;

pub use calculator::{compute_bmi, compute_emi, format_amount, format_fixed, format_rate};
pub use converter::FileConverter;
pub use forms::FormService;
pub use password::generate_password;
pub use rates::{FallbackTable, RateProvider, RateSource};
pub use task::{cancel_pair, CancelHandle, CancelToken, InFlight};
