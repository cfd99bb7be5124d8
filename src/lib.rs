//! PupilTools - terminal multi-tool for everyday calculations
//!
//! This library provides the calculation engine behind the `pupil` command:
//! an EMI loan calculator, a BMI calculator, a password generator, a
//! currency converter with live and fallback exchange rates, field
//! validation, mocked account forms and PDF conversion planning.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Value objects consumed and produced by the engine
//! - `services`: Calculation engine, rate lookup and async task helpers
//! - `display`: Result presentation and notification sinks
//! - `export`: Table, JSON, YAML and CSV output
//! - `cli`: Command handlers for the `pupil` binary
//! - `logging`: `tracing` subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use pupil_tools::services::{calculator::compute_emi, validation::validate_loan};
//!
//! let loan = validate_loan("100000", "10", "1")?;
//! let result = compute_emi(&loan);
//! println!("{:.2}", result.monthly_payment);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;

pub use error::{PupilError, PupilResult};
