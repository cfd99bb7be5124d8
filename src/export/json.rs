//! JSON Export functionality
//!
//! Wraps a payload or the fallback rate table in a versioned envelope.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::display::RenderPayload;
use crate::error::{PupilError, PupilResult};
use crate::models::Currency;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Envelope around exported data
#[derive(Debug, Clone, Serialize)]
pub struct Export<T> {
    /// Schema version for compatibility checking
    pub schema_version: &'static str,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: &'static str,

    pub data: T,
}

impl<T: Serialize> Export<T> {
    pub fn new(data: T) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION"),
            data,
        }
    }
}

/// One row of the rate table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateRow {
    pub from: Currency,
    pub to: Currency,
    pub rate: f64,
}

impl From<(Currency, Currency, f64)> for RateRow {
    fn from((from, to, rate): (Currency, Currency, f64)) -> Self {
        Self { from, to, rate }
    }
}

/// Export a render payload as pretty JSON
pub fn export_payload_json<W: Write + ?Sized>(payload: &RenderPayload, writer: &mut W) -> PupilResult<()> {
    write_json(&Export::new(payload), writer)
}

/// Export rate rows as pretty JSON
pub fn export_rates_json<W: Write + ?Sized>(rows: &[RateRow], writer: &mut W) -> PupilResult<()> {
    write_json(&Export::new(rows), writer)
}

fn write_json<T: Serialize, W: Write + ?Sized>(value: &T, writer: &mut W) -> PupilResult<()> {
    serde_json::to_writer_pretty(&mut *writer, value)
        .map_err(|e| PupilError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| PupilError::Export(e.to_string()))?;
    Ok(())
}
