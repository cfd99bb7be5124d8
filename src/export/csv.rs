//! CSV Export functionality
//!
//! Payloads become `Field,Value` rows; the rate table becomes `From,To,Rate`.

use std::io::Write;

use super::json::RateRow;
use crate::display::RenderPayload;
use crate::error::{PupilError, PupilResult};

fn export_err(e: impl std::fmt::Display) -> PupilError {
    PupilError::Export(e.to_string())
}

/// Export a render payload's fields to CSV
pub fn export_payload_csv<W: Write + ?Sized>(payload: &RenderPayload, writer: &mut W) -> PupilResult<()> {
    let mut csv = ::csv::Writer::from_writer(writer);
    csv.write_record(["Field", "Value"]).map_err(export_err)?;
    for field in &payload.fields {
        csv.write_record([field.label.as_str(), field.value.as_str()])
            .map_err(export_err)?;
    }
    if let Some(message) = &payload.message {
        csv.write_record(["Message", message.as_str()])
            .map_err(export_err)?;
    }
    csv.flush().map_err(export_err)?;
    Ok(())
}

/// Export rate rows to CSV
pub fn export_rates_csv<W: Write + ?Sized>(rows: &[RateRow], writer: &mut W) -> PupilResult<()> {
    let mut csv = ::csv::Writer::from_writer(writer);
    csv.write_record(["From", "To", "Rate"]).map_err(export_err)?;
    for row in rows {
        csv.write_record([
            row.from.code().to_string(),
            row.to.code().to_string(),
            row.rate.to_string(),
        ])
        .map_err(export_err)?;
    }
    csv.flush().map_err(export_err)?;
    Ok(())
}
