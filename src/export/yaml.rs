//! YAML Export functionality

use serde::Serialize;
use std::io::Write;

use super::json::{Export, RateRow};
use crate::display::RenderPayload;
use crate::error::{PupilError, PupilResult};

/// Export a render payload as YAML
pub fn export_payload_yaml<W: Write + ?Sized>(payload: &RenderPayload, writer: &mut W) -> PupilResult<()> {
    write_yaml(&Export::new(payload), writer)
}

/// Export rate rows as YAML
pub fn export_rates_yaml<W: Write + ?Sized>(rows: &[RateRow], writer: &mut W) -> PupilResult<()> {
    write_yaml(&Export::new(rows), writer)
}

fn write_yaml<T: Serialize, W: Write + ?Sized>(export: &Export<T>, writer: &mut W) -> PupilResult<()> {
    writeln!(writer, "# PupilTools export")
        .and_then(|_| writeln!(writer, "# Generated: {}", export.exported_at))
        .map_err(|e| PupilError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export).map_err(|e| PupilError::Export(e.to_string()))?;

    Ok(())
}
