//! Export module for PupilTools
//!
//! Writes results in the format picked on the command line:
//! - Table: human readable, drawn with `tabled`
//! - JSON: machine readable, versioned envelope
//! - YAML: human readable, versioned envelope
//! - CSV: spreadsheet friendly rows

pub mod csv;
pub mod json;
pub mod yaml;

use std::io::Write;

use clap::ValueEnum;

use crate::display::{render_payload, RenderPayload};
use crate::error::{PupilError, PupilResult};

pub use self::csv::{export_payload_csv, export_rates_csv};
pub use self::json::{export_payload_json, export_rates_json, Export, RateRow, EXPORT_SCHEMA_VERSION};
pub use self::yaml::{export_payload_yaml, export_rates_yaml};

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Table,
    Json,
    Yaml,
    Csv,
}

/// Write a payload in the chosen format
pub fn write_payload<W: Write + ?Sized>(
    payload: &RenderPayload,
    format: ExportFormat,
    writer: &mut W,
) -> PupilResult<()> {
    match format {
        ExportFormat::Table => write!(writer, "{}", render_payload(payload))
            .map_err(|e| PupilError::Export(e.to_string())),
        ExportFormat::Json => export_payload_json(payload, writer),
        ExportFormat::Yaml => export_payload_yaml(payload, writer),
        ExportFormat::Csv => export_payload_csv(payload, writer),
    }
}

/// Write rate rows in the chosen format
pub fn write_rates<W: Write + ?Sized>(
    rows: &[RateRow],
    format: ExportFormat,
    writer: &mut W,
) -> PupilResult<()> {
    match format {
        ExportFormat::Table => {
            let mut builder = tabled::builder::Builder::default();
            builder.push_record(["From".to_string(), "To".to_string(), "Rate".to_string()]);
            for row in rows {
                builder.push_record([
                    row.from.to_string(),
                    row.to.to_string(),
                    crate::services::format_rate(row.rate),
                ]);
            }
            let mut table = builder.build();
            table.with(tabled::settings::Style::rounded());
            writeln!(writer, "{}", table).map_err(|e| PupilError::Export(e.to_string()))
        }
        ExportFormat::Json => export_rates_json(rows, writer),
        ExportFormat::Yaml => export_rates_yaml(rows, writer),
        ExportFormat::Csv => export_rates_csv(rows, writer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Currency, Severity};

    #[test]
    fn test_table_payload() {
        let payload = RenderPayload {
            title: "Error".into(),
            fields: Vec::new(),
            severity: Severity::Error,
            message: Some("Please select a file first!".into()),
        };
        let mut buf = Vec::new();
        write_payload(&payload, ExportFormat::Table, &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "[x] Error\nPlease select a file first!\n"
        );
    }

    #[test]
    fn test_table_rates_use_four_decimals() {
        let rows = vec![RateRow::from((Currency::Usd, Currency::Eur, 0.92))];
        let mut buf = Vec::new();
        write_rates(&rows, ExportFormat::Table, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("0.9200"));
        assert!(text.contains("EUR"));
    }
}
