//! Result presentation
//!
//! Turns engine outcomes into a [`RenderPayload`]: a title, labelled fields
//! and a severity. Payloads are plain data, so the same payload can be drawn
//! as a table or exported as JSON, YAML or CSV.

use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::error::{FormError, PupilError, RateError};
use crate::models::{
    BmiResult, ConversionPlan, ConversionResult, EmiResult, GeneratedPassword, Provenance,
    Severity,
};
use crate::services::calculator::{format_amount, format_fixed, format_rate};
use crate::services::converter::format_file_size;
use crate::services::forms::Submitted;

pub const EMI_SUCCESS: &str = "EMI calculation completed successfully!";
pub const CONVERSION_SUCCESS: &str = "Currency conversion completed successfully!";
pub const FALLBACK_WARNING: &str =
    "Using fallback rates (API unavailable). Please check your internet connection.";
pub const CONVERSION_FAILED: &str = "Failed to convert currency. Please try again.";

/// One labelled value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub label: String,
    pub value: String,
}

impl Field {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Everything needed to draw a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderPayload {
    pub title: String,
    pub fields: Vec<Field>,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Display preferences that affect formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentContext {
    pub currency_symbol: String,
}

impl Default for PresentContext {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
        }
    }
}

/// A successful result that can be shown to the user
pub trait Presentable {
    fn title(&self) -> String;

    fn fields(&self, ctx: &PresentContext) -> Vec<Field>;

    fn severity(&self) -> Severity {
        Severity::Success
    }

    /// Extra line shown under the fields
    fn message(&self) -> Option<String> {
        None
    }

    /// Toast raised when this result is shown
    fn notification(&self) -> Option<(String, Severity)> {
        None
    }
}

/// Build the payload for an outcome
pub fn present<T: Presentable>(outcome: &Result<T, PupilError>, ctx: &PresentContext) -> RenderPayload {
    match outcome {
        Ok(value) => RenderPayload {
            title: value.title(),
            fields: value.fields(ctx),
            severity: value.severity(),
            message: value.message(),
        },
        Err(err) => present_error(err),
    }
}

/// Build the payload for a failure
pub fn present_error(err: &PupilError) -> RenderPayload {
    let severity = error_severity(err);
    let fields = match err {
        PupilError::Form(FormError::MissingFields(missing)) => {
            vec![Field::new("Missing", missing.join(", "))]
        }
        PupilError::Form(FormError::Invalid(errors)) => errors
            .iter()
            .map(|e| Field::new(e.field, e.error.to_string()))
            .collect(),
        _ => Vec::new(),
    };

    RenderPayload {
        title: severity.title().to_string(),
        fields,
        severity,
        message: Some(error_message(err)),
    }
}

/// Toast to raise for an outcome, if any
pub fn notification_for<T: Presentable>(
    outcome: &Result<T, PupilError>,
) -> Option<(String, Severity)> {
    match outcome {
        Ok(value) => value.notification(),
        Err(err) => Some((error_message(err), error_severity(err))),
    }
}

fn error_severity(err: &PupilError) -> Severity {
    if err.is_cancelled() {
        Severity::Info
    } else if err.is_validation() {
        Severity::Warning
    } else {
        Severity::Error
    }
}

fn error_message(err: &PupilError) -> String {
    match err {
        PupilError::Rate(RateError::Cancelled) => err.to_string(),
        PupilError::Rate(_) => CONVERSION_FAILED.to_string(),
        _ => err.to_string(),
    }
}

/// Draw a payload as a title line, a two-column table and an optional message
pub fn render_payload(payload: &RenderPayload) -> String {
    let mut output = format!("[{}] {}\n", payload.severity.icon(), payload.title);

    if !payload.fields.is_empty() {
        let mut builder = Builder::default();
        for field in &payload.fields {
            builder.push_record([field.label.clone(), field.value.clone()]);
        }
        let mut table = builder.build();
        table.with(Style::rounded());
        output.push_str(&table.to_string());
        output.push('\n');
    }

    if let Some(message) = &payload.message {
        output.push_str(message);
        output.push('\n');
    }

    output
}

impl Presentable for EmiResult {
    fn title(&self) -> String {
        "EMI Calculation".to_string()
    }

    fn fields(&self, ctx: &PresentContext) -> Vec<Field> {
        let symbol = ctx.currency_symbol.as_str();
        vec![
            Field::new("Monthly EMI", format_amount(self.monthly_payment, symbol)),
            Field::new("Total Amount", format_amount(self.total_amount, symbol)),
            Field::new("Total Interest", format_amount(self.total_interest, symbol)),
        ]
    }

    fn notification(&self) -> Option<(String, Severity)> {
        Some((EMI_SUCCESS.to_string(), Severity::Success))
    }
}

impl Presentable for BmiResult {
    fn title(&self) -> String {
        "BMI Result".to_string()
    }

    fn fields(&self, _ctx: &PresentContext) -> Vec<Field> {
        vec![
            Field::new("Your BMI", format_fixed(self.bmi, 1)),
            Field::new("Category", self.category.to_string()),
        ]
    }
}

impl Presentable for ConversionResult {
    fn title(&self) -> String {
        "Currency Conversion".to_string()
    }

    fn fields(&self, _ctx: &PresentContext) -> Vec<Field> {
        let query = &self.query;
        vec![
            Field::new(
                "Conversion",
                format!(
                    "{} {} = {} {}",
                    format_fixed(query.amount, 2),
                    query.from,
                    format_fixed(self.converted_amount, 2),
                    query.to
                ),
            ),
            Field::new(
                "Exchange Rate",
                format!("1 {} = {} {}", query.from, format_rate(self.rate), query.to),
            ),
            Field::new("Source", self.provenance.label()),
            Field::new(
                "Last updated",
                self.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            ),
        ]
    }

    fn severity(&self) -> Severity {
        match self.provenance {
            Provenance::FallbackTable => Severity::Warning,
            _ => Severity::Success,
        }
    }

    fn notification(&self) -> Option<(String, Severity)> {
        match self.provenance {
            Provenance::Identity => None,
            Provenance::FallbackTable => Some((FALLBACK_WARNING.to_string(), Severity::Warning)),
            Provenance::Live(_) => Some((CONVERSION_SUCCESS.to_string(), Severity::Success)),
        }
    }
}

impl Presentable for GeneratedPassword {
    fn title(&self) -> String {
        "Generated Password".to_string()
    }

    fn fields(&self, _ctx: &PresentContext) -> Vec<Field> {
        vec![
            Field::new("Password", self.password.expose()),
            Field::new("Length", self.password.len().to_string()),
            Field::new("Strength", self.strength().to_string()),
            Field::new("Entropy", format!("{} bits", format_fixed(self.entropy_bits, 1))),
        ]
    }
}

impl Presentable for ConversionPlan {
    fn title(&self) -> String {
        "Conversion Successful!".to_string()
    }

    fn fields(&self, _ctx: &PresentContext) -> Vec<Field> {
        let mut fields = vec![
            Field::new("Original File", self.source.name.clone()),
            Field::new("Size", format_file_size(self.source.size_bytes)),
            Field::new("Type", self.kind.to_string()),
            Field::new("Converted To", "PDF"),
            Field::new("Output File", self.output_name.clone()),
        ];
        if let Some(layout) = &self.layout {
            fields.push(Field::new(
                "Placement",
                format!(
                    "{} x {} mm at ({}, {})",
                    format_fixed(layout.width, 1),
                    format_fixed(layout.height, 1),
                    format_fixed(layout.x, 1),
                    format_fixed(layout.y, 1)
                ),
            ));
        }
        fields
    }
}

impl Presentable for Submitted {
    fn title(&self) -> String {
        self.kind.to_string()
    }

    fn fields(&self, _ctx: &PresentContext) -> Vec<Field> {
        Vec::new()
    }

    fn message(&self) -> Option<String> {
        Some(self.message.to_string())
    }

    fn notification(&self) -> Option<(String, Severity)> {
        Some((self.message.to_string(), Severity::Success))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FieldError, ValidationError};
    use crate::models::{ConversionQuery, Currency, FileInfo, LiveTier, SourceKind};
    use crate::services::calculator::emi;

    fn ctx() -> PresentContext {
        PresentContext::default()
    }

    fn value_of<'a>(payload: &'a RenderPayload, label: &str) -> &'a str {
        payload
            .fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
            .unwrap_or_else(|| panic!("no field {label}"))
    }

    #[test]
    fn test_emi_payload() {
        let outcome: Result<_, PupilError> = Ok(emi(100_000.0, 10.0, 1.0));
        let payload = present(&outcome, &ctx());
        assert_eq!(payload.title, "EMI Calculation");
        assert_eq!(value_of(&payload, "Monthly EMI"), "₹8,791.59");
        assert_eq!(payload.severity, Severity::Success);
        assert_eq!(
            notification_for(&outcome),
            Some((EMI_SUCCESS.to_string(), Severity::Success))
        );
    }

    #[test]
    fn test_bmi_payload_one_decimal() {
        let outcome: Result<_, PupilError> = Ok(BmiResult {
            bmi: 22.857,
            category: crate::models::BmiCategory::Normal,
        });
        let payload = present(&outcome, &ctx());
        assert_eq!(value_of(&payload, "Your BMI"), "22.9");
        assert_eq!(value_of(&payload, "Category"), "Normal weight");
        assert_eq!(notification_for(&outcome), None);
    }

    #[test]
    fn test_fallback_conversion_warns() {
        let query = ConversionQuery::new(100.0, Currency::Usd, Currency::Eur);
        let outcome: Result<_, PupilError> =
            Ok(ConversionResult::new(query, 0.92, Provenance::FallbackTable));
        let payload = present(&outcome, &ctx());
        assert_eq!(value_of(&payload, "Conversion"), "100.00 USD = 92.00 EUR");
        assert_eq!(value_of(&payload, "Exchange Rate"), "1 USD = 0.9200 EUR");
        assert_eq!(value_of(&payload, "Source"), "Fallback table");
        assert_eq!(payload.severity, Severity::Warning);
        assert_eq!(
            notification_for(&outcome),
            Some((FALLBACK_WARNING.to_string(), Severity::Warning))
        );
    }

    #[test]
    fn test_live_conversion_succeeds() {
        let query = ConversionQuery::new(1.0, Currency::Gbp, Currency::Inr);
        let outcome: Result<_, PupilError> = Ok(ConversionResult::new(
            query,
            105.3,
            Provenance::Live(LiveTier::Primary),
        ));
        assert_eq!(
            notification_for(&outcome).map(|(_, s)| s),
            Some(Severity::Success)
        );
    }

    #[test]
    fn test_identity_conversion_is_silent() {
        let query = ConversionQuery::new(10.0, Currency::Usd, Currency::Usd);
        let outcome: Result<_, PupilError> =
            Ok(ConversionResult::new(query, 1.0, Provenance::Identity));
        let payload = present(&outcome, &ctx());
        assert_eq!(value_of(&payload, "Conversion"), "10.00 USD = 10.00 USD");
        assert_eq!(payload.severity, Severity::Success);
        assert_eq!(notification_for(&outcome), None);
    }

    #[test]
    fn test_validation_error_is_warning() {
        let outcome: Result<EmiResult, PupilError> = Err(ValidationError::OutOfRange {
            field: "Interest rate",
            value: 60.0,
            range: "greater than 0 and at most 50",
        }
        .into());
        let payload = present(&outcome, &ctx());
        assert_eq!(payload.severity, Severity::Warning);
        assert_eq!(
            payload.message.as_deref(),
            Some("Interest rate must be greater than 0 and at most 50 (got 60)")
        );
        assert!(payload.fields.is_empty());
    }

    #[test]
    fn test_rate_error_uses_generic_message() {
        let outcome: Result<ConversionResult, PupilError> = Err(RateError::NoRateAvailable {
            from: Currency::Usd,
            to: Currency::Inr,
        }
        .into());
        assert_eq!(
            notification_for(&outcome),
            Some((CONVERSION_FAILED.to_string(), Severity::Error))
        );
    }

    #[test]
    fn test_form_errors_listed_as_fields() {
        let err = PupilError::from(FormError::Invalid(vec![FieldError::from(
            ValidationError::TooShort {
                field: "Password",
                min: 6,
            },
        )]));
        let payload = present_error(&err);
        assert_eq!(payload.message.as_deref(), Some("Please correct the errors in the form!"));
        assert_eq!(
            payload.fields,
            vec![Field::new("Password", "Password must be at least 6 characters")]
        );
    }

    #[test]
    fn test_cancelled_is_info() {
        let outcome: Result<ConversionResult, PupilError> = Err(RateError::Cancelled.into());
        assert_eq!(
            notification_for(&outcome),
            Some(("Currency conversion cancelled".to_string(), Severity::Info))
        );
    }

    #[test]
    fn test_plan_payload() {
        let plan = ConversionPlan {
            source: FileInfo::new("notes.txt", 1536),
            kind: SourceKind::Document,
            output_name: "notes.pdf".into(),
            layout: None,
        };
        let payload = present(&Ok::<_, PupilError>(plan), &ctx());
        assert_eq!(value_of(&payload, "Size"), "1.5 KB");
        assert_eq!(value_of(&payload, "Output File"), "notes.pdf");
    }

    #[test]
    fn test_render_payload_contains_fields() {
        let payload = RenderPayload {
            title: "BMI Result".into(),
            fields: vec![Field::new("Your BMI", "22.9")],
            severity: Severity::Success,
            message: Some("done".into()),
        };
        let rendered = render_payload(&payload);
        assert!(rendered.starts_with("[+] BMI Result\n"));
        assert!(rendered.contains("Your BMI"));
        assert!(rendered.contains("22.9"));
        assert!(rendered.ends_with("done\n"));
    }
}
