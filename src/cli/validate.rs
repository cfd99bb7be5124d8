//! Field validation CLI command
//!
//! Runs a single validation rule against a value, the way a form field
//! would check it while the user types.

use clap::{Args, ValueEnum};

use super::{CliContext, Status};
use crate::display::{Field, PresentContext, Presentable};
use crate::error::PupilResult;
use crate::services::validation::{validate, FieldKind, ParsedValue};

/// Which rule to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RuleKind {
    Email,
    Password,
    Name,
    Amount,
    Rate,
    Term,
    Weight,
    Height,
    Length,
    Currency,
}

impl RuleKind {
    fn field(self) -> FieldKind<'static> {
        match self {
            Self::Email => FieldKind::Email,
            Self::Password => FieldKind::Password,
            Self::Name => FieldKind::Name,
            Self::Amount => FieldKind::Amount,
            Self::Rate => FieldKind::AnnualRate,
            Self::Term => FieldKind::LoanTerm,
            Self::Weight => FieldKind::Weight,
            Self::Height => FieldKind::Height,
            Self::Length => FieldKind::PasswordLength,
            Self::Currency => FieldKind::Currency,
        }
    }
}

/// Validate arguments
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Rule to apply
    #[arg(value_enum)]
    pub rule: RuleKind,
    /// Value to check
    #[arg(allow_hyphen_values = true)]
    pub value: String,
}

/// A value that passed its rule
#[derive(Debug, Clone)]
pub struct Accepted {
    pub field: &'static str,
    pub value: ParsedValue,
}

impl Presentable for Accepted {
    fn title(&self) -> String {
        "Valid".to_string()
    }

    fn fields(&self, _ctx: &PresentContext) -> Vec<Field> {
        let value = match &self.value {
            ParsedValue::Number(n) => n.to_string(),
            ParsedValue::Count(c) => c.to_string(),
            ParsedValue::Text(t) => t.clone(),
            ParsedValue::Secret(s) => s.to_string(),
            ParsedValue::Currency(c) => c.to_string(),
        };
        vec![Field::new(self.field, value)]
    }
}

/// Handle the validate command
pub fn handle_validate_command(ctx: &CliContext, args: ValidateArgs) -> PupilResult<Status> {
    let field = args.rule.field();
    let outcome = validate(field, &args.value)
        .map(|value| Accepted {
            field: field.label(),
            value,
        })
        .map_err(Into::into);

    ctx.emit(outcome)
}
