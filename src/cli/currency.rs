//! Currency CLI commands
//!
//! Conversion goes through the tiered rate provider; `rates` lists the
//! built-in fallback table.

use clap::Subcommand;

use super::{CliContext, Status};
use crate::error::{PupilError, PupilResult};
use crate::export::{write_rates, RateRow};
use crate::models::ConversionResult;
use crate::services::validation::{validate, validate_conversion, FieldKind};
use crate::services::{FallbackTable, RateProvider};

/// Currency subcommands
#[derive(Subcommand, Debug)]
pub enum CurrencyCommands {
    /// Convert an amount between two currencies
    Convert {
        /// Amount to convert
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Source currency code (e.g. USD)
        from: String,
        /// Target currency code (e.g. INR)
        to: String,
        /// Skip the live APIs and use the fallback table
        #[arg(long)]
        offline: bool,
    },
    /// Show the fallback rate table
    Rates {
        /// Only show rates from this currency
        #[arg(short, long)]
        from: Option<String>,
    },
}

/// Handle a currency command
pub async fn handle_currency_command(
    ctx: &CliContext,
    cmd: CurrencyCommands,
) -> PupilResult<Status> {
    match cmd {
        CurrencyCommands::Convert {
            amount,
            from,
            to,
            offline,
        } => {
            let mut rate_settings = ctx.settings.rates.clone();
            rate_settings.offline |= offline;
            let provider = RateProvider::from_settings(&rate_settings)?;

            let outcome = async {
                let query = validate_conversion(&amount, &from, &to)?;
                Ok::<_, PupilError>(provider.convert_cancellable(&query, &ctx.cancel).await?)
            }
            .await;

            ctx.emit(outcome)
        }

        CurrencyCommands::Rates { from } => {
            let filter = match from.as_deref() {
                Some(raw) => match validate(FieldKind::Currency, raw) {
                    Ok(parsed) => parsed.as_currency(),
                    Err(err) => return ctx.emit::<ConversionResult>(Err(err.into())),
                },
                None => None,
            };

            let rows: Vec<RateRow> = FallbackTable::standard()
                .entries()
                .into_iter()
                .filter(|(base, _, _)| filter.map_or(true, |f| f == *base))
                .map(RateRow::from)
                .collect();

            ctx.with_writer(|writer| write_rates(&rows, ctx.format, writer))?;
            Ok(Status::Success)
        }
    }
}
