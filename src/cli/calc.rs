//! EMI and BMI CLI commands

use clap::Args;

use super::{CliContext, Status};
use crate::error::{PupilError, PupilResult};
use crate::services::task::simulated_delay;
use crate::services::validation::{validate_bmi, validate_loan};
use crate::services::{compute_bmi, compute_emi};

/// EMI calculator arguments
#[derive(Args, Debug)]
pub struct EmiArgs {
    /// Loan amount
    #[arg(allow_hyphen_values = true)]
    pub principal: String,
    /// Annual interest rate in percent (0-50]
    #[arg(allow_hyphen_values = true)]
    pub rate: String,
    /// Loan term in years (0-30]
    #[arg(allow_hyphen_values = true)]
    pub years: String,
}

/// BMI calculator arguments
#[derive(Args, Debug)]
pub struct BmiArgs {
    /// Weight in kilograms
    #[arg(allow_hyphen_values = true)]
    pub weight: String,
    /// Height in centimetres
    #[arg(allow_hyphen_values = true)]
    pub height: String,
}

/// Handle the emi command
pub async fn handle_emi_command(ctx: &CliContext, args: EmiArgs) -> PupilResult<Status> {
    let outcome = async {
        let loan = validate_loan(&args.principal, &args.rate, &args.years)?;
        simulated_delay(ctx.settings.latency.emi(), &ctx.cancel).await?;
        Ok::<_, PupilError>(compute_emi(&loan))
    }
    .await;

    ctx.emit(outcome)
}

/// Handle the bmi command
pub fn handle_bmi_command(ctx: &CliContext, args: BmiArgs) -> PupilResult<Status> {
    let outcome = validate_bmi(&args.weight, &args.height)
        .map(|input| compute_bmi(&input))
        .map_err(Into::into);

    ctx.emit(outcome)
}
