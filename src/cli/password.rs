//! Password generator CLI command

use clap::Args;

use super::{CliContext, Status};
use crate::error::{PupilError, PupilResult};
use crate::models::{CharClass, CharsetFlags, PasswordSpec};
use crate::services::generate_password;
use crate::services::validation::{validate, FieldKind};

/// Password generator arguments
#[derive(Args, Debug)]
pub struct PasswordArgs {
    /// Password length (4-64); defaults to the configured length
    #[arg(short, long)]
    pub length: Option<String>,

    /// Leave out uppercase letters
    #[arg(long)]
    pub no_upper: bool,

    /// Leave out lowercase letters
    #[arg(long)]
    pub no_lower: bool,

    /// Leave out digits
    #[arg(long)]
    pub no_digits: bool,

    /// Leave out symbols
    #[arg(long)]
    pub no_symbols: bool,
}

impl PasswordArgs {
    fn charsets(&self) -> CharsetFlags {
        [
            (CharClass::Upper, self.no_upper),
            (CharClass::Lower, self.no_lower),
            (CharClass::Digit, self.no_digits),
            (CharClass::Symbol, self.no_symbols),
        ]
        .into_iter()
        .filter(|(_, excluded)| !excluded)
        .map(|(class, _)| class)
        .collect()
    }
}

/// Handle the password command
pub fn handle_password_command(ctx: &CliContext, args: PasswordArgs) -> PupilResult<Status> {
    let outcome = (|| {
        let length = match &args.length {
            Some(raw) => validate(FieldKind::PasswordLength, raw)?
                .as_count()
                .unwrap_or(ctx.settings.password.default_length),
            None => ctx.settings.password.default_length,
        };
        let spec = PasswordSpec::new(length, args.charsets());
        Ok::<_, PupilError>(generate_password(&spec)?)
    })();

    ctx.emit(outcome)
}
