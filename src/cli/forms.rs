//! Auth and contact CLI commands
//!
//! Passwords left off the command line are read from the terminal without
//! echo.

use clap::{Args, Subcommand, ValueEnum};

use super::{prompt_secret, CliContext, Status};
use crate::error::PupilResult;
use crate::models::{ContactForm, LoginForm, SecretString, Severity, SignupForm};
use crate::services::forms::{social_login_message, SocialProvider};
use crate::services::FormService;

/// Social login providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    Google,
    Facebook,
}

impl From<Provider> for SocialProvider {
    fn from(provider: Provider) -> Self {
        match provider {
            Provider::Google => SocialProvider::Google,
            Provider::Facebook => SocialProvider::Facebook,
        }
    }
}

/// Auth subcommands
#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Sign in to an account
    Login {
        #[arg(short, long, default_value = "")]
        email: String,
        /// Prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,
        #[arg(long)]
        remember_me: bool,
    },
    /// Create an account
    Signup {
        #[arg(short, long, default_value = "")]
        name: String,
        #[arg(short, long, default_value = "")]
        email: String,
        /// Prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,
        /// Prompted for when omitted
        #[arg(long)]
        confirm_password: Option<String>,
        /// Accept the Terms & Conditions
        #[arg(long)]
        agree_terms: bool,
    },
    /// Sign in with a third-party account
    Social {
        #[arg(value_enum)]
        provider: Provider,
    },
}

/// Contact form arguments
#[derive(Args, Debug)]
pub struct ContactArgs {
    #[arg(short, long, default_value = "")]
    pub name: String,
    #[arg(short, long, default_value = "")]
    pub email: String,
    #[arg(short, long, default_value = "")]
    pub subject: String,
    #[arg(short, long, default_value = "")]
    pub message: String,
}

fn secret_or_prompt(value: Option<String>, prompt: &str) -> PupilResult<SecretString> {
    match value {
        Some(value) => Ok(SecretString::new(value)),
        None => prompt_secret(prompt).map(SecretString::new),
    }
}

/// Handle an auth command
pub async fn handle_auth_command(ctx: &CliContext, cmd: AuthCommands) -> PupilResult<Status> {
    let service = FormService::new(ctx.settings.latency);

    match cmd {
        AuthCommands::Login {
            email,
            password,
            remember_me,
        } => {
            let form = LoginForm {
                email,
                password: secret_or_prompt(password, "Password: ")?,
                remember_me,
            };
            let outcome = service
                .submit_login(&form, &ctx.cancel)
                .await
                .map_err(Into::into);
            ctx.emit(outcome)
        }

        AuthCommands::Signup {
            name,
            email,
            password,
            confirm_password,
            agree_terms,
        } => {
            let password = secret_or_prompt(password, "Password: ")?;
            let confirm_password = secret_or_prompt(confirm_password, "Confirm password: ")?;
            let form = SignupForm {
                name,
                email,
                password,
                confirm_password,
                agree_terms,
            };
            let outcome = service
                .submit_signup(&form, &ctx.cancel)
                .await
                .map_err(Into::into);
            ctx.emit(outcome)
        }

        AuthCommands::Social { provider } => {
            ctx.sink
                .notify(&social_login_message(provider.into()), Severity::Info);
            Ok(Status::Success)
        }
    }
}

/// Handle the contact command
pub async fn handle_contact_command(ctx: &CliContext, args: ContactArgs) -> PupilResult<Status> {
    let service = FormService::new(ctx.settings.latency);
    let form = ContactForm {
        name: args.name,
        email: args.email,
        subject: args.subject,
        message: args.message,
    };

    let outcome = service
        .submit_contact(&form, &ctx.cancel)
        .await
        .map_err(Into::into);
    ctx.emit(outcome)
}
