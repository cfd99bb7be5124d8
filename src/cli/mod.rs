//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the service layer. Every handler ends by
//! handing its outcome to [`CliContext::emit`], which prints the payload and
//! raises the matching notification.

pub mod calc;
pub mod currency;
pub mod file;
pub mod forms;
pub mod password;
pub mod validate;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::config::{PupilPaths, Settings};
use crate::display::{notification_for, present, NotificationSink, PresentContext, Presentable};
use crate::error::{PupilError, PupilResult};
use crate::export::{write_payload, ExportFormat};
use crate::services::CancelToken;

pub use calc::{handle_bmi_command, handle_emi_command, BmiArgs, EmiArgs};
pub use currency::{handle_currency_command, CurrencyCommands};
pub use file::{handle_file_command, FileCommands};
pub use forms::{handle_auth_command, handle_contact_command, AuthCommands, ContactArgs};
pub use password::{handle_password_command, PasswordArgs};
pub use validate::{handle_validate_command, ValidateArgs};

/// How a command finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    /// The outcome was an error; it has already been reported
    Failed,
    Cancelled,
}

impl Status {
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failed => 1,
            Self::Cancelled => 130,
        }
    }
}

/// Shared state for one CLI invocation
pub struct CliContext {
    pub paths: PupilPaths,
    pub settings: Settings,
    pub format: ExportFormat,
    pub output: Option<PathBuf>,
    pub sink: Arc<dyn NotificationSink>,
    pub cancel: CancelToken,
}

impl CliContext {
    pub fn present_context(&self) -> PresentContext {
        PresentContext {
            currency_symbol: self.settings.currency_symbol.clone(),
        }
    }

    /// Print the payload for `outcome` and raise its notification
    pub fn emit<T: Presentable>(&self, outcome: PupilResult<T>) -> PupilResult<Status> {
        let payload = present(&outcome, &self.present_context());

        // In table mode an error without details is fully covered by its notification
        let print = match (&outcome, self.format) {
            (Err(_), ExportFormat::Table) => !payload.fields.is_empty(),
            _ => true,
        };
        if print {
            self.with_writer(|writer| write_payload(&payload, self.format, writer))?;
        }

        if let Some((message, severity)) = notification_for(&outcome) {
            self.sink.notify(&message, severity);
        }

        Ok(match outcome {
            Ok(_) => Status::Success,
            Err(err) if err.is_cancelled() => Status::Cancelled,
            Err(err) => {
                debug!(error = %err, "command failed");
                Status::Failed
            }
        })
    }

    /// Run `f` against the output file, or stdout when none was given
    pub fn with_writer<F>(&self, f: F) -> PupilResult<()>
    where
        F: FnOnce(&mut dyn Write) -> PupilResult<()>,
    {
        match &self.output {
            Some(path) => {
                let file = File::create(path).map_err(|e| {
                    PupilError::Io(format!("Failed to create {}: {}", path.display(), e))
                })?;
                let mut writer = BufWriter::new(file);
                f(&mut writer)?;
                writer.flush()?;
            }
            None => {
                let stdout = io::stdout();
                let mut writer = stdout.lock();
                f(&mut writer)?;
                writer.flush()?;
            }
        }
        Ok(())
    }
}

/// Prompt for a secret on the terminal without echo
pub fn prompt_secret(prompt: &str) -> PupilResult<String> {
    rpassword::prompt_password(prompt)
        .map_err(|e| PupilError::Io(format!("Failed to read password: {}", e)))
}
