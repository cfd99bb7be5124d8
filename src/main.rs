use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;

use pupil_tools::cli::{
    handle_auth_command, handle_bmi_command, handle_contact_command, handle_currency_command,
    handle_emi_command, handle_file_command, handle_password_command, handle_validate_command,
    CliContext, Status,
};
use pupil_tools::config::settings::LatencySettings;
use pupil_tools::config::{PupilPaths, Settings};
use pupil_tools::display::TerminalSink;
use pupil_tools::export::ExportFormat;
use pupil_tools::services::cancel_pair;

#[derive(Parser)]
#[command(
    name = "pupil",
    version,
    about = "Everyday calculators and converters for the terminal",
    long_about = "PupilTools bundles an EMI loan calculator, a BMI calculator, a password \
                  generator, a currency converter with live and fallback rates, and a few \
                  form and file helpers into one command."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Table, global = true)]
    format: ExportFormat,

    /// Write results to a file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Skip simulated processing delays
    #[arg(long, global = true)]
    no_delay: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the monthly installment of a loan
    Emi(pupil_tools::cli::EmiArgs),

    /// Calculate body mass index
    Bmi(pupil_tools::cli::BmiArgs),

    /// Generate a random password
    #[command(alias = "pw")]
    Password(pupil_tools::cli::PasswordArgs),

    /// Currency conversion commands
    #[command(subcommand, alias = "fx")]
    Currency(pupil_tools::cli::CurrencyCommands),

    /// Check a single value against a validation rule
    Validate(pupil_tools::cli::ValidateArgs),

    /// Account login and signup
    #[command(subcommand)]
    Auth(pupil_tools::cli::AuthCommands),

    /// Send a contact message
    Contact(pupil_tools::cli::ContactArgs),

    /// File conversion helpers
    #[command(subcommand)]
    File(pupil_tools::cli::FileCommands),

    /// Write the default settings file
    Init,

    /// Show current configuration and paths
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    pupil_tools::logging::init(cli.verbose);

    match run(cli).await {
        Ok(status) => ExitCode::from(status.exit_code()),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<Status> {
    let paths = PupilPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    if cli.no_delay {
        settings.latency = LatencySettings::disabled();
    }

    let (handle, token) = cancel_pair();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("interrupt received, cancelling");
            handle.cancel();
        }
    });

    let ctx = CliContext {
        paths,
        settings,
        format: cli.format,
        output: cli.output,
        sink: Arc::new(TerminalSink::stderr()),
        cancel: token,
    };

    let status = match cli.command {
        Some(Commands::Emi(args)) => handle_emi_command(&ctx, args).await?,
        Some(Commands::Bmi(args)) => handle_bmi_command(&ctx, args)?,
        Some(Commands::Password(args)) => handle_password_command(&ctx, args)?,
        Some(Commands::Currency(cmd)) => handle_currency_command(&ctx, cmd).await?,
        Some(Commands::Validate(args)) => handle_validate_command(&ctx, args)?,
        Some(Commands::Auth(cmd)) => handle_auth_command(&ctx, cmd).await?,
        Some(Commands::Contact(args)) => handle_contact_command(&ctx, args).await?,
        Some(Commands::File(cmd)) => handle_file_command(&ctx, cmd).await?,
        Some(Commands::Init) => {
            if ctx.paths.is_initialized() {
                println!(
                    "Settings already exist at: {}",
                    ctx.paths.settings_file().display()
                );
            } else {
                Settings::default()
                    .save(&ctx.paths)
                    .context("failed to write default settings")?;
                println!(
                    "Initialized PupilTools at: {}",
                    ctx.paths.base_dir().display()
                );
            }
            Status::Success
        }
        Some(Commands::Config) => {
            println!("PupilTools Configuration");
            println!("========================");
            println!("Config directory: {}", ctx.paths.base_dir().display());
            println!("Settings file:    {}", ctx.paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("{}", serde_json::to_string_pretty(&ctx.settings)?);
            Status::Success
        }
        None => {
            println!("PupilTools - everyday calculators and converters");
            println!();
            println!("Run 'pupil --help' for usage information.");
            Status::Success
        }
    };

    Ok(status)
}
