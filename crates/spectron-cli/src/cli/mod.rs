mod commands;
mod helpers;

use clap::Parser;
use spectron_core::domain::SpectronError;
use std::path::PathBuf;

pub fn run_from_env() -> i32 {
    match parse_and_dispatch(std::env::args().collect()) {
        Ok(code) => code,
        Err(error) => {
            let error = error.as_spectron_error();
            eprintln!("{}", error.diagnostic_line());
            error.exit_code()
        }
    }
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => dispatch_parsed(cli),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "spectron",
    version,
    about = "Overlay LTE synthetic spectra on an observed spectrum"
)]
struct Cli {
    /// JSON configuration with LTE defaults and plot layout
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Upload spectrum and catalog files into a session
    Upload(commands::UploadArgs),
    /// Edit one parameter of a loaded catalog
    Edit(commands::EditArgs),
    /// Render the observation and every simulated series
    Render(commands::RenderArgs),
    /// Print or export the parameter table
    Table(commands::TableArgs),
    /// Remove a catalog from the session
    Remove(commands::RemoveArgs),
    /// Clear the session
    Reset(commands::StateArgs),
}

fn dispatch_parsed(cli: Cli) -> Result<i32, CliError> {
    let config = helpers::load_cli_config(cli.config.as_deref())?;
    match cli.command {
        CliCommand::Upload(args) => commands::run_upload_command(args, &config),
        CliCommand::Edit(args) => commands::run_edit_command(args, &config),
        CliCommand::Render(args) => commands::run_render_command(args, &config),
        CliCommand::Table(args) => commands::run_table_command(args, &config),
        CliCommand::Remove(args) => commands::run_remove_command(args, &config),
        CliCommand::Reset(args) => commands::run_reset_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(SpectronError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn compute(error: impl Into<SpectronError>) -> Self {
        Self::Compute(error.into())
    }

    fn as_spectron_error(&self) -> SpectronError {
        match self {
            Self::Usage(message) => {
                SpectronError::input_validation("INPUT.CLI_USAGE", message.trim_end())
            }
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => SpectronError::io_system("IO.CLI", format!("{error:#}")),
        }
    }
}
