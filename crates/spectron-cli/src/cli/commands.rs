use super::CliError;
use super::helpers::{load_session, read_upload_file, save_session, write_output};
use spectron_core::common::SpectronConfig;
use spectron_core::domain::UploadKind;
use spectron_core::modules::serialization::{render_series_table, render_table_csv};
use spectron_core::modules::{Session, UploadFile, classify_upload};
use std::path::PathBuf;

#[derive(clap::Args)]
pub(super) struct StateArgs {
    /// Session state file (JSON); created on first write
    #[arg(long, value_name = "PATH")]
    state: PathBuf,
}

#[derive(clap::Args)]
pub(super) struct UploadArgs {
    #[command(flatten)]
    session: StateArgs,

    /// Spectrum (.txt, .dat, .tsv, .csv, .spec) or catalog (.cat) files
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,
}

#[derive(clap::Args)]
pub(super) struct EditArgs {
    #[command(flatten)]
    session: StateArgs,

    /// Molecule name as shown in the table
    molecule: String,

    /// temperature, column_density, or doppler (column titles are accepted too)
    field: String,

    #[arg(allow_negative_numbers = true)]
    value: f64,
}

#[derive(clap::Args)]
pub(super) struct RenderArgs {
    #[command(flatten)]
    session: StateArgs,

    /// Write the figure JSON here instead of stdout
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Also write the series as a tab-separated table
    #[arg(long, value_name = "PATH")]
    table: Option<PathBuf>,
}

#[derive(clap::Args)]
pub(super) struct TableArgs {
    #[command(flatten)]
    session: StateArgs,

    /// Write the table as CSV here instead of stdout
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,
}

#[derive(clap::Args)]
pub(super) struct RemoveArgs {
    #[command(flatten)]
    session: StateArgs,

    molecule: String,
}

pub(super) fn run_upload_command(
    args: UploadArgs,
    config: &SpectronConfig,
) -> Result<i32, CliError> {
    let mut session = load_session(&args.session.state, config)?;
    let mut catalogs = Vec::new();
    let mut failures = 0;

    for path in &args.files {
        let file = match read_upload_file(path) {
            Ok(file) => file,
            Err(error) => {
                eprintln!("{}", error.as_spectron_error().diagnostic_line());
                failures += 1;
                continue;
            }
        };
        match classify_upload(&file.filename) {
            Ok(UploadKind::Catalog) => catalogs.push(file),
            Ok(UploadKind::Spectrum) => {
                failures += install_spectrum(&mut session, &file);
            }
            Err(error) => {
                eprintln!("{}", CliError::compute(error).as_spectron_error().diagnostic_line());
                failures += 1;
            }
        }
    }

    for outcome in session.upload_catalogs(&catalogs) {
        match outcome.result {
            Ok(catalog) => println!(
                "Loaded catalog '{}' ({} transitions).",
                catalog.molecule(),
                catalog.len()
            ),
            Err(error) => {
                eprintln!("{}", CliError::compute(error).as_spectron_error().diagnostic_line());
                failures += 1;
            }
        }
    }

    save_session(&args.session.state, &session)?;
    if failures == 0 { Ok(0) } else { Ok(2) }
}

fn install_spectrum(session: &mut Session, file: &UploadFile) -> usize {
    match session.upload_spectrum(&file.contents, &file.filename) {
        Ok(()) => {
            if let Some(spectrum) = session.spectrum() {
                println!(
                    "Loaded spectrum '{}' ({} points).",
                    spectrum.comment(),
                    spectrum.len()
                );
            }
            0
        }
        Err(error) => {
            eprintln!("{}", CliError::compute(error).as_spectron_error().diagnostic_line());
            1
        }
    }
}

pub(super) fn run_edit_command(args: EditArgs, config: &SpectronConfig) -> Result<i32, CliError> {
    let mut session = load_session(&args.session.state, config)?;
    session
        .edit_parameter(&args.molecule, &args.field, args.value)
        .map_err(CliError::compute)?;
    save_session(&args.session.state, &session)?;
    println!(
        "Set {} of '{}' to {}.",
        args.field.trim(),
        args.molecule,
        args.value
    );
    Ok(0)
}

pub(super) fn run_render_command(
    args: RenderArgs,
    config: &SpectronConfig,
) -> Result<i32, CliError> {
    let mut session = load_session(&args.session.state, config)?;
    let rendered = session.render_series();
    for warning in &rendered.warnings {
        eprintln!("WARNING: {warning}");
    }

    if let Some(path) = &args.table {
        let table = render_series_table(&rendered.series).map_err(CliError::compute)?;
        write_output(path, &table)?;
    }

    let figure = session.figure(&config.layout);
    let encoded = serde_json::to_string_pretty(&figure)
        .map_err(|error| CliError::Internal(error.into()))?;
    match &args.output {
        Some(path) => {
            write_output(path, &encoded)?;
            println!(
                "Rendered {} series to {}.",
                figure.data.len(),
                path.display()
            );
        }
        None => println!("{encoded}"),
    }

    save_session(&args.session.state, &session)?;
    Ok(0)
}

pub(super) fn run_table_command(args: TableArgs, config: &SpectronConfig) -> Result<i32, CliError> {
    let session = load_session(&args.session.state, config)?;
    let csv = render_table_csv(&session.table_rows());
    match &args.csv {
        Some(path) => write_output(path, &csv)?,
        None => print!("{csv}"),
    }
    Ok(0)
}

pub(super) fn run_remove_command(
    args: RemoveArgs,
    config: &SpectronConfig,
) -> Result<i32, CliError> {
    let mut session = load_session(&args.session.state, config)?;
    session
        .remove_catalog(&args.molecule)
        .map_err(CliError::compute)?;
    save_session(&args.session.state, &session)?;
    println!("Removed catalog '{}'.", args.molecule);
    Ok(0)
}

/// Overwrites the state file without reading it, so a corrupt session can be recovered.
pub(super) fn run_reset_command(args: StateArgs) -> Result<i32, CliError> {
    save_session(&args.state, &Session::default())?;
    println!("Session reset.");
    Ok(0)
}
