use super::CliError;
use anyhow::Context;
use spectron_core::common::{SpectronConfig, load_config};
use spectron_core::modules::serialization::write_text_artifact;
use spectron_core::modules::{Session, UploadFile, read_session_state, write_session_state};
use std::fs;
use std::path::Path;

pub(super) fn load_cli_config(path: Option<&Path>) -> Result<SpectronConfig, CliError> {
    match path {
        Some(path) => load_config(path).map_err(CliError::compute),
        None => Ok(SpectronConfig::default()),
    }
}

/// Opens the session stored at `path`, or a fresh one when nothing has been
/// saved there yet.
pub(super) fn load_session(path: &Path, config: &SpectronConfig) -> Result<Session, CliError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "starting a new session");
        return Ok(Session::new(config.defaults));
    }

    let state = read_session_state(path).map_err(CliError::compute)?;
    Session::from_state(state, config.defaults).map_err(CliError::compute)
}

pub(super) fn save_session(path: &Path, session: &Session) -> Result<(), CliError> {
    write_session_state(path, session.state()).map_err(CliError::compute)
}

pub(super) fn read_upload_file(path: &Path) -> Result<UploadFile, CliError> {
    let contents = fs::read(path)
        .with_context(|| format!("failed to read upload '{}'", path.display()))?;
    Ok(UploadFile::new(path.to_string_lossy(), contents))
}

pub(super) fn write_output(path: &Path, content: &str) -> Result<(), CliError> {
    write_text_artifact(path, content)
        .with_context(|| format!("failed to write '{}'", path.display()))?;
    Ok(())
}
