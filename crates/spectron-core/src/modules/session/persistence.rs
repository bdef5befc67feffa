use crate::domain::{SessionState, SpectronError, ValidationError};
use crate::modules::serialization::write_text_artifact;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum SessionStateError {
    #[error("failed to read session state '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write session state '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to encode session state: {source}")]
    Encode { source: serde_json::Error },
    #[error("failed to decode session state{}: {source}", describe(.path.as_deref()))]
    Decode {
        path: Option<PathBuf>,
        source: serde_json::Error,
    },
    #[error("session state{} is inconsistent: {source}", describe(.path.as_deref()))]
    Invalid {
        path: Option<PathBuf>,
        source: ValidationError,
    },
}

fn describe(path: Option<&Path>) -> String {
    path.map(|path| format!(" '{}'", path.display()))
        .unwrap_or_default()
}

impl From<SessionStateError> for SpectronError {
    fn from(error: SessionStateError) -> Self {
        match &error {
            SessionStateError::Read { .. } => Self::io_system("IO.SESSION_READ", error.to_string()),
            SessionStateError::Write { .. } => {
                Self::io_system("IO.SESSION_WRITE", error.to_string())
            }
            SessionStateError::Encode { .. } => {
                Self::internal("INTERNAL.SESSION_ENCODE", error.to_string())
            }
            SessionStateError::Decode { .. } | SessionStateError::Invalid { .. } => {
                Self::input_validation("INPUT.SESSION_STATE", error.to_string())
            }
        }
    }
}

/// Loads and validates a persisted session state.
pub fn read_session_state(path: impl AsRef<Path>) -> Result<SessionState, SessionStateError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| SessionStateError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let state: SessionState =
        serde_json::from_str(&source).map_err(|source| SessionStateError::Decode {
            path: Some(path.to_path_buf()),
            source,
        })?;
    state.validate().map_err(|source| SessionStateError::Invalid {
        path: Some(path.to_path_buf()),
        source,
    })?;
    Ok(state)
}

pub fn write_session_state(
    path: impl AsRef<Path>,
    state: &SessionState,
) -> Result<(), SessionStateError> {
    let path = path.as_ref();
    let encoded =
        serde_json::to_string_pretty(state).map_err(|source| SessionStateError::Encode { source })?;
    write_text_artifact(path, &encoded).map_err(|source| SessionStateError::Write {
        path: path.to_path_buf(),
        source,
    })
}
