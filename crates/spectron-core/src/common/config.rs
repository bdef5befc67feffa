//! Runtime configuration: LTE defaults for newly uploaded catalogs and the
//! plot layout handed to the presentation layer.
//!
//! Every field is optional in the JSON file; missing values fall back to the
//! built-in defaults.

use crate::domain::{LteParameters, SpectronError, ValidationError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectronConfig {
    pub defaults: LteParameters,
    pub layout: PlotLayout,
}

impl SpectronConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.defaults.validate()
    }
}

/// Plotly-shaped figure layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotLayout {
    pub xaxis: AxisLayout,
    pub yaxis: AxisLayout,
    pub hovermode: String,
    pub legend: LegendLayout,
}

impl Default for PlotLayout {
    fn default() -> Self {
        Self {
            xaxis: AxisLayout::titled("Frequency (MHz)"),
            yaxis: AxisLayout::titled("Flux (Jy/beam)"),
            hovermode: "closest".to_string(),
            legend: LegendLayout::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisLayout {
    pub title: String,
    pub tickformat: String,
}

impl AxisLayout {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

impl Default for AxisLayout {
    fn default() -> Self {
        Self {
            title: String::new(),
            tickformat: ".,".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendLayout {
    pub x: f64,
    pub y: f64,
}

impl Default for LegendLayout {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse configuration '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("configuration '{}' has invalid defaults: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl From<ConfigError> for SpectronError {
    fn from(error: ConfigError) -> Self {
        match &error {
            ConfigError::Read { .. } => Self::io_system("IO.CONFIG_READ", error.to_string()),
            ConfigError::Parse { .. } | ConfigError::Invalid { .. } => {
                Self::input_validation("INPUT.CONFIG", error.to_string())
            }
        }
    }
}

pub fn parse_config(source: &str) -> Result<SpectronConfig, serde_json::Error> {
    serde_json::from_str(source)
}

pub fn load_config(config_path: impl AsRef<Path>) -> Result<SpectronConfig, ConfigError> {
    let config_path = config_path.as_ref();
    let source = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
        path: config_path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&source).map_err(|source| ConfigError::Parse {
        path: config_path.to_path_buf(),
        source,
    })?;
    config.validate().map_err(|source| ConfigError::Invalid {
        path: config_path.to_path_buf(),
        source,
    })?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, SpectronConfig, load_config, parse_config};
    use crate::domain::{LteParameters, SpectronError};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn empty_document_uses_builtin_defaults() {
        let config = parse_config("{}").expect("empty config should parse");
        assert_eq!(config, SpectronConfig::default());
        assert_eq!(config.defaults, LteParameters::default());
        assert_eq!(config.layout.xaxis.title, "Frequency (MHz)");
        assert_eq!(config.layout.yaxis.title, "Flux (Jy/beam)");
        assert_eq!(config.layout.hovermode, "closest");
    }

    #[test]
    fn partial_defaults_override_only_named_fields() {
        let config = parse_config(r#"{ "defaults": { "temperature": 150.0 } }"#)
            .expect("partial config should parse");
        assert_eq!(config.defaults.temperature, 150.0);
        assert_eq!(config.defaults.column_density, 1.0e15);
        assert_eq!(config.defaults.doppler, 5.0);
    }

    #[test]
    fn load_rejects_non_positive_defaults() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("spectron.json");
        fs::write(&path, r#"{ "defaults": { "doppler": 0.0 } }"#).expect("config written");

        let error = load_config(&path).expect_err("zero doppler should be rejected");
        assert!(matches!(error, ConfigError::Invalid { .. }));
    }

    #[test]
    fn load_reports_missing_files() {
        let temp = TempDir::new().expect("tempdir should be created");
        let error = load_config(temp.path().join("missing.json"))
            .expect_err("missing config should fail");
        assert!(matches!(error, ConfigError::Read { .. }));
        assert_eq!(SpectronError::from(error).exit_code(), 3);
    }
}
