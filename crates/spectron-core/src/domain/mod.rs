pub mod errors;

pub use errors::{
    NumericDegeneracy, ParseError, ParseResult, SpectronError, SpectronErrorCategory,
    SpectronResult, ValidationError, ValidationResult,
};

use crate::numerics::units::partition_function;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadKind {
    Spectrum,
    Catalog,
}

impl UploadKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spectrum => "spectrum",
            Self::Catalog => "catalog",
        }
    }
}

impl Display for UploadKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// The user-editable columns of the catalog table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterField {
    Temperature,
    ColumnDensity,
    Doppler,
}

impl ParameterField {
    pub const ALL: [Self; 3] = [Self::Temperature, Self::ColumnDensity, Self::Doppler];

    /// Accepts both the snake_case field names and the table column titles.
    pub fn from_name(name: &str) -> ValidationResult<Self> {
        let normalized = name.trim();
        Self::ALL
            .into_iter()
            .find(|field| {
                normalized.eq_ignore_ascii_case(field.as_str())
                    || normalized.eq_ignore_ascii_case(field.column_title())
            })
            .ok_or_else(|| ValidationError::UnknownField {
                field: normalized.to_string(),
            })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::ColumnDensity => "column_density",
            Self::Doppler => "doppler",
        }
    }

    pub const fn column_title(self) -> &'static str {
        match self {
            Self::Temperature => "Temperature (K)",
            Self::ColumnDensity => "Column Density (cm^-2)",
            Self::Doppler => "Doppler (km/s)",
        }
    }
}

impl Display for ParameterField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Physical parameters of the single-temperature LTE model for one molecule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LteParameters {
    /// Excitation temperature in K.
    pub temperature: f64,
    /// Column density in cm^-2.
    pub column_density: f64,
    /// Doppler linewidth in km/s.
    pub doppler: f64,
}

impl Default for LteParameters {
    fn default() -> Self {
        Self {
            temperature: 300.0,
            column_density: 1.0e15,
            doppler: 5.0,
        }
    }
}

impl LteParameters {
    pub const fn get(&self, field: ParameterField) -> f64 {
        match field {
            ParameterField::Temperature => self.temperature,
            ParameterField::ColumnDensity => self.column_density,
            ParameterField::Doppler => self.doppler,
        }
    }

    pub fn set(&mut self, field: ParameterField, value: f64) -> ValidationResult<()> {
        validate_parameter(field, value)?;
        match field {
            ParameterField::Temperature => self.temperature = value,
            ParameterField::ColumnDensity => self.column_density = value,
            ParameterField::Doppler => self.doppler = value,
        }
        Ok(())
    }

    pub fn validate(&self) -> ValidationResult<()> {
        for field in ParameterField::ALL {
            validate_parameter(field, self.get(field))?;
        }
        Ok(())
    }
}

pub fn validate_parameter(field: ParameterField, value: f64) -> ValidationResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue { field, value })
    }
}

/// An observed spectrum: intensities `y` sampled at frequencies `x` (MHz).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    x: Vec<f64>,
    y: Vec<f64>,
    comment: String,
}

impl Spectrum {
    pub const DEFAULT_COMMENT: &'static str = "Observation";

    pub fn new(x: Vec<f64>, y: Vec<f64>, comment: impl Into<String>) -> ValidationResult<Self> {
        let comment = comment.into();
        let spectrum = Self {
            x,
            y,
            comment: if comment.trim().is_empty() {
                Self::DEFAULT_COMMENT.to_string()
            } else {
                comment
            },
        };
        spectrum.validate()?;
        Ok(spectrum)
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn validate(&self) -> ValidationResult<()> {
        if self.x.len() != self.y.len() {
            return Err(ValidationError::InconsistentLengths {
                entity: format!("spectrum '{}'", self.comment),
                detail: format!("x={}, y={}", self.x.len(), self.y.len()),
            });
        }
        if self.x.is_empty() {
            return Err(ValidationError::EmptyEntity {
                entity: format!("spectrum '{}'", self.comment),
            });
        }
        Ok(())
    }
}

/// A molecular line list together with its LTE simulation parameters.
///
/// The partition function is derived from the state energies and the current
/// temperature; it is cached after the first synthesis and dropped whenever
/// the temperature changes. The cache never leaves memory, so a stored record
/// cannot pin a value that disagrees with its temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    molecule: String,
    /// Transition frequencies in MHz.
    frequency: Vec<f64>,
    /// Linear transition intensities (nm^2 MHz).
    intensity: Vec<f64>,
    /// Upper-state energies in K.
    state_energies: Vec<f64>,
    #[serde(flatten)]
    parameters: LteParameters,
    #[serde(skip)]
    partition_function: Option<f64>,
}

impl Catalog {
    pub fn new(
        molecule: impl Into<String>,
        frequency: Vec<f64>,
        intensity: Vec<f64>,
        state_energies: Vec<f64>,
    ) -> ValidationResult<Self> {
        Self::with_parameters(
            molecule,
            frequency,
            intensity,
            state_energies,
            LteParameters::default(),
        )
    }

    pub fn with_parameters(
        molecule: impl Into<String>,
        frequency: Vec<f64>,
        intensity: Vec<f64>,
        state_energies: Vec<f64>,
        parameters: LteParameters,
    ) -> ValidationResult<Self> {
        let catalog = Self {
            molecule: molecule.into(),
            frequency,
            intensity,
            state_energies,
            parameters,
            partition_function: None,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn molecule(&self) -> &str {
        &self.molecule
    }

    pub fn frequency(&self) -> &[f64] {
        &self.frequency
    }

    pub fn intensity(&self) -> &[f64] {
        &self.intensity
    }

    pub fn state_energies(&self) -> &[f64] {
        &self.state_energies
    }

    pub fn parameters(&self) -> LteParameters {
        self.parameters
    }

    pub fn temperature(&self) -> f64 {
        self.parameters.temperature
    }

    pub fn column_density(&self) -> f64 {
        self.parameters.column_density
    }

    pub fn doppler(&self) -> f64 {
        self.parameters.doppler
    }

    pub fn len(&self) -> usize {
        self.frequency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequency.is_empty()
    }

    /// Updates one editable parameter. Rejected values leave the catalog untouched.
    pub fn set_parameter(&mut self, field: ParameterField, value: f64) -> ValidationResult<()> {
        self.parameters.set(field, value)?;
        if field == ParameterField::Temperature {
            self.partition_function = None;
        }
        Ok(())
    }

    /// The cached partition function, if a synthesis has run at the current temperature.
    pub fn cached_partition_function(&self) -> Option<f64> {
        self.partition_function
    }

    pub fn partition_function(&mut self) -> f64 {
        if let Some(q) = self.partition_function {
            return q;
        }
        let q = partition_function(&self.state_energies, self.parameters.temperature);
        self.partition_function = Some(q);
        q
    }

    pub fn validate(&self) -> ValidationResult<()> {
        if self.frequency.len() != self.intensity.len()
            || self.frequency.len() != self.state_energies.len()
        {
            return Err(ValidationError::InconsistentLengths {
                entity: format!("catalog '{}'", self.molecule),
                detail: format!(
                    "frequency={}, intensity={}, state_energies={}",
                    self.frequency.len(),
                    self.intensity.len(),
                    self.state_energies.len()
                ),
            });
        }
        self.parameters.validate()
    }

    pub fn table_row(&self) -> TableRow {
        TableRow {
            molecule: self.molecule.clone(),
            temperature: self.parameters.temperature,
            column_density: self.parameters.column_density,
            doppler: self.parameters.doppler,
        }
    }
}

/// One `(x, y, label)` trace handed to the plotting layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub label: String,
}

/// One editable row of the catalog table. Line-level arrays are never exposed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub molecule: String,
    pub temperature: f64,
    pub column_density: f64,
    pub doppler: f64,
}

impl TableRow {
    pub fn parameters(&self) -> LteParameters {
        LteParameters {
            temperature: self.temperature,
            column_density: self.column_density,
            doppler: self.doppler,
        }
    }
}

/// The persisted session record: `{spectrum, catalogs}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub spectrum: Option<Spectrum>,
    #[serde(default)]
    pub catalogs: BTreeMap<String, Catalog>,
}

impl SessionState {
    pub fn validate(&self) -> ValidationResult<()> {
        if let Some(spectrum) = &self.spectrum {
            spectrum.validate()?;
        }
        for (key, catalog) in &self.catalogs {
            if key != catalog.molecule() {
                return Err(ValidationError::InconsistentLengths {
                    entity: format!("catalog '{}'", catalog.molecule()),
                    detail: format!("stored under key '{key}'"),
                });
            }
            catalog.validate()?;
        }
        Ok(())
    }
}
