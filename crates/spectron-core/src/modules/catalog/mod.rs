//! Fixed-width molecular line catalogs (JPL/CDMS `.cat` layout).
//!
//! Columns, in order: frequency (MHz), uncertainty, log10 intensity, degrees of
//! freedom, lower-state energy (cm^-1), upper-state degeneracy, species tag,
//! quantum-number format code, then quantum numbers. Only frequency,
//! intensity, and lower-state energy feed the LTE model.

mod parser;

use crate::common::constants::BOLTZMANN_WAVENUMBER;
use crate::domain::{Catalog, LteParameters, ParseError, ParseResult, UploadKind};
use crate::modules::helpers::file_stem_label;
use crate::numerics::mhz_to_wavenumber;

pub const CATALOG_COLUMN_COUNT: usize = 14;
pub const CATALOG_COLUMN_WIDTHS: [usize; CATALOG_COLUMN_COUNT] =
    [13, 8, 8, 2, 10, 3, 7, 4, 2, 2, 2, 8, 2, 2];
/// Shortest accepted record; shorter non-blank lines are malformed.
pub const CATALOG_MIN_LINE_WIDTH: usize = 75;

/// Parses catalog text into a [`Catalog`] named after `filename`, carrying `parameters`.
pub fn parse_catalog(
    source: &str,
    filename: &str,
    parameters: LteParameters,
) -> ParseResult<Catalog> {
    let molecule = file_stem_label(filename);
    let invalid = |source| ParseError::InvalidCatalog {
        name: molecule.to_string(),
        source,
    };
    parameters.validate().map_err(invalid)?;
    let records = parser::parse_records(source, molecule)?;
    if records.is_empty() {
        return Err(ParseError::EmptyInput {
            name: molecule.to_string(),
            kind: UploadKind::Catalog,
        });
    }

    let mut frequency = Vec::with_capacity(records.len());
    let mut intensity = Vec::with_capacity(records.len());
    let mut state_energies = Vec::with_capacity(records.len());
    for record in &records {
        frequency.push(record.frequency);
        intensity.push(10.0_f64.powf(record.log_intensity));
        state_energies.push(upper_state_energy(record.frequency, record.lower_energy));
    }

    let catalog = Catalog::with_parameters(
        molecule,
        frequency,
        intensity,
        state_energies,
        parameters,
    )
    .map_err(invalid)?;

    tracing::debug!(
        molecule = catalog.molecule(),
        transitions = catalog.len(),
        "parsed line catalog"
    );
    Ok(catalog)
}

/// Upper-state energy in K from the transition frequency (MHz) and the
/// lower-state energy (cm^-1).
pub fn upper_state_energy(frequency: f64, lower_energy: f64) -> f64 {
    (mhz_to_wavenumber(frequency) + lower_energy) / BOLTZMANN_WAVENUMBER
}
