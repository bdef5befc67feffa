//! The per-user working set: one observed spectrum, any number of catalogs,
//! and the rendered series derived from them.

mod persistence;
mod store;

pub use persistence::{SessionStateError, read_session_state, write_session_state};
pub use store::{SessionId, SessionStore, SessionStoreError};

use crate::common::PlotLayout;
use crate::domain::{
    Catalog, LteParameters, ParameterField, ParseResult, PlotSeries, SessionState, Spectrum,
    TableRow, ValidationError, ValidationResult, validate_parameter,
};
use crate::modules::synthesis::{LteGaussianSynthesizer, SpectrumSynthesizer, SynthesisWarning};
use crate::modules::upload::{self, Upload, UploadFile, UploadOutcome};
use serde::Serialize;
use std::collections::BTreeMap;

/// Series plus the transitions that had to be dropped while producing them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderOutput {
    pub series: Vec<PlotSeries>,
    pub warnings: Vec<SynthesisWarning>,
}

/// Plot-ready figure document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<PlotSeries>,
    pub layout: PlotLayout,
}

#[derive(Debug, Clone, PartialEq)]
struct CachedSeries {
    parameters: LteParameters,
    intensities: Vec<f64>,
    warnings: Vec<SynthesisWarning>,
}

#[derive(Debug, Clone)]
pub struct Session<S = LteGaussianSynthesizer> {
    state: SessionState,
    defaults: LteParameters,
    synthesizer: S,
    cache: BTreeMap<String, CachedSeries>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(LteParameters::default())
    }
}

impl Session {
    pub fn new(defaults: LteParameters) -> Self {
        Self::with_synthesizer(defaults, LteGaussianSynthesizer)
    }

    /// Rebuilds a session from a persisted state after validating it.
    pub fn from_state(state: SessionState, defaults: LteParameters) -> ValidationResult<Self> {
        state.validate()?;
        let mut session = Self::new(defaults);
        session.state = state;
        Ok(session)
    }

    pub fn from_json(source: &str, defaults: LteParameters) -> Result<Self, SessionStateError> {
        let state: SessionState =
            serde_json::from_str(source).map_err(|source| SessionStateError::Decode {
                path: None,
                source,
            })?;
        Self::from_state(state, defaults).map_err(|source| SessionStateError::Invalid {
            path: None,
            source,
        })
    }
}

impl<S: SpectrumSynthesizer> Session<S> {
    pub fn with_synthesizer(defaults: LteParameters, synthesizer: S) -> Self {
        Self {
            state: SessionState::default(),
            defaults,
            synthesizer,
            cache: BTreeMap::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn defaults(&self) -> LteParameters {
        self.defaults
    }

    pub fn spectrum(&self) -> Option<&Spectrum> {
        self.state.spectrum.as_ref()
    }

    pub fn catalog(&self, molecule: &str) -> Option<&Catalog> {
        self.state.catalogs.get(molecule)
    }

    /// Molecule names in render order.
    pub fn molecules(&self) -> impl Iterator<Item = &str> {
        self.state.catalogs.keys().map(String::as_str)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.state)
    }

    /// Replaces the observation. Every cached series was evaluated on the old
    /// axis, so the whole cache is dropped.
    pub fn set_spectrum(&mut self, spectrum: Spectrum) {
        tracing::info!(
            comment = spectrum.comment(),
            points = spectrum.len(),
            "observed spectrum replaced"
        );
        self.state.spectrum = Some(spectrum);
        self.cache.clear();
    }

    /// Inserts a catalog, replacing any previous one for the same molecule.
    pub fn upsert_catalog(&mut self, catalog: Catalog) {
        let molecule = catalog.molecule().to_string();
        tracing::info!(
            molecule = %molecule,
            transitions = catalog.len(),
            "catalog installed"
        );
        self.cache.remove(&molecule);
        self.state.catalogs.insert(molecule, catalog);
    }

    pub fn remove_catalog(&mut self, molecule: &str) -> ValidationResult<Catalog> {
        self.cache.remove(molecule);
        let catalog = self
            .state
            .catalogs
            .remove(molecule)
            .ok_or_else(|| ValidationError::UnknownMolecule {
                molecule: molecule.to_string(),
            })?;
        tracing::info!(molecule, "catalog removed");
        Ok(catalog)
    }

    /// Drops the spectrum and every catalog.
    pub fn reset(&mut self) {
        self.state = SessionState::default();
        self.cache.clear();
        tracing::info!("session reset");
    }

    /// Applies one table cell edit. The value is checked before the molecule
    /// lookup, and a rejected edit leaves the session untouched.
    pub fn apply_table_edit(
        &mut self,
        molecule: &str,
        field: ParameterField,
        value: f64,
    ) -> ValidationResult<()> {
        validate_parameter(field, value)?;
        let catalog = self.state.catalogs.get_mut(molecule).ok_or_else(|| {
            ValidationError::UnknownMolecule {
                molecule: molecule.to_string(),
            }
        })?;
        if catalog.parameters().get(field) == value {
            return Ok(());
        }

        catalog.set_parameter(field, value)?;
        self.cache.remove(molecule);
        tracing::info!(molecule, field = field.as_str(), value, "table edit applied");
        Ok(())
    }

    /// [`Self::apply_table_edit`] with the field given by name or column title.
    pub fn edit_parameter(&mut self, molecule: &str, field: &str, value: f64) -> ValidationResult<()> {
        let field = ParameterField::from_name(field)?;
        self.apply_table_edit(molecule, field, value)
    }

    /// Applies a whole edited table. All rows are checked first so that a bad
    /// row rejects the batch without applying any of it.
    pub fn apply_table_rows(&mut self, rows: &[TableRow]) -> ValidationResult<()> {
        for row in rows {
            row.parameters().validate()?;
            if !self.state.catalogs.contains_key(&row.molecule) {
                return Err(ValidationError::UnknownMolecule {
                    molecule: row.molecule.clone(),
                });
            }
        }

        for row in rows {
            let parameters = row.parameters();
            for field in ParameterField::ALL {
                self.apply_table_edit(&row.molecule, field, parameters.get(field))?;
            }
        }
        Ok(())
    }

    pub fn table_rows(&self) -> Vec<TableRow> {
        self.state.catalogs.values().map(Catalog::table_row).collect()
    }

    /// The observation followed by one simulated series per catalog, all on
    /// the observation's axis. Without an observation there is nothing to
    /// evaluate on and the result is empty.
    pub fn render_series(&mut self) -> RenderOutput {
        let Some(spectrum) = self.state.spectrum.as_ref() else {
            return RenderOutput::default();
        };

        let mut output = RenderOutput {
            series: Vec::with_capacity(self.state.catalogs.len() + 1),
            warnings: Vec::new(),
        };
        output.series.push(PlotSeries {
            x: spectrum.x().to_vec(),
            y: spectrum.y().to_vec(),
            label: spectrum.comment().to_string(),
        });

        for (molecule, catalog) in &mut self.state.catalogs {
            let parameters = catalog.parameters();
            let fresh = self
                .cache
                .get(molecule)
                .is_some_and(|cached| cached.parameters == parameters);
            if !fresh {
                catalog.partition_function();
                let result = self.synthesizer.synthesize(catalog, spectrum.x());
                tracing::debug!(
                    molecule = %molecule,
                    partition_function = result.partition_function,
                    dropped = result.warnings.len(),
                    "synthesized catalog"
                );
                self.cache.insert(
                    molecule.clone(),
                    CachedSeries {
                        parameters,
                        intensities: result.intensities,
                        warnings: result.warnings,
                    },
                );
            }

            if let Some(cached) = self.cache.get(molecule) {
                output.series.push(PlotSeries {
                    x: spectrum.x().to_vec(),
                    y: cached.intensities.clone(),
                    label: molecule.clone(),
                });
                output.warnings.extend(cached.warnings.iter().cloned());
            }
        }

        output
    }

    pub fn figure(&mut self, layout: &PlotLayout) -> Figure {
        Figure {
            data: self.render_series().series,
            layout: layout.clone(),
        }
    }

    pub fn upload_spectrum(&mut self, raw: &[u8], filename: &str) -> ParseResult<()> {
        let spectrum = upload::upload_spectrum(raw, filename)?;
        self.set_spectrum(spectrum);
        Ok(())
    }

    pub fn upload_catalog(&mut self, raw: &[u8], filename: &str) -> ParseResult<()> {
        let catalog = upload::upload_catalog(raw, filename, self.defaults)?;
        self.upsert_catalog(catalog);
        Ok(())
    }

    /// Parses a batch of catalogs and installs the ones that parsed. The
    /// outcome list keeps the failures for reporting; successful entries are
    /// moved into the session.
    pub fn upload_catalogs(&mut self, files: &[UploadFile]) -> Vec<UploadOutcome> {
        let outcomes = upload::upload_catalog_batch(files, self.defaults);
        for outcome in &outcomes {
            if let Ok(catalog) = &outcome.result {
                self.upsert_catalog(catalog.clone());
            }
        }
        outcomes
    }

    /// Uploads a file of either kind, choosing the parser from its extension.
    pub fn upload(&mut self, raw: &[u8], filename: &str) -> ParseResult<Upload> {
        let parsed = upload::parse_upload(raw, filename, self.defaults)?;
        match &parsed {
            Upload::Spectrum(spectrum) => self.set_spectrum(spectrum.clone()),
            Upload::Catalog(catalog) => self.upsert_catalog(catalog.clone()),
        }
        Ok(parsed)
    }
}
