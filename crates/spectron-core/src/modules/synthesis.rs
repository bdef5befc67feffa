//! Single-temperature LTE synthesis of a catalog onto a frequency axis.
//!
//! Per transition `i` at temperature `T`:
//!
//! ```text
//! Q        = sum_j exp(-E_j / T)
//! S_i      = I2S(I_i, Q, nu_i, E_i, T)
//! flux_i   = N2flux(N, S_i, nu_i, Q, E_i, T)
//! sigma_i  = dop2freq(v, nu_i)
//! y(x)     = sum_i flux_i / sqrt(2 pi^2 sigma_i) * exp(-(x - nu_i)^2 / (2 sigma_i^2))
//! ```
//!
//! Transitions whose contribution cannot be evaluated are dropped and
//! reported as [`SynthesisWarning`]s; they never abort the spectrum.

use crate::domain::{Catalog, NumericDegeneracy};
use crate::numerics::{
    column_density_to_flux, compensated_sum, dop2freq, gaussian, gaussian_amplitude_for_flux,
    intensity_to_line_strength, partition_function,
};

pub trait SpectrumSynthesizer {
    fn synthesize(&self, catalog: &Catalog, axis: &[f64]) -> SynthesisResult;
}

#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisResult {
    /// Simulated intensity at every axis point, same length and order as the axis.
    pub intensities: Vec<f64>,
    pub partition_function: f64,
    pub warnings: Vec<SynthesisWarning>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisWarning {
    pub molecule: String,
    /// Index of the dropped transition within the catalog.
    pub transition: usize,
    pub frequency: f64,
    pub degeneracy: NumericDegeneracy,
}

impl std::fmt::Display for SynthesisWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: transition {} at {} MHz dropped: {}",
            self.molecule, self.transition, self.frequency, self.degeneracy
        )
    }
}

/// A resolved Gaussian line ready for evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineProfile {
    pub center: f64,
    pub sigma: f64,
    pub amplitude: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LteGaussianSynthesizer;

impl SpectrumSynthesizer for LteGaussianSynthesizer {
    fn synthesize(&self, catalog: &Catalog, axis: &[f64]) -> SynthesisResult {
        let q = catalog
            .cached_partition_function()
            .unwrap_or_else(|| partition_function(catalog.state_energies(), catalog.temperature()));
        let (profiles, warnings) = line_profiles(catalog, q);

        for warning in &warnings {
            tracing::warn!(
                molecule = %warning.molecule,
                transition = warning.transition,
                frequency = warning.frequency,
                "{}",
                warning.degeneracy
            );
        }

        SynthesisResult {
            intensities: evaluate_profiles(&profiles, axis),
            partition_function: q,
            warnings,
        }
    }
}

/// Resolves every transition of `catalog` into a [`LineProfile`] using the
/// partition function `q`. Degenerate transitions are returned as warnings.
pub fn line_profiles(catalog: &Catalog, q: f64) -> (Vec<LineProfile>, Vec<SynthesisWarning>) {
    let temperature = catalog.temperature();
    let mut profiles = Vec::with_capacity(catalog.len());
    let mut warnings = Vec::new();

    let transitions = catalog
        .frequency()
        .iter()
        .zip(catalog.intensity())
        .zip(catalog.state_energies())
        .enumerate();
    for (index, ((&frequency, &intensity), &upper_energy)) in transitions {
        let profile = intensity_to_line_strength(intensity, q, frequency, upper_energy, temperature)
            .and_then(|strength| {
                let flux = column_density_to_flux(
                    catalog.column_density(),
                    strength,
                    frequency,
                    q,
                    upper_energy,
                    temperature,
                );
                resolve_profile(frequency, flux, catalog.doppler())
            });

        match profile {
            Ok(profile) => profiles.push(profile),
            Err(degeneracy) => warnings.push(SynthesisWarning {
                molecule: catalog.molecule().to_string(),
                transition: index,
                frequency,
                degeneracy,
            }),
        }
    }

    (profiles, warnings)
}

fn resolve_profile(
    frequency: f64,
    flux: f64,
    doppler: f64,
) -> Result<LineProfile, NumericDegeneracy> {
    if !flux.is_finite() {
        return Err(NumericDegeneracy::NonFinite {
            quantity: "flux",
            value: flux,
        });
    }

    let sigma = dop2freq(doppler, frequency);
    if sigma.is_nan() || sigma <= 0.0 {
        return Err(NumericDegeneracy::NonPositiveWidth { sigma });
    }

    let amplitude = gaussian_amplitude_for_flux(flux, sigma);
    if !amplitude.is_finite() {
        return Err(NumericDegeneracy::NonFinite {
            quantity: "amplitude",
            value: amplitude,
        });
    }

    Ok(LineProfile {
        center: frequency,
        sigma,
        amplitude,
    })
}

/// Evaluates the summed profiles at every axis point independently.
pub fn evaluate_profiles(profiles: &[LineProfile], axis: &[f64]) -> Vec<f64> {
    axis.iter()
        .map(|&x| {
            compensated_sum(
                profiles
                    .iter()
                    .map(|line| gaussian(x, line.amplitude, line.center, line.sigma)),
            )
        })
        .collect()
}
