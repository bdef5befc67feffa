//! Gaussian line-profile helpers.
//!
//! The synthesizer derives a peak amplitude from an integrated flux with
//! [`gaussian_amplitude_for_flux`] and evaluates the profile in peak-height
//! form with [`gaussian`]. Both sides share the `sqrt(2 pi^2 sigma)` area
//! factor of [`gaussian_integral`], which differs from the textbook
//! `amplitude * sigma * sqrt(2 pi)` area.

use crate::common::constants::PI;

pub fn gaussian_fwhm(sigma: f64) -> f64 {
    2.0 * (2.0 * 2.0_f64.ln()).sqrt() * sigma
}

/// Peak height at the centroid of an area-normalised Gaussian.
pub fn gaussian_height(amplitude: f64, sigma: f64) -> f64 {
    amplitude / ((2.0 * PI).sqrt() * sigma)
}

pub fn gaussian_integral(amplitude: f64, sigma: f64) -> f64 {
    amplitude * (2.0 * PI.powi(2) * sigma).sqrt()
}

/// Inverse of [`gaussian_integral`]: the amplitude whose integral is `flux`.
pub fn gaussian_amplitude_for_flux(flux: f64, sigma: f64) -> f64 {
    flux / (2.0 * PI.powi(2) * sigma).sqrt()
}

pub fn gaussian(x: f64, amplitude: f64, center: f64, sigma: f64) -> f64 {
    let offset = x - center;
    amplitude * (-(offset * offset) / (2.0 * sigma * sigma)).exp()
}
