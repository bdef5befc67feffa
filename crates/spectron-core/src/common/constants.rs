//! Physical constants (CODATA 2018) used by the unit conversions and the LTE model.
//!
//! Frequencies are carried in MHz and energies in cm^-1 or K throughout the
//! crate, so a few constants are pre-scaled to those units.

pub const PI: f64 = std::f64::consts::PI;

/// Speed of light in vacuum, m/s (exact).
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;
/// Speed of light scaled so that `GHz / SPEED_OF_LIGHT_GHZ_CM = cm^-1`.
pub const SPEED_OF_LIGHT_GHZ_CM: f64 = SPEED_OF_LIGHT / 1.0e7;
/// Boltzmann constant in cm^-1 / K.
pub const BOLTZMANN_WAVENUMBER: f64 = 0.695_034_800_4;
pub const AVOGADRO: f64 = 6.022_140_76e23;
/// Hartree energy in J.
pub const HARTREE_ENERGY: f64 = 4.359_744_722_207_1e-18;
/// Hartree-inverse meter relationship, m^-1.
pub const HARTREE_INVERSE_METER: f64 = 2.194_746_313_632_0e7;
/// Joule-inverse meter relationship, m^-1.
pub const JOULE_INVERSE_METER: f64 = 5.034_116_567e24;

/// Rotational constant to moment of inertia conversion, MHz amu A^2
/// (Oka & Morino, JMS 8, 9 (1962)).
pub const INERTIA_CONVERSION: f64 = 134.901;
/// Prefactor of the catalog intensity to line strength relation.
pub const LINE_STRENGTH_PREFACTOR: f64 = 4.162_31e-5;
/// Prefactor of the column density to integrated flux relation.
pub const FLUX_PREFACTOR: f64 = 2.04;
