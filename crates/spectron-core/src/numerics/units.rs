//! Unit conversions and thermodynamic quantities used in rotational spectroscopy.
//!
//! Conventions: frequencies in MHz, energies in cm^-1 unless the name says
//! otherwise, temperatures in K, velocities in km/s. All functions are pure.

use crate::common::constants::{
    AVOGADRO, BOLTZMANN_WAVENUMBER, FLUX_PREFACTOR, HARTREE_ENERGY, HARTREE_INVERSE_METER,
    INERTIA_CONVERSION, JOULE_INVERSE_METER, LINE_STRENGTH_PREFACTOR, SPEED_OF_LIGHT,
    SPEED_OF_LIGHT_GHZ_CM,
};
use crate::domain::NumericDegeneracy;

/// Frequency width (MHz) equivalent to a Doppler velocity (km/s) at `frequency` (MHz).
pub fn dop2freq(velocity: f64, frequency: f64) -> f64 {
    (velocity * 1000.0 * frequency) / SPEED_OF_LIGHT
}

/// [`dop2freq`] broadcast over a set of center frequencies.
pub fn dop2freq_many(velocity: f64, frequencies: &[f64]) -> Vec<f64> {
    frequencies
        .iter()
        .map(|frequency| dop2freq(velocity, *frequency))
        .collect()
}

/// Doppler velocity (km/s) of a frequency `offset` (MHz) from a center `frequency` (MHz).
pub fn freq2vel(frequency: f64, offset: f64) -> f64 {
    ((SPEED_OF_LIGHT * offset) / frequency) / 1000.0
}

pub fn mhz_to_wavenumber(frequency: f64) -> f64 {
    (frequency / 1000.0) / SPEED_OF_LIGHT_GHZ_CM
}

pub fn wavenumber_to_mhz(wavenumber: f64) -> f64 {
    (wavenumber * SPEED_OF_LIGHT_GHZ_CM) * 1000.0
}

pub fn hartree_to_wavenumber(hartree: f64) -> f64 {
    hartree * (HARTREE_INVERSE_METER / 100.0)
}

pub fn hartree_to_kjmol(hartree: f64) -> f64 {
    hartree * (HARTREE_ENERGY * AVOGADRO / 1000.0)
}

pub fn kjmol_to_wavenumber(kj: f64) -> f64 {
    kj * 1000.0 / AVOGADRO * (JOULE_INVERSE_METER / 100.0)
}

pub fn wavenumber_to_kjmol(wavenumber: f64) -> f64 {
    wavenumber / (JOULE_INVERSE_METER / 100.0) * AVOGADRO / 1000.0
}

pub fn temperature_to_wavenumber(temperature: f64) -> f64 {
    temperature * BOLTZMANN_WAVENUMBER
}

pub fn wavenumber_to_temperature(wavenumber: f64) -> f64 {
    wavenumber / BOLTZMANN_WAVENUMBER
}

/// Principal moment of inertia (amu A^2) for a rotational constant in MHz.
pub fn rotational_constant_to_inertia(rotational_constant: f64) -> f64 {
    INERTIA_CONVERSION / rotational_constant
}

/// Ray's asymmetry parameter kappa.
pub fn asymmetry_parameter(a: f64, b: f64, c: f64) -> f64 {
    (2.0 * b - a - c) / (a - c)
}

/// Inertial defect `I_c - I_a - I_b` from three rotational constants (MHz) in
/// any order. Strictly zero for a rigid planar molecule.
pub fn inertial_defect(rotational_constants: [f64; 3]) -> f64 {
    let mut sorted = rotational_constants;
    sorted.sort_by(|left, right| right.total_cmp(left));
    let [i_a, i_b, i_c] = sorted.map(rotational_constant_to_inertia);
    i_c - i_a - i_b
}

/// Boltzmann weight of a state at `energy` (cm^-1) and `temperature` (K).
pub fn boltzmann_factor(energy: f64, temperature: f64) -> f64 {
    (-energy / (BOLTZMANN_WAVENUMBER * temperature)).exp()
}

/// Partition function summed over state energies given in K.
pub fn partition_function(state_energies: &[f64], temperature: f64) -> f64 {
    state_energies
        .iter()
        .map(|energy| boltzmann_factor(energy * BOLTZMANN_WAVENUMBER, temperature))
        .sum()
}

/// Converts a catalog intensity (nm^2 MHz) into the intrinsic line strength S mu^2.
///
/// The lower-state energy is recovered from the upper-state energy (K) and the
/// transition frequency. When the two Boltzmann factors coincide (zero
/// frequency, or temperatures high enough that both factors round to one) the
/// relation is singular and [`NumericDegeneracy`] is returned.
pub fn intensity_to_line_strength(
    intensity: f64,
    partition_function: f64,
    frequency: f64,
    upper_energy: f64,
    temperature: f64,
) -> Result<f64, NumericDegeneracy> {
    let upper = upper_energy * BOLTZMANN_WAVENUMBER;
    let lower = mhz_to_wavenumber(wavenumber_to_mhz(upper) - frequency);
    let population_difference =
        boltzmann_factor(lower, temperature) - boltzmann_factor(upper, temperature);
    let denominator = LINE_STRENGTH_PREFACTOR * frequency * population_difference;
    if denominator == 0.0 {
        return Err(NumericDegeneracy::EqualBoltzmannFactors { frequency });
    }

    let strength = intensity * partition_function / denominator;
    if !strength.is_finite() {
        return Err(NumericDegeneracy::NonFinite {
            quantity: "line strength",
            value: strength,
        });
    }
    Ok(strength)
}

/// Integrated flux (Jy) of a transition for column density `column_density` (cm^-2).
pub fn column_density_to_flux(
    column_density: f64,
    line_strength: f64,
    frequency: f64,
    partition_function: f64,
    upper_energy: f64,
    temperature: f64,
) -> f64 {
    let numerator = (column_density * line_strength * (frequency / 1.0e3).powi(3)) / 1.0e20;
    let denominator = FLUX_PREFACTOR * partition_function * (upper_energy / temperature).exp();
    numerator / denominator
}

#[cfg(test)]
mod tests {
    use super::{
        asymmetry_parameter, boltzmann_factor, column_density_to_flux, dop2freq,
        dop2freq_many, freq2vel, hartree_to_kjmol, hartree_to_wavenumber, inertial_defect,
        intensity_to_line_strength, kjmol_to_wavenumber, mhz_to_wavenumber, partition_function,
        temperature_to_wavenumber, wavenumber_to_kjmol, wavenumber_to_mhz,
        wavenumber_to_temperature,
    };
    use crate::common::constants::BOLTZMANN_WAVENUMBER;
    use crate::domain::NumericDegeneracy;

    fn assert_relative(actual: f64, expected: f64, tolerance: f64) {
        let scale = expected.abs().max(f64::MIN_POSITIVE);
        assert!(
            ((actual - expected) / scale).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn doppler_width_matches_reference_value() {
        // 5 km/s at 100 GHz
        assert_relative(dop2freq(5.0, 100_000.0), 1.667_820_476_1, 1.0e-9);
        assert_eq!(dop2freq(5.0, 0.0), 0.0);
    }

    #[test]
    fn doppler_width_broadcasts_over_frequencies() {
        let widths = dop2freq_many(3.0, &[100.0, 200.0, 400.0]);
        assert_eq!(widths.len(), 3);
        assert_relative(widths[1], 2.0 * widths[0], 1.0e-12);
        assert_relative(widths[2], 4.0 * widths[0], 1.0e-12);
    }

    #[test]
    fn doppler_conversions_round_trip() {
        for frequency in [1.0, 100.0, 23_694.495_5, 345_795.989_9] {
            for velocity in [-12.5, 0.3, 5.0, 250.0] {
                let offset = dop2freq(velocity, frequency);
                assert_relative(freq2vel(frequency, offset), velocity, 1.0e-9);
            }
        }
    }

    #[test]
    fn wavenumber_conversions_round_trip() {
        for frequency in [1.0e-3, 1.0, 100.0, 115_271.202, 1.0e9] {
            assert_relative(
                wavenumber_to_mhz(mhz_to_wavenumber(frequency)),
                frequency,
                1.0e-9,
            );
        }
        assert_relative(mhz_to_wavenumber(29_979.245_8), 1.0, 1.0e-12);
    }

    #[test]
    fn energy_conversions_match_codata() {
        assert_relative(hartree_to_wavenumber(1.0), 219_474.631_363_2, 1.0e-9);
        assert_relative(hartree_to_kjmol(1.0), 2_625.499_639_5, 1.0e-9);
        assert_relative(kjmol_to_wavenumber(1.0), 83.593_472_3, 1.0e-8);
        assert_relative(wavenumber_to_kjmol(kjmol_to_wavenumber(42.0)), 42.0, 1.0e-12);
        assert_relative(
            wavenumber_to_temperature(temperature_to_wavenumber(300.0)),
            300.0,
            1.0e-12,
        );
    }

    #[test]
    fn rotational_helpers_follow_definitions() {
        assert_relative(asymmetry_parameter(3.0, 2.0, 1.0), 0.0, 1.0e-12);
        assert_eq!(asymmetry_parameter(3.0, 1.0, 1.0), -1.0);
        assert_eq!(asymmetry_parameter(3.0, 3.0, 1.0), 1.0);

        // planar rigid rotor: C = A*B/(A+B)
        let (a, b) = (20_000.0, 5_000.0);
        let c = a * b / (a + b);
        assert!(inertial_defect([c, a, b]).abs() < 1.0e-9);
        assert_relative(inertial_defect([b, c, a]), inertial_defect([a, b, c]), 1.0e-12);
    }

    #[test]
    fn boltzmann_factor_is_one_over_e_at_kt() {
        let temperature = 42.0;
        let energy = temperature * BOLTZMANN_WAVENUMBER;
        assert_relative(boltzmann_factor(energy, temperature), (-1.0_f64).exp(), 1.0e-12);
        assert_eq!(boltzmann_factor(0.0, temperature), 1.0);
    }

    #[test]
    fn partition_function_is_monotonic_in_temperature() {
        let energies = [1.5, 10.0, 25.0, 80.0, 300.0];
        let mut previous = 0.0;
        for temperature in [1.0, 5.0, 10.0, 50.0, 100.0, 300.0, 1_000.0, 1.0e5] {
            let q = partition_function(&energies, temperature);
            assert!(q >= previous, "Q decreased at {temperature} K");
            previous = q;
        }
        assert_relative(partition_function(&energies, 1.0e12), energies.len() as f64, 1.0e-6);
        assert_eq!(partition_function(&[], 300.0), 0.0);
    }

    #[test]
    fn line_strength_and_flux_are_finite_for_typical_lines() {
        let q = partition_function(&[50.0], 300.0);
        let strength = intensity_to_line_strength(1.0, q, 100.0, 50.0, 300.0)
            .expect("typical transition should not be degenerate");
        assert!(strength.is_finite() && strength > 0.0);

        let flux = column_density_to_flux(1.0e15, strength, 100.0, q, 50.0, 300.0);
        assert!(flux.is_finite() && flux > 0.0);
    }

    #[test]
    fn flux_scales_linearly_with_column_density() {
        let single = column_density_to_flux(1.0e14, 10.0, 1.0e5, 20.0, 30.0, 100.0);
        let double = column_density_to_flux(2.0e14, 10.0, 1.0e5, 20.0, 30.0, 100.0);
        assert_relative(double, 2.0 * single, 1.0e-12);
    }

    #[test]
    fn equal_boltzmann_factors_are_reported() {
        let error = intensity_to_line_strength(1.0, 1.0, 0.0, 50.0, 300.0)
            .expect_err("zero frequency should be degenerate");
        assert_eq!(
            error,
            NumericDegeneracy::EqualBoltzmannFactors { frequency: 0.0 }
        );

        let error = intensity_to_line_strength(1.0, 1.0, 100.0, 50.0, 1.0e300)
            .expect_err("extreme temperature should be degenerate");
        assert!(matches!(
            error,
            NumericDegeneracy::EqualBoltzmannFactors { .. }
        ));
    }
}
