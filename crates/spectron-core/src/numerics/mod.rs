pub mod lineshape;
pub mod units;

pub use lineshape::{
    gaussian, gaussian_amplitude_for_flux, gaussian_fwhm, gaussian_height, gaussian_integral,
};
pub use units::{
    asymmetry_parameter, boltzmann_factor, column_density_to_flux, dop2freq, dop2freq_many,
    freq2vel, hartree_to_kjmol, hartree_to_wavenumber, inertial_defect,
    intensity_to_line_strength, kjmol_to_wavenumber, mhz_to_wavenumber, partition_function,
    rotational_constant_to_inertia, temperature_to_wavenumber, wavenumber_to_kjmol,
    wavenumber_to_mhz, wavenumber_to_temperature,
};

/// Kahan-compensated sum; used where many small line contributions are accumulated.
pub fn compensated_sum(values: impl IntoIterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut correction = 0.0;
    for value in values {
        kahan_add(&mut sum, &mut correction, value);
    }
    sum
}

fn kahan_add(sum: &mut f64, correction: &mut f64, value: f64) {
    let corrected = value - *correction;
    let next = *sum + corrected;
    *correction = (next - *sum) - corrected;
    *sum = next;
}
