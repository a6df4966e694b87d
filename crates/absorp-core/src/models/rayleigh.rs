//! Rayleigh model: straight, parallel pores with viscous losses only.

use super::physical_sqrt;
use crate::air::AirProperties;
use crate::error::AbsorpResult;
use crate::frequency::FrequencyRange;
use crate::frequency_response::{sweep, ComplexFrequencyResponse};
use crate::material::MaterialParameters;
use num_complex::Complex64;

const NAME: &str = "Rayleigh";

/// `(Zc, k)` at one angular frequency.
///
/// ```text
/// a  = √(1 − j φσ / (ρ₀ω))
/// Zc = (ρ₀c₀ / φ) · a
/// k  = (ω / c₀) · a
/// ```
pub fn sample(sigma: f64, phi: f64, omega: f64, air: &AirProperties) -> (Complex64, Complex64) {
    let a = physical_sqrt(Complex64::new(1.0, -phi * sigma / (air.density * omega)));
    (air.impedance / phi * a, air.wavenumber(omega) * a)
}

/// Rayleigh response. Requires flow resistivity and porosity.
pub fn rayleigh(
    material: &MaterialParameters,
    frequencies: &FrequencyRange,
    air: &AirProperties,
) -> AbsorpResult<ComplexFrequencyResponse> {
    let sigma = material.require(NAME, "flow_resistivity", material.flow_resistivity)?;
    let phi = material.require(NAME, "porosity", material.porosity)?;
    Ok(sweep(frequencies, |_, omega| sample(sigma, phi, omega, air)))
}
