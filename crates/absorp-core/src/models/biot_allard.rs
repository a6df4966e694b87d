//! Biot-Allard model for materials with simple pore geometry.
//!
//! The viscous and thermal exchanges inside a pore are described by the
//! exact cylindrical-pore solution, expressed through the Bessel ratio
//! G(z) = J₁(z)/J₀(z) evaluated at complex arguments:
//!
//! ```text
//! z_v = Λ  √(ωρ₀/η)    √(−j)        B   = σφ / (jωρ₀α∞)
//! z_t = Λ′ √(ωρ₀Pr/η)  √(−j)        B_t = B (Λ/Λ′)²
//!
//! ρ(ω) = ρ₀α∞ [1 − B (z_v/4) G(z_v) / (1 − (2/z_v) G(z_v))]
//! K(ω) = γP₀ / (γ − (γ−1) / (1 − (B_t/√Pr) (z_t/4) G(z_t) / (1 − (2/z_t) G(z_t))))
//!
//! Zc = √(ρK) / φ        k = ω √(ρ/K)
//! ```
//!
//! When the characteristic lengths are not measured, the pore shape fixes
//! them: Λ = Λ′ = c₁ √(8ηα∞ / (σφ)).

use super::{physical_sqrt, sqrt_minus_j};
use crate::air::AirProperties;
use crate::error::{AbsorpError, AbsorpResult};
use crate::frequency::FrequencyRange;
use crate::frequency_response::{sweep, ComplexFrequencyResponse};
use crate::material::MaterialParameters;
use num_complex::Complex64;

const NAME: &str = "Biot-Allard";

/// Extra recurrence depth beyond |z| for the Bessel ratio.
const RECURRENCE_MARGIN: usize = 40;
/// Above this |z| the ratio is within 1e-8 of ±j + 1/(2z), and the
/// recurrence would cost |z| steps.
const ASYMPTOTIC_ARGUMENT: f64 = 1e4;

/// Parameters resolved for one Biot-Allard evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoreParameters {
    pub flow_resistivity: f64,
    pub porosity: f64,
    pub tortuosity: f64,
    pub viscous_length: f64,
    pub thermal_length: f64,
}

impl PoreParameters {
    /// Pull the required fields out of `material`.
    ///
    /// Measured characteristic lengths take precedence over the pore shape.
    pub fn from_material(material: &MaterialParameters, air: &AirProperties) -> AbsorpResult<Self> {
        let sigma = material.require(NAME, "flow_resistivity", material.flow_resistivity)?;
        let phi = material.require(NAME, "porosity", material.porosity)?;
        let tortuosity = material.require(NAME, "tortuosity", material.tortuosity)?;

        let (viscous_length, thermal_length) = match (
            material.viscous_length,
            material.thermal_length,
            material.pore_shape,
        ) {
            (Some(viscous), Some(thermal), _) => (viscous, thermal),
            (_, _, Some(shape)) => {
                let length = shape.factor() * (8.0 * air.viscosity * tortuosity / (sigma * phi)).sqrt();
                (length, length)
            }
            (Some(_), None, None) => {
                return Err(AbsorpError::MissingParameter {
                    model: NAME,
                    parameter: "thermal_length",
                })
            }
            _ => {
                return Err(AbsorpError::MissingParameter {
                    model: NAME,
                    parameter: "pore_shape",
                })
            }
        };

        Ok(Self {
            flow_resistivity: sigma,
            porosity: phi,
            tortuosity,
            viscous_length,
            thermal_length,
        })
    }

    /// Viscous coupling term B = σφ / (jωρ₀α∞).
    fn coupling(&self, omega: f64, air: &AirProperties) -> Complex64 {
        let b = self.flow_resistivity * self.porosity / (omega * air.density * self.tortuosity);
        Complex64::new(0.0, -b)
    }

    /// Dynamic density ρ(ω) of the fluid in the pores.
    pub fn dynamic_density(&self, omega: f64, air: &AirProperties) -> Complex64 {
        let z = self.viscous_length * (omega * air.density / air.viscosity).sqrt() * sqrt_minus_j();
        let correction = pore_correction(z);
        air.density * self.tortuosity * (1.0 - self.coupling(omega, air) * correction)
    }

    /// Dynamic bulk modulus K(ω) of the fluid in the pores.
    pub fn dynamic_bulk_modulus(&self, omega: f64, air: &AirProperties) -> Complex64 {
        let gamma = air.specific_heat_ratio;
        let z = self.thermal_length
            * (omega * air.density * air.prandtl / air.viscosity).sqrt()
            * sqrt_minus_j();
        let scale = (self.viscous_length / self.thermal_length).powi(2) / air.prandtl.sqrt();
        let thermal = 1.0 - self.coupling(omega, air) * scale * pore_correction(z);
        air.adiabatic_bulk_modulus() / (gamma - (gamma - 1.0) / thermal)
    }

    /// `(Zc, k)` at one angular frequency.
    pub fn sample(&self, omega: f64, air: &AirProperties) -> (Complex64, Complex64) {
        let rho = self.dynamic_density(omega, air);
        let bulk = self.dynamic_bulk_modulus(omega, air);
        (
            physical_sqrt(rho * bulk) / self.porosity,
            omega * physical_sqrt(rho / bulk),
        )
    }
}

/// (z/4) G(z) / (1 − (2/z) G(z)), shared by the viscous and thermal terms.
fn pore_correction(z: Complex64) -> Complex64 {
    let g = bessel_ratio(z);
    (z / 4.0) * g / (1.0 - (2.0 / z) * g)
}

/// J₁(z)/J₀(z) for complex `z`, by backward recurrence of
/// Jₙ/Jₙ₋₁ = 1 / (2n/z − Jₙ₊₁/Jₙ).
///
/// The ratio is the minimal solution of the recurrence, so running it
/// downwards from a depth well beyond |z| converges without overflow, even
/// where J₀ and J₁ themselves grow like e^|Im z|. Large or infinite
/// arguments take the asymptote ∓j + 1/(2z) instead, with the sign of j
/// following Im z.
pub fn bessel_ratio(z: Complex64) -> Complex64 {
    let magnitude = z.norm();
    if magnitude > ASYMPTOTIC_ARGUMENT {
        let limit = Complex64::new(0.0, if z.im < 0.0 { -1.0 } else { 1.0 });
        return if magnitude.is_finite() { limit + 0.5 / z } else { limit };
    }
    let depth = magnitude as usize + RECURRENCE_MARGIN;
    (1..=depth)
        .rev()
        .fold(Complex64::new(0.0, 0.0), |ratio, n| {
            1.0 / (2.0 * n as f64 / z - ratio)
        })
}

/// Biot-Allard response. Requires flow resistivity, porosity, tortuosity and
/// either both characteristic lengths or a pore shape.
pub fn biot_allard(
    material: &MaterialParameters,
    frequencies: &FrequencyRange,
    air: &AirProperties,
) -> AbsorpResult<ComplexFrequencyResponse> {
    let pores = PoreParameters::from_material(material, air)?;
    Ok(sweep(frequencies, |_, omega| pores.sample(omega, air)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::PoreShape;
    use std::f64::consts::PI;

    /// Power series of Jₙ, adequate for moderate |z|.
    fn bessel_series(n: u32, z: Complex64) -> Complex64 {
        let half = z / 2.0;
        let mut term = half.powu(n) / (1..=n).map(f64::from).product::<f64>();
        let mut sum = Complex64::new(0.0, 0.0);
        for m in 0..60u32 {
            sum += term;
            term *= -(half * half) / (f64::from(m + 1) * f64::from(m + 1 + n));
        }
        sum
    }

    fn glass_wool() -> MaterialParameters {
        MaterialParameters::new()
            .with_flow_resistivity(20_000.0)
            .with_porosity(0.95)
            .with_tortuosity(1.0)
            .with_pore_shape(PoreShape::Circle)
    }

    #[test]
    fn test_bessel_ratio_matches_series() {
        for z in [
            Complex64::new(0.3, 0.0),
            Complex64::new(2.0, -2.0),
            Complex64::from_polar(3.0, -PI / 4.0),
            Complex64::from_polar(7.5, -PI / 4.0),
        ] {
            let expected = bessel_series(1, z) / bessel_series(0, z);
            let got = bessel_ratio(z);
            assert!((got - expected).norm() < 1e-10, "z = {z}: {got} vs {expected}");
        }
    }

    #[test]
    fn test_bessel_ratio_large_argument() {
        // Along arg z = −π/4 the ratio tends to −j
        let g = bessel_ratio(Complex64::from_polar(1000.0, -PI / 4.0));
        assert!((g - Complex64::new(0.0, -1.0)).norm() < 1e-3, "{g}");
    }

    #[test]
    fn test_bessel_ratio_asymptote_joins_recurrence() {
        let below = bessel_ratio(Complex64::from_polar(0.999 * ASYMPTOTIC_ARGUMENT, -PI / 4.0));
        let above = bessel_ratio(Complex64::from_polar(1.001 * ASYMPTOTIC_ARGUMENT, -PI / 4.0));
        assert!((below - above).norm() < 1e-6, "{below} vs {above}");
    }

    #[test]
    fn test_bessel_ratio_extreme_arguments() {
        let j = Complex64::i();
        assert!((bessel_ratio(Complex64::from_polar(1e300, -PI / 4.0)) + j).norm() < 1e-12);
        assert!((bessel_ratio(Complex64::from_polar(1e12, PI / 4.0)) - j).norm() < 1e-9);
        assert_eq!(bessel_ratio(Complex64::new(f64::INFINITY, f64::NEG_INFINITY)), -j);
        assert!(bessel_ratio(Complex64::new(f64::NAN, 0.0)).is_nan());
    }

    #[test]
    fn test_reference_point() {
        let air = AirProperties::standard();
        let pores = PoreParameters::from_material(&glass_wool(), &air).unwrap();
        let omega = 2.0 * PI * 1000.0;
        let rho = pores.dynamic_density(omega, &air);
        let bulk = pores.dynamic_bulk_modulus(omega, &air);
        assert!((rho - Complex64::new(1.593896, -3.049972)).norm() < 1e-5, "rho = {rho}");
        assert!((bulk - Complex64::new(104_162.67, 8_656.821)).norm() < 0.05, "K = {bulk}");
        let (zc, k) = pores.sample(omega, &air);
        assert!((zc - Complex64::new(553.0688, -304.4159)).norm() < 1e-3, "Zc = {zc}");
        assert!((k - Complex64::new(30.03627, -19.94078)).norm() < 1e-4, "k = {k}");
    }

    #[test]
    fn test_shape_sets_characteristic_lengths() {
        let air = AirProperties::standard();
        let circle = PoreParameters::from_material(&glass_wool(), &air).unwrap();
        let square = PoreParameters::from_material(
            &glass_wool().with_pore_shape(PoreShape::Square),
            &air,
        )
        .unwrap();
        assert!((circle.viscous_length - 8.757272e-5).abs() < 1e-10);
        assert_eq!(circle.viscous_length, circle.thermal_length);
        assert!((square.viscous_length / circle.viscous_length - 1.07).abs() < 1e-12);
    }

    #[test]
    fn test_measured_lengths_take_precedence() {
        let air = AirProperties::standard();
        let material = glass_wool()
            .with_viscous_length(100e-6)
            .with_thermal_length(250e-6);
        let pores = PoreParameters::from_material(&material, &air).unwrap();
        assert_eq!(pores.viscous_length, 100e-6);
        assert_eq!(pores.thermal_length, 250e-6);
    }

    #[test]
    fn test_missing_geometry_reported() {
        let air = AirProperties::standard();
        let mut material = glass_wool();
        material.pore_shape = None;
        assert_eq!(
            PoreParameters::from_material(&material, &air).unwrap_err(),
            AbsorpError::MissingParameter {
                model: NAME,
                parameter: "pore_shape"
            }
        );
        let material = material.with_viscous_length(1e-4);
        assert_eq!(
            PoreParameters::from_material(&material, &air).unwrap_err(),
            AbsorpError::MissingParameter {
                model: NAME,
                parameter: "thermal_length"
            }
        );
    }

    #[test]
    fn test_bulk_modulus_limits() {
        // Isothermal at low frequency, adiabatic at high frequency
        let air = AirProperties::standard();
        let pores = PoreParameters::from_material(&glass_wool(), &air).unwrap();
        let low = pores.dynamic_bulk_modulus(2.0 * PI * 1.0, &air);
        let high = pores.dynamic_bulk_modulus(2.0 * PI * 1e6, &air);
        assert!((low.re - air.pressure).abs() / air.pressure < 1e-3, "K(1 Hz) = {low}");
        let adiabatic = air.adiabatic_bulk_modulus();
        assert!((high.re - adiabatic).abs() / adiabatic < 0.02, "K(1 MHz) = {high}");
    }
}
