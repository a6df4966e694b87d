//! Johnson-Champoux family of semi-phenomenological models.
//!
//! All three variants share the Johnson dynamic density, already divided by
//! porosity:
//!
//! ```text
//! ρ(ω) = (α∞ρ₀/φ) [1 + σφ/(jωρ₀α∞) √(1 + j 4α∞²ηρ₀ω / (σ²Λ²φ²))]
//! ```
//!
//! They differ in how thermal exchange is modelled in K(ω):
//!
//! - **Original**: no thermal correction, K = γP₀/φ.
//! - **Allard**: Champoux-Allard correction driven by Λ′.
//! - **Lafarge**: Lafarge correction driven by Λ′ and k₀′.
//!
//! Zc = √(ρK) and k = ω√(ρ/K).

use super::physical_sqrt;
use crate::air::AirProperties;
use crate::error::AbsorpResult;
use crate::frequency::FrequencyRange;
use crate::frequency_response::{sweep, ComplexFrequencyResponse};
use crate::material::MaterialParameters;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JohnsonChampouxVariant {
    Original,
    Allard,
    Lafarge,
}

impl JohnsonChampouxVariant {
    pub fn name(self) -> &'static str {
        match self {
            JohnsonChampouxVariant::Original => "Johnson-Champoux",
            JohnsonChampouxVariant::Allard => "Johnson-Champoux-Allard",
            JohnsonChampouxVariant::Lafarge => "Johnson-Champoux-Allard-Lafarge",
        }
    }
}

/// Thermal description carried by each variant.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Thermal {
    Adiabatic,
    Allard { thermal_length: f64 },
    Lafarge { thermal_length: f64, thermal_permeability: f64 },
}

/// Parameters resolved for one Johnson-Champoux evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Equivalent {
    flow_resistivity: f64,
    porosity: f64,
    tortuosity: f64,
    viscous_length: f64,
    thermal: Thermal,
}

impl Equivalent {
    fn from_material(
        material: &MaterialParameters,
        variant: JohnsonChampouxVariant,
    ) -> AbsorpResult<Self> {
        let name = variant.name();
        let thermal = match variant {
            JohnsonChampouxVariant::Original => Thermal::Adiabatic,
            JohnsonChampouxVariant::Allard => Thermal::Allard {
                thermal_length: material.require(name, "thermal_length", material.thermal_length)?,
            },
            JohnsonChampouxVariant::Lafarge => Thermal::Lafarge {
                thermal_length: material.require(name, "thermal_length", material.thermal_length)?,
                thermal_permeability: material.require(
                    name,
                    "thermal_permeability",
                    material.thermal_permeability,
                )?,
            },
        };
        Ok(Self {
            flow_resistivity: material.require(name, "flow_resistivity", material.flow_resistivity)?,
            porosity: material.require(name, "porosity", material.porosity)?,
            tortuosity: material.require(name, "tortuosity", material.tortuosity)?,
            viscous_length: material.require(name, "viscous_length", material.viscous_length)?,
            thermal,
        })
    }

    fn dynamic_density(&self, omega: f64, air: &AirProperties) -> Complex64 {
        let Self {
            flow_resistivity: sigma,
            porosity: phi,
            tortuosity: alpha,
            viscous_length: lambda,
            ..
        } = *self;
        let rho0 = air.density;
        let shape = physical_sqrt(Complex64::new(
            1.0,
            4.0 * alpha * alpha * air.viscosity * rho0 * omega / (sigma * sigma * lambda * lambda * phi * phi),
        ));
        let coupling = Complex64::new(0.0, -sigma * phi / (omega * rho0 * alpha));
        alpha * rho0 / phi * (1.0 + coupling * shape)
    }

    fn dynamic_bulk_modulus(&self, omega: f64, air: &AirProperties) -> Complex64 {
        let gamma = air.specific_heat_ratio;
        let eta = air.viscosity;
        let pr = air.prandtl;
        let rho0 = air.density;
        let adiabatic = air.adiabatic_bulk_modulus() / self.porosity;

        let correction = match self.thermal {
            Thermal::Adiabatic => return Complex64::new(adiabatic, 0.0),
            Thermal::Allard { thermal_length } => {
                let l2 = thermal_length * thermal_length;
                let shape = physical_sqrt(Complex64::new(1.0, rho0 * omega * pr * l2 / (16.0 * eta)));
                1.0 + Complex64::new(0.0, -8.0 * eta / (l2 * pr * omega * rho0)) * shape
            }
            Thermal::Lafarge {
                thermal_length,
                thermal_permeability: k0,
            } => {
                let phi = self.porosity;
                let shape = physical_sqrt(Complex64::new(
                    1.0,
                    4.0 * k0 * k0 * rho0 * omega * pr / (eta * thermal_length * thermal_length * phi * phi),
                ));
                1.0 + Complex64::new(0.0, -phi * eta / (omega * rho0 * pr * k0)) * shape
            }
        };
        adiabatic / (gamma - (gamma - 1.0) / correction)
    }

    fn sample(&self, omega: f64, air: &AirProperties) -> (Complex64, Complex64) {
        let rho = self.dynamic_density(omega, air);
        let bulk = self.dynamic_bulk_modulus(omega, air);
        (physical_sqrt(rho * bulk), omega * physical_sqrt(rho / bulk))
    }
}

/// Johnson-Champoux response for `variant`.
///
/// Every variant needs flow resistivity, porosity, tortuosity and the
/// viscous length. Allard adds the thermal length; Lafarge adds the thermal
/// length and the static thermal permeability.
pub fn johnson_champoux(
    material: &MaterialParameters,
    frequencies: &FrequencyRange,
    air: &AirProperties,
    variant: JohnsonChampouxVariant,
) -> AbsorpResult<ComplexFrequencyResponse> {
    let fluid = Equivalent::from_material(material, variant)?;
    Ok(sweep(frequencies, |_, omega| fluid.sample(omega, air)))
}
