//! Backing conditions and the surface impedance they produce.

use crate::air::AirProperties;
use crate::elements::{AirGap, PorousLayer};
use crate::error::{AbsorpError, AbsorpResult, Warning};
use crate::frequency::FrequencyRange;
use crate::frequency_response::ComplexFrequencyResponse;
use crate::transfer_matrix::TransferMatrix;
use crate::AcousticElement;
use num_complex::Complex64;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::warn;

/// How the back face of the material layer is terminated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Termination {
    /// Layer of `thickness` metres laid directly on a rigid wall.
    RigidBacking { thickness: f64 },
    /// Layer of `thickness` metres mounted `air_gap` metres in front of a
    /// rigid wall.
    AirBacked { thickness: f64, air_gap: f64 },
}

impl Termination {
    /// Thickness of the material layer in metres.
    pub fn thickness(&self) -> f64 {
        match *self {
            Termination::RigidBacking { thickness } | Termination::AirBacked { thickness, .. } => {
                thickness
            }
        }
    }

    pub fn validate(&self) -> AbsorpResult<()> {
        positive("layer thickness", self.thickness())?;
        if let Termination::AirBacked { air_gap, .. } = *self {
            positive("air gap thickness", air_gap)?;
        }
        Ok(())
    }

    /// Transfer matrix of the whole stack, front face to wall.
    pub fn transfer_matrix(&self, zc: Complex64, k: Complex64, omega: f64, air: &AirProperties) -> TransferMatrix {
        let layer = PorousLayer::new(zc, k, self.thickness());
        let gap = match *self {
            Termination::RigidBacking { .. } => None,
            Termination::AirBacked { air_gap, .. } => Some(AirGap::new(air_gap)),
        };
        let elements: [Option<&dyn AcousticElement>; 2] =
            [Some(&layer), gap.as_ref().map(|gap| gap as &dyn AcousticElement)];

        let mut total = TransferMatrix::identity();
        for element in elements.into_iter().flatten() {
            total = total.chain(&element.transfer_matrix(omega, air));
        }
        total
    }
}

fn positive(what: &'static str, value: f64) -> AbsorpResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AbsorpError::validation(what, format!("must be positive, got {value}")))
    }
}

/// Surface impedance of a terminated layer, index-aligned with the
/// frequencies it was computed on.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceImpedance {
    /// Zs(f) in Pa·s/m. Singular samples hold `∞ + 0j`.
    pub values: Vec<Complex64>,
    /// One [`Warning::NumericalSingularity`] per singular sample.
    pub warnings: Vec<Warning>,
}

/// Combine a model response with a termination.
pub fn surface_impedance(
    response: &ComplexFrequencyResponse,
    termination: &Termination,
    frequencies: &FrequencyRange,
    air: &AirProperties,
) -> AbsorpResult<SurfaceImpedance> {
    termination.validate()?;
    if response.len() != frequencies.len() {
        return Err(AbsorpError::validation(
            "frequency response",
            format!(
                "{} samples for {} frequencies",
                response.len(),
                frequencies.len()
            ),
        ));
    }

    let samples: Vec<Option<Complex64>> = response
        .characteristic_impedance()
        .par_iter()
        .zip(response.propagation_constant().par_iter())
        .zip(frequencies.as_slice().par_iter())
        .map(|((&zc, &k), &freq)| {
            termination
                .transfer_matrix(zc, k, 2.0 * PI * freq, air)
                .rigid_backed_impedance(air.impedance)
        })
        .collect();

    let warnings: Vec<Warning> = samples
        .iter()
        .zip(frequencies.iter())
        .filter(|(zs, _)| zs.is_none())
        .map(|(_, frequency)| Warning::NumericalSingularity { frequency })
        .collect();
    if !warnings.is_empty() {
        warn!(
            singular = warnings.len(),
            "surface impedance diverges; reported as infinite"
        );
    }

    let values = samples
        .into_iter()
        .map(|zs| zs.unwrap_or(Complex64::new(f64::INFINITY, 0.0)))
        .collect();

    Ok(SurfaceImpedance { values, warnings })
}
