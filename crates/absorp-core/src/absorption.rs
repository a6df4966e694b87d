//! Normal-incidence reflection and absorption from a surface impedance.

use crate::error::{AbsorpError, AbsorpResult, Warning};
use crate::frequency_response::ComplexFrequencyResponse;
use num_complex::Complex64;
use serde::Serialize;

/// Re(Zs) may dip below zero by this fraction of |Zs| from rounding alone.
const PASSIVITY_TOLERANCE: f64 = 1e-9;

/// Reflection coefficient R = (Zs − Z₀)/(Zs + Z₀) for each sample and the
/// absorption coefficient α = 1 − |R|².
///
/// An infinite Zs (`∞ + 0j`, the rigid limit) reflects totally: R = 1,
/// α = 0. A Zs with a negative real part would give α < 0, and a NaN or
/// otherwise non-finite Zs has no reflection coefficient; both are reported
/// as [`AbsorpError::NonPhysicalImpedance`].
pub fn reflection_and_absorption(
    surface_impedance: &[Complex64],
    air_impedance: f64,
) -> AbsorpResult<(Vec<Complex64>, Vec<f64>)> {
    let z0 = Complex64::new(air_impedance, 0.0);
    surface_impedance
        .iter()
        .enumerate()
        .map(|(index, &zs)| {
            if zs.re.is_infinite() && zs.re > 0.0 && zs.im.is_finite() {
                return Ok((Complex64::new(1.0, 0.0), 0.0));
            }
            if !zs.is_finite() || zs.re < -PASSIVITY_TOLERANCE * zs.norm() {
                return Err(AbsorpError::NonPhysicalImpedance {
                    index,
                    impedance: zs,
                });
            }
            let r = (zs - z0) / (zs + z0);
            Ok((r, (1.0 - r.norm_sqr()).clamp(0.0, 1.0)))
        })
        .collect::<AbsorpResult<Vec<_>>>()
        .map(|pairs| pairs.into_iter().unzip())
}

/// Everything one evaluation produces, index-aligned with `frequencies`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbsorptionResult {
    pub frequencies: Vec<f64>,
    /// α(f) in [0, 1].
    pub absorption: Vec<f64>,
    /// R(f).
    pub reflection: Vec<Complex64>,
    /// Zs(f) in Pa·s/m.
    pub surface_impedance: Vec<Complex64>,
    /// Raw model output, kept for diagnostics and plotting.
    pub response: ComplexFrequencyResponse,
    pub warnings: Vec<Warning>,
}

impl AbsorptionResult {
    /// `(frequency, α)` of the highest absorption.
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.frequencies
            .iter()
            .copied()
            .zip(self.absorption.iter().copied())
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Mean absorption across the range.
    pub fn mean_absorption(&self) -> f64 {
        if self.absorption.is_empty() {
            return 0.0;
        }
        self.absorption.iter().sum::<f64>() / self.absorption.len() as f64
    }
}
