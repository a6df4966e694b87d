//! Delany-Bazley family of empirical models for fibrous absorbers.
//!
//! All variants are driven by the single dimensionless group X = f/σ
//! (f in Hz, σ in Pa·s/m²). Coefficients are the published fits:
//!
//! ```text
//! Delany & Bazley (1970)   Zc = Z₀ (1 + 9.08 (10³X)^-0.75  − j 11.9  (10³X)^-0.73)
//!                          k  = k₀ (1 + 10.8 (10³X)^-0.70  − j 10.3  (10³X)^-0.59)
//! Miki (1990)              Zc = Z₀ (1 + 5.50 (10³X)^-0.632 − j 8.43  (10³X)^-0.632)
//!                          k  = k₀ (1 + 7.81 (10³X)^-0.618 − j 11.41 (10³X)^-0.618)
//! Allard & Champoux (1992) ρ  = ρ₀ + √(−0.0364 X⁻² − j 0.1144 X⁻¹)
//!                          K  = P₀ (j 29.64 + √(2.82 X⁻² + j 24.9 X⁻¹))
//!                                  / (j 21.17 + √(2.82 X⁻² + j 24.9 X⁻¹))
//! ```
//!
//! The Allard-Champoux fit was published with ρ₀ = 1.2 kg/m³ and
//! P₀ = 101320 Pa; the ambient density and pressure take their place here.

use super::{physical_sqrt, ModelEvaluation};
use crate::air::AirProperties;
use crate::error::{AbsorpResult, Warning};
use crate::frequency::FrequencyRange;
use crate::frequency_response::sweep;
use crate::material::MaterialParameters;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Band of X = f/σ the Delany-Bazley and Miki fits were derived on.
pub const FITTED_BAND: (f64, f64) = (0.01, 1.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DelanyBazleyVariant {
    /// Original Delany-Bazley power laws.
    Original,
    /// Miki's refit, which keeps the surface impedance passive below the band.
    Miki,
    /// Allard-Champoux rational fit, retuned for fibrous materials.
    AllardChampoux,
}

impl DelanyBazleyVariant {
    pub fn name(self) -> &'static str {
        match self {
            DelanyBazleyVariant::Original => "Delany-Bazley",
            DelanyBazleyVariant::Miki => "Delany-Bazley-Miki",
            DelanyBazleyVariant::AllardChampoux => "Allard-Champoux",
        }
    }

    /// The band of X outside which results are flagged, if any.
    pub fn fitted_band(self) -> Option<(f64, f64)> {
        match self {
            DelanyBazleyVariant::Original | DelanyBazleyVariant::Miki => Some(FITTED_BAND),
            DelanyBazleyVariant::AllardChampoux => None,
        }
    }

    /// `(Zc, k)` at one frequency.
    pub fn sample(self, x: f64, omega: f64, air: &AirProperties) -> (Complex64, Complex64) {
        let z0 = air.impedance;
        let k0 = air.wavenumber(omega);
        let j = Complex64::i();
        match self {
            DelanyBazleyVariant::Original => {
                let e = 1e3 * x;
                let zc = z0 * (1.0 + 9.08 * e.powf(-0.75) - j * 11.9 * e.powf(-0.73));
                let k = k0 * (1.0 + 10.8 * e.powf(-0.70) - j * 10.3 * e.powf(-0.59));
                (zc, k)
            }
            DelanyBazleyVariant::Miki => {
                let e = 1e3 * x;
                let zc = z0 * (1.0 + 5.50 * e.powf(-0.632) - j * 8.43 * e.powf(-0.632));
                let k = k0 * (1.0 + 7.81 * e.powf(-0.618) - j * 11.41 * e.powf(-0.618));
                (zc, k)
            }
            DelanyBazleyVariant::AllardChampoux => {
                let (rho, bulk) = allard_champoux_fluid(x, air);
                (physical_sqrt(rho * bulk), omega * physical_sqrt(rho / bulk))
            }
        }
    }
}

/// Dynamic density and bulk modulus of the Allard-Champoux fit.
fn allard_champoux_fluid(x: f64, air: &AirProperties) -> (Complex64, Complex64) {
    let j = Complex64::i();
    let rho = air.density + physical_sqrt(Complex64::new(-0.0364 / (x * x), -0.1144 / x));
    let root = physical_sqrt(Complex64::new(2.82 / (x * x), 24.9 / x));
    let bulk = air.pressure * (j * 29.64 + root) / (j * 21.17 + root);
    (rho, bulk)
}

/// Delany-Bazley family response. Only the flow resistivity is required.
///
/// Frequencies whose X falls outside the fitted band are still computed, but
/// a single [`Warning::ModelApplicability`] summarising them is attached.
pub fn delany_bazley(
    material: &MaterialParameters,
    frequencies: &FrequencyRange,
    air: &AirProperties,
    variant: DelanyBazleyVariant,
) -> AbsorpResult<ModelEvaluation> {
    let sigma = material.require(variant.name(), "flow_resistivity", material.flow_resistivity)?;

    let response = sweep(frequencies, |freq, omega| {
        variant.sample(freq / sigma, omega, air)
    });

    let mut warnings = Vec::new();
    if let Some((lower, upper)) = variant.fitted_band() {
        let outside: Vec<f64> = frequencies
            .iter()
            .filter(|f| {
                let x = f / sigma;
                x < lower || x > upper
            })
            .collect();
        if let (Some(&first), Some(&last)) = (outside.first(), outside.last()) {
            warn!(
                model = variant.name(),
                out_of_range = outside.len(),
                first,
                last,
                "f/σ outside the fitted band [{lower}, {upper}]"
            );
            warnings.push(Warning::ModelApplicability {
                model: variant.name(),
                lower,
                upper,
                out_of_range: outside.len(),
                first_frequency: first,
                last_frequency: last,
            });
        }
    }

    Ok(ModelEvaluation { response, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AbsorpError;

    fn at(freqs: Vec<f64>) -> FrequencyRange {
        FrequencyRange::new(freqs).unwrap()
    }

    #[test]
    fn test_original_reference_point() {
        let air = AirProperties::standard();
        let material = MaterialParameters::new().with_flow_resistivity(20_000.0);
        let eval = delany_bazley(&material, &at(vec![1000.0]), &air, DelanyBazleyVariant::Original)
            .unwrap();
        let (zc, k) = eval.response.iter().next().unwrap();
        assert!((zc - Complex64::new(611.4488, -282.1933)).norm() < 1e-3, "Zc = {zc}");
        assert!((k - Complex64::new(30.99253, -18.69155)).norm() < 1e-4, "k = {k}");
        assert!(eval.warnings.is_empty());
    }

    #[test]
    fn test_variants_reference_points() {
        let air = AirProperties::standard();
        let material = MaterialParameters::new().with_flow_resistivity(20_000.0);
        let cases = [
            (DelanyBazleyVariant::Miki, Complex64::new(603.6973, -293.3097), Complex64::new(30.94984, -18.55763)),
            (
                DelanyBazleyVariant::AllardChampoux,
                Complex64::new(590.5607, -349.3070),
                Complex64::new(29.63774, -23.19132),
            ),
        ];
        for (variant, zc_ref, k_ref) in cases {
            let eval = delany_bazley(&material, &at(vec![1000.0]), &air, variant).unwrap();
            let (zc, k) = eval.response.iter().next().unwrap();
            assert!((zc - zc_ref).norm() < 1e-3, "{}: Zc = {zc}", variant.name());
            assert!((k - k_ref).norm() < 1e-4, "{}: k = {k}", variant.name());
        }
    }

    #[test]
    fn test_out_of_band_is_flagged_not_rejected() {
        let air = AirProperties::standard();
        let material = MaterialParameters::new().with_flow_resistivity(50_000.0);
        // X = 0.002, 0.02, 0.2
        let eval = delany_bazley(
            &material,
            &at(vec![100.0, 1000.0, 10_000.0]),
            &air,
            DelanyBazleyVariant::Original,
        )
        .unwrap();
        assert_eq!(eval.response.len(), 3);
        assert_eq!(
            eval.warnings,
            vec![Warning::ModelApplicability {
                model: "Delany-Bazley",
                lower: 0.01,
                upper: 1.0,
                out_of_range: 1,
                first_frequency: 100.0,
                last_frequency: 100.0,
            }]
        );
    }

    #[test]
    fn test_allard_champoux_is_not_band_limited() {
        let air = AirProperties::standard();
        let material = MaterialParameters::new().with_flow_resistivity(50_000.0);
        let eval = delany_bazley(
            &material,
            &at(vec![20.0, 100.0]),
            &air,
            DelanyBazleyVariant::AllardChampoux,
        )
        .unwrap();
        assert!(eval.warnings.is_empty());
        for (zc, k) in eval.response.iter() {
            assert!(zc.re > 0.0 && k.re > 0.0 && k.im < 0.0, "Zc = {zc}, k = {k}");
        }
    }

    #[test]
    fn test_allard_champoux_bulk_modulus_limits() {
        // Low X tends to the isothermal modulus, high X to the adiabatic one.
        let air = AirProperties::standard();
        for (x, expected) in [(1e-5, air.pressure), (1e3, air.pressure * 29.64 / 21.17)] {
            let (_, bulk) = allard_champoux_fluid(x, &air);
            assert!((bulk.re - expected).abs() / expected < 0.02, "X = {x}: K = {bulk}");
        }
    }

    #[test]
    fn test_allard_champoux_follows_ambient_air() {
        // At the conditions the fit was published for, the published values
        // come back
        let published = AirProperties {
            density: 1.2,
            pressure: 101_320.0,
            ..AirProperties::standard()
        };
        let omega = 2.0 * std::f64::consts::PI * 1000.0;
        let (zc, k) = DelanyBazleyVariant::AllardChampoux.sample(0.05, omega, &published);
        assert!((zc - Complex64::new(590.7118, -349.1687)).norm() < 1e-3, "Zc = {zc}");
        assert!((k - Complex64::new(29.64840, -23.18602)).norm() < 1e-4, "k = {k}");

        let thin = AirProperties {
            density: 1.0,
            pressure: 85_000.0,
            ..AirProperties::standard()
        };
        let (zc_thin, _) = DelanyBazleyVariant::AllardChampoux.sample(0.05, omega, &thin);
        assert!((zc_thin - zc).norm() > 1.0, "{zc_thin} vs {zc}");
    }

    #[test]
    fn test_requires_flow_resistivity() {
        let air = AirProperties::standard();
        let err = delany_bazley(
            &MaterialParameters::new(),
            &at(vec![1000.0]),
            &air,
            DelanyBazleyVariant::Miki,
        )
        .unwrap_err();
        assert_eq!(
            err,
            AbsorpError::MissingParameter {
                model: "Delany-Bazley-Miki",
                parameter: "flow_resistivity"
            }
        );
    }

    #[test]
    fn test_propagation_constant_decays() {
        let air = AirProperties::standard();
        let material = MaterialParameters::new().with_flow_resistivity(10_000.0);
        let range = FrequencyRange::logarithmic(100.0, 10_000.0, 50).unwrap();
        for variant in [
            DelanyBazleyVariant::Original,
            DelanyBazleyVariant::Miki,
            DelanyBazleyVariant::AllardChampoux,
        ] {
            let eval = delany_bazley(&material, &range, &air, variant).unwrap();
            for (_, k) in eval.response.iter() {
                assert!(k.re > 0.0 && k.im < 0.0, "{}: k = {k}", variant.name());
            }
        }
    }
}
