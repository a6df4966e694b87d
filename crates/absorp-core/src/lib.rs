//! Normal-incidence sound absorption of porous materials.
//!
//! A propagation model turns material parameters into an equivalent fluid
//! (characteristic impedance and propagation constant per frequency), a
//! termination turns that fluid into a surface impedance, and the surface
//! impedance gives the reflection and absorption coefficients.
//!
//! Every call is a pure function of its inputs: air properties are passed in
//! explicitly and nothing is cached between calls.

pub mod absorption;
pub mod air;
pub mod constants;
pub mod elements;
pub mod error;
pub mod frequency;
pub mod frequency_response;
pub mod material;
pub mod models;
pub mod termination;
pub mod transfer_matrix;

pub use absorption::AbsorptionResult;
pub use air::{AirProperties, AmbientConditions};
pub use constants::PhysicalConstants;
pub use error::{AbsorpError, AbsorpResult, Warning};
pub use frequency::FrequencyRange;
pub use frequency_response::ComplexFrequencyResponse;
pub use material::{MaterialParameters, PoreShape};
pub use models::{DelanyBazleyVariant, JohnsonChampouxVariant, Model};
pub use termination::Termination;

use models::ModelEvaluation;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Trait for layers that can produce a 2×2 transfer matrix at a given
/// angular frequency.
pub trait AcousticElement: Send + Sync {
    /// Compute the 2×2 transfer matrix at angular frequency `omega` (rad/s)
    /// in air described by `air`.
    fn transfer_matrix(&self, omega: f64, air: &AirProperties) -> transfer_matrix::TransferMatrix;
}

/// One complete evaluation case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setup {
    #[serde(default)]
    pub ambient: AmbientConditions,
    #[serde(default)]
    pub constants: PhysicalConstants,
    pub material: MaterialParameters,
    #[serde(default)]
    pub model: Model,
    pub termination: Termination,
}

impl Setup {
    /// A setup at the reference ambient conditions.
    pub fn new(material: MaterialParameters, model: Model, termination: Termination) -> Self {
        Self {
            ambient: AmbientConditions::default(),
            constants: PhysicalConstants::default(),
            material,
            model,
            termination,
        }
    }

    pub fn air(&self) -> AbsorpResult<AirProperties> {
        AirProperties::with_constants(&self.ambient, &self.constants)
    }
}

/// Run one model through one termination.
///
/// Validation errors (bad thickness, missing or out-of-domain parameters)
/// are raised before anything is computed.
pub fn evaluate(
    material: &MaterialParameters,
    model: Model,
    termination: &Termination,
    frequencies: &FrequencyRange,
    air: &AirProperties,
) -> AbsorpResult<AbsorptionResult> {
    debug!(
        %model,
        samples = frequencies.len(),
        ?termination,
        "evaluating absorption"
    );
    termination.validate()?;

    let ModelEvaluation {
        response,
        mut warnings,
    } = model.evaluate(material, frequencies, air)?;
    let surface = termination::surface_impedance(&response, termination, frequencies, air)?;
    let (reflection, absorption) =
        absorption::reflection_and_absorption(&surface.values, air.impedance)?;
    warnings.extend(surface.warnings);

    Ok(AbsorptionResult {
        frequencies: frequencies.as_slice().to_vec(),
        absorption,
        reflection,
        surface_impedance: surface.values,
        response,
        warnings,
    })
}

/// Derive the air for `setup` and evaluate its model.
pub fn compute(setup: &Setup, frequencies: &FrequencyRange) -> AbsorpResult<AbsorptionResult> {
    let air = setup.air()?;
    evaluate(&setup.material, setup.model, &setup.termination, frequencies, &air)
}

/// Evaluate several models against the same material and termination.
///
/// Each model succeeds or fails on its own; only an invalid ambient setup
/// fails the whole comparison. Results keep the order of `models`.
pub fn compare_models(
    setup: &Setup,
    models: &[Model],
    frequencies: &FrequencyRange,
) -> AbsorpResult<Vec<(Model, AbsorpResult<AbsorptionResult>)>> {
    let air = setup.air()?;
    debug!(models = models.len(), samples = frequencies.len(), "comparing models");
    Ok(models
        .par_iter()
        .map(|&model| {
            let result = evaluate(&setup.material, model, &setup.termination, frequencies, &air);
            (model, result)
        })
        .collect())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn material() -> impl Strategy<Value = MaterialParameters> {
        (
            1e3_f64..1e5,
            0.3_f64..1.0,
            1.0_f64..3.0,
            20e-6_f64..500e-6,
            1.0_f64..3.0,
            0.5_f64..2.0,
        )
            .prop_map(|(sigma, phi, tortuosity, viscous, stretch, permeability)| {
                let thermal = viscous * stretch;
                MaterialParameters::new()
                    .with_flow_resistivity(sigma)
                    .with_porosity(phi)
                    .with_tortuosity(tortuosity)
                    .with_viscous_length(viscous)
                    .with_thermal_length(thermal)
                    .with_thermal_permeability(phi * thermal * thermal / 8.0 * permeability)
            })
    }

    fn termination() -> impl Strategy<Value = Termination> {
        prop_oneof![
            (0.005_f64..0.2).prop_map(|thickness| Termination::RigidBacking { thickness }),
            (0.005_f64..0.2, 0.005_f64..0.2)
                .prop_map(|(thickness, air_gap)| Termination::AirBacked { thickness, air_gap }),
        ]
    }

    fn frequencies() -> impl Strategy<Value = FrequencyRange> {
        prop::collection::btree_set(50u32..10_000, 1..16).prop_map(|set| {
            FrequencyRange::new(set.into_iter().map(f64::from).collect()).unwrap()
        })
    }

    proptest! {
        #[test]
        fn absorption_stays_in_unit_interval(
            material in material(),
            model_index in 0..Model::ALL.len(),
            termination in termination(),
            frequencies in frequencies(),
        ) {
            let model = Model::ALL[model_index];
            let air = AirProperties::standard();
            match evaluate(&material, model, &termination, &frequencies, &air) {
                Ok(result) => {
                    prop_assert_eq!(result.absorption.len(), frequencies.len());
                    for (alpha, r) in result.absorption.iter().zip(&result.reflection) {
                        prop_assert!((0.0..=1.0).contains(alpha), "{}: α = {}", model, alpha);
                        prop_assert!(r.norm() <= 1.0 + 1e-12, "{}: |R| = {}", model, r.norm());
                    }
                }
                // Empirical fits may leave the passive region below their band
                Err(AbsorpError::NonPhysicalImpedance { .. }) if model.is_empirical() => {}
                Err(err) => prop_assert!(false, "{}: {}", model, err),
            }
        }

        #[test]
        fn parallel_comparison_matches_sequential(
            material in material(),
            termination in termination(),
        ) {
            let setup = Setup::new(material, Model::default(), termination);
            let range = FrequencyRange::logarithmic(100.0, 4000.0, 24).unwrap();
            let air = setup.air().unwrap();
            for (model, result) in compare_models(&setup, &Model::ALL, &range).unwrap() {
                let sequential = evaluate(&setup.material, model, &setup.termination, &range, &air);
                prop_assert_eq!(result, sequential);
            }
        }

        #[test]
        fn non_positive_conductivity_never_yields_result(
            conductivity in prop_oneof![-1.0_f64..=0.0, Just(f64::NAN), Just(f64::INFINITY)],
            model_index in 0..Model::ALL.len(),
        ) {
            let material = MaterialParameters::new().with_flow_resistivity(20_000.0);
            let termination = Termination::RigidBacking { thickness: 0.05 };
            let mut setup = Setup::new(material, Model::ALL[model_index], termination);
            setup.constants.thermal_conductivity = conductivity;
            let outcome = compute(&setup, &FrequencyRange::logarithmic(100.0, 4000.0, 8).unwrap());
            prop_assert!(
                matches!(outcome, Err(AbsorpError::Validation { what: "thermal conductivity", .. })),
                "{:?}",
                outcome
            );
        }
    }
}
