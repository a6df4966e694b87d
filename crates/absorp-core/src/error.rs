//! Errors and non-fatal warnings raised by the absorption engine.

use num_complex::Complex64;
use serde::Serialize;
use thiserror::Error;

/// Result type for engine operations.
pub type AbsorpResult<T> = Result<T, AbsorpError>;

/// Fatal conditions. Any of these halts the evaluation; no partial results
/// are returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AbsorpError {
    /// A parameter lies outside its physical domain.
    #[error("Invalid {what}: {reason}")]
    Validation { what: &'static str, reason: String },

    /// A model was asked to run without one of the fields it needs.
    #[error("{model} requires {parameter}")]
    MissingParameter {
        model: &'static str,
        parameter: &'static str,
    },

    /// The surface impedance has a negative real part (the layer would
    /// generate energy).
    #[error("Non-physical surface impedance {impedance} at sample {index}")]
    NonPhysicalImpedance { index: usize, impedance: Complex64 },

    /// A model selector string did not name any known model.
    #[error("Unknown model '{name}'")]
    UnknownModel { name: String },
}

impl AbsorpError {
    pub(crate) fn validation(what: &'static str, reason: impl Into<String>) -> Self {
        AbsorpError::Validation {
            what,
            reason: reason.into(),
        }
    }
}

/// Non-fatal conditions attached to a result. The computation still ran to
/// completion, but the affected samples deserve scrutiny.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Warning {
    /// Some frequencies fall outside the band an empirical model was fitted on.
    ModelApplicability {
        model: &'static str,
        /// Lower bound of the fitted band of the dimensionless group.
        lower: f64,
        /// Upper bound of the fitted band of the dimensionless group.
        upper: f64,
        /// Number of samples outside the band.
        out_of_range: usize,
        first_frequency: f64,
        last_frequency: f64,
    },
    /// The backed layer has no finite input impedance at this frequency
    /// (k·d at a zero of sin). Zs is reported as infinite.
    NumericalSingularity { frequency: f64 },
}
