//! Equivalent-fluid propagation models.
//!
//! Each model maps material parameters and a frequency range to the complex
//! characteristic impedance Zc(f) and propagation constant k(f) of the
//! material. All models are pure functions over immutable inputs; [`Model`]
//! is the tag that selects one of them.
//!
//! Sign convention is `e^{jωt}`: a physical propagation constant has a
//! non-negative real part and a non-positive imaginary part.

pub mod biot_allard;
pub mod delany_bazley;
pub mod johnson_champoux;
pub mod rayleigh;

use crate::air::AirProperties;
use crate::error::{AbsorpError, AbsorpResult, Warning};
use crate::frequency::FrequencyRange;
use crate::frequency_response::ComplexFrequencyResponse;
use crate::material::MaterialParameters;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use delany_bazley::DelanyBazleyVariant;
pub use johnson_champoux::JohnsonChampouxVariant;

/// Output of a model evaluation: the response plus any applicability
/// warnings raised on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelEvaluation {
    pub response: ComplexFrequencyResponse,
    pub warnings: Vec<Warning>,
}

impl From<ComplexFrequencyResponse> for ModelEvaluation {
    fn from(response: ComplexFrequencyResponse) -> Self {
        Self {
            response,
            warnings: Vec::new(),
        }
    }
}

/// Selects one propagation model.
///
/// Rayleigh is the default: it needs the fewest parameters and is the usual
/// sanity check for the others.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Model {
    DelanyBazley(DelanyBazleyVariant),
    BiotAllard,
    JohnsonChampoux(JohnsonChampouxVariant),
    #[default]
    Rayleigh,
}

impl Model {
    /// Every model and variant, in a stable order.
    pub const ALL: [Model; 8] = [
        Model::DelanyBazley(DelanyBazleyVariant::Original),
        Model::DelanyBazley(DelanyBazleyVariant::Miki),
        Model::DelanyBazley(DelanyBazleyVariant::AllardChampoux),
        Model::BiotAllard,
        Model::JohnsonChampoux(JohnsonChampouxVariant::Original),
        Model::JohnsonChampoux(JohnsonChampouxVariant::Allard),
        Model::JohnsonChampoux(JohnsonChampouxVariant::Lafarge),
        Model::Rayleigh,
    ];

    /// Human-readable model name.
    pub fn name(self) -> &'static str {
        match self {
            Model::DelanyBazley(variant) => variant.name(),
            Model::BiotAllard => "Biot-Allard",
            Model::JohnsonChampoux(variant) => variant.name(),
            Model::Rayleigh => "Rayleigh",
        }
    }

    /// Whether the model is an empirical fit (as opposed to a physical
    /// derivation). Empirical models may yield non-physical surface
    /// impedances outside their fitted band.
    pub fn is_empirical(self) -> bool {
        matches!(self, Model::DelanyBazley(_))
    }

    /// Evaluate the model on `frequencies`.
    pub fn evaluate(
        self,
        material: &MaterialParameters,
        frequencies: &FrequencyRange,
        air: &AirProperties,
    ) -> AbsorpResult<ModelEvaluation> {
        match self {
            Model::DelanyBazley(variant) => {
                delany_bazley::delany_bazley(material, frequencies, air, variant)
            }
            Model::BiotAllard => biot_allard::biot_allard(material, frequencies, air).map(Into::into),
            Model::JohnsonChampoux(variant) => {
                johnson_champoux::johnson_champoux(material, frequencies, air, variant)
                    .map(Into::into)
            }
            Model::Rayleigh => rayleigh::rayleigh(material, frequencies, air).map(Into::into),
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Model {
    type Err = AbsorpError;

    /// Accepts short codes (`db`, `miki`, `ac`, `ba`, `jc`, `jca`, `jcal`,
    /// `r`) and the full kebab-case names, ignoring case.
    fn from_str(s: &str) -> AbsorpResult<Self> {
        let key = s.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        let model = match key.as_str() {
            "db" | "delany-bazley" => Model::DelanyBazley(DelanyBazleyVariant::Original),
            "miki" | "delany-bazley-miki" => Model::DelanyBazley(DelanyBazleyVariant::Miki),
            "ac" | "allard-champoux" | "delany-bazley-allard-champoux" => {
                Model::DelanyBazley(DelanyBazleyVariant::AllardChampoux)
            }
            "ba" | "biot-allard" => Model::BiotAllard,
            "jc" | "johnson-champoux" => Model::JohnsonChampoux(JohnsonChampouxVariant::Original),
            "jca" | "johnson-champoux-allard" => {
                Model::JohnsonChampoux(JohnsonChampouxVariant::Allard)
            }
            "jcal" | "johnson-champoux-allard-lafarge" => {
                Model::JohnsonChampoux(JohnsonChampouxVariant::Lafarge)
            }
            "r" | "ray" | "rayleigh" => Model::Rayleigh,
            _ => {
                return Err(AbsorpError::UnknownModel {
                    name: s.to_string(),
                })
            }
        };
        Ok(model)
    }
}

/// Square root on the physical branch: the root with non-negative real part,
/// and on the imaginary axis the root with non-positive imaginary part.
///
/// Numeric libraries disagree on the branch cut of `sqrt` near the negative
/// real axis, so models never call `Complex64::sqrt` directly.
pub fn physical_sqrt(z: Complex64) -> Complex64 {
    let root = z.sqrt();
    if root.re < 0.0 || (root.re == 0.0 && root.im > 0.0) {
        -root
    } else {
        root
    }
}

/// √(−j), the rotation applied to Bessel arguments in the pore models.
pub(crate) fn sqrt_minus_j() -> Complex64 {
    Complex64::from_polar(1.0, -std::f64::consts::FRAC_PI_4)
}
