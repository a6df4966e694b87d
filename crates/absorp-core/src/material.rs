//! Material parameters shared by all propagation models.
//!
//! Most of these are laboratory parameters: each model family reads the
//! subset it needs and reports the first missing one. Present values are
//! always checked against their physical domain, whether or not the selected
//! model uses them.

use crate::error::{AbsorpError, AbsorpResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cross-section of the pores, used by the Biot-Allard model when the
/// characteristic lengths have not been measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PoreShape {
    Circle,
    Square,
    EquilateralTriangle,
    Rectangle,
}

impl PoreShape {
    /// Shape factor c₁ relative to a circular pore.
    pub fn factor(self) -> f64 {
        match self {
            PoreShape::Circle => 1.0,
            PoreShape::Square => 1.07,
            PoreShape::EquilateralTriangle => 1.11,
            PoreShape::Rectangle => 0.81,
        }
    }
}

impl fmt::Display for PoreShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PoreShape::Circle => "circle",
            PoreShape::Square => "square",
            PoreShape::EquilateralTriangle => "equilateral-triangle",
            PoreShape::Rectangle => "rectangle",
        };
        f.write_str(name)
    }
}

impl FromStr for PoreShape {
    type Err = AbsorpError;

    fn from_str(s: &str) -> AbsorpResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circle" | "circular" => Ok(PoreShape::Circle),
            "square" => Ok(PoreShape::Square),
            "equilateral-triangle" | "equi-tri" | "triangle" => Ok(PoreShape::EquilateralTriangle),
            "rectangle" | "retang" | "rectangular" => Ok(PoreShape::Rectangle),
            other => Err(AbsorpError::validation(
                "pore shape",
                format!("unknown shape '{other}'"),
            )),
        }
    }
}

/// Physical description of a porous material.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialParameters {
    /// Static airflow resistivity σ in Pa·s/m².
    pub flow_resistivity: Option<f64>,
    /// Open porosity φ in (0, 1].
    pub porosity: Option<f64>,
    /// Tortuosity α∞ (≥ 1).
    pub tortuosity: Option<f64>,
    /// Viscous characteristic length Λ in m.
    pub viscous_length: Option<f64>,
    /// Thermal characteristic length Λ′ in m.
    pub thermal_length: Option<f64>,
    /// Static thermal permeability k₀′ in m².
    pub thermal_permeability: Option<f64>,
    /// Pore cross-section.
    pub pore_shape: Option<PoreShape>,
}

impl MaterialParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flow_resistivity(mut self, sigma: f64) -> Self {
        self.flow_resistivity = Some(sigma);
        self
    }

    pub fn with_porosity(mut self, phi: f64) -> Self {
        self.porosity = Some(phi);
        self
    }

    pub fn with_tortuosity(mut self, alpha_inf: f64) -> Self {
        self.tortuosity = Some(alpha_inf);
        self
    }

    pub fn with_viscous_length(mut self, length: f64) -> Self {
        self.viscous_length = Some(length);
        self
    }

    pub fn with_thermal_length(mut self, length: f64) -> Self {
        self.thermal_length = Some(length);
        self
    }

    pub fn with_thermal_permeability(mut self, k0: f64) -> Self {
        self.thermal_permeability = Some(k0);
        self
    }

    pub fn with_pore_shape(mut self, shape: PoreShape) -> Self {
        self.pore_shape = Some(shape);
        self
    }

    /// Check every present field against its physical domain.
    pub fn validate(&self) -> AbsorpResult<()> {
        positive("flow resistivity", self.flow_resistivity)?;
        positive("viscous characteristic length", self.viscous_length)?;
        positive("thermal characteristic length", self.thermal_length)?;
        positive("static thermal permeability", self.thermal_permeability)?;

        if let Some(phi) = self.porosity {
            if !(phi > 0.0 && phi <= 1.0) {
                return Err(AbsorpError::validation(
                    "porosity",
                    format!("must lie in (0, 1], got {phi}"),
                ));
            }
        }
        if let Some(alpha) = self.tortuosity {
            if !(alpha.is_finite() && alpha >= 1.0) {
                return Err(AbsorpError::validation(
                    "tortuosity",
                    format!("must be at least 1, got {alpha}"),
                ));
            }
        }
        Ok(())
    }

    /// Validated access to a field a model cannot run without.
    pub(crate) fn require(
        &self,
        model: &'static str,
        parameter: &'static str,
        value: Option<f64>,
    ) -> AbsorpResult<f64> {
        self.validate()?;
        value.ok_or(AbsorpError::MissingParameter { model, parameter })
    }
}

fn positive(what: &'static str, value: Option<f64>) -> AbsorpResult<()> {
    match value {
        Some(v) if !(v.is_finite() && v > 0.0) => Err(AbsorpError::validation(
            what,
            format!("must be positive, got {v}"),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_factors() {
        assert_eq!(PoreShape::Circle.factor(), 1.0);
        assert_eq!(PoreShape::Square.factor(), 1.07);
        assert_eq!(PoreShape::EquilateralTriangle.factor(), 1.11);
        assert_eq!(PoreShape::Rectangle.factor(), 0.81);
    }

    #[test]
    fn test_shape_names_round_trip() {
        for shape in [
            PoreShape::Circle,
            PoreShape::Square,
            PoreShape::EquilateralTriangle,
            PoreShape::Rectangle,
        ] {
            assert_eq!(shape.to_string().parse::<PoreShape>().unwrap(), shape);
        }
        assert_eq!("equi-tri".parse::<PoreShape>().unwrap(), PoreShape::EquilateralTriangle);
        assert!("hexagon".parse::<PoreShape>().is_err());
    }

    #[test]
    fn test_validate_domains() {
        let ok = MaterialParameters::new()
            .with_flow_resistivity(20_000.0)
            .with_porosity(1.0)
            .with_tortuosity(1.0);
        assert!(ok.validate().is_ok());

        let bad = [
            MaterialParameters::new().with_porosity(0.0),
            MaterialParameters::new().with_porosity(1.01),
            MaterialParameters::new().with_flow_resistivity(0.0),
            MaterialParameters::new().with_flow_resistivity(-5.0),
            MaterialParameters::new().with_tortuosity(0.9),
            MaterialParameters::new().with_viscous_length(0.0),
            MaterialParameters::new().with_thermal_length(f64::INFINITY),
            MaterialParameters::new().with_thermal_permeability(-1e-9),
        ];
        for material in bad {
            assert!(
                matches!(material.validate(), Err(AbsorpError::Validation { .. })),
                "{material:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_require_reports_missing_field() {
        let material = MaterialParameters::new().with_porosity(0.9);
        let err = material
            .require("Rayleigh", "flow_resistivity", material.flow_resistivity)
            .unwrap_err();
        assert_eq!(
            err,
            AbsorpError::MissingParameter {
                model: "Rayleigh",
                parameter: "flow_resistivity"
            }
        );
    }

    #[test]
    fn test_require_prefers_validation_error() {
        let material = MaterialParameters::new().with_porosity(2.0);
        let err = material
            .require("Rayleigh", "porosity", material.porosity)
            .unwrap_err();
        assert!(matches!(err, AbsorpError::Validation { what: "porosity", .. }));
    }

    #[test]
    fn test_deserialize_partial_material() {
        let material: MaterialParameters = serde_json::from_str(
            r#"{ "flow_resistivity": 10900.0, "porosity": 0.98, "pore_shape": "square" }"#,
        )
        .unwrap();
        assert_eq!(material.flow_resistivity, Some(10900.0));
        assert_eq!(material.pore_shape, Some(PoreShape::Square));
        assert_eq!(material.tortuosity, None);
    }
}
