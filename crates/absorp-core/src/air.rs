//! Ambient air properties.
//!
//! Every model needs the same handful of air quantities (density, speed of
//! sound, viscosity, Prandtl number, ...). They are derived once from the
//! ambient conditions and then passed by value into each evaluation.

use crate::constants::{
    PhysicalConstants, REFERENCE_HUMIDITY, REFERENCE_TEMPERATURE, STANDARD_PRESSURE,
};
use crate::error::{AbsorpError, AbsorpResult};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Ambient conditions of the measurement or design case.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientConditions {
    /// Air temperature in °C.
    pub temperature: f64,
    /// Relative humidity in percent (0–100).
    pub relative_humidity: f64,
    /// Atmospheric pressure in Pa.
    pub pressure: f64,
}

impl Default for AmbientConditions {
    fn default() -> Self {
        Self {
            temperature: REFERENCE_TEMPERATURE,
            relative_humidity: REFERENCE_HUMIDITY,
            pressure: STANDARD_PRESSURE,
        }
    }
}

/// Air properties derived from [`AmbientConditions`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AirProperties {
    /// Absolute temperature in K.
    pub temperature: f64,
    /// Atmospheric pressure P₀ in Pa.
    pub pressure: f64,
    /// Density ρ₀ in kg/m³.
    pub density: f64,
    /// Speed of sound c₀ in m/s.
    pub speed_of_sound: f64,
    /// Characteristic impedance Z₀ = ρ₀c₀ in Pa·s/m.
    pub impedance: f64,
    /// Dynamic viscosity η in Pa·s.
    pub viscosity: f64,
    /// Ratio of specific heats γ.
    pub specific_heat_ratio: f64,
    /// Prandtl number.
    pub prandtl: f64,
    /// Specific heat at constant pressure in J/(kg·K).
    pub specific_heat_cp: f64,
    /// Specific heat at constant volume in J/(kg·K).
    pub specific_heat_cv: f64,
    /// Thermal conductivity in W/(m·K).
    pub thermal_conductivity: f64,
}

impl AirProperties {
    /// Derive air properties with the default physical constants.
    pub fn from_conditions(conditions: &AmbientConditions) -> AbsorpResult<Self> {
        Self::with_constants(conditions, &PhysicalConstants::default())
    }

    /// Derive air properties from ambient conditions and explicit constants.
    pub fn with_constants(
        conditions: &AmbientConditions,
        constants: &PhysicalConstants,
    ) -> AbsorpResult<Self> {
        let t = constants.to_kelvin(conditions.temperature);
        if !t.is_finite() || t <= 0.0 {
            return Err(AbsorpError::validation(
                "temperature",
                format!("must be above absolute zero, got {} °C", conditions.temperature),
            ));
        }
        if !(0.0..=100.0).contains(&conditions.relative_humidity) {
            return Err(AbsorpError::validation(
                "relative humidity",
                format!("must lie in [0, 100] %, got {}", conditions.relative_humidity),
            ));
        }
        if !conditions.pressure.is_finite() || conditions.pressure <= 0.0 {
            return Err(AbsorpError::validation(
                "pressure",
                format!("must be positive, got {} Pa", conditions.pressure),
            ));
        }

        for (what, value) in [
            ("thermal conductivity", constants.thermal_conductivity),
            ("air gas constant", constants.air_gas_constant),
            ("water vapour gas constant", constants.water_vapour_gas_constant),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(AbsorpError::validation(what, format!("must be positive, got {value}")));
            }
        }

        let air = Self::derive(t, conditions, constants);
        for (what, value) in [
            ("air viscosity", air.viscosity),
            ("specific heat at constant pressure", air.specific_heat_cp),
            ("specific heat at constant volume", air.specific_heat_cv),
            ("specific heat ratio", air.specific_heat_ratio),
            ("prandtl number", air.prandtl),
            ("air density", air.density),
            ("speed of sound", air.speed_of_sound),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(AbsorpError::validation(
                    what,
                    format!("derived value {value} is not positive"),
                ));
            }
        }
        trace!(?air, "derived air properties");
        Ok(air)
    }

    /// Air at 20 °C, 50 % relative humidity and 101325 Pa.
    pub fn standard() -> Self {
        let conditions = AmbientConditions::default();
        let constants = PhysicalConstants::default();
        Self::derive(constants.to_kelvin(conditions.temperature), &conditions, &constants)
    }

    fn derive(t: f64, conditions: &AmbientConditions, constants: &PhysicalConstants) -> Self {
        let viscosity = viscosity(t);
        let cp = specific_heat_cp(t);
        let cv = cp - constants.air_gas_constant;
        let gamma = cp / cv;

        let vapour = (1.0 / constants.air_gas_constant - 1.0 / constants.water_vapour_gas_constant)
            * conditions.relative_humidity
            / 100.0
            * saturation_pressure(t)
            / t;
        let density = conditions.pressure / (constants.air_gas_constant * t) - vapour;
        let speed_of_sound = (gamma * conditions.pressure / density).sqrt();

        Self {
            temperature: t,
            pressure: conditions.pressure,
            density,
            speed_of_sound,
            impedance: density * speed_of_sound,
            viscosity,
            specific_heat_ratio: gamma,
            prandtl: viscosity * cp / constants.thermal_conductivity,
            specific_heat_cp: cp,
            specific_heat_cv: cv,
            thermal_conductivity: constants.thermal_conductivity,
        }
    }

    /// Adiabatic bulk modulus γP₀ in Pa.
    pub fn adiabatic_bulk_modulus(&self) -> f64 {
        self.specific_heat_ratio * self.pressure
    }

    /// Free-field wavenumber ω/c₀ in rad/m.
    pub fn wavenumber(&self, omega: f64) -> f64 {
        omega / self.speed_of_sound
    }
}

/// Dynamic viscosity of air in Pa·s at temperature `t` in K.
pub fn viscosity(t: f64) -> f64 {
    7.72488e-8 * t - 5.95238e-11 * t.powi(2) + 2.71368e-14 * t.powi(3)
}

/// Specific heat at constant pressure in J/(kg·K), fitted for 260 K < T < 600 K.
pub fn specific_heat_cp(t: f64) -> f64 {
    4168.8 * (0.249679 - 7.55179e-5 * t + 1.69194e-7 * t.powi(2) - 6.46128e-11 * t.powi(3))
}

/// Water vapour saturation term in Pa used by the humid-air density.
pub fn saturation_pressure(t: f64) -> f64 {
    0.0658 * t.powi(3) - 53.7558 * t.powi(2) + 14703.8127 * t - 1345485.0465
}
