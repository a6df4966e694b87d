use serde::{Deserialize, Serialize};

/// Reference ambient temperature in °C.
pub const REFERENCE_TEMPERATURE: f64 = 20.0;

/// Reference relative humidity in percent.
pub const REFERENCE_HUMIDITY: f64 = 50.0;

/// Standard atmospheric pressure in Pa.
pub const STANDARD_PRESSURE: f64 = 101_325.0;

/// Fixed physical constants used when deriving air properties.
///
/// These never change during a run; they are passed explicitly alongside the
/// ambient conditions so that every evaluation is reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalConstants {
    /// Thermal conductivity of air in W/(m·K).
    pub thermal_conductivity: f64,
    /// Specific gas constant of dry air in J/(kg·K).
    pub air_gas_constant: f64,
    /// Specific gas constant of water vapour in J/(kg·K).
    pub water_vapour_gas_constant: f64,
    /// Offset between the Celsius and Kelvin scales.
    pub kelvin_offset: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            thermal_conductivity: 0.026,
            air_gas_constant: 287.031,
            water_vapour_gas_constant: 461.521,
            kelvin_offset: 273.15,
        }
    }
}

impl PhysicalConstants {
    /// Convert a Celsius temperature to Kelvin.
    pub fn to_kelvin(&self, temperature_c: f64) -> f64 {
        temperature_c + self.kelvin_offset
    }
}
