use crate::air::AirProperties;
use crate::transfer_matrix::TransferMatrix;
use crate::AcousticElement;
use num_complex::Complex64;

/// A slab of porous material, described at one frequency by the equivalent
/// fluid a propagation model produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PorousLayer {
    /// Characteristic impedance Zc in Pa·s/m.
    pub characteristic_impedance: Complex64,
    /// Propagation constant k in rad/m.
    pub propagation_constant: Complex64,
    /// Thickness in metres.
    pub thickness: f64,
}

impl PorousLayer {
    pub fn new(characteristic_impedance: Complex64, propagation_constant: Complex64, thickness: f64) -> Self {
        Self {
            characteristic_impedance,
            propagation_constant,
            thickness,
        }
    }
}

impl AcousticElement for PorousLayer {
    fn transfer_matrix(&self, _omega: f64, _air: &AirProperties) -> TransferMatrix {
        TransferMatrix::layer(self.characteristic_impedance, self.propagation_constant, self.thickness)
    }
}

/// A lossless air cavity between the material and the wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirGap {
    /// Depth in metres.
    pub thickness: f64,
}

impl AirGap {
    pub fn new(thickness: f64) -> Self {
        Self { thickness }
    }
}

impl AcousticElement for AirGap {
    fn transfer_matrix(&self, omega: f64, air: &AirProperties) -> TransferMatrix {
        TransferMatrix::layer(
            Complex64::new(air.impedance, 0.0),
            Complex64::new(air.wavenumber(omega), 0.0),
            self.thickness,
        )
    }
}
