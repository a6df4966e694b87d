use crate::error::{AbsorpError, AbsorpResult};
use crate::frequency::FrequencyRange;
use num_complex::Complex64;
use rayon::prelude::*;
use serde::Serialize;
use std::f64::consts::PI;

/// Characteristic impedance and propagation constant of an equivalent fluid,
/// sampled on a [`FrequencyRange`].
///
/// Both sequences are index-aligned with the frequencies they were computed
/// on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplexFrequencyResponse {
    characteristic_impedance: Vec<Complex64>,
    propagation_constant: Vec<Complex64>,
}

impl ComplexFrequencyResponse {
    /// Pair up the two sequences. They must have the same length.
    pub fn new(
        characteristic_impedance: Vec<Complex64>,
        propagation_constant: Vec<Complex64>,
    ) -> AbsorpResult<Self> {
        if characteristic_impedance.len() != propagation_constant.len() {
            return Err(AbsorpError::validation(
                "frequency response",
                format!(
                    "{} impedance samples but {} propagation samples",
                    characteristic_impedance.len(),
                    propagation_constant.len()
                ),
            ));
        }
        Ok(Self {
            characteristic_impedance,
            propagation_constant,
        })
    }

    /// Characteristic impedance Zc(f) in Pa·s/m.
    pub fn characteristic_impedance(&self) -> &[Complex64] {
        &self.characteristic_impedance
    }

    /// Propagation constant k(f) in rad/m.
    pub fn propagation_constant(&self) -> &[Complex64] {
        &self.propagation_constant
    }

    pub fn len(&self) -> usize {
        self.characteristic_impedance.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characteristic_impedance.is_empty()
    }

    /// `(Zc, k)` pairs in frequency order.
    pub fn iter(&self) -> impl Iterator<Item = (Complex64, Complex64)> + '_ {
        self.characteristic_impedance
            .iter()
            .copied()
            .zip(self.propagation_constant.iter().copied())
    }
}

/// Evaluate `sample` at every frequency of `frequencies` and collect the
/// results in frequency order.
///
/// `sample` receives the frequency in Hz and the angular frequency in rad/s
/// and returns `(Zc, k)`. Samples are independent, so they are evaluated in
/// parallel.
pub fn sweep<F>(frequencies: &FrequencyRange, sample: F) -> ComplexFrequencyResponse
where
    F: Fn(f64, f64) -> (Complex64, Complex64) + Sync,
{
    let (characteristic_impedance, propagation_constant) = frequencies
        .as_slice()
        .par_iter()
        .map(|&freq| sample(freq, 2.0 * PI * freq))
        .unzip();

    ComplexFrequencyResponse {
        characteristic_impedance,
        propagation_constant,
    }
}
