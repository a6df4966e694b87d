use crate::error::{AbsorpError, AbsorpResult};
use serde::{Deserialize, Serialize};

/// An ordered, non-empty set of excitation frequencies in Hz.
///
/// Every frequency is finite and positive and the sequence is strictly
/// increasing. Once built the range is never mutated, so one instance can be
/// shared by any number of evaluations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct FrequencyRange {
    values: Vec<f64>,
}

impl FrequencyRange {
    /// Validate and wrap a list of frequencies.
    pub fn new(values: Vec<f64>) -> AbsorpResult<Self> {
        if values.is_empty() {
            return Err(AbsorpError::validation("frequency range", "is empty"));
        }
        if let Some(f) = values.iter().find(|f| !f.is_finite() || **f <= 0.0) {
            return Err(AbsorpError::validation(
                "frequency range",
                format!("frequencies must be positive, got {f} Hz"),
            ));
        }
        if let Some(w) = values.windows(2).find(|w| w[1] <= w[0]) {
            return Err(AbsorpError::validation(
                "frequency range",
                format!("must be strictly increasing, got {} Hz after {} Hz", w[1], w[0]),
            ));
        }
        Ok(Self { values })
    }

    /// Frequencies from `start` to `stop` (inclusive when it lands on the
    /// grid) in steps of `step` Hz.
    pub fn linear(start: f64, stop: f64, step: f64) -> AbsorpResult<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(AbsorpError::validation(
                "frequency step",
                format!("must be positive, got {step} Hz"),
            ));
        }
        if !(start.is_finite() && stop.is_finite()) || stop < start {
            return Err(AbsorpError::validation(
                "frequency range",
                format!("stop ({stop} Hz) must not precede start ({start} Hz)"),
            ));
        }
        // Tolerate accumulated rounding at the upper end.
        let count = ((stop - start) / step + 1e-6).floor() as usize + 1;
        Self::new((0..count).map(|i| start + i as f64 * step).collect())
    }

    /// `points` frequencies spaced evenly on a logarithmic axis between
    /// `start` and `stop`, both included.
    pub fn logarithmic(start: f64, stop: f64, points: usize) -> AbsorpResult<Self> {
        if points < 2 {
            return Err(AbsorpError::validation(
                "frequency range",
                format!("a logarithmic range needs at least 2 points, got {points}"),
            ));
        }
        if !(start > 0.0 && stop > start && stop.is_finite()) {
            return Err(AbsorpError::validation(
                "frequency range",
                format!("need 0 < start < stop, got {start} Hz to {stop} Hz"),
            ));
        }
        let (lo, hi) = (start.log10(), stop.log10());
        let span = (points - 1) as f64;
        let mut values: Vec<f64> = (0..points)
            .map(|i| 10f64.powf(lo + (hi - lo) * i as f64 / span))
            .collect();
        values[0] = start;
        values[points - 1] = stop;
        Self::new(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }
}

impl Default for FrequencyRange {
    /// 100 Hz to 10 kHz in 1 Hz steps.
    fn default() -> Self {
        Self {
            values: (100..=10_000).map(f64::from).collect(),
        }
    }
}

impl TryFrom<Vec<f64>> for FrequencyRange {
    type Error = AbsorpError;

    fn try_from(values: Vec<f64>) -> AbsorpResult<Self> {
        Self::new(values)
    }
}

impl From<FrequencyRange> for Vec<f64> {
    fn from(range: FrequencyRange) -> Self {
        range.values
    }
}
