use num_complex::Complex64;

/// Beyond this |Im(k·d)| the layer matrix is replaced by its limit; cos and
/// sin would otherwise overflow long before their ratio changes.
const DECAY_LIMIT: f64 = 20.0;

/// |Z_ref / Zs| at or below which a rigid-backed stack is singular.
const SINGULAR_TOLERANCE: f64 = 1e-12;

/// A 2×2 complex transfer matrix relating pressure and normal particle
/// velocity on the two faces of a layer.
///
/// ```text
/// [p_front]   [a  b] [p_back]
/// [v_front] = [c  d] [v_back]
/// ```
///
/// Only ratios of entries are ever read, so a matrix may be stored up to a
/// common scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferMatrix {
    pub a: Complex64,
    pub b: Complex64,
    pub c: Complex64,
    pub d: Complex64,
}

impl TransferMatrix {
    pub fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { a, b, c, d }
    }

    /// Identity matrix (zero-thickness layer).
    pub fn identity() -> Self {
        Self {
            a: Complex64::new(1.0, 0.0),
            b: Complex64::new(0.0, 0.0),
            c: Complex64::new(0.0, 0.0),
            d: Complex64::new(1.0, 0.0),
        }
    }

    /// Homogeneous fluid layer of characteristic impedance `zc`, propagation
    /// constant `k` and thickness `thickness`.
    ///
    /// ```text
    /// [cos kd        j Zc sin kd]
    /// [j sin kd / Zc     cos kd ]
    /// ```
    pub fn layer(zc: Complex64, k: Complex64, thickness: f64) -> Self {
        let kd = k * thickness;
        let one = Complex64::new(1.0, 0.0);

        // Strongly attenuating layer: j·tan(kd) → ±1, scaled by 1/cos(kd)
        if kd.im < -DECAY_LIMIT {
            return Self::new(one, zc, 1.0 / zc, one);
        }
        if kd.im > DECAY_LIMIT {
            return Self::new(one, -zc, -1.0 / zc, one);
        }

        let j = Complex64::i();
        let (sin, cos) = (kd.sin(), kd.cos());
        Self::new(cos, j * zc * sin, j * sin / zc, cos)
    }

    /// Chain (multiply) this matrix with another: self · other.
    ///
    /// `self` is the layer nearer the incident wave.
    pub fn chain(&self, other: &TransferMatrix) -> TransferMatrix {
        TransferMatrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
        }
    }

    /// Input impedance p/v at the front face when the back face is a rigid
    /// wall (v_back = 0): Zs = T₁₁ / T₂₁.
    ///
    /// Returns `None` when Zs dwarfs the `reference` impedance (Pa·s/m, in
    /// practice Z₀ of the surrounding air): T₂₁ carries units of
    /// 1/impedance, so it is scaled by `reference` before being compared
    /// with the dimensionless T₁₁.
    pub fn rigid_backed_impedance(&self, reference: f64) -> Option<Complex64> {
        if self.c.norm() * reference <= SINGULAR_TOLERANCE * self.a.norm() {
            None
        } else {
            Some(self.a / self.c)
        }
    }
}
