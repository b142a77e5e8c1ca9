use num_complex::Complex64;

/// A 2×2 complex transfer matrix relating acoustic pressure and volume
/// velocity on the mouth side of an element to the foot side.
///
/// ```text
/// [p_in]   [a  b] [p_out]
/// [U_in] = [c  d] [U_out]
/// ```
#[derive(Debug, Clone, Copy)]
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

    /// Identity matrix (no-op element).
    pub fn identity() -> Self {
        Self {
            a: Complex64::new(1.0, 0.0),
            b: Complex64::new(0.0, 0.0),
            c: Complex64::new(0.0, 0.0),
            d: Complex64::new(1.0, 0.0),
        }
    }

    /// Shunt branch of impedance `z` to the outside air.
    pub fn shunt(z: Complex64) -> Self {
        Self {
            c: Complex64::new(1.0, 0.0) / z,
            ..Self::identity()
        }
    }

    /// Chain (multiply) this matrix with another: self · other.
    pub fn chain(&self, other: &TransferMatrix) -> TransferMatrix {
        TransferMatrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
        }
    }

    /// Impedance seen at the input when the output is loaded by `z_load`.
    ///
    /// Z_in = (a·Z_L + b) / (c·Z_L + d)
    pub fn input_impedance(&self, z_load: Complex64) -> Complex64 {
        (self.a * z_load + self.b) / (self.c * z_load + self.d)
    }

    /// Impedance seen at the input when the output is a rigid wall (Z_L → ∞).
    pub fn input_impedance_rigid(&self) -> Complex64 {
        self.a / self.c
    }
}
