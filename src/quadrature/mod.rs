// src/quadrature/mod.rs

//! Gauss-Legendre quadrature on the reference interval `[-1, 1]`.

/// `1 / sqrt(3)`, the abscissa of the 2-point Gauss-Legendre rule.
const FRAC_1_SQRT_3: f64 = 0.577_350_269_189_625_8;

/// A fixed quadrature rule: points in `[-1, 1]` paired with their weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureRule<const N: usize> {
    pub points: [f64; N],
    pub weights: [f64; N],
}

impl<const N: usize> QuadratureRule<N> {
    /// Iterates over `(point, weight)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().copied().zip(self.weights.iter().copied())
    }
}

/// 2-point Gauss-Legendre rule, exact for polynomials up to degree 3.
pub const GAUSS_LEGENDRE_2: QuadratureRule<2> = QuadratureRule {
    points: [-FRAC_1_SQRT_3, FRAC_1_SQRT_3],
    weights: [1.0, 1.0],
};
