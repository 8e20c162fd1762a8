// src/solver/shape.rs

//! Linear Lagrange shape functions on the reference element `[-1, 1]`.

use nalgebra::Vector2;

/// Derivatives `dN/dxi`; constant for linear elements.
pub const SHAPE_DERIVATIVES: Vector2<f64> = Vector2::new(-0.5, 0.5);

/// Shape function values `N_0`, `N_1` at reference coordinate `xi`.
pub fn shape_functions(xi: f64) -> Vector2<f64> {
    Vector2::new(0.5 * (1.0 - xi), 0.5 * (1.0 + xi))
}

/// Values and reference derivatives at `xi`.
pub fn evaluate(xi: f64) -> (Vector2<f64>, Vector2<f64>) {
    (shape_functions(xi), SHAPE_DERIVATIVES)
}
