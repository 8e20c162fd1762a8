
// src/kernel/mod.rs

//! The numerical kernel of the solver.
//! Dense matrix/vector types and the direct linear solve used for the global system.

use crate::EngineError;
use nalgebra::{DMatrix, DVector};

// Type aliases for clarity throughout the crate.
pub type Matrix = DMatrix<f64>;
pub type Vector = DVector<f64>;

/// Relative size, per unknown, below which an LU pivot counts as zero.
const PIVOT_TOLERANCE: f64 = f64::EPSILON;

/// Solves `A·u = F` with a direct dense factorization.
///
/// Constraint rows (a nonzero diagonal entry and nothing else) are resolved first as
/// `u_i = F_i / A_ii` and moved to the right-hand side of the remaining equations, which
/// are then solved by LU with partial pivoting. A prescribed value therefore comes back
/// bit-exact instead of passing through elimination round-off.
///
/// # Errors
/// * `InvalidArgument` if `A` is not square, `F` does not match it, or either holds a
///   non-finite entry.
/// * `SingularMatrix` if a constraint row or the remaining system has a zero or
///   numerically negligible pivot, or the result overflows.
pub fn solve_dense(matrix: &Matrix, rhs: &Vector) -> Result<Vector, EngineError> {
    let n = matrix.nrows();
    if matrix.ncols() != n || rhs.len() != n {
        return Err(EngineError::InvalidArgument(format!(
            "cannot solve a {}x{} system against a right-hand side of length {}",
            matrix.nrows(),
            matrix.ncols(),
            rhs.len()
        )));
    }
    if matrix.iter().chain(rhs.iter()).any(|v| !v.is_finite()) {
        return Err(EngineError::InvalidArgument(
            "linear system contains non-finite entries".to_string(),
        ));
    }

    let mut solution = Vector::zeros(n);
    let pinned: Vec<bool> = (0..n).map(|i| is_constraint_row(matrix, i)).collect();
    let pinned_threshold = matrix.amax() * PIVOT_TOLERANCE * n as f64;
    for i in (0..n).filter(|&i| pinned[i]) {
        if matrix[(i, i)].abs() <= pinned_threshold {
            return Err(EngineError::SingularMatrix(format!(
                "constraint row {} has a negligible diagonal entry {:e}",
                i,
                matrix[(i, i)]
            )));
        }
        solution[i] = rhs[i] / matrix[(i, i)];
    }

    let free: Vec<usize> = (0..n).filter(|&i| !pinned[i]).collect();
    tracing::trace!(unknowns = n, constrained = n - free.len(), "dense solve");
    if free.is_empty() {
        return ensure_finite(solution);
    }

    let reduced = Matrix::from_fn(free.len(), free.len(), |r, c| matrix[(free[r], free[c])]);
    let reduced_rhs = Vector::from_fn(free.len(), |r, _| {
        let row = free[r];
        (0..n)
            .filter(|&j| pinned[j])
            .fold(rhs[row], |acc, j| acc - matrix[(row, j)] * solution[j])
    });

    let lu = reduced.lu();
    let pivots = lu.u().diagonal();
    let scale = pivots.amax();
    let threshold = scale * PIVOT_TOLERANCE * free.len() as f64;
    if scale == 0.0 || pivots.iter().any(|p| p.abs() <= threshold) {
        return Err(EngineError::SingularMatrix(format!(
            "LU factorization of the {}x{} free block has a negligible pivot",
            free.len(),
            free.len()
        )));
    }

    let free_values = lu
        .solve(&reduced_rhs)
        .ok_or_else(|| EngineError::SingularMatrix("LU back-substitution failed".to_string()))?;

    for (r, &row) in free.iter().enumerate() {
        solution[row] = free_values[r];
    }
    ensure_finite(solution)
}

fn ensure_finite(solution: Vector) -> Result<Vector, EngineError> {
    if solution.iter().any(|v| !v.is_finite()) {
        return Err(EngineError::SingularMatrix("solution is not finite".to_string()));
    }
    Ok(solution)
}

fn is_constraint_row(matrix: &Matrix, i: usize) -> bool {
    matrix[(i, i)] != 0.0
        && matrix
            .row(i)
            .iter()
            .enumerate()
            .all(|(j, &a)| j == i || a == 0.0)
}
