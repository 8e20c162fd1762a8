// src/solver/boundary.rs

//! Boundary conditions of the layer problem.

use crate::kernel::{Matrix, Vector};
use crate::EngineError;

/// Prescribed value `u(start)`.
pub const LEFT_DIRICHLET_VALUE: f64 = -2.0;

/// Prescribed flux `u'(end)`, added to the last load entry.
pub const RIGHT_BOUNDARY_FLUX: f64 = 6.0;

/// Imposes the boundary conditions on a fully assembled system.
///
/// Row 0 becomes the constraint `u_0 = LEFT_DIRICHLET_VALUE`. The flux is added to the
/// last load entry on top of whatever assembly left there. Must run after assembly, or
/// later element contributions would dilute the constraint row.
pub fn apply_boundary_conditions(
    matrix: &mut Matrix,
    vector: &mut Vector,
) -> Result<(), EngineError> {
    let n = vector.len();
    if n == 0 || matrix.nrows() != n || matrix.ncols() != n {
        return Err(EngineError::InvalidArgument(format!(
            "boundary conditions need a non-empty square system, got {}x{} with load of length {}",
            matrix.nrows(),
            matrix.ncols(),
            n
        )));
    }

    matrix.row_mut(0).fill(0.0);
    matrix[(0, 0)] = 1.0;
    vector[0] = LEFT_DIRICHLET_VALUE;

    vector[n - 1] += RIGHT_BOUNDARY_FLUX;
    Ok(())
}
