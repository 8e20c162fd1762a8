// src/solver/mod.rs

//! The Galerkin pipeline: mesh, assemble, constrain, solve.

pub mod boundary;
pub mod fem_solver;
pub mod shape;

use crate::kernel::solve_dense;
use crate::meshing::generate_mesh;
use crate::EngineError;

/// Solves `u'' + u = -(sin(x) + 2)` on `interval` with `num_elements` linear elements.
///
/// Returns `(nodes, solution)`, two sequences of length `num_elements + 1` ready to be
/// plotted pairwise. Deterministic and free of shared state, so it can be called
/// repeatedly and from several threads at once.
///
/// # Errors
/// `InvalidArgument` for an empty mesh or a degenerate interval, `SingularMatrix` if the
/// constrained system cannot be factorized.
pub fn galerkin(
    interval: (f64, f64),
    num_elements: usize,
) -> Result<(Vec<f64>, Vec<f64>), EngineError> {
    let _span =
        tracing::debug_span!("galerkin", start = interval.0, end = interval.1, num_elements)
            .entered();

    let mesh = generate_mesh(interval.0, interval.1, num_elements)?;
    let (matrix, vector) = fem_solver::assemble_global_system(&mesh)?;
    let solution = solve_dense(&matrix, &vector)?;

    tracing::debug!(nodes = mesh.nodes.len(), "galerkin solve finished");
    Ok((mesh.into_nodes(), solution.iter().copied().collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_eight_elements_on_layer() {
        let (nodes, solution) = galerkin((0.0, 2.0), 8).unwrap();
        assert_eq!(nodes, vec![0.0, 0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0]);
        assert_eq!(solution.len(), 9);
        assert_eq!(solution[0], -2.0);

        let expected = [
            -2.0,
            -6.156065103258813,
            -10.070277854666257,
            -13.51479929701863,
            -16.289009306052517,
            -18.23114243360411,
            -19.22768251451101,
            -19.219972947864292,
            -18.207659344189945,
        ];
        for (u, e) in solution.iter().zip(expected) {
            assert_relative_eq!(*u, e, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_three_elements_on_layer() {
        let (nodes, solution) = galerkin((0.0, 2.0), 3).unwrap();
        assert_eq!(nodes.len(), 4);
        assert_eq!(nodes[0], 0.0);
        assert_relative_eq!(nodes[1], 2.0 / 3.0, epsilon = 1e-15);
        assert_relative_eq!(nodes[2], 4.0 / 3.0, epsilon = 1e-15);
        assert_eq!(nodes[3], 2.0);

        assert_eq!(solution[0], -2.0);
        assert_relative_eq!(solution[1], -13.190364883712741, epsilon = 1e-9);
        assert_relative_eq!(solution[2], -19.996808099188517, epsilon = 1e-9);
        assert_relative_eq!(solution[3], -19.743855199043832, epsilon = 1e-9);
    }

    #[test]
    fn test_repeated_calls_are_bit_identical() {
        let first = galerkin((0.0, 2.0), 12).unwrap();
        let second = galerkin((0.0, 2.0), 12).unwrap();
        let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&first.0), bits(&second.0));
        assert_eq!(bits(&first.1), bits(&second.1));
    }

    #[test]
    fn test_concurrent_solves_agree() {
        let reference = galerkin((0.0, 2.0), 20).unwrap();
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| galerkin((0.0, 2.0), 20).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), reference);
        }
    }

    #[test]
    fn test_refinement_converges() {
        let (_, coarse) = galerkin((0.0, 2.0), 40).unwrap();
        let (_, fine) = galerkin((0.0, 2.0), 80).unwrap();
        // Node 40 of the coarse mesh and node 80 of the fine mesh both sit at x = 2.
        assert!((coarse[40] - fine[80]).abs() < 1e-2);
        assert_relative_eq!(coarse[40], -17.97741702630506, epsilon = 1e-8);
    }

    #[test]
    fn test_zero_elements_rejected() {
        assert!(matches!(galerkin((0.0, 2.0), 0), Err(EngineError::InvalidArgument(_))));
    }

    #[test]
    fn test_reversed_interval_rejected() {
        assert!(matches!(galerkin((2.0, 0.0), 4), Err(EngineError::InvalidArgument(_))));
    }
}
