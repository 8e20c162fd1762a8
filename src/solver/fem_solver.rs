// src/solver/fem_solver.rs

//! Element integration and global assembly for linear elements.

use crate::kernel::{Matrix, Vector};
use crate::meshing::Mesh;
use crate::quadrature::{QuadratureRule, GAUSS_LEGENDRE_2};
use crate::solver::boundary::apply_boundary_conditions;
use crate::solver::shape;
use crate::EngineError;
use nalgebra::{Matrix2, Vector2};

/// Right-hand side of `u'' + u = -f(x)` for the layer problem.
pub fn layer_load(x: f64) -> f64 {
    x.sin() + 2.0
}

/// Local contributions of one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementMatrices {
    /// `∫ dN_i/dx · dN_j/dx dx`
    pub stiffness: Matrix2<f64>,
    /// `∫ N_i · N_j dx`
    pub mass: Matrix2<f64>,
    /// `∫ f(x) · N_i dx`
    pub load: Vector2<f64>,
}

impl ElementMatrices {
    /// The element operator `stiffness - mass`, the weak form of `u'' + u` after
    /// integration by parts.
    pub fn local_matrix(&self) -> Matrix2<f64> {
        self.stiffness - self.mass
    }
}

/// Integrates one element spanning `[x_left, x_right]` with the given rule and forcing.
pub fn integrate_element<const N: usize, F>(
    x_left: f64,
    x_right: f64,
    rule: &QuadratureRule<N>,
    forcing: F,
) -> ElementMatrices
where
    F: Fn(f64) -> f64,
{
    let jacobian = 0.5 * (x_right - x_left);
    let midpoint = 0.5 * (x_right + x_left);

    let mut stiffness = Matrix2::zeros();
    let mut mass = Matrix2::zeros();
    let mut load = Vector2::zeros();

    for (xi, weight) in rule.iter() {
        let (n, dn_dxi) = shape::evaluate(xi);
        let dn_dx = dn_dxi / jacobian;
        let x = midpoint + jacobian * xi;
        let scale = weight * jacobian;

        stiffness += dn_dx * dn_dx.transpose() * scale;
        mass += n * n.transpose() * scale;
        load += n * (forcing(x) * scale);
    }

    ElementMatrices { stiffness, mass, load }
}

/// Assembles the global matrix and vector without boundary conditions.
///
/// Each element `e` scatters into rows/columns `e` and `e + 1`, so the result is symmetric
/// and tridiagonal.
pub fn assemble_unconstrained(mesh: &Mesh) -> (Matrix, Vector) {
    let num_nodes = mesh.nodes.len();
    let mut global_matrix = Matrix::zeros(num_nodes, num_nodes);
    let mut global_vector = Vector::zeros(num_nodes);

    for (elem_idx, x_left, x_right) in mesh.elements() {
        let element = integrate_element(x_left, x_right, &GAUSS_LEGENDRE_2, layer_load);
        let local_matrix = element.local_matrix();

        for i in 0..2 {
            let global_i = elem_idx + i;
            global_vector[global_i] += element.load[i];
            for j in 0..2 {
                global_matrix[(global_i, elem_idx + j)] += local_matrix[(i, j)];
            }
        }
    }

    (global_matrix, global_vector)
}

/// Assembles the global system and imposes the boundary conditions on the result.
pub fn assemble_global_system(mesh: &Mesh) -> Result<(Matrix, Vector), EngineError> {
    if mesh.element_count() < 1 {
        return Err(EngineError::InvalidArgument(format!(
            "cannot assemble a mesh with {} node(s)",
            mesh.nodes.len()
        )));
    }

    let (mut matrix, mut vector) = assemble_unconstrained(mesh);
    tracing::trace!(elements = mesh.element_count(), "assembled global system");

    apply_boundary_conditions(&mut matrix, &mut vector)?;
    Ok((matrix, vector))
}
