//! One-dimensional Galerkin finite-element solver for the acoustic vibration of a
//! material layer, `u'' + u = -(sin(x) + 2)` with `u(start) = -2` and `u'(end) = 6`.
//!
//! [`galerkin`] is the stateless entry point. [`CoreEngine`] wraps it with problem
//! validation and a provenance chain for callers that keep results around.

pub mod config;
pub mod kernel;
pub mod meshing;
pub mod provenance;
pub mod quadrature;
pub mod solver;

// Re-exporting core numerical types for easier access by other modules.
pub use config::{parse_element_count, ProblemDefinition};
pub use kernel::{Matrix, Vector};
pub use meshing::Mesh;
pub use solver::galerkin;

// --- Return Types and Errors ---

/// Errors surfaced by the solver and its configuration layer.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Singular matrix: {0}")]
    SingularMatrix(String),
    #[error("Not an integer: {0:?}")]
    NonIntegerInput(String),
    #[error("Too few elements: got {requested}, need at least {minimum}")]
    TooFewElements { requested: i64, minimum: usize },
    #[error("Configuration failed: {0}")]
    ConfigFailed(String),
    #[error("Provenance failed: {0}")]
    ProvenanceFailed(String),
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Nodal solution of one problem, ready for plotting.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct Solution {
    pub id: String,
    pub nodes: Vec<f64>,
    pub values: Vec<f64>,
    pub provenance_chain: Vec<provenance::ProvenanceRecord>,
}

impl Solution {
    /// `(x, u(x))` pairs in node order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.nodes.iter().copied().zip(self.values.iter().copied())
    }

    pub fn to_json(&self) -> EngineResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| EngineError::SerializationFailed(e.to_string()))
    }
}

// --- Core Engine Facade ---

#[derive(Debug, Default)]
pub struct CoreEngine {
    provenance_chain: provenance::ProvenanceChain,
}

impl CoreEngine {
    pub fn new() -> Self {
        CoreEngine {
            provenance_chain: provenance::ProvenanceChain::new(),
        }
    }

    /// Runs one problem end to end and returns its solution with the provenance of the run.
    ///
    /// The engine's chain is drained into the returned solution, so every solution carries
    /// only its own records.
    pub fn run_simulation(&mut self, problem: &ProblemDefinition) -> EngineResult<Solution> {
        tracing::debug!(
            id = %problem.id,
            num_elements = problem.num_elements,
            "received layer problem"
        );

        let problem_json = serde_json::to_string(problem)
            .map_err(|e| EngineError::ProvenanceFailed(e.to_string()))?;
        self.provenance_chain.add_record(
            "problem_definition",
            provenance::hash_bytes(problem_json.as_bytes()),
            serde_json::json!({"problem_id": problem.id}),
        )?;

        // 1. Generate mesh
        let (start, end) = problem.interval;
        let mesh = meshing::generate_mesh(start, end, problem.num_elements)?;
        self.provenance_chain.add_record(
            "mesh_generation",
            provenance::hash_values(&mesh.nodes),
            serde_json::json!({"interval": [start, end], "num_elements": mesh.element_count()}),
        )?;

        // 2. Assemble, constrain and solve
        let (matrix, vector) = solver::fem_solver::assemble_global_system(&mesh)?;
        let values: Vec<f64> = kernel::solve_dense(&matrix, &vector)?.iter().copied().collect();
        self.provenance_chain.add_record(
            "solver_run",
            provenance::hash_values(&values),
            serde_json::json!({
                "unknowns": values.len(),
                "left_value": solver::boundary::LEFT_DIRICHLET_VALUE,
                "right_flux": solver::boundary::RIGHT_BOUNDARY_FLUX,
            }),
        )?;

        tracing::debug!(id = %problem.id, "layer problem solved");
        Ok(Solution {
            id: problem.id.clone(),
            nodes: mesh.into_nodes(),
            values,
            provenance_chain: self.provenance_chain.drain_records(),
        })
    }
}
