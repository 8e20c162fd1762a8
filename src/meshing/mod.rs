// src/meshing/mod.rs

//! Mesh generation for the one-dimensional layer domain.

use crate::EngineError;
use serde::{Deserialize, Serialize};

/// A discretized one-dimensional domain.
///
/// Element `e` spans `nodes[e]..=nodes[e + 1]`; elements are never materialized beyond
/// that index pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub nodes: Vec<f64>,
}

impl Mesh {
    /// Number of linear elements in the mesh.
    pub fn element_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Iterates over `(element_index, x_left, x_right)`.
    pub fn elements(&self) -> impl Iterator<Item = (usize, f64, f64)> + '_ {
        self.nodes
            .windows(2)
            .enumerate()
            .map(|(e, pair)| (e, pair[0], pair[1]))
    }

    pub fn into_nodes(self) -> Vec<f64> {
        self.nodes
    }
}

/// Generates `num_elements + 1` equally spaced nodes over `[start, end]`.
///
/// Node `i` sits at `start + i * h` with `h = (end - start) / num_elements`; the last node
/// is set to `end` exactly.
pub fn generate_mesh(start: f64, end: f64, num_elements: usize) -> Result<Mesh, EngineError> {
    if num_elements < 1 {
        return Err(EngineError::InvalidArgument(format!(
            "mesh needs at least one element, got {}",
            num_elements
        )));
    }
    if !start.is_finite() || !end.is_finite() {
        return Err(EngineError::InvalidArgument(format!(
            "interval bounds must be finite, got ({}, {})",
            start, end
        )));
    }
    if start >= end {
        return Err(EngineError::InvalidArgument(format!(
            "interval start {} must be less than end {}",
            start, end
        )));
    }

    let h = (end - start) / num_elements as f64;
    let mut nodes: Vec<f64> = (0..=num_elements).map(|i| start + i as f64 * h).collect();
    nodes[num_elements] = end;

    Ok(Mesh { nodes })
}
