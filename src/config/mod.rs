// src/config/mod.rs

//! Problem configuration and caller-side input validation.

use crate::EngineError;
use serde::{Deserialize, Serialize};

/// Smallest element count accepted from user input.
pub const MIN_ELEMENTS: usize = 3;

/// Interval of the material layer.
pub const DEFAULT_INTERVAL: (f64, f64) = (0.0, 2.0);

pub const DEFAULT_ELEMENTS: usize = 8;

/// Describes one solve of the layer problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemDefinition {
    pub id: String,
    #[serde(default = "default_interval")]
    pub interval: (f64, f64),
    #[serde(default = "default_elements")]
    pub num_elements: usize,
}

fn default_interval() -> (f64, f64) {
    DEFAULT_INTERVAL
}

fn default_elements() -> usize {
    DEFAULT_ELEMENTS
}

impl ProblemDefinition {
    pub fn new(id: impl Into<String>, num_elements: usize) -> Self {
        ProblemDefinition {
            id: id.into(),
            interval: DEFAULT_INTERVAL,
            num_elements,
        }
    }

    /// Loads a problem definition from JSON. Missing `interval` and `num_elements`
    /// fall back to the layer defaults.
    pub fn from_json(json_str: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json_str).map_err(|e| EngineError::ConfigFailed(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        serde_json::to_string_pretty(self).map_err(|e| EngineError::ConfigFailed(e.to_string()))
    }
}

/// Parses an element count typed by a user.
///
/// Surrounding whitespace is ignored. Anything that is not a whole number fails with
/// `NonIntegerInput`; counts below `MIN_ELEMENTS` fail with `TooFewElements`.
pub fn parse_element_count(input: &str) -> Result<usize, EngineError> {
    let trimmed = input.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| EngineError::NonIntegerInput(trimmed.to_string()))?;

    if value < MIN_ELEMENTS as i64 {
        return Err(EngineError::TooFewElements {
            requested: value,
            minimum: MIN_ELEMENTS,
        });
    }
    usize::try_from(value).map_err(|_| EngineError::NonIntegerInput(trimmed.to_string()))
}
