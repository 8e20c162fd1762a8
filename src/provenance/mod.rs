// src/provenance/mod.rs

//! Lineage tracking for solver runs.
//!
//! Every stage of a run (problem definition, mesh, solution) appends a record holding the
//! SHA-256 of the stage's output and the hash of the record before it. Identical runs
//! therefore produce identical data hashes, and any edit to a stored chain breaks a link.

use crate::EngineError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One stage of a solver run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvenanceRecord {
    pub timestamp: DateTime<Utc>,
    pub event_type: String,
    pub data_hash: String,
    pub software_version: String,
    pub previous_record_hash: Option<String>,
    pub metadata: serde_json::Value,
}

impl ProvenanceRecord {
    pub fn new(
        event_type: String,
        data_hash: String,
        previous_record_hash: Option<String>,
        metadata: serde_json::Value,
    ) -> Self {
        ProvenanceRecord {
            timestamp: Utc::now(),
            event_type,
            data_hash,
            software_version: env!("CARGO_PKG_VERSION").to_string(),
            previous_record_hash,
            metadata,
        }
    }

    /// Hash of the whole record, used as the next record's back link.
    pub fn calculate_record_hash(&self) -> Result<String, EngineError> {
        let serialized = serde_json::to_string(self)
            .map_err(|e| EngineError::ProvenanceFailed(e.to_string()))?;
        Ok(hash_bytes(serialized.as_bytes()))
    }
}

/// SHA-256 of a byte slice, lowercase hex.
pub fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// SHA-256 over the little-endian bit patterns of `values`.
pub fn hash_values(values: &[f64]) -> String {
    let mut hasher = Sha256::new();
    for value in values {
        hasher.update(value.to_le_bytes());
    }
    format!("{:x}", hasher.finalize())
}

/// Ordered, hash-linked list of records.
#[derive(Debug, Default)]
pub struct ProvenanceChain {
    records: Vec<ProvenanceRecord>,
}

impl ProvenanceChain {
    pub fn new() -> Self {
        ProvenanceChain { records: Vec::new() }
    }

    /// Appends a record for `data_hash`, linked to the current tail.
    pub fn add_record(
        &mut self,
        event_type: &str,
        data_hash: String,
        metadata: serde_json::Value,
    ) -> Result<(), EngineError> {
        let previous_record_hash = self
            .records
            .last()
            .map(ProvenanceRecord::calculate_record_hash)
            .transpose()?;
        tracing::trace!(event_type, %data_hash, "provenance record");
        self.records.push(ProvenanceRecord::new(
            event_type.to_string(),
            data_hash,
            previous_record_hash,
            metadata,
        ));
        Ok(())
    }

    pub fn records(&self) -> &[ProvenanceRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Checks every back link. An empty chain is valid.
    pub fn verify(&self) -> Result<(), EngineError> {
        verify_records(&self.records)
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        serde_json::to_string_pretty(&self.records).map_err(|e| {
            EngineError::ProvenanceFailed(format!("Failed to serialize provenance chain: {}", e))
        })
    }

    pub fn from_json(json_str: &str) -> Result<Self, EngineError> {
        let records = serde_json::from_str(json_str).map_err(|e| {
            EngineError::ProvenanceFailed(format!("Failed to deserialize provenance chain: {}", e))
        })?;
        Ok(ProvenanceChain { records })
    }

    /// Drains all records, leaving the chain empty for the next run.
    pub fn drain_records(&mut self) -> Vec<ProvenanceRecord> {
        std::mem::take(&mut self.records)
    }
}

/// Checks the back links of a detached record list.
pub fn verify_records(records: &[ProvenanceRecord]) -> Result<(), EngineError> {
    if let Some(first) = records.first() {
        if first.previous_record_hash.is_some() {
            return Err(EngineError::ProvenanceFailed(
                "first record must not link to a predecessor".to_string(),
            ));
        }
    }
    for (idx, pair) in records.windows(2).enumerate() {
        let expected = pair[0].calculate_record_hash()?;
        if pair[1].previous_record_hash.as_deref() != Some(expected.as_str()) {
            return Err(EngineError::ProvenanceFailed(format!(
                "record {} ({}) does not link to its predecessor",
                idx + 1,
                pair[1].event_type
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provenance_record_creation() {
        let record = ProvenanceRecord::new(
            "mesh_generation".to_string(),
            hash_values(&[0.0, 1.0, 2.0]),
            None,
            serde_json::json!({"num_elements": 2}),
        );

        assert_eq!(record.event_type, "mesh_generation");
        assert_eq!(record.software_version, env!("CARGO_PKG_VERSION"));
        assert!(record.previous_record_hash.is_none());
        assert_eq!(record.metadata["num_elements"], 2);
        assert_eq!(record.data_hash.len(), 64);
    }

    #[test]
    fn test_value_hash_is_bitwise() {
        assert_eq!(hash_values(&[0.25, -2.0]), hash_values(&[0.25, -2.0]));
        assert_ne!(hash_values(&[0.0]), hash_values(&[-0.0]));
        assert_ne!(hash_values(&[1.0, 2.0]), hash_values(&[2.0, 1.0]));
        // sha256 of the empty input
        assert_eq!(
            hash_values(&[]),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(hash_values(&[]), hash_bytes(b""));
    }

    #[test]
    fn test_provenance_chain_linking() {
        let mut chain = ProvenanceChain::new();
        chain
            .add_record("problem_definition", hash_bytes(b"layer"), serde_json::json!({}))
            .unwrap();
        let first_hash = chain.records()[0].calculate_record_hash().unwrap();

        chain
            .add_record("mesh_generation", hash_values(&[0.0, 2.0]), serde_json::json!({}))
            .unwrap();
        let second = &chain.records()[1];
        assert_eq!(second.previous_record_hash, Some(first_hash));

        chain
            .add_record("solver_run", hash_values(&[-2.0, 1.0]), serde_json::json!({}))
            .unwrap();
        assert_eq!(chain.records().len(), 3);
        chain.verify().unwrap();
    }

    #[test]
    fn test_tampered_chain_fails_verification() {
        let mut chain = ProvenanceChain::new();
        let empty = serde_json::json!({});
        chain.add_record("mesh_generation", hash_values(&[0.0, 1.0]), empty.clone()).unwrap();
        chain.add_record("solver_run", hash_values(&[-2.0, 3.0]), empty).unwrap();

        let mut records = chain.drain_records();
        assert!(chain.is_empty());
        records[0].data_hash = hash_values(&[0.0, 1.5]);
        assert!(matches!(verify_records(&records), Err(EngineError::ProvenanceFailed(_))));
    }

    #[test]
    fn test_provenance_chain_serialization() {
        let mut chain = ProvenanceChain::new();
        chain
            .add_record("problem_definition", hash_bytes(b"data1"), serde_json::json!({"id": "a"}))
            .unwrap();
        let mesh_metadata = serde_json::json!({"num_elements": 4});
        chain
            .add_record("mesh_generation", hash_bytes(b"data2"), mesh_metadata)
            .unwrap();

        let json_output = chain.to_json().unwrap();
        let deserialized_chain = ProvenanceChain::from_json(&json_output).unwrap();

        assert_eq!(chain.records().len(), deserialized_chain.records().len());
        assert_eq!(chain.records()[0].event_type, deserialized_chain.records()[0].event_type);
        assert_eq!(chain.records()[1].data_hash, deserialized_chain.records()[1].data_hash);
        deserialized_chain.verify().unwrap();
    }
}
