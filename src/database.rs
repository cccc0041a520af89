//! Disease lookup table
//!
//! Static mapping from class label to human-readable disease metadata,
//! loaded once from a JSON file at startup and immutable thereafter.
//! Lookups for labels missing from the table return a fixed placeholder
//! record rather than an error.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LeafScanError, Result};

/// Human-readable metadata for one disease class
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DiseaseRecord {
    pub disease_name: String,
    pub description: String,
    pub causes: Vec<String>,
    pub prevention: Vec<String>,
    pub treatment: Vec<String>,
}

impl DiseaseRecord {
    /// Fallback record for class labels with no database entry
    pub fn placeholder() -> Self {
        Self {
            disease_name: "Unknown Disease".to_string(),
            description: "No information available".to_string(),
            causes: vec!["Unknown".to_string()],
            prevention: vec!["Consult an expert".to_string()],
            treatment: vec!["Professional diagnosis required".to_string()],
        }
    }
}

/// The full lookup table, keyed by class label
#[derive(Clone, Debug, Default)]
pub struct DiseaseDatabase {
    records: HashMap<String, DiseaseRecord>,
}

impl DiseaseDatabase {
    /// Load the database from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| {
            LeafScanError::Database(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Parse the database from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let records: HashMap<String, DiseaseRecord> = serde_json::from_str(json)
            .map_err(|e| LeafScanError::Serialization(format!("Invalid disease database: {}", e)))?;
        Ok(Self { records })
    }

    /// Look up a record by class label, if present
    pub fn get(&self, class_label: &str) -> Option<&DiseaseRecord> {
        self.records.get(class_label)
    }

    /// Look up a record by class label, falling back to the placeholder
    pub fn lookup(&self, class_label: &str) -> DiseaseRecord {
        self.records
            .get(class_label)
            .cloned()
            .unwrap_or_else(DiseaseRecord::placeholder)
    }

    /// Number of records in the table
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the table has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
