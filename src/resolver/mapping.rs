//! URN to package mapping documents and the merged lookup table.

use crate::error::{Result, SpiritError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A single (URN, import path) pair from a mapping document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrnPackage {
    pub urn: String,
    pub pkg: String,
}

/// On-disk mapping document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingDocument {
    #[serde(default)]
    pub packages: Vec<UrnPackage>,
}

impl MappingDocument {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .map_err(|e| SpiritError::config(path.display().to_string(), e.to_string()))?;

        serde_json::from_slice(&data).map_err(|e| {
            SpiritError::config(
                path.display().to_string(),
                format!("malformed package source: {e}"),
            )
        })
    }
}

#[derive(Debug, Clone)]
struct MappingEntry {
    pkg: String,
    document: PathBuf,
}

/// Merged URN table. Merging is monotonic: a URN may be confirmed again with
/// the same import path but never rebound to a different one.
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    entries: HashMap<String, MappingEntry>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and merge every document in order, failing on the first conflict
    pub fn from_documents<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut table = Self::new();
        for path in paths {
            let path = path.as_ref();
            let document = MappingDocument::load(path)?;
            table.merge(&document, path)?;
            debug!(
                document = %path.display(),
                packages = document.packages.len(),
                "Merged package source"
            );
        }
        Ok(table)
    }

    pub fn merge(&mut self, document: &MappingDocument, origin: &Path) -> Result<()> {
        for entry in &document.packages {
            match self.entries.get(&entry.urn) {
                Some(existing) if existing.pkg != entry.pkg => {
                    return Err(SpiritError::ConflictingMapping {
                        urn: entry.urn.clone(),
                        existing_pkg: existing.pkg.clone(),
                        existing_document: existing.document.display().to_string(),
                        conflicting_pkg: entry.pkg.clone(),
                        document: origin.display().to_string(),
                    });
                }
                Some(_) => {}
                None => {
                    self.entries.insert(
                        entry.urn.clone(),
                        MappingEntry {
                            pkg: entry.pkg.clone(),
                            document: origin.to_path_buf(),
                        },
                    );
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, urn: &str) -> Option<&str> {
        self.entries.get(urn).map(|entry| entry.pkg.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
