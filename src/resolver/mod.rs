//! # Package Resolution
//!
//! Turns the URNs a pipeline configuration references into the set of source
//! packages that provide them.
//!
//! Resolution is a pure function of the mapping documents and the URN list:
//!
//! 1. every mapping document is loaded and merged into one [`MappingTable`],
//!    failing on the first URN bound to two different import paths;
//! 2. every referenced URN is looked up, failing on the first one no document
//!    provides;
//! 3. the distinct import paths become [`Package`] coordinates, sorted by
//!    import path, each with an empty revision pin.

pub mod mapping;
pub mod urns;

use crate::error::{Result, SpiritError};
use crate::packages::Package;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub use mapping::{MappingDocument, MappingTable, UrnPackage};
pub use urns::extract_urns;

#[derive(Debug, Clone)]
pub struct PackageResolver {
    /// Directory fetched package sources live under
    source_root: PathBuf,
}

impl PackageResolver {
    pub fn new(source_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
        }
    }

    /// Resolve `urns` against the merged `sources`, returning one coordinate per distinct import path
    pub fn resolve<P: AsRef<Path>>(&self, sources: &[P], urns: &[String]) -> Result<Vec<Package>> {
        if sources.is_empty() {
            return Err(SpiritError::NoMappingSource);
        }

        let table = MappingTable::from_documents(sources)?;
        let packages = self.resolve_with_table(&table, urns)?;

        info!(
            urns = urns.len(),
            mapped_urns = table.len(),
            packages = packages.len(),
            "Resolved urn packages"
        );

        Ok(packages)
    }

    pub fn resolve_with_table(&self, table: &MappingTable, urns: &[String]) -> Result<Vec<Package>> {
        let mut import_paths = BTreeSet::new();

        for urn in urns {
            let pkg = table
                .get(urn)
                .ok_or_else(|| SpiritError::unresolved_urn(urn))?;
            debug!(urn = %urn, package = %pkg, "Resolved urn");
            import_paths.insert(pkg);
        }

        Ok(import_paths
            .into_iter()
            .map(|uri| Package::new(uri, &self.source_root))
            .collect())
    }
}
