//! Package fetch pass.
//!
//! The pass is sequential and stops at the first failure; packages after the
//! failing one are left untouched.

use super::Package;
use crate::error::{Result, SpiritError};
use crate::toolchain::GoToolchain;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Retrieves or refreshes one package's source in the workspace
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Fetch `package` if absent, refresh it if present and `update` is set,
    /// then apply its revision pin if it has one
    async fn fetch(&self, package: &Package, update: bool) -> Result<()>;
}

/// Fetcher backed by `go get` and `git checkout`
#[derive(Debug, Clone)]
pub struct GoGetFetcher {
    toolchain: GoToolchain,
}

impl GoGetFetcher {
    pub fn new(toolchain: GoToolchain) -> Self {
        Self { toolchain }
    }
}

#[async_trait]
impl SourceFetcher for GoGetFetcher {
    async fn fetch(&self, package: &Package, update: bool) -> Result<()> {
        let source_dir = package.source_dir();
        let present = tokio::fs::try_exists(&source_dir)
            .await
            .map_err(|e| SpiritError::io(&source_dir, e))?;

        match (present, update) {
            (false, _) => {
                info!(package = %package.uri, "Getting package");
                self.toolchain
                    .get(&package.uri, false)
                    .await
                    .map_err(|e| SpiritError::fetch(&package.uri, e.to_string()))?;
            }
            (true, true) => {
                info!(package = %package.uri, "Updating package");
                self.toolchain
                    .get(&package.uri, true)
                    .await
                    .map_err(|e| SpiritError::fetch(&package.uri, e.to_string()))?;
            }
            (true, false) => {
                debug!(package = %package.uri, "Package already present");
            }
        }

        if package.is_pinned() {
            info!(package = %package.uri, revision = %package.revision, "Checking out pinned revision");
            self.toolchain
                .checkout(&source_dir, &package.revision)
                .await
                .map_err(|e| SpiritError::fetch(&package.uri, e.to_string()))?;
        }

        Ok(())
    }
}

/// Applies revision overrides and drives a [`SourceFetcher`] over every package
pub struct PackageFetcher<'a> {
    fetcher: &'a dyn SourceFetcher,
}

impl<'a> PackageFetcher<'a> {
    pub fn new(fetcher: &'a dyn SourceFetcher) -> Self {
        Self { fetcher }
    }

    /// Fetch every package in order, returning the packages with their pins applied
    pub async fn fetch_all(
        &self,
        packages: &[Package],
        revisions: &BTreeMap<String, String>,
        update: bool,
    ) -> Result<Vec<Package>> {
        let packages = apply_revisions(packages, revisions);

        for package in &packages {
            self.fetcher.fetch(package, update).await?;
        }

        info!(packages = packages.len(), update = update, "Packages fetched");
        Ok(packages)
    }
}

/// Copy `packages`, pinning every one that has an entry in `revisions`
pub fn apply_revisions(packages: &[Package], revisions: &BTreeMap<String, String>) -> Vec<Package> {
    packages
        .iter()
        .map(|package| match revisions.get(&package.uri) {
            Some(revision) => package.clone().with_revision(revision),
            None => package.clone(),
        })
        .collect()
}
