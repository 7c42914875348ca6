//! # Source Packages
//!
//! Package coordinates produced by resolution and the fetch pass that makes
//! sure their sources are present in the workspace.

pub mod fetcher;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use fetcher::{apply_revisions, GoGetFetcher, PackageFetcher, SourceFetcher};

/// A fetchable source package, identified by its import path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Package {
    /// Import path, e.g. `github.com/gogap/spirit-builtin`
    pub uri: String,
    /// Revision pin; empty means latest
    #[serde(default)]
    pub revision: String,
    /// Directory import paths are rooted at
    #[serde(skip)]
    source_root: PathBuf,
}

impl Package {
    pub fn new(uri: impl Into<String>, source_root: impl AsRef<Path>) -> Self {
        Self {
            uri: uri.into(),
            revision: String::new(),
            source_root: source_root.as_ref().to_path_buf(),
        }
    }

    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = revision.into();
        self
    }

    pub fn is_pinned(&self) -> bool {
        !self.revision.is_empty()
    }

    /// Where the package's source lives once fetched
    pub fn source_dir(&self) -> PathBuf {
        self.uri
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.source_root.clone(), |dir, segment| dir.join(segment))
    }
}
