//! # Error Types
//!
//! Structured error handling for every stage of the create/run pipeline. Each
//! stage returns the first error it hits and the pipeline aborts; nothing is
//! retried.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Coarse error classes, used for logging and CLI exit reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Config,
    Validation,
    Resolution,
    Fetch,
    Render,
    Filesystem,
    Build,
    Runtime,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config => write!(f, "config"),
            Self::Validation => write!(f, "validation"),
            Self::Resolution => write!(f, "resolution"),
            Self::Fetch => write!(f, "fetch"),
            Self::Render => write!(f, "render"),
            Self::Filesystem => write!(f, "filesystem"),
            Self::Build => write!(f, "build"),
            Self::Runtime => write!(f, "runtime"),
        }
    }
}

#[derive(Error, Debug)]
pub enum SpiritError {
    #[error("Configuration error: {source_name}: {message}")]
    Config {
        source_name: String,
        message: String,
    },

    #[error("Validation error: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("No urn package source found")]
    NoMappingSource,

    #[error("Unresolved urn: {urn} is not provided by any package source")]
    UnresolvedUrn { urn: String },

    #[error(
        "Conflicting package source for urn {urn}: {existing_pkg} (from {existing_document}) vs {conflicting_pkg} (from {document})"
    )]
    ConflictingMapping {
        urn: String,
        existing_pkg: String,
        existing_document: String,
        conflicting_pkg: String,
        document: String,
    },

    #[error("Fetch failed for package {package}: {message}")]
    Fetch { package: String, message: String },

    #[error("Render error: {template}: {message}")]
    Render { template: String, message: String },

    #[error("Project path {} already exists", path.display())]
    ProjectExists { path: PathBuf },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Build failed for project {}: {message}", project.display())]
    Build { project: PathBuf, message: String },

    #[error("Runtime error: {message}")]
    Runtime { message: String },
}

impl SpiritError {
    /// Create a configuration error attributed to a file or source
    pub fn config(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Create a validation error for a named option
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn unresolved_urn(urn: impl Into<String>) -> Self {
        Self::UnresolvedUrn { urn: urn.into() }
    }

    /// Create a fetch error naming the offending import path
    pub fn fetch(package: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            package: package.into(),
            message: message.into(),
        }
    }

    pub fn render(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Render {
            template: template.into(),
            message: message.into(),
        }
    }

    /// Wrap an I/O error with the path it happened at
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn build(project: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Build {
            project: project.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        Self::Runtime {
            message: message.into(),
        }
    }

    /// Classify this error into one of the pipeline error categories
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Config { .. } => ErrorCategory::Config,
            Self::Validation { .. } | Self::NoMappingSource => ErrorCategory::Validation,
            Self::UnresolvedUrn { .. } | Self::ConflictingMapping { .. } => {
                ErrorCategory::Resolution
            }
            Self::Fetch { .. } => ErrorCategory::Fetch,
            Self::Render { .. } => ErrorCategory::Render,
            Self::ProjectExists { .. } | Self::Io { .. } => ErrorCategory::Filesystem,
            Self::Build { .. } => ErrorCategory::Build,
            Self::Runtime { .. } => ErrorCategory::Runtime,
        }
    }

    /// Only an existing project directory can be recovered from, and only by forcing
    pub fn is_recoverable_with_force(&self) -> bool {
        matches!(self, Self::ProjectExists { .. })
    }
}

pub type Result<T> = std::result::Result<T, SpiritError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_message_names_both_sides() {
        let err = SpiritError::ConflictingMapping {
            urn: "urn:a".to_string(),
            existing_pkg: "pkg/x".to_string(),
            existing_document: "one.json".to_string(),
            conflicting_pkg: "pkg/y".to_string(),
            document: "two.json".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("urn:a"));
        assert!(message.contains("pkg/x"));
        assert!(message.contains("pkg/y"));
        assert!(message.contains("one.json"));
        assert!(message.contains("two.json"));
        assert_eq!(err.category(), ErrorCategory::Resolution);
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            SpiritError::NoMappingSource.category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            SpiritError::ProjectExists {
                path: PathBuf::from("/tmp/p")
            }
            .category(),
            ErrorCategory::Filesystem
        );
        assert_eq!(
            SpiritError::fetch("pkg/x", "exit 1").category(),
            ErrorCategory::Fetch
        );
        assert_eq!(ErrorCategory::Build.to_string(), "build");
    }

    #[test]
    fn test_only_project_exists_is_recoverable() {
        assert!(SpiritError::ProjectExists {
            path: PathBuf::from("p")
        }
        .is_recoverable_with_force());
        assert!(!SpiritError::unresolved_urn("urn:a").is_recoverable_with_force());
    }
}
