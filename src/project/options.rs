//! Create options: everything the CLI layer collects before a create or run.

use crate::error::{Result, SpiritError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOptions {
    /// Workspace root (the GOPATH sources and templates live under)
    pub workspace: PathBuf,
    /// URN to package mapping documents, merged in order
    pub sources: Vec<PathBuf>,
    pub template_name: String,
    /// Project directory; relative paths are taken from the workspace source dir
    pub project_path: PathBuf,
    pub force_write: bool,
    pub get_packages: bool,
    pub update_packages: bool,
    /// Per import path revision pins
    pub packages_revision: BTreeMap<String, String>,
}

impl CreateOptions {
    pub fn validate(&self) -> Result<()> {
        if self.workspace.as_os_str().is_empty() {
            return Err(SpiritError::validation(
                "workspace",
                "workspace path is empty",
            ));
        }

        if self.sources.is_empty() {
            return Err(SpiritError::NoMappingSource);
        }

        let template_name = self.template_name.trim();
        if template_name.is_empty() {
            return Err(SpiritError::validation(
                "template_name",
                "template name is empty",
            ));
        }
        if template_name.contains(['/', '\\']) || template_name == ".." {
            return Err(SpiritError::validation(
                "template_name",
                format!("template name {template_name} must be a single path segment"),
            ));
        }

        if self.project_path.as_os_str().is_empty() {
            return Err(SpiritError::validation(
                "project_path",
                "project path is empty",
            ));
        }

        if let Some((pkg, _)) = self
            .packages_revision
            .iter()
            .find(|(pkg, revision)| pkg.is_empty() || revision.is_empty())
        {
            return Err(SpiritError::validation(
                "packages_revision",
                format!("revision pin for '{pkg}' must name both a package and a revision"),
            ));
        }

        Ok(())
    }

    /// Directory the project is written to
    pub fn project_dir(&self, source_root: &Path) -> PathBuf {
        if self.project_path.is_absolute() {
            self.project_path.clone()
        } else {
            source_root.join(&self.project_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> CreateOptions {
        CreateOptions {
            workspace: PathBuf::from("/ws"),
            sources: vec![PathBuf::from("/ws/sources.json")],
            template_name: "classic".to_string(),
            project_path: PathBuf::from("github.com/acme/app"),
            ..CreateOptions::default()
        }
    }

    #[test]
    fn test_valid_options() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_empty_sources_is_no_mapping_source() {
        let options = CreateOptions {
            sources: vec![],
            ..valid()
        };
        assert!(matches!(
            options.validate(),
            Err(SpiritError::NoMappingSource)
        ));
    }

    #[test]
    fn test_template_name_must_be_one_segment() {
        let options = CreateOptions {
            template_name: "../escape".to_string(),
            ..valid()
        };
        let err = options.validate().unwrap_err();
        assert!(err.to_string().contains("template_name"));
    }

    #[test]
    fn test_blank_revision_pin_rejected() {
        let mut options = valid();
        options
            .packages_revision
            .insert("pkg/x".to_string(), String::new());
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_project_dir_resolution() {
        let relative = valid();
        assert_eq!(
            relative.project_dir(Path::new("/ws/src")),
            PathBuf::from("/ws/src/github.com/acme/app")
        );

        let absolute = CreateOptions {
            project_path: PathBuf::from("/tmp/app"),
            ..valid()
        };
        assert_eq!(
            absolute.project_dir(Path::new("/ws/src")),
            PathBuf::from("/tmp/app")
        );
    }
}
