//! Reads a pipeline configuration file, keeping the exact bytes so the
//! generated project receives a verbatim copy.

use super::SpiritConfig;
use crate::error::{Result, SpiritError};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct LoadedSpiritConfig {
    pub config: SpiritConfig,
    /// Path the configuration was read from
    pub path: PathBuf,
    /// Final path component, reused as the copy's name inside the project
    pub file_name: String,
    pub original: Vec<u8>,
}

impl LoadedSpiritConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if path.as_os_str().is_empty() {
            return Err(SpiritError::config("<none>", "config file name is empty"));
        }

        let metadata = std::fs::metadata(path)
            .map_err(|e| SpiritError::config(path.display().to_string(), e.to_string()))?;
        if !metadata.is_file() {
            return Err(SpiritError::config(
                path.display().to_string(),
                "config path must point to a regular file",
            ));
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| SpiritError::config(path.display().to_string(), "no file name"))?;

        let original = std::fs::read(path)
            .map_err(|e| SpiritError::config(path.display().to_string(), e.to_string()))?;

        let config: SpiritConfig = serde_json::from_slice(&original).map_err(|e| {
            SpiritError::config(
                path.display().to_string(),
                format!("malformed configuration: {e}"),
            )
        })?;

        debug!(path = %path.display(), bytes = original.len(), "Loaded spirit configuration");

        Ok(Self {
            config,
            path: path.to_path_buf(),
            file_name,
            original,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;

    #[test]
    fn test_load_keeps_original_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spirit.json");
        let raw = b"{\n  \"routers\": [ {\"name\": \"r\", \"urn\": \"urn:router\"} ]\n}\n";
        std::fs::write(&path, raw).unwrap();

        let loaded = LoadedSpiritConfig::load(&path).unwrap();
        assert_eq!(loaded.original, raw.to_vec());
        assert_eq!(loaded.file_name, "spirit.json");
        assert_eq!(loaded.config.routers[0].urn, "urn:router");
    }

    #[test]
    fn test_empty_path_is_config_error() {
        let err = LoadedSpiritConfig::load("").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Config);
        assert!(err.to_string().contains("config file name is empty"));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = LoadedSpiritConfig::load("/no/such/spirit.json").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Config);
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = LoadedSpiritConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("malformed configuration"));
    }
}
