//! Template render context.

use super::options::CreateOptions;
use crate::packages::Package;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Everything a project template can reference
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext<'a> {
    pub create_options: &'a CreateOptions,
    pub packages: &'a [Package],
    /// Path of the original configuration, as given
    pub config: String,
    pub config_filename: &'a str,
    pub create_time: DateTime<Utc>,
    pub args: Map<String, Value>,
}

/// Overlay caller arguments on template defaults; caller keys win
pub fn merge_args(
    defaults: Map<String, Value>,
    overrides: Option<&Map<String, Value>>,
) -> Map<String, Value> {
    let mut merged = defaults;
    if let Some(overrides) = overrides {
        for (key, value) in overrides {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_caller_keys_win() {
        let merged = merge_args(
            object(json!({"port": 8080, "name": "default"})),
            Some(&object(json!({"name": "custom", "debug": true}))),
        );

        assert_eq!(merged["port"], 8080);
        assert_eq!(merged["name"], "custom");
        assert_eq!(merged["debug"], true);
    }

    #[test]
    fn test_no_overrides_keeps_defaults() {
        let merged = merge_args(object(json!({"port": 8080})), None);
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_context_serializes_expected_keys() {
        let options = CreateOptions::default();
        let packages = vec![Package::new("pkg/x", "/ws/src")];
        let context = RenderContext {
            create_options: &options,
            packages: &packages,
            config: "/etc/spirit.json".to_string(),
            config_filename: "spirit.json",
            create_time: Utc::now(),
            args: Map::new(),
        };

        let value = serde_json::to_value(&context).unwrap();
        for key in [
            "create_options",
            "packages",
            "config",
            "config_filename",
            "create_time",
            "args",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(value["packages"][0]["uri"], "pkg/x");
    }
}
