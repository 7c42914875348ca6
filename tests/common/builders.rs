//! Workspace builders for integration tests.
//!
//! A `TestWorkspace` is a throwaway GOPATH-style directory holding templates,
//! package source documents and pipeline configurations.

#![allow(dead_code)] // Each test binary uses a different subset

use serde_json::{json, Value};
use spirit_tool::config::{ToolConfig, ToolchainConfig};
use spirit_tool::CreateOptions;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const TEMPLATE_NAME: &str = "classic";

/// Entry-point template exercising packages, config name, timestamp and args
pub const CLASSIC_TEMPLATE: &str = r#"package main

// generated at {{create_time}} from {{config_filename}}

import (
{{#each packages}}	_ "{{uri}}"
{{/each}})

func main() {
	name := "{{args.name}}"
	port := {{args.port}}
	_, _ = name, port
}
"#;

pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create workspace"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn source_root(&self) -> PathBuf {
        self.root().join("src")
    }

    pub fn template_dir(&self, name: &str) -> PathBuf {
        self.source_root()
            .join(spirit_tool::constants::DEFAULT_TEMPLATE_ROOT)
            .join(name)
    }

    pub fn with_template(self, name: &str, body: &str) -> Self {
        let dir = self.template_dir(name);
        std::fs::create_dir_all(&dir).expect("Failed to create template dir");
        std::fs::write(dir.join("main.go"), body).expect("Failed to write template");
        self
    }

    pub fn with_template_args(self, name: &str, args: Value) -> Self {
        let dir = self.template_dir(name);
        std::fs::create_dir_all(&dir).expect("Failed to create template dir");
        std::fs::write(dir.join("args.json"), args.to_string()).expect("Failed to write args");
        self
    }

    /// Write a package source document mapping each URN to an import path
    pub fn write_sources(&self, file_name: &str, pairs: &[(&str, &str)]) -> PathBuf {
        let packages: Vec<Value> = pairs
            .iter()
            .map(|(urn, pkg)| json!({"urn": urn, "pkg": pkg}))
            .collect();
        let path = self.root().join(file_name);
        std::fs::write(&path, json!({ "packages": packages }).to_string())
            .expect("Failed to write sources");
        path
    }

    pub fn write_spirit_config(&self, file_name: &str, config: &Value) -> PathBuf {
        let path = self.root().join(file_name);
        std::fs::write(
            &path,
            serde_json::to_string_pretty(config).expect("Failed to serialize config"),
        )
        .expect("Failed to write spirit config");
        path
    }

    pub fn options(&self, sources: Vec<PathBuf>, project: &str) -> CreateOptions {
        CreateOptions {
            workspace: self.root().to_path_buf(),
            sources,
            template_name: TEMPLATE_NAME.to_string(),
            project_path: PathBuf::from(project),
            ..CreateOptions::default()
        }
    }

    pub fn project_dir(&self, project: &str) -> PathBuf {
        self.source_root().join(project)
    }

    /// Install a stand-in `go` script: `build` writes a shell artifact that
    /// records its working directory, `get` creates the package directory.
    #[cfg(unix)]
    pub fn install_fake_go(&self) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let bin = self.root().join("bin");
        std::fs::create_dir_all(&bin).expect("Failed to create bin dir");
        let path = bin.join("go");
        std::fs::write(
            &path,
            r#"#!/bin/sh
case "$1" in
  build)
    printf '#!/bin/sh\npwd > ran.txt\nexit 0\n' > "$3"
    chmod +x "$3"
    ;;
  get)
    for last in "$@"; do :; done
    mkdir -p "$GOPATH/src/$last"
    echo "$@" >> "$GOPATH/get.log"
    ;;
esac
exit 0
"#,
        )
        .expect("Failed to write fake go");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to chmod fake go");
        path
    }
}

/// A pipeline configuration touching every actor role
pub fn sample_spirit_config() -> Value {
    json!({
        "input_translators": [{"name": "in", "urn": "urn:spirit:translator:in:json"}],
        "output_translators": [{"name": "out", "urn": "urn:spirit:translator:out:json"}],
        "inboxes": [{"name": "inbox", "urn": "urn:spirit:inbox:classic"}],
        "outboxes": [{"name": "outbox", "urn": "urn:spirit:outbox:classic"}],
        "receivers": [{"name": "receiver", "urn": "urn:spirit:receiver:std"}],
        "senders": [{"name": "sender", "urn": "urn:spirit:sender:std"}],
        "routers": [{"name": "router", "urn": "urn:spirit:router:classic"}],
        "components": [{"name": "todo", "urn": "urn:acme:component:todo", "options": {"verbose": true}}],
        "label_matchers": [{"name": "matcher", "urn": "urn:spirit:matcher:equal"}],
        "urn_rewriters": [],
        "reader_pools": [{
            "name": "reader_pool",
            "urn": "urn:spirit:io:pool:reader:classic",
            "reader": {"name": "stdin", "urn": "urn:spirit:io:reader:std"}
        }],
        "writer_pools": [{"name": "writer_pool", "urn": "urn:spirit:io:pool:writer:classic"}]
    })
}

/// Package sources covering every URN in `sample_spirit_config`
pub fn sample_sources() -> Vec<(&'static str, &'static str)> {
    vec![
        ("urn:spirit:translator:in:json", "github.com/gogap/spirit-builtin"),
        ("urn:spirit:translator:out:json", "github.com/gogap/spirit-builtin"),
        ("urn:spirit:inbox:classic", "github.com/gogap/spirit-builtin"),
        ("urn:spirit:outbox:classic", "github.com/gogap/spirit-builtin"),
        ("urn:spirit:receiver:std", "github.com/gogap/spirit-io"),
        ("urn:spirit:sender:std", "github.com/gogap/spirit-io"),
        ("urn:spirit:router:classic", "github.com/gogap/spirit-builtin"),
        ("urn:acme:component:todo", "github.com/acme/todo"),
        ("urn:spirit:matcher:equal", "github.com/gogap/spirit-builtin"),
        ("urn:spirit:io:pool:reader:classic", "github.com/gogap/spirit-io"),
        ("urn:spirit:io:reader:std", "github.com/gogap/spirit-io"),
        ("urn:spirit:io:pool:writer:classic", "github.com/gogap/spirit-io"),
    ]
}

/// Tool configuration using `go_binary`; git is stubbed with `true`
pub fn tool_config_with_go(go_binary: &str) -> ToolConfig {
    let mut config = ToolConfig::default();
    config.toolchain = ToolchainConfig {
        go_binary: go_binary.to_string(),
        git_binary: "true".to_string(),
        legacy_gopath: true,
    };
    config.supervisor.tick_interval_ms = 50;
    config
}
