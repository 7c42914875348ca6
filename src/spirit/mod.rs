//! # Spirit Pipeline Configuration
//!
//! Typed view of a pipeline configuration document: named actors grouped by
//! role, plus reader and writer pools. Only the pieces the tool needs are
//! typed; actor options stay opaque JSON and are carried verbatim into the
//! generated project through the copied configuration file.

pub mod loader;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use loader::LoadedSpiritConfig;

/// One configured actor instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorConfig {
    #[serde(default)]
    pub name: String,
    pub urn: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub options: Value,
}

impl ActorConfig {
    pub fn new(name: impl Into<String>, urn: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            urn: urn.into(),
            options: Value::Null,
        }
    }
}

/// A reader pool is an actor in its own right and may embed the reader it pools
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReaderPoolConfig {
    #[serde(flatten)]
    pub actor: ActorConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reader: Option<ActorConfig>,
}

/// A writer pool is an actor in its own right and may embed the writer it pools
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WriterPoolConfig {
    #[serde(flatten)]
    pub actor: ActorConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writer: Option<ActorConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiritConfig {
    pub input_translators: Vec<ActorConfig>,
    pub output_translators: Vec<ActorConfig>,
    pub inboxes: Vec<ActorConfig>,
    pub outboxes: Vec<ActorConfig>,
    pub receivers: Vec<ActorConfig>,
    pub senders: Vec<ActorConfig>,
    pub routers: Vec<ActorConfig>,
    pub components: Vec<ActorConfig>,
    pub label_matchers: Vec<ActorConfig>,
    pub urn_rewriters: Vec<ActorConfig>,
    pub reader_pools: Vec<ReaderPoolConfig>,
    pub writer_pools: Vec<WriterPoolConfig>,
}

impl SpiritConfig {
    /// Role lists in their canonical order
    pub fn actor_groups(&self) -> [&[ActorConfig]; 10] {
        [
            &self.input_translators,
            &self.output_translators,
            &self.inboxes,
            &self.outboxes,
            &self.receivers,
            &self.senders,
            &self.routers,
            &self.components,
            &self.label_matchers,
            &self.urn_rewriters,
        ]
    }
}
