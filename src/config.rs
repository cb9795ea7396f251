//! Node configuration files
//!
//! A [`NodeConfig`] is the serialized form of what a supervisor daemon
//! reports about itself. Every field is optional and defaults to absent, so a
//! file can describe only what the daemon knows. Files are JSON by default and
//! TOML when the path ends in `.toml`.
//!
//! # Example
//!
//! ```toml
//! id = "node-1"
//! host = "h1.cluster"
//! ports = [6700, 6701]
//!
//! [resources]
//! "memory.mb" = 2048.0
//! "cpu.pcore.percent" = 400.0
//! ```
//!
//! An omitted `resources` table means the node reported no manifest. An
//! explicitly empty table means it reported an empty one.

use crate::descriptor::NodeDescriptor;
use crate::error::{NodeError, Result, ResultExt};
use crate::ports::{Port, PortNumber, PortSet};
use crate::resources::ResourceManifest;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Extension for TOML node configs; anything else is read as JSON
pub const TOML_EXTENSION: &str = "toml";

/// Descriptor metadata as loaded from a config file
pub type ConfigMeta = serde_json::Value;

/// A port as written in a config file
///
/// Integers keep the integer coercion (low 32 bits); only real floats are
/// truncated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PortValue {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl PortNumber for PortValue {
    fn to_port(&self) -> Port {
        match self {
            PortValue::Int(v) => v.to_port(),
            PortValue::UInt(v) => v.to_port(),
            PortValue::Float(v) => v.to_port(),
        }
    }
}

/// Serialized description of one node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Node id within the cluster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Hostname or address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Worker ports; integers keep their low 32 bits, floats are truncated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ports: Option<Vec<PortValue>>,

    /// Resource name to total capacity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<BTreeMap<String, f64>>,

    /// Daemon-facing metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ConfigMeta>,

    /// Scheduler-facing metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduler_meta: Option<ConfigMeta>,
}

impl NodeConfig {
    /// Load a node config from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            NodeError::Config(format!("Failed to read node config {:?}: {}", path, e))
        })?;

        if is_toml(path) {
            Self::from_toml_str(&content).with_context(|| format!("{:?}", path))
        } else {
            Self::from_json_str(&content).with_context(|| format!("{:?}", path))
        }
    }

    /// Load a node config, returning defaults if any error occurs
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load node config, using defaults: {}", e);
            Self::default()
        })
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| NodeError::Config(format!("Failed to parse node config: {}", e)))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| NodeError::Config(format!("Failed to parse node config: {}", e)))
    }

    /// Save the config to disk, as TOML for `.toml` paths and JSON otherwise
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let serialized = if is_toml(path) {
            toml::to_string_pretty(self).map_err(|e| NodeError::Serialization(e.to_string()))
        } else {
            serde_json::to_string_pretty(self).map_err(|e| NodeError::Serialization(e.to_string()))
        };
        let content = serialized.context("Failed to serialize node config")?;

        std::fs::write(path, content).map_err(|e| {
            NodeError::Config(format!("Failed to write node config {:?}: {}", path, e))
        })
    }

    /// Build the descriptor this config describes
    pub fn to_descriptor(&self) -> NodeDescriptor<ConfigMeta, ConfigMeta> {
        self.clone().into_descriptor()
    }

    /// Consume the config and build its descriptor
    pub fn into_descriptor(self) -> NodeDescriptor<ConfigMeta, ConfigMeta> {
        NodeDescriptor::new(
            self.id,
            self.host,
            self.meta,
            self.scheduler_meta,
            self.ports.map(PortSet::from_numbers),
            self.resources.map(ResourceManifest::from),
        )
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(TOML_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{CPU_RESOURCE_NAME, TOTAL_MEMORY_RESOURCE_NAME};

    #[test]
    fn test_default_config_builds_empty_descriptor() {
        let node = NodeConfig::default().into_descriptor();
        assert!(node.id().is_none());
        assert!(node.ports().is_empty());
        assert!(node.total_resources().is_none());
        assert!(node.meta().is_none());
    }

    #[test]
    fn test_json_config() {
        let config = NodeConfig::from_json_str(
            r#"{
                "id": "node-1",
                "host": "h1.cluster",
                "ports": [6700, 6701, 6701, 6702.9],
                "resources": {"memory.mb": 2048.0, "cpu.pcore.percent": 400.0},
                "scheduler_meta": {"rack": "r1"}
            }"#,
        )
        .unwrap();

        let node = config.into_descriptor();
        assert_eq!(node.id(), Some("node-1"));
        assert_eq!(node.ports().iter().collect::<Vec<_>>(), vec![6700, 6701, 6702]);
        assert_eq!(node.total_memory().unwrap(), 2048.0);
        assert_eq!(node.total_cpu().unwrap(), 400.0);
        assert_eq!(node.scheduler_meta().unwrap()["rack"], "r1");
        assert!(node.meta().is_none());
    }

    #[test]
    fn test_toml_config() {
        let config = NodeConfig::from_toml_str(
            r#"
            id = "node-2"
            ports = [6700]

            [resources]
            "memory.mb" = 1024.0
            "#,
        )
        .unwrap();

        let node = config.to_descriptor();
        assert_eq!(node.total_resource(TOTAL_MEMORY_RESOURCE_NAME), Some(1024.0));
        assert!(node.total_cpu().is_err());
    }

    #[test]
    fn test_empty_resources_table_is_present() {
        let config = NodeConfig::from_json_str(r#"{"id": "n", "resources": {}}"#).unwrap();
        let node = config.into_descriptor();
        assert!(node.total_resources().unwrap().is_empty());
        assert_eq!(node.total_resource(CPU_RESOURCE_NAME), None);
    }

    #[test]
    fn test_wide_integer_port_keeps_low_bits() {
        let config = NodeConfig::from_json_str(r#"{"ports": [4294967376, 6700.7]}"#).unwrap();
        let node = config.into_descriptor();

        let expected = PortSet::from_numbers([4_294_967_376u64, 6700]);
        assert_eq!(node.ports(), &expected);
        assert_eq!(node.ports().iter().collect::<Vec<_>>(), vec![80, 6700]);
    }

    #[test]
    fn test_port_values_parse_by_kind() {
        let config = NodeConfig::from_toml_str("ports = [6700, 6701.5, -1]").unwrap();
        assert_eq!(
            config.ports,
            Some(vec![PortValue::Int(6700), PortValue::Float(6701.5), PortValue::Int(-1)])
        );

        let config = NodeConfig::from_json_str(r#"{"ports": [18446744073709551615]}"#).unwrap();
        assert_eq!(config.ports, Some(vec![PortValue::UInt(u64::MAX)]));
        assert_eq!(PortValue::UInt(u64::MAX).to_port(), -1);
    }

    #[test]
    fn test_load_error_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ nope").unwrap();

        let err = NodeConfig::load(&path).unwrap_err();
        assert!(matches!(err, NodeError::WithContext { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_invalid_config() {
        let err = NodeConfig::from_json_str(r#"{"ports": "6700"}"#).unwrap_err();
        assert!(err.to_string().contains("Failed to parse node config"));
    }

    #[test]
    fn test_is_toml() {
        assert!(is_toml(Path::new("node.toml")));
        assert!(is_toml(Path::new("node.TOML")));
        assert!(!is_toml(Path::new("node.json")));
        assert!(!is_toml(Path::new("node")));
    }
}
