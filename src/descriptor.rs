//! Node descriptors
//!
//! A [`NodeDescriptor`] describes one worker node (a "supervisor") that the
//! cluster scheduler may place work on: who it is, where it lives, the ports
//! its workers can bind and the total resources it offers.
//!
//! Descriptors are built once, when a node registers or is discovered, and
//! are read-only afterwards. Nothing is validated at construction: an absent
//! id, host, metadata, port list or manifest is accepted as-is. The only
//! checked reads are [`NodeDescriptor::total_memory`] and
//! [`NodeDescriptor::total_cpu`], which fail with
//! [`NodeError::MissingResource`] rather than reporting zero capacity.
//!
//! # Metadata
//!
//! `M` is the daemon-facing metadata attached at registration and `S` the
//! scheduler-facing metadata. Both are opaque to this crate and default to
//! `()` for callers that attach none.
//!
//! # Example
//!
//! ```
//! use node_descriptor::{NodeDescriptor, ResourceManifest};
//! use node_descriptor::resources::{CPU_RESOURCE_NAME, TOTAL_MEMORY_RESOURCE_NAME};
//!
//! let node: NodeDescriptor = NodeDescriptor::builder()
//!     .id("node-1")
//!     .host("h1.cluster")
//!     .ports([6700, 6701, 6701])
//!     .total_resources([(TOTAL_MEMORY_RESOURCE_NAME, 2048.0), (CPU_RESOURCE_NAME, 400.0)])
//!     .build();
//!
//! assert_eq!(node.ports().len(), 2);
//! assert_eq!(node.total_memory().unwrap(), 2048.0);
//! ```

use crate::error::{NodeError, Result};
use crate::ports::{Port, PortNumber, PortSet};
use crate::resources::{ResourceManifest, CPU_RESOURCE_NAME, TOTAL_MEMORY_RESOURCE_NAME};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One node offered to the cluster scheduler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDescriptor<M = (), S = ()> {
    /// Unique identifier of the node within the cluster
    #[serde(default)]
    id: Option<String>,

    /// Hostname or address of the node
    #[serde(default)]
    host: Option<String>,

    /// Daemon-facing metadata
    #[serde(default)]
    meta: Option<M>,

    /// Metadata intended for scheduler implementations
    #[serde(default)]
    scheduler_meta: Option<S>,

    /// Ports available for worker processes
    #[serde(default)]
    ports: PortSet,

    /// Total resources the node provides
    #[serde(default)]
    total_resources: Option<ResourceManifest>,
}

impl<M, S> NodeDescriptor<M, S> {
    /// Create a descriptor from every field
    ///
    /// `None` ports become an empty port set. The manifest is stored as the
    /// shared handle it was given.
    pub fn new(
        id: Option<String>,
        host: Option<String>,
        meta: Option<M>,
        scheduler_meta: Option<S>,
        ports: Option<PortSet>,
        total_resources: Option<ResourceManifest>,
    ) -> Self {
        tracing::debug!(
            host = ?host,
            id = ?id,
            resources = ?total_resources,
            "Creating a new node descriptor"
        );

        Self {
            id,
            host,
            meta,
            scheduler_meta,
            ports: ports.unwrap_or_default(),
            total_resources,
        }
    }

    /// Start a builder with every field unset
    pub fn builder() -> NodeDescriptorBuilder<M, S> {
        NodeDescriptorBuilder::default()
    }

    /// Node known only by id and daemon metadata
    pub fn with_meta(id: impl Into<String>, meta: Option<M>) -> Self {
        Self::new(Some(id.into()), None, meta, None, None, None)
    }

    /// Node known by id, daemon metadata and resource manifest
    pub fn with_meta_and_resources(
        id: impl Into<String>,
        meta: Option<M>,
        total_resources: impl Into<ResourceManifest>,
    ) -> Self {
        Self::new(
            Some(id.into()),
            None,
            meta,
            None,
            None,
            Some(total_resources.into()),
        )
    }

    /// Node known by id, daemon metadata and ports
    pub fn with_meta_and_ports<I>(id: impl Into<String>, meta: Option<M>, ports: I) -> Self
    where
        I: IntoIterator,
        I::Item: PortNumber,
    {
        Self::new(
            Some(id.into()),
            None,
            meta,
            None,
            Some(PortSet::from_numbers(ports)),
            None,
        )
    }

    /// Node known by id, host, scheduler metadata and ports
    pub fn with_scheduler_meta<I>(
        id: impl Into<String>,
        host: Option<String>,
        scheduler_meta: Option<S>,
        ports: I,
    ) -> Self
    where
        I: IntoIterator,
        I::Item: PortNumber,
    {
        Self::new(
            Some(id.into()),
            host,
            None,
            scheduler_meta,
            Some(PortSet::from_numbers(ports)),
            None,
        )
    }

    /// Node known by id, host, scheduler metadata, ports and resource manifest
    pub fn with_scheduler_meta_and_resources<I>(
        id: impl Into<String>,
        host: Option<String>,
        scheduler_meta: Option<S>,
        ports: I,
        total_resources: impl Into<ResourceManifest>,
    ) -> Self
    where
        I: IntoIterator,
        I::Item: PortNumber,
    {
        Self::new(
            Some(id.into()),
            host,
            None,
            scheduler_meta,
            Some(PortSet::from_numbers(ports)),
            Some(total_resources.into()),
        )
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn meta(&self) -> Option<&M> {
        self.meta.as_ref()
    }

    pub fn scheduler_meta(&self) -> Option<&S> {
        self.scheduler_meta.as_ref()
    }

    /// All ports available for worker processes on this node
    pub fn ports(&self) -> &PortSet {
        &self.ports
    }

    pub fn has_port(&self, port: Port) -> bool {
        self.ports.contains(port)
    }

    pub fn port_count(&self) -> usize {
        self.ports.len()
    }

    /// Full resource manifest, if the node reported one
    pub fn total_resources(&self) -> Option<&ResourceManifest> {
        self.total_resources.as_ref()
    }

    /// Capacity of one resource type
    ///
    /// Returns `None` when the node has no manifest or does not advertise
    /// `name`. Use this to probe optional resources.
    pub fn total_resource(&self, name: &str) -> Option<f64> {
        self.total_resources.as_ref()?.get(name)
    }

    /// Capacity of a resource the caller requires the node to advertise
    pub fn required_resource(&self, name: &str) -> Result<f64> {
        self.total_resource(name)
            .ok_or_else(|| NodeError::missing_resource(self.id(), name))
    }

    /// Total memory in megabytes
    ///
    /// A node without a [`TOTAL_MEMORY_RESOURCE_NAME`] entry is a
    /// misconfigured manifest and yields [`NodeError::MissingResource`].
    pub fn total_memory(&self) -> Result<f64> {
        self.required_resource(TOTAL_MEMORY_RESOURCE_NAME)
    }

    /// Total CPU in percent of a physical core
    ///
    /// Fails like [`NodeDescriptor::total_memory`] when [`CPU_RESOURCE_NAME`]
    /// is missing.
    pub fn total_cpu(&self) -> Result<f64> {
        self.required_resource(CPU_RESOURCE_NAME)
    }
}

impl<M: fmt::Debug, S: fmt::Debug> fmt::Display for NodeDescriptor<M, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NodeDescriptor ID: {} HOST: {} META: {} SCHED_META: {} PORTS: {}",
            self.id.as_deref().unwrap_or("null"),
            self.host.as_deref().unwrap_or("null"),
            DebugOrNull(self.meta.as_ref()),
            DebugOrNull(self.scheduler_meta.as_ref()),
            self.ports
        )
    }
}

struct DebugOrNull<'a, T>(Option<&'a T>);

impl<T: fmt::Debug> fmt::Display for DebugOrNull<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{:?}", value),
            None => write!(f, "null"),
        }
    }
}

/// Builder for [`NodeDescriptor`]
///
/// Unset fields take the same defaults as the partial constructors: no id,
/// host, metadata or manifest, and an empty port set.
#[derive(Debug, Clone)]
pub struct NodeDescriptorBuilder<M = (), S = ()> {
    id: Option<String>,
    host: Option<String>,
    meta: Option<M>,
    scheduler_meta: Option<S>,
    ports: Option<PortSet>,
    total_resources: Option<ResourceManifest>,
}

impl<M, S> Default for NodeDescriptorBuilder<M, S> {
    fn default() -> Self {
        Self {
            id: None,
            host: None,
            meta: None,
            scheduler_meta: None,
            ports: None,
            total_resources: None,
        }
    }
}

impl<M, S> NodeDescriptorBuilder<M, S> {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn meta(mut self, meta: M) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn scheduler_meta(mut self, scheduler_meta: S) -> Self {
        self.scheduler_meta = Some(scheduler_meta);
        self
    }

    /// Ports from any numeric sequence; values are truncated to integers
    pub fn ports<I>(mut self, ports: I) -> Self
    where
        I: IntoIterator,
        I::Item: PortNumber,
    {
        self.ports = Some(PortSet::from_numbers(ports));
        self
    }

    /// Ports from an already built set, sharing its storage
    pub fn port_set(mut self, ports: PortSet) -> Self {
        self.ports = Some(ports);
        self
    }

    pub fn total_resources(mut self, total_resources: impl Into<ResourceManifest>) -> Self {
        self.total_resources = Some(total_resources.into());
        self
    }

    pub fn build(self) -> NodeDescriptor<M, S> {
        NodeDescriptor::new(
            self.id,
            self.host,
            self.meta,
            self.scheduler_meta,
            self.ports,
            self.total_resources,
        )
    }
}
