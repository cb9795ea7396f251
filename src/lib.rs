//! # node-descriptor: worker node descriptors for cluster schedulers
//!
//! A stream-processing cluster's scheduler places work onto worker nodes
//! ("supervisors"). This crate provides the value object a scheduler reads
//! for each node: [`NodeDescriptor`].
//!
//! ## Modules
//!
//! - **descriptor**: the [`NodeDescriptor`] itself, its partial constructors and builder
//! - **ports**: [`PortSet`], the read-only set of worker ports
//! - **resources**: [`ResourceManifest`] and the cluster-wide resource names
//! - **config**: [`NodeConfig`], a file format that builds descriptors
//! - **error**: [`NodeError`] and the crate [`Result`] alias
//! - **logging**: tracing subscriber setup for binaries
//!
//! ## Example
//!
//! ```
//! use node_descriptor::{NodeDescriptor, ResourceManifest};
//! use node_descriptor::resources::{CPU_RESOURCE_NAME, TOTAL_MEMORY_RESOURCE_NAME};
//!
//! let manifest = ResourceManifest::from([
//!     (TOTAL_MEMORY_RESOURCE_NAME, 4096.0),
//!     (CPU_RESOURCE_NAME, 800.0),
//! ]);
//!
//! let node: NodeDescriptor = NodeDescriptor::with_scheduler_meta_and_resources(
//!     "node-7",
//!     Some("h7.cluster".to_string()),
//!     None,
//!     [6700, 6701, 6702],
//!     manifest,
//! );
//!
//! assert!(node.has_port(6701));
//! assert_eq!(node.total_cpu()?, 800.0);
//! # Ok::<(), node_descriptor::NodeError>(())
//! ```

pub mod config;
pub mod descriptor;
pub mod error;
pub mod logging;
pub mod ports;
pub mod resources;

pub use config::NodeConfig;
pub use descriptor::{NodeDescriptor, NodeDescriptorBuilder};
pub use error::{NodeError, Result, ResultExt};
pub use ports::{Port, PortNumber, PortSet};
pub use resources::ResourceManifest;
