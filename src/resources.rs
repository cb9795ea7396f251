//! Resource manifests and well-known resource names
//!
//! A [`ResourceManifest`] maps a resource-type name to the total capacity a
//! node provides. Units depend on the resource (megabytes for memory,
//! percent-of-a-core for CPU). The manifest is shared, not copied: every
//! descriptor built from the same manifest points at the same immutable map.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Total memory of a node in megabytes
pub const TOTAL_MEMORY_RESOURCE_NAME: &str = "memory.mb";

/// Total CPU of a node, in percent of one physical core (100 = one core)
pub const CPU_RESOURCE_NAME: &str = "cpu.pcore.percent";

/// On-heap memory in megabytes
pub const ONHEAP_MEMORY_RESOURCE_NAME: &str = "onheap.memory.mb";

/// Off-heap memory in megabytes
pub const OFFHEAP_MEMORY_RESOURCE_NAME: &str = "offheap.memory.mb";

/// Read-only mapping from resource name to total capacity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceManifest(Arc<BTreeMap<String, f64>>);

impl ResourceManifest {
    pub fn new(resources: BTreeMap<String, f64>) -> Self {
        Self(Arc::new(resources))
    }

    /// Capacity of one resource type, `None` if the node does not advertise it
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resource names and capacities in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Borrow the underlying map
    pub fn as_map(&self) -> &BTreeMap<String, f64> {
        &self.0
    }

    /// True if both manifests are the same shared map (not just equal content)
    pub fn shares_storage(&self, other: &ResourceManifest) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<BTreeMap<String, f64>> for ResourceManifest {
    fn from(resources: BTreeMap<String, f64>) -> Self {
        Self::new(resources)
    }
}

impl From<HashMap<String, f64>> for ResourceManifest {
    fn from(resources: HashMap<String, f64>) -> Self {
        resources.into_iter().collect()
    }
}

impl<K: Into<String>, const N: usize> From<[(K, f64); N]> for ResourceManifest {
    fn from(resources: [(K, f64); N]) -> Self {
        resources.into_iter().collect()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for ResourceManifest {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
