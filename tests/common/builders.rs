//! Test data builders for creating test descriptors

use node_descriptor::{NodeDescriptor, PortSet, ResourceManifest};

use super::standard_manifest;

/// Builder for a typical registered supervisor node
pub struct NodeBuilder {
    id: String,
    host: String,
    ports: Vec<i32>,
    resources: Option<ResourceManifest>,
}

impl NodeBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            host: format!("{}.cluster", id),
            ports: vec![6700, 6701, 6702, 6703],
            resources: Some(standard_manifest(4096.0, 400.0)),
        }
    }

    pub fn host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    pub fn ports(mut self, ports: &[i32]) -> Self {
        self.ports = ports.to_vec();
        self
    }

    pub fn resources(mut self, resources: ResourceManifest) -> Self {
        self.resources = Some(resources);
        self
    }

    pub fn without_resources(mut self) -> Self {
        self.resources = None;
        self
    }

    pub fn build(self) -> NodeDescriptor {
        NodeDescriptor::new(
            Some(self.id),
            Some(self.host),
            None,
            None,
            Some(PortSet::from_numbers(self.ports)),
            self.resources,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_builder() {
        let node = NodeBuilder::new("n1").ports(&[6700]).build();

        assert_eq!(node.id(), Some("n1"));
        assert_eq!(node.host(), Some("n1.cluster"));
        assert_eq!(node.port_count(), 1);
    }
}
