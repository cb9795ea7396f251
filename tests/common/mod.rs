//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

use node_descriptor::resources::{CPU_RESOURCE_NAME, TOTAL_MEMORY_RESOURCE_NAME};
use node_descriptor::ResourceManifest;

/// Manifest with the two well-known capacities set
pub fn standard_manifest(memory_mb: f64, cpu_percent: f64) -> ResourceManifest {
    ResourceManifest::from([
        (TOTAL_MEMORY_RESOURCE_NAME, memory_mb),
        (CPU_RESOURCE_NAME, cpu_percent),
    ])
}

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}
