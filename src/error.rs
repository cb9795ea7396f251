//! Error handling for node descriptors
//!
//! This module defines the crate error type and a Result alias for use
//! throughout the crate.

use thiserror::Error;

/// Main error type for node-descriptor operations
#[derive(Error, Debug)]
pub enum NodeError {
    /// A well-known resource was queried on a node that never advertised it
    #[error("Node {node} does not advertise resource '{resource}'")]
    MissingResource { node: String, resource: String },

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<NodeError>,
    },
}

impl NodeError {
    /// Build a missing-resource error; an absent node id renders as `null`
    pub fn missing_resource(node: Option<&str>, resource: &str) -> Self {
        NodeError::MissingResource {
            node: node.unwrap_or("null").to_string(),
            resource: resource.to_string(),
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        NodeError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// True if this error (or the error it wraps) is a missing resource
    pub fn is_missing_resource(&self) -> bool {
        match self {
            NodeError::MissingResource { .. } => true,
            NodeError::WithContext { source, .. } => source.is_missing_resource(),
            _ => false,
        }
    }
}

/// Result type alias for node-descriptor operations
pub type Result<T> = std::result::Result<T, NodeError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}
