//! Adapter implementations for external services

pub mod memgraph_store;

// Re-export adapters for easier import
pub use memgraph_store::{MemgraphConfig, MemgraphStore};
