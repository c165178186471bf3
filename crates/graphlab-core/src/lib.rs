//! Graphlab workbench core.
//!
//! An incrementally-edited weighted graph (the model), a pure builder that
//! materializes it for classic algorithms (traversal, shortest path, MST),
//! and a synchronization engine that keeps an authoritative copy durable in
//! a Memgraph store over Bolt — never losing edges silently and surviving
//! partial failures.

// Core modules
pub mod algorithms;
pub mod data;
pub mod graph;
pub mod services;
pub mod traits;

// Implementation adapters (optional, can be provided externally)
#[cfg(feature = "adapters")]
pub mod adapters;

// Testing utilities
pub mod test_utils;

// Re-export key types for convenient usage
pub use data::entities::{Edge, GraphConfig, GraphModel, GraphSnapshot};
pub use data::errors::{
    AlgorithmError, GraphStoreError, ImportError, ModelError, SyncError,
};
pub use graph::BuiltGraph;

// Re-export core traits
pub use traits::graph_store::{EdgeRecord, GraphStore};

// Re-export core services
pub use services::sync::{SyncEngine, SyncReport};

// Re-export the algorithm engine surface
pub use algorithms::{Algorithm, AlgorithmKind, AlgorithmRun, Outcome, Route};

#[cfg(feature = "adapters")]
pub use adapters::{MemgraphConfig, MemgraphStore};

/// Initialize tracing for the workbench
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .init();
}
