//! Core data structures for the graphlab workbench

pub mod entities;
pub mod errors;

// Re-export all common types
pub use entities::{Edge, GraphConfig, GraphModel, GraphSnapshot};
pub use errors::{AlgorithmError, GraphStoreError, ImportError, ModelError, SyncError};
