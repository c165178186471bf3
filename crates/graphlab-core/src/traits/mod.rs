//! Core traits (interfaces) for the graphlab workbench

pub mod graph_store;

pub use graph_store::{EdgeRecord, GraphStore};
