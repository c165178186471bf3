//! Core services for the graphlab workbench

pub mod import;
pub mod sync;

pub use sync::{SyncEngine, SyncReport};
