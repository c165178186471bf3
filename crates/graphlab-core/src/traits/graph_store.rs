//! GraphStore trait definition for graph database interaction

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::data::{entities::GraphConfig, errors::GraphStoreError};

/// A single directed edge as stored on the wire: endpoint names plus an
/// integer weight. Undirected graphs are materialized as two of these per
/// logical edge before they reach the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    pub weight: i64,
}

impl EdgeRecord {
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: i64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }

    pub fn reversed(&self) -> Self {
        Self {
            source: self.target.clone(),
            target: self.source.clone(),
            weight: self.weight,
        }
    }
}

/// Represents the interface to the external graph store over a
/// session-oriented connection. This abstracts the underlying database
/// technology (Memgraph over Bolt in production, in-memory fakes in tests).
///
/// Implementations own connectivity, query execution and transaction
/// boundaries; every operation is expected to carry an implicit timeout from
/// the underlying client and to fail closed with a typed error rather than
/// blocking indefinitely.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Cheap connectivity check; precedes any synchronization operation.
    async fn ping(&self) -> Result<(), GraphStoreError>;

    /// Point read of all node names.
    async fn fetch_nodes(&self) -> Result<Vec<String>, GraphStoreError>;

    /// Point read of all directed edge records. A malformed or missing weight
    /// on a single record defaults to 1 rather than failing the bulk read.
    async fn fetch_edges(&self) -> Result<Vec<EdgeRecord>, GraphStoreError>;

    /// Read of the single configuration record; `None` when absent.
    async fn fetch_config(&self) -> Result<Option<GraphConfig>, GraphStoreError>;

    /// Atomic full replace of the managed graph: upsert every node, delete
    /// every previously-stored edge of the managed relationship kind, then
    /// upsert every edge re-merging its endpoints. Commits all-or-nothing;
    /// on failure the store is left at its pre-call state.
    async fn replace_graph(
        &self,
        nodes: &[String],
        edges: &[EdgeRecord],
    ) -> Result<(), GraphStoreError>;

    /// Upsert of the single configuration record, independent of the
    /// node/edge transaction.
    async fn store_config(&self, config: &GraphConfig) -> Result<(), GraphStoreError>;

    /// Best-effort durability checkpoint, distinct from transaction commit.
    async fn checkpoint(&self) -> Result<(), GraphStoreError>;

    /// Raw count of stored edges, used for post-write verification.
    async fn count_edges(&self) -> Result<u64, GraphStoreError>;

    /// Detach and delete every node and edge unconditionally.
    async fn clear_all(&self) -> Result<(), GraphStoreError>;
}
