//! A fake implementation of GraphStore for testing.
//!
//! A simple in-memory store usable in unit and integration tests without a
//! live Memgraph, with switches to inject the failure modes the sync engine
//! must survive: a dead connection, a failed write transaction, a checkpoint
//! refusal, and the silent-write case where a committed transaction is
//! contradicted by the follow-up count query.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::data::entities::GraphConfig;
use crate::data::errors::GraphStoreError;
use crate::traits::graph_store::{EdgeRecord, GraphStore};

#[derive(Debug, Default)]
struct FakeState {
    nodes: Vec<String>,
    edges: Vec<EdgeRecord>,
    config: Option<GraphConfig>,
}

#[derive(Debug, Default)]
pub struct FakeGraphStore {
    state: Mutex<FakeState>,
    fail_connection: AtomicBool,
    fail_transaction: AtomicBool,
    fail_checkpoint: AtomicBool,
    report_zero_edges: AtomicBool,
    checkpoints: AtomicUsize,
}

impl FakeGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store as if a previous session had synced this data.
    pub fn seed(&self, nodes: Vec<String>, edges: Vec<EdgeRecord>, config: Option<GraphConfig>) {
        let mut state = self.state.lock();
        state.nodes = nodes;
        state.edges = edges;
        state.config = config;
    }

    pub fn set_fail_connection(&self, fail: bool) {
        self.fail_connection.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_transaction(&self, fail: bool) {
        self.fail_transaction.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_checkpoint(&self, fail: bool) {
        self.fail_checkpoint.store(fail, Ordering::SeqCst);
    }

    /// Simulate a store that commits but then reports 0 edges on the
    /// verification count query.
    pub fn set_report_zero_edges(&self, enabled: bool) {
        self.report_zero_edges.store(enabled, Ordering::SeqCst);
    }

    pub fn node_names(&self) -> Vec<String> {
        self.state.lock().nodes.clone()
    }

    pub fn edge_records(&self) -> Vec<EdgeRecord> {
        self.state.lock().edges.clone()
    }

    pub fn stored_config(&self) -> Option<GraphConfig> {
        self.state.lock().config
    }

    pub fn checkpoint_count(&self) -> usize {
        self.checkpoints.load(Ordering::SeqCst)
    }

    fn check_connection(&self) -> Result<(), GraphStoreError> {
        if self.fail_connection.load(Ordering::SeqCst) {
            return Err(GraphStoreError::ConnectionError(
                "fake store is offline".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl GraphStore for FakeGraphStore {
    async fn ping(&self) -> Result<(), GraphStoreError> {
        self.check_connection()
    }

    async fn fetch_nodes(&self) -> Result<Vec<String>, GraphStoreError> {
        self.check_connection()?;
        Ok(self.node_names())
    }

    async fn fetch_edges(&self) -> Result<Vec<EdgeRecord>, GraphStoreError> {
        self.check_connection()?;
        Ok(self.edge_records())
    }

    async fn fetch_config(&self) -> Result<Option<GraphConfig>, GraphStoreError> {
        self.check_connection()?;
        Ok(self.stored_config())
    }

    async fn replace_graph(
        &self,
        nodes: &[String],
        edges: &[EdgeRecord],
    ) -> Result<(), GraphStoreError> {
        self.check_connection()?;
        if self.fail_transaction.load(Ordering::SeqCst) {
            // Pre-call state must survive a failed transaction.
            return Err(GraphStoreError::TransactionError(
                "fake transaction aborted".to_string(),
            ));
        }

        let mut state = self.state.lock();
        // Node upsert: union with what is already stored, order preserved.
        for name in nodes {
            if !state.nodes.contains(name) {
                state.nodes.push(name.clone());
            }
        }
        // Edge endpoints are re-merged like the Cypher MERGE would.
        for edge in edges {
            for endpoint in [&edge.source, &edge.target] {
                if !state.nodes.contains(endpoint) {
                    state.nodes.push(endpoint.clone());
                }
            }
        }
        state.edges = edges.to_vec();
        Ok(())
    }

    async fn store_config(&self, config: &GraphConfig) -> Result<(), GraphStoreError> {
        self.check_connection()?;
        self.state.lock().config = Some(*config);
        Ok(())
    }

    async fn checkpoint(&self) -> Result<(), GraphStoreError> {
        self.check_connection()?;
        if self.fail_checkpoint.load(Ordering::SeqCst) {
            return Err(GraphStoreError::QueryError(
                "fake snapshot refused".to_string(),
            ));
        }
        self.checkpoints.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn count_edges(&self) -> Result<u64, GraphStoreError> {
        self.check_connection()?;
        if self.report_zero_edges.load(Ordering::SeqCst) {
            return Ok(0);
        }
        Ok(self.state.lock().edges.len() as u64)
    }

    async fn clear_all(&self) -> Result<(), GraphStoreError> {
        self.check_connection()?;
        let mut state = self.state.lock();
        state.nodes.clear();
        state.edges.clear();
        state.config = None;
        Ok(())
    }
}
