//! Persistence synchronization engine.
//!
//! Reconciles an explicitly-supplied `(nodes, edges, config)` snapshot with
//! the remote graph store and reconstructs the snapshot on demand. The write
//! path is a full replace inside one transaction (never an incremental
//! delete-by-diff), followed by a best-effort durability checkpoint and a
//! verification count read; see [`SyncEngine::sync`].
//!
//! Single-writer model: one logical session issues one `sync`/`load`/`clear`
//! at a time. The engine does not serialize concurrent callers; interleaving
//! two writers against one store is the caller's responsibility.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, instrument, warn};

use crate::data::entities::{Edge, GraphConfig, GraphSnapshot};
use crate::data::errors::SyncError;
use crate::traits::graph_store::{EdgeRecord, GraphStore};

/// Outcome summary of a successful sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Nodes written (after normalization).
    pub nodes: usize,
    /// Edge records written (after undirected expansion).
    pub edges: usize,
    /// Post-write count read, when verification ran.
    pub verified_edges: Option<u64>,
    pub message: String,
}

/// Owns the store handle and the trusted flag.
///
/// The trusted flag starts false and is set by a successful [`load`]; while it
/// is false, [`sync`] refuses to overwrite a store whose true state could not
/// be confirmed, unless the caller forces it.
///
/// [`load`]: SyncEngine::load
/// [`sync`]: SyncEngine::sync
pub struct SyncEngine {
    store: Arc<dyn GraphStore>,
    trusted: RwLock<bool>,
}

impl SyncEngine {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self {
            store,
            trusted: RwLock::new(false),
        }
    }

    pub fn is_trusted(&self) -> bool {
        *self.trusted.read()
    }

    /// Read the store back into a fresh snapshot: all nodes, all directed
    /// edge records, then the configuration record (defaulting to
    /// directed+weighted when absent). A successful load marks the store
    /// trusted.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<GraphSnapshot, SyncError> {
        self.store.ping().await?;

        let nodes = self.store.fetch_nodes().await?;
        let records = self.store.fetch_edges().await?;
        let config = self.store.fetch_config().await?.unwrap_or_default();

        let edges: Vec<Edge> = records
            .into_iter()
            .map(|r| Edge::new(r.source, r.target, r.weight))
            .collect();

        info!(nodes = nodes.len(), edges = edges.len(), "loaded graph from store");
        *self.trusted.write() = true;

        Ok(GraphSnapshot::new(nodes, edges, config))
    }

    /// Push the full snapshot to the store.
    ///
    /// Steps: trusted-flag safeguard, identifier normalization, undirected
    /// expansion, atomic full replace, best-effort checkpoint, verification
    /// count read, configuration upsert. Any transaction failure leaves the
    /// store at its pre-sync state; a checkpoint failure is logged and
    /// swallowed because the data is already committed.
    #[instrument(skip(self, snapshot), fields(force = force))]
    pub async fn sync(
        &self,
        snapshot: &GraphSnapshot,
        force: bool,
    ) -> Result<SyncReport, SyncError> {
        if !self.is_trusted() && !force {
            return Err(SyncError::Refused);
        }

        let (nodes, edges) = normalize(&snapshot.nodes, &snapshot.edges);
        let records = if snapshot.config.is_directed {
            edges
        } else {
            expand_undirected(edges)
        };

        // The error conversion keeps the failure class: an unreachable store
        // surfaces as `Connection`, an aborted batch as `Transaction`.
        self.store.replace_graph(&nodes, &records).await?;

        // Advisory only: the transaction above already committed.
        if let Err(e) = self.store.checkpoint().await {
            warn!("durability checkpoint failed, data may be volatile: {}", e);
        }

        let verified_edges = if records.is_empty() {
            None
        } else {
            let count = self.store.count_edges().await?;
            if count == 0 {
                return Err(SyncError::Verification {
                    expected: records.len(),
                });
            }
            Some(count)
        };

        self.store.store_config(&snapshot.config).await?;

        // A forced overwrite that succeeded end to end tells us what the
        // store now holds.
        *self.trusted.write() = true;

        let verify_msg = match verified_edges {
            Some(count) => format!("(Verified: {})", count),
            None => "(Empty Graph)".to_string(),
        };
        let message = format!(
            "Saved {} nodes, {} edges. {}",
            nodes.len(),
            records.len(),
            verify_msg
        );
        info!("{}", message);

        Ok(SyncReport {
            nodes: nodes.len(),
            edges: records.len(),
            verified_edges,
            message,
        })
    }

    /// Detach and delete every node and edge unconditionally. Leaves the
    /// trusted flag as-is: an empty store is a confirmed state.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), SyncError> {
        self.store.clear_all().await?;
        warn!("store wiped");
        Ok(())
    }

    /// Standalone configuration save, independent of node/edge data.
    pub async fn persist_config(&self, config: &GraphConfig) -> Result<(), SyncError> {
        self.store.store_config(config).await?;
        Ok(())
    }
}

/// Trim identifiers, drop empty names and half-empty edges, de-duplicate
/// nodes, and collapse duplicate ordered pairs last-write-wins.
fn normalize(nodes: &[String], edges: &[Edge]) -> (Vec<String>, Vec<EdgeRecord>) {
    let mut clean_nodes = Vec::with_capacity(nodes.len());
    let mut seen_nodes = HashSet::new();
    for name in nodes {
        let name = name.trim();
        if !name.is_empty() && seen_nodes.insert(name.to_string()) {
            clean_nodes.push(name.to_string());
        }
    }

    let mut clean_edges: Vec<EdgeRecord> = Vec::with_capacity(edges.len());
    let mut seen_pairs: HashMap<(String, String), usize> = HashMap::new();
    for edge in edges {
        let source = edge.source.trim();
        let target = edge.target.trim();
        if source.is_empty() || target.is_empty() {
            continue;
        }
        let key = (source.to_string(), target.to_string());
        match seen_pairs.get(&key) {
            Some(&slot) => clean_edges[slot].weight = edge.weight,
            None => {
                seen_pairs.insert(key, clean_edges.len());
                clean_edges.push(EdgeRecord::new(source, target, edge.weight));
            }
        }
    }

    (clean_nodes, clean_edges)
}

/// Materialize undirected adjacency for a directed-edge store: every logical
/// edge (u, v, w) with no explicit reverse record gains a (v, u, w) twin.
/// Self-loops are never duplicated.
fn expand_undirected(edges: Vec<EdgeRecord>) -> Vec<EdgeRecord> {
    let present: HashSet<(String, String)> = edges
        .iter()
        .map(|e| (e.source.clone(), e.target.clone()))
        .collect();

    let mut expanded = Vec::with_capacity(edges.len() * 2);
    for edge in edges {
        let reverse_present =
            present.contains(&(edge.target.clone(), edge.source.clone()));
        let is_self_loop = edge.source == edge.target;
        let reverse = edge.reversed();
        expanded.push(edge);
        if !is_self_loop && !reverse_present {
            expanded.push(reverse);
        }
    }
    expanded
}
