//! Core entity types for the graphlab workbench

use serde::{Deserialize, Serialize};

use crate::data::errors::ModelError;

fn default_true() -> bool {
    true
}

fn default_weight() -> i64 {
    1
}

/// Session-wide graph configuration, persisted separately from node/edge data.
///
/// Changes take effect only for subsequent builds and syncs; results computed
/// earlier keep the snapshot they were tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    #[serde(default = "default_true")]
    pub is_directed: bool,
    #[serde(default = "default_true")]
    pub is_weighted: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            is_directed: true,
            is_weighted: true,
        }
    }
}

/// A directed edge record. Identity is the ordered `(source, target)` pair;
/// a later write with the same pair replaces the earlier weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    #[serde(default = "default_weight")]
    pub weight: i64,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: i64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }
}

/// An owned `(nodes, edges, config)` value: what `sync()` consumes and
/// `load()` / import produce. Node order is stable within a single load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<String>,
    pub edges: Vec<Edge>,
    pub config: GraphConfig,
}

impl GraphSnapshot {
    pub fn new(nodes: Vec<String>, edges: Vec<Edge>, config: GraphConfig) -> Self {
        Self {
            nodes,
            edges,
            config,
        }
    }
}

/// The mutable in-memory graph held by one editing session.
///
/// Pure data holder plus mutation bookkeeping: a `dirty` flag records that
/// the model has diverged from the last synced store state.
#[derive(Debug, Clone, Default)]
pub struct GraphModel {
    nodes: Vec<String>,
    edges: Vec<Edge>,
    dirty: bool,
}

impl GraphModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole model from a snapshot (startup load or import).
    /// The result is considered clean: it mirrors what produced it.
    pub fn from_snapshot(snapshot: &GraphSnapshot) -> Self {
        Self {
            nodes: snapshot.nodes.clone(),
            edges: snapshot.edges.clone(),
            dirty: false,
        }
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Called after a successful sync.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.nodes.iter().any(|n| n == name)
    }

    /// Append a node. Names are trimmed at this boundary; identity is
    /// case-sensitive.
    pub fn add_node(&mut self, name: &str) -> Result<(), ModelError> {
        let name = name.trim();
        if self.contains_node(name) {
            return Err(ModelError::DuplicateNode(name.to_string()));
        }
        self.nodes.push(name.to_string());
        self.dirty = true;
        Ok(())
    }

    /// Remove a node and cascade removal of every edge touching it.
    pub fn remove_node(&mut self, name: &str) {
        let name = name.trim();
        self.nodes.retain(|n| n != name);
        self.edges.retain(|e| e.source != name && e.target != name);
        self.dirty = true;
    }

    /// Add an edge between two existing nodes, replacing any edge with the
    /// same ordered pair. Self-loops are permitted.
    pub fn add_edge(&mut self, source: &str, target: &str, weight: i64) -> Result<(), ModelError> {
        let source = source.trim();
        let target = target.trim();
        if !self.contains_node(source) {
            return Err(ModelError::UnknownEndpoint(source.to_string()));
        }
        if !self.contains_node(target) {
            return Err(ModelError::UnknownEndpoint(target.to_string()));
        }
        if let Some(existing) = self
            .edges
            .iter_mut()
            .find(|e| e.source == source && e.target == target)
        {
            existing.weight = weight;
        } else {
            self.edges.push(Edge::new(source, target, weight));
        }
        self.dirty = true;
        Ok(())
    }

    /// No-op if the ordered pair is absent; still marks the model dirty.
    pub fn remove_edge(&mut self, source: &str, target: &str) {
        let source = source.trim();
        let target = target.trim();
        self.edges
            .retain(|e| !(e.source == source && e.target == target));
        self.dirty = true;
    }

    /// Owned copy handed to the sync engine or the builder; never a view
    /// into the live containers.
    pub fn snapshot(&self, config: GraphConfig) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
            config,
        }
    }
}
