//! Materialized graph structure consumed by the algorithm engine.
//!
//! `BuiltGraph::build` is a pure function of `(nodes, edges, config)`: it
//! deep-copies everything it needs from the snapshot, so algorithms never
//! observe live model containers mid-edit and the build can be repeated
//! without side effects (for algorithm runs and visualization alike).

use std::collections::HashMap;

use tracing::warn;

use crate::data::entities::{GraphConfig, GraphSnapshot};

/// Adjacency structure over dense node indices, honoring the configuration:
/// asymmetric adjacency when directed, weights forced to 1 when unweighted.
#[derive(Debug, Clone)]
pub struct BuiltGraph {
    config: GraphConfig,
    nodes: Vec<String>,
    index: HashMap<String, usize>,
    adjacency: Vec<Vec<(usize, i64)>>,
    /// Logical edges in discovery order. For an undirected build, symmetric
    /// duplicate records (the store's expanded representation) collapse into
    /// a single entry; a later record for an already-seen pair overwrites the
    /// weight, mirroring the last-write-wins policy of the model.
    edges: Vec<(usize, usize, i64)>,
}

impl BuiltGraph {
    pub fn build(snapshot: &GraphSnapshot) -> Self {
        let config = snapshot.config;
        let nodes: Vec<String> = snapshot.nodes.clone();
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, name) in nodes.iter().enumerate() {
            index.insert(name.clone(), i);
        }

        let mut edges: Vec<(usize, usize, i64)> = Vec::with_capacity(snapshot.edges.len());
        let mut seen: HashMap<(usize, usize), usize> = HashMap::new();
        for edge in &snapshot.edges {
            let (Some(&u), Some(&v)) = (index.get(&edge.source), index.get(&edge.target)) else {
                // Documented policy: edges referencing unknown endpoints are
                // dropped during the build, never a build failure.
                warn!(
                    source = %edge.source,
                    target = %edge.target,
                    "dropping edge with unknown endpoint"
                );
                continue;
            };
            let weight = if config.is_weighted { edge.weight } else { 1 };
            let key = if config.is_directed {
                (u, v)
            } else {
                (u.min(v), u.max(v))
            };
            match seen.get(&key) {
                Some(&slot) => edges[slot].2 = weight,
                None => {
                    seen.insert(key, edges.len());
                    edges.push((u, v, weight));
                }
            }
        }

        let mut adjacency = vec![Vec::new(); nodes.len()];
        for &(u, v, w) in &edges {
            adjacency[u].push((v, w));
            if !config.is_directed && u != v {
                adjacency[v].push((u, w));
            }
        }

        Self {
            config,
            nodes,
            index,
            adjacency,
            edges,
        }
    }

    pub fn config(&self) -> GraphConfig {
        self.config
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_name(&self, idx: usize) -> &str {
        &self.nodes[idx]
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Out-neighbors of `u` in edge discovery order.
    pub fn neighbors(&self, u: usize) -> &[(usize, i64)] {
        &self.adjacency[u]
    }

    /// Logical edges in discovery order: one entry per undirected edge.
    pub fn edges(&self) -> &[(usize, usize, i64)] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Directed arcs for relaxation-style algorithms: each logical edge once
    /// when directed, both orientations when undirected (self-loops once).
    pub fn arcs(&self) -> impl Iterator<Item = (usize, usize, i64)> + '_ {
        let directed = self.config.is_directed;
        self.edges.iter().flat_map(move |&(u, v, w)| {
            let reverse = (!directed && u != v).then_some((v, u, w));
            std::iter::once((u, v, w)).chain(reverse)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::entities::Edge;
    use pretty_assertions::assert_eq;

    fn snapshot(nodes: &[&str], edges: &[(&str, &str, i64)], config: GraphConfig) -> GraphSnapshot {
        GraphSnapshot::new(
            nodes.iter().map(|n| n.to_string()).collect(),
            edges
                .iter()
                .map(|&(s, t, w)| Edge::new(s, t, w))
                .collect(),
            config,
        )
    }

    #[test]
    fn test_directed_build_is_asymmetric() {
        let graph = BuiltGraph::build(&snapshot(
            &["A", "B"],
            &[("A", "B", 3)],
            GraphConfig::default(),
        ));
        let a = graph.index_of("A").unwrap();
        let b = graph.index_of("B").unwrap();
        assert_eq!(graph.neighbors(a), &[(b, 3)]);
        assert!(graph.neighbors(b).is_empty());
    }

    #[test]
    fn test_undirected_build_collapses_expanded_pairs() {
        // The store read-back of an undirected graph contains both directed
        // records; the build must yield a single logical edge.
        let config = GraphConfig {
            is_directed: false,
            is_weighted: true,
        };
        let graph = BuiltGraph::build(&snapshot(
            &["A", "B"],
            &[("A", "B", 5), ("B", "A", 5)],
            config,
        ));
        assert_eq!(graph.edge_count(), 1);
        let a = graph.index_of("A").unwrap();
        let b = graph.index_of("B").unwrap();
        assert_eq!(graph.neighbors(a), &[(b, 5)]);
        assert_eq!(graph.neighbors(b), &[(a, 5)]);
        assert_eq!(graph.arcs().count(), 2);
    }

    #[test]
    fn test_unweighted_build_forces_weight_one() {
        let config = GraphConfig {
            is_directed: true,
            is_weighted: false,
        };
        let graph = BuiltGraph::build(&snapshot(&["A", "B"], &[("A", "B", 42)], config));
        let a = graph.index_of("A").unwrap();
        let b = graph.index_of("B").unwrap();
        assert_eq!(graph.neighbors(a), &[(b, 1)]);
    }

    #[test]
    fn test_unknown_endpoints_are_dropped() {
        let graph = BuiltGraph::build(&snapshot(
            &["A"],
            &[("A", "ghost", 1), ("ghost", "A", 1)],
            GraphConfig::default(),
        ));
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_duplicate_pair_last_write_wins() {
        let graph = BuiltGraph::build(&snapshot(
            &["A", "B"],
            &[("A", "B", 1), ("A", "B", 9)],
            GraphConfig::default(),
        ));
        let a = graph.index_of("A").unwrap();
        let b = graph.index_of("B").unwrap();
        assert_eq!(graph.edges(), &[(a, b, 9)]);
    }

    #[test]
    fn test_self_loop_adjacency_not_duplicated() {
        let config = GraphConfig {
            is_directed: false,
            is_weighted: true,
        };
        let graph = BuiltGraph::build(&snapshot(&["A"], &[("A", "A", 2)], config));
        let a = graph.index_of("A").unwrap();
        assert_eq!(graph.neighbors(a), &[(a, 2)]);
        assert_eq!(graph.arcs().count(), 1);
    }
}
