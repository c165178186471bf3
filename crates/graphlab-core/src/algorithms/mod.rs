//! Algorithm execution engine: a closed family of interchangeable strategies
//! over a [`BuiltGraph`], each producing the same normalized result envelope.
//!
//! Dispatch is by the [`AlgorithmKind`] enum rather than by name lookup, so an
//! unsupported algorithm is a compile error, not a runtime surprise; the
//! string entry point ([`AlgorithmKind::from_str`]) exists only for UI-facing
//! callers and tolerates display suffixes like "Dijkstra (Shortest Path)".

pub mod mst;
pub mod pathfinding;
pub mod traversal;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::entities::GraphConfig;
use crate::data::errors::AlgorithmError;
use crate::graph::BuiltGraph;

pub use mst::{Kruskal, Prim};
pub use pathfinding::{BellmanFord, Dijkstra};
pub use traversal::{Bfs, Dfs};

/// A single interchangeable strategy. Implementations never mutate the input
/// graph; `end` is ignored by traversal and spanning-tree variants.
pub trait Algorithm {
    fn execute(
        &self,
        graph: &BuiltGraph,
        start: &str,
        end: Option<&str>,
    ) -> Result<AlgorithmRun, AlgorithmError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlgorithmKind {
    Bfs,
    Dfs,
    Dijkstra,
    BellmanFord,
    Prim,
    Kruskal,
}

impl AlgorithmKind {
    pub fn name(&self) -> &'static str {
        match self {
            AlgorithmKind::Bfs => "BFS",
            AlgorithmKind::Dfs => "DFS",
            AlgorithmKind::Dijkstra => "Dijkstra",
            AlgorithmKind::BellmanFord => "Bellman-Ford",
            AlgorithmKind::Prim => "Prim",
            AlgorithmKind::Kruskal => "Kruskal",
        }
    }

    /// Dispatch to the strategy implementation.
    pub fn execute(
        &self,
        graph: &BuiltGraph,
        start: &str,
        end: Option<&str>,
    ) -> Result<AlgorithmRun, AlgorithmError> {
        match self {
            AlgorithmKind::Bfs => Bfs.execute(graph, start, end),
            AlgorithmKind::Dfs => Dfs.execute(graph, start, end),
            AlgorithmKind::Dijkstra => Dijkstra.execute(graph, start, end),
            AlgorithmKind::BellmanFord => BellmanFord.execute(graph, start, end),
            AlgorithmKind::Prim => Prim.execute(graph, start, end),
            AlgorithmKind::Kruskal => Kruskal.execute(graph, start, end),
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlgorithmKind {
    type Err = AlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // UI selectors append a description ("Dijkstra (Shortest Path)");
        // only the first token identifies the algorithm.
        let key = s.trim().split_whitespace().next().unwrap_or_default();
        match key {
            "BFS" => Ok(AlgorithmKind::Bfs),
            "DFS" => Ok(AlgorithmKind::Dfs),
            "Dijkstra" => Ok(AlgorithmKind::Dijkstra),
            "Bellman-Ford" => Ok(AlgorithmKind::BellmanFord),
            "Prim" => Ok(AlgorithmKind::Prim),
            "Kruskal" => Ok(AlgorithmKind::Kruskal),
            _ => Err(AlgorithmError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// A concrete path through the graph with its total cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub nodes: Vec<String>,
    pub cost: i64,
}

/// The payload half of the result envelope.
///
/// `Path { route: None }` means the end node is unreachable; this is kept
/// distinct from a legitimate zero-cost route on purpose. A negative cycle is
/// a normal Bellman-Ford outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Traversal {
        order: Vec<String>,
    },
    Path {
        route: Option<Route>,
    },
    NegativeCycle,
    SpanningForest {
        edges: Vec<(String, String, i64)>,
        total_cost: i64,
    },
}

/// Normalized result envelope shared by every strategy. Carries a copy of the
/// configuration flags in effect when the algorithm ran, so a later render of
/// the same result is not corrupted by subsequent configuration edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmRun {
    pub kind: AlgorithmKind,
    pub outcome: Outcome,
    pub message: String,
    pub config: GraphConfig,
}

pub(crate) fn require_node(graph: &BuiltGraph, name: &str) -> Result<usize, AlgorithmError> {
    graph
        .index_of(name)
        .ok_or_else(|| AlgorithmError::UnknownNode(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str_accepts_display_suffix() {
        assert_eq!(
            "Dijkstra (Shortest Path)".parse::<AlgorithmKind>().unwrap(),
            AlgorithmKind::Dijkstra
        );
        assert_eq!("BFS".parse::<AlgorithmKind>().unwrap(), AlgorithmKind::Bfs);
        assert_eq!(
            "Bellman-Ford".parse::<AlgorithmKind>().unwrap(),
            AlgorithmKind::BellmanFord
        );
    }

    #[test]
    fn test_kind_from_str_rejects_unknown() {
        assert!(matches!(
            "FloydWarshall".parse::<AlgorithmKind>(),
            Err(AlgorithmError::UnknownAlgorithm(_))
        ));
    }
}
