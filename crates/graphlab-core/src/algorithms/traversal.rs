//! Breadth-first and depth-first traversal strategies.

use std::collections::VecDeque;

use crate::algorithms::{require_node, Algorithm, AlgorithmKind, AlgorithmRun, Outcome};
use crate::data::errors::AlgorithmError;
use crate::graph::BuiltGraph;

/// Breadth-first traversal: visits every node reachable from `start` in FIFO
/// first-discovery order.
pub struct Bfs;

impl Algorithm for Bfs {
    fn execute(
        &self,
        graph: &BuiltGraph,
        start: &str,
        _end: Option<&str>,
    ) -> Result<AlgorithmRun, AlgorithmError> {
        let start = require_node(graph, start)?;
        let mut visited = vec![false; graph.node_count()];
        let mut queue = VecDeque::new();
        let mut order = Vec::new();

        visited[start] = true;
        queue.push_back(start);
        while let Some(u) = queue.pop_front() {
            order.push(graph.node_name(u).to_string());
            for &(v, _) in graph.neighbors(u) {
                if !visited[v] {
                    visited[v] = true;
                    queue.push_back(v);
                }
            }
        }

        let message = format!("BFS visited {} nodes", order.len());
        Ok(AlgorithmRun {
            kind: AlgorithmKind::Bfs,
            outcome: Outcome::Traversal { order },
            message,
            config: graph.config(),
        })
    }
}

/// Depth-first traversal with an explicit stack. Neighbors are pushed in
/// reverse adjacency order so pop order matches adjacency order, making the
/// result deterministic across runs on an unchanged graph.
pub struct Dfs;

impl Algorithm for Dfs {
    fn execute(
        &self,
        graph: &BuiltGraph,
        start: &str,
        _end: Option<&str>,
    ) -> Result<AlgorithmRun, AlgorithmError> {
        let start = require_node(graph, start)?;
        let mut visited = vec![false; graph.node_count()];
        let mut stack = vec![start];
        let mut order = Vec::new();

        while let Some(u) = stack.pop() {
            if visited[u] {
                continue;
            }
            visited[u] = true;
            order.push(graph.node_name(u).to_string());
            for &(v, _) in graph.neighbors(u).iter().rev() {
                if !visited[v] {
                    stack.push(v);
                }
            }
        }

        let message = format!("DFS visited {} nodes", order.len());
        Ok(AlgorithmRun {
            kind: AlgorithmKind::Dfs,
            outcome: Outcome::Traversal { order },
            message,
            config: graph.config(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::entities::{Edge, GraphConfig, GraphSnapshot};
    use pretty_assertions::assert_eq;

    fn diamond() -> BuiltGraph {
        // A -> B, A -> C, B -> D, C -> D
        BuiltGraph::build(&GraphSnapshot::new(
            vec!["A".into(), "B".into(), "C".into(), "D".into()],
            vec![
                Edge::new("A", "B", 1),
                Edge::new("A", "C", 1),
                Edge::new("B", "D", 1),
                Edge::new("C", "D", 1),
            ],
            GraphConfig::default(),
        ))
    }

    fn traversal_order(run: AlgorithmRun) -> Vec<String> {
        match run.outcome {
            Outcome::Traversal { order } => order,
            other => panic!("expected traversal outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_bfs_visits_in_first_discovery_order() {
        let order = traversal_order(Bfs.execute(&diamond(), "A", None).unwrap());
        assert_eq!(order, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_dfs_follows_adjacency_order() {
        let order = traversal_order(Dfs.execute(&diamond(), "A", None).unwrap());
        assert_eq!(order, vec!["A", "B", "D", "C"]);
    }

    #[test]
    fn test_traversal_stops_at_reachable_set() {
        let graph = BuiltGraph::build(&GraphSnapshot::new(
            vec!["A".into(), "B".into(), "X".into()],
            vec![Edge::new("A", "B", 1)],
            GraphConfig::default(),
        ));
        let order = traversal_order(Bfs.execute(&graph, "A", None).unwrap());
        assert_eq!(order, vec!["A", "B"]);
    }

    #[test]
    fn test_unknown_start_node_is_typed_error() {
        assert_eq!(
            Bfs.execute(&diamond(), "ghost", None).unwrap_err(),
            AlgorithmError::UnknownNode("ghost".to_string())
        );
    }

    #[test]
    fn test_result_carries_config_snapshot() {
        let run = Dfs.execute(&diamond(), "A", None).unwrap();
        assert!(run.config.is_directed);
        assert_eq!(run.kind, AlgorithmKind::Dfs);
    }
}
