//! Minimum spanning tree strategies: Prim and Kruskal.
//!
//! Both operate only on undirected builds and return a partial forest when
//! the input is disconnected; connectivity checking is the caller's job
//! (documented caveat, not silently fixed here).

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::algorithms::{require_node, Algorithm, AlgorithmKind, AlgorithmRun, Outcome};
use crate::data::errors::AlgorithmError;
use crate::graph::BuiltGraph;

fn forest_run(
    kind: AlgorithmKind,
    graph: &BuiltGraph,
    edges: Vec<(usize, usize, i64)>,
    total_cost: i64,
) -> AlgorithmRun {
    let named: Vec<(String, String, i64)> = edges
        .into_iter()
        .map(|(u, v, w)| {
            (
                graph.node_name(u).to_string(),
                graph.node_name(v).to_string(),
                w,
            )
        })
        .collect();
    let message = format!(
        "{} selected {} edges, total cost {}",
        kind.name(),
        named.len(),
        total_cost
    );
    AlgorithmRun {
        kind,
        outcome: Outcome::SpanningForest {
            edges: named,
            total_cost,
        },
        message,
        config: graph.config(),
    }
}

/// Prim's algorithm: grows a frontier from the start node using a priority
/// queue of candidate edges crossing the visited/unvisited cut, breaking
/// weight ties by edge discovery order.
pub struct Prim;

impl Algorithm for Prim {
    fn execute(
        &self,
        graph: &BuiltGraph,
        start: &str,
        _end: Option<&str>,
    ) -> Result<AlgorithmRun, AlgorithmError> {
        if graph.config().is_directed {
            return Err(AlgorithmError::RequiresUndirected);
        }
        let start = if start.trim().is_empty() {
            // An arbitrary start is fine for a spanning tree.
            match graph.node_count() {
                0 => return Ok(forest_run(AlgorithmKind::Prim, graph, Vec::new(), 0)),
                _ => 0,
            }
        } else {
            require_node(graph, start)?
        };

        let mut visited = vec![false; graph.node_count()];
        let mut heap = BinaryHeap::new();
        let mut seq = 0u64;
        let mut selected = Vec::new();
        let mut total_cost = 0i64;

        visited[start] = true;
        for &(v, w) in graph.neighbors(start) {
            heap.push(Reverse((w, seq, start, v)));
            seq += 1;
        }
        while let Some(Reverse((w, _, u, v))) = heap.pop() {
            if visited[v] {
                continue;
            }
            visited[v] = true;
            selected.push((u, v, w));
            total_cost += w;
            for &(next, nw) in graph.neighbors(v) {
                if !visited[next] {
                    heap.push(Reverse((nw, seq, v, next)));
                    seq += 1;
                }
            }
        }

        Ok(forest_run(AlgorithmKind::Prim, graph, selected, total_cost))
    }
}

/// Union-find over dense node indices: path compression on find, union by
/// attaching the first root under the second.
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = i;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Returns false when both nodes already share a root (a cycle).
    fn union(&mut self, i: usize, j: usize) -> bool {
        let root_i = self.find(i);
        let root_j = self.find(j);
        if root_i == root_j {
            return false;
        }
        self.parent[root_i] = root_j;
        true
    }
}

/// Kruskal's algorithm: logical edges sorted by weight ascending (the sort is
/// stable, so discovery order breaks ties), each edge added when it does not
/// close a cycle.
pub struct Kruskal;

impl Algorithm for Kruskal {
    fn execute(
        &self,
        graph: &BuiltGraph,
        _start: &str,
        _end: Option<&str>,
    ) -> Result<AlgorithmRun, AlgorithmError> {
        if graph.config().is_directed {
            return Err(AlgorithmError::RequiresUndirected);
        }

        let mut edges: Vec<(usize, usize, i64)> = graph.edges().to_vec();
        edges.sort_by_key(|&(_, _, w)| w);

        let mut sets = DisjointSet::new(graph.node_count());
        let mut selected = Vec::new();
        let mut total_cost = 0i64;
        for (u, v, w) in edges {
            if sets.union(u, v) {
                selected.push((u, v, w));
                total_cost += w;
            }
        }

        Ok(forest_run(AlgorithmKind::Kruskal, graph, selected, total_cost))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::entities::{Edge, GraphConfig, GraphSnapshot};
    use pretty_assertions::assert_eq;

    fn undirected(nodes: &[&str], edges: &[(&str, &str, i64)]) -> BuiltGraph {
        BuiltGraph::build(&GraphSnapshot::new(
            nodes.iter().map(|n| n.to_string()).collect(),
            edges.iter().map(|&(s, t, w)| Edge::new(s, t, w)).collect(),
            GraphConfig {
                is_directed: false,
                is_weighted: true,
            },
        ))
    }

    fn forest(run: AlgorithmRun) -> (Vec<(String, String, i64)>, i64) {
        match run.outcome {
            Outcome::SpanningForest { edges, total_cost } => (edges, total_cost),
            other => panic!("expected spanning forest outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_prim_and_kruskal_agree_on_cost() {
        let graph = undirected(
            &["A", "B", "C", "D"],
            &[
                ("A", "B", 1),
                ("B", "C", 4),
                ("A", "C", 2),
                ("C", "D", 3),
                ("B", "D", 7),
            ],
        );
        let (prim_edges, prim_cost) = forest(Prim.execute(&graph, "A", None).unwrap());
        let (kruskal_edges, kruskal_cost) = forest(Kruskal.execute(&graph, "", None).unwrap());
        assert_eq!(prim_cost, 6);
        assert_eq!(kruskal_cost, 6);
        assert_eq!(prim_edges.len(), 3);
        assert_eq!(kruskal_edges.len(), 3);
    }

    #[test]
    fn test_kruskal_disconnected_returns_partial_forest() {
        let graph = undirected(&["A", "B", "C"], &[("A", "B", 2)]);
        let (edges, cost) = forest(Kruskal.execute(&graph, "", None).unwrap());
        assert_eq!(edges, vec![("A".to_string(), "B".to_string(), 2)]);
        assert_eq!(cost, 2);
    }

    #[test]
    fn test_prim_only_spans_start_component() {
        let graph = undirected(&["A", "B", "C", "D"], &[("A", "B", 1), ("C", "D", 1)]);
        let (edges, cost) = forest(Prim.execute(&graph, "A", None).unwrap());
        assert_eq!(edges.len(), 1);
        assert_eq!(cost, 1);
    }

    #[test]
    fn test_prim_defaults_to_first_node_when_start_empty() {
        let graph = undirected(&["A", "B"], &[("A", "B", 5)]);
        let (edges, _) = forest(Prim.execute(&graph, "  ", None).unwrap());
        assert_eq!(edges, vec![("A".to_string(), "B".to_string(), 5)]);
    }

    #[test]
    fn test_mst_rejects_directed_build() {
        let graph = BuiltGraph::build(&GraphSnapshot::new(
            vec!["A".into(), "B".into()],
            vec![Edge::new("A", "B", 1)],
            GraphConfig::default(),
        ));
        assert_eq!(
            Prim.execute(&graph, "A", None).unwrap_err(),
            AlgorithmError::RequiresUndirected
        );
        assert_eq!(
            Kruskal.execute(&graph, "", None).unwrap_err(),
            AlgorithmError::RequiresUndirected
        );
    }

    #[test]
    fn test_connected_forest_has_v_minus_one_edges() {
        let graph = undirected(
            &["A", "B", "C", "D", "E"],
            &[
                ("A", "B", 3),
                ("B", "C", 1),
                ("C", "D", 2),
                ("D", "E", 4),
                ("E", "A", 5),
                ("B", "D", 6),
            ],
        );
        let (edges, _) = forest(Kruskal.execute(&graph, "", None).unwrap());
        assert_eq!(edges.len(), graph.node_count() - 1);
    }

    #[test]
    fn test_kruskal_breaks_weight_ties_by_discovery_order() {
        let graph = undirected(&["A", "B", "C"], &[("A", "B", 1), ("B", "C", 1), ("A", "C", 1)]);
        let (edges, cost) = forest(Kruskal.execute(&graph, "", None).unwrap());
        assert_eq!(cost, 2);
        assert_eq!(
            edges,
            vec![
                ("A".to_string(), "B".to_string(), 1),
                ("B".to_string(), "C".to_string(), 1),
            ]
        );
    }
}
