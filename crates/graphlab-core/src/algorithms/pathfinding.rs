//! Shortest-path strategies: Dijkstra and Bellman-Ford.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::algorithms::{require_node, Algorithm, AlgorithmKind, AlgorithmRun, Outcome, Route};
use crate::data::errors::AlgorithmError;
use crate::graph::BuiltGraph;

fn backtrack(graph: &BuiltGraph, parent: &[Option<usize>], end: usize) -> Vec<String> {
    let mut nodes = Vec::new();
    let mut current = Some(end);
    while let Some(u) = current {
        nodes.push(graph.node_name(u).to_string());
        current = parent[u];
    }
    nodes.reverse();
    nodes
}

/// Dijkstra's algorithm over non-negative weights. The frontier is keyed by
/// `(tentative distance, discovery sequence)` so ties resolve to the
/// first-discovered node. An unreachable end is a distinct outcome
/// (`route: None`), never a zero-cost path.
pub struct Dijkstra;

impl Algorithm for Dijkstra {
    fn execute(
        &self,
        graph: &BuiltGraph,
        start: &str,
        end: Option<&str>,
    ) -> Result<AlgorithmRun, AlgorithmError> {
        let end = end.ok_or(AlgorithmError::MissingEndNode)?;
        let start = require_node(graph, start)?;
        let end = require_node(graph, end)?;

        if let Some((u, v, w)) = graph.arcs().find(|&(_, _, w)| w < 0) {
            return Err(AlgorithmError::NegativeWeight {
                from: graph.node_name(u).to_string(),
                to: graph.node_name(v).to_string(),
                weight: w,
            });
        }

        let n = graph.node_count();
        let mut dist: Vec<Option<i64>> = vec![None; n];
        let mut parent: Vec<Option<usize>> = vec![None; n];
        let mut heap = BinaryHeap::new();
        let mut seq = 0u64;

        dist[start] = Some(0);
        heap.push(Reverse((0i64, seq, start)));
        while let Some(Reverse((d, _, u))) = heap.pop() {
            if u == end {
                break;
            }
            if dist[u].map_or(true, |best| d > best) {
                continue;
            }
            for &(v, w) in graph.neighbors(u) {
                let candidate = d + w;
                if dist[v].map_or(true, |best| candidate < best) {
                    dist[v] = Some(candidate);
                    parent[v] = Some(u);
                    seq += 1;
                    heap.push(Reverse((candidate, seq, v)));
                }
            }
        }

        let (route, message) = match dist[end] {
            Some(cost) => {
                let nodes = backtrack(graph, &parent, end);
                (
                    Some(Route { nodes, cost }),
                    format!("Dijkstra found a path of cost {}", cost),
                )
            }
            None => (None, "Dijkstra: end node is unreachable".to_string()),
        };

        Ok(AlgorithmRun {
            kind: AlgorithmKind::Dijkstra,
            outcome: Outcome::Path { route },
            message,
            config: graph.config(),
        })
    }
}

/// Bellman-Ford: tolerates negative weights. Runs `|V| - 1` relaxation rounds
/// (with early exit once a round changes nothing) followed by one
/// verification round; an edge that still relaxes proves a negative cycle,
/// reported as a dedicated outcome rather than a path or an error.
pub struct BellmanFord;

impl Algorithm for BellmanFord {
    fn execute(
        &self,
        graph: &BuiltGraph,
        start: &str,
        end: Option<&str>,
    ) -> Result<AlgorithmRun, AlgorithmError> {
        let end = end.ok_or(AlgorithmError::MissingEndNode)?;
        let start = require_node(graph, start)?;
        let end = require_node(graph, end)?;

        let arcs: Vec<(usize, usize, i64)> = graph.arcs().collect();
        let n = graph.node_count();
        let mut dist: Vec<Option<i64>> = vec![None; n];
        let mut parent: Vec<Option<usize>> = vec![None; n];
        dist[start] = Some(0);

        for _ in 1..n.max(1) {
            let mut changed = false;
            for &(u, v, w) in &arcs {
                if let Some(du) = dist[u] {
                    let candidate = du + w;
                    if dist[v].map_or(true, |best| candidate < best) {
                        dist[v] = Some(candidate);
                        parent[v] = Some(u);
                        changed = true;
                    }
                }
            }
            if !changed {
                break;
            }
        }

        // Verification round: any further relaxation proves a negative cycle.
        for &(u, v, w) in &arcs {
            if let Some(du) = dist[u] {
                if dist[v].map_or(true, |best| du + w < best) {
                    return Ok(AlgorithmRun {
                        kind: AlgorithmKind::BellmanFord,
                        outcome: Outcome::NegativeCycle,
                        message: "Bellman-Ford: graph contains a negative cycle".to_string(),
                        config: graph.config(),
                    });
                }
            }
        }

        let (route, message) = match dist[end] {
            Some(cost) => {
                let nodes = backtrack(graph, &parent, end);
                (
                    Some(Route { nodes, cost }),
                    format!("Bellman-Ford found a path of cost {}", cost),
                )
            }
            None => (None, "Bellman-Ford: end node is unreachable".to_string()),
        };

        Ok(AlgorithmRun {
            kind: AlgorithmKind::BellmanFord,
            outcome: Outcome::Path { route },
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

    fn build(nodes: &[&str], edges: &[(&str, &str, i64)]) -> BuiltGraph {
        BuiltGraph::build(&GraphSnapshot::new(
            nodes.iter().map(|n| n.to_string()).collect(),
            edges.iter().map(|&(s, t, w)| Edge::new(s, t, w)).collect(),
            GraphConfig::default(),
        ))
    }

    fn route_of(run: AlgorithmRun) -> Option<Route> {
        match run.outcome {
            Outcome::Path { route } => route,
            other => panic!("expected path outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_dijkstra_picks_cheapest_path() {
        let graph = build(
            &["A", "B", "C", "D"],
            &[("A", "B", 1), ("B", "D", 1), ("A", "C", 1), ("C", "D", 5)],
        );
        let route = route_of(Dijkstra.execute(&graph, "A", Some("D")).unwrap()).unwrap();
        assert_eq!(route.nodes, vec!["A", "B", "D"]);
        assert_eq!(route.cost, 2);
    }

    #[test]
    fn test_dijkstra_unreachable_end_is_no_route() {
        let graph = build(&["A", "B"], &[]);
        let run = Dijkstra.execute(&graph, "A", Some("B")).unwrap();
        assert_eq!(route_of(run), None);
    }

    #[test]
    fn test_dijkstra_zero_length_path_is_distinct_from_unreachable() {
        let graph = build(&["A", "B"], &[("A", "B", 1)]);
        let route = route_of(Dijkstra.execute(&graph, "A", Some("A")).unwrap()).unwrap();
        assert_eq!(route.nodes, vec!["A"]);
        assert_eq!(route.cost, 0);
    }

    #[test]
    fn test_dijkstra_rejects_negative_weights() {
        let graph = build(&["A", "B"], &[("A", "B", -2)]);
        match Dijkstra.execute(&graph, "A", Some("B")) {
            Err(AlgorithmError::NegativeWeight { from, to, weight }) => {
                assert_eq!((from.as_str(), to.as_str(), weight), ("A", "B", -2));
            }
            other => panic!("expected negative weight rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_dijkstra_requires_end_node() {
        let graph = build(&["A"], &[]);
        assert_eq!(
            Dijkstra.execute(&graph, "A", None).unwrap_err(),
            AlgorithmError::MissingEndNode
        );
    }

    #[test]
    fn test_bellman_ford_handles_negative_weights() {
        let graph = build(
            &["A", "B", "C"],
            &[("A", "B", 4), ("A", "C", 2), ("C", "B", -1)],
        );
        let route = route_of(BellmanFord.execute(&graph, "A", Some("B")).unwrap()).unwrap();
        assert_eq!(route.nodes, vec!["A", "C", "B"]);
        assert_eq!(route.cost, 1);
    }

    #[test]
    fn test_bellman_ford_detects_negative_cycle() {
        let graph = build(
            &["A", "B", "C"],
            &[("A", "B", 1), ("B", "C", -3), ("C", "A", 1)],
        );
        let run = BellmanFord.execute(&graph, "A", Some("C")).unwrap();
        assert_eq!(run.outcome, Outcome::NegativeCycle);
    }

    #[test]
    fn test_bellman_ford_unreachable_end_is_no_route() {
        let graph = build(&["A", "B", "C"], &[("A", "B", 1)]);
        let run = BellmanFord.execute(&graph, "A", Some("C")).unwrap();
        assert_eq!(route_of(run), None);
    }

    #[test]
    fn test_agreement_on_non_negative_graph() {
        let graph = build(
            &["A", "B", "C", "D"],
            &[("A", "B", 2), ("B", "C", 2), ("A", "C", 5), ("C", "D", 1)],
        );
        let d = route_of(Dijkstra.execute(&graph, "A", Some("D")).unwrap()).unwrap();
        let bf = route_of(BellmanFord.execute(&graph, "A", Some("D")).unwrap()).unwrap();
        assert_eq!(d, bf);
    }
}
