//! Error types for the graphlab core

use thiserror::Error;

/// Errors raised by in-memory graph model mutations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ModelError {
    #[error("Node already exists: {0}")]
    DuplicateNode(String),
    #[error("Unknown edge endpoint: {0}")]
    UnknownEndpoint(String),
}

/// Specific error type for the graph store (Bolt/Cypher interaction).
#[derive(Error, Debug)]
pub enum GraphStoreError {
    #[error("Graph database connection error: {0}")]
    ConnectionError(String),
    #[error("Graph query execution error: {0}")]
    QueryError(String),
    #[error("Data mapping error from graph result: {0}")]
    MappingError(String),
    #[error("Transaction error: {0}")]
    TransactionError(String),
}

/// Convert a String into a GraphStoreError::QueryError
impl From<String> for GraphStoreError {
    fn from(error: String) -> Self {
        GraphStoreError::QueryError(error)
    }
}

/// Errors surfaced by the persistence synchronization engine.
///
/// `Refused` and `Verification` are safeguards rather than store failures:
/// the first trips when a destructive sync is attempted before the store's
/// true state was confirmed by a load, the second when the store committed a
/// write transaction but the follow-up count query contradicts it.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Store connection error: {0}")]
    Connection(String),
    #[error("Sync refused: store state not confirmed by a successful load (use force to overwrite)")]
    Refused,
    #[error("Write transaction failed: {0}")]
    Transaction(String),
    #[error("Sync failed: store confirmed 0 edges after writing {expected}")]
    Verification { expected: usize },
    #[error("Store error: {0}")]
    Store(GraphStoreError),
}

impl From<GraphStoreError> for SyncError {
    fn from(error: GraphStoreError) -> Self {
        match error {
            GraphStoreError::ConnectionError(msg) => SyncError::Connection(msg),
            GraphStoreError::TransactionError(msg) => SyncError::Transaction(msg),
            other => SyncError::Store(other),
        }
    }
}

/// Errors raised by the algorithm execution engine.
///
/// Note that a negative cycle found by Bellman-Ford is *not* an error; it is
/// an expected outcome and travels through the result envelope instead.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AlgorithmError {
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),
    #[error("Unknown node: {0}")]
    UnknownNode(String),
    #[error("End node required for this algorithm")]
    MissingEndNode,
    // Field is named `from`, not `source`: thiserror reserves `source` for
    // an error cause.
    #[error("Negative weight {weight} on edge {from} -> {to} not supported by Dijkstra")]
    NegativeWeight {
        from: String,
        to: String,
        weight: i64,
    },
    #[error("Spanning tree algorithms require an undirected graph")]
    RequiresUndirected,
}

/// Malformed import payload.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Import format error: {0}")]
    Format(String),
}

impl From<serde_json::Error> for ImportError {
    fn from(error: serde_json::Error) -> Self {
        ImportError::Format(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_error_display() {
        let error = ModelError::DuplicateNode("A".into());
        assert_eq!(format!("{}", error), "Node already exists: A");
    }

    #[test]
    fn test_graph_store_error_display() {
        let error = GraphStoreError::ConnectionError("connection failed".into());
        assert_eq!(
            format!("{}", error),
            "Graph database connection error: connection failed"
        );
    }

    #[test]
    fn test_negative_weight_display_names_both_endpoints() {
        let error = AlgorithmError::NegativeWeight {
            from: "A".into(),
            to: "B".into(),
            weight: -2,
        };
        assert_eq!(
            format!("{}", error),
            "Negative weight -2 on edge A -> B not supported by Dijkstra"
        );
    }

    #[test]
    fn test_connection_error_maps_to_sync_connection() {
        let error: SyncError = GraphStoreError::ConnectionError("down".into()).into();
        assert!(matches!(error, SyncError::Connection(_)));
    }

    #[test]
    fn test_query_error_maps_to_sync_store() {
        let error: SyncError = GraphStoreError::QueryError("bad cypher".into()).into();
        assert!(matches!(error, SyncError::Store(_)));
    }
}
