//! Memgraph implementation of the `GraphStore` trait, over Bolt via neo4rs.
//!
//! Memgraph speaks the Bolt protocol, so the same driver stack used for
//! Neo4j works here; only the durability checkpoint (`CREATE SNAPSHOT`) is
//! Memgraph-specific.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use neo4rs::{ConfigBuilder, Graph, Query};
use tracing::{debug, error, info, instrument, warn};

use crate::data::entities::GraphConfig;
use crate::data::errors::GraphStoreError;
use crate::traits::graph_store::{EdgeRecord, GraphStore};

const NODE_UPSERT: &str = "MERGE (:Node {name: $name})";
const EDGE_WIPE: &str = "MATCH ()-[r:LINK]->() DELETE r";
// Re-merging endpoints here means a race between node and edge creation can
// never strand an edge without its endpoints.
const EDGE_UPSERT: &str = "MERGE (u:Node {name: $source}) \
     MERGE (v:Node {name: $target}) \
     MERGE (u)-[r:LINK]->(v) \
     SET r.weight = $weight";

/// Configuration for the Memgraph connection
#[derive(Debug, Clone)]
pub struct MemgraphConfig {
    pub uri: String,
    pub username: String,
    pub password: String,
    pub pool_size: usize,
    pub connection_retry_count: u32,
    pub connection_retry_delay: Duration,
}

impl Default for MemgraphConfig {
    fn default() -> Self {
        Self {
            // Memgraph CE default: local Bolt endpoint, no auth.
            uri: "bolt://localhost:7687".to_string(),
            username: String::new(),
            password: String::new(),
            pool_size: 10,
            connection_retry_count: 3,
            connection_retry_delay: Duration::from_secs(2),
        }
    }
}

impl MemgraphConfig {
    /// Read connection settings from the environment (`MEMGRAPH_URI`,
    /// `MEMGRAPH_USERNAME`, `MEMGRAPH_PASSWORD`), falling back to defaults.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        let defaults = Self::default();
        Self {
            uri: std::env::var("MEMGRAPH_URI").unwrap_or(defaults.uri),
            username: std::env::var("MEMGRAPH_USERNAME").unwrap_or(defaults.username),
            password: std::env::var("MEMGRAPH_PASSWORD").unwrap_or(defaults.password),
            ..defaults
        }
    }
}

/// Memgraph-backed `GraphStore`.
pub struct MemgraphStore {
    pub graph: Arc<Graph>,
    config: MemgraphConfig,
}

impl MemgraphStore {
    pub fn get_config(&self) -> &MemgraphConfig {
        &self.config
    }

    /// Create a new MemgraphStore instance with bounded connect retries.
    pub async fn new(config: MemgraphConfig) -> Result<Self, GraphStoreError> {
        let driver_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.username)
            .password(&config.password)
            .max_connections(config.pool_size)
            .build()
            .map_err(|e| {
                GraphStoreError::ConnectionError(format!("Failed to build Bolt config: {}", e))
            })?;

        let mut last_error = None;
        for attempt in 1..=config.connection_retry_count {
            match Graph::connect(driver_config.clone()).await {
                Ok(graph) => {
                    // Verify the connection with a trivial query before
                    // handing the store out.
                    match graph.execute(Query::new("RETURN 1 as test".to_string())).await {
                        Ok(_) => {
                            info!("Connected to Memgraph at {} (attempt {})", config.uri, attempt);
                            return Ok(Self {
                                graph: Arc::new(graph),
                                config,
                            });
                        }
                        Err(e) => {
                            error!("Connection test failed: {}", e);
                            last_error = Some(e);
                        }
                    }
                }
                Err(e) => {
                    error!(
                        "Failed to connect to Memgraph (attempt {}): {}",
                        attempt, e
                    );
                    last_error = Some(e);
                }
            }
            if attempt < config.connection_retry_count {
                tokio::time::sleep(config.connection_retry_delay).await;
            }
        }

        Err(GraphStoreError::ConnectionError(format!(
            "Failed to connect to Memgraph after {} attempts. Last error: {:?}",
            config.connection_retry_count, last_error
        )))
    }

    /// Best-effort index on node names. Memgraph returns an error when the
    /// index already exists; that is fine either way.
    async fn ensure_index(&self) {
        let query = Query::new("CREATE INDEX ON :Node(name)".to_string());
        if let Err(e) = self.graph.run(query).await {
            debug!("node name index not (re)created: {}", e);
        }
    }
}

#[async_trait]
impl GraphStore for MemgraphStore {
    async fn ping(&self) -> Result<(), GraphStoreError> {
        self.graph
            .execute(Query::new("RETURN 1 as test".to_string()))
            .await
            .map(|_| ())
            .map_err(|e| GraphStoreError::ConnectionError(e.to_string()))
    }

    #[instrument(skip(self))]
    async fn fetch_nodes(&self) -> Result<Vec<String>, GraphStoreError> {
        let query = Query::new("MATCH (n:Node) RETURN n.name as name".to_string());
        let mut result = self
            .graph
            .execute(query)
            .await
            .map_err(|e| GraphStoreError::QueryError(format!("Failed to read nodes: {}", e)))?;

        let mut nodes = Vec::new();
        while let Ok(Some(row)) = result.next().await {
            match row.get::<String>("name") {
                Ok(name) if !name.trim().is_empty() => nodes.push(name.trim().to_string()),
                _ => debug!("skipping node row without a usable name"),
            }
        }
        Ok(nodes)
    }

    #[instrument(skip(self))]
    async fn fetch_edges(&self) -> Result<Vec<EdgeRecord>, GraphStoreError> {
        let query = Query::new(
            "MATCH (u:Node)-[r:LINK]->(v:Node) \
             RETURN u.name as source, v.name as target, r.weight as weight"
                .to_string(),
        );
        let mut result = self
            .graph
            .execute(query)
            .await
            .map_err(|e| GraphStoreError::QueryError(format!("Failed to read edges: {}", e)))?;

        let mut edges = Vec::new();
        while let Ok(Some(row)) = result.next().await {
            let source = row.get::<String>("source").unwrap_or_default();
            let target = row.get::<String>("target").unwrap_or_default();
            if source.trim().is_empty() || target.trim().is_empty() {
                // Rows missing an endpoint are dropped, never abort the read.
                debug!("skipping edge row with a missing endpoint");
                continue;
            }
            // A missing or malformed weight defaults to 1.
            let weight = row
                .get::<i64>("weight")
                .or_else(|_| row.get::<f64>("weight").map(|w| w as i64))
                .unwrap_or(1);
            edges.push(EdgeRecord::new(source.trim(), target.trim(), weight));
        }

        info!("Loaded {} edge records from store", edges.len());
        Ok(edges)
    }

    async fn fetch_config(&self) -> Result<Option<GraphConfig>, GraphStoreError> {
        let query = Query::new(
            "MATCH (c:GraphConfig {id: 'session'}) \
             RETURN c.is_directed as is_directed, c.is_weighted as is_weighted"
                .to_string(),
        );
        let mut result = self
            .graph
            .execute(query)
            .await
            .map_err(|e| GraphStoreError::QueryError(format!("Failed to read config: {}", e)))?;

        match result.next().await {
            Ok(Some(row)) => Ok(Some(GraphConfig {
                is_directed: row.get::<bool>("is_directed").unwrap_or(true),
                is_weighted: row.get::<bool>("is_weighted").unwrap_or(true),
            })),
            Ok(None) => Ok(None),
            Err(e) => Err(GraphStoreError::MappingError(format!(
                "Failed to map config row: {}",
                e
            ))),
        }
    }

    #[instrument(skip(self, nodes, edges), fields(nodes = nodes.len(), edges = edges.len()))]
    async fn replace_graph(
        &self,
        nodes: &[String],
        edges: &[EdgeRecord],
    ) -> Result<(), GraphStoreError> {
        self.ensure_index().await;

        let mut queries = Vec::with_capacity(nodes.len() + edges.len() + 1);
        for name in nodes {
            queries.push(Query::new(NODE_UPSERT.to_string()).param("name", name.as_str()));
        }
        // Full replace: wiping every managed edge first eliminates staleness
        // from partial prior writes.
        queries.push(Query::new(EDGE_WIPE.to_string()));
        for edge in edges {
            queries.push(
                Query::new(EDGE_UPSERT.to_string())
                    .param("source", edge.source.as_str())
                    .param("target", edge.target.as_str())
                    .param("weight", edge.weight),
            );
        }

        let mut txn = self.graph.start_txn().await.map_err(|e| {
            GraphStoreError::TransactionError(format!("Failed to open transaction: {}", e))
        })?;
        if let Err(e) = txn.run_queries(queries).await {
            let _ = txn.rollback().await;
            return Err(GraphStoreError::TransactionError(format!(
                "Graph write failed, batch rolled back: {}",
                e
            )));
        }
        txn.commit().await.map_err(|e| {
            GraphStoreError::TransactionError(format!("Failed to commit graph write: {}", e))
        })?;

        debug!("replaced graph: {} nodes, {} edges", nodes.len(), edges.len());
        Ok(())
    }

    async fn store_config(&self, config: &GraphConfig) -> Result<(), GraphStoreError> {
        let query = Query::new(
            "MERGE (c:GraphConfig {id: 'session'}) \
             SET c.is_directed = $is_directed, c.is_weighted = $is_weighted"
                .to_string(),
        )
        .param("is_directed", config.is_directed)
        .param("is_weighted", config.is_weighted);
        self.graph
            .run(query)
            .await
            .map_err(|e| GraphStoreError::QueryError(format!("Failed to store config: {}", e)))
    }

    async fn checkpoint(&self) -> Result<(), GraphStoreError> {
        self.graph
            .run(Query::new("CREATE SNAPSHOT".to_string()))
            .await
            .map_err(|e| GraphStoreError::QueryError(format!("Snapshot failed: {}", e)))
    }

    async fn count_edges(&self) -> Result<u64, GraphStoreError> {
        let query = Query::new("MATCH ()-[r:LINK]->() RETURN count(r) as edges".to_string());
        let mut result = self
            .graph
            .execute(query)
            .await
            .map_err(|e| GraphStoreError::QueryError(format!("Failed to count edges: {}", e)))?;

        match result.next().await {
            Ok(Some(row)) => row.get::<i64>("edges").map(|c| c.max(0) as u64).map_err(|e| {
                GraphStoreError::MappingError(format!("Failed to map edge count: {}", e))
            }),
            Ok(None) => Ok(0),
            Err(e) => Err(GraphStoreError::QueryError(format!(
                "Failed to read edge count: {}",
                e
            ))),
        }
    }

    async fn clear_all(&self) -> Result<(), GraphStoreError> {
        warn!("wiping entire store");
        self.graph
            .run(Query::new("MATCH (n) DETACH DELETE n".to_string()))
            .await
            .map_err(|e| GraphStoreError::QueryError(format!("Failed to clear store: {}", e)))
    }
}
