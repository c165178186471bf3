//! Mock implementations of core interfaces for unit testing
//!
//! Expectation-driven mocks for tests that want to assert exact call
//! sequences; for state-bearing behavior prefer [`crate::test_utils::fakes`].

#[cfg(feature = "mocks")]
pub mod mock_implementations {
    use async_trait::async_trait;
    use mockall::mock;

    use crate::data::entities::GraphConfig;
    use crate::data::errors::GraphStoreError;
    use crate::traits::graph_store::{EdgeRecord, GraphStore};

    mock! {
        pub GraphStore {}

        #[async_trait]
        impl GraphStore for GraphStore {
            async fn ping(&self) -> Result<(), GraphStoreError>;
            async fn fetch_nodes(&self) -> Result<Vec<String>, GraphStoreError>;
            async fn fetch_edges(&self) -> Result<Vec<EdgeRecord>, GraphStoreError>;
            async fn fetch_config(&self) -> Result<Option<GraphConfig>, GraphStoreError>;
            async fn replace_graph(
                &self,
                nodes: &[String],
                edges: &[EdgeRecord],
            ) -> Result<(), GraphStoreError>;
            async fn store_config(&self, config: &GraphConfig) -> Result<(), GraphStoreError>;
            async fn checkpoint(&self) -> Result<(), GraphStoreError>;
            async fn count_edges(&self) -> Result<u64, GraphStoreError>;
            async fn clear_all(&self) -> Result<(), GraphStoreError>;
        }
    }
}

#[cfg(feature = "mocks")]
pub use mock_implementations::MockGraphStore;
