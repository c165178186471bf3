//! JSON import/export shape for graph snapshots.
//!
//! The file shape is owned by external tooling; this module only validates
//! and coerces it:
//!
//! ```json
//! { "config": {"is_directed": true, "is_weighted": true},
//!   "nodes": ["A", "B"],
//!   "edges": [{"source": "A", "target": "B", "weight": 3}] }
//! ```

use serde_json::Value;

use crate::data::entities::{Edge, GraphConfig, GraphSnapshot};
use crate::data::errors::ImportError;

fn coerce_node_name(value: &Value) -> Result<String, ImportError> {
    match value {
        Value::String(s) => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(ImportError::Format(format!(
            "node entries must be strings, got: {}",
            other
        ))),
    }
}

// A weight that is present but malformed falls back to 1, mirroring the
// bulk-read policy of the store adapter.
fn coerce_weight(value: Option<&Value>) -> i64 {
    match value {
        None | Some(Value::Null) => 1,
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(1),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(1),
        Some(_) => 1,
    }
}

fn coerce_endpoint(edge: &Value, key: &str) -> Result<String, ImportError> {
    let endpoint = edge
        .get(key)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .unwrap_or_default();
    if endpoint.is_empty() {
        return Err(ImportError::Format(format!(
            "edge is missing a {} endpoint: {}",
            key, edge
        )));
    }
    Ok(endpoint.to_string())
}

impl GraphSnapshot {
    /// Validate an import payload. `nodes` and `edges` must be list-shaped;
    /// unknown top-level keys are ignored; a missing `config` defaults to
    /// directed + weighted.
    pub fn from_import(data: &Value) -> Result<Self, ImportError> {
        let raw_nodes = data
            .get("nodes")
            .and_then(|v| v.as_array())
            .ok_or_else(|| ImportError::Format("'nodes' must be a list".to_string()))?;
        let raw_edges = data
            .get("edges")
            .and_then(|v| v.as_array())
            .ok_or_else(|| ImportError::Format("'edges' must be a list".to_string()))?;

        let config = match data.get("config") {
            None | Some(Value::Null) => GraphConfig::default(),
            Some(value) => serde_json::from_value(value.clone())?,
        };

        let mut nodes = Vec::with_capacity(raw_nodes.len());
        for value in raw_nodes {
            let name = coerce_node_name(value)?;
            if !name.is_empty() && !nodes.contains(&name) {
                nodes.push(name);
            }
        }

        let mut edges = Vec::with_capacity(raw_edges.len());
        for value in raw_edges {
            let source = coerce_endpoint(value, "source")?;
            let target = coerce_endpoint(value, "target")?;
            let weight = coerce_weight(value.get("weight"));
            edges.push(Edge::new(source, target, weight));
        }

        Ok(GraphSnapshot::new(nodes, edges, config))
    }

    /// Produce the same shape for download/export.
    pub fn to_export(&self) -> Value {
        serde_json::json!({
            "config": self.config,
            "nodes": self.nodes,
            "edges": self.edges,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_import_full_payload() {
        let data = json!({
            "config": {"is_directed": false, "is_weighted": true},
            "nodes": ["A", " B "],
            "edges": [{"source": "A", "target": "B", "weight": 3}],
        });
        let snapshot = GraphSnapshot::from_import(&data).unwrap();
        assert_eq!(snapshot.nodes, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(snapshot.edges, vec![Edge::new("A", "B", 3)]);
        assert!(!snapshot.config.is_directed);
    }

    #[test]
    fn test_import_missing_config_defaults() {
        let data = json!({"nodes": [], "edges": []});
        let snapshot = GraphSnapshot::from_import(&data).unwrap();
        assert_eq!(snapshot.config, GraphConfig::default());
    }

    #[test]
    fn test_import_missing_weight_defaults_to_one() {
        let data = json!({
            "nodes": ["A", "B"],
            "edges": [
                {"source": "A", "target": "B"},
                {"source": "B", "target": "A", "weight": "garbage"},
            ],
        });
        let snapshot = GraphSnapshot::from_import(&data).unwrap();
        assert_eq!(snapshot.edges[0].weight, 1);
        assert_eq!(snapshot.edges[1].weight, 1);
    }

    #[test]
    fn test_import_rejects_non_list_nodes() {
        let data = json!({"nodes": "A,B", "edges": []});
        assert!(GraphSnapshot::from_import(&data).is_err());

        let data = json!({"edges": []});
        assert!(GraphSnapshot::from_import(&data).is_err());
    }

    #[test]
    fn test_import_rejects_edge_without_endpoint() {
        let data = json!({"nodes": ["A"], "edges": [{"source": "A"}]});
        assert!(GraphSnapshot::from_import(&data).is_err());
    }

    #[test]
    fn test_import_ignores_unknown_top_level_keys() {
        let data = json!({"nodes": ["A"], "edges": [], "comment": "hello"});
        let snapshot = GraphSnapshot::from_import(&data).unwrap();
        assert_eq!(snapshot.nodes, vec!["A".to_string()]);
    }

    #[test]
    fn test_export_round_trips() {
        let snapshot = GraphSnapshot::new(
            vec!["A".into(), "B".into()],
            vec![Edge::new("A", "B", 4)],
            GraphConfig {
                is_directed: false,
                is_weighted: true,
            },
        );
        let exported = snapshot.to_export();
        let reimported = GraphSnapshot::from_import(&exported).unwrap();
        assert_eq!(reimported, snapshot);
    }
}
