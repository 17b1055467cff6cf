//! Route discovery pipeline: extraction, description, and manifest output.

pub mod describe;
pub mod extractor;
pub mod handler;
pub mod manifest;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A route declaration found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord {
    /// Uppercased HTTP verb.
    pub method: String,
    /// Literal path as written in the source.
    pub path: String,
    /// Base name of the file containing the declaration.
    pub source_file: String,
    /// 1-based line of the declaration.
    pub source_line: usize,
}

/// Where a manifest entry was declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSource {
    /// File base name.
    pub file: String,
    /// 1-based line number.
    pub line: usize,
}

/// One route in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Request path.
    pub path: String,
    /// Uppercased HTTP verb.
    pub method: String,
    /// Human-readable description.
    pub description: String,
    /// Example request path.
    pub example: String,
    /// Declaration site; absent for fallback routes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<RouteSource>,
}

impl RouteEntry {
    /// Returns a copy without source metadata.
    #[must_use]
    pub fn without_source(&self) -> Self {
        Self { source: None, ..self.clone() }
    }
}

/// Routes keyed by their synthetic identifier.
pub type RouteTable = BTreeMap<String, RouteEntry>;

/// The generated route manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// When this manifest was generated.
    pub generated_at: DateTime<Utc>,
    /// Number of entries in `routes`.
    pub total_routes: usize,
    /// The routes themselves.
    pub routes: RouteTable,
}

/// The monitor's last-known manifest state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// When the comparison that wrote this snapshot ran.
    pub timestamp: DateTime<Utc>,
    /// Routes as of that comparison.
    pub routes: RouteTable,
    /// Number of entries in `routes`.
    pub total_routes: usize,
}

impl Snapshot {
    /// Captures the routes of `manifest` stamped with `timestamp`.
    #[must_use]
    pub fn of(manifest: &Manifest, timestamp: DateTime<Utc>) -> Self {
        Self { timestamp, routes: manifest.routes.clone(), total_routes: manifest.total_routes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(path: &str, source: Option<RouteSource>) -> RouteEntry {
        RouteEntry {
            path: path.to_string(),
            method: "GET".to_string(),
            description: "Backend status".to_string(),
            example: path.to_string(),
            source,
        }
    }

    #[test]
    fn manifest_serializes_in_camel_case() {
        let mut routes = RouteTable::new();
        routes.insert(
            "_api_status_0".to_string(),
            entry("/api/status", Some(RouteSource { file: "index.ts".into(), line: 12 })),
        );
        let manifest = Manifest {
            generated_at: "2025-06-15T10:00:00Z".parse().unwrap(),
            total_routes: 1,
            routes,
        };

        let value = serde_json::to_value(&manifest).unwrap();

        assert_eq!(value["generatedAt"], json!("2025-06-15T10:00:00Z"));
        assert_eq!(value["totalRoutes"], json!(1));
        assert_eq!(value["routes"]["_api_status_0"]["source"], json!({"file": "index.ts", "line": 12}));
    }

    #[test]
    fn entries_without_source_omit_the_field() {
        let value = serde_json::to_value(entry("/", None)).unwrap();
        assert!(value.get("source").is_none());
    }

    #[test]
    fn snapshot_accepts_entries_without_source() {
        let raw = r#"{
            "timestamp": "2025-06-15T10:00:00.000Z",
            "routes": {"route_0": {"path": "/", "method": "GET", "description": "Root", "example": "/"}},
            "totalRoutes": 1
        }"#;
        let snapshot: Snapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(snapshot.routes["route_0"].source, None);
    }
}
