//! Manifest generation: extracted routes → keyed JSON manifest on disk.

use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::config::Config;
use crate::context::ServiceContext;
use crate::routes::describe::describe;
use crate::routes::extractor::extract_routes;
use crate::routes::{Manifest, RouteEntry, RouteRecord, RouteSource, RouteTable};

/// Routes written when a scan finds nothing, as `(path, description)`.
/// All are `GET` and carry no source metadata.
pub const FALLBACK_ROUTES: &[(&str, &str)] = &[
    ("/", "Root API endpoint"),
    ("/api/status", "Backend status"),
    ("/api/health", "System health check"),
    ("/api/discovery", "Discovery of available routes"),
];

/// Runs the extractor over `config.source_root`, builds the manifest, and
/// writes it to `config.manifest_path`, replacing any previous file.
///
/// # Errors
///
/// Returns an error if serialization or the write fails. A missing or empty
/// source root is not an error; it produces the fallback routes.
pub fn generate(ctx: &ServiceContext, config: &Config) -> Result<Manifest, String> {
    info!(root = %config.source_root.display(), "scanning backend sources");
    let records = extract_routes(ctx, &config.source_root);
    if records.is_empty() {
        info!("no routes found, writing fallback routes");
    }

    let manifest = build_manifest(&records, ctx.clock.now());
    write_manifest(ctx, &config.manifest_path, &manifest)?;

    info!(
        total = manifest.total_routes,
        path = %config.manifest_path.display(),
        "manifest written"
    );
    Ok(manifest)
}

/// Builds a manifest from extracted records.
///
/// Keys are the sanitized path plus `_<position>`, so duplicate paths stay
/// distinct. With no records the [`FALLBACK_ROUTES`] are used under keys
/// `route_0`, `route_1`, ...
#[must_use]
pub fn build_manifest(records: &[RouteRecord], generated_at: DateTime<Utc>) -> Manifest {
    let mut routes = RouteTable::new();

    for (index, record) in records.iter().enumerate() {
        let key = format!("{}_{index}", sanitize_key(&record.path));
        routes.insert(
            key,
            RouteEntry {
                path: record.path.clone(),
                method: record.method.clone(),
                description: describe(record),
                example: record.path.clone(),
                source: Some(RouteSource {
                    file: record.source_file.clone(),
                    line: record.source_line,
                }),
            },
        );
    }

    if routes.is_empty() {
        for (index, (path, description)) in FALLBACK_ROUTES.iter().enumerate() {
            routes.insert(
                format!("route_{index}"),
                RouteEntry {
                    path: (*path).to_string(),
                    method: "GET".to_string(),
                    description: (*description).to_string(),
                    example: (*path).to_string(),
                    source: None,
                },
            );
        }
    }

    Manifest { generated_at, total_routes: routes.len(), routes }
}

/// Replaces every character outside `[A-Za-z0-9]` with `_`; `root` if empty.
#[must_use]
pub fn sanitize_key(path: &str) -> String {
    let key: String =
        path.chars().map(|c| if c.is_ascii_alphanumeric() { c } else { '_' }).collect();
    if key.is_empty() {
        "root".to_string()
    } else {
        key
    }
}

/// Writes `manifest` as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_manifest(ctx: &ServiceContext, path: &Path, manifest: &Manifest) -> Result<(), String> {
    let json = serde_json::to_string_pretty(manifest)
        .map_err(|e| format!("failed to serialize manifest: {e}"))?;
    ctx.fs
        .write(path, &json)
        .map_err(|e| format!("failed to write manifest to {}: {e}", path.display()))
}

/// Reads a manifest back from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid manifest.
pub fn load_manifest(ctx: &ServiceContext, path: &Path) -> Result<Manifest, String> {
    let json = ctx
        .fs
        .read_to_string(path)
        .map_err(|e| format!("failed to read manifest at {}: {e}", path.display()))?;
    serde_json::from_str(&json)
        .map_err(|e| format!("failed to parse manifest at {}: {e}", path.display()))
}

/// One line per route for terminal output.
#[must_use]
pub fn format_routes(manifest: &Manifest) -> String {
    manifest
        .routes
        .values()
        .map(|r| format!("  {} {} - {}", r.method, r.path, r.description))
        .collect::<Vec<_>>()
        .join("\n")
}
