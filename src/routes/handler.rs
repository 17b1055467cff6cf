//! Generated handler route table.
//!
//! Renders the manifest's routes into a standalone TypeScript module that the
//! backend handler imports to answer `GET /api/discovery`. The file is owned
//! entirely by this generator and rewritten in full on every run.

use std::path::PathBuf;

use tracing::info;

use crate::config::Config;
use crate::context::ServiceContext;
use crate::routes::manifest::load_manifest;
use crate::routes::{Manifest, RouteTable};

const ROUTES_PLACEHOLDER: &str = "{{ROUTES}}";

const HANDLER_TEMPLATE: &str = r"// Generated by `routemap update-handler`. Do not edit by hand.

export interface DiscoveryRoute {
  path: string;
  method: string;
  description: string;
  example: string;
}

export const discoveryRoutes: Record<string, DiscoveryRoute> = {{ROUTES}};

export function buildDiscoveryResponse(baseUrl: string) {
  const now = new Date().toISOString();
  return {
    message: 'API Discovery',
    timestamp: now,
    version: '1.0.0',
    baseUrl,
    routes: discoveryRoutes,
    environment: process.env.NODE_ENV || 'development',
    region: process.env.AWS_REGION || 'us-east-1',
    deployment: {
      timestamp: now,
      version: process.env.DEPLOYMENT_VERSION || '1.0.0',
    },
  };
}
";

/// Reads the manifest back and writes the handler route table to
/// `config.handler_path`.
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded or the file cannot be
/// written.
pub fn update_handler(ctx: &ServiceContext, config: &Config) -> Result<PathBuf, String> {
    let manifest = load_manifest(ctx, &config.manifest_path)?;
    let source = render_handler(&manifest)?;
    ctx.fs.write(&config.handler_path, &source).map_err(|e| {
        format!("failed to write handler routes to {}: {e}", config.handler_path.display())
    })?;
    info!(
        path = %config.handler_path.display(),
        routes = manifest.total_routes,
        "handler route table updated"
    );
    Ok(config.handler_path.clone())
}

/// Renders the handler module for `manifest`.
///
/// Source metadata is stripped and the generation timestamp is not embedded,
/// so the same routes always render to the same text.
///
/// # Errors
///
/// Returns an error if the route table cannot be serialized.
pub fn render_handler(manifest: &Manifest) -> Result<String, String> {
    let routes: RouteTable =
        manifest.routes.iter().map(|(k, v)| (k.clone(), v.without_source())).collect();
    let json = serde_json::to_string_pretty(&routes)
        .map_err(|e| format!("failed to serialize handler routes: {e}"))?;
    Ok(HANDLER_TEMPLATE.replace(ROUTES_PLACEHOLDER, &json))
}
