//! `routemap generate` command.

use std::path::Path;

use crate::config::Config;
use crate::context::ServiceContext;
use crate::routes::handler;
use crate::routes::manifest::{self, format_routes};

/// Execute the `generate` command.
///
/// Flags override the configured source root and manifest path. Unless
/// `skip_handler` is set, the handler route table is re-rendered from the
/// freshly written manifest.
///
/// # Errors
///
/// Returns an error string if the manifest or handler file cannot be written.
pub fn run(
    ctx: &ServiceContext,
    mut config: Config,
    source: Option<&Path>,
    output: Option<&Path>,
    skip_handler: bool,
) -> Result<(), String> {
    if let Some(source) = source {
        config.source_root = source.to_path_buf();
    }
    if let Some(output) = output {
        config.manifest_path = output.to_path_buf();
    }

    let generated = manifest::generate(ctx, &config)?;
    println!("Generated {} routes:", generated.total_routes);
    println!("{}", format_routes(&generated));
    println!("Manifest written to {}", config.manifest_path.display());

    if !skip_handler {
        let path = handler::update_handler(ctx, &config)?;
        println!("Handler routes written to {}", path.display());
    }
    Ok(())
}
