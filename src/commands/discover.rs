//! `routemap discover` command.

use tokio::runtime::Builder;

use crate::config::Config;
use crate::context::ServiceContext;
use crate::discovery::DiscoveryClient;

/// Execute the `discover` command.
///
/// Without `route`, lists every route the backend advertises. With `route`,
/// prints that route's absolute URL.
///
/// # Errors
///
/// Returns an error string if the runtime cannot start, the discovery
/// document cannot be fetched, or the route is unknown.
pub fn run(
    ctx: &ServiceContext,
    mut config: Config,
    route: Option<&str>,
    base_url: Option<&str>,
) -> Result<(), String> {
    if let Some(base_url) = base_url {
        config.api_base_url = base_url.trim_end_matches('/').to_string();
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start async runtime: {e}"))?;
    runtime.block_on(discover(ctx, &config, route))
}

async fn discover(ctx: &ServiceContext, config: &Config, route: Option<&str>) -> Result<(), String> {
    let client = DiscoveryClient::from_config(ctx, config);

    if let Some(name) = route {
        let url = client.build_url(name, &[]).await.map_err(|e| e.to_string())?;
        println!("{url}");
        return Ok(());
    }

    let document = client.get_discovery().await.map_err(|e| e.to_string())?;
    println!(
        "{} v{} ({}, {}) at {}",
        document.message,
        document.version,
        document.environment,
        document.region,
        client.base_url()
    );
    for (name, route) in &document.routes {
        println!("  {name}: {} {} - {}", route.method, route.path, route.description);
    }
    Ok(())
}
