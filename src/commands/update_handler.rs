//! `routemap update-handler` command.

use crate::config::Config;
use crate::context::ServiceContext;
use crate::routes::handler;

/// Execute the `update-handler` command.
///
/// # Errors
///
/// Returns an error string if the manifest is missing or the handler file
/// cannot be written.
pub fn run(ctx: &ServiceContext, config: &Config) -> Result<(), String> {
    let path = handler::update_handler(ctx, config)?;
    println!("Handler routes written to {}", path.display());
    Ok(())
}
