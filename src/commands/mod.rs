//! Command dispatch and handlers.

pub mod discover;
pub mod generate;
pub mod monitor;
pub mod update_handler;

use crate::cli::Command;
use crate::config::Config;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler with live adapters and
/// environment configuration.
///
/// # Errors
///
/// Returns an error string if configuration is invalid or the selected
/// command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let ctx = ServiceContext::live();
    let config = Config::from_env()?;
    dispatch_with_context(command, &ctx, config)
}

/// Dispatch a command with the given service context and configuration.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    config: Config,
) -> Result<(), String> {
    match command {
        Command::Generate { source, output, skip_handler } => {
            generate::run(ctx, config, source.as_deref(), output.as_deref(), *skip_handler)
        }
        Command::UpdateHandler => update_handler::run(ctx, &config),
        Command::Monitor { continuous, interval } => {
            monitor::run(ctx, &config, *continuous, *interval)
        }
        Command::Discover { route, base_url } => {
            discover::run(ctx, config, route.as_deref(), base_url.as_deref())
        }
    }
}
