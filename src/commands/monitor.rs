//! `routemap monitor` command.

use std::time::Duration;

use crate::config::Config;
use crate::context::ServiceContext;
use crate::monitor::{format_changes, RouteMonitor};

/// Execute the `monitor` command.
///
/// A single run prints the comparison and returns; `continuous` never
/// returns and polls every `interval_ms` milliseconds.
///
/// # Errors
///
/// Returns an error string if `interval_ms` is zero in continuous mode.
pub fn run(
    ctx: &ServiceContext,
    config: &Config,
    continuous: bool,
    interval_ms: u64,
) -> Result<(), String> {
    let monitor = RouteMonitor::new(ctx, config);

    if continuous {
        if interval_ms == 0 {
            return Err("--interval must be greater than zero".to_string());
        }
        println!("Watching {} every {interval_ms}ms", config.source_root.display());
        monitor.run_continuous(Duration::from_millis(interval_ms));
    }

    let report = monitor.run_once();
    if report.regenerated {
        println!("Manifest regenerated at {}", config.manifest_path.display());
    }
    println!("{}", format_changes(&report.comparison.changes));
    Ok(())
}
