//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_POLL_INTERVAL_MS;

/// Top-level CLI parser for `routemap`.
#[derive(Debug, Parser)]
#[command(
    name = "routemap",
    version,
    about = "Generate, monitor and discover backend API routes"
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan backend sources and write the route manifest.
    Generate {
        /// Directory to scan (overrides `ROUTEMAP_SOURCE_ROOT`).
        #[arg(long)]
        source: Option<PathBuf>,
        /// Manifest output path (overrides `ROUTEMAP_MANIFEST`).
        #[arg(long)]
        output: Option<PathBuf>,
        /// Do not regenerate the handler route table afterwards.
        #[arg(long)]
        skip_handler: bool,
    },
    /// Render the handler route table from the current manifest.
    UpdateHandler,
    /// Detect route changes and report them.
    Monitor {
        /// Keep polling instead of running once.
        #[arg(short, long)]
        continuous: bool,
        /// Polling interval in milliseconds.
        #[arg(long, value_name = "MS", default_value_t = DEFAULT_POLL_INTERVAL_MS)]
        interval: u64,
    },
    /// Query a deployed backend's discovery endpoint.
    Discover {
        /// Print the URL of a single named route.
        #[arg(long)]
        route: Option<String>,
        /// Backend base URL (overrides `ROUTEMAP_API_BASE_URL`).
        #[arg(long)]
        base_url: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, DEFAULT_POLL_INTERVAL_MS};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn parses_generate_with_overrides() {
        let cli = Cli::parse_from([
            "routemap",
            "generate",
            "--source",
            "/srv/backend/src",
            "--output",
            "routes.json",
            "--skip-handler",
        ]);
        match cli.command {
            Command::Generate { source, output, skip_handler } => {
                assert_eq!(source, Some(PathBuf::from("/srv/backend/src")));
                assert_eq!(output, Some(PathBuf::from("routes.json")));
                assert!(skip_handler);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_update_handler_subcommand() {
        let cli = Cli::parse_from(["routemap", "update-handler"]);
        assert!(matches!(cli.command, Command::UpdateHandler));
    }

    #[test]
    fn monitor_defaults_to_single_run() {
        let cli = Cli::parse_from(["routemap", "monitor"]);
        assert!(matches!(
            cli.command,
            Command::Monitor { continuous: false, interval: DEFAULT_POLL_INTERVAL_MS }
        ));
    }

    #[test]
    fn monitor_accepts_short_flag_and_interval() {
        let cli = Cli::parse_from(["routemap", "monitor", "-c", "--interval=5000"]);
        assert!(matches!(cli.command, Command::Monitor { continuous: true, interval: 5000 }));
    }

    #[test]
    fn parses_discover_route() {
        let cli = Cli::parse_from(["routemap", "discover", "--route", "users"]);
        match cli.command {
            Command::Discover { route, base_url } => {
                assert_eq!(route.as_deref(), Some("users"));
                assert!(base_url.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
