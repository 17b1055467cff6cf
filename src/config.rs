//! Runtime configuration.
//!
//! Values come from `ROUTEMAP_*` environment variables (a `.env` file is
//! loaded by the binary before this runs) and fall back to defaults that match
//! the layout of a `devops/` directory sitting next to `backend/`. CLI flags
//! are applied on top by the command handlers.

use std::path::PathBuf;
use std::time::Duration;

/// Default directory scanned for route declarations.
pub const DEFAULT_SOURCE_ROOT: &str = "../backend/src";
/// Default manifest output path.
pub const DEFAULT_MANIFEST_PATH: &str = "./generated-routes.json";
/// Default snapshot path used by the monitor.
pub const DEFAULT_SNAPSHOT_PATH: &str = "./.last-routes-check";
/// Default path of the generated handler route table.
pub const DEFAULT_HANDLER_PATH: &str = "./generated/discovery-routes.ts";
/// Default discovery base URL.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
/// Default command suggested after routes were regenerated.
pub const DEFAULT_DEPLOY_COMMAND: &str = "./deploy-backend.sh";
/// Default discovery cache lifetime.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);
/// Default monitor polling interval in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 30_000;

/// Resolved settings shared by every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory tree scanned for route declarations.
    pub source_root: PathBuf,
    /// Where the manifest JSON is written.
    pub manifest_path: PathBuf,
    /// Where the monitor keeps its last-known snapshot.
    pub snapshot_path: PathBuf,
    /// Where the generated handler route table is written.
    pub handler_path: PathBuf,
    /// Base URL of the deployed backend serving `/api/discovery`.
    pub api_base_url: String,
    /// Command suggested after a regeneration produced changes.
    pub deploy_command: String,
    /// How long a fetched discovery document is served from cache.
    pub cache_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from(DEFAULT_SOURCE_ROOT),
            manifest_path: PathBuf::from(DEFAULT_MANIFEST_PATH),
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            handler_path: PathBuf::from(DEFAULT_HANDLER_PATH),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            deploy_command: DEFAULT_DEPLOY_COMMAND.to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `ROUTEMAP_CACHE_TTL_SECS` is set but not a
    /// non-negative integer.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if `ROUTEMAP_CACHE_TTL_SECS` is not a non-negative integer.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(v) = get("ROUTEMAP_SOURCE_ROOT") {
            config.source_root = PathBuf::from(v);
        }
        if let Some(v) = get("ROUTEMAP_MANIFEST") {
            config.manifest_path = PathBuf::from(v);
        }
        if let Some(v) = get("ROUTEMAP_SNAPSHOT") {
            config.snapshot_path = PathBuf::from(v);
        }
        if let Some(v) = get("ROUTEMAP_HANDLER_OUT") {
            config.handler_path = PathBuf::from(v);
        }
        if let Some(v) = get("ROUTEMAP_API_BASE_URL") {
            config.api_base_url = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = get("ROUTEMAP_DEPLOY_COMMAND") {
            config.deploy_command = v;
        }
        if let Some(v) = get("ROUTEMAP_CACHE_TTL_SECS") {
            let secs: u64 = v
                .trim()
                .parse()
                .map_err(|e| format!("invalid ROUTEMAP_CACHE_TTL_SECS '{v}': {e}"))?;
            config.cache_ttl = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("ROUTEMAP_SOURCE_ROOT", "/srv/backend/src"),
            ("ROUTEMAP_API_BASE_URL", "https://api.example.com/dev/"),
            ("ROUTEMAP_CACHE_TTL_SECS", "60"),
        ]))
        .unwrap();

        assert_eq!(config.source_root, PathBuf::from("/srv/backend/src"));
        assert_eq!(config.api_base_url, "https://api.example.com/dev");
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.manifest_path, PathBuf::from(DEFAULT_MANIFEST_PATH));
    }

    #[test]
    fn empty_values_are_ignored() {
        let config = Config::from_lookup(lookup_from(&[("ROUTEMAP_MANIFEST", "  ")])).unwrap();
        assert_eq!(config.manifest_path, PathBuf::from(DEFAULT_MANIFEST_PATH));
    }

    #[test]
    fn rejects_non_numeric_ttl() {
        let err = Config::from_lookup(lookup_from(&[("ROUTEMAP_CACHE_TTL_SECS", "soon")]))
            .unwrap_err();
        assert!(err.contains("ROUTEMAP_CACHE_TTL_SECS"));
    }
}
