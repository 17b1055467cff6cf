//! Route change monitor.
//!
//! Each run walks detect → regenerate → compare → report. Runs share nothing
//! but the manifest and snapshot files, so a run can be repeated on a timer
//! or invoked once from CI.

pub mod diff;

use std::thread;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::context::ServiceContext;
use crate::routes::handler;
use crate::routes::manifest::{self, load_manifest};
use crate::routes::Snapshot;

pub use diff::{diff_routes, format_changes, ChangeRecord, Comparison};

/// Outcome of a single monitor run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorReport {
    /// Whether the manifest was regenerated during this run.
    pub regenerated: bool,
    /// Result of comparing the manifest against the previous snapshot.
    pub comparison: Comparison,
}

/// Watches the source tree and reports manifest changes.
pub struct RouteMonitor<'a> {
    ctx: &'a ServiceContext,
    config: &'a Config,
}

impl<'a> RouteMonitor<'a> {
    /// Creates a monitor over the given context and configuration.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, config: &'a Config) -> Self {
        Self { ctx, config }
    }

    /// Decides whether the source tree changed since the last run.
    ///
    /// Always `false` when the source root is missing. Otherwise `true` before the first snapshot exists and whenever git
    /// cannot answer, and `true` iff `git status` lists anything under the
    /// source root.
    #[must_use]
    pub fn detect_changes(&self) -> bool {
        if !self.ctx.fs.exists(&self.config.source_root) {
            warn!(
                root = %self.config.source_root.display(),
                "source directory not found, skipping change detection"
            );
            return false;
        }

        if !self.ctx.fs.exists(&self.config.snapshot_path) {
            debug!("no snapshot yet, treating as changed");
            return true;
        }

        match self.ctx.git.status_porcelain(&self.config.source_root) {
            Ok(status) => !status.trim().is_empty(),
            Err(e) => {
                warn!(
                    root = %self.config.source_root.display(),
                    error = %e,
                    "could not query git status, assuming changes"
                );
                true
            }
        }
    }

    /// Regenerates the manifest and the handler route table if
    /// [`detect_changes`](Self::detect_changes) says so. Returns whether both
    /// were written.
    #[must_use]
    pub fn regenerate_if_needed(&self) -> bool {
        if !self.detect_changes() {
            return false;
        }

        info!("backend changes detected, regenerating routes");
        let result = manifest::generate(self.ctx, self.config)
            .and_then(|_| handler::update_handler(self.ctx, self.config));
        match result {
            Ok(_) => true,
            Err(e) => {
                error!(error = %e, "route regeneration failed");
                false
            }
        }
    }

    /// Compares the manifest on disk with the last snapshot and replaces the
    /// snapshot with the current manifest.
    ///
    /// A missing manifest reports no changes and leaves the snapshot alone. A
    /// missing or unreadable snapshot is a first run: it is seeded and no
    /// changes are reported.
    pub fn compare(&self) -> Comparison {
        let current = match load_manifest(self.ctx, &self.config.manifest_path) {
            Ok(manifest) => manifest,
            Err(e) => {
                error!(error = %e, "could not load current routes");
                return Comparison::unchanged();
            }
        };

        let now = self.ctx.clock.now();
        let Some(previous) = self.load_snapshot() else {
            info!("first route check, recording snapshot");
            self.save_snapshot(&Snapshot::of(&current, now));
            return Comparison::unchanged();
        };

        let changes = diff_routes(&previous.routes, &current.routes);
        self.save_snapshot(&Snapshot::of(&current, now));
        Comparison::from_changes(changes)
    }

    /// Runs detect, regenerate, compare, and report once.
    pub fn run_once(&self) -> MonitorReport {
        info!("checking routes");
        let regenerated = self.regenerate_if_needed();
        let comparison = self.compare();
        self.report(&comparison, regenerated);
        MonitorReport { regenerated, comparison }
    }

    /// Runs [`run_once`](Self::run_once) forever, sleeping `interval` after
    /// each run finishes.
    pub fn run_continuous(&self, interval: Duration) -> ! {
        info!(interval_ms = interval.as_millis(), "starting continuous route monitoring");
        loop {
            let _ = self.run_once();
            thread::sleep(interval);
        }
    }

    fn report(&self, comparison: &Comparison, regenerated: bool) {
        if !comparison.has_changes {
            info!("no route changes detected");
            return;
        }

        info!(
            total = comparison.changes.len(),
            added = comparison.added(),
            removed = comparison.removed(),
            modified = comparison.modified(),
            "route changes detected"
        );
        for change in &comparison.changes {
            match change {
                ChangeRecord::Added { route, .. } => {
                    info!(method = %route.method, path = %route.path, "route added");
                }
                ChangeRecord::Removed { route, .. } => {
                    info!(method = %route.method, path = %route.path, "route removed");
                }
                ChangeRecord::Modified { new, .. } => {
                    info!(method = %new.method, path = %new.path, "route modified");
                }
            }
        }

        if regenerated {
            info!(command = %self.config.deploy_command, "routes regenerated; deploy to publish them");
        }
    }

    fn load_snapshot(&self) -> Option<Snapshot> {
        let path = &self.config.snapshot_path;
        let json = self.ctx.fs.read_to_string(path).ok()?;
        match serde_json::from_str(&json) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable snapshot");
                None
            }
        }
    }

    fn save_snapshot(&self, snapshot: &Snapshot) {
        let path = &self.config.snapshot_path;
        let result = serde_json::to_string_pretty(snapshot)
            .map_err(|e| e.to_string())
            .and_then(|json| self.ctx.fs.write(path, &json).map_err(|e| e.to_string()));
        if let Err(e) = result {
            error!(path = %path.display(), error = %e, "failed to save route snapshot");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{FixedClock, MemoryFileSystem, StubGitRepo};
    use crate::routes::manifest::{build_manifest, write_manifest};
    use crate::routes::{Manifest, RouteEntry, RouteTable};
    use chrono::Duration as ChronoDuration;
    use std::path::{Path, PathBuf};

    const SOURCE: &str = "/backend/src/index.ts";
    const HANDLER: &str = "/backend/generated/discovery-routes.ts";

    fn config() -> Config {
        Config {
            source_root: PathBuf::from("/backend/src"),
            manifest_path: PathBuf::from("/devops/generated-routes.json"),
            snapshot_path: PathBuf::from("/devops/.last-routes-check"),
            handler_path: PathBuf::from(HANDLER),
            ..Config::default()
        }
    }

    struct Harness {
        ctx: ServiceContext,
        fs: MemoryFileSystem,
        git: StubGitRepo,
        clock: FixedClock,
        config: Config,
    }

    impl Harness {
        fn new(git: StubGitRepo) -> Self {
            let fs = MemoryFileSystem::new();
            let clock = FixedClock::at("2025-06-15T10:00:00Z");
            let mut ctx = ServiceContext::in_memory();
            ctx.fs = Box::new(fs.clone());
            ctx.git = Box::new(git.clone());
            ctx.clock = Box::new(clock.clone());
            Self { ctx, fs, git, clock, config: config() }
        }

        fn monitor(&self) -> RouteMonitor<'_> {
            RouteMonitor::new(&self.ctx, &self.config)
        }

        fn write_manifest(&self, routes: &[(&str, RouteEntry)]) {
            let routes: RouteTable =
                routes.iter().map(|(k, v)| ((*k).to_string(), v.clone())).collect();
            let manifest =
                Manifest { generated_at: self.ctx.clock.now(), total_routes: routes.len(), routes };
            write_manifest(&self.ctx, &self.config.manifest_path, &manifest).unwrap();
        }

        fn snapshot(&self) -> Snapshot {
            let json = self.fs.get(&self.config.snapshot_path).unwrap();
            serde_json::from_str(&json).unwrap()
        }
    }

    fn entry(path: &str, description: &str) -> RouteEntry {
        RouteEntry {
            path: path.to_string(),
            method: "GET".to_string(),
            description: description.to_string(),
            example: path.to_string(),
            source: None,
        }
    }

    #[test]
    fn detect_is_true_without_snapshot() {
        let h = Harness::new(StubGitRepo::clean());
        h.fs.insert(SOURCE, "");
        assert!(h.monitor().detect_changes());
    }

    #[test]
    fn detect_is_false_without_source_root() {
        let h = Harness::new(StubGitRepo::failing("not a git repository"));
        assert!(!h.monitor().detect_changes());
    }

    #[test]
    fn detect_follows_git_status_once_snapshot_exists() {
        let h = Harness::new(StubGitRepo::clean());
        h.fs.insert(SOURCE, "");
        h.fs.insert("/devops/.last-routes-check", "{}");
        assert!(!h.monitor().detect_changes());

        h.git.set_status(" M backend/src/index.ts\n");
        assert!(h.monitor().detect_changes());
    }

    #[test]
    fn detect_assumes_changes_when_git_fails() {
        let h = Harness::new(StubGitRepo::failing("not a git repository"));
        h.fs.insert(SOURCE, "");
        h.fs.insert("/devops/.last-routes-check", "{}");
        assert!(h.monitor().detect_changes());
    }

    #[test]
    fn first_compare_seeds_snapshot_without_changes() {
        let h = Harness::new(StubGitRepo::clean());
        h.write_manifest(&[("a", entry("/a", "A"))]);

        let comparison = h.monitor().compare();

        assert!(!comparison.has_changes);
        let snapshot = h.snapshot();
        assert_eq!(snapshot.total_routes, 1);
        assert!(snapshot.routes.contains_key("a"));
    }

    #[test]
    fn missing_manifest_reports_nothing_and_keeps_snapshot_absent() {
        let h = Harness::new(StubGitRepo::clean());

        let comparison = h.monitor().compare();

        assert!(!comparison.has_changes);
        assert!(h.fs.get(&h.config.snapshot_path).is_none());
    }

    #[test]
    fn reports_single_added_route() {
        let h = Harness::new(StubGitRepo::clean());
        h.write_manifest(&[("a", entry("/a", "A"))]);
        let _ = h.monitor().compare();

        h.write_manifest(&[("a", entry("/a", "A")), ("b", entry("/b", "B"))]);
        let comparison = h.monitor().compare();

        assert!(comparison.has_changes);
        assert_eq!((comparison.added(), comparison.removed(), comparison.modified()), (1, 0, 0));
        assert_eq!(comparison.changes[0].key(), "b");
    }

    #[test]
    fn reports_single_modified_route() {
        let h = Harness::new(StubGitRepo::clean());
        h.write_manifest(&[("a", entry("/a", "A"))]);
        let _ = h.monitor().compare();

        h.write_manifest(&[("a", entry("/a", "A v2"))]);
        let comparison = h.monitor().compare();

        assert_eq!(comparison.changes.len(), 1);
        assert!(matches!(
            &comparison.changes[0],
            ChangeRecord::Modified { key, old, new }
                if key == "a" && old.description == "A" && new.description == "A v2"
        ));
    }

    #[test]
    fn second_compare_without_changes_is_clean_and_restamps_snapshot() {
        let h = Harness::new(StubGitRepo::clean());
        h.write_manifest(&[("a", entry("/a", "A"))]);
        let _ = h.monitor().compare();
        h.write_manifest(&[("a", entry("/a", "A")), ("b", entry("/b", "B"))]);
        assert!(h.monitor().compare().has_changes);

        h.clock.advance(ChronoDuration::minutes(1));
        let comparison = h.monitor().compare();

        assert!(!comparison.has_changes);
        assert_eq!(h.snapshot().timestamp.to_rfc3339(), "2025-06-15T10:01:00+00:00");
    }

    #[test]
    fn corrupt_snapshot_is_treated_as_first_run() {
        let h = Harness::new(StubGitRepo::clean());
        h.write_manifest(&[("a", entry("/a", "A"))]);
        h.fs.insert("/devops/.last-routes-check", "not json");

        let comparison = h.monitor().compare();

        assert!(!comparison.has_changes);
        assert!(h.snapshot().routes.contains_key("a"));
    }

    #[test]
    fn run_once_regenerates_on_first_run() {
        let h = Harness::new(StubGitRepo::clean());
        h.fs.insert(SOURCE, "app.get('/api/status', s);\n");

        let report = h.monitor().run_once();

        assert!(report.regenerated);
        assert!(!report.comparison.has_changes);
        assert!(h.fs.get(Path::new("/devops/generated-routes.json")).is_some());
        assert!(h.snapshot().routes.contains_key("_api_status_0"));
    }

    #[test]
    fn run_once_picks_up_new_route_after_source_change() {
        let h = Harness::new(StubGitRepo::clean());
        h.fs.insert(SOURCE, "app.get('/api/status', s);\n");
        let _ = h.monitor().run_once();

        h.fs.insert(SOURCE, "app.get('/api/status', s);\napp.post('/api/users', c);\n");
        h.git.set_status(" M backend/src/index.ts\n");
        let report = h.monitor().run_once();

        assert!(report.regenerated);
        assert_eq!(report.comparison.added(), 1);
        assert!(matches!(
            &report.comparison.changes[0],
            ChangeRecord::Added { route, .. } if route.path == "/api/users" && route.method == "POST"
        ));
    }

    #[test]
    fn run_once_skips_regeneration_on_clean_tree() {
        let h = Harness::new(StubGitRepo::clean());
        let manifest = build_manifest(&[], h.ctx.clock.now());
        write_manifest(&h.ctx, &h.config.manifest_path, &manifest).unwrap();
        let _ = h.monitor().compare();
        let writes_before = h.fs.write_count();

        let report = h.monitor().run_once();

        assert!(!report.regenerated);
        assert!(!report.comparison.has_changes);
        // Only the snapshot is rewritten.
        assert_eq!(h.fs.write_count(), writes_before + 1);
    }

    #[test]
    fn run_once_keeps_manifest_when_sources_disappear() {
        let h = Harness::new(StubGitRepo::clean());
        h.fs.insert(SOURCE, "app.get('/api/status', s);\napp.get('/api/health', h);\n");
        let _ = h.monitor().run_once();
        let manifest_before = h.fs.get(&h.config.manifest_path).unwrap();

        h.fs.remove(Path::new(SOURCE));
        h.git.fail("cannot change to '/backend/src'");
        let report = h.monitor().run_once();

        assert!(!report.regenerated);
        assert!(!report.comparison.has_changes);
        assert_eq!(h.fs.get(&h.config.manifest_path).unwrap(), manifest_before);
    }

    #[test]
    fn run_once_refreshes_handler_with_new_route() {
        let h = Harness::new(StubGitRepo::clean());
        h.fs.insert(SOURCE, "app.get('/api/status', s);\n");
        let _ = h.monitor().run_once();
        assert!(!h.fs.get(Path::new(HANDLER)).unwrap().contains("/api/users"));

        h.fs.insert(SOURCE, "app.get('/api/status', s);\napp.post('/api/users', c);\n");
        h.git.set_status(" M backend/src/index.ts\n");
        let report = h.monitor().run_once();

        assert!(report.regenerated);
        let handler = h.fs.get(Path::new(HANDLER)).unwrap();
        assert!(handler.contains("\"path\": \"/api/users\""));
    }

    #[test]
    fn failed_regeneration_still_compares_manifest_on_disk() {
        let h = Harness::new(StubGitRepo::dirty(" M backend/src/index.ts\n"));
        h.fs.insert(SOURCE, "app.get('/api/status', s);\n");
        h.write_manifest(&[("a", entry("/a", "A"))]);
        let _ = h.monitor().compare();
        h.write_manifest(&[("a", entry("/a", "A")), ("b", entry("/b", "B"))]);
        h.fs.fail_writes_to("/devops/generated-routes.json");

        let report = h.monitor().run_once();

        assert!(!report.regenerated);
        assert_eq!(report.comparison.added(), 1);
        assert_eq!(report.comparison.changes[0].key(), "b");
        assert!(h.snapshot().routes.contains_key("b"));
    }

    #[test]
    fn handler_write_failure_counts_as_failed_regeneration() {
        let h = Harness::new(StubGitRepo::clean());
        h.fs.insert(SOURCE, "app.get('/api/status', s);\n");
        h.fs.fail_writes_to(HANDLER);

        let report = h.monitor().run_once();

        assert!(!report.regenerated);
        assert!(h.fs.get(&h.config.manifest_path).is_some());
    }
}
