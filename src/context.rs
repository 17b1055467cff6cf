//! Service context bundling all port trait objects.

use crate::adapters::memory::{FixedClock, MemoryFileSystem, ScriptedHttpClient, StubGitRepo};
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::git::GitRepo;
use crate::ports::http::HttpClient;

/// Bundles all port trait objects into a single context.
///
/// Built once at process start and passed by reference to the extractor,
/// manifest writer, monitor, and discovery client. Nothing in the crate keeps
/// global state; everything external goes through these fields.
pub struct ServiceContext {
    /// Clock for timestamps and cache expiry.
    pub clock: Box<dyn Clock>,
    /// Filesystem for source scanning and manifest/snapshot I/O.
    pub fs: Box<dyn FileSystem>,
    /// Git working tree for change detection.
    pub git: Box<dyn GitRepo>,
    /// HTTP client for the discovery endpoint.
    pub http: Box<dyn HttpClient>,
}

impl ServiceContext {
    /// Creates a live context with real adapters for every port.
    #[must_use]
    pub fn live() -> Self {
        use crate::adapters::live::clock::LiveClock;
        use crate::adapters::live::filesystem::LiveFileSystem;
        use crate::adapters::live::git::LiveGitRepo;
        use crate::adapters::live::http::LiveHttpClient;

        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            git: Box::new(LiveGitRepo),
            http: Box::new(LiveHttpClient::new()),
        }
    }

    /// Creates a fully in-memory context.
    ///
    /// The clock is pinned at `2025-01-01T00:00:00Z`, the filesystem is empty,
    /// git reports a clean tree, and HTTP has no scripted responses. Callers
    /// replace individual fields with pre-seeded adapters as needed.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            clock: Box::new(FixedClock::at("2025-01-01T00:00:00Z")),
            fs: Box::new(MemoryFileSystem::new()),
            git: Box::new(StubGitRepo::clean()),
            http: Box::new(ScriptedHttpClient::new()),
        }
    }
}
