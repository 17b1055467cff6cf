//! Port traits defining external boundaries.
//!
//! Each trait is a seam between the route pipeline and something outside the
//! process (wall clock, disk, git, HTTP). Implementations live in
//! `src/adapters/`; tests substitute in-memory fakes.

pub mod clock;
pub mod filesystem;
pub mod git;
pub mod http;

pub use clock::Clock;
pub use filesystem::FileSystem;
pub use git::GitRepo;
pub use http::{HttpClient, HttpFuture, HttpMethod, HttpRequest, HttpResponse};

/// Error type returned by every port method.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;
