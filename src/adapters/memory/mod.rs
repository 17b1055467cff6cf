//! In-memory adapters with inspectable state.
//!
//! Each adapter is `Clone` and shares its state between clones, so a test can
//! hand one copy to a [`ServiceContext`](crate::context::ServiceContext) and
//! keep another to seed inputs or assert on what happened.

pub mod clock;
pub mod filesystem;
pub mod git;
pub mod http;

pub use clock::FixedClock;
pub use filesystem::MemoryFileSystem;
pub use git::StubGitRepo;
pub use http::ScriptedHttpClient;
