//! Clock port for timestamps and cache ages.

use chrono::{DateTime, Utc};

/// Provides the current time.
///
/// Manifest generation, snapshot stamping, and discovery cache expiry all read
/// time through this trait so tests can pin or advance it.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}
