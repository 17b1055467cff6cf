//! Three-way diffing of route tables.

use serde::Serialize;

use crate::routes::{RouteEntry, RouteTable};

/// A single difference between two route tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChangeRecord {
    /// Key present now but not before.
    Added {
        /// Manifest key.
        key: String,
        /// The new entry.
        route: RouteEntry,
    },
    /// Key present before but not now.
    Removed {
        /// Manifest key.
        key: String,
        /// The entry as it was.
        route: RouteEntry,
    },
    /// Key present in both with a different entry.
    Modified {
        /// Manifest key.
        key: String,
        /// Entry before.
        old: RouteEntry,
        /// Entry now.
        new: RouteEntry,
    },
}

impl ChangeRecord {
    /// The manifest key this change is about.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Added { key, .. } | Self::Removed { key, .. } | Self::Modified { key, .. } => key,
        }
    }
}

/// Outcome of comparing the manifest against the last snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    /// `true` iff `changes` is non-empty.
    pub has_changes: bool,
    /// Every detected change: additions, then removals, then modifications.
    pub changes: Vec<ChangeRecord>,
}

impl Comparison {
    /// A comparison that found nothing.
    #[must_use]
    pub fn unchanged() -> Self {
        Self::default()
    }

    /// Wraps a change list.
    #[must_use]
    pub fn from_changes(changes: Vec<ChangeRecord>) -> Self {
        Self { has_changes: !changes.is_empty(), changes }
    }

    /// Number of additions.
    #[must_use]
    pub fn added(&self) -> usize {
        self.changes.iter().filter(|c| matches!(c, ChangeRecord::Added { .. })).count()
    }

    /// Number of removals.
    #[must_use]
    pub fn removed(&self) -> usize {
        self.changes.iter().filter(|c| matches!(c, ChangeRecord::Removed { .. })).count()
    }

    /// Number of modifications.
    #[must_use]
    pub fn modified(&self) -> usize {
        self.changes.iter().filter(|c| matches!(c, ChangeRecord::Modified { .. })).count()
    }
}

/// Compute the changes from `old` to `new`.
///
/// Entries are compared whole; any field difference makes a modification.
#[must_use]
pub fn diff_routes(old: &RouteTable, new: &RouteTable) -> Vec<ChangeRecord> {
    let added = new
        .iter()
        .filter(|(key, _)| !old.contains_key(*key))
        .map(|(key, route)| ChangeRecord::Added { key: key.clone(), route: route.clone() });

    let removed = old
        .iter()
        .filter(|(key, _)| !new.contains_key(*key))
        .map(|(key, route)| ChangeRecord::Removed { key: key.clone(), route: route.clone() });

    let modified = new.iter().filter_map(|(key, route)| {
        let before = old.get(key)?;
        (before != route).then(|| ChangeRecord::Modified {
            key: key.clone(),
            old: before.clone(),
            new: route.clone(),
        })
    });

    added.chain(removed).chain(modified).collect()
}

/// Format changes for human-readable display.
#[must_use]
pub fn format_changes(changes: &[ChangeRecord]) -> String {
    if changes.is_empty() {
        return "No route changes detected.".to_string();
    }

    changes
        .iter()
        .map(|change| match change {
            ChangeRecord::Added { route, .. } => format!("  + {} {}", route.method, route.path),
            ChangeRecord::Removed { route, .. } => format!("  - {} {}", route.method, route.path),
            ChangeRecord::Modified { new, .. } => format!("  ~ {} {}", new.method, new.path),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
