//! Route extraction: regex scan of source files for `app.<verb>('<path>')`.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::context::ServiceContext;
use crate::routes::RouteRecord;

/// File extensions treated as route-bearing source.
pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "js", "mjs", "cjs"];

/// Matches `app.get('/x'` / `router.post("/x"` / ``app.put(`/x` ``.
///
/// Each quote style is its own alternative so a literal is matched exactly
/// once and its delimiters must agree. Literals never span lines.
static ROUTE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\b(?:app|router)\.(get|post|put|delete|patch)\s*\(\s*(?:'([^'\n]+)'|"([^"\n]+)"|`([^`\n]+)`)"#,
    )
    .expect("Invalid regex pattern for route declarations")
});

/// Scans every source file below `root` and returns the routes declared there.
///
/// Fails soft: a missing root yields an empty list, and unreadable files are
/// skipped with a warning.
pub fn extract_routes(ctx: &ServiceContext, root: &Path) -> Vec<RouteRecord> {
    if !ctx.fs.exists(root) {
        warn!(root = %root.display(), "source directory not found");
        return Vec::new();
    }

    let files = match ctx.fs.walk_files(root) {
        Ok(files) => files,
        Err(e) => {
            warn!(root = %root.display(), error = %e, "failed to walk source directory");
            return Vec::new();
        }
    };

    let mut routes = Vec::new();
    for file in files.iter().filter(|f| is_source_file(f)) {
        let content = match ctx.fs.read_to_string(file) {
            Ok(content) => content,
            Err(e) => {
                warn!(file = %file.display(), error = %e, "skipping unreadable source file");
                continue;
            }
        };
        let file_name =
            file.file_name().map_or_else(String::new, |n| n.to_string_lossy().into_owned());
        let found = extract_from_source(&content, &file_name);
        debug!(file = %file.display(), routes = found.len(), "scanned");
        routes.extend(found);
    }
    routes
}

/// Extracts route declarations from one file's text.
#[must_use]
pub fn extract_from_source(content: &str, file_name: &str) -> Vec<RouteRecord> {
    ROUTE_PATTERN
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let method = caps.get(1)?.as_str().to_ascii_uppercase();
            let path = caps.get(2).or_else(|| caps.get(3)).or_else(|| caps.get(4))?.as_str();
            Some(RouteRecord {
                method,
                path: path.to_string(),
                source_file: file_name.to_string(),
                source_line: line_of(content, whole.start()),
            })
        })
        .collect()
}

/// Returns `true` if the path has one of [`SOURCE_EXTENSIONS`].
fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// 1-based line number of byte `offset`.
fn line_of(content: &str, offset: usize) -> usize {
    content[..offset].bytes().filter(|&b| b == b'\n').count() + 1
}
