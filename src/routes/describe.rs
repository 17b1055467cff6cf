//! Human-readable route descriptions.

use crate::routes::RouteRecord;

/// Description returned for `/` and for paths with no segments.
pub const ROOT_DESCRIPTION: &str = "Root API endpoint";

/// Descriptions for well-known paths, matched exactly.
const KNOWN_PATHS: &[(&str, &str)] = &[
    ("/", ROOT_DESCRIPTION),
    ("/api/status", "Backend status"),
    ("/api/health", "System health check"),
    ("/api/discovery", "Discovery of available routes"),
    ("/api/users", "User management"),
    ("/api/auth", "Authentication"),
    ("/api/properties", "Property management"),
    ("/api/upload", "File upload"),
];

const RESOURCE_NAMES: &[(&str, &str)] = &[
    ("users", "users"),
    ("properties", "properties"),
    ("auth", "authentication"),
    ("upload", "files"),
    ("status", "status"),
    ("health", "health"),
    ("discovery", "discovery"),
];

const ACTION_NAMES: &[(&str, &str)] = &[
    ("list", "List"),
    ("get", "Get"),
    ("create", "Create"),
    ("update", "Update"),
    ("delete", "Delete"),
    ("upload", "Upload"),
];

const API_PREFIX: &str = "api";
const DEFAULT_ACTION: &str = "list";

/// Describes a route for the manifest.
///
/// Known paths get their fixed description; `/api/<resource>[/<action>]`
/// paths are composed as `"<Action> <resource>"`; anything else becomes
/// `"<method> <path>"` with a lowercase method.
#[must_use]
pub fn describe(route: &RouteRecord) -> String {
    if let Some(known) = lookup(KNOWN_PATHS, &route.path) {
        return known.to_string();
    }

    let segments: Vec<&str> = route.path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return ROOT_DESCRIPTION.to_string();
    }

    if segments[0] == API_PREFIX {
        if let Some(&resource) = segments.get(1) {
            let action = segments.get(2).copied().unwrap_or(DEFAULT_ACTION);
            let resource_name = lookup(RESOURCE_NAMES, resource).unwrap_or(resource);
            let action_name = lookup(ACTION_NAMES, action).unwrap_or(action);
            return format!("{action_name} {resource_name}");
        }
    }

    format!("{} {}", route.method.to_lowercase(), route.path)
}

fn lookup<'a>(table: &'a [(&str, &'a str)], key: &str) -> Option<&'a str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(method: &str, path: &str) -> RouteRecord {
        RouteRecord {
            method: method.to_string(),
            path: path.to_string(),
            source_file: "index.ts".to_string(),
            source_line: 1,
        }
    }

    #[test]
    fn known_paths_use_fixed_descriptions() {
        assert_eq!(describe(&record("GET", "/")), "Root API endpoint");
        assert_eq!(describe(&record("GET", "/api/health")), "System health check");
        assert_eq!(describe(&record("POST", "/api/users")), "User management");
    }

    #[test]
    fn api_paths_compose_action_and_resource() {
        assert_eq!(describe(&record("POST", "/api/users/create")), "Create users");
        assert_eq!(describe(&record("POST", "/api/upload/upload")), "Upload files");
        assert_eq!(describe(&record("GET", "/api/auth/get")), "Get authentication");
    }

    #[test]
    fn missing_action_defaults_to_list() {
        assert_eq!(describe(&record("GET", "/api/listings")), "List listings");
    }

    #[test]
    fn unknown_segments_pass_through() {
        assert_eq!(describe(&record("GET", "/api/users/:id")), ":id users");
        assert_eq!(describe(&record("GET", "/api/matches/swipe")), "swipe matches");
    }

    #[test]
    fn non_api_paths_fall_back_to_method_and_path() {
        assert_eq!(describe(&record("DELETE", "/admin/cache")), "delete /admin/cache");
        assert_eq!(describe(&record("GET", "/api")), "get /api");
    }

    #[test]
    fn slash_only_paths_are_root() {
        assert_eq!(describe(&record("GET", "//")), ROOT_DESCRIPTION);
    }

    #[test]
    fn is_deterministic() {
        let r = record("PUT", "/api/properties/update");
        assert_eq!(describe(&r), describe(&r));
        assert_eq!(describe(&r), "Update properties");
    }
}
