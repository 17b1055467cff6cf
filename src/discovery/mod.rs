//! Runtime API discovery client.
//!
//! Fetches `GET <base>/api/discovery`, keeps the document in memory for a
//! fixed lifetime, and resolves route names to URLs and requests. When a
//! refresh fails and any document was fetched before, the stale copy is
//! served instead of the error.

pub mod error;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::context::ServiceContext;
use crate::ports::clock::Clock;
use crate::ports::http::{HttpClient, HttpMethod, HttpRequest};

pub use error::{DiscoveryError, DiscoveryResult};

/// Path of the discovery endpoint relative to the base URL.
pub const DISCOVERY_PATH: &str = "/api/discovery";

/// A route advertised by the discovery endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRoute {
    /// Request path relative to the base URL.
    pub path: String,
    /// HTTP verb.
    pub method: String,
    /// Human-readable description.
    pub description: String,
    /// Example request path.
    pub example: String,
}

/// Deployment metadata in the discovery document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    /// When the backend was deployed.
    pub timestamp: String,
    /// Deployed version.
    pub version: String,
}

/// The document served by `GET /api/discovery`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryDocument {
    /// Greeting message.
    pub message: String,
    /// Server time of the response.
    pub timestamp: String,
    /// API version.
    pub version: String,
    /// Base URL the backend believes it is served from.
    pub base_url: String,
    /// Routes keyed by name.
    pub routes: BTreeMap<String, ApiRoute>,
    /// Deployment environment name.
    pub environment: String,
    /// Cloud region.
    pub region: String,
    /// Deployment metadata.
    pub deployment: Deployment,
}

/// Options for [`DiscoveryClient::request`].
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Overrides the route's advertised method.
    pub method: Option<HttpMethod>,
    /// JSON body to send.
    pub body: Option<serde_json::Value>,
    /// Query parameters appended to the URL.
    pub params: Vec<(String, String)>,
    /// Extra headers; `Content-Type: application/json` is always sent first.
    pub headers: Vec<(String, String)>,
}

struct CachedDiscovery {
    document: Arc<DiscoveryDocument>,
    fetched_at: DateTime<Utc>,
}

/// Discovery client bound to a [`ServiceContext`].
///
/// Create one per base URL and share it by reference.
pub struct DiscoveryClient<'a> {
    http: &'a dyn HttpClient,
    clock: &'a dyn Clock,
    base_url: String,
    cache_ttl: Duration,
    cache: Mutex<Option<CachedDiscovery>>,
}

impl<'a> DiscoveryClient<'a> {
    /// Creates a client for `base_url` whose cache lives for `cache_ttl`.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, base_url: &str, cache_ttl: Duration) -> Self {
        Self {
            http: ctx.http.as_ref(),
            clock: ctx.clock.as_ref(),
            base_url: base_url.trim_end_matches('/').to_string(),
            cache_ttl,
            cache: Mutex::new(None),
        }
    }

    /// Creates a client from the configured base URL and cache lifetime.
    #[must_use]
    pub fn from_config(ctx: &'a ServiceContext, config: &Config) -> Self {
        Self::new(ctx, &config.api_base_url, config.cache_ttl)
    }

    /// The base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the discovery document, from cache when it is fresh enough.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails and nothing was cached before.
    pub async fn get_discovery(&self) -> DiscoveryResult<Arc<DiscoveryDocument>> {
        let now = self.clock.now();
        if let Some(document) = self.cached(|entry| self.is_fresh(entry, now)) {
            debug!("serving discovery document from cache");
            return Ok(document);
        }

        match self.fetch().await {
            Ok(document) => {
                let document = Arc::new(document);
                *self.cache.lock().expect("discovery cache lock poisoned") =
                    Some(CachedDiscovery { document: Arc::clone(&document), fetched_at: now });
                info!(routes = document.routes.len(), version = %document.version, "discovery document refreshed");
                Ok(document)
            }
            Err(e) => {
                error!(error = %e, "failed to fetch discovery document");
                if let Some(stale) = self.cached(|_| true) {
                    warn!("using expired discovery document");
                    return Ok(stale);
                }
                Err(e)
            }
        }
    }

    /// Looks up a route by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the discovery document cannot be obtained.
    pub async fn get_route(&self, name: &str) -> DiscoveryResult<Option<ApiRoute>> {
        let document = self.get_discovery().await?;
        Ok(document.routes.get(name).cloned())
    }

    /// Builds the absolute URL for a named route, appending `params` as an
    /// urlencoded query string when non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::RouteNotFound`] for unknown names, or any
    /// error from [`get_discovery`](Self::get_discovery).
    pub async fn build_url(&self, name: &str, params: &[(&str, &str)]) -> DiscoveryResult<String> {
        let route = self.resolve(name).await?;
        self.url_for(&route, params)
    }

    /// Sends a request to a named route and decodes the JSON response.
    ///
    /// The route's advertised method is used unless `options.method` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the route is unknown, the request fails or returns
    /// a non-2xx status, or the body does not decode as `T`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        name: &str,
        options: &RequestOptions,
    ) -> DiscoveryResult<T> {
        let route = self.resolve(name).await?;
        let params: Vec<(&str, &str)> =
            options.params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        let url = self.url_for(&route, &params)?;

        let method = options
            .method
            .or_else(|| HttpMethod::parse(&route.method))
            .unwrap_or(HttpMethod::Get);
        let body = options
            .body
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(DiscoveryError::Encode)?;
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        headers.extend(options.headers.iter().cloned());

        debug!(method = method.as_str(), url = %url, "dispatching discovered route");
        let response = self
            .http
            .send(HttpRequest { method, url: url.clone(), headers, body })
            .await
            .map_err(|e| DiscoveryError::Transport { url: url.clone(), message: e.to_string() })?;
        if !response.is_success() {
            return Err(DiscoveryError::Status { url, status: response.status });
        }
        serde_json::from_str(&response.body).map_err(|source| DiscoveryError::Decode { url, source })
    }

    /// Drops the cached document so the next call fetches afresh.
    pub fn clear_cache(&self) {
        *self.cache.lock().expect("discovery cache lock poisoned") = None;
    }

    /// Returns `true` if a discovery document can be obtained (fresh or stale).
    pub async fn is_backend_available(&self) -> bool {
        match self.get_discovery().await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "backend unavailable");
                false
            }
        }
    }

    async fn fetch(&self) -> DiscoveryResult<DiscoveryDocument> {
        let url = format!("{}{DISCOVERY_PATH}", self.base_url);
        let response = self
            .http
            .send(HttpRequest::get(&url))
            .await
            .map_err(|e| DiscoveryError::Transport { url: url.clone(), message: e.to_string() })?;
        if !response.is_success() {
            return Err(DiscoveryError::Status { url, status: response.status });
        }
        serde_json::from_str(&response.body).map_err(|source| DiscoveryError::Decode { url, source })
    }

    async fn resolve(&self, name: &str) -> DiscoveryResult<ApiRoute> {
        self.get_route(name).await?.ok_or_else(|| DiscoveryError::RouteNotFound(name.to_string()))
    }

    fn url_for(&self, route: &ApiRoute, params: &[(&str, &str)]) -> DiscoveryResult<String> {
        let url = format!("{}{}", self.base_url, route.path);
        if params.is_empty() {
            return Ok(url);
        }
        let mut parsed = Url::parse(&url)
            .map_err(|e| DiscoveryError::InvalidUrl { url: url.clone(), message: e.to_string() })?;
        parsed.query_pairs_mut().extend_pairs(params);
        Ok(parsed.to_string())
    }

    fn cached<F>(&self, accept: F) -> Option<Arc<DiscoveryDocument>>
    where
        F: Fn(&CachedDiscovery) -> bool,
    {
        let cache = self.cache.lock().expect("discovery cache lock poisoned");
        cache.as_ref().filter(|entry| accept(entry)).map(|entry| Arc::clone(&entry.document))
    }

    fn is_fresh(&self, entry: &CachedDiscovery, now: DateTime<Utc>) -> bool {
        // A clock that moved backwards counts as age zero.
        (now - entry.fetched_at).to_std().map_or(true, |age| age < self.cache_ttl)
    }
}
