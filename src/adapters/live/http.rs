//! Live adapter for the `HttpClient` port using `reqwest`.

use reqwest::{Client, Method};

use crate::ports::http::{HttpClient, HttpFuture, HttpMethod, HttpRequest, HttpResponse};
use crate::ports::PortError;

/// Live HTTP client backed by a shared `reqwest::Client`.
pub struct LiveHttpClient {
    client: Client,
}

impl LiveHttpClient {
    /// Creates a new live HTTP client.
    #[must_use]
    pub fn new() -> Self {
        Self { client: Client::new() }
    }
}

impl Default for LiveHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

fn to_reqwest(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

impl HttpClient for LiveHttpClient {
    fn send(&self, request: HttpRequest) -> HttpFuture<'_> {
        Box::pin(async move {
            let mut builder = self.client.request(to_reqwest(request.method), &request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await.map_err(|e| -> PortError {
                format!("{} {} failed: {e}", request.method.as_str(), request.url).into()
            })?;

            let status = response.status().as_u16();
            let body = response.text().await.map_err(|e| -> PortError {
                format!("failed to read response body from {}: {e}", request.url).into()
            })?;

            Ok(HttpResponse { status, body })
        })
    }
}
