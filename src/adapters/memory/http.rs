//! Scripted HTTP client.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::http::{HttpClient, HttpFuture, HttpRequest, HttpResponse};

#[derive(Default)]
struct State {
    responses: VecDeque<Result<HttpResponse, String>>,
    requests: Vec<HttpRequest>,
}

/// HTTP client that answers from a queue and records every request.
///
/// Requests made after the queue is drained fail as transport errors.
#[derive(Clone, Default)]
pub struct ScriptedHttpClient {
    state: Arc<Mutex<State>>,
}

impl ScriptedHttpClient {
    /// Creates a client with an empty response queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response with the given status and body.
    pub fn respond(&self, status: u16, body: impl Into<String>) {
        let mut state = self.state.lock().expect("http lock poisoned");
        state.responses.push_back(Ok(HttpResponse { status, body: body.into() }));
    }

    /// Queues a transport failure.
    pub fn fail(&self, message: &str) {
        let mut state = self.state.lock().expect("http lock poisoned");
        state.responses.push_back(Err(message.to_string()));
    }

    /// All requests sent so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().expect("http lock poisoned").requests.clone()
    }

    /// Number of requests sent so far.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.state.lock().expect("http lock poisoned").requests.len()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn send(&self, request: HttpRequest) -> HttpFuture<'_> {
        let next = {
            let mut state = self.state.lock().expect("http lock poisoned");
            let url = request.url.clone();
            state.requests.push(request);
            state
                .responses
                .pop_front()
                .unwrap_or_else(|| Err(format!("no scripted response for {url}")))
        };
        Box::pin(async move { next.map_err(Into::into) })
    }
}
