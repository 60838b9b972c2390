//! Scripted HTTP server for client tests.
//!
//! An `axum` router runs on its own single-threaded tokio runtime in a
//! background thread, so blocking clients can call it from the test thread.
//! Each request is answered by the first matching route and recorded, so
//! tests can count network transfers.

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use std::net::{SocketAddr, TcpListener};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use tokio::sync::oneshot;

#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl StubResponse {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "application/json".to_string(),
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn bytes(status: u16, body: &[u8]) -> Self {
        Self {
            status,
            content_type: "application/octet-stream".to_string(),
            body: body.to_vec(),
        }
    }

    pub fn empty(status: u16) -> Self {
        Self::bytes(status, &[])
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path plus query string, exactly as sent.
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or_default()
    }

    pub fn query(&self) -> &str {
        self.target.split_once('?').map(|(_, q)| q).unwrap_or_default()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Clone)]
struct Route {
    method: String,
    path: String,
    query_contains: Option<String>,
    response: StubResponse,
}

impl Route {
    fn matches(&self, request: &RecordedRequest) -> bool {
        request.method.eq_ignore_ascii_case(&self.method)
            && request.path() == self.path
            && self
                .query_contains
                .as_deref()
                .is_none_or(|fragment| request.query().contains(fragment))
    }
}

#[derive(Debug, Default)]
pub struct StubServerBuilder {
    routes: Vec<Route>,
}

impl StubServerBuilder {
    pub fn route(mut self, method: &str, path: &str, response: StubResponse) -> Self {
        self.routes.push(Route {
            method: method.to_string(),
            path: path.to_string(),
            query_contains: None,
            response,
        });
        self
    }

    /// Route that only matches when the query string contains `fragment`.
    pub fn route_query(
        mut self,
        method: &str,
        path: &str,
        fragment: &str,
        response: StubResponse,
    ) -> Self {
        self.routes.push(Route {
            method: method.to_string(),
            path: path.to_string(),
            query_contains: Some(fragment.to_string()),
            response,
        });
        self
    }

    pub fn start(self) -> StubServer {
        // Bound before the thread starts, so early requests queue instead of failing.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();
        let addr = listener.local_addr().unwrap();

        let state = StubState {
            routes: Arc::new(self.routes),
            requests: Arc::new(Mutex::new(Vec::new())),
        };
        let requests = Arc::clone(&state.requests);
        let app = Router::new().fallback(respond).with_state(state);
        let (shutdown, stopped) = oneshot::channel::<()>();

        let handle = std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).unwrap();
                let served = axum::serve(listener, app)
                    .with_graceful_shutdown(async {
                        let _ = stopped.await;
                    })
                    .await;
                if let Err(e) = served {
                    tracing::debug!(error = %e, "stub server stopped with error");
                }
            });
        });

        StubServer {
            addr,
            requests,
            shutdown: Some(shutdown),
            handle: Some(handle),
        }
    }
}

#[derive(Clone)]
struct StubState {
    routes: Arc<Vec<Route>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

async fn respond(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = RecordedRequest {
        method: method.to_string(),
        target: uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| uri.path().to_string()),
        headers: headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect(),
        body: body.to_vec(),
    };

    let response = state
        .routes
        .iter()
        .find(|route| route.matches(&request))
        .map(|route| route.response.clone())
        .unwrap_or_else(|| StubResponse::json(404, r#"{"msg":"no stub route"}"#));

    state.requests.lock().unwrap().push(request);

    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [
            (header::CONTENT_TYPE, response.content_type),
            // No keep-alive, so shutdown never waits on pooled client connections.
            (header::CONNECTION, "close".to_string()),
        ],
        response.body,
    )
        .into_response()
}

pub struct StubServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl StubServer {
    pub fn builder() -> StubServerBuilder {
        StubServerBuilder::default()
    }

    /// Base URL without a trailing slash, e.g. `http://127.0.0.1:40123`.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests received for `path`, any method.
    pub fn hits(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path() == path)
            .count()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
