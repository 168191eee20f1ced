//! HTTP front end for the aggregator.
//!
//! Serves a single JSON endpoint plus a health check:
//!
//! - `POST /api/latency` with `{"regions": [...], "threshold_ms": 150.0}`
//!   returns a JSON array of per-region results in request order
//! - `OPTIONS /api/latency` answers CORS preflight requests
//! - `GET /health` (or `/healthz`) returns `OK`
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use regionstat::{Aggregator, ApiServer, DatasetStore, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let aggregator = Aggregator::new(Arc::new(DatasetStore::empty()));
//!     let config = ServerConfig::builder()
//!         .listen_addr("127.0.0.1:8000")
//!         .api_path("/api/latency")
//!         .build();
//!
//!     let server = ApiServer::new(config, aggregator).unwrap();
//!     server.start().await.unwrap();
//! }
//! ```

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::{BodyExt, Full, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{self, HeaderValue};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use regionstat_types::LatencyRequest;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::error::{RequestError, ServerError};
use crate::stats::Aggregator;

const ALLOW_METHODS: &str = "GET, POST, OPTIONS";

/// Cross-origin policy applied to every response.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    /// Value of `Access-Control-Allow-Origin`.
    pub allow_origin: String,
    /// Whether to send `Access-Control-Allow-Credentials: true`.
    pub allow_credentials: bool,
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self {
            allow_origin: "*".to_string(),
            allow_credentials: true,
        }
    }
}

/// Configuration for the HTTP endpoint.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8000")
    pub listen_addr: String,
    /// Path for the statistics endpoint (e.g., "/api/latency")
    pub api_path: String,
    /// Largest request body accepted, in bytes.
    pub max_body_bytes: usize,
    /// CORS headers to attach.
    pub cors: CorsPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            api_path: "/api/latency".to_string(),
            max_body_bytes: 1024 * 1024,
            cors: CorsPolicy::default(),
        }
    }
}

impl ServerConfig {
    /// Create a new builder for ServerConfig.
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }
}

/// Builder for ServerConfig.
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    listen_addr: Option<String>,
    api_path: Option<String>,
    max_body_bytes: Option<usize>,
    cors: Option<CorsPolicy>,
}

impl ServerConfigBuilder {
    /// Set the listen address.
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.listen_addr = Some(addr.into());
        self
    }

    /// Set the statistics endpoint path.
    pub fn api_path(mut self, path: impl Into<String>) -> Self {
        self.api_path = Some(path.into());
        self
    }

    /// Set the request body limit.
    pub fn max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = Some(limit);
        self
    }

    /// Set the CORS policy.
    pub fn cors(mut self, cors: CorsPolicy) -> Self {
        self.cors = Some(cors);
        self
    }

    /// Build the ServerConfig.
    pub fn build(self) -> ServerConfig {
        let defaults = ServerConfig::default();
        ServerConfig {
            listen_addr: self.listen_addr.unwrap_or(defaults.listen_addr),
            api_path: self.api_path.unwrap_or(defaults.api_path),
            max_body_bytes: self.max_body_bytes.unwrap_or(defaults.max_body_bytes),
            cors: self.cors.unwrap_or(defaults.cors),
        }
    }
}

/// Shared per-connection state.
#[derive(Debug)]
struct ServiceState {
    aggregator: Aggregator,
    api_path: String,
    max_body_bytes: usize,
    allow_origin: HeaderValue,
    allow_credentials: bool,
}

/// HTTP server exposing the aggregator.
#[derive(Debug, Clone)]
pub struct ApiServer {
    listen_addr: String,
    state: Arc<ServiceState>,
}

impl ApiServer {
    /// Create a new server. Fails if the CORS origin is not a valid header value.
    pub fn new(config: ServerConfig, aggregator: Aggregator) -> Result<Self, ServerError> {
        let allow_origin = HeaderValue::from_str(&config.cors.allow_origin)
            .map_err(|_| ServerError::Cors(config.cors.allow_origin.clone()))?;

        Ok(Self {
            listen_addr: config.listen_addr,
            state: Arc::new(ServiceState {
                aggregator,
                api_path: config.api_path,
                max_body_bytes: config.max_body_bytes,
                allow_origin,
                allow_credentials: config.cors.allow_credentials,
            }),
        })
    }

    /// Bind the configured listen address.
    pub async fn bind(&self) -> Result<TcpListener, ServerError> {
        let addr: SocketAddr = self.listen_addr.parse().map_err(|source| ServerError::Addr {
            addr: self.listen_addr.clone(),
            source,
        })?;
        TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: self.listen_addr.clone(),
                source,
            })
    }

    /// Bind and serve until the runtime shuts down or accepting fails.
    pub async fn start(&self) -> Result<(), ServerError> {
        let listener = self.bind().await?;
        self.serve(listener).await
    }

    /// Serve connections from an already bound listener.
    ///
    /// Each connection is handled on its own task; a failing connection is
    /// logged and does not stop the accept loop.
    pub async fn serve(&self, listener: TcpListener) -> Result<(), ServerError> {
        if let Ok(addr) = listener.local_addr() {
            info!(%addr, path = %self.state.api_path, "Listening");
        }

        loop {
            let (stream, peer) = listener.accept().await?;
            let io = TokioIo::new(stream);
            let state = self.state.clone();

            tokio::spawn(async move {
                let service = service_fn(move |req: Request<hyper::body::Incoming>| {
                    let state = state.clone();
                    async move { handle_request(req, &state).await }
                });

                if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                    warn!(%peer, error = %e, "Connection error");
                }
            });
        }
    }

    /// Spawn the server as a background task.
    pub fn spawn(self, listener: TcpListener) -> tokio::task::JoinHandle<Result<(), ServerError>> {
        tokio::spawn(async move { self.serve(listener).await })
    }
}

async fn handle_request<B>(
    req: Request<B>,
    state: &ServiceState,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let cors = CorsRequest::from_request(&req);

    let mut response = if path == state.api_path {
        match method {
            Method::POST => handle_latency(req, state).await,
            Method::OPTIONS => empty(StatusCode::NO_CONTENT),
            _ => {
                let mut response = text(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
                response
                    .headers_mut()
                    .insert(header::ALLOW, HeaderValue::from_static("POST, OPTIONS"));
                response
            }
        }
    } else if path == "/health" || path == "/healthz" {
        text(StatusCode::OK, "OK")
    } else {
        text(StatusCode::NOT_FOUND, "Not Found")
    };

    apply_cors(&mut response, state, &cors);
    Ok(response)
}

async fn handle_latency<B>(req: Request<B>, state: &ServiceState) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    let request = match decode_request(req, state.max_body_bytes).await {
        Ok(request) => request,
        Err(e) => {
            debug!(error = %e, "Rejected request");
            let status = match e {
                RequestError::Body(_) => StatusCode::BAD_REQUEST,
                RequestError::Json(_) => StatusCode::UNPROCESSABLE_ENTITY,
            };
            let body = serde_json::json!({ "error": e.to_string() });
            return json(status, body.to_string());
        }
    };

    debug!(
        regions = request.regions.len(),
        threshold_ms = request.threshold_ms,
        "Computing region statistics"
    );

    let results = state.aggregator.compute_request(&request);
    match serde_json::to_string(&results) {
        Ok(body) => json(StatusCode::OK, body),
        Err(e) => {
            warn!(error = %e, "Failed to serialize results");
            text(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}

async fn decode_request<B>(req: Request<B>, limit: usize) -> Result<LatencyRequest, RequestError>
where
    B: Body,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    let bytes = Limited::new(req.into_body(), limit)
        .collect()
        .await
        .map_err(|e| RequestError::Body(e.to_string()))?
        .to_bytes();
    Ok(serde_json::from_slice(&bytes)?)
}

/// CORS-relevant parts of an incoming request.
#[derive(Debug, Default)]
struct CorsRequest {
    origin: Option<HeaderValue>,
    request_headers: Option<HeaderValue>,
    has_cookie: bool,
    preflight: bool,
}

impl CorsRequest {
    fn from_request<B>(req: &Request<B>) -> Self {
        let headers = req.headers();
        Self {
            origin: headers.get(header::ORIGIN).cloned(),
            request_headers: headers.get(header::ACCESS_CONTROL_REQUEST_HEADERS).cloned(),
            has_cookie: headers.contains_key(header::COOKIE),
            preflight: *req.method() == Method::OPTIONS,
        }
    }
}

/// Attach CORS headers.
///
/// A wildcard origin cannot be combined with credentials, so when both are
/// configured the request's own `Origin` is echoed (with `Vary: Origin`) on
/// preflight requests and on requests carrying cookies.
fn apply_cors(response: &mut Response<Full<Bytes>>, state: &ServiceState, cors: &CorsRequest) {
    let wildcard = state.allow_origin.as_bytes() == b"*";
    let echo = wildcard && state.allow_credentials && (cors.preflight || cors.has_cookie);

    let headers = response.headers_mut();
    match (&cors.origin, echo) {
        (Some(origin), true) => {
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
            headers.insert(header::VARY, HeaderValue::from_static("Origin"));
        }
        _ => {
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                state.allow_origin.clone(),
            );
            if !wildcard {
                headers.insert(header::VARY, HeaderValue::from_static("Origin"));
            }
        }
    }
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    let allow_headers = match (&cors.request_headers, cors.preflight) {
        (Some(requested), true) => requested.clone(),
        _ => HeaderValue::from_static("*"),
    };
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, allow_headers);
    if state.allow_credentials {
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        );
    }
}

fn empty(status: StatusCode) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = status;
    response
}

fn text(status: StatusCode, body: &'static str) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from_static(body.as_bytes())));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    response
}

fn json(status: StatusCode, body: String) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(body)));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}
