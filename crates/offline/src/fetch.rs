//! Request/response types and the network seam for the cache worker.

use http::{Method, StatusCode, Uri};

/// A request intercepted by the cache worker.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub method: Method,
    pub uri: Uri,
}

impl FetchRequest {
    pub fn new(method: Method, uri: Uri) -> Self {
        Self { method, uri }
    }

    /// Build a GET request from an absolute or origin-relative URL string.
    pub fn get(url: &str) -> Result<Self, http::uri::InvalidUri> {
        Ok(Self::new(Method::GET, url.parse()?))
    }

    /// The request's `scheme://authority` origin, if the URI is absolute.
    ///
    /// Origin-relative URIs (no scheme/authority) have no origin of their
    /// own and are treated as same-origin by the worker.
    pub fn origin(&self) -> Option<String> {
        match (self.uri.scheme_str(), self.uri.authority()) {
            (Some(scheme), Some(authority)) => Some(format!("{scheme}://{authority}")),
            _ => None,
        }
    }
}

/// A response as seen by the cache worker: status, content type, and body.
///
/// Cloned into the cache on successful GETs, so it must stay cheap to copy.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl FetchResponse {
    /// A 200 response with the given body.
    pub fn ok(content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: Some(content_type.into()),
            body: body.into(),
        }
    }

    /// A response with an arbitrary status and empty body.
    pub fn with_status(status: StatusCode) -> Self {
        Self {
            status,
            content_type: None,
            body: Vec::new(),
        }
    }

    /// The synthesized placeholder returned when neither network nor cache
    /// has the resource.
    pub fn offline_placeholder() -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            content_type: Some("text/plain".to_string()),
            body: b"Offline: resource unavailable".to_vec(),
        }
    }
}

/// Failure to reach the network at all. Distinct from an HTTP error status,
/// which is a successful fetch from the worker's point of view.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("network unreachable: {0}")]
    Network(String),
}

/// The network seam. Production wires this to the browser fetch; tests use
/// a scriptable fake.
#[async_trait::async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, FetchError>;
}
