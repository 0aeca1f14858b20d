//! Transport abstraction for talking to the analysis server

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

pub use crate::contract::error::TransportError;

/// Successful response of a single request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// Requested URL (or path, for in-memory transports)
    pub url: String,
    /// Response body
    pub body: Bytes,
}

impl TransportResponse {
    pub fn new(url: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self {
            url: url.into(),
            body: body.into(),
        }
    }

    /// Body as text, for diagnostics
    pub fn content(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Trait for issuing requests against the analysis server
///
/// Implementations perform exactly one request per call and do not retry.
/// A 404 answer must be reported as [`TransportError::NotFound`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET a server-relative path including its query string
    /// (e.g. `/api/settings/values?component=my%3Aproject`)
    async fn get(&self, path: &str) -> Result<TransportResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get(&self, path: &str) -> Result<TransportResponse, TransportError> {
        (**self).get(path).await
    }
}

/// Canned reply of the mock transport
#[derive(Debug, Clone)]
enum MockReply {
    Body(Bytes),
    Error(TransportError),
}

/// In-memory transport replaying canned responses
///
/// Paths must match exactly, query string included. Unknown paths answer
/// [`TransportError::NotFound`].
#[derive(Clone, Default)]
pub struct MockTransport {
    replies: Arc<RwLock<HashMap<String, MockReply>>>,
    requests: Arc<RwLock<Vec<String>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `path` with `body`
    pub fn add_response(&self, path: impl Into<String>, body: impl Into<Bytes>) {
        self.replies
            .write()
            .insert(path.into(), MockReply::Body(body.into()));
    }

    /// Answer `path` with `error`
    pub fn add_error(&self, path: impl Into<String>, error: TransportError) {
        self.replies
            .write()
            .insert(path.into(), MockReply::Error(error));
    }

    /// Paths requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.read().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.read().len()
    }

    pub fn clear(&self) {
        self.replies.write().clear();
        self.requests.write().clear();
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, path: &str) -> Result<TransportResponse, TransportError> {
        self.requests.write().push(path.to_string());

        match self.replies.read().get(path) {
            Some(MockReply::Body(body)) => Ok(TransportResponse::new(path, body.clone())),
            Some(MockReply::Error(error)) => Err(error.clone()),
            None => Err(TransportError::NotFound {
                url: path.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_transport_replays_body() {
        let transport = MockTransport::new();
        transport.add_response("/api/properties?format=json", "[]");

        let response = transport.get("/api/properties?format=json").await.unwrap();
        assert_eq!(response.content(), "[]");
        assert_eq!(transport.requests(), vec!["/api/properties?format=json"]);
    }

    #[tokio::test]
    async fn test_mock_transport_unknown_path_is_not_found() {
        let transport = MockTransport::new();

        let result = transport.get("/api/unknown").await;
        assert!(matches!(result, Err(TransportError::NotFound { .. })));
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_transport_replays_error() {
        let transport = MockTransport::new();
        let error = TransportError::Status {
            url: "/api/settings/values".to_string(),
            status: 500,
            body: "boom".to_string(),
        };
        transport.add_error("/api/settings/values", error.clone());

        assert_eq!(transport.get("/api/settings/values").await, Err(error));
    }

    #[tokio::test]
    async fn test_mock_transport_clear() {
        let transport = MockTransport::new();
        transport.add_response("/a", "x");
        transport.get("/a").await.unwrap();

        transport.clear();
        assert_eq!(transport.request_count(), 0);
        assert!(transport.get("/a").await.is_err());
    }
}
