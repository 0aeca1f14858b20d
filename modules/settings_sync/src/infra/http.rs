//! `reqwest`-based transport

use crate::config::Config;
use crate::domain::transport::{Transport, TransportError, TransportResponse};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};
use url::Url;

/// Transport issuing plain GET requests against the configured server
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
}

impl ReqwestTransport {
    /// Build a transport from the module configuration
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Self::with_client(client, &config.server_url)
    }

    /// Build a transport around an existing client
    pub fn with_client(client: Client, server_url: &str) -> Result<Self, TransportError> {
        // A trailing slash keeps any context path of the server URL
        let normalized = format!("{}/", server_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)
            .map_err(|e| TransportError::Client(format!("invalid server URL '{server_url}': {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resolve(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| TransportError::Client(format!("invalid request path '{path}': {e}")))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, path: &str) -> Result<TransportResponse, TransportError> {
        let url = self.resolve(path)?;
        debug!(%url, "GET");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| TransportError::Request {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(TransportError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%url, status = status.as_u16(), "request failed");
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await.map_err(|e| TransportError::Request {
            url: url.to_string(),
            message: format!("failed to read response body: {e}"),
        })?;

        Ok(TransportResponse {
            url: url.to_string(),
            body,
        })
    }
}
