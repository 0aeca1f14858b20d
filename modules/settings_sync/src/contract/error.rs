//! Contract error types for settings sync

use thiserror::Error;

/// Failures reported by a [`Transport`](crate::domain::transport::Transport)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The server answered 404 for the requested resource
    #[error("resource not found: {url}")]
    NotFound { url: String },

    /// The server answered with another non-success status
    #[error("request to {url} failed with status {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// The request could not be completed (connection, timeout, cancellation)
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    /// The HTTP client could not be set up
    #[error("invalid HTTP client setup: {0}")]
    Client(String),
}

impl TransportError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Settings sync errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Network/HTTP failure, propagated unchanged
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Response payload does not match the expected shape
    #[error("unable to parse {what} ({reason}) from: {payload}")]
    Decode {
        /// What was being decoded
        what: &'static str,
        /// Parser diagnostic
        reason: String,
        /// Raw response payload
        payload: String,
    },

    /// A setting carried no known value shape (or several at once)
    #[error("unknown property value shape for setting '{key}'")]
    UnrecognizedValueShape { key: String },

    /// The project queried for quality profiles does not exist on the server
    #[error("{}", project_not_found_message(.project_key, .organization_key.as_deref()))]
    ProjectNotFound {
        project_key: String,
        organization_key: Option<String>,
    },
}

impl SyncError {
    /// True for payload shape errors
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::Decode { .. } | Self::UnrecognizedValueShape { .. }
        )
    }

    pub(crate) fn decode(what: &'static str, reason: impl ToString, payload: &[u8]) -> Self {
        Self::Decode {
            what,
            reason: reason.to_string(),
            payload: String::from_utf8_lossy(payload).into_owned(),
        }
    }
}

fn project_not_found_message(project_key: &str, organization_key: Option<&str>) -> String {
    match organization_key {
        Some(org) => format!(
            "Project with key '{project_key}' in organization '{org}' not found on the server"
        ),
        None => format!("Project with key '{project_key}' not found on the server"),
    }
}
