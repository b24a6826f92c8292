//! Error types for registry calls

use pkgsweep_core::SweepError;
use thiserror::Error;

use crate::graphql::TIMEOUT_SECS;

/// Transport-level failures
#[derive(Debug, Error)]
pub enum RegistryError {
    // ============ Network Errors ============
    #[error("HTTP error: {status} - {message}")]
    HttpError {
        status: u16,
        message: String,
        /// `message` field of a JSON error body, if there was one
        remote: Option<String>,
    },

    #[error("Network error: {message}")]
    NetworkError { message: String },

    #[error("Request timeout after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Rate limited by server. Retry after {retry_after} seconds")]
    RateLimited { retry_after: u64 },

    // ============ Authentication Errors ============
    #[error("Authentication failed: {message}")]
    AuthFailed {
        message: String,
        remote: Option<String>,
    },

    // ============ GraphQL Errors ============
    #[error("GraphQL error: {message}")]
    GraphQl { message: String },

    #[error("Mutation rejected: {message}")]
    Rejected { message: String },

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("Invalid API URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Result type for registry calls
pub type Result<T> = std::result::Result<T, RegistryError>;

impl RegistryError {
    /// Structured detail supplied by the remote side, if any
    pub fn remote_detail(&self) -> Option<&str> {
        match self {
            RegistryError::GraphQl { message } => Some(message.as_str()),
            RegistryError::HttpError { remote, .. } | RegistryError::AuthFailed { remote, .. } => {
                remote.as_deref()
            }
            _ => None,
        }
    }

    /// Wrap as the core's transport error for `operation`
    pub fn into_transport(self, operation: &str) -> SweepError {
        tracing::debug!(operation, error = %self, "Registry call failed");
        let detail = self.remote_detail().map(String::from);
        SweepError::transport(operation, detail)
    }
}

impl From<reqwest::Error> for RegistryError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RegistryError::Timeout {
                seconds: TIMEOUT_SECS,
            }
        } else if e.is_connect() {
            RegistryError::NetworkError {
                message: format!("Connection failed: {}", e),
            }
        } else if let Some(status) = e.status() {
            RegistryError::HttpError {
                status: status.as_u16(),
                message: e.to_string(),
                remote: None,
            }
        } else if e.is_decode() {
            RegistryError::InvalidResponse {
                message: e.to_string(),
            }
        } else {
            RegistryError::NetworkError {
                message: e.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(e: serde_json::Error) -> Self {
        RegistryError::InvalidResponse {
            message: e.to_string(),
        }
    }
}
