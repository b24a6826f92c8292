//! Error types for a sweep run

use thiserror::Error;

/// Hint appended to a transport failure when the registry gave no detail
pub const GENERIC_TRANSPORT_HINT: &str = "verify input parameters are correct";

/// Errors that halt a sweep
#[derive(Debug, Error)]
pub enum SweepError {
    // ============ Input Errors ============
    #[error("{message}")]
    Configuration { message: String },

    #[error("{message}")]
    Authentication { message: String },

    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {message}")]
    ConfigParse { path: String, message: String },

    // ============ Registry Errors ============
    #[error("package: {package} not found for owner: {owner} in repo: {repo}")]
    NotFound {
        package: String,
        owner: String,
        repo: String,
    },

    /// A remote call failed; `detail` is whatever structured message the
    /// registry returned, if any
    #[error("{operation} failed. {}", .detail.as_deref().unwrap_or(GENERIC_TRANSPORT_HINT))]
    Transport {
        operation: String,
        detail: Option<String>,
    },
}

impl SweepError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn not_found(package: &str, owner: &str, repo: &str) -> Self {
        Self::NotFound {
            package: package.to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
        }
    }

    pub fn transport(operation: impl Into<String>, detail: Option<String>) -> Self {
        Self::Transport {
            operation: operation.into(),
            detail,
        }
    }
}

/// Result type for sweep operations
pub type Result<T> = std::result::Result<T, SweepError>;
