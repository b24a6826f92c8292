//! CLI error types with exit code handling
//!
//! Every failure of a run is funnelled into [`CliError`], which knows how to
//! render itself through miette and which exit code to use.

use miette::Diagnostic;
use thiserror::Error;

use pkgsweep_core::SweepError;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// No usable retention policy, or the config file is unreadable
    #[error("{message}")]
    #[diagnostic(code(pkgsweep::cli::configuration))]
    Configuration {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// No credential
    #[error("{message}")]
    #[diagnostic(
        code(pkgsweep::cli::authentication),
        help("Pass --token or set GITHUB_TOKEN")
    )]
    Authentication { message: String },

    /// The package does not exist
    #[error("{message}")]
    #[diagnostic(
        code(pkgsweep::cli::not_found),
        help("Check --owner, --repo and --package-name")
    )]
    NotFound { message: String },

    /// A registry call failed
    #[error("{message}")]
    #[diagnostic(code(pkgsweep::cli::registry))]
    Registry { message: String },

    /// Internal error (runtime, unexpected failure)
    #[error("Internal error: {message}")]
    #[diagnostic(code(pkgsweep::cli::internal))]
    Internal { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Configuration { .. } => exit_codes::CONFIG_ERROR,
            CliError::Authentication { .. } => exit_codes::AUTH_ERROR,
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::Registry { .. } => exit_codes::ERROR,
            CliError::Internal { .. } => exit_codes::ERROR,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            help: None,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<SweepError> for CliError {
    fn from(err: SweepError) -> Self {
        let message = err.to_string();
        match err {
            SweepError::Configuration { .. } => CliError::Configuration {
                message,
                help: Some(
                    "Use --package-version-ids, or --package-name with \
                     --num-old-versions-to-delete or --num-versions-to-keep"
                        .to_string(),
                ),
            },
            SweepError::ConfigRead { .. } | SweepError::ConfigParse { .. } => {
                CliError::configuration(message)
            }
            SweepError::Authentication { .. } => CliError::Authentication { message },
            SweepError::NotFound { .. } => CliError::NotFound { message },
            SweepError::Transport { .. } => CliError::Registry { message },
        }
    }
}

impl From<pkgsweep_registry::RegistryError> for CliError {
    fn from(err: pkgsweep_registry::RegistryError) -> Self {
        match err {
            pkgsweep_registry::RegistryError::InvalidUrl { .. } => {
                CliError::configuration(err.to_string())
            }
            other => CliError::Registry {
                message: other.to_string(),
            },
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_by_kind() {
        let cases = [
            (SweepError::configuration("x"), exit_codes::CONFIG_ERROR),
            (SweepError::authentication("No token found"), exit_codes::AUTH_ERROR),
            (SweepError::not_found("app", "octo", "hello"), exit_codes::NOT_FOUND),
            (SweepError::transport("query for releases", None), exit_codes::ERROR),
        ];
        for (err, code) in cases {
            assert_eq!(CliError::from(err).exit_code(), code);
        }
    }

    #[test]
    fn test_message_is_verbatim() {
        let err = CliError::from(SweepError::transport(
            "query for oldest version",
            Some("Bad credentials".to_string()),
        ));
        assert_eq!(err.to_string(), "query for oldest version failed. Bad credentials");
    }
}
