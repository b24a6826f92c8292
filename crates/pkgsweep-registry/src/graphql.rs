//! Minimal GraphQL-over-HTTP client

use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use pkgsweep_core::Token;

use crate::error::{RegistryError, Result};
use crate::queries::{GraphQlRequest, GraphQlResponse};

/// Accept header for package queries
pub const PACKAGES_PREVIEW: &str = "application/vnd.github.packages-preview+json";

/// Accept header for package deletion
pub const PACKAGE_DELETES_PREVIEW: &str = "application/vnd.github.package-deletes-preview+json";

const USER_AGENT: &str = concat!("pkgsweep/", env!("CARGO_PKG_VERSION"));

pub(crate) const TIMEOUT_SECS: u64 = 30;

/// POSTs GraphQL documents to one endpoint
pub struct GraphQlClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl GraphQlClient {
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| RegistryError::InvalidUrl {
            url: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        let client = reqwest::Client::builder()
            // Never follow redirects with a bearer token attached
            .redirect(reqwest::redirect::Policy::none())
            .timeout(std::time::Duration::from_secs(TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RegistryError::NetworkError {
                message: e.to_string(),
            })?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Run one query or mutation and return its `data`
    ///
    /// A non-empty `errors` array fails the call with the first message,
    /// even if partial data came back.
    pub async fn execute<V, T>(
        &self,
        query: &str,
        variables: V,
        token: &Token,
        accept: &str,
    ) -> Result<T>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Authorization", format!("bearer {}", token.expose()))
            .header("Accept", accept)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(60);

            return Err(RegistryError::RateLimited { retry_after });
        }

        let body = response.text().await?;

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(RegistryError::AuthFailed {
                message: format!("{} from {}", status.as_u16(), self.endpoint),
                remote: error_message(&body),
            });
        }

        if !status.is_success() {
            return Err(RegistryError::HttpError {
                status: status.as_u16(),
                message: format!("Request to {} failed", self.endpoint),
                remote: error_message(&body),
            });
        }

        let parsed: GraphQlResponse<T> = serde_json::from_str(&body)?;

        if let Some(first) = parsed.errors.into_iter().next() {
            return Err(RegistryError::GraphQl {
                message: first.message,
            });
        }

        parsed.data.ok_or_else(|| RegistryError::InvalidResponse {
            message: "response carried neither data nor errors".to_string(),
        })
    }
}

/// Pull a human-readable message out of an error body
///
/// Accepts REST-style `{"message": ...}` and GraphQL-style
/// `{"errors": [{"message": ...}]}`.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .or_else(|| value.get("errors")?.get(0)?.get("message"))
        .and_then(|m| m.as_str())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_rest_shape() {
        assert_eq!(
            error_message(r#"{"message": "Bad credentials", "documentation_url": "x"}"#),
            Some("Bad credentials".to_string())
        );
    }

    #[test]
    fn test_error_message_graphql_shape() {
        assert_eq!(
            error_message(r#"{"errors": [{"message": "Something went wrong"}]}"#),
            Some("Something went wrong".to_string())
        );
    }

    #[test]
    fn test_error_message_unstructured() {
        assert_eq!(error_message("<html>502</html>"), None);
        assert_eq!(error_message(r#"{"status": 500}"#), None);
    }

    #[test]
    fn test_rejects_invalid_endpoint() {
        assert!(matches!(
            GraphQlClient::new("not a url"),
            Err(RegistryError::InvalidUrl { .. })
        ));
    }
}
