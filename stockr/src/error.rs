//! Provider error handling

use reqwest::StatusCode;
use thiserror::Error;

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Failures at the provider boundary
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Provider returned {status} for {endpoint}")]
    Status { status: StatusCode, endpoint: String },

    #[error("Failed to decode provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid provider URL: {0}")]
    InvalidUrl(String),

    #[error("No provider access key configured (set PIXDECK_ACCESS_KEY)")]
    MissingAccessKey,
}

impl ProviderError {
    /// Whether re-issuing the same request could plausibly succeed
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::Transport(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            ProviderError::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            ProviderError::Decode(_)
            | ProviderError::InvalidUrl(_)
            | ProviderError::MissingAccessKey => false,
        }
    }

    pub(crate) fn status(status: StatusCode, endpoint: impl Into<String>) -> Self {
        Self::Status {
            status,
            endpoint: endpoint.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_transient() {
        assert!(ProviderError::status(StatusCode::BAD_GATEWAY, "/photos").is_transient());
        assert!(ProviderError::status(StatusCode::TOO_MANY_REQUESTS, "/photos").is_transient());
        assert!(!ProviderError::status(StatusCode::UNAUTHORIZED, "/photos").is_transient());
        assert!(!ProviderError::MissingAccessKey.is_transient());
    }

    #[test]
    fn status_error_names_endpoint() {
        let err = ProviderError::status(StatusCode::NOT_FOUND, "/search/photos");
        assert_eq!(
            err.to_string(),
            "Provider returned 404 Not Found for /search/photos"
        );
    }
}
