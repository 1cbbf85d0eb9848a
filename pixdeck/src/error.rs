//! src/error.rs
//! ============================================================================
//! # `AppError`: Unified Error Type for pixdeck
//!
//! Runtime failures surfaced to the user as toasts. Provider failures arrive
//! as `stockr::ProviderError` and are wrapped rather than flattened so callers
//! can still inspect them. Startup failures go through `anyhow` in `main.rs`.

use stockr::ProviderError;
use thiserror::Error;

/// Unified error type for pixdeck runtime operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Image provider failure.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The system opener could not launch a URL.
    #[error("Could not open {url}: {reason}")]
    Opener { url: String, reason: String },

    /// The share target rejected the payload.
    #[error("Share failed: {0}")]
    Share(String),
}

impl AppError {
    /// Create an opener failure error
    pub fn opener<S1: Into<String>, S2: Into<String>>(url: S1, reason: S2) -> Self {
        Self::Opener {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Short text suitable for a toast
    pub fn user_message(&self) -> String {
        match self {
            Self::Provider(e) if e.is_transient() => {
                "The image service is unavailable. Please try again.".to_string()
            }
            Self::Provider(_) => "Failed to load images. Please try again.".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permanent_provider_failure_uses_generic_message() {
        let err = AppError::from(ProviderError::MissingAccessKey);
        assert!(matches!(err, AppError::Provider(ProviderError::MissingAccessKey)));
        assert_eq!(
            err.user_message(),
            "Failed to load images. Please try again."
        );
    }

    #[test]
    fn integration_failures_name_the_cause() {
        let err = AppError::opener("https://example.com/a", "no handler");
        assert_eq!(err.user_message(), "Could not open https://example.com/a: no handler");
        assert_eq!(
            AppError::Share("no clipboard".into()).user_message(),
            "Share failed: no clipboard"
        );
    }
}
