use crate::error::{ProviderError, ProviderResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Primary environment variable holding the provider access key
pub const ACCESS_KEY_ENV: &str = "PIXDECK_ACCESS_KEY";

/// Secondary variable, for shells already set up for the provider's own tooling
pub const FALLBACK_ACCESS_KEY_ENV: &str = "UNSPLASH_ACCESS_KEY";

#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProviderConfig {
    /// API root, without trailing slash
    pub base_url: String,

    /// Records requested per page
    pub page_size: u32,

    /// Whole-request timeout
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,

    /// Sent as the `User-Agent` header
    pub user_agent: String,

    /// Client id from the config file; the environment takes precedence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.unsplash.com".to_string(),
            page_size: 12,
            request_timeout: Duration::from_secs(10),
            user_agent: concat!("pixdeck/", env!("CARGO_PKG_VERSION")).to_string(),
            access_key: None,
        }
    }
}

// Keeps the key out of logs
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("page_size", &self.page_size)
            .field("request_timeout", &self.request_timeout)
            .field("user_agent", &self.user_agent)
            .field("access_key", &self.access_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ProviderConfig {
    /// Resolve the access key from the process environment, then the config file.
    pub fn resolve_access_key(&self) -> ProviderResult<String> {
        self.resolve_access_key_with(|name| std::env::var(name).ok())
    }

    /// Same as [`resolve_access_key`](Self::resolve_access_key) with an injectable lookup.
    pub fn resolve_access_key_with<F>(&self, lookup: F) -> ProviderResult<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        [ACCESS_KEY_ENV, FALLBACK_ACCESS_KEY_ENV]
            .iter()
            .filter_map(|name| lookup(*name))
            .chain(self.access_key.clone())
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
            .ok_or(ProviderError::MissingAccessKey)
    }

    pub fn with_access_key(mut self, key: impl Into<String>) -> Self {
        self.access_key = Some(key.into());
        self
    }
}
