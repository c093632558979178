//! Configuration for the me-api client
//!
//! The base URL is the one required setting; everything else has a default.

use crate::endpoint::EndpointConfig;
use crate::error::{ApiError, ApiResult};
use crate::request::DEFAULT_RETRIES;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Environment variable holding the API base URL
pub const BASE_URL_VAR: &str = "ME_API_BASE_URL";

/// Legacy name of the base URL variable, still honored
pub const LEGACY_BASE_URL_VAR: &str = "VITE_API_BASE_URL";

/// Default number of results requested from the search endpoint
pub const DEFAULT_SEARCH_LIMIT: u32 = 50;

/// Default cap on a server-requested `Retry-After` delay
pub const DEFAULT_MAX_RETRY_AFTER: Duration = Duration::from_secs(60);

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Resolved base URL and API version
    pub endpoint: EndpointConfig,
    /// Request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Retries allowed on `429 Too Many Requests`
    pub max_retries: u32,
    /// Longest delay honored from a `Retry-After` header
    #[serde(with = "duration_secs")]
    pub max_retry_after: Duration,
    /// `limit` parameter sent with search queries
    pub search_limit: u32,
    /// Origin requests are made from; enables CORS enforcement when set
    pub origin: Option<String>,
    /// User agent sent with every request
    pub user_agent: String,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl ClientConfig {
    /// Create configuration for a base URL with defaults for everything else
    pub fn new(base_url: &str, api_version: Option<&str>) -> ApiResult<Self> {
        Ok(Self::with_endpoint(EndpointConfig::resolve(base_url, api_version)?))
    }

    /// Create configuration around an already resolved endpoint
    #[must_use]
    pub fn with_endpoint(endpoint: EndpointConfig) -> Self {
        Self {
            endpoint,
            timeout: Duration::from_secs(30),
            max_retries: DEFAULT_RETRIES,
            max_retry_after: DEFAULT_MAX_RETRY_AFTER,
            search_limit: DEFAULT_SEARCH_LIMIT,
            origin: None,
            user_agent: concat!("me-api-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `ME_API_BASE_URL` or `VITE_API_BASE_URL`: API base URL (required)
    /// - `ME_API_VERSION`: API version segment, e.g. `v1`
    /// - `ME_API_TIMEOUT_SECS`: Request timeout in seconds
    /// - `ME_API_MAX_RETRIES`: Retries on rate limiting
    /// - `ME_API_MAX_RETRY_AFTER_SECS`: Cap on a server-requested retry delay
    /// - `ME_API_SEARCH_LIMIT`: Search result cap
    /// - `ME_API_ORIGIN`: Page origin for CORS enforcement
    pub fn from_env() -> ApiResult<Self> {
        let base_url = env::var(BASE_URL_VAR)
            .or_else(|_| env::var(LEGACY_BASE_URL_VAR))
            .map_err(|_| ApiError::missing_env(BASE_URL_VAR))?;
        let version = env::var("ME_API_VERSION").ok();

        Ok(Self::new(&base_url, version.as_deref())?.with_env_overrides())
    }

    /// Apply the optional `ME_API_*` tuning variables on top of this
    /// configuration. The endpoint is left untouched; unset or unparsable
    /// variables keep the current value.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(timeout) = env_parse::<u64>("ME_API_TIMEOUT_SECS") {
            self.timeout = Duration::from_secs(timeout);
        }
        if let Some(retries) = env_parse("ME_API_MAX_RETRIES") {
            self.max_retries = retries;
        }
        if let Some(secs) = env_parse::<u64>("ME_API_MAX_RETRY_AFTER_SECS") {
            self.max_retry_after = Duration::from_secs(secs);
        }
        if let Some(limit) = env_parse("ME_API_SEARCH_LIMIT") {
            self.search_limit = limit;
        }
        if let Some(origin) = env::var("ME_API_ORIGIN").ok().filter(|o| !o.is_empty()) {
            self.origin = Some(origin);
        }
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set the rate-limit retry budget
    #[must_use]
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Builder-style method to cap the delay taken from `Retry-After`
    #[must_use]
    pub fn with_max_retry_after(mut self, max: Duration) -> Self {
        self.max_retry_after = max;
        self
    }

    /// Builder-style method to set the search result cap
    #[must_use]
    pub fn with_search_limit(mut self, limit: u32) -> Self {
        self.search_limit = limit;
        self
    }

    /// Builder-style method to set the page origin
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Builder-style method to set the user agent
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        if self.search_limit == 0 {
            return Err(ApiError::config("search_limit must be at least 1"));
        }

        if let Some(ref origin) = self.origin {
            let parsed = url::Url::parse(origin)
                .map_err(|e| ApiError::InvalidUrl(format!("origin {origin}: {e}")))?;
            if !parsed.origin().is_tuple() {
                return Err(ApiError::config(format!("origin {origin} is opaque")));
            }
        }

        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(var: &str) -> Option<T> {
    env::var(var).ok().and_then(|s| s.trim().parse().ok())
}
