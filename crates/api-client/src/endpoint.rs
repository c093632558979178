//! Endpoint resolution
//!
//! Turns the externally supplied base URL (and optional API version) into the
//! canonical prefix every request URL is built from.

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use url::Url;

/// Canonical base URL plus optional API version segment.
///
/// Created once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    base_url: String,
    api_version: Option<String>,
}

impl EndpointConfig {
    /// Resolve a raw base URL into an endpoint configuration.
    ///
    /// The URL must be a non-empty absolute `http`/`https` URL. A single
    /// trailing slash is stripped, so `https://host/` and `https://host`
    /// resolve identically. An empty or blank version is treated as absent.
    pub fn resolve(raw_base_url: &str, version: Option<&str>) -> ApiResult<Self> {
        let trimmed = raw_base_url.trim();
        if trimmed.is_empty() {
            return Err(ApiError::config("base URL cannot be empty"));
        }

        let parsed = Url::parse(trimmed)
            .map_err(|e| ApiError::InvalidUrl(format!("{trimmed}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::config(format!(
                "base URL must start with http:// or https://, got {trimmed}"
            )));
        }

        let base_url = trimmed.strip_suffix('/').unwrap_or(trimmed).to_string();
        let api_version = version
            .map(|v| v.trim().trim_matches('/'))
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        Ok(Self {
            base_url,
            api_version,
        })
    }

    /// Base URL without trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// API version segment, if any
    #[must_use]
    pub fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }

    /// Prefix all request paths are joined to: `{base}` or `{base}/api/{version}`
    #[must_use]
    pub fn prefix(&self) -> String {
        match &self.api_version {
            Some(version) => format!("{}/api/{version}", self.base_url),
            None => self.base_url.clone(),
        }
    }
}
