//! Error types for the API client

use crate::request::Envelope;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Coarse classification of an [`ApiError`], for callers that render or
/// route failures without matching on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Transport failure: DNS, connection refused, timeout
    Network,
    /// Cross-origin response rejected by the same-origin policy
    Cors,
    /// Server answered with a non-2xx status
    HttpStatus,
    /// Server answered 429; retried automatically while budget remains
    RateLimited,
    /// Declared JSON body could not be parsed
    Parse,
    /// Client was misconfigured (missing or invalid base URL, bad arguments)
    Configuration,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Network => "network",
            Self::Cors => "cors",
            Self::HttpStatus => "http-status",
            Self::RateLimited => "rate-limited",
            Self::Parse => "parse",
            Self::Configuration => "configuration",
        };
        f.write_str(name)
    }
}

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response
    #[error("Network error calling {url}: {source}")]
    Network {
        /// URL that was being requested
        url: String,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// The response was blocked by the same-origin policy
    #[error("CORS error: {origin} is not allowed to read {url}")]
    Cors {
        /// URL that was requested
        url: String,
        /// Origin the request was made from
        origin: String,
    },

    /// API returned a non-success status
    #[error("API error ({status}): {message}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Error message extracted from the body or the status reason
        message: String,
        /// Parsed or raw response body
        body: Envelope,
    },

    /// Rate limited by the server
    #[error("Rate limited - retry after {retry_after:?}")]
    RateLimited {
        /// Delay requested by the server's `Retry-After` header
        retry_after: Duration,
        /// Body of the 429 response
        body: Envelope,
    },

    /// Response declared JSON but could not be parsed
    #[error("Failed to parse JSON response: {message}")]
    Parse {
        /// Parser error message
        message: String,
        /// Raw body that failed to parse
        body: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing environment variable
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a missing env var error
    pub fn missing_env(var: impl Into<String>) -> Self {
        Self::MissingEnvVar(var.into())
    }

    /// Create a network error for a failed transport call
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, message: impl Into<String>, body: Envelope) -> Self {
        Self::HttpStatus {
            status,
            message: message.into(),
            body,
        }
    }

    /// Classification of this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network { .. } => ErrorKind::Network,
            Self::Cors { .. } => ErrorKind::Cors,
            Self::HttpStatus { .. } => ErrorKind::HttpStatus,
            Self::RateLimited { .. } => ErrorKind::RateLimited,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::Config(_) | Self::MissingEnvVar(_) | Self::InvalidUrl(_) => {
                ErrorKind::Configuration
            }
        }
    }

    /// HTTP status attached to this error, if any
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::RateLimited { .. } => Some(429),
            _ => None,
        }
    }

    /// Response body attached to this error, if any
    #[must_use]
    pub fn body(&self) -> Option<&Envelope> {
        match self {
            Self::HttpStatus { body, .. } | Self::RateLimited { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Check if this error is retryable.
    ///
    /// Only rate limiting is retried; every other failure is terminal.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Convert an exhausted rate limit into the terminal 429 status error
    #[must_use]
    pub fn into_terminal(self) -> Self {
        match self {
            Self::RateLimited { body, .. } => {
                let message = error_message(&body, Some("Too Many Requests"));
                Self::http_status(429, message, body)
            }
            other => other,
        }
    }

    /// Actionable message for the user, distinct per failure class
    #[must_use]
    pub fn hint(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Network => {
                "Could not reach the API. Check your connection and that the server is running."
            }
            ErrorKind::Cors => {
                "The API refused this origin. Add it to the server's allowed CORS origins."
            }
            ErrorKind::HttpStatus => "The API rejected the request. See the message above.",
            ErrorKind::RateLimited => "Too many requests. Wait a moment and try again.",
            ErrorKind::Parse => "The API returned malformed JSON. The server may be misconfigured.",
            ErrorKind::Configuration => {
                "Set ME_API_BASE_URL (or pass --base-url) to an absolute http(s) URL."
            }
        }
    }
}

/// Pick the most useful message from an error body: the JSON `detail` or
/// `message` string, then the status reason, then a generic fallback.
pub(crate) fn error_message(body: &Envelope, reason: Option<&str>) -> String {
    if let Envelope::Json(value) = body {
        for key in ["detail", "message"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                if !text.is_empty() {
                    return text.to_string();
                }
            }
        }
    }

    reason
        .filter(|r| !r.is_empty())
        .unwrap_or("Request failed")
        .to_string()
}
