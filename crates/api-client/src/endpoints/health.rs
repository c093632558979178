//! Health check endpoint

use crate::client::MeApiClient;
use crate::error::ApiError;
use crate::request::Envelope;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

/// Health check API interface
#[derive(Clone)]
pub struct HealthApi {
    client: MeApiClient,
}

impl HealthApi {
    /// Create a new health API interface
    pub(crate) fn new(client: MeApiClient) -> Self {
        Self { client }
    }

    /// Check API health
    ///
    /// GET /health
    ///
    /// Never fails: request errors are reported as [`HealthStatus::Error`].
    pub async fn check(&self) -> HealthStatus {
        match self.client.get("health").await {
            Ok(envelope) => HealthStatus::from_envelope(envelope, Utc::now()),
            Err(e) => {
                warn!(kind = %e.kind(), error = %e, "Health check failed");
                HealthStatus::from_error(&e, Utc::now())
            }
        }
    }
}

/// Outcome of a health check
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum HealthStatus {
    /// The API answered successfully
    Ok {
        /// Reported API version, `"unknown"` if the server sent none
        version: String,
        /// When the check completed
        timestamp: DateTime<Utc>,
        /// Any other fields the server reported
        #[serde(flatten)]
        details: Map<String, Value>,
    },
    /// The API could not be reached or answered with an error
    Error {
        /// Error message
        error: String,
        /// HTTP status, when the server answered
        #[serde(rename = "statusCode")]
        status_code: Option<u16>,
        /// When the check completed
        timestamp: DateTime<Utc>,
    },
}

impl HealthStatus {
    fn from_envelope(envelope: Envelope, timestamp: DateTime<Utc>) -> Self {
        let mut details = match envelope.into_value() {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        let version = match details.remove("version") {
            Some(Value::String(v)) if !v.is_empty() => v,
            Some(Value::Number(n)) => n.to_string(),
            _ => "unknown".to_string(),
        };
        details.remove("status");
        details.remove("timestamp");

        Self::Ok {
            version,
            timestamp,
            details,
        }
    }

    fn from_error(error: &ApiError, timestamp: DateTime<Utc>) -> Self {
        let error_message = match error {
            ApiError::HttpStatus { message, .. } => message.clone(),
            other => other.to_string(),
        };

        Self::Error {
            error: error_message,
            status_code: error.status(),
            timestamp,
        }
    }

    /// Whether the API reported healthy
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    /// When the check completed
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Ok { timestamp, .. } | Self::Error { timestamp, .. } => *timestamp,
        }
    }
}
