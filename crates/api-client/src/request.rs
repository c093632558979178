//! Request descriptors and response envelopes

use crate::query::{QueryParams, QueryValue};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

/// Default number of retries on `429 Too Many Requests`
pub const DEFAULT_RETRIES: u32 = 2;

/// Description of a single logical request.
///
/// Owned by one call; retries re-issue the same descriptor with a smaller
/// retry budget.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// Path relative to the endpoint prefix
    pub path: String,
    /// Query parameters
    pub query: QueryParams,
    /// Remaining retries on rate limiting; `None` uses the client default
    pub retries: Option<u32>,
    /// HTTP method
    pub method: Method,
    /// Headers merged over the client defaults
    pub headers: HeaderMap,
    /// JSON body for non-GET verbs
    pub body: Option<Value>,
}

impl ApiRequest {
    /// A `GET` request for `path`
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// A request with an explicit method
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: QueryParams::new(),
            retries: None,
            method,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Add a query parameter
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.insert(key, value);
        self
    }

    /// Replace all query parameters
    #[must_use]
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Override the retry budget for this request
    #[must_use]
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = Some(retries);
        self
    }

    /// Add a header; it overrides any default of the same name
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Attach a JSON body
    pub fn with_json<B: Serialize>(mut self, body: &B) -> serde_json::Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// Body of a response, tagged by its declared content type.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Envelope {
    /// `204 No Content`
    #[default]
    Empty,
    /// Parsed JSON body
    Json(Value),
    /// Raw body of a non-JSON response
    Text(String),
}

impl Envelope {
    /// Parsed JSON, if this is a JSON envelope
    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Collapse into a JSON value: text becomes a string, empty becomes null
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Empty => Value::Null,
            Self::Json(value) => value,
            Self::Text(text) => Value::String(text),
        }
    }
}

/// Whether a `Content-Type` header value declares JSON
pub(crate) fn is_json_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || mime.ends_with("+json")
}
