//! Main API client implementation

use crate::config::ClientConfig;
use crate::cors;
use crate::endpoints::{HealthApi, ProfileApi, ProjectsApi, SearchApi};
use crate::error::{error_message, ApiError, ApiResult};
use crate::query::{build_url, QueryParams};
use crate::request::{is_json_content_type, ApiRequest, Envelope};
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, CACHE_CONTROL, CONTENT_TYPE, EXPIRES, ORIGIN, PRAGMA,
    RETRY_AFTER, USER_AGENT,
};
use reqwest::{Client, Response, StatusCode};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn, Span};
use url::Url;
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// Delay used when a 429 carries no usable `Retry-After`
const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(1);

/// me-api client
///
/// Wraps `reqwest` and adds:
/// - Versioned, normalized URL construction
/// - Cache-busting default headers
/// - Retry on `429 Too Many Requests`, honoring `Retry-After`
/// - Content-type aware body parsing
/// - Classified errors (network, CORS, status, parse)
///
/// Cloning is cheap; clones share the configuration and connection pool.
/// Calls hold no shared mutable state and may run concurrently.
#[derive(Clone)]
pub struct MeApiClient {
    inner: Client,
    config: Arc<ClientConfig>,
}

impl MeApiClient {
    /// Create a new client with configuration from environment
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let inner = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Prefix every request URL is built from
    #[must_use]
    pub fn base_url(&self) -> String {
        self.config.endpoint.prefix()
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access the profile endpoint
    #[must_use]
    pub fn profile(&self) -> ProfileApi {
        ProfileApi::new(self.clone())
    }

    /// Access the projects endpoints
    #[must_use]
    pub fn projects(&self) -> ProjectsApi {
        ProjectsApi::new(self.clone())
    }

    /// Access the search endpoint
    #[must_use]
    pub fn search(&self) -> SearchApi {
        SearchApi::new(self.clone())
    }

    /// Access the health check endpoint
    #[must_use]
    pub fn health(&self) -> HealthApi {
        HealthApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Low-level HTTP
    // -------------------------------------------------------------------------

    /// Perform a GET request
    pub async fn get(&self, path: &str) -> ApiResult<Envelope> {
        self.request(ApiRequest::get(path)).await
    }

    /// Perform a GET request with query parameters
    pub async fn get_with(&self, path: &str, query: QueryParams) -> ApiResult<Envelope> {
        self.request(ApiRequest::get(path).with_query(query)).await
    }

    /// Build the absolute URL a request would be sent to
    pub fn url_for(&self, path: &str, query: &QueryParams) -> ApiResult<Url> {
        build_url(&self.config.endpoint, path, query)
    }

    /// Execute a request, retrying while the server answers 429 and the
    /// retry budget lasts. Every other failure is returned immediately.
    #[instrument(
        skip(self, request),
        fields(method = %request.method, path = %request.path, request_id)
    )]
    pub async fn request(&self, request: ApiRequest) -> ApiResult<Envelope> {
        let request_id = Uuid::new_v4().to_string();
        Span::current().record("request_id", request_id.as_str());

        let mut remaining = request.retries.unwrap_or(self.config.max_retries);
        let start = Instant::now();

        loop {
            match self.execute_once(&request_id, &request).await {
                Ok(envelope) => {
                    debug!(
                        request_id = %request_id,
                        elapsed_ms = start.elapsed().as_millis(),
                        "Request succeeded"
                    );
                    return Ok(envelope);
                }
                Err(ApiError::RateLimited { retry_after, .. }) if remaining > 0 => {
                    let retry_after = retry_after.min(self.config.max_retry_after);
                    warn!(
                        request_id = %request_id,
                        delay_ms = retry_after.as_millis(),
                        retries_remaining = remaining - 1,
                        "Rate limited, retrying after delay"
                    );
                    tokio::time::sleep(retry_after).await;
                    remaining -= 1;
                }
                Err(e) => {
                    debug!(
                        request_id = %request_id,
                        kind = %e.kind(),
                        error = %e,
                        "Request failed, not retrying"
                    );
                    return Err(e.into_terminal());
                }
            }
        }
    }

    /// Issue a single attempt and interpret its response
    async fn execute_once(&self, request_id: &str, request: &ApiRequest) -> ApiResult<Envelope> {
        let url = build_url(&self.config.endpoint, &request.path, &request.query)?;

        let mut builder = self
            .inner
            .request(request.method.clone(), url.clone())
            .headers(self.merged_headers(&request.headers))
            .header(X_REQUEST_ID, request_id);

        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::network(url.as_str(), e))?;

        if let Some(ref origin) = self.config.origin {
            cors::check(origin, &url, response.headers())?;
        }

        interpret(&url, response).await
    }

    /// Default headers with the request's own headers merged over them
    fn merged_headers(&self, overrides: &HeaderMap) -> HeaderMap {
        let mut headers = default_headers(&self.config);
        headers.extend(overrides.clone());
        headers
    }
}

/// Fixed headers sent with every request: JSON in both directions, caching off
fn default_headers(config: &ClientConfig) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(EXPIRES, HeaderValue::from_static("0"));

    if let Ok(value) = HeaderValue::from_str(&config.user_agent) {
        headers.insert(USER_AGENT, value);
    }
    if let Some(value) = config
        .origin
        .as_deref()
        .and_then(|o| HeaderValue::from_str(o.trim_end_matches('/')).ok())
    {
        headers.insert(ORIGIN, value);
    }

    headers
}

/// Turn a response into an envelope or a classified error
async fn interpret(url: &Url, response: Response) -> ApiResult<Envelope> {
    let status = response.status();

    if status == StatusCode::NO_CONTENT {
        return Ok(Envelope::Empty);
    }

    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(is_json_content_type);
    let retry_after = parse_retry_after(response.headers());

    let text = response
        .text()
        .await
        .map_err(|e| ApiError::network(url.as_str(), e))?;

    let body = if is_json {
        match serde_json::from_str(&text) {
            Ok(value) => Envelope::Json(value),
            Err(e) => {
                return Err(ApiError::Parse {
                    message: e.to_string(),
                    body: text,
                })
            }
        }
    } else {
        Envelope::Text(text)
    };

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ApiError::RateLimited { retry_after, body });
    }

    if !status.is_success() {
        let message = error_message(&body, status.canonical_reason());
        return Err(ApiError::http_status(status.as_u16(), message, body));
    }

    Ok(body)
}

/// Delay requested by `Retry-After`, in seconds; one second when absent or
/// not a non-negative number that fits a `Duration`
fn parse_retry_after(headers: &HeaderMap) -> Duration {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<f64>().ok())
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .unwrap_or(DEFAULT_RETRY_AFTER)
}
