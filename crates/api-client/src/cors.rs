//! Same-origin policy enforcement
//!
//! When the client is configured with the origin of the page it serves, a
//! cross-origin response is only readable if the server allowed that origin
//! via `Access-Control-Allow-Origin`.

use crate::error::{ApiError, ApiResult};
use reqwest::header::{HeaderMap, ACCESS_CONTROL_ALLOW_ORIGIN};
use url::Url;

/// Check that a response to `url` may be read from `origin`.
pub(crate) fn check(origin: &str, url: &Url, headers: &HeaderMap) -> ApiResult<()> {
    let page = Url::parse(origin)
        .map_err(|e| ApiError::InvalidUrl(format!("origin {origin}: {e}")))?
        .origin();

    if page == url.origin() {
        return Ok(());
    }

    let serialized = page.ascii_serialization();
    let allowed = headers
        .get(ACCESS_CONTROL_ALLOW_ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .is_some_and(|v| v == "*" || v.trim_end_matches('/') == serialized);

    if allowed {
        Ok(())
    } else {
        Err(ApiError::Cors {
            url: url.to_string(),
            origin: serialized,
        })
    }
}
