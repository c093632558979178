//! Profile endpoint

use crate::client::MeApiClient;
use crate::error::ApiResult;
use crate::request::Envelope;
use serde_json::Value;

/// Profile API interface
#[derive(Clone)]
pub struct ProfileApi {
    client: MeApiClient,
}

impl ProfileApi {
    /// Create a new profile API interface
    pub(crate) fn new(client: MeApiClient) -> Self {
        Self { client }
    }

    /// Fetch the profile
    ///
    /// GET /profile
    ///
    /// Older servers answer with a list of profiles; the first one is used.
    pub async fn fetch(&self) -> ApiResult<Value> {
        let envelope = self.client.get("profile").await?;
        Ok(profile_from(envelope))
    }
}

fn profile_from(envelope: Envelope) -> Value {
    match envelope.into_value() {
        Value::Array(items) => items.into_iter().next().unwrap_or(Value::Null),
        other => other,
    }
}
