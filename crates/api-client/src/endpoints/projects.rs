//! Projects endpoints

use crate::client::MeApiClient;
use crate::error::{ApiError, ApiResult};
use crate::query::QueryParams;
use crate::request::Envelope;
use serde_json::Value;

/// Skill used by [`ProjectsApi::python`]
const PYTHON_SKILL: &str = "python";

/// Projects API interface
#[derive(Clone)]
pub struct ProjectsApi {
    client: MeApiClient,
}

impl ProjectsApi {
    /// Create a new projects API interface
    pub(crate) fn new(client: MeApiClient) -> Self {
        Self { client }
    }

    /// List projects, optionally filtered by skill
    ///
    /// GET /projects?skill=<skill>
    ///
    /// Payloads that are neither a list nor `{"projects": [...]}` are treated
    /// as no data and yield an empty list.
    pub async fn list(&self, skill: Option<&str>) -> ApiResult<Vec<Value>> {
        let skill = skill.map(str::trim).filter(|s| !s.is_empty());
        let query = QueryParams::new().with("skill", skill);
        let envelope = self.client.get_with("projects", query).await?;
        Ok(projects_from(envelope))
    }

    /// List projects tagged with Python
    pub async fn python(&self) -> ApiResult<Vec<Value>> {
        self.list(Some(PYTHON_SKILL)).await
    }

    /// Fetch a single project
    ///
    /// GET /projects/<id>
    ///
    /// The id is sent as a single encoded path segment.
    pub async fn get(&self, id: &str) -> ApiResult<Value> {
        let id = validate_id(id)?;
        let envelope = self.client.get(&format!("projects/{id}")).await?;
        Ok(envelope.into_value())
    }
}

fn validate_id(id: &str) -> ApiResult<&str> {
    let id = id.trim().trim_matches('/');
    if id.is_empty() {
        return Err(ApiError::config("project id is required"));
    }
    if id.contains('/') || id == "." || id == ".." {
        return Err(ApiError::config(format!("invalid project id '{id}'")));
    }
    Ok(id)
}

fn projects_from(envelope: Envelope) -> Vec<Value> {
    match envelope.into_value() {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("projects") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_payload_is_used_directly() {
        let payload = json!([{"title": "a"}, {"title": "b"}]);
        assert_eq!(projects_from(Envelope::Json(payload)).len(), 2);
    }

    #[test]
    fn test_wrapped_payload_is_extracted() {
        let payload = json!({"projects": [{"title": "a"}], "total": 1});
        assert_eq!(projects_from(Envelope::Json(payload)), vec![json!({"title": "a"})]);
    }

    #[test]
    fn test_validate_id() {
        assert_eq!(validate_id(" /42/ ").unwrap(), "42");
        assert_eq!(validate_id("a?skill=x").unwrap(), "a?skill=x");
        for bad in ["", "  ", "/", "..", ".", "../health", "a/b"] {
            assert!(matches!(validate_id(bad), Err(ApiError::Config(_))), "{bad:?}");
        }
    }

    #[test]
    fn test_unexpected_shapes_are_empty() {
        assert!(projects_from(Envelope::Json(json!({}))).is_empty());
        assert!(projects_from(Envelope::Json(json!({"projects": "nope"}))).is_empty());
        assert!(projects_from(Envelope::Json(json!(42))).is_empty());
        assert!(projects_from(Envelope::Text("<html>".into())).is_empty());
        assert!(projects_from(Envelope::Empty).is_empty());
    }
}
