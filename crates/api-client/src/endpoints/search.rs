//! Search endpoint and result normalization
//!
//! The search endpoint answers in several shapes: a bare list of projects,
//! an object grouping `projects`, `skills` and `profiles`, or some other
//! object. Each shape is decoded into a [`SearchPayload`] variant and then
//! flattened into one list of [`SearchResult`]s ranked by score.

use crate::client::MeApiClient;
use crate::query::QueryParams;
use crate::request::Envelope;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use tracing::{debug, warn};

/// Score assigned when the server sends none
pub const DEFAULT_SCORE: f64 = 1.0;

/// Search API interface
#[derive(Clone)]
pub struct SearchApi {
    client: MeApiClient,
}

impl SearchApi {
    /// Create a new search API interface
    pub(crate) fn new(client: MeApiClient) -> Self {
        Self { client }
    }

    /// Search projects, skills and profiles
    ///
    /// GET /search?q=<query>&limit=<limit>
    ///
    /// A blank query returns no results without touching the network.
    /// Request failures are logged and reported as no results.
    pub async fn query(&self, query: &str) -> Vec<SearchResult> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let params = QueryParams::new()
            .with("q", query)
            .with("limit", self.client.config().search_limit);

        match self.client.get_with("search", params).await {
            Ok(envelope) => normalize(SearchPayload::decode(envelope)),
            Err(e) => {
                warn!(query = %query, kind = %e.kind(), error = %e, "Search failed");
                Vec::new()
            }
        }
    }
}

/// Category of a search hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResultKind {
    /// A portfolio project
    Project,
    /// A skill
    Skill,
    /// A person's profile
    Profile,
    /// An unrecognized payload, kept whole
    Result,
}

impl ResultKind {
    /// Kind named by a payload's `type` field, case-insensitively
    fn from_type_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "project" => Self::Project,
            "skill" => Self::Skill,
            "profile" => Self::Profile,
            _ => Self::Result,
        }
    }

    /// Keys tried, in order, when deriving a display name
    fn name_keys(self) -> &'static [&'static str] {
        match self {
            Self::Project | Self::Result => &["title", "name"],
            Self::Skill | Self::Profile => &["name", "title"],
        }
    }

    /// Name used when none of the name keys hold a non-empty string
    fn placeholder(self) -> &'static str {
        match self {
            Self::Project => "Untitled Project",
            Self::Skill => "Unnamed Skill",
            Self::Profile => "Unnamed Profile",
            Self::Result => "Untitled",
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A single normalized search hit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// Category of the hit
    #[serde(rename = "type")]
    pub kind: ResultKind,
    /// Display name; never empty
    pub name: String,
    /// Description, if the source had one
    pub description: Option<String>,
    /// Relevance score; higher ranks first
    pub score: f64,
    /// All fields of the source item
    pub raw: Map<String, Value>,
}

impl SearchResult {
    fn from_fields(kind: ResultKind, raw: Map<String, Value>) -> Self {
        let name = kind
            .name_keys()
            .iter()
            .filter_map(|key| raw.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or_else(|| kind.placeholder())
            .to_string();

        let description = raw
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string);

        let score = ["_score", "score"]
            .iter()
            .find_map(|key| raw.get(*key).and_then(Value::as_f64))
            .unwrap_or(DEFAULT_SCORE);

        Self {
            kind,
            name,
            description,
            score,
            raw,
        }
    }

    /// Normalize a list item; scalars and arrays are kept under `raw.value`
    fn from_item(kind: ResultKind, item: Value) -> Self {
        match item {
            Value::Object(fields) => Self::from_fields(kind, fields),
            other => {
                debug!(kind = %kind, item = %other, "Wrapping non-object search item");
                let mut raw = Map::new();
                raw.insert("value".to_string(), other);
                Self::from_fields(kind, raw)
            }
        }
    }

    /// Wrap a whole response object, honoring a string `type` it carries
    fn fallback(source: Map<String, Value>) -> Self {
        let kind = source
            .get("type")
            .and_then(Value::as_str)
            .map_or(ResultKind::Result, ResultKind::from_type_name);
        Self::from_fields(kind, source)
    }
}

/// Decoded shape of a search response
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SearchPayload {
    /// A bare list; every item is a project
    List(Vec<Value>),
    /// An object with at least one of the grouped list fields
    Grouped {
        projects: Vec<Value>,
        skills: Vec<Value>,
        profiles: Vec<Value>,
        source: Map<String, Value>,
    },
    /// Any other object
    Unrecognized(Map<String, Value>),
    /// No usable body: empty, text, null or a scalar
    Nothing,
}

impl SearchPayload {
    pub(crate) fn decode(envelope: Envelope) -> Self {
        match envelope {
            Envelope::Json(Value::Array(items)) => Self::List(items),
            Envelope::Json(Value::Object(map)) => {
                let group = |key: &str| map.get(key).and_then(Value::as_array).cloned();
                let (projects, skills, profiles) =
                    (group("projects"), group("skills"), group("profiles"));

                if projects.is_none() && skills.is_none() && profiles.is_none() {
                    Self::Unrecognized(map)
                } else {
                    Self::Grouped {
                        projects: projects.unwrap_or_default(),
                        skills: skills.unwrap_or_default(),
                        profiles: profiles.unwrap_or_default(),
                        source: map,
                    }
                }
            }
            Envelope::Json(_) | Envelope::Text(_) | Envelope::Empty => Self::Nothing,
        }
    }
}

/// Flatten a decoded payload into results ranked by descending score.
///
/// Ties keep their order of appearance: projects, then skills, then profiles.
pub(crate) fn normalize(payload: SearchPayload) -> Vec<SearchResult> {
    let mut results: Vec<SearchResult> = match payload {
        SearchPayload::List(items) => tag(ResultKind::Project, items).collect(),
        SearchPayload::Grouped {
            projects,
            skills,
            profiles,
            source,
        } => {
            let grouped: Vec<_> = tag(ResultKind::Project, projects)
                .chain(tag(ResultKind::Skill, skills))
                .chain(tag(ResultKind::Profile, profiles))
                .collect();
            if grouped.is_empty() {
                vec![SearchResult::fallback(source)]
            } else {
                grouped
            }
        }
        SearchPayload::Unrecognized(source) => vec![SearchResult::fallback(source)],
        SearchPayload::Nothing => Vec::new(),
    };

    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results
}

fn tag(kind: ResultKind, items: Vec<Value>) -> impl Iterator<Item = SearchResult> {
    items
        .into_iter()
        .map(move |item| SearchResult::from_item(kind, item))
}
