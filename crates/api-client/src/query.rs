//! Query parameters and URL construction

use crate::endpoint::EndpointConfig;
use crate::error::{ApiError, ApiResult};
use url::Url;

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// Omitted from the URL entirely
    Absent,
    /// Appended once
    Scalar(String),
    /// Appended once per element under the same key
    List(Vec<String>),
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        Self::Scalar(value.clone())
    }
}

macro_rules! scalar_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for QueryValue {
                fn from(value: $ty) -> Self {
                    Self::Scalar(value.to_string())
                }
            }
        )*
    };
}

scalar_from_display!(bool, i32, i64, u16, u32, u64, usize, f64);

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

impl<T: ToString> From<Vec<T>> for QueryValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.iter().map(ToString::to_string).collect())
    }
}

/// Ordered query parameters with unique keys.
///
/// Insertion order is preserved so the built URL is deterministic.
/// Re-inserting a key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, QueryValue)>,
}

impl QueryParams {
    /// Empty parameter set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a parameter
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Value stored for a key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Whether no parameters are set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flattened `(key, value)` pairs in insertion order, absent values skipped
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().flat_map(|(key, value)| {
            let values: Vec<&str> = match value {
                QueryValue::Absent => Vec::new(),
                QueryValue::Scalar(v) => vec![v.as_str()],
                QueryValue::List(vs) => vs.iter().map(String::as_str).collect(),
            };
            values.into_iter().map(move |v| (key.as_str(), v))
        })
    }
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Build an absolute, percent-encoded URL for `path` under the endpoint prefix.
///
/// `path` is split on `/` and each non-empty piece is appended as one
/// percent-encoded segment, so `?`, `#` and `%` stay inside the path.
/// Dot segments are rejected rather than resolved against the prefix.
pub fn build_url(endpoint: &EndpointConfig, path: &str, params: &QueryParams) -> ApiResult<Url> {
    let prefix = endpoint.prefix();
    let mut url = Url::parse(&prefix).map_err(|e| ApiError::InvalidUrl(format!("{prefix}: {e}")))?;

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if let Some(dot) = segments.iter().find(|s| matches!(**s, "." | "..")) {
        return Err(ApiError::InvalidUrl(format!(
            "{path}: path segment '{dot}' is not allowed"
        )));
    }

    if !segments.is_empty() {
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(format!("{prefix}: cannot be a base")))?
            .pop_if_empty()
            .extend(segments);
    }

    let mut pairs = params.pairs().peekable();
    if pairs.peek().is_some() {
        url.query_pairs_mut().extend_pairs(pairs);
    }

    Ok(url)
}
