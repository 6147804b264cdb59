//! Canonical request parameters for the movie list endpoint.

use std::fmt;

use crate::constants::{SORT_BY, SORT_ORDER};
use crate::models::QueryState;

/// Ordered list of query parameters. Keys may repeat (`sources`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ParameterSet {
    pairs: Vec<(String, String)>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `application/x-www-form-urlencoded` rendering, in insertion order.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_query_string())
    }
}

impl<'a> IntoIterator for &'a ParameterSet {
    type Item = &'a (String, String);
    type IntoIter = std::slice::Iter<'a, (String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

/// Encode a query for `GET /movies`.
///
/// The base parameters are always present, empty filters included. Sources come
/// out in canonical platform order because `QueryState` keeps them in a
/// `BTreeSet`; an empty set emits no `sources` entry at all. Year bounds are only
/// emitted for the sides that are set.
pub fn encode(state: &QueryState) -> ParameterSet {
    let mut params = ParameterSet::new();
    params.push("page", state.page().to_string());
    params.push("per_page", state.page_size().to_string());
    params.push("search", state.search());
    params.push("genre", state.genre());
    params.push(
        "min_rating",
        state
            .min_rating()
            .map(|rating| rating.to_string())
            .unwrap_or_default(),
    );
    params.push("sort_by", SORT_BY);
    params.push("sort_order", SORT_ORDER);

    for source in state.sources() {
        params.push("sources", source.as_str());
    }

    if let Some(range) = state.year_range() {
        if let Some(from) = range.from {
            params.push("year_from", from.to_string());
        }
        if let Some(to) = range.to {
            params.push("year_to", to.to_string());
        }
    }

    params
}
