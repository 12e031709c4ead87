//! Query string synchronization
//!
//! The query string is the only place filter state lives. This module decodes
//! it into a [`FilterState`], encodes a state back, and applies the
//! transitions the interface triggers ([`FilterUpdate`]) to produce the next
//! query string. Parameters this module does not recognize are carried along
//! unchanged.
//!
//! Parsing follows `application/x-www-form-urlencoded`: `+` is a space,
//! percent escapes are decoded, and a pair without `=` has an empty value.

use std::borrow::Cow;
use std::fmt;

use crate::filters::{FilterState, ModeFilter, SortKey};

pub const SEARCH_PARAM: &str = "search";
pub const MODE_PARAM: &str = "mode";
pub const SORT_PARAM: &str = "sort";
pub const SPECIALTY_PARAM: &str = "specialty";

/// Error type for query updates
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("Unknown filter field: {0}. Valid fields: search, mode, sort, specialty, clearAll")]
    UnknownField(String),

    #[error("Filter field '{0}' requires a value")]
    MissingValue(String),
}

/// Ordered list of decoded query parameters
///
/// Keeps every pair in the order it appeared, including repeated keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string, with or without its leading `?`
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);

        let pairs = query
            .split('&')
            .filter(|segment| !segment.is_empty())
            .map(|segment| match segment.split_once('=') {
                Some((key, value)) => (decode_component(key), decode_component(value)),
                None => (decode_component(segment), String::new()),
            })
            .collect();

        Self { pairs }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Value of the last occurrence of `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value of `key`, in order of appearance
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Replace all values of `key` with one value
    ///
    /// The value takes the position of the first existing occurrence, or is
    /// appended when the key is absent.
    pub fn set(&mut self, key: &str, value: &str) {
        match self.pairs.iter().position(|(k, _)| k == key) {
            Some(index) => {
                self.pairs[index].1 = value.to_string();
                let mut seen = 0;
                self.pairs.retain(|(k, _)| {
                    if k != key {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
            }
            None => self.append(key, value),
        }
    }

    pub fn append(&mut self, key: &str, value: &str) {
        self.pairs.push((key.to_string(), value.to_string()));
    }

    /// Remove every occurrence of `key`
    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    /// Remove the occurrences of `key` whose value is exactly `value`
    pub fn remove_value(&mut self, key: &str, value: &str) {
        self.pairs.retain(|(k, v)| !(k == key && v == value));
    }

    /// Encoded form without the leading `?`
    pub fn to_query_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (key, value)) in self.pairs.iter().enumerate() {
            if index > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}={}", encode_component(key), encode_component(value))?;
        }
        Ok(())
    }
}

impl From<&str> for QueryParams {
    fn from(query: &str) -> Self {
        Self::parse(query)
    }
}

fn decode_component(component: &str) -> String {
    let component = component.replace('+', " ");
    match urlencoding::decode(&component) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => String::from_utf8_lossy(&urlencoding::decode_binary(component.as_bytes()))
            .into_owned(),
    }
}

fn encode_component(component: &str) -> String {
    match urlencoding::encode(component) {
        Cow::Borrowed(unchanged) => unchanged.to_string(),
        Cow::Owned(encoded) => encoded.replace("%20", "+"),
    }
}

/// One transition triggered from the interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterUpdate {
    Search(String),
    Mode(String),
    Sort(String),
    /// Add the specialty if absent, remove it if selected
    ToggleSpecialty(String),
    /// Remove `search`, `mode`, `sort` and every `specialty`
    ClearAll,
}

impl FilterUpdate {
    /// Build an update from a field name and value
    ///
    /// Field names match the query parameters, plus `clearAll` which takes no
    /// value. A missing scalar value clears that field.
    pub fn parse(field: &str, value: Option<&str>) -> Result<Self, QueryError> {
        let value = value.unwrap_or_default().to_string();
        match field {
            SEARCH_PARAM => Ok(FilterUpdate::Search(value)),
            MODE_PARAM => Ok(FilterUpdate::Mode(value)),
            SORT_PARAM => Ok(FilterUpdate::Sort(value)),
            SPECIALTY_PARAM if value.is_empty() => {
                Err(QueryError::MissingValue(SPECIALTY_PARAM.to_string()))
            }
            SPECIALTY_PARAM => Ok(FilterUpdate::ToggleSpecialty(value)),
            "clearAll" | "clear-all" | "clear_all" => Ok(FilterUpdate::ClearAll),
            other => Err(QueryError::UnknownField(other.to_string())),
        }
    }
}

fn set_or_remove(params: &mut QueryParams, key: &str, value: &str) {
    if value.is_empty() {
        params.remove(key);
    } else {
        params.set(key, value);
    }
}

/// Apply one transition and return the next query parameters
pub fn apply_update(params: &QueryParams, update: &FilterUpdate) -> QueryParams {
    let mut next = params.clone();

    match update {
        FilterUpdate::Search(value) => set_or_remove(&mut next, SEARCH_PARAM, value),
        FilterUpdate::Mode(value) => set_or_remove(&mut next, MODE_PARAM, value),
        FilterUpdate::Sort(value) => set_or_remove(&mut next, SORT_PARAM, value),
        FilterUpdate::ToggleSpecialty(value) => {
            if next.get_all(SPECIALTY_PARAM).contains(&value.as_str()) {
                next.remove_value(SPECIALTY_PARAM, value);
            } else {
                next.append(SPECIALTY_PARAM, value);
            }
        }
        FilterUpdate::ClearAll => {
            for key in [SEARCH_PARAM, MODE_PARAM, SORT_PARAM, SPECIALTY_PARAM] {
                next.remove(key);
            }
        }
    }

    next
}

/// Apply a `(field, value)` transition to a raw query string
pub fn update_filters(query: &str, field: &str, value: Option<&str>) -> Result<String, QueryError> {
    let update = FilterUpdate::parse(field, value)?;
    Ok(apply_update(&QueryParams::parse(query), &update).to_query_string())
}

impl FilterState {
    /// Decode the filter fields of parsed query parameters
    ///
    /// Missing fields default to empty or unset, repeated scalars keep the
    /// last value, and repeated or empty specialties are ignored.
    pub fn from_params(params: &QueryParams) -> Self {
        let mut specialties: Vec<String> = Vec::new();
        for specialty in params.get_all(SPECIALTY_PARAM) {
            if !specialty.is_empty() && !specialties.iter().any(|s| s == specialty) {
                specialties.push(specialty.to_string());
            }
        }

        FilterState {
            search: params.get(SEARCH_PARAM).unwrap_or_default().to_string(),
            mode: params.get(MODE_PARAM).map(ModeFilter::parse).unwrap_or_default(),
            sort: params.get(SORT_PARAM).map(SortKey::parse).unwrap_or_default(),
            specialties,
        }
    }

    /// Encode this state as query parameters
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        if !self.search.is_empty() {
            params.append(SEARCH_PARAM, &self.search);
        }
        if let Some(mode) = self.mode.as_param() {
            params.append(MODE_PARAM, mode);
        }
        if let Some(sort) = self.sort.as_param() {
            params.append(SORT_PARAM, sort);
        }
        for specialty in &self.specialties {
            params.append(SPECIALTY_PARAM, specialty);
        }
        params
    }

    pub fn to_query_string(&self) -> String {
        self.to_params().to_query_string()
    }
}

/// Decode a raw query string into a [`FilterState`]
pub fn decode_filters(query: &str) -> FilterState {
    FilterState::from_params(&QueryParams::parse(query))
}

/// Encode a [`FilterState`] into a query string without the leading `?`
pub fn encode_filters(state: &FilterState) -> String {
    state.to_query_string()
}
