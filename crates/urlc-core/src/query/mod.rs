//! Query-string codec: ordered key/value maps to and from `a=1&b[]=2` form.

mod decode;
mod encode;
mod merge;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Pair separator used when none is configured.
pub const DEFAULT_SEPARATOR: char = '&';

/// Insertion-ordered query parameters.
pub type QueryMap = IndexMap<String, QueryValue>;

/// A query parameter value: a plain string or a nested map built from
/// bracketed keys. Lists are maps keyed `"0"`, `"1"`, ...
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    Value(String),
    Map(QueryMap),
}

impl QueryValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            QueryValue::Value(v) => Some(v),
            QueryValue::Map(_) => None,
        }
    }

    pub fn as_map(&self) -> Option<&QueryMap> {
        match self {
            QueryValue::Value(_) => None,
            QueryValue::Map(m) => Some(m),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(v: &str) -> Self {
        QueryValue::Value(v.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(v: String) -> Self {
        QueryValue::Value(v)
    }
}

impl From<QueryMap> for QueryValue {
    fn from(m: QueryMap) -> Self {
        QueryValue::Map(m)
    }
}

/// Encoder/decoder for query strings.
///
/// Keys and values are form-encoded (space becomes `+`). Decoding always
/// splits on `&`; the configured separator and, optionally, the legacy `;`
/// are accepted as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryCodec {
    separator: char,
    accept_semicolon: bool,
}

impl Default for QueryCodec {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            accept_semicolon: false,
        }
    }
}

impl QueryCodec {
    pub fn new(separator: char) -> Self {
        Self {
            separator,
            ..Self::default()
        }
    }

    /// Also split pairs on `;` when decoding.
    pub fn accept_semicolon(mut self, accept: bool) -> Self {
        self.accept_semicolon = accept;
        self
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// Serializes `map` in iteration order. Empty values become valueless
    /// parameters (`key` without `=`).
    pub fn encode(&self, map: &QueryMap) -> String {
        encode::encode(map, self.separator)
    }

    /// Parses `query` (without the leading `?`). Never fails: invalid
    /// percent escapes are kept verbatim.
    pub fn decode(&self, query: &str) -> QueryMap {
        let separator = self.separator;
        let semicolon = self.accept_semicolon;
        decode::decode(query, |c| {
            c == DEFAULT_SEPARATOR || c == separator || (semicolon && c == ';')
        })
    }

    /// Merges `overrides` into `base`. With `deep`, nested maps are merged
    /// key by key; otherwise same-named top-level keys are replaced whole.
    pub fn merge(base: QueryMap, overrides: QueryMap, deep: bool) -> QueryMap {
        merge::merge(base, overrides, deep)
    }
}
