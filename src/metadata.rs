//! Call metadata (request headers and fault trailers).

use std::collections::HashMap;

/// Header naming the cache a data-plane call targets.
pub const CACHE: &str = "cache";
/// Trailer carrying the server's machine-readable error cause.
pub const ERR: &str = "err";
/// Header carrying the raw API key.
pub const AUTHORIZATION: &str = "authorization";
/// Header carrying the SDK agent string, sent on the first call of a channel.
pub const AGENT: &str = "agent";
/// Header carrying the runtime version, sent on the first call of a channel.
pub const RUNTIME_VERSION: &str = "runtime-version";

/// Key-value pairs attached to a call or returned with a fault.
///
/// Keys are lowercase ASCII. Multiple values for the same key are kept in
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: HashMap<String, Vec<String>>,
}

impl Metadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata naming the target cache.
    pub fn for_cache(cache_name: &str) -> Self {
        let mut metadata = Self::new();
        metadata.insert(CACHE, cache_name);
        metadata
    }

    /// Insert a key-value pair. Keys are normalized to lowercase.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into().to_ascii_lowercase();
        self.entries.entry(key).or_default().push(value.into());
    }

    /// Get the first value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(&key.to_ascii_lowercase())
            .and_then(|v| v.first())
            .map(|s| s.as_str())
    }

    /// Get all values for a key.
    pub fn get_all(&self, key: &str) -> Option<&[String]> {
        self.entries
            .get(&key.to_ascii_lowercase())
            .map(|v| v.as_slice())
    }

    /// The cache name this call targets, if any.
    pub fn cache_name(&self) -> Option<&str> {
        self.get(CACHE)
    }

    /// Check if a key exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&key.to_ascii_lowercase())
    }

    /// Iterate over all entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .flat_map(|(k, values)| values.iter().map(move |v| (k.as_str(), v.as_str())))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries, counting duplicates.
    pub fn len(&self) -> usize {
        self.entries.values().map(|v| v.len()).sum()
    }
}

impl FromIterator<(String, String)> for Metadata {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut metadata = Metadata::new();
        for (key, value) in iter {
            metadata.insert(key, value);
        }
        metadata
    }
}
