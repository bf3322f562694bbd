//! Query Cache
//!
//! Decoded read responses keyed by request path and query string. The session
//! context clears it on login and logout so a new user never sees data fetched
//! for the previous one; resource clients invalidate a collection after
//! mutating it.

use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Clone, Default)]
pub struct QueryCache {
    entries: Arc<DashMap<String, serde_json::Value>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the key for a path and its query pairs
    pub fn key(path: &str, query: &[(String, String)]) -> String {
        if query.is_empty() {
            return path.to_string();
        }
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (k, v) in query {
            serializer.append_pair(k, v);
        }
        format!("{}?{}", path, serializer.finish())
    }

    /// Cached value for `key`
    ///
    /// An entry that no longer decodes into `T` is evicted.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.entries.get(key)?.value().clone();
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::debug!(key = %key, error = %e, "Evicting undecodable cache entry");
                self.entries.remove(key);
                None
            }
        }
    }

    pub fn insert<T: Serialize>(&self, key: impl Into<String>, value: &T) {
        match serde_json::to_value(value) {
            Ok(value) => {
                self.entries.insert(key.into(), value);
            }
            Err(e) => tracing::debug!(error = %e, "Skipping cache insert"),
        }
    }

    /// Drop every entry whose key starts with `prefix`, returning how many
    pub fn invalidate_prefix(&self, prefix: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        before.saturating_sub(self.entries.len())
    }

    pub fn clear(&self) {
        let dropped = self.entries.len();
        self.entries.clear();
        tracing::debug!(dropped = dropped, "Query cache cleared");
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_includes_query() {
        assert_eq!(QueryCache::key("/api/players", &[]), "/api/players");
        assert_eq!(
            QueryCache::key(
                "/api/players",
                &[
                    ("page".to_string(), "2".to_string()),
                    ("limit".to_string(), "25".to_string())
                ]
            ),
            "/api/players?page=2&limit=25"
        );
    }

    #[test]
    fn test_key_escapes_reserved_characters() {
        let pair = |k: &str, v: &str| (k.to_string(), v.to_string());

        let literal = QueryCache::key("/api/players", &[pair("search", "Smith&position=QB")]);
        let filtered = QueryCache::key(
            "/api/players",
            &[pair("search", "Smith"), pair("position", "QB")],
        );

        assert_ne!(literal, filtered);
        assert_eq!(literal, "/api/players?search=Smith%26position%3DQB");
    }

    #[test]
    fn test_insert_and_get() {
        let cache = QueryCache::new();
        cache.insert("/api/teams", &vec!["Varsity", "JV"]);

        let teams: Option<Vec<String>> = cache.get("/api/teams");
        assert_eq!(teams, Some(vec!["Varsity".to_string(), "JV".to_string()]));
        assert_eq!(cache.get::<Vec<String>>("/api/players"), None);
    }

    #[test]
    fn test_undecodable_entry_is_evicted() {
        let cache = QueryCache::new();
        cache.insert("/api/teams", &"not a list");

        assert_eq!(cache.get::<Vec<String>>("/api/teams"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_invalidate_prefix() {
        let cache = QueryCache::new();
        cache.insert("/api/players", &1);
        cache.insert("/api/players/4", &2);
        cache.insert("/api/teams", &3);

        assert_eq!(cache.invalidate_prefix("/api/players"), 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clones_share_entries() {
        let cache = QueryCache::new();
        let shared = cache.clone();
        cache.insert("/api/teams", &3);

        shared.clear();
        assert!(cache.is_empty());
    }
}
