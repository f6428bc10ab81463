//! In-memory tagged cache
//!
//! Used by hosts that keep listings in process, and by tests to observe
//! which tags a resync invalidated.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use log::debug;

use super::{CacheInvalidator, CacheTag};

struct Entry {
    value: serde_json::Value,
    tags: HashSet<CacheTag>,
}

/// Key/value cache where each entry carries a set of tags
///
/// Uses a RwLock-protected HashMap for thread-safe access.
pub struct InMemoryTagCache {
    entries: RwLock<HashMap<String, Entry>>,
    /// Every invalidate call, oldest first
    invalidations: RwLock<Vec<Vec<CacheTag>>>,
}

impl InMemoryTagCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            invalidations: RwLock::new(Vec::new()),
        }
    }

    /// Insert or replace an entry
    pub fn put(&self, key: impl Into<String>, value: serde_json::Value, tags: &[CacheTag]) {
        let mut entries = self.entries.write().unwrap();
        entries.insert(
            key.into(),
            Entry {
                value,
                tags: tags.iter().copied().collect(),
            },
        );
    }

    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let entries = self.entries.read().unwrap();
        entries.get(key).map(|e| e.value.clone())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().unwrap().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tags passed to each invalidate call so far
    pub fn invalidations(&self) -> Vec<Vec<CacheTag>> {
        self.invalidations.read().unwrap().clone()
    }
}

impl Default for InMemoryTagCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheInvalidator for InMemoryTagCache {
    fn invalidate(&self, tags: &[CacheTag]) {
        let removed = {
            let mut entries = self.entries.write().unwrap();
            let before = entries.len();
            entries.retain(|_, entry| !tags.iter().any(|t| entry.tags.contains(t)));
            before - entries.len()
        };
        self.invalidations.write().unwrap().push(tags.to_vec());
        debug!("Invalidated {:?}: dropped {} cache entries", tags, removed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invalidate_drops_tagged_entries_only() {
        let cache = InMemoryTagCache::new();
        cache.put("functions:app-1", json!(["fn-a", "fn-b"]), &[CacheTag::Functions]);
        cache.put("apps", json!(["app-1"]), &[CacheTag::Apps]);
        cache.put(
            "app-1",
            json!({ "id": "app-1" }),
            &[CacheTag::Apps, CacheTag::Functions],
        );

        cache.invalidate(&[CacheTag::Functions]);

        assert!(!cache.contains("functions:app-1"));
        assert!(!cache.contains("app-1"));
        assert_eq!(cache.get("apps"), Some(json!(["app-1"])));
        assert_eq!(cache.invalidations(), vec![vec![CacheTag::Functions]]);
    }

    #[test]
    fn test_put_replaces_entry() {
        let cache = InMemoryTagCache::new();
        cache.put("k", json!(1), &[CacheTag::Functions]);
        cache.put("k", json!(2), &[CacheTag::Apps]);
        assert_eq!(cache.len(), 1);

        // Replaced entry no longer carries the old tag
        cache.invalidate(&[CacheTag::Functions]);
        assert_eq!(cache.get("k"), Some(json!(2)));
    }

    #[test]
    fn test_invalidate_empty_cache_is_recorded() {
        let cache = InMemoryTagCache::default();
        cache.invalidate(&[CacheTag::Apps]);
        assert!(cache.is_empty());
        assert_eq!(cache.invalidations().len(), 1);
    }
}
