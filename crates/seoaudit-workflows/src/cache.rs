//! Bounded TTL + LRU cache for task definition display names.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::debug;

use seoaudit_core::TaskDefId;

/// Default entry lifetime.
const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Default maximum number of live entries.
const DEFAULT_MAX_ENTRIES: usize = 1000;

/// Cache entry with value and expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    name: String,
    created_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.ttl
    }
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<TaskDefId, CacheEntry>,
    /// Keys from least to most recently used.
    access_order: Vec<TaskDefId>,
}

impl CacheInner {
    fn touch(&mut self, key: &TaskDefId) {
        if let Some(pos) = self.access_order.iter().position(|k| k == key) {
            let key = self.access_order.remove(pos);
            self.access_order.push(key);
        }
    }

    fn remove(&mut self, key: &TaskDefId) {
        self.entries.remove(key);
        if let Some(pos) = self.access_order.iter().position(|k| k == key) {
            self.access_order.remove(pos);
        }
    }

    fn evict_lru(&mut self) {
        if self.access_order.is_empty() {
            return;
        }
        let key = self.access_order.remove(0);
        debug!(task_def_id = %key, "Evicting least-recently-used cache entry");
        self.entries.remove(&key);
    }
}

/// Maps task definition ids to display names, with bounded size and
/// time-based expiry.
///
/// Populated lazily and never explicitly cleared. Safe to query and
/// populate from concurrent aggregations: a single async mutex guards
/// the map, the last writer for a key wins, and readers never observe a
/// partially written entry.
pub struct TaskNameCache {
    inner: Mutex<CacheInner>,
    max_entries: usize,
    ttl: Duration,
}

impl TaskNameCache {
    /// Create a cache with production limits (1000 entries, 1 hour TTL).
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MAX_ENTRIES, DEFAULT_TTL)
    }

    /// Create a cache with explicit limits.
    pub fn with_limits(max_entries: usize, ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(CacheInner::default()),
            max_entries,
            ttl,
        }
    }

    /// Get a live entry's name, refreshing its recency.
    ///
    /// Expired entries are dropped on access and never returned.
    pub async fn get(&self, id: &TaskDefId) -> Option<String> {
        let mut inner = self.inner.lock().await;

        match inner.entries.get(id) {
            Some(entry) if entry.is_expired() => {
                inner.remove(id);
                None
            }
            Some(entry) => {
                let name = entry.name.clone();
                inner.touch(id);
                Some(name)
            }
            None => None,
        }
    }

    /// Insert a resolved name with a fresh expiry, evicting the
    /// least-recently-used entry when the capacity bound is exceeded.
    pub async fn insert(&self, id: TaskDefId, name: String) {
        let mut inner = self.inner.lock().await;

        if !inner.entries.contains_key(&id) && inner.entries.len() >= self.max_entries {
            inner.evict_lru();
        }

        inner.touch(&id);
        if !inner.access_order.contains(&id) {
            inner.access_order.push(id.clone());
        }

        debug!(task_def_id = %id, name = %name, "Cached task name");
        inner.entries.insert(
            id,
            CacheEntry {
                name,
                created_at: Instant::now(),
                ttl: self.ttl,
            },
        );
    }

    /// Number of stored entries, expired or not.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.entries.len()
    }

    /// Returns true if no entries are stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for TaskNameCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> TaskDefId {
        TaskDefId::new(s)
    }

    #[tokio::test]
    async fn test_get_returns_live_entry() {
        let cache = TaskNameCache::new();
        cache.insert(id("tsk-1"), "crawl".to_string()).await;
        assert_eq!(cache.get(&id("tsk-1")).await, Some("crawl".to_string()));
    }

    #[tokio::test]
    async fn test_expired_entry_never_returned() {
        // Zero TTL: every entry is expired the moment it is inserted.
        let cache = TaskNameCache::with_limits(10, Duration::ZERO);
        cache.insert(id("tsk-1"), "crawl".to_string()).await;
        assert_eq!(cache.get(&id("tsk-1")).await, None);
        // The expired entry is dropped on access.
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_capacity_evicts_least_recently_used() {
        let cache = TaskNameCache::with_limits(2, DEFAULT_TTL);
        cache.insert(id("a"), "a-name".to_string()).await;
        cache.insert(id("b"), "b-name".to_string()).await;

        // Touch "a" so "b" becomes the LRU entry.
        cache.get(&id("a")).await;

        cache.insert(id("c"), "c-name".to_string()).await;

        assert_eq!(cache.get(&id("a")).await, Some("a-name".to_string()));
        assert_eq!(cache.get(&id("b")).await, None);
        assert_eq!(cache.get(&id("c")).await, Some("c-name".to_string()));
        assert_eq!(cache.len().await, 2);
    }

    #[tokio::test]
    async fn test_reinsert_same_key_does_not_evict() {
        let cache = TaskNameCache::with_limits(2, DEFAULT_TTL);
        cache.insert(id("a"), "a-name".to_string()).await;
        cache.insert(id("b"), "b-name".to_string()).await;

        // Last writer for an existing key wins without touching capacity.
        cache.insert(id("a"), "a-renamed".to_string()).await;

        assert_eq!(cache.get(&id("a")).await, Some("a-renamed".to_string()));
        assert_eq!(cache.get(&id("b")).await, Some("b-name".to_string()));
        assert_eq!(cache.len().await, 2);
    }
}
