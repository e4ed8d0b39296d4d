//! In-memory query cache

use async_trait::async_trait;
use log::debug;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::Result;

use super::{QueryCache, QueryKey, QueryPredicate};

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Option<serde_json::Value>,
    stale: bool,
}

/// Query cache held in process memory
#[derive(Debug, Default)]
pub struct MemoryQueryCache {
    entries: Mutex<BTreeMap<QueryKey, CacheEntry>>,
}

impl MemoryQueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, BTreeMap<QueryKey, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register a key with no data yet; it starts stale
    pub fn register(&self, key: QueryKey) {
        self.entries().entry(key).or_insert(CacheEntry {
            value: None,
            stale: true,
        });
    }

    /// Store fresh data for a key
    pub fn insert(&self, key: QueryKey, value: serde_json::Value) {
        self.entries().insert(
            key,
            CacheEntry {
                value: Some(value),
                stale: false,
            },
        );
    }

    pub fn get(&self, key: &QueryKey) -> Option<serde_json::Value> {
        self.entries().get(key).and_then(|e| e.value.clone())
    }

    /// Stale flag for a key, `None` if the key is unknown
    pub fn is_stale(&self, key: &QueryKey) -> Option<bool> {
        self.entries().get(key).map(|e| e.stale)
    }

    pub fn keys(&self) -> Vec<QueryKey> {
        self.entries().keys().cloned().collect()
    }

    /// Mark matching entries stale and return their keys
    pub fn mark_stale(&self, predicate: QueryPredicate<'_>) -> Vec<QueryKey> {
        let mut entries = self.entries();
        let mut matched = Vec::new();
        for (key, entry) in entries.iter_mut() {
            if predicate(key) {
                entry.stale = true;
                matched.push(key.clone());
            }
        }
        matched
    }
}

#[async_trait]
impl QueryCache for MemoryQueryCache {
    async fn invalidate_matching(&self, predicate: QueryPredicate<'_>) -> Result<usize> {
        let matched = self.mark_stale(predicate);
        debug!("Invalidated {} cached queries", matched.len());
        Ok(matched.len())
    }
}
