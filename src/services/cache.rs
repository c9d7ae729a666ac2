use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::data::{CacheEntry, RecordSet, Timestamp};

/// In-memory per-repository cache of fetched PR records.
///
/// Entries live for the life of the process. Every write swaps in a fresh
/// `Arc<CacheEntry>`, so readers hold either the old or the new dataset.
#[derive(Debug, Default)]
pub struct StatusCache {
    entries: Mutex<HashMap<String, Arc<CacheEntry>>>,
}

impl StatusCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Arc<CacheEntry>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// True if `key` has an entry fetched no earlier than `repository_updated_at`.
    pub fn is_valid(&self, key: &str, repository_updated_at: &Timestamp) -> bool {
        self.entries()
            .get(key)
            .is_some_and(|entry| entry.fetched_at >= *repository_updated_at)
    }

    pub fn get(&self, key: &str) -> Option<Arc<CacheEntry>> {
        self.entries().get(key).cloned()
    }

    /// Store `records` for `key`, stamped with the current time.
    pub fn put(&self, key: &str, records: RecordSet) -> Arc<CacheEntry> {
        self.put_at(key, records, Timestamp::now())
    }

    pub(crate) fn put_at(
        &self,
        key: &str,
        records: RecordSet,
        fetched_at: Timestamp,
    ) -> Arc<CacheEntry> {
        let entry = Arc::new(CacheEntry {
            fetched_at,
            records,
        });
        self.entries().insert(key.to_string(), Arc::clone(&entry));
        entry
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}
