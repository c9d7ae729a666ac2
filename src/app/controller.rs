use std::sync::Arc;

use crate::data::{CacheEntry, Overlays, Timestamp};
use crate::error::Result;
use crate::services::{format_overlay, Fetcher, StatusCache};

/// Resolves a repository's records from cache or remote and formats them.
pub struct OverlayController<'a, F> {
    cache: &'a StatusCache,
    fetcher: F,
    ignored_reviewers: Vec<String>,
}

impl<'a, F: Fetcher> OverlayController<'a, F> {
    pub fn new(cache: &'a StatusCache, fetcher: F, ignored_reviewers: Vec<String>) -> Self {
        Self {
            cache,
            fetcher,
            ignored_reviewers,
        }
    }

    /// Overlays for every PR of `key` that has something to show.
    ///
    /// A fetch failure is returned as-is; the cache keeps its previous entry.
    pub fn refresh(
        &self,
        key: &str,
        repository_updated_at: &Timestamp,
        force: bool,
    ) -> Result<Overlays> {
        let entry = match self.cached(key, repository_updated_at, force) {
            Some(entry) => entry,
            None => {
                let records = self.fetcher.fetch(key)?;
                self.cache.put(key, records)
            }
        };

        Ok(entry
            .records
            .values()
            .filter_map(|record| {
                format_overlay(record, &self.ignored_reviewers).map(|o| (record.number, o))
            })
            .collect())
    }

    fn cached(
        &self,
        key: &str,
        repository_updated_at: &Timestamp,
        force: bool,
    ) -> Option<Arc<CacheEntry>> {
        if force {
            tracing::debug!(repo = key, "forced refresh");
            return None;
        }
        if !self.cache.is_valid(key, repository_updated_at) {
            tracing::debug!(repo = key, updated_at = %repository_updated_at, "cache stale or empty");
            return None;
        }
        tracing::debug!(repo = key, "cache hit");
        self.cache.get(key)
    }
}
