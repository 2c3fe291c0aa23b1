//! In-process TTL cache of search responses.
//!
//! Entries expire a fixed duration after insertion. [`SearchCache::get`]
//! checks expiry itself, so the periodic sweep only reclaims memory and never
//! affects what a lookup returns.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde::Serialize;
use tokio::task::JoinHandle;
use valyux_core::{normalize, SearchResponse};

use crate::clock::{Clock, SystemClock};

/// Cache key for a query in a locality. Both parts are normalized, so
/// `"Amul  Milk"` and `"amul milk"` share an entry.
#[must_use]
pub fn build_cache_key(query: &str, locality: &str) -> String {
    format!("search:{}:{}", normalize(query), normalize(locality))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub keys: usize,
    pub hits: u64,
    pub misses: u64,
}

struct CacheEntry {
    response: SearchResponse,
    expires_at: Instant,
}

pub struct SearchCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl std::fmt::Debug for SearchCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchCache")
            .field("keys", &self.entries.len())
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl SearchCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    #[must_use]
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the live entry for `key` with `meta.cached` set.
    ///
    /// An expired entry counts as a miss and is removed.
    pub fn get(&self, key: &str) -> Option<SearchResponse> {
        let now = self.clock.now();
        let live = self
            .entries
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.response.clone());

        let Some(mut response) = live else {
            // The read guard above is released before touching the shard again.
            self.entries.remove_if(key, |_, entry| entry.expires_at <= now);
            self.misses.fetch_add(1, Ordering::Relaxed);
            return None;
        };

        self.hits.fetch_add(1, Ordering::Relaxed);
        response.meta.cached = true;
        Some(response)
    }

    /// Stores `response` under `key`, replacing any previous entry and
    /// restarting its TTL. The stored copy always has `meta.cached` cleared.
    pub fn set(&self, key: String, mut response: SearchResponse) {
        response.meta.cached = false;
        let expires_at = self.clock.now() + self.ttl;
        self.entries.insert(
            key,
            CacheEntry {
                response,
                expires_at,
            },
        );
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            keys: self.entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Drops every expired entry, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut removed = 0;
        self.entries.retain(|_, entry| {
            let keep = entry.expires_at > now;
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    /// Purges expired entries every `period` until the cache is dropped.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_sweeper(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let cache: Weak<Self> = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(cache) = cache.upgrade() else {
                    tracing::debug!("search cache dropped, stopping sweeper");
                    break;
                };
                let removed = cache.purge_expired();
                if removed > 0 {
                    tracing::debug!(
                        removed,
                        remaining = cache.entries.len(),
                        "purged expired cache entries"
                    );
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use valyux_core::{Platform, PlatformStatus, SearchMeta, StatusMap};

    use super::*;
    use crate::clock::ManualClock;

    fn response(query: &str) -> SearchResponse {
        let mut platform_status = StatusMap::new();
        platform_status.insert(Platform::Blinkit, PlatformStatus::Success);
        SearchResponse {
            query: query.to_string(),
            results: Vec::new(),
            meta: SearchMeta {
                cached: false,
                fetched_at: Utc::now(),
                total_results: 0,
                platform_status,
            },
        }
    }

    fn cache_with_clock(ttl_secs: u64) -> (SearchCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let cache = SearchCache::with_clock(Duration::from_secs(ttl_secs), clock.clone());
        (cache, clock)
    }

    #[test]
    fn cache_key_normalizes_both_parts() {
        assert_eq!(build_cache_key("Amul  MILK!", " New Delhi "), "search:amul milk:new delhi");
        assert_eq!(
            build_cache_key("amul milk", "new delhi"),
            build_cache_key(&normalize("Amul  MILK!"), &normalize(" New Delhi "))
        );
    }

    #[test]
    fn get_returns_stored_value_flagged_as_cached() {
        let (cache, _clock) = cache_with_clock(600);
        let stored = response("milk");
        cache.set("search:milk:delhi".to_string(), stored.clone());

        let hit = cache.get("search:milk:delhi").expect("entry should be live");
        assert!(hit.meta.cached);
        let mut expected = stored;
        expected.meta.cached = true;
        assert_eq!(hit, expected);
    }

    #[test]
    fn set_clears_cached_flag_on_stored_copy() {
        let (cache, _clock) = cache_with_clock(600);
        let mut flagged = response("milk");
        flagged.meta.cached = true;
        cache.set("k".to_string(), flagged);

        let entry = cache.entries.get("k").expect("entry stored");
        assert!(!entry.response.meta.cached);
    }

    #[test]
    fn entry_expires_after_ttl_without_a_sweep() {
        let (cache, clock) = cache_with_clock(600);
        cache.set("k".to_string(), response("milk"));

        clock.advance(Duration::from_secs(599));
        assert!(cache.get("k").is_some());

        clock.advance(Duration::from_secs(1));
        assert!(cache.get("k").is_none());
        assert_eq!(cache.stats().keys, 0, "expired entry is dropped on lookup");
    }

    #[test]
    fn set_restarts_ttl() {
        let (cache, clock) = cache_with_clock(10);
        cache.set("k".to_string(), response("milk"));
        clock.advance(Duration::from_secs(8));
        cache.set("k".to_string(), response("milk"));
        clock.advance(Duration::from_secs(8));
        assert!(cache.get("k").is_some());
    }

    #[test]
    fn stats_count_hits_and_misses() {
        let (cache, _clock) = cache_with_clock(600);
        assert!(cache.get("missing").is_none());
        cache.set("k".to_string(), response("milk"));
        assert!(cache.get("k").is_some());
        assert!(cache.get("k").is_some());

        assert_eq!(
            cache.stats(),
            CacheStats {
                keys: 1,
                hits: 2,
                misses: 1,
            }
        );
    }

    #[test]
    fn purge_removes_only_expired_entries() {
        let (cache, clock) = cache_with_clock(10);
        cache.set("old".to_string(), response("milk"));
        clock.advance(Duration::from_secs(6));
        cache.set("new".to_string(), response("atta"));
        clock.advance(Duration::from_secs(5));

        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.stats().keys, 1);
        assert!(cache.get("new").is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn sweeper_purges_and_stops_when_cache_is_dropped() {
        let clock = Arc::new(ManualClock::new());
        let cache = Arc::new(SearchCache::with_clock(Duration::from_secs(1), clock.clone()));
        cache.set("k".to_string(), response("milk"));
        clock.advance(Duration::from_secs(2));

        let handle = cache.spawn_sweeper(Duration::from_secs(30));
        tokio::time::sleep(Duration::from_secs(31)).await;
        assert_eq!(cache.stats().keys, 0);

        drop(cache);
        let stopped = tokio::time::timeout(Duration::from_secs(60), handle).await;
        assert!(stopped.is_ok(), "sweeper should exit once the cache is gone");
    }
}
