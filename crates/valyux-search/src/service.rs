use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use valyux_core::{SearchMeta, SearchResponse};
use valyux_provider::ListingSource;

use crate::cache::{build_cache_key, SearchCache};
use crate::matcher::{match_listings, MatchConfig};

/// Answers product searches from the cache or, on a miss, from a
/// [`ListingSource`] followed by matching.
///
/// Callers validate the query before calling [`SearchService::search`].
/// Dropping the search future before it resolves abandons the upstream call
/// and leaves the cache untouched.
#[derive(Debug)]
pub struct SearchService<S> {
    source: S,
    cache: Arc<SearchCache>,
    match_config: MatchConfig,
}

impl<S: ListingSource> SearchService<S> {
    #[must_use]
    pub fn new(source: S, cache: Arc<SearchCache>, match_config: MatchConfig) -> Self {
        Self {
            source,
            cache,
            match_config,
        }
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<SearchCache> {
        &self.cache
    }

    pub async fn search(&self, query: &str, locality: &str) -> SearchResponse {
        let key = build_cache_key(query, locality);
        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(%key, results = hit.results.len(), "search served from cache");
            return hit;
        }
        tracing::debug!(%key, "search cache miss");

        let started = Instant::now();
        let outcome = self.source.fetch_listings(query, locality).await;
        let listing_count = outcome.listings.len();
        let results = match_listings(outcome.listings, &self.match_config);

        let response = SearchResponse {
            query: query.to_string(),
            meta: SearchMeta {
                cached: false,
                fetched_at: Utc::now(),
                total_results: results.len(),
                platform_status: outcome.platform_status,
            },
            results,
        };
        tracing::info!(
            query,
            locality,
            listings = listing_count,
            products = response.results.len(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "search completed"
        );

        self.cache.set(key, response.clone());
        response
    }
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
