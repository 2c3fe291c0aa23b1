//! HTTP adapter for the price-data provider's batched search endpoint.
//!
//! One `POST {base_url}/search` covers every platform. Failures are never
//! propagated: they collapse into an empty listing set with each platform
//! marked `error` or `timeout`. There is no retry; callers decide whether
//! stale data is better than none.

use std::time::{Duration, Instant};

use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::Value;
use valyux_core::{AppConfig, Platform, PlatformStatus, StatusMap};

use crate::error::ProviderError;
use crate::offline::offline_listings;
use crate::shapes::parse_response;
use crate::source::{FetchOutcome, ListingSource};

const USER_AGENT: &str = "valyux/0.1 (price-comparison)";

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    /// `None` selects the built-in offline catalog.
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    /// Maximum listings requested per platform.
    pub limit: u32,
}

impl ProviderConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.provider_base_url.clone(),
            api_key: config.provider_api_key.clone(),
            timeout_secs: config.provider_timeout_secs,
            limit: config.provider_limit,
        }
    }
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    locality: &'a str,
    sources: Vec<String>,
    limit: u32,
}

enum Mode {
    Live { api_key: String, search_url: Url },
    Offline,
}

pub struct ProviderClient {
    client: Client,
    mode: Mode,
    limit: u32,
}

impl ProviderClient {
    /// Builds the adapter. Without an API key it serves the offline catalog
    /// and never touches the network.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Http`] if the `reqwest::Client` cannot be constructed.
    /// - [`ProviderError::InvalidBaseUrl`] if `base_url` does not parse
    ///   (only checked in live mode).
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs.min(10)))
            .user_agent(USER_AGENT)
            .build()?;

        let mode = match config.api_key.as_deref().filter(|k| !k.is_empty()) {
            Some(api_key) => Mode::Live {
                api_key: api_key.to_owned(),
                search_url: search_url(&config.base_url)?,
            },
            None => {
                tracing::warn!("no provider API key configured; serving offline catalog");
                Mode::Offline
            }
        };

        Ok(Self {
            client,
            mode,
            limit: config.limit,
        })
    }

    #[must_use]
    pub fn is_offline(&self) -> bool {
        matches!(self.mode, Mode::Offline)
    }

    async fn request(
        &self,
        api_key: &str,
        url: &Url,
        query: &str,
        locality: &str,
    ) -> Result<Value, ProviderError> {
        let body = SearchRequest {
            query,
            locality,
            sources: Platform::ALL.iter().map(|p| p.wire_name()).collect(),
            limit: self.limit,
        };

        let response = self
            .client
            .post(url.clone())
            .bearer_auth(api_key)
            .header("X-Api-Key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_send_error(e, url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| classify_send_error(e, url))?;
        serde_json::from_str(&text).map_err(|e| ProviderError::Deserialize {
            context: format!("search response for \"{query}\""),
            source: e,
        })
    }
}

impl ListingSource for ProviderClient {
    async fn fetch_listings(&self, query: &str, locality: &str) -> FetchOutcome {
        let (api_key, url) = match &self.mode {
            Mode::Offline => {
                let (listings, platform_status) = offline_listings(query);
                return FetchOutcome {
                    listings,
                    platform_status,
                };
            }
            Mode::Live {
                api_key,
                search_url,
            } => (api_key, search_url),
        };

        tracing::info!(query, locality, "calling price provider");
        let started = Instant::now();

        match self.request(api_key, url, query, locality).await {
            Ok(body) => {
                let (listings, platform_status) = parse_response(&body);
                tracing::info!(
                    query,
                    listings = listings.len(),
                    elapsed_ms = elapsed_ms(started),
                    "provider responded"
                );
                FetchOutcome {
                    listings,
                    platform_status,
                }
            }
            Err(e) => {
                let failure = if e.is_timeout() {
                    PlatformStatus::Timeout
                } else {
                    PlatformStatus::Error
                };
                tracing::error!(
                    query,
                    error = %e,
                    elapsed_ms = elapsed_ms(started),
                    "provider call failed"
                );
                FetchOutcome {
                    listings: Vec::new(),
                    platform_status: uniform_status(failure),
                }
            }
        }
    }
}

/// Every platform set to `status`.
#[must_use]
pub fn uniform_status(status: PlatformStatus) -> StatusMap {
    Platform::ALL.iter().map(|&p| (p, status)).collect()
}

/// Appends `/search` to `base_url`, keeping any existing path prefix such as `/v1`.
fn search_url(base_url: &str) -> Result<Url, ProviderError> {
    let normalised = format!("{}/", base_url.trim().trim_end_matches('/'));
    let base = Url::parse(&normalised).map_err(|e| ProviderError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason: e.to_string(),
    })?;
    base.join("search")
        .map_err(|e| ProviderError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })
}

fn classify_send_error(error: reqwest::Error, url: &Url) -> ProviderError {
    if error.is_timeout() {
        ProviderError::Timeout {
            url: url.to_string(),
        }
    } else {
        ProviderError::Http(error)
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
