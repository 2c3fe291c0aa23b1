//! Listing and product types shared by the provider, matcher, and server.
//!
//! ## Lifecycle
//!
//! A [`RawListing`] is one platform's view of a product for a single query.
//! Listings exist only until matching, which folds them into
//! [`UnifiedProduct`]s. A [`SearchResponse`] wraps the matched products and is
//! the unit stored in the search cache.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::platforms::Platform;

/// Outcome of querying one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformStatus {
    Success,
    Error,
    Timeout,
}

/// Per-platform status, keyed in [`Platform`] order for stable JSON output.
pub type StatusMap = BTreeMap<Platform, PlatformStatus>;

/// A single product as returned by one platform, before cross-platform matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListing {
    pub name: String,
    pub brand: String,
    pub price: f64,
    /// MRP / pre-discount price. Equal to `price` when no discount applies.
    pub original_price: f64,
    /// Pack size as printed by the platform, e.g. `"500 ml"`.
    pub quantity: String,
    pub image_url: String,
    pub delivery_time: String,
    pub in_stock: bool,
    pub platform: Platform,
    /// Deep link to the product on the platform.
    pub product_url: String,
}

/// One platform's offer inside a [`UnifiedProduct`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEntry {
    pub platform: Platform,
    pub price: f64,
    pub original_price: f64,
    pub delivery_time: String,
    pub in_stock: bool,
    pub product_url: String,
}

impl From<&RawListing> for PriceEntry {
    fn from(listing: &RawListing) -> Self {
        Self {
            platform: listing.platform,
            price: listing.price,
            original_price: listing.original_price,
            delivery_time: listing.delivery_time.clone(),
            in_stock: listing.in_stock,
            product_url: listing.product_url.clone(),
        }
    }
}

/// The same product as sold across several platforms.
///
/// Holds at most one [`PriceEntry`] per platform, sorted by ascending price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedProduct {
    /// Synthetic, per-response id such as `"prod_1"`.
    pub id: String,
    pub name: String,
    pub brand: String,
    pub quantity: String,
    pub image_url: String,
    pub category: String,
    pub platform_prices: Vec<PriceEntry>,
}

impl UnifiedProduct {
    /// Cheapest offer, if any platform carries the product.
    #[must_use]
    pub fn best_price(&self) -> Option<&PriceEntry> {
        self.platform_prices.first()
    }

    #[must_use]
    pub fn price_on(&self, platform: Platform) -> Option<f64> {
        self.platform_prices
            .iter()
            .find(|entry| entry.platform == platform)
            .map(|entry| entry.price)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMeta {
    /// `true` only when this particular lookup was served from cache.
    pub cached: bool,
    pub fetched_at: DateTime<Utc>,
    pub total_results: usize,
    pub platform_status: StatusMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<UnifiedProduct>,
    pub meta: SearchMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> UnifiedProduct {
        UnifiedProduct {
            id: "prod_1".to_string(),
            name: "Amul Taaza Toned Milk".to_string(),
            brand: "Amul".to_string(),
            quantity: "500 ml".to_string(),
            image_url: String::new(),
            category: "Dairy".to_string(),
            platform_prices: vec![
                PriceEntry {
                    platform: Platform::Zepto,
                    price: 29.0,
                    original_price: 31.0,
                    delivery_time: "8 mins".to_string(),
                    in_stock: true,
                    product_url: String::new(),
                },
                PriceEntry {
                    platform: Platform::Blinkit,
                    price: 31.0,
                    original_price: 31.0,
                    delivery_time: "10 mins".to_string(),
                    in_stock: true,
                    product_url: String::new(),
                },
            ],
        }
    }

    #[test]
    fn unified_product_serializes_camel_case() {
        let json = serde_json::to_value(sample_product()).unwrap();
        assert_eq!(json["imageUrl"], "");
        assert_eq!(json["platformPrices"][0]["platform"], "Zepto");
        assert_eq!(json["platformPrices"][0]["originalPrice"], 31.0);
        assert_eq!(json["platformPrices"][1]["inStock"], true);
    }

    #[test]
    fn price_on_finds_platform_entry() {
        let product = sample_product();
        assert_eq!(product.price_on(Platform::Blinkit), Some(31.0));
        assert_eq!(product.price_on(Platform::Jiomart), None);
        assert_eq!(
            product.best_price().map(|e| e.platform),
            Some(Platform::Zepto)
        );
    }

    #[test]
    fn search_meta_serializes_status_map_with_platform_keys() {
        let mut platform_status = StatusMap::new();
        platform_status.insert(Platform::Blinkit, PlatformStatus::Success);
        platform_status.insert(Platform::Zepto, PlatformStatus::Timeout);
        let meta = SearchMeta {
            cached: false,
            fetched_at: Utc::now(),
            total_results: 0,
            platform_status,
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["platformStatus"]["Blinkit"], "success");
        assert_eq!(json["platformStatus"]["Zepto"], "timeout");
        assert_eq!(json["totalResults"], 0);
        assert!(json["fetchedAt"].is_string());
    }
}
