//! Shape sniffing for provider search responses.
//!
//! The provider does not commit to one response schema. Three shapes have been
//! observed and are all accepted:
//!
//! - **Grouped**: `{ "platform": "blinkit", "items": [ {..}, .. ] }`, one
//!   entry per platform with its listings nested.
//! - **Multi-price**: `{ "name": "..", "prices": [ { "platform": .., "price": .. }, .. ] }`,
//!   one entry per product with an embedded price per platform.
//! - **Flat**: `{ "platform": "zepto", "name": "..", "price": .. }`, one
//!   entry per listing carrying its own platform tag.
//!
//! The entry list is read from `results`, `data`, or `products` (first array
//! wins), or the body itself when it is an array. Each entry is tested
//! against [`SHAPES`] in order and handled by the first shape that matches;
//! entries that match nothing are skipped.

use serde_json::Value;
use valyux_core::{Platform, PlatformStatus, RawListing, StatusMap, DEFAULT_DELIVERY_TIME};

use crate::fields::{
    in_stock, price_field, str_field, BRAND_KEYS, DELIVERY_KEYS, IMAGE_KEYS, NAME_KEYS,
    ORIGINAL_PRICE_KEYS, PRICE_KEYS, QUANTITY_KEYS, SOURCE_KEYS, URL_KEYS,
};

const ENTRY_LIST_KEYS: &[&str] = &["results", "data", "products"];

/// What one response entry contributed.
#[derive(Debug, Default)]
struct ShapeOutput {
    /// Platforms that answered, even if with zero listings.
    platforms: Vec<Platform>,
    listings: Vec<RawListing>,
}

struct Shape {
    name: &'static str,
    matches: fn(&Value) -> bool,
    extract: fn(&Value) -> ShapeOutput,
}

/// Multi-price is tested before flat because a multi-price entry may also
/// carry a stray `platform` tag; its embedded prices are the richer signal.
const SHAPES: &[Shape] = &[
    Shape {
        name: "grouped",
        matches: is_grouped,
        extract: extract_grouped,
    },
    Shape {
        name: "multi_price",
        matches: is_multi_price,
        extract: extract_multi_price,
    },
    Shape {
        name: "flat",
        matches: is_flat,
        extract: extract_flat,
    },
];

/// Maps a provider response body to listings plus per-platform status.
///
/// Every platform starts as [`PlatformStatus::Error`] and flips to
/// [`PlatformStatus::Success`] once any entry attributes data to it, so a
/// platform missing from the response is reported as failed, not empty.
#[must_use]
pub fn parse_response(body: &Value) -> (Vec<RawListing>, StatusMap) {
    let mut status: StatusMap = Platform::ALL
        .iter()
        .map(|&p| (p, PlatformStatus::Error))
        .collect();
    let mut listings = Vec::new();

    for entry in entry_list(body) {
        let Some(shape) = SHAPES.iter().find(|shape| (shape.matches)(entry)) else {
            tracing::debug!("skipping provider entry with unrecognized shape");
            continue;
        };
        let output = (shape.extract)(entry);
        tracing::trace!(
            shape = shape.name,
            listings = output.listings.len(),
            "parsed provider entry"
        );
        for platform in output.platforms {
            status.insert(platform, PlatformStatus::Success);
        }
        listings.extend(output.listings);
    }

    (listings, status)
}

fn entry_list(body: &Value) -> &[Value] {
    if let Some(entries) = body.as_array() {
        return entries;
    }
    ENTRY_LIST_KEYS
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_array))
        .map_or(&[][..], Vec::as_slice)
}

fn source_tag(entry: &Value) -> Option<String> {
    str_field(entry, SOURCE_KEYS)
}

fn is_grouped(entry: &Value) -> bool {
    source_tag(entry).is_some() && entry.get("items").is_some_and(Value::is_array)
}

fn is_multi_price(entry: &Value) -> bool {
    str_field(entry, NAME_KEYS).is_some() && entry.get("prices").is_some_and(Value::is_array)
}

fn is_flat(entry: &Value) -> bool {
    source_tag(entry).is_some() && str_field(entry, NAME_KEYS).is_some()
}

fn resolve_platform(entry: &Value) -> Option<Platform> {
    let tag = source_tag(entry)?;
    let platform = Platform::from_alias(&tag);
    if platform.is_none() {
        tracing::debug!(source = %tag, "ignoring listing from unknown platform");
    }
    platform
}

fn extract_grouped(entry: &Value) -> ShapeOutput {
    let Some(platform) = resolve_platform(entry) else {
        return ShapeOutput::default();
    };
    let listings = entry
        .get("items")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| map_listing(item, platform))
                .collect()
        })
        .unwrap_or_default();
    ShapeOutput {
        platforms: vec![platform],
        listings,
    }
}

fn extract_flat(entry: &Value) -> ShapeOutput {
    let Some(platform) = resolve_platform(entry) else {
        return ShapeOutput::default();
    };
    ShapeOutput {
        platforms: vec![platform],
        listings: map_listing(entry, platform).into_iter().collect(),
    }
}

fn extract_multi_price(entry: &Value) -> ShapeOutput {
    let mut output = ShapeOutput::default();
    let Some(name) = str_field(entry, NAME_KEYS) else {
        return output;
    };
    let prices = entry
        .get("prices")
        .and_then(Value::as_array)
        .map_or(&[][..], Vec::as_slice);

    for price_entry in prices {
        let Some(platform) = resolve_platform(price_entry) else {
            continue;
        };
        output.platforms.push(platform);

        let Some(price) = price_field(price_entry, PRICE_KEYS) else {
            continue;
        };
        output.listings.push(RawListing {
            name: name.clone(),
            brand: str_field(entry, BRAND_KEYS).unwrap_or_default(),
            price,
            original_price: price_field(price_entry, ORIGINAL_PRICE_KEYS).unwrap_or(price),
            quantity: str_field(entry, QUANTITY_KEYS).unwrap_or_default(),
            image_url: str_field(entry, IMAGE_KEYS).unwrap_or_default(),
            delivery_time: str_field(price_entry, DELIVERY_KEYS)
                .unwrap_or_else(|| default_delivery_time(platform)),
            in_stock: in_stock(price_entry),
            platform,
            product_url: str_field(price_entry, URL_KEYS).unwrap_or_default(),
        });
    }
    output
}

/// Maps one listing object. Listings without a name or a usable price are
/// dropped: they cannot be matched or compared.
fn map_listing(raw: &Value, platform: Platform) -> Option<RawListing> {
    let name = str_field(raw, NAME_KEYS)?;
    let Some(price) = price_field(raw, PRICE_KEYS) else {
        tracing::debug!(%platform, name = %name, "dropping listing without a price");
        return None;
    };
    Some(RawListing {
        name,
        brand: str_field(raw, BRAND_KEYS).unwrap_or_default(),
        price,
        original_price: price_field(raw, ORIGINAL_PRICE_KEYS).unwrap_or(price),
        quantity: str_field(raw, QUANTITY_KEYS).unwrap_or_default(),
        image_url: str_field(raw, IMAGE_KEYS).unwrap_or_default(),
        delivery_time: str_field(raw, DELIVERY_KEYS)
            .unwrap_or_else(|| default_delivery_time(platform)),
        in_stock: in_stock(raw),
        platform,
        product_url: str_field(raw, URL_KEYS).unwrap_or_default(),
    })
}

fn default_delivery_time(platform: Platform) -> String {
    let avg = platform.meta().avg_delivery_time;
    if avg.is_empty() {
        DEFAULT_DELIVERY_TIME.to_string()
    } else {
        avg.to_string()
    }
}

#[cfg(test)]
#[path = "shapes_test.rs"]
mod tests;
