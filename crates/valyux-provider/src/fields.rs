//! Field extraction with ordered fallback key names.
//!
//! Upstream payloads name the same field differently (`selling_price`,
//! `sale_price`, `price`). Each extractor walks its key list and returns the
//! first value that is present and non-empty. `0`, `""`, and `null` all count
//! as absent, so a zero `selling_price` falls through to `price`.

use serde_json::Value;

pub(crate) const NAME_KEYS: &[&str] = &["name", "product_name", "title"];
pub(crate) const BRAND_KEYS: &[&str] = &["brand", "brand_name"];
pub(crate) const PRICE_KEYS: &[&str] = &["selling_price", "sale_price", "price"];
pub(crate) const ORIGINAL_PRICE_KEYS: &[&str] = &["mrp", "original_price", "market_price", "price"];
pub(crate) const QUANTITY_KEYS: &[&str] = &["quantity", "weight", "pack_size", "unit"];
pub(crate) const IMAGE_KEYS: &[&str] = &["image", "image_url", "thumbnail"];
pub(crate) const DELIVERY_KEYS: &[&str] = &["delivery_time", "eta"];
pub(crate) const URL_KEYS: &[&str] = &["url", "product_url", "deep_link"];
pub(crate) const SOURCE_KEYS: &[&str] = &["platform", "source"];
pub(crate) const STOCK_KEYS: &[&str] = &["in_stock", "available"];

/// First non-empty string under any of `keys`. Numbers are stringified so a
/// numeric `quantity` such as `500` still comes through.
#[must_use]
pub fn str_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match value.get(key)? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// First positive price under any of `keys`.
///
/// Accepts JSON numbers and strings like `"31.00"`, `"₹1,299"`.
#[must_use]
pub fn price_field(value: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| {
        let price = match value.get(key)? {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => parse_price_text(s)?,
            _ => return None,
        };
        (price.is_finite() && price > 0.0).then_some(price)
    })
}

/// Stock flag: out of stock only when some key is explicitly `false`.
#[must_use]
pub fn in_stock(value: &Value) -> bool {
    !STOCK_KEYS
        .iter()
        .any(|key| value.get(key).and_then(Value::as_bool) == Some(false))
}

fn parse_price_text(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse::<f64>().ok()
}
