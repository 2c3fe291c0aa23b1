//! Cart savings analysis.
//!
//! A natural-language advisor may summarize a cart, but it is an external
//! collaborator that can fail or return garbage. [`analyze_cart`] always
//! produces an answer: the advisor's reply when it is usable, otherwise the
//! arithmetic in [`fallback_analysis`].

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::platforms::Platform;
use crate::products::UnifiedProduct;

const DEFAULT_RECOMMENDATION: &str = "See your best options above.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: UnifiedProduct,
    pub quantity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceTotal {
    pub source: Platform,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartAnalysis {
    /// Cheapest cart when every item is bought from a single platform.
    pub cheapest_single_source_total: SourceTotal,
    /// Cart total when each item is bought wherever it is cheapest.
    pub optimal_split_total: f64,
    pub savings_vs_highest: f64,
    pub recommendation: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("advisor unavailable: {0}")]
    Unavailable(String),

    #[error("advisor returned an unusable reply: {0}")]
    InvalidReply(String),
}

/// Seam for an external cart advisor.
///
/// Implementations return the advisor's raw JSON reply; validation happens in
/// [`sanitize_analysis`].
pub trait CartAdvisor: Send + Sync {
    fn advise<'a>(&'a self, items: &'a [CartItem]) -> BoxFuture<'a, Result<Value, AdvisorError>>;
}

/// Returns the advisor's analysis when it is reachable and well-formed,
/// otherwise the locally computed [`fallback_analysis`].
pub async fn analyze_cart(advisor: Option<&dyn CartAdvisor>, items: &[CartItem]) -> CartAnalysis {
    let Some(advisor) = advisor else {
        return fallback_analysis(items);
    };
    if items.is_empty() {
        return fallback_analysis(items);
    }

    match advisor.advise(items).await {
        Ok(reply) => sanitize_analysis(&reply).unwrap_or_else(|| {
            tracing::warn!("cart advisor reply failed validation; using fallback analysis");
            fallback_analysis(items)
        }),
        Err(e) => {
            tracing::warn!(error = %e, "cart advisor failed; using fallback analysis");
            fallback_analysis(items)
        }
    }
}

/// Deterministic cart analysis. Never fails.
///
/// A platform that does not list an item contributes `0` for that item, so
/// totals for platforms with gaps understate the real cost. Ties on the
/// cheapest total go to the later platform in [`Platform::ALL`].
#[must_use]
pub fn fallback_analysis(items: &[CartItem]) -> CartAnalysis {
    let totals: Vec<SourceTotal> = Platform::ALL
        .iter()
        .map(|&platform| SourceTotal {
            source: platform,
            total: items
                .iter()
                .map(|item| {
                    item.product.price_on(platform).unwrap_or(0.0) * f64::from(item.quantity)
                })
                .sum(),
        })
        .collect();

    let optimal_split_total: f64 = items
        .iter()
        .map(|item| {
            let min_price = item
                .product
                .platform_prices
                .iter()
                .map(|entry| entry.price)
                .reduce(f64::min)
                .unwrap_or(0.0);
            min_price * f64::from(item.quantity)
        })
        .sum();

    let cheapest = totals
        .iter()
        .copied()
        .reduce(|best, next| if next.total <= best.total { next } else { best })
        .unwrap_or(SourceTotal {
            source: Platform::ALL[0],
            total: 0.0,
        });

    let highest = totals.iter().map(|t| t.total).fold(0.0, f64::max);

    CartAnalysis {
        cheapest_single_source_total: cheapest,
        optimal_split_total,
        savings_vs_highest: highest - optimal_split_total,
        recommendation: format!(
            "Based on your cart, buying from {} is your best bet for a single-platform order, \
             but splitting your order could save you even more!",
            cheapest.source
        ),
    }
}

/// Validates an untrusted advisor reply.
///
/// Accepts numbers or numeric strings, tolerates the legacy
/// `cheapestPlatformTotal`/`platform` key names, defaults an unknown platform
/// to the first one, and rejects the reply when any number is non-finite.
#[must_use]
pub fn sanitize_analysis(raw: &Value) -> Option<CartAnalysis> {
    let obj = raw.as_object()?;

    let cheapest = obj
        .get("cheapestSingleSourceTotal")
        .or_else(|| obj.get("cheapestPlatformTotal"))
        .and_then(Value::as_object);

    let source = cheapest
        .and_then(|c| c.get("source").or_else(|| c.get("platform")))
        .and_then(Value::as_str)
        .and_then(Platform::from_alias)
        .unwrap_or(Platform::ALL[0]);

    let total = match cheapest.and_then(|c| c.get("total")) {
        None | Some(Value::Null) => 0.0,
        Some(v) => lenient_number(v)?,
    };
    let optimal_split_total = obj
        .get("optimalSplitTotal")
        .map_or(Some(0.0), lenient_number_or_zero)?;
    let savings_vs_highest = obj
        .get("savingsVsHighest")
        .map_or(Some(0.0), lenient_number_or_zero)?;

    let recommendation = obj
        .get("recommendation")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_RECOMMENDATION)
        .to_string();

    Some(CartAnalysis {
        cheapest_single_source_total: SourceTotal { source, total },
        optimal_split_total,
        savings_vs_highest,
        recommendation,
    })
}

/// Parses a number or numeric string. `None` for non-numeric or non-finite values.
fn lenient_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Like [`lenient_number`], but unparseable input counts as `0`. Non-finite
/// numeric strings (`"inf"`, `"NaN"`) still reject the reply.
fn lenient_number_or_zero(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Some(n),
            Ok(_) => None,
            Err(_) => Some(0.0),
        },
        Value::Number(_) => lenient_number(value),
        _ => Some(0.0),
    }
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;
