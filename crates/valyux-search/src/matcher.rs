//! Cross-platform product matching.
//!
//! Listings are clustered greedily in arrival order: each listing joins the
//! best-scoring open group at or above the threshold, or opens a new group.
//! Grouping therefore depends on input order when scores sit near the
//! threshold. Set [`MatchConfig::presort`] to sort listings by normalized name
//! and platform first when permutation-stable output matters.

use std::cmp::Reverse;

use valyux_core::{classify, normalize, AppConfig, PriceEntry, RawListing, UnifiedProduct};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchConfig {
    /// Minimum total score for a listing to join an existing group.
    pub threshold: f64,
    /// Added when pack-size strings are identical.
    pub quantity_bonus: f64,
    /// Added when brands match case-insensitively.
    pub brand_bonus: f64,
    pub presort: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: 0.55,
            quantity_bonus: 0.15,
            brand_bonus: 0.10,
            presort: false,
        }
    }
}

impl MatchConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            threshold: config.match_threshold,
            quantity_bonus: config.match_quantity_bonus,
            brand_bonus: config.match_brand_bonus,
            presort: false,
        }
    }
}

struct Group {
    key: String,
    name: String,
    brand: String,
    quantity: String,
    image_url: String,
    /// At most one listing per platform.
    members: Vec<RawListing>,
}

impl Group {
    fn open(key: String, listing: RawListing) -> Self {
        Self {
            key,
            name: listing.name.clone(),
            brand: listing.brand.clone(),
            quantity: listing.quantity.clone(),
            image_url: listing.image_url.clone(),
            members: vec![listing],
        }
    }

    fn score(&self, key: &str, listing: &RawListing, config: &MatchConfig) -> f64 {
        let mut score = strsim::sorensen_dice(&self.key, key);
        if !listing.quantity.is_empty() && listing.quantity == self.quantity {
            score += config.quantity_bonus;
        }
        if !listing.brand.is_empty() && listing.brand.eq_ignore_ascii_case(&self.brand) {
            score += config.brand_bonus;
        }
        score
    }

    fn merge(&mut self, listing: RawListing) {
        if self.image_url.is_empty() && !listing.image_url.is_empty() {
            self.image_url.clone_from(&listing.image_url);
        }
        match self
            .members
            .iter_mut()
            .find(|member| member.platform == listing.platform)
        {
            Some(existing) => {
                if listing.price < existing.price {
                    *existing = listing;
                }
            }
            None => self.members.push(listing),
        }
    }

    fn into_product(self, id: String) -> UnifiedProduct {
        let mut platform_prices: Vec<PriceEntry> =
            self.members.iter().map(PriceEntry::from).collect();
        platform_prices.sort_by(|a, b| a.price.total_cmp(&b.price));
        UnifiedProduct {
            id,
            category: classify(&self.name).to_string(),
            name: self.name,
            brand: self.brand,
            quantity: self.quantity,
            image_url: self.image_url,
            platform_prices,
        }
    }
}

/// Folds per-platform listings into unified products.
///
/// Products are ordered by the number of platforms carrying them, most first,
/// and numbered `prod_1`, `prod_2`, ... in that order. Each product's price
/// entries are sorted cheapest first.
#[must_use]
pub fn match_listings(listings: Vec<RawListing>, config: &MatchConfig) -> Vec<UnifiedProduct> {
    let mut keyed: Vec<(String, RawListing)> = listings
        .into_iter()
        .map(|listing| (normalize(&listing.name), listing))
        .collect();
    if config.presort {
        keyed.sort_by(|(a_key, a), (b_key, b)| a_key.cmp(b_key).then(a.platform.cmp(&b.platform)));
    }

    let mut groups: Vec<Group> = Vec::new();
    for (key, listing) in keyed {
        let mut best: Option<(usize, f64)> = None;
        for (idx, group) in groups.iter().enumerate() {
            let score = group.score(&key, &listing, config);
            if score >= config.threshold && best.is_none_or(|(_, top)| score > top) {
                best = Some((idx, score));
            }
        }
        match best {
            Some((idx, _)) => groups[idx].merge(listing),
            None => groups.push(Group::open(key, listing)),
        }
    }

    groups.sort_by_key(|group| Reverse(group.members.len()));
    groups
        .into_iter()
        .enumerate()
        .map(|(idx, group)| group.into_product(format!("prod_{}", idx + 1)))
        .collect()
}

#[cfg(test)]
#[path = "matcher_test.rs"]
mod tests;
