//! Registry of the quick-commerce platforms listings can come from.

use serde::{Deserialize, Serialize};

/// Delivery estimate used when neither the listing nor the platform has one.
pub const DEFAULT_DELIVERY_TIME: &str = "15 mins";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Platform {
    BigBasket,
    Blinkit,
    Instamart,
    Jiomart,
    Zepto,
}

/// Static presentation and fallback data for a [`Platform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformMeta {
    pub display_name: &'static str,
    pub base_url: &'static str,
    pub avg_delivery_time: &'static str,
    /// Badge color for frontend chips.
    pub color: &'static str,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::BigBasket,
        Platform::Blinkit,
        Platform::Instamart,
        Platform::Jiomart,
        Platform::Zepto,
    ];

    /// Canonical name, identical to the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::BigBasket => "BigBasket",
            Platform::Blinkit => "Blinkit",
            Platform::Instamart => "Instamart",
            Platform::Jiomart => "Jiomart",
            Platform::Zepto => "Zepto",
        }
    }

    /// Lowercase identifier sent to the upstream provider.
    #[must_use]
    pub fn wire_name(self) -> String {
        self.as_str().to_lowercase()
    }

    #[must_use]
    pub fn meta(self) -> PlatformMeta {
        match self {
            Platform::Blinkit => PlatformMeta {
                display_name: "Blinkit",
                base_url: "https://blinkit.com",
                avg_delivery_time: "10 mins",
                color: "#F8CB46",
            },
            Platform::Zepto => PlatformMeta {
                display_name: "Zepto",
                base_url: "https://www.zeptonow.com",
                avg_delivery_time: "8 mins",
                color: "#7B2D8E",
            },
            Platform::BigBasket => PlatformMeta {
                display_name: "BigBasket",
                base_url: "https://www.bigbasket.com",
                avg_delivery_time: "15 mins",
                color: "#84C225",
            },
            Platform::Instamart => PlatformMeta {
                display_name: "Swiggy Instamart",
                base_url: "https://www.swiggy.com/instamart",
                avg_delivery_time: "12 mins",
                color: "#FC8019",
            },
            Platform::Jiomart => PlatformMeta {
                display_name: "JioMart",
                base_url: "https://www.jiomart.com",
                avg_delivery_time: "20 mins",
                color: "#0078AD",
            },
        }
    }

    /// Resolves the many spellings providers use for a platform.
    ///
    /// Matching is case-insensitive after trimming. Returns `None` for
    /// anything unrecognized; callers skip such listings.
    #[must_use]
    pub fn from_alias(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "blinkit" => Some(Platform::Blinkit),
            "zepto" => Some(Platform::Zepto),
            "bigbasket" | "big basket" => Some(Platform::BigBasket),
            "instamart" | "swiggy instamart" | "swiggy" => Some(Platform::Instamart),
            "jiomart" | "jio mart" => Some(Platform::Jiomart),
            _ => None,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_alias_accepts_known_spellings() {
        assert_eq!(Platform::from_alias("Big Basket"), Some(Platform::BigBasket));
        assert_eq!(Platform::from_alias("  SWIGGY "), Some(Platform::Instamart));
        assert_eq!(
            Platform::from_alias("swiggy instamart"),
            Some(Platform::Instamart)
        );
        assert_eq!(Platform::from_alias("Jio Mart"), Some(Platform::Jiomart));
        assert_eq!(Platform::from_alias("zepto"), Some(Platform::Zepto));
    }

    #[test]
    fn from_alias_rejects_unknown() {
        assert_eq!(Platform::from_alias("dunzo"), None);
        assert_eq!(Platform::from_alias(""), None);
    }

    #[test]
    fn wire_name_is_lowercase() {
        assert_eq!(Platform::BigBasket.wire_name(), "bigbasket");
    }

    #[test]
    fn serializes_as_canonical_name() {
        let json = serde_json::to_string(&Platform::Jiomart).unwrap();
        assert_eq!(json, "\"Jiomart\"");
    }
}
