//! Built-in catalog served when no provider credential is configured.
//!
//! Keeps the match/cache pipeline exercisable without network access. Output
//! is a pure function of the query.

use reqwest::Url;
use valyux_core::{Platform, PlatformStatus, RawListing, StatusMap};

struct CatalogProduct {
    name: &'static str,
    brand: &'static str,
    quantity: &'static str,
    image_url: &'static str,
    /// `(platform, price, original_price)`
    prices: &'static [(Platform, f64, f64)],
}

const MILK: &[CatalogProduct] = &[
    CatalogProduct {
        name: "Amul Taaza Toned Fresh Milk",
        brand: "Amul",
        quantity: "500 ml",
        image_url: "https://cdn.grofers.com/cdn-cgi/image/f=auto,fit=scale-down,q=70,metadata=none,w=270/app/assets/products/sliding_images/jpeg/bb47c32e-48d5-4cbb-a0e5-abd2f7db8e5c.jpg",
        prices: &[
            (Platform::Blinkit, 31.0, 31.0),
            (Platform::Zepto, 30.0, 31.0),
            (Platform::BigBasket, 31.0, 31.0),
            (Platform::Instamart, 30.0, 31.0),
            (Platform::Jiomart, 29.0, 31.0),
        ],
    },
    CatalogProduct {
        name: "Amul Gold Full Cream Milk",
        brand: "Amul",
        quantity: "500 ml",
        image_url: "https://cdn.grofers.com/cdn-cgi/image/f=auto,fit=scale-down,q=70,metadata=none,w=270/app/assets/products/sliding_images/jpeg/84a3ca76-5880-42a8-8ff6-a5e93a787498.jpg",
        prices: &[
            (Platform::Blinkit, 35.0, 36.0),
            (Platform::Zepto, 34.0, 36.0),
            (Platform::BigBasket, 36.0, 36.0),
            (Platform::Instamart, 35.0, 36.0),
            (Platform::Jiomart, 34.0, 36.0),
        ],
    },
    CatalogProduct {
        name: "Mother Dairy Full Cream Milk",
        brand: "Mother Dairy",
        quantity: "500 ml",
        image_url: "https://cdn.grofers.com/cdn-cgi/image/f=auto,fit=scale-down,q=70,metadata=none,w=270/app/assets/products/sliding_images/jpeg/5c56d3b2-4ed1-4bc4-87f7-00d82bfcc9a7.jpg",
        prices: &[
            (Platform::Blinkit, 32.0, 33.0),
            (Platform::Zepto, 31.0, 33.0),
            (Platform::BigBasket, 33.0, 33.0),
            (Platform::Instamart, 32.0, 33.0),
        ],
    },
    CatalogProduct {
        name: "Nestle a+ Toned Milk",
        brand: "Nestle",
        quantity: "500 ml",
        image_url: "",
        prices: &[
            (Platform::Blinkit, 33.0, 34.0),
            (Platform::Zepto, 32.0, 34.0),
            (Platform::BigBasket, 34.0, 34.0),
        ],
    },
];

const ATTA: &[CatalogProduct] = &[CatalogProduct {
    name: "Aashirvaad Superior MP Atta",
    brand: "Aashirvaad",
    quantity: "5 kg",
    image_url: "https://cdn.grofers.com/cdn-cgi/image/f=auto,fit=scale-down,q=70,metadata=none,w=270/app/assets/products/sliding_images/jpeg/ccb95f72-5441-4b0e-9cbb-d0e02a11c13d.jpg",
    prices: &[
        (Platform::Blinkit, 294.0, 319.0),
        (Platform::Zepto, 289.0, 319.0),
        (Platform::BigBasket, 299.0, 319.0),
        (Platform::Instamart, 295.0, 319.0),
        (Platform::Jiomart, 285.0, 319.0),
    ],
}];

const RICE: &[CatalogProduct] = &[CatalogProduct {
    name: "India Gate Basmati Rice - Super",
    brand: "India Gate",
    quantity: "5 kg",
    image_url: "",
    prices: &[
        (Platform::Blinkit, 449.0, 500.0),
        (Platform::Zepto, 439.0, 500.0),
        (Platform::BigBasket, 455.0, 500.0),
        (Platform::Instamart, 445.0, 500.0),
        (Platform::Jiomart, 430.0, 500.0),
    ],
}];

const BREAD: &[CatalogProduct] = &[CatalogProduct {
    name: "Harvest Gold White Bread",
    brand: "Harvest Gold",
    quantity: "400 g",
    image_url: "",
    prices: &[
        (Platform::Blinkit, 40.0, 45.0),
        (Platform::Zepto, 38.0, 45.0),
        (Platform::BigBasket, 42.0, 45.0),
        (Platform::Instamart, 40.0, 45.0),
        (Platform::Jiomart, 39.0, 45.0),
    ],
}];

const SUGAR: &[CatalogProduct] = &[CatalogProduct {
    name: "Trust Classic Sulphurless Sugar",
    brand: "Trust",
    quantity: "1 kg",
    image_url: "",
    prices: &[
        (Platform::Blinkit, 47.0, 50.0),
        (Platform::Zepto, 45.0, 50.0),
        (Platform::BigBasket, 48.0, 50.0),
        (Platform::Instamart, 46.0, 50.0),
        (Platform::Jiomart, 44.0, 50.0),
    ],
}];

const OIL: &[CatalogProduct] = &[CatalogProduct {
    name: "Fortune Refined Sunflower Oil",
    brand: "Fortune",
    quantity: "1 L",
    image_url: "",
    prices: &[
        (Platform::Blinkit, 155.0, 175.0),
        (Platform::Zepto, 149.0, 175.0),
        (Platform::BigBasket, 159.0, 175.0),
        (Platform::Instamart, 152.0, 175.0),
        (Platform::Jiomart, 148.0, 175.0),
    ],
}];

/// Checked in order; the first keyword contained in the query wins.
const CATALOG: &[(&str, &[CatalogProduct])] = &[
    ("milk", MILK),
    ("atta", ATTA),
    ("rice", RICE),
    ("bread", BREAD),
    ("sugar", SUGAR),
    ("oil", OIL),
];

const GENERIC_PRICES: &[(Platform, f64, f64)] = &[
    (Platform::Blinkit, 99.0, 120.0),
    (Platform::Zepto, 95.0, 120.0),
    (Platform::BigBasket, 105.0, 120.0),
    (Platform::Instamart, 98.0, 120.0),
    (Platform::Jiomart, 92.0, 120.0),
];

/// Listings for `query` from the built-in catalog, with every platform
/// reported as [`PlatformStatus::Success`].
///
/// Unknown queries get one generic product priced on all platforms.
#[must_use]
pub fn offline_listings(query: &str) -> (Vec<RawListing>, StatusMap) {
    let lower = query.trim().to_lowercase();
    let status: StatusMap = Platform::ALL
        .iter()
        .map(|&p| (p, PlatformStatus::Success))
        .collect();

    let matched = CATALOG
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, products)| *products);

    let listings = match matched {
        Some(products) => products
            .iter()
            .flat_map(|product| {
                product.prices.iter().map(move |&(platform, price, original)| {
                    listing(
                        product.name.to_string(),
                        product.brand,
                        product.quantity,
                        product.image_url,
                        (platform, price, original),
                        query,
                    )
                })
            })
            .collect(),
        None => {
            let name = format!("{} (Search Result)", capitalize(&lower));
            GENERIC_PRICES
                .iter()
                .map(|&offer| listing(name.clone(), "", "", "", offer, query))
                .collect()
        }
    };

    (listings, status)
}

fn listing(
    name: String,
    brand: &str,
    quantity: &str,
    image_url: &str,
    (platform, price, original_price): (Platform, f64, f64),
    query: &str,
) -> RawListing {
    RawListing {
        name,
        brand: brand.to_string(),
        price,
        original_price,
        quantity: quantity.to_string(),
        image_url: image_url.to_string(),
        delivery_time: platform.meta().avg_delivery_time.to_string(),
        in_stock: true,
        platform,
        product_url: search_url(platform, query),
    }
}

/// Platform search page for `query`, percent-encoded via `reqwest::Url`.
fn search_url(platform: Platform, query: &str) -> String {
    let base = platform.meta().base_url;
    match Url::parse(&format!("{base}/search")) {
        Ok(mut url) => {
            url.query_pairs_mut().append_pair("q", query);
            url.to_string()
        }
        Err(_) => format!("{base}/search"),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn milk_query_returns_catalog_listings() {
        let (listings, status) = offline_listings("Toned Milk");
        // 5 + 5 + 4 + 3 platform offers across the four milk products.
        assert_eq!(listings.len(), 17);
        assert!(listings.iter().all(|l| l.name.contains("Milk")));
        assert!(status.values().all(|s| *s == PlatformStatus::Success));
        assert_eq!(status.len(), Platform::ALL.len());
    }

    #[test]
    fn unknown_query_returns_generic_product() {
        let (listings, _) = offline_listings("paneer tikka");
        assert_eq!(listings.len(), GENERIC_PRICES.len());
        assert_eq!(listings[0].name, "Paneer tikka (Search Result)");
        assert!(listings.iter().all(|l| l.brand.is_empty()));
    }

    #[test]
    fn product_url_encodes_query() {
        let (listings, _) = offline_listings("basmati rice");
        let blinkit = listings
            .iter()
            .find(|l| l.platform == Platform::Blinkit)
            .expect("blinkit listing");
        assert_eq!(
            blinkit.product_url,
            "https://blinkit.com/search?q=basmati+rice"
        );
    }

    #[test]
    fn delivery_time_comes_from_platform_meta() {
        let (listings, _) = offline_listings("sugar");
        let zepto = listings
            .iter()
            .find(|l| l.platform == Platform::Zepto)
            .expect("zepto listing");
        assert_eq!(zepto.delivery_time, "8 mins");
    }

    #[test]
    fn output_is_deterministic() {
        assert_eq!(offline_listings("atta"), offline_listings("atta"));
    }
}
