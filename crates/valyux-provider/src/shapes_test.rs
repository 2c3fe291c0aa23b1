use serde_json::json;

use super::*;

fn success_platforms(status: &StatusMap) -> Vec<Platform> {
    status
        .iter()
        .filter(|(_, s)| **s == PlatformStatus::Success)
        .map(|(p, _)| *p)
        .collect()
}

#[test]
fn grouped_shape_maps_nested_items() {
    let body = json!({
        "results": [
            {
                "platform": "blinkit",
                "items": [
                    {
                        "product_name": "Amul Taaza Toned Milk",
                        "brand_name": "Amul",
                        "selling_price": 31,
                        "mrp": 32,
                        "weight": "500 ml",
                        "thumbnail": "https://img.example/amul.jpg",
                        "deep_link": "https://blinkit.com/p/1"
                    }
                ]
            }
        ]
    });
    let (listings, status) = parse_response(&body);
    assert_eq!(listings.len(), 1);
    let listing = &listings[0];
    assert_eq!(listing.platform, Platform::Blinkit);
    assert_eq!(listing.name, "Amul Taaza Toned Milk");
    assert_eq!(listing.brand, "Amul");
    assert!((listing.price - 31.0).abs() < f64::EPSILON);
    assert!((listing.original_price - 32.0).abs() < f64::EPSILON);
    assert_eq!(listing.quantity, "500 ml");
    assert_eq!(listing.image_url, "https://img.example/amul.jpg");
    assert_eq!(listing.delivery_time, "10 mins");
    assert_eq!(listing.product_url, "https://blinkit.com/p/1");
    assert!(listing.in_stock);
    assert_eq!(success_platforms(&status), vec![Platform::Blinkit]);
    assert_eq!(status[&Platform::Zepto], PlatformStatus::Error);
}

#[test]
fn grouped_shape_with_no_items_still_marks_success() {
    let body = json!({ "results": [ { "platform": "Zepto", "items": [] } ] });
    let (listings, status) = parse_response(&body);
    assert!(listings.is_empty());
    assert_eq!(status[&Platform::Zepto], PlatformStatus::Success);
}

#[test]
fn flat_shape_reads_own_source_tag() {
    let body = json!({
        "data": [
            { "source": "Swiggy Instamart", "name": "Harvest Gold White Bread", "price": "40.00", "in_stock": false },
            { "platform": "jio mart", "title": "Harvest Gold White Bread", "sale_price": 39, "delivery_time": "1 day" }
        ]
    });
    let (listings, status) = parse_response(&body);
    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0].platform, Platform::Instamart);
    assert!(!listings[0].in_stock);
    assert!((listings[0].original_price - 40.0).abs() < f64::EPSILON);
    assert_eq!(listings[1].platform, Platform::Jiomart);
    assert_eq!(listings[1].delivery_time, "1 day");
    assert_eq!(
        success_platforms(&status),
        vec![Platform::Instamart, Platform::Jiomart]
    );
}

#[test]
fn multi_price_shape_expands_one_listing_per_platform() {
    let body = json!({
        "products": [
            {
                "name": "Fortune Refined Sunflower Oil",
                "brand": "Fortune",
                "pack_size": "1 L",
                "image_url": "https://img.example/oil.jpg",
                "prices": [
                    { "platform": "bigbasket", "selling_price": 159, "mrp": 175, "url": "https://bb.example/oil" },
                    { "platform": "zepto", "price": 149, "in_stock": false },
                    { "platform": "dunzo", "price": 120 }
                ]
            }
        ]
    });
    let (listings, status) = parse_response(&body);
    assert_eq!(listings.len(), 2, "unknown platform price must be skipped");
    assert_eq!(listings[0].platform, Platform::BigBasket);
    assert_eq!(listings[0].quantity, "1 L");
    assert_eq!(listings[0].product_url, "https://bb.example/oil");
    assert!((listings[0].original_price - 175.0).abs() < f64::EPSILON);
    assert_eq!(listings[1].platform, Platform::Zepto);
    assert!((listings[1].original_price - 149.0).abs() < f64::EPSILON);
    assert!(!listings[1].in_stock);
    assert_eq!(listings[1].delivery_time, "8 mins");
    assert_eq!(
        success_platforms(&status),
        vec![Platform::BigBasket, Platform::Zepto]
    );
}

#[test]
fn multi_price_wins_over_flat_when_both_match() {
    let body = json!({
        "results": [
            {
                "platform": "blinkit",
                "name": "Trust Classic Sulphurless Sugar",
                "price": 47,
                "prices": [
                    { "platform": "blinkit", "price": 47 },
                    { "platform": "jiomart", "price": 44 }
                ]
            }
        ]
    });
    let (listings, _) = parse_response(&body);
    assert_eq!(listings.len(), 2);
    assert_eq!(listings[1].platform, Platform::Jiomart);
}

#[test]
fn mixed_shapes_in_one_response_are_all_accepted() {
    let body = json!({
        "results": [
            { "platform": "blinkit", "items": [ { "name": "Milk", "price": 31 } ] },
            { "platform": "zepto", "name": "Milk", "price": 30 },
            { "name": "Milk", "prices": [ { "platform": "bigbasket", "price": 31 } ] }
        ]
    });
    let (listings, status) = parse_response(&body);
    assert_eq!(listings.len(), 3);
    assert_eq!(
        success_platforms(&status),
        vec![Platform::BigBasket, Platform::Blinkit, Platform::Zepto]
    );
}

#[test]
fn unrecognized_entries_are_skipped() {
    let body = json!({
        "results": [
            "just a string",
            { "sku": "123" },
            { "platform": "blinkit" },
            { "platform": "zepto", "name": "Bread", "price": 38 }
        ]
    });
    let (listings, _) = parse_response(&body);
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].platform, Platform::Zepto);
}

#[test]
fn unknown_platform_group_is_ignored() {
    let body = json!({
        "results": [ { "platform": "dunzo", "items": [ { "name": "Milk", "price": 30 } ] } ]
    });
    let (listings, status) = parse_response(&body);
    assert!(listings.is_empty());
    assert!(success_platforms(&status).is_empty());
}

#[test]
fn listings_without_price_or_name_are_dropped() {
    let body = json!({
        "results": [
            { "platform": "blinkit", "items": [
                { "name": "Milk" },
                { "price": 30 },
                { "name": "Curd", "price": 0, "sale_price": 45 }
            ] }
        ]
    });
    let (listings, status) = parse_response(&body);
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].name, "Curd");
    assert!((listings[0].price - 45.0).abs() < f64::EPSILON);
    assert_eq!(status[&Platform::Blinkit], PlatformStatus::Success);
}

#[test]
fn top_level_array_body_is_accepted() {
    let body = json!([ { "platform": "zepto", "name": "Bread", "price": 38 } ]);
    let (listings, _) = parse_response(&body);
    assert_eq!(listings.len(), 1);
}

#[test]
fn body_without_entry_list_yields_all_error() {
    let (listings, status) = parse_response(&json!({ "message": "ok" }));
    assert!(listings.is_empty());
    assert_eq!(status.len(), Platform::ALL.len());
    assert!(status.values().all(|s| *s == PlatformStatus::Error));
}
