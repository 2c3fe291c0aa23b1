//! Keyword-based coarse categorization of product names.

/// Returned when no category keyword matches.
pub const OTHER_CATEGORY: &str = "Other";

/// Categories are checked in declaration order and the first hit wins.
/// Several keywords could belong to more than one category (`"cream"` is
/// both dairy and personal care), so the order doubles as the tie-break.
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Dairy",
        &[
            "milk", "curd", "yogurt", "paneer", "cheese", "butter", "ghee", "cream", "dahi",
            "lassi",
        ],
    ),
    (
        "Vegetables",
        &[
            "potato",
            "onion",
            "tomato",
            "carrot",
            "cabbage",
            "capsicum",
            "cauliflower",
            "spinach",
            "broccoli",
            "peas",
            "beans",
            "ladyfinger",
            "bhindi",
            "gourd",
            "palak",
            "methi",
            "coriander",
        ],
    ),
    (
        "Fruits",
        &[
            "apple",
            "banana",
            "mango",
            "orange",
            "grapes",
            "watermelon",
            "papaya",
            "pomegranate",
            "guava",
            "pineapple",
            "kiwi",
            "strawberry",
        ],
    ),
    (
        "Snacks",
        &[
            "chips", "biscuit", "cookie", "namkeen", "noodle", "maggi", "kurkure", "nachos",
            "popcorn",
        ],
    ),
    (
        "Beverages",
        &[
            "cola", "pepsi", "coke", "sprite", "juice", "drink", "water", "tea", "coffee", "soda",
        ],
    ),
    (
        "Staples",
        &[
            "atta", "rice", "dal", "sugar", "salt", "flour", "oil", "wheat", "maida", "besan",
            "poha", "sooji",
        ],
    ),
    (
        "Household",
        &[
            "detergent",
            "cleaner",
            "soap",
            "vim",
            "surf",
            "harpic",
            "lizol",
            "dishwash",
        ],
    ),
    (
        "Personal Care",
        &[
            "shampoo",
            "toothpaste",
            "deodorant",
            "face wash",
            "body wash",
            "lotion",
        ],
    ),
];

/// Assigns a coarse category by substring match on the lowercased name.
#[must_use]
pub fn classify(name: &str) -> &'static str {
    let lower = name.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
        .map_or(OTHER_CATEGORY, |(category, _)| category)
}
