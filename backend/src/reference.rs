//! Reference data for fixture generation
//!
//! Static lookup tables: merchants, categories, the merchant → category map,
//! domestic and international locations, and per-category amount ranges.
//! Everything here is immutable process-wide data.
//!
//! CRITICAL: All money values are i64 (cents)

/// Merchants a transaction can be made at
pub const MERCHANTS: [&str; 28] = [
    "Amazon",
    "Walmart",
    "Starbucks",
    "McDonald's",
    "Target",
    "Home Depot",
    "Best Buy",
    "Costco",
    "CVS Pharmacy",
    "Walgreens",
    "Shell",
    "Exxon",
    "Whole Foods",
    "Trader Joe's",
    "Subway",
    "Chipotle",
    "Netflix",
    "Spotify",
    "Apple Store",
    "Microsoft Store",
    "Google Play",
    "Uber",
    "Lyft",
    "Airbnb",
    "Expedia",
    "Delta Airlines",
    "United Airlines",
    "American Airlines",
];

/// Spending categories
pub const CATEGORIES: [&str; 15] = [
    "Groceries",
    "Restaurants",
    "Gas",
    "Shopping",
    "Entertainment",
    "Travel",
    "Utilities",
    "Healthcare",
    "Transportation",
    "Subscription",
    "Electronics",
    "Home Improvement",
    "Clothing",
    "Education",
    "Insurance",
];

/// Category used for repeated small charges at an unmapped merchant
pub const DEFAULT_SMALL_CATEGORY: &str = "Shopping";

const MERCHANT_CATEGORIES: [(&str, &str); 28] = [
    ("Amazon", "Shopping"),
    ("Walmart", "Shopping"),
    ("Starbucks", "Restaurants"),
    ("McDonald's", "Restaurants"),
    ("Target", "Shopping"),
    ("Home Depot", "Home Improvement"),
    ("Best Buy", "Electronics"),
    ("Costco", "Groceries"),
    ("CVS Pharmacy", "Healthcare"),
    ("Walgreens", "Healthcare"),
    ("Shell", "Gas"),
    ("Exxon", "Gas"),
    ("Whole Foods", "Groceries"),
    ("Trader Joe's", "Groceries"),
    ("Subway", "Restaurants"),
    ("Chipotle", "Restaurants"),
    ("Netflix", "Subscription"),
    ("Spotify", "Subscription"),
    ("Apple Store", "Electronics"),
    ("Microsoft Store", "Electronics"),
    ("Google Play", "Subscription"),
    ("Uber", "Transportation"),
    ("Lyft", "Transportation"),
    ("Airbnb", "Travel"),
    ("Expedia", "Travel"),
    ("Delta Airlines", "Travel"),
    ("United Airlines", "Travel"),
    ("American Airlines", "Travel"),
];

/// Domestic (US) locations
pub const DOMESTIC_LOCATIONS: [&str; 8] = [
    "New York, USA",
    "Los Angeles, USA",
    "Chicago, USA",
    "Houston, USA",
    "Miami, USA",
    "Seattle, USA",
    "Boston, USA",
    "San Francisco, USA",
];

/// International locations, disjoint from [`DOMESTIC_LOCATIONS`]
pub const INTERNATIONAL_LOCATIONS: [&str; 12] = [
    "Toronto, Canada",
    "Vancouver, Canada",
    "London, UK",
    "Paris, France",
    "Berlin, Germany",
    "Tokyo, Japan",
    "Sydney, Australia",
    "Dubai, UAE",
    "Singapore",
    "Mexico City, Mexico",
    "São Paulo, Brazil",
    "Buenos Aires, Argentina",
];

/// Domestic locations followed by international ones
pub const ALL_LOCATIONS: [&str; 20] = [
    "New York, USA",
    "Los Angeles, USA",
    "Chicago, USA",
    "Houston, USA",
    "Miami, USA",
    "Seattle, USA",
    "Boston, USA",
    "San Francisco, USA",
    "Toronto, Canada",
    "Vancouver, Canada",
    "London, UK",
    "Paris, France",
    "Berlin, Germany",
    "Tokyo, Japan",
    "Sydney, Australia",
    "Dubai, UAE",
    "Singapore",
    "Mexico City, Mexico",
    "São Paulo, Brazil",
    "Buenos Aires, Argentina",
];

/// Inclusive amount range in cents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountRange {
    pub min: i64,
    pub max: i64,
}

impl AmountRange {
    const fn dollars(min: i64, max: i64) -> Self {
        Self {
            min: min * 100,
            max: max * 100,
        }
    }

    pub fn contains(&self, cents: i64) -> bool {
        (self.min..=self.max).contains(&cents)
    }
}

/// Range for categories missing from [`CATEGORY_RANGES`]
pub const DEFAULT_RANGE: AmountRange = AmountRange::dollars(10, 200);

const CATEGORY_RANGES: [(&str, AmountRange); 15] = [
    ("Groceries", AmountRange::dollars(15, 200)),
    ("Restaurants", AmountRange::dollars(8, 150)),
    ("Gas", AmountRange::dollars(25, 80)),
    ("Shopping", AmountRange::dollars(20, 500)),
    ("Entertainment", AmountRange::dollars(10, 200)),
    ("Travel", AmountRange::dollars(100, 2000)),
    ("Utilities", AmountRange::dollars(50, 300)),
    ("Healthcare", AmountRange::dollars(20, 500)),
    ("Transportation", AmountRange::dollars(5, 100)),
    ("Subscription", AmountRange::dollars(5, 50)),
    ("Electronics", AmountRange::dollars(50, 2000)),
    ("Home Improvement", AmountRange::dollars(30, 1000)),
    ("Clothing", AmountRange::dollars(20, 400)),
    ("Education", AmountRange::dollars(100, 2000)),
    ("Insurance", AmountRange::dollars(50, 500)),
];

/// Elevated range for high-amount anomalies ($5,000 – $50,000)
pub const ANOMALOUS_RANGE: AmountRange = AmountRange::dollars(5_000, 50_000);

/// Range for the shared amount of a repeated-small group ($0.99 – $5.00)
pub const SMALL_REPEATED_RANGE: AmountRange = AmountRange { min: 99, max: 500 };

/// Account ids are drawn from 1..=MAX_ACCOUNT_ID
pub const MAX_ACCOUNT_ID: i64 = 50;

/// Category a merchant belongs to, if mapped
pub fn merchant_category(merchant: &str) -> Option<&'static str> {
    MERCHANT_CATEGORIES
        .iter()
        .find(|(m, _)| *m == merchant)
        .map(|(_, c)| *c)
}

/// Amount range for a category, falling back to [`DEFAULT_RANGE`]
pub fn category_range(category: &str) -> AmountRange {
    CATEGORY_RANGES
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, r)| *r)
        .unwrap_or(DEFAULT_RANGE)
}

pub fn is_domestic(location: &str) -> bool {
    DOMESTIC_LOCATIONS.contains(&location)
}

pub fn is_international(location: &str) -> bool {
    INTERNATIONAL_LOCATIONS.contains(&location)
}
