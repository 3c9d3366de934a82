use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category returned when no keyword matches a description.
pub const FALLBACK_CATEGORY: &str = "Other";

/// Keyword table shared by every statement format.
///
/// Declaration order is significant: the first category whose keyword occurs
/// in a description wins, so reordering entries changes classification for
/// all formats at once. Loaded once at startup and only read after that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTaxonomy {
    categories: Vec<CategoryEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub name: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("failed to parse taxonomy TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("taxonomy has no categories")]
    Empty,
}

/// Merchant keywords per category, in match-priority order.
const BUILTIN: &[(&str, &[&str])] = &[
    (
        "E-Commerce",
        &[
            "Amazon", "AMZN", "eBay", "Alibaba", "Temu", "Wayfair", "Etsy", "Walmart Online",
            "Best Buy Online", "Target Online",
        ],
    ),
    (
        "Subscriptions & Streaming",
        &[
            "Blizzard", "CLOUDFLARE", "Netflix", "Hulu", "Disney+", "HBO Max", "Spotify",
            "Apple Music", "Apple", "YouTube Premium", "Youtubepre", "Audible", "Amazon Prime",
            "PlayStation Plus", "Xbox Game Pass", "Adobe", "Dropbox", "Google One", "iCloud",
        ],
    ),
    (
        "Groceries",
        &[
            "SHOPRITE", "Walmart", "WAL-MART", "Kroger", "Safeway", "Whole Foods", "Aldi",
            "Trader Joe's", "Publix", "Costco", "Sam's Club", "Lidl",
        ],
    ),
    (
        "Restaurants & Fast Food",
        &[
            "DOORDASH", "FOODA", "McDonald's", "Burger King", "Subway", "Chipotle", "Starbucks",
            "Dunkin", "KFC", "Taco Bell", "Domino's", "Chick-fil-A", "Pizza Hut", "Popeyes",
            "Wendy's", "WENDYS", "Five Guys", "HIBACHI", "Grill",
        ],
    ),
    (
        "Utilities",
        &[
            "Duke Energy", "Con Edison", "PG&E", "National Grid", "Xfinity", "Spectrum",
            "Verizon", "AT&T", "T-Mobile", "Cox Communications",
        ],
    ),
    (
        "Travel & Transportation",
        &[
            "Uber", "Mta", "njt", "Lyft", "Delta Airlines", "United Airlines",
            "American Airlines", "Expedia", "Airbnb", "Booking.com", "Marriott", "Hilton",
            "Hertz", "Enterprise Rent-A-Car", "Amtrak", "Greyhound",
        ],
    ),
    (
        "Entertainment & Recreation",
        &[
            "DICE", "AMC", "BAR", "Steam", "YESTERCADES", "Dave & buster's", "Regal Cinemas",
            "AMC Theatres", "Bowlero", "Dave & Buster's", "Escape Rooms", "Concert Tickets",
            "Eventbrite", "StubHub", "Sports Tickets",
        ],
    ),
    (
        "Health & Fitness",
        &[
            "CVS", "Walgreens", "GNC", "Vitamin Shoppe", "Peloton", "Planet Fitness",
            "LA Fitness", "24 Hour Fitness", "Equinox", "Anytime Fitness", "MyFitnessPal",
            "Fitbit",
        ],
    ),
    (
        "Retail & Clothing",
        &[
            "Nike", "Adidas", "Zara", "H&M", "Nordstrom", "Macy's", "Bloomingdale's",
            "Urban Outfitters", "Uniqlo", "Old Navy", "Banana Republic", "Gap", "Foot Locker",
            "UNIQUE",
        ],
    ),
    (
        "Automotive & Gas",
        &[
            "Ezpass", "MOTOR VEHICLE", "Shell", "Chevron", "ExxonMobil", "BP",
            "Tesla Supercharger", "AutoZone", "O'Reilly Auto Parts", "Pep Boys", "CarMax",
            "Toyota Service", "ROCKAUTO",
        ],
    ),
    (
        "Education & Learning",
        &[
            "Udemy", "Coursera", "Skillshare", "LinkedIn Learning", "MasterClass",
            "Khan Academy", "Duolingo", "Quizlet", "Pearson", "Chegg", "COMPTIA", "University",
        ],
    ),
    (
        "Home Improvement",
        &["Home Depot", "Lowe's", "Ace Hardware", "Menards", "IKEA", "Overstock"],
    ),
    (
        "Insurance",
        &[
            "Geico", "Progressive", "State Farm", "Allstate", "Liberty Mutual", "Nationwide",
            "USAA", "MetLife",
        ],
    ),
    (
        "Charity & Donations",
        &[
            "Red Cross", "GoFundMe", "UNICEF", "Feeding America", "Salvation Army", "WWF",
            "Charity: Water",
        ],
    ),
    (
        "Financial Services & Banks",
        &[
            "ATM", "Capital One", "Vanguard", "Acorns", "Bank of America", "Chase",
            "Wells Fargo", "Citibank", "PayPal", "Venmo", "Cash App", "Western Union",
            "Robinhood", "E-Trade", "Fidelity", "Charles Schwab", "Zelle",
        ],
    ),
    (
        "Other",
        &["Post Office", "USPS", "FedEx", "UPS", "MoneyGram"],
    ),
];

impl CategoryTaxonomy {
    /// The built-in merchant keyword table.
    pub fn builtin() -> Self {
        CategoryTaxonomy {
            categories: BUILTIN
                .iter()
                .map(|(name, keywords)| CategoryEntry {
                    name: (*name).to_string(),
                    keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
                })
                .collect(),
        }
    }

    /// Load a replacement table from TOML:
    ///
    /// ```toml
    /// [[categories]]
    /// name = "Groceries"
    /// keywords = ["SHOPRITE", "Kroger"]
    /// ```
    pub fn from_toml(toml_content: &str) -> Result<Self, TaxonomyError> {
        let taxonomy: CategoryTaxonomy = toml::from_str(toml_content)?;
        if taxonomy.categories.is_empty() {
            return Err(TaxonomyError::Empty);
        }
        Ok(taxonomy)
    }

    /// Map a description to its category by case-insensitive substring
    /// containment, first matching category in declaration order.
    pub fn categorize(&self, description: &str) -> &str {
        let desc = description.to_lowercase();
        for entry in &self.categories {
            if entry
                .keywords
                .iter()
                .any(|k| desc.contains(&k.to_lowercase()))
            {
                return &entry.name;
            }
        }
        FALLBACK_CATEGORY
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryEntry> {
        self.categories.iter()
    }
}

impl Default for CategoryTaxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}
