//! The canonical product record.

use serde::Serialize;

/// Title used when the source payload carries none.
pub const DEFAULT_TITLE: &str = "Unknown Product";

/// Price used when the source payload carries none.
pub const DEFAULT_PRICE: &str = "N/A";

/// Link used when the source payload carries none.
pub const PLACEHOLDER_URL: &str = "#";

/// A normalized product, independent of the shape the search API returned.
///
/// All fields are display strings. `rating` and `reviews` are empty when the
/// source had no value, which is distinct from a rating of zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    /// Display title, never empty.
    pub title: String,

    /// Image URL or empty.
    pub image: String,

    /// Formatted price, currency-prefixed string or `N/A`.
    pub price: String,

    /// Affiliate-tagged product link or `#`.
    pub url: String,

    /// Star rating or empty.
    pub rating: String,

    /// Review count or empty.
    pub reviews: String,
}

impl Default for Product {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            image: String::new(),
            price: DEFAULT_PRICE.to_string(),
            url: PLACEHOLDER_URL.to_string(),
            rating: String::new(),
            reviews: String::new(),
        }
    }
}

impl Product {
    /// Whether the product carries a star rating.
    #[must_use]
    pub fn has_rating(&self) -> bool {
        !self.rating.is_empty()
    }

    /// Whether the product carries a review count.
    #[must_use]
    pub fn has_reviews(&self) -> bool {
        !self.reviews.is_empty()
    }
}
