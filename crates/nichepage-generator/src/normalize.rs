//! Normalization of raw product-search payloads into [`Product`] records.
//!
//! The search API is loose about its response shape: the product list and
//! every product field can appear under several names. Each canonical field
//! has a fixed, ordered list of source keys and a single resolver walks it.

use serde_json::{Map, Value};
use tracing::debug;

use nichepage_core::{
    Product,
    product::{DEFAULT_PRICE, DEFAULT_TITLE, PLACEHOLDER_URL},
};

use crate::affiliate;

/// Maximum number of products kept per niche.
pub const MAX_PRODUCTS: usize = 10;

/// Keys that may hold the product list, in priority order.
pub const LIST_KEYS: &[&str] = &["docs", "data", "results"];

/// Source keys for [`Product::title`].
pub const TITLE_KEYS: &[&str] = &["product_title", "title"];

/// Source keys for [`Product::image`].
pub const IMAGE_KEYS: &[&str] = &["product_main_image_url", "image"];

/// Source keys for [`Product::price`].
pub const PRICE_KEYS: &[&str] = &["product_price", "price", "app_sale_price"];

/// Source keys for [`Product::url`].
pub const URL_KEYS: &[&str] = &["product_detail_url", "url"];

/// Source keys for [`Product::rating`].
pub const RATING_KEYS: &[&str] = &["product_star_rating", "rating"];

/// Source keys for [`Product::reviews`].
pub const REVIEWS_KEYS: &[&str] = &["product_num_ratings", "reviews_count"];

/// Normalize a raw payload into at most [`MAX_PRODUCTS`] products, keeping the
/// API's ordering. Every product URL is passed through [`affiliate::rewrite`].
///
/// Never fails: a payload without a recognizable product list yields an empty
/// vector and a malformed entry yields a product made of defaults.
#[must_use]
pub fn normalize(payload: &Value, tag: &str) -> Vec<Product> {
    product_list(payload)
        .iter()
        .take(MAX_PRODUCTS)
        .map(|entry| normalize_entry(entry, tag))
        .collect()
}

/// Locate the product list. The first list key present wins even when its
/// value is empty. A present key whose value is not an array, `null`
/// included, yields no products; later keys are not consulted. A bare
/// top-level array is accepted as the list itself.
fn product_list(payload: &Value) -> &[Value] {
    match payload {
        Value::Object(map) => LIST_KEYS
            .iter()
            .find_map(|key| map.get(*key))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default(),
        Value::Array(items) => items,
        _ => &[],
    }
}

/// Normalize one raw entry, falling back to defaults field by field.
pub fn normalize_entry(entry: &Value, tag: &str) -> Product {
    let Some(fields) = entry.as_object() else {
        debug!(kind = value_kind(entry), "product entry is not an object, using defaults");
        return Product {
            url: affiliate::rewrite(PLACEHOLDER_URL, tag),
            ..Product::default()
        };
    };

    let url = resolve(fields, URL_KEYS).unwrap_or_else(|| PLACEHOLDER_URL.to_string());

    Product {
        title: resolve(fields, TITLE_KEYS).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        image: resolve(fields, IMAGE_KEYS).unwrap_or_default(),
        price: resolve(fields, PRICE_KEYS).unwrap_or_else(|| DEFAULT_PRICE.to_string()),
        url: affiliate::rewrite(&url, tag),
        rating: resolve(fields, RATING_KEYS).unwrap_or_default(),
        reviews: resolve(fields, REVIEWS_KEYS).unwrap_or_default(),
    }
}

/// Return the display form of the first key in `keys` that holds a truthy value.
pub fn resolve(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find_map(display_value)
}

/// Display string for a scalar JSON value.
///
/// `null`, `false`, zero, empty strings and structured values have no display
/// form and let resolution fall through to the next key.
fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
