//! Product card markup.
//!
//! Values are substituted verbatim. No HTML escaping is applied to titles,
//! prices or links: the search API is trusted to return display-safe text.

use nichepage_core::Product;

/// Fragment emitted when a niche has no products.
pub const NO_RESULTS_HTML: &str = "<p>No products found right now.</p>";

/// Render all product cards, in input order, joined by newlines.
///
/// An empty slice yields [`NO_RESULTS_HTML`].
#[must_use]
pub fn render_cards(products: &[Product]) -> String {
    if products.is_empty() {
        return NO_RESULTS_HTML.to_string();
    }

    products
        .iter()
        .map(card_html)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render one product card.
#[must_use]
pub fn card_html(product: &Product) -> String {
    let badges = badges_html(product)
        .map(|row| format!("\n    {row}"))
        .unwrap_or_default();

    format!(
        r#"<article class="card">
    <img src="{}" alt="{}" loading="lazy" />
    <h3>{}</h3>
    <div class="price">{}</div>{}
    <a class="btn" href="{}" target="_blank" rel="nofollow sponsored noopener">View on Amazon</a>
</article>"#,
        product.image, product.title, product.title, product.price, badges, product.url
    )
}

/// Rating and review badges, or `None` when the product has neither.
fn badges_html(product: &Product) -> Option<String> {
    let mut badges = Vec::with_capacity(2);

    if product.has_rating() {
        badges.push(format!(r#"<span class="badge">⭐ {}</span>"#, product.rating));
    }
    if product.has_reviews() {
        badges.push(format!(r#"<span class="badge">{} reviews</span>"#, product.reviews));
    }

    if badges.is_empty() {
        return None;
    }

    Some(format!(r#"<div class="badges">{}</div>"#, badges.join(" ")))
}
