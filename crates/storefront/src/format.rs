//! Display helpers for products and prices.

use storefront_core::Product;

/// Markup applied to the price when upstream gives no discount.
const DEFAULT_MARKUP: f64 = 1.3;

/// At most this many feature tags are shown per card.
const MAX_FEATURES: usize = 2;

pub const TITLE_LIMIT: usize = 40;
pub const DESCRIPTION_LIMIT: usize = 70;

/// `$12.50`
pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

/// Cut `text` to `limit` characters and mark the cut with `...`.
pub fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Price before the discount, or a flat markup when there is none.
pub fn original_price(price: f64, discount_percentage: Option<f64>) -> f64 {
    match discount_percentage {
        Some(discount) if discount > 0.0 && discount < 100.0 => price / (1.0 - discount / 100.0),
        _ => price * DEFAULT_MARKUP,
    }
}

/// Corner badge: the rounded discount, or "Premium".
pub fn badge(product: &Product) -> String {
    match product.discount_percentage {
        Some(discount) if discount > 0.0 => format!("{}% OFF", discount.round()),
        _ => "Premium".to_string(),
    }
}

pub fn in_stock(product: &Product) -> bool {
    product.stock.is_some_and(|stock| stock > 0)
}

pub fn stock_label(product: &Product) -> &'static str {
    if in_stock(product) { "In Stock" } else { "Limited" }
}

/// Brand, stock and rating tags, first two only.
pub fn features(product: &Product) -> Vec<String> {
    let mut features = Vec::with_capacity(3);
    if let Some(brand) = product.brand.as_deref().filter(|b| !b.is_empty()) {
        features.push(brand.to_string());
    }
    if in_stock(product) {
        features.push("In Stock".to_string());
    }
    if product.rating.rate > 4.0 {
        features.push("Top Rated".to_string());
    }
    features.truncate(MAX_FEATURES);
    features
}

/// Which of the five stars are filled.
pub fn star_fills(rate: f64) -> [bool; 5] {
    let filled = rate.floor();
    std::array::from_fn(|i| (i as f64) < filled)
}
