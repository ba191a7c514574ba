use crate::data::models::product::Product;

pub const MAX_RESULTS: usize = 7;
pub const MIN_QUERY_CHARS: usize = 2;

pub fn matches_query(product: &Product, needle: &str) -> bool {
    product.name.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
        || product.category.to_lowercase().contains(needle)
}

/// Case-insensitive substring search over name, description and category.
/// Queries shorter than two characters return nothing.
pub fn search_products(products: &[Product], query: &str) -> Vec<Product> {
    if query.chars().count() < MIN_QUERY_CHARS {
        return Vec::new();
    }

    let needle = query.to_lowercase();

    products
        .iter()
        .filter(|p| matches_query(p, &needle))
        .take(MAX_RESULTS)
        .cloned()
        .collect()
}
