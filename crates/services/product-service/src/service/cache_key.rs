//! Catalog query cache keys.

use domain::{CatalogQuery, PRODUCTS_CACHE_NAMESPACE};

/// Prefix shared by every catalog page key; removed wholesale after writes.
pub fn products_cache_prefix() -> String {
    format!("{}:", PRODUCTS_CACHE_NAMESPACE)
}

/// Fingerprint of a normalised query.
///
/// `products:page:{n}:size:{s}`, followed by `category`, `search`, `minprice`
/// and `maxprice` segments for each filter that is present.
pub fn cache_key(query: &CatalogQuery) -> String {
    let mut parts = vec![
        PRODUCTS_CACHE_NAMESPACE.to_string(),
        "page".to_string(),
        query.page_number().to_string(),
        "size".to_string(),
        query.page_size().to_string(),
    ];

    if let Some(category) = query.category() {
        parts.push("category".to_string());
        parts.push(category.to_string());
    }
    if let Some(term) = query.search_term() {
        parts.push("search".to_string());
        parts.push(term.to_string());
    }
    if let Some(min_price) = query.min_price() {
        parts.push("minprice".to_string());
        parts.push(min_price.to_string());
    }
    if let Some(max_price) = query.max_price() {
        parts.push("maxprice".to_string());
        parts.push(max_price.to_string());
    }

    parts.join(":")
}
