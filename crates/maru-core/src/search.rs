//! # Product Search Filter
//!
//! Case-insensitive substring match over product name and description.
//! The store layer feeds this the *debounced* search term; the filter
//! itself is pure and knows nothing about timing.

use crate::types::Product;

/// Filters products by a search term.
///
/// A blank or whitespace-only term returns the whole catalog. Otherwise a
/// product matches when its name or description contains the term,
/// case-insensitively.
pub fn filter_products<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
    let term = term.trim();
    if term.is_empty() {
        return products.iter().collect();
    }

    let needle = term.to_lowercase();
    products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn product(name: &str, description: Option<&str>) -> Product {
        Product {
            id: name.to_lowercase(),
            name: name.to_string(),
            price: Money::from_won(10_000),
            stock: 10,
            discounts: vec![],
            description: description.map(str::to_string),
            is_recommended: false,
        }
    }

    #[test]
    fn test_blank_term_returns_everything() {
        let products = vec![product("Widget", None), product("Gadget", None)];
        assert_eq!(filter_products(&products, "").len(), 2);
        assert_eq!(filter_products(&products, "   ").len(), 2);
    }

    #[test]
    fn test_matches_name_case_insensitively() {
        let products = vec![product("Premium Widget", None), product("Gadget", None)];
        let hits = filter_products(&products, "wIdGeT");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Premium Widget");
    }

    #[test]
    fn test_matches_description() {
        let products = vec![
            product("Widget", Some("A high-capacity workhorse.")),
            product("Gadget", None),
        ];
        let hits = filter_products(&products, "capacity");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Widget");
    }

    #[test]
    fn test_no_match_returns_empty() {
        let products = vec![product("Widget", None)];
        assert!(filter_products(&products, "zzz").is_empty());
    }
}
