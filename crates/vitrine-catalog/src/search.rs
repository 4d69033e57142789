#![forbid(unsafe_code)]

//! Product search for the search modal.

use crate::product::Product;

/// Products whose name or category/brand contains `query`, ignoring case,
/// in catalog order.
///
/// A query that is empty after trimming matches nothing, so the modal shows
/// its suggestions instead of the whole catalog.
#[must_use]
pub fn search<'a>(query: &str, products: &'a [Product]) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    let results: Vec<&Product> = products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.category_or_brand.to_lowercase().contains(&needle)
        })
        .collect();
    tracing::debug!(query = %needle, hits = results.len(), "product search");
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("1", "dark-truffle", "Dark Truffle Box", "Chocolates", 899.0),
            Product::new("2", "opera", "Opera Cake", "Cakes", 1299.0),
            Product::new("3", "gift", "Festive Hamper", "Luxury", 2499.0),
            Product::new("4", "milk-bar", "Milk Bar", "Chocolates", 199.0),
        ]
    }

    fn names<'a>(products: &[&'a Product]) -> Vec<&'a str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn matches_name_case_insensitively() {
        let all = catalog();
        assert_eq!(names(&search("TRUFFLE", &all)), vec!["Dark Truffle Box"]);
        assert_eq!(names(&search("cake", &all)), vec!["Opera Cake"]);
    }

    #[test]
    fn matches_category() {
        let all = catalog();
        assert_eq!(
            names(&search("chocolates", &all)),
            vec!["Dark Truffle Box", "Milk Bar"]
        );
        assert_eq!(names(&search("lux", &all)), vec!["Festive Hamper"]);
    }

    #[test]
    fn empty_query_matches_nothing() {
        let all = catalog();
        assert!(search("", &all).is_empty());
        assert!(search("   ", &all).is_empty());
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let all = catalog();
        assert_eq!(names(&search("  opera ", &all)), vec!["Opera Cake"]);
    }

    #[test]
    fn no_hits() {
        assert!(search("macaron", &catalog()).is_empty());
    }
}
