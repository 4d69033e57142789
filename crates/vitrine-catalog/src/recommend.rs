#![forbid(unsafe_code)]

//! Product recommendations shown under a product page.
//!
//! Both rankers are pure functions over a slice of products. Sorting is
//! stable, so ties keep catalog order.

use crate::product::{Product, ProductStatus};

/// Cards shown per recommendation strip.
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 4;

/// Words whose shared presence in two names marks them as the same kind of
/// product.
pub const PRODUCT_TYPE_WORDS: [&str; 3] = ["chocolate", "cake", "truffle"];

const SAME_CATEGORY_SCORE: u32 = 10;
const SIMILAR_PRICE_SCORE: u32 = 5;
const SHARED_TAG_SCORE: u32 = 3;
const SHARED_BADGE_SCORE: u32 = 2;
const SIMILAR_PRICE_THRESHOLD: f64 = 0.5;
const ALSO_VIEWED_PRICE_BAND: f64 = 0.3;

/// Relevance of `candidate` to `current`.
///
/// | Signal | Points |
/// |--------|--------|
/// | Same category/brand | 10 |
/// | `1 - |Δprice| / mean price > 0.5` | 5 |
/// | Each of `current`'s tags the candidate shares | 3 |
/// | Each of `current`'s badges the candidate shares | 2 |
#[must_use]
pub fn similarity_score(current: &Product, candidate: &Product) -> u32 {
    let mut score = 0;
    if candidate.category_or_brand == current.category_or_brand {
        score += SAME_CATEGORY_SCORE;
    }
    let mean = (candidate.current_price + current.current_price) / 2.0;
    if mean > 0.0 {
        let diff = (candidate.current_price - current.current_price).abs();
        if 1.0 - diff / mean > SIMILAR_PRICE_THRESHOLD {
            score += SIMILAR_PRICE_SCORE;
        }
    }
    let shared_tags = current
        .tags
        .iter()
        .filter(|t| candidate.tags.contains(t))
        .count() as u32;
    let shared_badges = current
        .badges
        .iter()
        .filter(|b| candidate.badges.contains(b))
        .count() as u32;
    score + shared_tags * SHARED_TAG_SCORE + shared_badges * SHARED_BADGE_SCORE
}

/// Available products most similar to `current`, best first.
#[must_use]
pub fn similar_products<'a>(current: &Product, all: &'a [Product], limit: usize) -> Vec<&'a Product> {
    let mut scored: Vec<(u32, &Product)> = all
        .iter()
        .filter(|p| p.id != current.id && p.is_available())
        .map(|p| (similarity_score(current, p), p))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().take(limit).map(|(_, p)| p).collect()
}

/// Whether both names mention the same product type word.
#[must_use]
pub fn shares_product_type(a: &str, b: &str) -> bool {
    let (a, b) = (a.to_lowercase(), b.to_lowercase());
    PRODUCT_TYPE_WORDS
        .iter()
        .any(|word| a.contains(word) && b.contains(word))
}

/// "People also viewed": products in the same category, within 30% of the
/// price, or of the same type. Same category first, then closest price.
#[must_use]
pub fn people_also_viewed<'a>(current: &Product, all: &'a [Product], limit: usize) -> Vec<&'a Product> {
    let band = current.current_price * ALSO_VIEWED_PRICE_BAND;
    let price_diff = |p: &Product| (p.current_price - current.current_price).abs();
    let same_category = |p: &Product| p.category_or_brand == current.category_or_brand;

    let mut related: Vec<&Product> = all
        .iter()
        .filter(|p| p.id != current.id && p.status != ProductStatus::SoldOut)
        .filter(|p| {
            same_category(p) || price_diff(p) <= band || shares_product_type(&current.name, &p.name)
        })
        .collect();
    related.sort_by(|a, b| {
        same_category(b)
            .cmp(&same_category(a))
            .then_with(|| price_diff(a).total_cmp(&price_diff(b)))
    });
    related.truncate(limit);
    related
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.clone()).collect()
    }

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("a", "dark-70", "Dark 70% Bar", "Chocolates", 450.0)
                .with_tags(["dark", "vegan"])
                .with_badges(["Bestseller"]),
            Product::new("b", "milk-bar", "Milk Chocolate Bar", "Chocolates", 400.0)
                .with_tags(["milk"]),
            Product::new("c", "opera", "Opera Cake", "Cakes", 1299.0).with_tags(["dark"]),
            Product::new("d", "truffles", "Truffle Assortment", "Hampers", 520.0)
                .with_tags(["dark", "vegan"])
                .with_badges(["Bestseller"]),
            Product::new("e", "mint-thins", "Mint Thins", "Chocolates", 380.0)
                .with_status(ProductStatus::SoldOut),
            Product::new("f", "gift-hamper", "Grand Hamper", "Hampers", 4999.0),
        ]
    }

    #[test]
    fn scoring_table() {
        let all = catalog();
        assert_eq!(similarity_score(&all[0], &all[1]), 10 + 5);
        assert_eq!(similarity_score(&all[0], &all[3]), 5 + 6 + 2);
        assert_eq!(similarity_score(&all[0], &all[2]), 3);
        assert_eq!(similarity_score(&all[0], &all[5]), 0);
    }

    #[test]
    fn similar_excludes_self_and_unavailable() {
        let all = catalog();
        let picks = similar_products(&all[0], &all, DEFAULT_RECOMMENDATION_LIMIT);
        assert_eq!(ids(&picks), vec!["b", "d", "c", "f"]);
    }

    #[test]
    fn similar_respects_limit() {
        let all = catalog();
        assert_eq!(similar_products(&all[0], &all, 1).len(), 1);
        assert!(similar_products(&all[0], &all, 0).is_empty());
    }

    #[test]
    fn also_viewed_orders_category_then_price() {
        let all = catalog();
        let picks = people_also_viewed(&all[0], &all, DEFAULT_RECOMMENDATION_LIMIT);
        // b: same category. d: within 30% of 450. c, f: neither.
        assert_eq!(ids(&picks), vec!["b", "d"]);
    }

    #[test]
    fn also_viewed_matches_product_type() {
        let all = catalog();
        let cake = Product::new("x", "choc-cake", "Chocolate Truffle Cake", "Cakes", 2500.0);
        let picks = people_also_viewed(&cake, &all, DEFAULT_RECOMMENDATION_LIMIT);
        // c: same category; b: "chocolate"; d: "truffle".
        assert_eq!(ids(&picks), vec!["c", "d", "b"]);
    }

    #[test]
    fn product_type_is_case_insensitive() {
        assert!(shares_product_type("CHOCOLATE Box", "Hot chocolate"));
        assert!(!shares_product_type("Opera Cake", "Truffle Box"));
    }
}
