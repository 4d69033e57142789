#![forbid(unsafe_code)]

//! Product records as served by the storefront's data layer.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::price;

/// Currency of a price. The storefront sells in rupees only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "INR")]
    Inr,
}

/// Whether a product can be ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    #[default]
    Available,
    SoldOut,
}

/// Aggregate customer rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub value: f32,
    pub count: u32,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub image_url: String,
    pub category_or_brand: String,
    pub current_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mrp: Option<f64>,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub microcopy: Option<String>,
}

impl Product {
    /// A minimal available product. Remaining fields start empty.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        slug: impl Into<String>,
        name: impl Into<String>,
        category_or_brand: impl Into<String>,
        current_price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            name: name.into(),
            image_url: String::new(),
            category_or_brand: category_or_brand.into(),
            current_price,
            mrp: None,
            currency: Currency::Inr,
            status: ProductStatus::Available,
            href: None,
            summary: None,
            badges: Vec::new(),
            tags: Vec::new(),
            rating: None,
            microcopy: None,
        }
    }

    #[must_use]
    pub fn with_mrp(mut self, mrp: f64) -> Self {
        self.mrp = Some(mrp);
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_badges<I, S>(mut self, badges: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.badges = badges.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_rating(mut self, value: f32, count: u32) -> Self {
        self.rating = Some(Rating { value, count });
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: ProductStatus) -> Self {
        self.status = status;
        self
    }

    /// Product page URL: the explicit `href`, or `/products/{slug}`.
    #[must_use]
    pub fn link(&self) -> Cow<'_, str> {
        match &self.href {
            Some(href) => Cow::Borrowed(href),
            None => Cow::Owned(format!("/products/{}", self.slug)),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == ProductStatus::Available
    }

    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        price::is_on_sale(self.current_price, self.mrp)
    }

    /// Rounded discount off MRP, `0` when not on sale.
    #[must_use]
    pub fn discount_percent(&self) -> u32 {
        self.mrp
            .map_or(0, |mrp| price::discount_percent(self.current_price, mrp))
    }

    /// Number of ratings, `0` when unrated.
    #[must_use]
    pub fn rating_count(&self) -> u32 {
        self.rating.map_or(0, |r| r.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_storefront_json() {
        let json = r#"{
            "id": "p-7",
            "slug": "dark-truffle-box",
            "name": "Dark Truffle Box",
            "imageUrl": "https://cdn.example.com/truffle.jpg",
            "categoryOrBrand": "Chocolates",
            "currentPrice": 899,
            "mrp": 1099,
            "status": "sold_out",
            "badges": ["Bestseller"],
            "rating": { "value": 4.6, "count": 212 }
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.category_or_brand, "Chocolates");
        assert_eq!(product.status, ProductStatus::SoldOut);
        assert_eq!(product.currency, Currency::Inr);
        assert!(product.tags.is_empty());
        assert_eq!(product.rating_count(), 212);
        assert_eq!(product.discount_percent(), 18);
        assert_eq!(product.link(), "/products/dark-truffle-box");
    }

    #[test]
    fn serializes_camel_case_and_skips_empty_options() {
        let product = Product::new("1", "bar", "Bar", "Chocolates", 120.0);
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["currentPrice"], 120.0);
        assert_eq!(value["currency"], "INR");
        assert_eq!(value["status"], "available");
        assert!(value.get("mrp").is_none());
        assert!(value.get("href").is_none());
    }

    #[test]
    fn explicit_href_wins() {
        let mut product = Product::new("1", "bar", "Bar", "Chocolates", 120.0);
        product.href = Some("/collections/bars".to_owned());
        assert_eq!(product.link(), "/collections/bars");
    }
}
