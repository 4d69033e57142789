#![forbid(unsafe_code)]

//! Collection page filters and sorting, driven by the URL query string.
//!
//! The filter bar writes `type`, `flavor`, `occasion`, and `sort` keys into
//! the query. The value `all` (or a missing key) disables that filter.
//! Unknown flavor, occasion, or sort values are ignored rather than
//! matching nothing.
//!
//! Query values are treated as plain tokens; no percent-decoding is done.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::product::Product;

/// Value that clears a filter key.
pub const ALL: &str = "all";

pub const TYPE_KEY: &str = "type";
pub const FLAVOR_KEY: &str = "flavor";
pub const OCCASION_KEY: &str = "occasion";
pub const SORT_KEY: &str = "sort";

/// Error for a filter value outside the known set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFilterValue {
    pub key: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownFilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} filter value: {}", self.key, self.value)
    }
}

impl std::error::Error for UnknownFilterValue {}

/// Flavor filter, matched against product names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    Dark,
    Milk,
    White,
    Caramel,
    Mint,
}

impl Flavor {
    pub const ALL: [Self; 5] = [Self::Dark, Self::Milk, Self::White, Self::Caramel, Self::Mint];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Milk => "milk",
            Self::White => "white",
            Self::Caramel => "caramel",
            Self::Mint => "mint",
        }
    }

    /// Lowercase name fragments that identify the flavor.
    #[must_use]
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Dark => &["dark", "70%", "excellence"],
            Self::Milk => &["milk", "dairy"],
            Self::White => &["white"],
            Self::Caramel => &["caramel"],
            Self::Mint => &["mint"],
        }
    }

    #[must_use]
    pub fn matches(self, product: &Product) -> bool {
        let name = product.name.to_lowercase();
        self.keywords().iter().any(|k| name.contains(k))
    }
}

impl FromStr for Flavor {
    type Err = UnknownFilterValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownFilterValue {
                key: FLAVOR_KEY,
                value: s.to_owned(),
            })
    }
}

/// Occasion filter, approximated by price band (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Occasion {
    Birthday,
    Anniversary,
    Festive,
    Corporate,
    Weddings,
}

impl Occasion {
    pub const ALL: [Self; 5] = [
        Self::Birthday,
        Self::Anniversary,
        Self::Festive,
        Self::Corporate,
        Self::Weddings,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Birthday => "birthday",
            Self::Anniversary => "anniversary",
            Self::Festive => "festive",
            Self::Corporate => "corporate",
            Self::Weddings => "weddings",
        }
    }

    /// Inclusive price band `(min, max)`; `None` means no upper bound.
    #[must_use]
    pub const fn price_band(self) -> (f64, Option<f64>) {
        match self {
            Self::Birthday => (299.0, Some(1299.0)),
            Self::Anniversary => (699.0, Some(2999.0)),
            Self::Festive => (399.0, Some(4999.0)),
            Self::Corporate => (1999.0, None),
            Self::Weddings => (1299.0, None),
        }
    }

    #[must_use]
    pub fn matches(self, product: &Product) -> bool {
        let price = product.current_price;
        let (min, max) = self.price_band();
        price >= min && max.is_none_or(|max| price <= max)
    }
}

impl FromStr for Occasion {
    type Err = UnknownFilterValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| UnknownFilterValue {
                key: OCCASION_KEY,
                value: s.to_owned(),
            })
    }
}

/// Product ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    /// Name, case-insensitive.
    #[serde(rename = "a-z")]
    AToZ,
    /// Current price, lowest first.
    #[serde(rename = "price")]
    Price,
    /// Rating count, highest first.
    #[serde(rename = "popular")]
    Popular,
}

impl SortOrder {
    pub const ALL: [Self; 3] = [Self::AToZ, Self::Price, Self::Popular];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AToZ => "a-z",
            Self::Price => "price",
            Self::Popular => "popular",
        }
    }

    /// Stable in-place sort.
    pub fn sort(self, products: &mut [&Product]) {
        match self {
            Self::AToZ => products.sort_by_cached_key(|p| p.name.to_lowercase()),
            Self::Price => products.sort_by(|a, b| a.current_price.total_cmp(&b.current_price)),
            Self::Popular => products.sort_by(|a, b| b.rating_count().cmp(&a.rating_count())),
        }
    }
}

impl FromStr for SortOrder {
    type Err = UnknownFilterValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| UnknownFilterValue {
                key: SORT_KEY,
                value: s.to_owned(),
            })
    }
}

/// Ordered query parameters with `URLSearchParams`-style updates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    params: Vec<(String, String)>,
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `a=b&c=d`, with or without a leading `?`. Pairs without `=`
    /// get an empty value; empty segments are skipped.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let params = query
            .split('&')
            .filter(|segment| !segment.is_empty())
            .map(|segment| match segment.split_once('=') {
                Some((k, v)) => (k.to_owned(), v.to_owned()),
                None => (segment.to_owned(), String::new()),
            })
            .collect();
        Self { params }
    }

    /// First value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The value the filter bar highlights for `key`: the stored value, or
    /// `all` when absent.
    #[must_use]
    pub fn active(&self, key: &str) -> &str {
        self.get(key).unwrap_or(ALL)
    }

    /// Set `key` to `value`, or delete it when `value` is `all`.
    ///
    /// An existing key keeps its position; duplicates after it are dropped.
    pub fn set(&mut self, key: &str, value: &str) {
        if value == ALL {
            self.params.retain(|(k, _)| k != key);
            return;
        }
        let mut seen = false;
        self.params.retain_mut(|(k, v)| {
            if k != key {
                return true;
            }
            if seen {
                return false;
            }
            seen = true;
            *v = value.to_owned();
            true
        });
        if !seen {
            self.params.push((key.to_owned(), value.to_owned()));
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Query string without the leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.to_string()
    }

    /// `path` followed by `?query`, or just `path` when empty.
    #[must_use]
    pub fn href(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_owned()
        } else {
            format!("{path}?{self}")
        }
    }
}

impl fmt::Display for FilterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (k, v)) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{k}={v}")?;
        }
        Ok(())
    }
}

fn active_value<'a>(state: &'a FilterState, key: &str) -> Option<&'a str> {
    state.get(key).filter(|v| !v.is_empty() && *v != ALL)
}

fn parse_value<T: FromStr>(state: &FilterState, key: &'static str) -> Option<T> {
    let value = active_value(state, key)?;
    let parsed = value.parse().ok();
    if parsed.is_none() {
        tracing::debug!(key, value, "ignoring unknown filter value");
    }
    parsed
}

/// Filters decoded from a [`FilterState`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CollectionFilter {
    /// Category/brand, compared case-insensitively.
    pub kind: Option<String>,
    pub flavor: Option<Flavor>,
    pub occasion: Option<Occasion>,
    pub sort: Option<SortOrder>,
}

impl CollectionFilter {
    /// Decode the known keys. `all`, empty, and unknown values disable the
    /// corresponding filter.
    #[must_use]
    pub fn from_state(state: &FilterState) -> Self {
        Self {
            kind: active_value(state, TYPE_KEY).map(str::to_owned),
            flavor: parse_value(state, FLAVOR_KEY),
            occasion: parse_value(state, OCCASION_KEY),
            sort: parse_value(state, SORT_KEY),
        }
    }

    #[must_use]
    pub fn from_query(query: &str) -> Self {
        Self::from_state(&FilterState::parse(query))
    }

    /// Whether `product` passes every active filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.kind
            .as_deref()
            .is_none_or(|kind| product.category_or_brand.eq_ignore_ascii_case(kind))
            && self.flavor.is_none_or(|f| f.matches(product))
            && self.occasion.is_none_or(|o| o.matches(product))
    }

    /// Filter then sort.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let mut out: Vec<&Product> = products.iter().filter(|p| self.matches(p)).collect();
        if let Some(order) = self.sort {
            order.sort(&mut out);
        }
        out
    }
}

/// One choice in a filter group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl FilterOption {
    fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_owned(),
            label: label.to_owned(),
            count: None,
        }
    }
}

/// A labelled row of filter choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterGroup {
    pub key: String,
    pub label: String,
    pub options: Vec<FilterOption>,
}

impl FilterGroup {
    /// Accessible label for an option button.
    #[must_use]
    pub fn option_aria_label(option: &FilterOption) -> String {
        format!("Filter by {}", option.label)
    }

    /// Fill option counts from `products`. The `all` option counts every
    /// product.
    pub fn count_options(&mut self, products: &[Product]) {
        let key = self.key.clone();
        for option in &mut self.options {
            let mut state = FilterState::new();
            state.set(&key, &option.value);
            let filter = CollectionFilter::from_state(&state);
            option.count = Some(products.iter().filter(|p| filter.matches(p)).count() as u32);
        }
    }
}

/// The filter rows shown on collection pages.
#[must_use]
pub fn collection_filter_groups() -> Vec<FilterGroup> {
    let group = |key: &str, label: &str, options: &[(&str, &str)]| FilterGroup {
        key: key.to_owned(),
        label: label.to_owned(),
        options: options
            .iter()
            .map(|(v, l)| FilterOption::new(v, l))
            .collect(),
    };
    vec![
        group(
            TYPE_KEY,
            "Type",
            &[
                (ALL, "All Types"),
                ("chocolates", "Chocolates"),
                ("hampers", "Hampers"),
                ("cakes", "Cakes"),
                ("bakery", "Bakery"),
            ],
        ),
        group(
            FLAVOR_KEY,
            "Flavor",
            &[
                (ALL, "All Flavors"),
                ("dark", "Dark Chocolate"),
                ("milk", "Milk Chocolate"),
                ("white", "White Chocolate"),
                ("caramel", "Caramel"),
                ("mint", "Mint"),
            ],
        ),
        group(
            OCCASION_KEY,
            "Occasion",
            &[
                (ALL, "All Occasions"),
                ("birthday", "Birthday"),
                ("anniversary", "Anniversary"),
                ("festive", "Festive"),
                ("corporate", "Corporate"),
                ("weddings", "Weddings"),
            ],
        ),
        group(
            SORT_KEY,
            "Sort",
            &[("a-z", "A-Z"), ("price", "Price"), ("popular", "Popular")],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("1", "dark", "Dark Excellence Bar", "Chocolates", 349.0).with_rating(4.7, 90),
            Product::new("2", "milk", "Milk Hazelnut Bar", "Chocolates", 299.0).with_rating(4.4, 310),
            Product::new("3", "mint", "After Dinner Mint Thins", "Chocolates", 799.0),
            Product::new("4", "hamper", "Festive White Hamper", "Hampers", 2499.0).with_rating(4.9, 12),
            Product::new("5", "cake", "Salted Caramel Cake", "Cakes", 1399.0).with_rating(4.5, 140),
        ]
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn type_is_case_insensitive() {
        let all = catalog();
        let filter = CollectionFilter::from_query("?type=chocolates");
        assert_eq!(ids(&filter.apply(&all)), vec!["1", "2", "3"]);
    }

    #[test]
    fn flavor_keywords() {
        let all = catalog();
        let dark = CollectionFilter::from_query("flavor=dark");
        assert_eq!(ids(&dark.apply(&all)), vec!["1"]);
        let white = CollectionFilter::from_query("flavor=white");
        assert_eq!(ids(&white.apply(&all)), vec!["4"]);
        let caramel = CollectionFilter::from_query("flavor=caramel");
        assert_eq!(ids(&caramel.apply(&all)), vec!["5"]);
    }

    #[test]
    fn occasion_price_bands_are_inclusive() {
        let all = catalog();
        let birthday = CollectionFilter::from_query("occasion=birthday");
        assert_eq!(ids(&birthday.apply(&all)), vec!["1", "2", "3"]);
        let corporate = CollectionFilter::from_query("occasion=corporate");
        assert_eq!(ids(&corporate.apply(&all)), vec!["4"]);
        let weddings = CollectionFilter::from_query("occasion=weddings");
        assert_eq!(ids(&weddings.apply(&all)), vec!["4", "5"]);
    }

    #[test]
    fn filters_combine() {
        let all = catalog();
        let filter = CollectionFilter::from_query("type=Chocolates&occasion=anniversary");
        assert_eq!(ids(&filter.apply(&all)), vec!["3"]);
    }

    #[test]
    fn all_and_unknown_values_disable() {
        let all = catalog();
        for query in ["", "type=all", "flavor=strawberry", "occasion=graduation&sort=newest"] {
            let filter = CollectionFilter::from_query(query);
            assert_eq!(filter.apply(&all).len(), all.len(), "query {query:?}");
        }
    }

    #[test]
    fn sorting() {
        let all = catalog();
        let az = CollectionFilter::from_query("sort=a-z");
        assert_eq!(ids(&az.apply(&all)), vec!["3", "1", "4", "2", "5"]);
        let price = CollectionFilter::from_query("sort=price");
        assert_eq!(ids(&price.apply(&all)), vec!["2", "1", "3", "5", "4"]);
        let popular = CollectionFilter::from_query("sort=popular");
        assert_eq!(ids(&popular.apply(&all)), vec!["2", "5", "1", "4", "3"]);
    }

    #[test]
    fn filter_state_updates_like_the_filter_bar() {
        let mut state = FilterState::parse("?type=cakes&flavor=dark");
        assert_eq!(state.active("occasion"), "all");
        state.set("occasion", "birthday");
        assert_eq!(state.to_query_string(), "type=cakes&flavor=dark&occasion=birthday");
        state.set("type", "hampers");
        assert_eq!(state.to_query_string(), "type=hampers&flavor=dark&occasion=birthday");
        state.set("flavor", "all");
        assert_eq!(state.href("/collections/gifts"), "/collections/gifts?type=hampers&occasion=birthday");
        state.set("type", "all");
        state.set("occasion", "all");
        assert_eq!(state.href("/collections/gifts"), "/collections/gifts");
    }

    #[test]
    fn duplicate_keys_collapse_on_set() {
        let mut state = FilterState::parse("sort=price&type=cakes&sort=a-z");
        assert_eq!(state.get("sort"), Some("price"));
        state.set("sort", "popular");
        assert_eq!(state.to_string(), "sort=popular&type=cakes");
    }

    #[test]
    fn option_counts() {
        let all = catalog();
        let mut groups = collection_filter_groups();
        let occasion = groups.iter_mut().find(|g| g.key == OCCASION_KEY).unwrap();
        occasion.count_options(&all);
        let counts: Vec<(String, Option<u32>)> = occasion
            .options
            .iter()
            .map(|o| (o.value.clone(), o.count))
            .collect();
        assert_eq!(
            counts,
            vec![
                ("all".to_owned(), Some(5)),
                ("birthday".to_owned(), Some(3)),
                ("anniversary".to_owned(), Some(3)),
                ("festive".to_owned(), Some(3)),
                ("corporate".to_owned(), Some(1)),
                ("weddings".to_owned(), Some(2)),
            ]
        );
        assert_eq!(
            FilterGroup::option_aria_label(&occasion.options[1]),
            "Filter by Birthday"
        );
    }

    #[test]
    fn unknown_value_error_message() {
        let err = "rose".parse::<Flavor>().unwrap_err();
        assert_eq!(err.to_string(), "unknown flavor filter value: rose");
    }
}
