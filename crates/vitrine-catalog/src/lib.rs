#![forbid(unsafe_code)]

//! Catalog logic for the Vitrine storefront: products, prices, text,
//! recommendations, search, browsing history, collection filters, and the
//! corporate gifting form.
//!
//! Everything here is pure data manipulation except [`store`], which
//! persists client state.

pub mod filter;
pub mod lead;
pub mod price;
pub mod product;
pub mod recently_viewed;
pub mod recommend;
pub mod search;
pub mod store;
pub mod text;

pub use filter::{
    CollectionFilter, FilterGroup, FilterOption, FilterState, Flavor, Occasion, SortOrder,
    UnknownFilterValue, collection_filter_groups,
};
pub use lead::{
    LeadDraft, LeadErrors, LeadField, LeadFieldError, LeadForm, corporate_hampers,
};
pub use price::{discount_percent, format_discount, format_inr, is_on_sale};
pub use product::{Currency, Product, ProductStatus, Rating};
pub use recently_viewed::{RECENTLY_VIEWED_KEY, RecentlyViewed};
pub use recommend::{DEFAULT_RECOMMENDATION_LIMIT, people_also_viewed, similar_products};
pub use search::search;
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use text::{image_alt_text, is_valid_image_url, product_initials, truncate_text};
