#![forbid(unsafe_code)]

//! Recently viewed products.
//!
//! A most-recent-first list of product ids, stored as a JSON array under
//! [`RECENTLY_VIEWED_KEY`]. Visiting a product moves it to the front; the
//! list never exceeds its capacity.
//!
//! Unreadable or malformed data is logged and treated as an empty history,
//! so a bad entry never breaks a product page.

use crate::product::Product;
use crate::store::{KeyValueStore, StoreError};

/// Storage key for the id list.
pub const RECENTLY_VIEWED_KEY: &str = "recentlyViewed";
/// Ids kept in history.
pub const DEFAULT_CAPACITY: usize = 10;
/// Cards shown in the "recently viewed" strip.
pub const DEFAULT_DISPLAY_COUNT: usize = 4;

/// Recently viewed history over a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct RecentlyViewed<S> {
    store: S,
    capacity: usize,
    display_count: usize,
}

impl<S: KeyValueStore> RecentlyViewed<S> {
    /// History with the default capacity and display count.
    pub fn new(store: S) -> Self {
        Self {
            store,
            capacity: DEFAULT_CAPACITY,
            display_count: DEFAULT_DISPLAY_COUNT,
        }
    }

    /// Override the limits. A capacity of zero is raised to one.
    #[must_use]
    pub fn with_limits(mut self, capacity: usize, display_count: usize) -> Self {
        self.capacity = capacity.max(1);
        self.display_count = display_count;
        self
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Stored ids, most recent first.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        let raw = match self.store.get(RECENTLY_VIEWED_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, "recently viewed history unreadable");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(mut ids) => {
                ids.truncate(self.capacity);
                ids
            }
            Err(err) => {
                tracing::warn!(error = %err, "recently viewed history malformed; ignoring");
                Vec::new()
            }
        }
    }

    /// Record a visit: move `id` to the front and drop the oldest entries
    /// beyond capacity.
    pub fn record(&mut self, id: &str) -> Result<(), StoreError> {
        let mut ids = self.ids();
        ids.retain(|existing| existing != id);
        ids.insert(0, id.to_owned());
        ids.truncate(self.capacity);
        let json = serde_json::to_string(&ids).map_err(StoreError::Encode)?;
        self.store.set(RECENTLY_VIEWED_KEY, json)?;
        tracing::debug!(id, len = ids.len(), "recorded product view");
        Ok(())
    }

    /// Ids to display on the page for `current`: history without the
    /// current product, limited to the display count.
    #[must_use]
    pub fn display_ids(&self, current: Option<&str>) -> Vec<String> {
        self.ids()
            .into_iter()
            .filter(|id| Some(id.as_str()) != current)
            .take(self.display_count)
            .collect()
    }

    /// Resolve [`Self::display_ids`] against the catalog. Ids with no
    /// matching product are skipped.
    #[must_use]
    pub fn display_products<'a>(&self, current: Option<&str>, catalog: &'a [Product]) -> Vec<&'a Product> {
        self.display_ids(current)
            .iter()
            .filter_map(|id| catalog.iter().find(|p| &p.id == id))
            .collect()
    }

    /// Forget all history.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.store.remove(RECENTLY_VIEWED_KEY)
    }
}
