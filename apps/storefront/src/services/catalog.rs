//! Catalog source: where the menu comes from.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use tracing::debug;

use platter_core::CatalogItem;
use platter_db::Database;

use super::ServiceError;

/// Supplies the full menu.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches every catalog item.
    async fn fetch_menu(&self) -> Result<Vec<CatalogItem>, ServiceError>;
}

#[async_trait]
impl CatalogSource for Database {
    async fn fetch_menu(&self) -> Result<Vec<CatalogItem>, ServiceError> {
        Ok(self.menu().list_all().await?)
    }
}

#[derive(Debug, Default)]
struct InMemoryCatalogState {
    items: Vec<CatalogItem>,
    fail_on_fetch: bool,
    fetches: u32,
}

/// Fixed catalog held in memory.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    state: RwLock<InMemoryCatalogState>,
}

impl InMemoryCatalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        InMemoryCatalog {
            state: RwLock::new(InMemoryCatalogState {
                items,
                ..Default::default()
            }),
        }
    }

    /// Makes every following fetch fail.
    pub fn set_fail_on_fetch(&self, fail: bool) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .fail_on_fetch = fail;
    }

    /// Number of fetches attempted so far.
    pub fn fetch_count(&self) -> u32 {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .fetches
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn fetch_menu(&self) -> Result<Vec<CatalogItem>, ServiceError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.fetches += 1;

        if state.fail_on_fetch {
            return Err(ServiceError::Unavailable("catalog offline".to_string()));
        }

        debug!(count = state.items.len(), "Serving in-memory catalog");
        Ok(state.items.clone())
    }
}
