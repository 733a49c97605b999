//! # Menu Service
//!
//! Loads the catalog for the menu screen and applies the category tab
//! and search box.
//!
//! ```text
//! load(filter)
//!    │
//!    ├── validate search text
//!    ├── CatalogSource::fetch_menu()
//!    │        │
//!    │        ├── Ok(items)  ──► MenuFilter::apply ──► MenuView::Ready
//!    │        └── Err(e)     ──────────────────────► MenuView::Unavailable
//!    ▼
//! The Cart Store is never touched here.
//! ```

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use platter_core::validation::validate_search_query;
use platter_core::{CatalogItem, MenuFilter, MENU_CATEGORIES};

use crate::error::ApiError;
use crate::services::CatalogSource;

/// Message shown when the catalog cannot be fetched.
pub const MENU_UNAVAILABLE_MESSAGE: &str = "Unable to load the menu. Please try again.";

/// What the menu screen renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum MenuView {
    Ready { items: Vec<CatalogItem> },
    Unavailable { message: String },
}

impl MenuView {
    /// Items to render; empty when unavailable.
    pub fn items(&self) -> &[CatalogItem] {
        match self {
            MenuView::Ready { items } => items,
            MenuView::Unavailable { .. } => &[],
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, MenuView::Ready { .. })
    }
}

/// Menu loading on top of a catalog source.
#[derive(Clone)]
pub struct MenuService {
    catalog: Arc<dyn CatalogSource>,
}

impl MenuService {
    pub fn new(catalog: Arc<dyn CatalogSource>) -> Self {
        MenuService { catalog }
    }

    /// Category tabs in display order.
    pub fn categories(&self) -> &'static [&'static str] {
        MENU_CATEGORIES
    }

    /// Fetches the catalog and filters it.
    ///
    /// ## Errors
    /// Only an over-long search query. A fetch failure is reported as
    /// [`MenuView::Unavailable`].
    pub async fn load(&self, filter: &MenuFilter) -> Result<MenuView, ApiError> {
        let filter = MenuFilter {
            category: filter.category.clone(),
            search: filter
                .search
                .as_deref()
                .map(validate_search_query)
                .transpose()?,
        };

        match self.catalog.fetch_menu().await {
            Ok(items) => {
                let items = filter.apply(&items);
                debug!(
                    category = ?filter.category,
                    search = ?filter.search,
                    count = items.len(),
                    "Menu loaded"
                );
                Ok(MenuView::Ready { items })
            }
            Err(e) => {
                warn!(error = %e, "Menu fetch failed");
                Ok(MenuView::Unavailable {
                    message: MENU_UNAVAILABLE_MESSAGE.to_string(),
                })
            }
        }
    }
}
