//! # Menu Repository
//!
//! Reads and seeds the `menu_items` collection.
//!
//! The storefront only ever reads from here. Writes come from the seed
//! binary and from tests.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use platter_core::CatalogItem;

const SELECT_COLUMNS: &str = r#"
    SELECT
        id,
        name,
        description,
        price_cents,
        image_url,
        category,
        is_spicy,
        is_vegetarian
    FROM menu_items
"#;

/// Repository for menu item operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.menu();
///
/// let items = repo.list_all().await?;
/// let starters = repo.by_category("Starters").await?;
/// ```
#[derive(Debug, Clone)]
pub struct MenuRepository {
    pool: SqlitePool,
}

impl MenuRepository {
    /// Creates a new MenuRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MenuRepository { pool }
    }

    /// Lists the whole catalog, ordered by category then name.
    pub async fn list_all(&self) -> DbResult<Vec<CatalogItem>> {
        let sql = format!("{} ORDER BY category, name", SELECT_COLUMNS);

        let items = sqlx::query_as::<_, CatalogItem>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = items.len(), "Loaded menu items");
        Ok(items)
    }

    /// Gets a menu item by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(CatalogItem))` - Item found
    /// * `Ok(None)` - Item not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<CatalogItem>> {
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);

        let item = sqlx::query_as::<_, CatalogItem>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(item)
    }

    /// Lists the items of one category.
    pub async fn by_category(&self, category: &str) -> DbResult<Vec<CatalogItem>> {
        debug!(category = %category, "Loading menu category");

        let sql = format!("{} WHERE category = ?1 ORDER BY name", SELECT_COLUMNS);

        let items = sqlx::query_as::<_, CatalogItem>(&sql)
            .bind(category)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    /// Inserts an item, or replaces every field of the existing item with
    /// the same ID.
    pub async fn upsert(&self, item: &CatalogItem) -> DbResult<()> {
        debug!(id = %item.id, name = %item.name, "Upserting menu item");

        sqlx::query(
            r#"
            INSERT INTO menu_items (
                id, name, description, price_cents, image_url,
                category, is_spicy, is_vegetarian, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                price_cents = excluded.price_cents,
                image_url = excluded.image_url,
                category = excluded.category,
                is_spicy = excluded.is_spicy,
                is_vegetarian = excluded.is_vegetarian,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price_cents)
        .bind(&item.image_url)
        .bind(&item.category)
        .bind(item.is_spicy)
        .bind(item.is_vegetarian)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Number of items in the catalog.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_items")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
