//! # Order Repository
//!
//! Writes and reads order documents.
//!
//! ## Storage Layout
//! ```text
//! OrderRecord                               orders row
//! ┌──────────────────────────┐             ┌──────────────────────────────────┐
//! │ id          "8c0f…"      │ ──────────► │ id          TEXT PK              │
//! │ items       [CartLine]   │ ─ JSON ───► │ items       TEXT '[{"id":..}]'   │
//! │ total_cents 2000         │ ──────────► │ total_cents INTEGER              │
//! │                          │   derived   │ item_count  INTEGER              │
//! │ status      Pending      │ ─ as_str ─► │ status      TEXT 'pending'       │
//! │ timestamp   DateTime     │ ──────────► │ timestamp   TEXT (RFC 3339)      │
//! └──────────────────────────┘             └──────────────────────────────────┘
//! ```
//!
//! Each line carries a full copy of the menu item it was created from, so
//! an order stays readable after the catalog changes.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use platter_core::{CartLine, OrderRecord, OrderStatus};

/// Raw `orders` row before the items document is decoded.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    items: String,
    total_cents: i64,
    status: String,
    timestamp: DateTime<Utc>,
}

impl TryFrom<OrderRow> for OrderRecord {
    type Error = DbError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let items: Vec<CartLine> = serde_json::from_str(&row.items)?;
        let status: OrderStatus = row.status.parse().map_err(DbError::Serialization)?;

        Ok(OrderRecord {
            id: row.id,
            items,
            total_cents: row.total_cents,
            timestamp: row.timestamp,
            status,
        })
    }
}

/// Repository for order documents.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Writes one order document.
    ///
    /// ## Returns
    /// * `Ok(())` - Document stored
    /// * `Err(DbError::UniqueViolation)` - An order with this ID already exists
    pub async fn insert(&self, order: &OrderRecord) -> DbResult<()> {
        let items = serde_json::to_string(&order.items)?;
        let item_count = i64::try_from(order.item_count())
            .map_err(|_| DbError::ConstraintViolation("item count overflow".to_string()))?;

        debug!(
            id = %order.id,
            lines = order.items.len(),
            total_cents = order.total_cents,
            "Writing order document"
        );

        sqlx::query(
            r#"
            INSERT INTO orders (id, items, total_cents, item_count, status, timestamp)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&order.id)
        .bind(items)
        .bind(order.total_cents)
        .bind(item_count)
        .bind(order.status.as_str())
        .bind(order.timestamp)
        .execute(&self.pool)
        .await?;

        info!(id = %order.id, "Order stored");
        Ok(())
    }

    /// Gets an order by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<OrderRecord>> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, items, total_cents, status, timestamp
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(OrderRecord::try_from).transpose()
    }

    /// Lists the most recent orders, newest first.
    pub async fn list_recent(&self, limit: u32) -> DbResult<Vec<OrderRecord>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, items, total_cents, status, timestamp
            FROM orders
            ORDER BY timestamp DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(OrderRecord::try_from).collect()
    }

    /// Number of stored orders.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use chrono::{Duration, TimeZone};
    use platter_core::CatalogItem;

    fn line(id: &str, price_cents: i64, quantity: u32) -> CartLine {
        let item = CatalogItem {
            id: id.to_string(),
            name: format!("Dish {}", id),
            description: String::new(),
            price_cents,
            image_url: String::new(),
            category: "Main Course".to_string(),
            is_spicy: false,
            is_vegetarian: true,
        };
        CartLine {
            quantity,
            ..CartLine::from_catalog_item(&item)
        }
    }

    fn order_at(id: &str, timestamp: DateTime<Utc>) -> OrderRecord {
        OrderRecord::pending(id, vec![line("A", 1000, 2), line("B", 500, 3)], timestamp)
    }

    #[tokio::test]
    async fn test_insert_and_read_back_document() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let ts = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let order = order_at(&uuid::Uuid::new_v4().to_string(), ts);

        db.orders().insert(&order).await.unwrap();

        let loaded = db.orders().get_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(loaded, order);
        assert_eq!(loaded.total_cents, 3500);
        assert_eq!(loaded.item_count(), 5);
        assert_eq!(loaded.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_duplicate_order_id_is_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let order = order_at("order-1", Utc::now());

        db.orders().insert(&order).await.unwrap();
        let err = db.orders().insert(&order).await.unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));
        assert_eq!(db.orders().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_recent_is_newest_first() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let base = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();

        for (i, id) in ["first", "second", "third"].iter().enumerate() {
            let order = order_at(id, base + Duration::minutes(i as i64));
            db.orders().insert(&order).await.unwrap();
        }

        let recent = db.orders().list_recent(2).await.unwrap();
        let ids: Vec<_> = recent.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["third", "second"]);
    }

    #[tokio::test]
    async fn test_missing_order_is_none() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.orders().get_by_id("nope").await.unwrap().is_none());
    }
}
