//! # Order Submission
//!
//! Turns the current cart into a pending order document.
//!
//! ## State Machine (one attempt)
//! ```text
//!              submit()
//!   ┌──────┐ ─────────────► ┌──────────────────────┐
//!   │ Idle │                │ Submitting(snapshot) │
//!   └──────┘ ◄───────────── └──────────┬───────────┘
//!      ▲      write failed             │ write ok
//!      │      (cart untouched,         ▼
//!      │       ORDER_FAILED)    ┌─────────────┐
//!      └─────────────────────── │  Succeeded  │ ⇒ cart cleared
//!                               └─────────────┘
//! ```
//!
//! ## Order Document
//! | Field     | Source                                  |
//! |-----------|-----------------------------------------|
//! | id        | UUID v4                                 |
//! | items     | cart lines captured at submit           |
//! | total     | Σ price × quantity of those lines       |
//! | timestamp | `Utc::now()` (RFC 3339 when serialized) |
//! | status    | `pending`                               |
//!
//! If the returned future is dropped mid-write, the [`SubmissionGuard`]
//! puts the store back into `Idle` with the cart intact.
//!
//! [`SubmissionGuard`]: crate::state::SubmissionGuard

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use platter_core::OrderRecord;

use crate::error::ApiError;
use crate::services::OrderWriter;
use crate::state::CartStore;

/// Message shown after a successful submission.
pub const ORDER_PLACED_MESSAGE: &str = "Your order has been placed successfully!";

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub order_id: String,
    pub total_cents: i64,
    pub item_count: u64,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

/// Submits the cart held by `store` through `writer`.
///
/// ## Errors
/// - `VALIDATION_ERROR` "Cart is empty": nothing was written
/// - `SUBMISSION_IN_PROGRESS`: another submit holds the store
/// - `ORDER_FAILED` (retryable): the write failed and the cart is unchanged
pub async fn submit(
    store: &CartStore,
    writer: &dyn OrderWriter,
) -> Result<SubmissionReceipt, ApiError> {
    let guard = store.begin_submission()?;

    let order = OrderRecord::pending(
        Uuid::new_v4().to_string(),
        guard.snapshot().lines.clone(),
        Utc::now(),
    );

    debug!(
        order_id = %order.id,
        lines = order.items.len(),
        total_cents = order.total_cents,
        "Submitting order"
    );

    let receipt = SubmissionReceipt {
        order_id: order.id.clone(),
        total_cents: order.total_cents,
        item_count: order.item_count(),
        timestamp: order.timestamp,
        message: ORDER_PLACED_MESSAGE.to_string(),
    };

    match writer.write_order(order).await {
        Ok(()) => {
            guard.succeed();
            info!(
                order_id = %receipt.order_id,
                total_cents = receipt.total_cents,
                items = receipt.item_count,
                "Order placed"
            );
            Ok(receipt)
        }
        Err(e) => {
            drop(guard);
            warn!(order_id = %receipt.order_id, error = %e, "Order submission failed");
            Err(ApiError::order_failed())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use platter_core::{CatalogItem, OrderStatus};

    use crate::error::ErrorCode;
    use crate::services::{InMemoryOrderWriter, ServiceError};
    use crate::state::{CartSettings, SubmissionPhase};

    fn dish(id: &str, price_cents: i64) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            name: format!("Dish {}", id),
            description: String::new(),
            price_cents,
            image_url: String::new(),
            category: "Popular".to_string(),
            is_spicy: false,
            is_vegetarian: false,
        }
    }

    /// Writer that blocks until released.
    struct GatedWriter {
        entered: Notify,
        release: Notify,
        inner: InMemoryOrderWriter,
    }

    impl GatedWriter {
        fn new() -> Self {
            GatedWriter {
                entered: Notify::new(),
                release: Notify::new(),
                inner: InMemoryOrderWriter::new(),
            }
        }
    }

    #[async_trait]
    impl OrderWriter for GatedWriter {
        async fn write_order(&self, order: OrderRecord) -> Result<(), ServiceError> {
            self.entered.notify_one();
            self.release.notified().await;
            self.inner.write_order(order).await
        }
    }

    #[tokio::test]
    async fn test_submit_writes_pending_order_and_clears_cart() {
        let store = CartStore::default();
        let writer = InMemoryOrderWriter::new();
        store.add_item(&dish("A", 1000)).unwrap();
        store.add_item(&dish("A", 1000)).unwrap();
        store.add_item(&dish("B", 500)).unwrap();
        store.update_quantity("B", 3).unwrap();

        let receipt = submit(&store, &writer).await.unwrap();

        assert_eq!(receipt.total_cents, 3500);
        assert_eq!(receipt.item_count, 5);
        assert_eq!(receipt.message, ORDER_PLACED_MESSAGE);

        let orders = writer.orders();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, receipt.order_id);
        assert_eq!(orders[0].status, OrderStatus::Pending);
        assert_eq!(orders[0].items.len(), 2);
        assert!(Uuid::parse_str(&orders[0].id).is_ok());

        assert!(store.snapshot().is_empty());
        assert_eq!(store.phase(), SubmissionPhase::Idle);
    }

    #[tokio::test]
    async fn test_failed_write_preserves_cart() {
        let store = CartStore::default();
        let writer = InMemoryOrderWriter::new();
        writer.set_fail_on_write(true);
        store.add_item(&dish("A", 1000)).unwrap();
        let before = store.snapshot();

        let err = submit(&store, &writer).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::OrderFailed);
        assert!(err.retryable);
        assert_eq!(store.snapshot().lines, before.lines);
        assert_eq!(store.phase(), SubmissionPhase::Idle);
        assert!(writer.orders().is_empty());

        writer.set_fail_on_write(false);
        submit(&store, &writer).await.unwrap();
        assert_eq!(writer.orders().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_cart_is_rejected_without_write() {
        let store = CartStore::default();
        let writer = InMemoryOrderWriter::new();

        let err = submit(&store, &writer).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Cart is empty");
        assert!(writer.orders().is_empty());
    }

    #[tokio::test]
    async fn test_second_submit_while_in_flight_is_rejected() {
        let store = CartStore::default();
        let writer = Arc::new(GatedWriter::new());
        store.add_item(&dish("A", 1000)).unwrap();

        let first = {
            let store = store.clone();
            let writer = Arc::clone(&writer);
            tokio::spawn(async move { submit(&store, writer.as_ref()).await })
        };
        writer.entered.notified().await;

        assert!(store.phase().is_submitting());
        let err = submit(&store, writer.as_ref()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SubmissionInProgress);

        let err = store.add_item(&dish("B", 500)).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartLocked);

        writer.release.notify_one();
        first.await.unwrap().unwrap();

        assert!(store.snapshot().is_empty());
        assert_eq!(writer.inner.orders().len(), 1);
    }

    #[tokio::test]
    async fn test_unlocked_store_loses_lines_added_mid_submit() {
        let store = CartStore::new(&CartSettings {
            lock_during_submission: false,
        });
        let writer = Arc::new(GatedWriter::new());
        store.add_item(&dish("A", 1000)).unwrap();

        let first = {
            let store = store.clone();
            let writer = Arc::clone(&writer);
            tokio::spawn(async move { submit(&store, writer.as_ref()).await })
        };
        writer.entered.notified().await;

        store.add_item(&dish("B", 500)).unwrap();
        writer.release.notify_one();
        first.await.unwrap().unwrap();

        let written = writer.inner.orders();
        assert_eq!(written[0].items.len(), 1);
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_dropped_submit_future_releases_store() {
        let store = CartStore::default();
        let writer = GatedWriter::new();
        store.add_item(&dish("A", 1000)).unwrap();

        let result = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            submit(&store, &writer),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(store.phase(), SubmissionPhase::Idle);
        assert_eq!(store.item_count(), 1);
    }
}
