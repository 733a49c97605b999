//! Order writer: where submitted orders go.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use platter_core::OrderRecord;
use platter_db::Database;

use super::ServiceError;

/// Persists order documents.
#[async_trait]
pub trait OrderWriter: Send + Sync {
    /// Writes one order. Returns once the write is durable.
    async fn write_order(&self, order: OrderRecord) -> Result<(), ServiceError>;
}

#[async_trait]
impl OrderWriter for Database {
    async fn write_order(&self, order: OrderRecord) -> Result<(), ServiceError> {
        Ok(self.orders().insert(&order).await?)
    }
}

#[derive(Debug, Default)]
struct InMemoryOrderState {
    orders: Vec<OrderRecord>,
    fail_on_write: bool,
}

/// Keeps written orders in a Vec.
#[derive(Debug, Default)]
pub struct InMemoryOrderWriter {
    state: RwLock<InMemoryOrderState>,
}

impl InMemoryOrderWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following write fail.
    pub fn set_fail_on_write(&self, fail: bool) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .fail_on_write = fail;
    }

    /// Orders written so far, oldest first.
    pub fn orders(&self) -> Vec<OrderRecord> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .orders
            .clone()
    }
}

#[async_trait]
impl OrderWriter for InMemoryOrderWriter {
    async fn write_order(&self, order: OrderRecord) -> Result<(), ServiceError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);

        if state.fail_on_write {
            return Err(ServiceError::Unavailable("order store rejected the write".to_string()));
        }

        state.orders.push(order);
        Ok(())
    }
}
