//! # External Services
//!
//! The two collaborators the storefront depends on, as async traits.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   MenuService ─────► dyn CatalogSource ──┬──► Database (menu_items)    │
//! │                                          └──► InMemoryCatalog          │
//! │                                                                         │
//! │   checkout::submit ► dyn OrderWriter ────┬──► Database (orders)        │
//! │                                          └──► InMemoryOrderWriter      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The in-memory implementations can be told to fail, which is how the
//! failure paths of checkout and menu loading are exercised.

use platter_db::DbError;
use thiserror::Error;

pub mod catalog;
pub mod orders;

pub use catalog::{CatalogSource, InMemoryCatalog};
pub use orders::{InMemoryOrderWriter, OrderWriter};

/// Failure reported by an external collaborator.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The backing service could not be reached or refused the request.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// The document store failed.
    #[error(transparent)]
    Store(#[from] DbError),
}
