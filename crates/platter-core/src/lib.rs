//! # platter-core: Pure Business Logic for Platter
//!
//! This crate holds the food-ordering domain as pure functions and types,
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Platter Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Mobile Frontend                              │   │
//! │  │    Menu screen ──► Cart screen ──► Order summary               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    storefront                                   │   │
//! │  │    CartStore, checkout, MenuService                             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ platter-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │   menu    │  │   │
//! │  │   │CatalogItem│  │   Money   │  │   Cart    │  │MenuFilter │  │   │
//! │  │   │OrderRecord│  │           │  │CartTotals │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    platter-db (document store)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - CatalogItem, CartLine, OrderRecord
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - The cart aggregate and its invariants
//! - [`menu`] - Category and search filtering
//! - [`error`] - Domain error types
//! - [`validation`] - Boundary validation
//!
//! ## Example Usage
//!
//! ```rust
//! use platter_core::{Cart, CatalogItem};
//!
//! let naan = CatalogItem {
//!     id: "naan".into(),
//!     name: "Butter Naan".into(),
//!     description: String::new(),
//!     price_cents: 1000,
//!     image_url: String::new(),
//!     category: "Main Course".into(),
//!     is_spicy: false,
//!     is_vegetarian: true,
//! };
//!
//! let mut cart = Cart::new();
//! cart.add_item(&naan);
//! cart.add_item(&naan);
//!
//! assert_eq!(cart.line_count(), 1);
//! assert_eq!(cart.item_count(), 2);
//! assert_eq!(cart.total().cents(), 2000);
//! ```

pub mod cart;
pub mod error;
pub mod menu;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use menu::{MenuFilter, MENU_CATEGORIES};
pub use money::Money;
pub use types::*;
