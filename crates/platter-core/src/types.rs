//! # Domain Types
//!
//! Core domain types used throughout Platter.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CatalogItem    │   │    CartLine     │   │  OrderRecord    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │──►│  id (same)      │──►│  items[]        │       │
//! │  │  name           │   │  name (frozen)  │   │  total_cents    │       │
//! │  │  price_cents    │   │  price (frozen) │   │  timestamp      │       │
//! │  │  category       │   │  quantity ≥ 1   │   │  status         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `CartLine` copies every catalog field at the moment it is added.
//! Later menu edits never change lines already in a cart.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Catalog Item
// =============================================================================

/// A purchasable menu item, as supplied by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogItem {
    /// Unique within the catalog.
    pub id: String,

    /// Display name shown on the menu card.
    pub name: String,

    /// Short description under the name.
    #[serde(default)]
    pub description: String,

    /// Unit price in minor currency units.
    pub price_cents: i64,

    /// Image reference (URL).
    #[serde(default)]
    pub image_url: String,

    /// Menu category ("Starters", "Main Course", ...).
    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub is_spicy: bool,

    #[serde(default)]
    pub is_vegetarian: bool,
}

impl CatalogItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One distinct menu item held in the cart.
///
/// ## Invariants (enforced by [`crate::cart::Cart`])
/// - `quantity >= 1`
/// - at most one line per `id` in a cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    /// Catalog item id this line was created from.
    pub id: String,

    /// Name at time of adding (frozen).
    pub name: String,

    /// Description at time of adding (frozen).
    pub description: String,

    /// Unit price at time of adding (frozen).
    pub price_cents: i64,

    pub image_url: String,
    pub category: String,
    pub is_spicy: bool,
    pub is_vegetarian: bool,

    /// Quantity in cart.
    pub quantity: u32,
}

impl CartLine {
    /// Creates a line with quantity 1, copying every catalog field.
    pub fn from_catalog_item(item: &CatalogItem) -> Self {
        CartLine {
            id: item.id.clone(),
            name: item.name.clone(),
            description: item.description.clone(),
            price_cents: item.price_cents,
            image_url: item.image_url.clone(),
            category: item.category.clone(),
            is_spicy: item.is_spicy,
            is_vegetarian: item.is_vegetarian,
            quantity: 1,
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Status of an order document in the store.
///
/// The storefront only ever writes `Pending`. The other states are set by
/// the kitchen side and exist here so stored documents deserialize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl OrderStatus {
    /// Lowercase wire name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "cancelled" | "canceled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("unknown order status: {}", other)),
        }
    }
}

// =============================================================================
// Order Record
// =============================================================================

/// The document written to the order store when a user checks out.
///
/// ```json
/// {
///   "id": "8c0f…",
///   "items": [{ "id": "A", "quantity": 2, ... }],
///   "totalCents": 2000,
///   "timestamp": "2026-10-19T12:00:00Z",
///   "status": "pending"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderRecord {
    pub id: String,
    pub items: Vec<CartLine>,
    pub total_cents: i64,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
    pub status: OrderStatus,
}

impl OrderRecord {
    /// Builds a pending order from a set of cart lines.
    ///
    /// The total is computed from the lines, so the record can never
    /// disagree with its own items.
    pub fn pending(id: impl Into<String>, items: Vec<CartLine>, timestamp: DateTime<Utc>) -> Self {
        let total: Money = items.iter().map(CartLine::line_total).sum();
        OrderRecord {
            id: id.into(),
            items,
            total_cents: total.cents(),
            timestamp,
            status: OrderStatus::Pending,
        }
    }

    /// Returns the order total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Σ quantity over the order lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|l| u64::from(l.quantity)).sum()
    }
}
