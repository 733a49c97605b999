//! # Cart Aggregate
//!
//! The in-memory shopping cart and its consistency rules.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  add_item(item) ──────────► id present?  yes → quantity += 1 (capped)   │
//! │                                          no  → push line (qty 1)        │
//! │                                                                         │
//! │  update_quantity(id, n) ──► n < 1?       yes → remove_item(id)          │
//! │                                          no  → quantity = min(n, cap)   │
//! │                                                                         │
//! │  remove_item(id) ─────────► retain lines where line.id != id            │
//! │                                                                         │
//! │  clear() ─────────────────► lines = []                                  │
//! │                                                                         │
//! │  NOTE: none of these fail. Unknown ids are no-ops.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per item id
//! - Every line has `1 <= quantity <= MAX_LINE_QUANTITY`
//! - Lines stay in first-add order; quantity changes never reorder them

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CartLine, CatalogItem};
use crate::validation::MAX_LINE_QUANTITY;

/// The shopping cart aggregate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds one unit of a catalog item.
    ///
    /// Merges into the existing line when the id is already present,
    /// otherwise appends a new line snapshotting the item's fields.
    /// A merged line stops growing at [`MAX_LINE_QUANTITY`].
    pub fn add_item(&mut self, item: &CatalogItem) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.id == item.id) {
            line.quantity = line.quantity.saturating_add(1).min(MAX_LINE_QUANTITY);
            return;
        }

        self.lines.push(CartLine::from_catalog_item(item));
    }

    /// Removes the line for `item_id`. Absent ids are ignored.
    ///
    /// Returns whether a line was removed.
    pub fn remove_item(&mut self, item_id: &str) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.id != item_id);
        self.lines.len() != initial_len
    }

    /// Sets the quantity of a line to exactly `quantity`.
    ///
    /// ## Behavior
    /// - `quantity < 1`: same as [`Cart::remove_item`]
    /// - `quantity > MAX_LINE_QUANTITY`: clamped to the cap
    /// - id not in cart: no-op
    ///
    /// Returns whether the cart changed.
    pub fn update_quantity(&mut self, item_id: &str, quantity: i64) -> bool {
        if quantity < 1 {
            return self.remove_item(item_id);
        }

        let quantity = u32::try_from(quantity)
            .unwrap_or(MAX_LINE_QUANTITY)
            .min(MAX_LINE_QUANTITY);
        match self.lines.iter_mut().find(|l| l.id == item_id) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Empties the cart. Calling it on an empty cart is fine.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in first-add order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Looks up the line for an item id.
    pub fn line(&self, item_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == item_id)
    }

    /// Σ price × quantity. Recomputed on every call.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Σ quantity over all lines (the badge on the cart button).
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Cart totals summary for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub line_count: usize,
    pub item_count: u64,
    pub total_cents: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            item_count: cart.item_count(),
            total_cents: cart.total().cents(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu_item(id: &str, price_cents: i64) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            name: format!("Dish {}", id),
            description: String::new(),
            price_cents,
            image_url: String::new(),
            category: "Main Course".to_string(),
            is_spicy: false,
            is_vegetarian: true,
        }
    }

    #[test]
    fn test_add_item_creates_line_with_quantity_one() {
        let mut cart = Cart::new();
        cart.add_item(&menu_item("A", 1000));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
        assert_eq!(cart.total().cents(), 1000);
    }

    #[test]
    fn test_add_same_item_merges_into_one_line() {
        let mut cart = Cart::new();
        let item = menu_item("A", 1000);

        cart.add_item(&item);
        cart.add_item(&item);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.line("A").map(|l| l.quantity), Some(2));
    }

    #[test]
    fn test_lines_unique_for_any_add_sequence() {
        let mut cart = Cart::new();
        for id in ["A", "B", "A", "C", "B", "A", "C", "C"] {
            cart.add_item(&menu_item(id, 100));
        }

        let mut ids: Vec<&str> = cart.lines().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        ids.dedup();
        assert_eq!(ids.len(), cart.line_count());
        assert_eq!(cart.item_count(), 8);
    }

    #[test]
    fn test_update_quantity_is_absolute() {
        let mut cart = Cart::new();
        let item = menu_item("A", 1000);
        cart.add_item(&item);
        cart.add_item(&item);

        assert!(cart.update_quantity("A", 5));
        assert_eq!(cart.line("A").map(|l| l.quantity), Some(5));
    }

    #[test]
    fn test_update_quantity_below_one_removes_line() {
        let mut cart = Cart::new();
        cart.add_item(&menu_item("A", 1000));
        cart.add_item(&menu_item("B", 500));

        assert!(cart.update_quantity("A", 0));
        assert_eq!(cart.line_count(), 1);
        assert!(cart.line("A").is_none());

        assert!(cart.update_quantity("B", -3));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_clamps_to_cap() {
        let mut cart = Cart::new();
        cart.add_item(&menu_item("A", 100_000_000));

        assert!(cart.update_quantity("A", 2_000_000_000));
        assert_eq!(cart.line("A").map(|l| l.quantity), Some(MAX_LINE_QUANTITY));
        assert_eq!(cart.total().cents(), 100_000_000 * i64::from(MAX_LINE_QUANTITY));

        assert!(!cart.update_quantity("A", i64::MAX));
        assert_eq!(cart.line("A").map(|l| l.quantity), Some(MAX_LINE_QUANTITY));
    }

    #[test]
    fn test_merge_stops_at_cap() {
        let mut cart = Cart::new();
        let item = menu_item("A", 1000);
        cart.add_item(&item);
        cart.update_quantity("A", i64::from(MAX_LINE_QUANTITY));

        cart.add_item(&item);

        assert_eq!(cart.line("A").map(|l| l.quantity), Some(MAX_LINE_QUANTITY));
        assert_eq!(cart.item_count(), u64::from(MAX_LINE_QUANTITY));
    }

    #[test]
    fn test_update_or_remove_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&menu_item("A", 1000));
        let before = cart.clone();

        assert!(!cart.update_quantity("missing", 4));
        assert!(!cart.remove_item("missing"));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_quantity_changes_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add_item(&menu_item("A", 100));
        cart.add_item(&menu_item("B", 100));
        cart.add_item(&menu_item("C", 100));

        cart.update_quantity("A", 9);
        cart.add_item(&menu_item("B", 100));

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        cart.add_item(&menu_item("A", 10));
        cart.update_quantity("A", 2);
        cart.add_item(&menu_item("B", 5));
        cart.update_quantity("B", 3);

        assert_eq!(cart.total().cents(), 35);
        assert_eq!(cart.item_count(), 5);

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.item_count, 5);
        assert_eq!(totals.total_cents, 35);
    }

    #[test]
    fn test_snapshot_on_add() {
        let mut cart = Cart::new();
        let mut item = menu_item("A", 1000);
        cart.add_item(&item);

        // Menu price changes after the fact
        item.price_cents = 5000;
        item.name = "Renamed".to_string();
        cart.add_item(&item);

        let line = cart.line("A").unwrap();
        assert_eq!(line.price_cents, 1000);
        assert_eq!(line.name, "Dish A");
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut cart = Cart::new();
        cart.clear();
        assert!(cart.is_empty());

        cart.add_item(&menu_item("A", 1000));
        cart.clear();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero());
        assert_eq!(cart.item_count(), 0);
    }
}
