//! # Cart Store
//!
//! The single source of truth for the shopping cart.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Every screen holds a handle to the same store
//! 2. Only one mutation may touch the cart at a time
//! 3. Snapshots are published while the lock is held, so subscribers
//!    never see a half-applied change
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Frontend Action          Store Method            Cart Change           │
//! │  ───────────────          ────────────            ───────────           │
//! │                                                                         │
//! │  Tap "Add" ──────────────► add_item() ──────────► merge or push        │
//! │                                                                         │
//! │  Tap +/- ────────────────► update_quantity() ───► qty = n, <1 removes  │
//! │                                                                         │
//! │  Tap trash ──────────────► remove_item() ───────► lines.retain(..)     │
//! │                                                                         │
//! │  Order placed ───────────► (checkout) ──────────► lines.clear()        │
//! │                                                                         │
//! │  Every call above ends with:                                            │
//! │     version += 1  →  watch::Sender::send_replace(CartSnapshot)          │
//! │                                                                         │
//! │  Screens hold a watch::Receiver<CartSnapshot> and re-render on change.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Submission Lock
//! While checkout holds a [`SubmissionGuard`], the store is in
//! [`SubmissionPhase::Submitting`]. With `lock_during_submission` on,
//! mutations are rejected with `CART_LOCKED` until the guard is released.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use platter_core::validation::validate_catalog_item;
use platter_core::{Cart, CartLine, CartTotals, CatalogItem, CoreError, Money};

use super::config::CartSettings;
use crate::error::ApiError;

// =============================================================================
// Snapshot
// =============================================================================

/// Immutable view of the cart handed to subscribers.
///
/// `version` counts applied cart mutations. It does not move when only
/// `submitting` changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub item_count: u64,
    pub line_count: usize,
    pub total_cents: i64,
    pub version: u64,
    pub submitting: bool,
}

impl CartSnapshot {
    fn capture(cart: &Cart, version: u64, submitting: bool) -> Self {
        let totals = CartTotals::from(cart);
        CartSnapshot {
            lines: cart.lines().to_vec(),
            item_count: totals.item_count,
            line_count: totals.line_count,
            total_cents: totals.total_cents,
            version,
            submitting,
        }
    }

    /// Total as Money.
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Submission Phase
// =============================================================================

/// Where the store is in the checkout lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    /// No order write in flight.
    #[default]
    Idle,

    /// An order write is in flight for this snapshot of the cart.
    Submitting(CartSnapshot),
}

impl SubmissionPhase {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionPhase::Submitting(_))
    }
}

// =============================================================================
// Store
// =============================================================================

#[derive(Debug, Default)]
struct StoreInner {
    cart: Cart,
    phase: SubmissionPhase,
    version: u64,
}

/// Shared handle to the one cart of a storefront session.
///
/// Cloning yields another handle to the same cart.
///
/// ## Usage
/// ```rust,ignore
/// let store = CartStore::new(&config.cart);
/// let mut rx = store.subscribe();
///
/// store.add_item(&naan)?;
/// rx.changed().await?;
/// assert_eq!(rx.borrow().item_count, 1);
/// ```
#[derive(Debug, Clone)]
pub struct CartStore {
    inner: Arc<Mutex<StoreInner>>,
    updates: Arc<watch::Sender<CartSnapshot>>,
    lock_during_submission: bool,
}

impl Default for CartStore {
    fn default() -> Self {
        CartStore::new(&CartSettings::default())
    }
}

impl CartStore {
    /// Creates an empty store.
    pub fn new(settings: &CartSettings) -> Self {
        let (tx, _) = watch::channel(CartSnapshot::default());
        CartStore {
            inner: Arc::new(Mutex::new(StoreInner::default())),
            updates: Arc::new(tx),
            lock_during_submission: settings.lock_during_submission,
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publishes the current state. Callers hold the lock.
    fn publish(&self, inner: &StoreInner) -> CartSnapshot {
        let snapshot =
            CartSnapshot::capture(&inner.cart, inner.version, inner.phase.is_submitting());
        self.updates.send_replace(snapshot.clone());
        snapshot
    }

    /// Runs a cart mutation under the lock, then bumps the version and
    /// publishes, whether or not the mutation changed anything.
    fn mutate<F>(&self, op: &'static str, f: F) -> Result<CartSnapshot, ApiError>
    where
        F: FnOnce(&mut Cart),
    {
        let mut inner = self.lock();

        if self.lock_during_submission && inner.phase.is_submitting() {
            debug!(op, "Cart mutation rejected during submission");
            return Err(ApiError::cart_locked());
        }

        f(&mut inner.cart);
        inner.version += 1;

        let snapshot = self.publish(&inner);
        debug!(
            op,
            version = snapshot.version,
            lines = snapshot.line_count,
            items = snapshot.item_count,
            total_cents = snapshot.total_cents,
            "Cart updated"
        );
        Ok(snapshot)
    }

    /// Adds one unit of a menu item, merging with an existing line.
    ///
    /// Malformed items are rejected before the cart is touched.
    pub fn add_item(&self, item: &CatalogItem) -> Result<CartSnapshot, ApiError> {
        validate_catalog_item(item)?;
        debug!(item_id = %item.id, "add_item");
        self.mutate("add_item", |cart| cart.add_item(item))
    }

    /// Removes a line. Unknown IDs are a no-op.
    pub fn remove_item(&self, item_id: &str) -> Result<CartSnapshot, ApiError> {
        debug!(item_id = %item_id, "remove_item");
        self.mutate("remove_item", |cart| {
            cart.remove_item(item_id);
        })
    }

    /// Sets a line's quantity. Below 1 removes the line, unknown IDs are a
    /// no-op.
    pub fn update_quantity(&self, item_id: &str, quantity: i64) -> Result<CartSnapshot, ApiError> {
        debug!(item_id = %item_id, quantity, "update_quantity");
        self.mutate("update_quantity", |cart| {
            cart.update_quantity(item_id, quantity);
        })
    }

    /// Empties the cart. Idempotent.
    pub fn clear(&self) -> Result<CartSnapshot, ApiError> {
        debug!("clear");
        self.mutate("clear", Cart::clear)
    }

    /// Σ price × quantity, computed on every call.
    pub fn total(&self) -> Money {
        self.lock().cart.total()
    }

    /// Σ quantity, computed on every call.
    pub fn item_count(&self) -> u64 {
        self.lock().cart.item_count()
    }

    /// Current state of the cart.
    pub fn snapshot(&self) -> CartSnapshot {
        let inner = self.lock();
        CartSnapshot::capture(&inner.cart, inner.version, inner.phase.is_submitting())
    }

    /// Receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.updates.subscribe()
    }

    /// Current checkout phase.
    pub fn phase(&self) -> SubmissionPhase {
        self.lock().phase.clone()
    }

    /// Whether mutations are rejected while submitting.
    pub fn locks_during_submission(&self) -> bool {
        self.lock_during_submission
    }

    /// Moves the store into `Submitting` and captures what will be written.
    ///
    /// ## Errors
    /// - `SUBMISSION_IN_PROGRESS` if a guard is already out
    /// - `VALIDATION_ERROR` ("Cart is empty") if there is nothing to submit
    pub fn begin_submission(&self) -> Result<SubmissionGuard, ApiError> {
        let mut inner = self.lock();

        if inner.phase.is_submitting() {
            return Err(CoreError::SubmissionInProgress.into());
        }
        if inner.cart.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        let snapshot = CartSnapshot::capture(&inner.cart, inner.version, true);
        inner.phase = SubmissionPhase::Submitting(snapshot.clone());
        self.publish(&inner);

        debug!(
            version = snapshot.version,
            total_cents = snapshot.total_cents,
            "Submission started"
        );

        Ok(SubmissionGuard {
            store: self.clone(),
            snapshot,
            finished: false,
        })
    }
}

// =============================================================================
// Submission Guard
// =============================================================================

/// Holds the store in `Submitting` for one checkout attempt.
///
/// ```text
/// begin_submission() ──► Submitting(snapshot)
///        │
///        ├── guard.succeed() ──► cart cleared, Idle
///        └── drop(guard)     ──► Idle, cart untouched
/// ```
#[derive(Debug)]
pub struct SubmissionGuard {
    store: CartStore,
    snapshot: CartSnapshot,
    finished: bool,
}

impl SubmissionGuard {
    /// The cart as it was when submission started.
    pub fn snapshot(&self) -> &CartSnapshot {
        &self.snapshot
    }

    /// Clears the cart and returns to `Idle` in one step.
    ///
    /// Clears whatever the cart holds now, including lines added during the
    /// write when the submission lock is off.
    pub fn succeed(mut self) -> CartSnapshot {
        self.finished = true;

        let mut inner = self.store.lock();
        inner.cart.clear();
        inner.phase = SubmissionPhase::Idle;
        inner.version += 1;

        let snapshot = self.store.publish(&inner);
        debug!(version = snapshot.version, "Submission succeeded, cart cleared");
        snapshot
    }
}

impl Drop for SubmissionGuard {
    fn drop(&mut self) {
        if self.finished {
            return;
        }

        let mut inner = self.store.lock();
        inner.phase = SubmissionPhase::Idle;
        self.store.publish(&inner);
        debug!("Submission released, cart untouched");
    }
}
