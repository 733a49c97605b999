//! # Platter Storefront
//!
//! Application layer behind the mobile ordering screens.
//!
//! ## Module Organization
//! ```text
//! storefront/
//! ├── lib.rs          ◄─── You are here (startup & Storefront context)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Cart Store + submission guard
//! │   └── config.rs   ◄─── AppConfig (toml + env)
//! ├── services/
//! │   ├── catalog.rs  ◄─── CatalogSource trait + impls
//! │   └── orders.rs   ◄─── OrderWriter trait + impls
//! ├── checkout.rs     ◄─── Order submission state machine
//! ├── menu.rs         ◄─── MenuService
//! └── error.rs        ◄─── ApiError for the frontend
//! ```
//!
//! ## Screens → Storefront
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Menu screen ──────► storefront.menu().load(filter)                    │
//! │       │                                                                 │
//! │       └─ "Add" ────► storefront.cart().add_item(&item)                 │
//! │                                                                         │
//! │  Cart screen ──────► cart().update_quantity / remove_item              │
//! │       │              cart().subscribe() → re-render on every change    │
//! │       │                                                                 │
//! │  Order summary ────► storefront.place_order().await                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod checkout;
pub mod error;
pub mod menu;
pub mod services;
pub mod state;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use platter_db::{Database, DbConfig};

pub use checkout::SubmissionReceipt;
pub use error::{ApiError, ErrorCode};
pub use menu::{MenuService, MenuView};
pub use services::{CatalogSource, OrderWriter};
pub use state::{AppConfig, CartSnapshot, CartStore, SubmissionPhase};

/// One storefront session: config, the cart, and its collaborators.
///
/// Everything here is handed in explicitly. There is no global cart.
#[derive(Clone)]
pub struct Storefront {
    config: Arc<AppConfig>,
    cart: CartStore,
    menu: MenuService,
    orders: Arc<dyn OrderWriter>,
}

impl Storefront {
    /// Assembles a storefront from explicit collaborators.
    pub fn new(
        config: AppConfig,
        catalog: Arc<dyn CatalogSource>,
        orders: Arc<dyn OrderWriter>,
    ) -> Self {
        let cart = CartStore::new(&config.cart);
        Storefront {
            config: Arc::new(config),
            cart,
            menu: MenuService::new(catalog),
            orders,
        }
    }

    /// Opens the document store named by `config` and wires it in as both
    /// catalog source and order writer.
    ///
    /// ## Startup Sequence
    /// ```text
    /// 1. Resolve database path (config, PLATTER_DATABASE_PATH, data dir)
    /// 2. Connect (SQLite, WAL) and run migrations
    /// 3. Build the Cart Store from config.cart
    /// ```
    pub async fn connect(config: AppConfig) -> Result<Self, ApiError> {
        let db_path = config.resolve_database_path()?;
        info!(?db_path, store = %config.store_name, "Starting storefront");

        let db = Database::new(DbConfig::new(db_path)).await?;
        Ok(Self::with_database(config, db))
    }

    /// Wires an already-open database in as both collaborators.
    pub fn with_database(config: AppConfig, db: Database) -> Self {
        let db = Arc::new(db);
        Self::new(config, db.clone(), db)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn menu(&self) -> &MenuService {
        &self.menu
    }

    /// Submits the cart. See [`checkout::submit`].
    pub async fn place_order(&self) -> Result<SubmissionReceipt, ApiError> {
        checkout::submit(&self.cart, self.orders.as_ref()).await
    }

    /// Cart total formatted for display, e.g. `₹349.00`.
    pub fn formatted_total(&self) -> String {
        self.config.format_currency(self.cart.total().cents())
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront=trace` - Trace for the storefront only
/// - Default: `info,platter=debug,storefront=debug,sqlx=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,platter=debug,storefront=debug,sqlx=warn"));

    // A subscriber may already be installed by the host application
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
