//! # Repository Module
//!
//! Collection access for the Platter document store.
//!
//! ## Collections
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  MenuService                          checkout::submit                 │
//! │       │                                     │                           │
//! │       │  db.menu().list_all()               │  db.orders().insert(..)  │
//! │       ▼                                     ▼                           │
//! │  MenuRepository                       OrderRepository                  │
//! │  ├── list_all()                       ├── insert(order)                │
//! │  ├── get_by_id(id)                    ├── get_by_id(id)                │
//! │  ├── by_category(category)            ├── list_recent(limit)           │
//! │  ├── upsert(item)                     └── count()                      │
//! │  └── count()                                                           │
//! │       │                                     │                           │
//! │       ▼                                     ▼                           │
//! │  menu_items table                     orders table (items as JSON)     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`MenuRepository`](menu::MenuRepository) - Catalog reads and seeding
//! - [`OrderRepository`](order::OrderRepository) - Order documents

pub mod menu;
pub mod order;
