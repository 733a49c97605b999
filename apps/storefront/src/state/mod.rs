//! # State Module
//!
//! Long-lived storefront state.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────┐      ┌──────────────────────────┐    │
//! │  │         CartStore            │      │        AppConfig         │    │
//! │  │                              │      │                          │    │
//! │  │  Arc<Mutex<Cart + phase>>    │      │  store_name              │    │
//! │  │  watch::Sender<CartSnapshot> │      │  currency_symbol         │    │
//! │  │                              │      │  cart.lock_during_...    │    │
//! │  └──────────────────────────────┘      └──────────────────────────┘    │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartStore: one Mutex, snapshots published under it                  │
//! │  • AppConfig: read-only after initialization                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store is constructed once per session and handed to each consumer.

mod cart;
mod config;

pub use cart::{CartSnapshot, CartStore, SubmissionGuard, SubmissionPhase};
pub use config::{AppConfig, CartSettings, ConfigError};
