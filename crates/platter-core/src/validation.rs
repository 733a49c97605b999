//! # Validation Module
//!
//! Input validation for everything that crosses into the cart store.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Mobile frontend                                              │
//! │  └── Buttons only offer items that came from the catalog               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Cart Store boundary (Rust)                                   │
//! │  └── THIS MODULE: reject malformed catalog items                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart aggregate                                               │
//! │  └── Trusts its input; never fails                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Non-positive quantities are NOT a validation failure. The cart treats
//! them as a removal, so there is no quantity validator here. Quantities
//! above [`MAX_LINE_QUANTITY`] are clamped by the cart rather than rejected.
//!
//! The price and quantity caps keep `MAX_PRICE_CENTS × MAX_LINE_QUANTITY`
//! far inside `i64`, so cart totals stay exact.

use crate::error::ValidationError;
use crate::types::CatalogItem;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of a catalog item id.
pub const MAX_ITEM_ID_LEN: usize = 128;

/// Maximum length of a menu search query.
pub const MAX_SEARCH_LEN: usize = 100;

/// Highest accepted menu price in minor units (1,000,000.00).
pub const MAX_PRICE_CENTS: i64 = 100_000_000;

/// Highest quantity a single cart line can hold.
pub const MAX_LINE_QUANTITY: u32 = 999;

/// Validates an item id.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most 128 characters
///
/// ```rust
/// use platter_core::validation::validate_item_id;
///
/// assert!(validate_item_id("butter-chicken").is_ok());
/// assert!(validate_item_id("  ").is_err());
/// ```
pub fn validate_item_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.len() > MAX_ITEM_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: MAX_ITEM_ID_LEN,
        });
    }

    Ok(())
}

/// Validates a price in minor units.
///
/// Zero is allowed (complimentary items). Anything above
/// [`MAX_PRICE_CENTS`] is rejected.
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a catalog item before it is added to a cart.
///
/// ```rust
/// use platter_core::types::CatalogItem;
/// use platter_core::validation::validate_catalog_item;
///
/// let mut item = CatalogItem {
///     id: "lassi".into(),
///     name: "Mango Lassi".into(),
///     description: String::new(),
///     price_cents: 120,
///     image_url: String::new(),
///     category: "Beverages".into(),
///     is_spicy: false,
///     is_vegetarian: true,
/// };
/// assert!(validate_catalog_item(&item).is_ok());
///
/// item.price_cents = -1;
/// assert!(validate_catalog_item(&item).is_err());
/// ```
pub fn validate_catalog_item(item: &CatalogItem) -> ValidationResult<()> {
    validate_item_id(&item.id)?;

    if item.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    validate_price_cents(item.price_cents)
}

/// Validates a menu search query.
///
/// ## Returns
/// The trimmed query string. Empty is allowed (no search).
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_LEN,
        });
    }

    Ok(query.to_string())
}
