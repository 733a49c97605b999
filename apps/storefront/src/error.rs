//! # API Error Type
//!
//! Unified error type for everything the storefront exposes to the
//! mobile frontend.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Platter                                │
//! │                                                                         │
//! │  Frontend                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  placeOrder()                                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  checkout::submit → Result<SubmissionReceipt, ApiError>          │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Empty cart?      ─── CoreError::EmptyCart ──────┐              │  │
//! │  │         │                                        │              │  │
//! │  │         ▼                                        ▼              │  │
//! │  │  Write failed?    ─── DbError / writer error ── ApiError ──────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  e.code      = "ORDER_FAILED"                                           │
//! │  e.message   = "Failed to place order. Please try again."               │
//! │  e.retryable = true   → show a "Try again" action                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use platter_core::{CoreError, ValidationError};
use platter_db::DbError;

use crate::state::ConfigError;

/// User-facing message for a failed order write.
pub const ORDER_FAILED_MESSAGE: &str = "Failed to place order. Please try again.";

/// API error returned from storefront operations.
///
/// ## Serialization
/// ```json
/// {
///   "code": "CART_LOCKED",
///   "message": "Cart cannot be changed while an order is being placed",
///   "retryable": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Whether repeating the same action can succeed
    pub retryable: bool,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Document store operation failed
    DatabaseError,

    /// Cart mutation rejected while an order is being placed
    CartLocked,

    /// A second submit arrived while one is in flight
    SubmissionInProgress,

    /// The order write failed; the cart is unchanged
    OrderFailed,

    /// Configuration could not be loaded
    ConfigError,
}

impl ApiError {
    /// Creates a new, non-retryable API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            retryable: false,
        }
    }

    /// Marks the error as retryable.
    pub fn retryable(mut self) -> Self {
        self.retryable = true;
        self
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Cart mutation attempted during submission.
    pub fn cart_locked() -> Self {
        ApiError::new(
            ErrorCode::CartLocked,
            "Cart cannot be changed while an order is being placed",
        )
    }

    /// The order write failed. Always retryable.
    pub fn order_failed() -> Self {
        ApiError::new(ErrorCode::OrderFailed, ORDER_FAILED_MESSAGE).retryable()
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => ApiError::new(
                ErrorCode::ValidationError,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::ConstraintViolation(e) => {
                tracing::error!("Constraint violation: {}", e);
                ApiError::validation("Invalid document")
            }
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed").retryable()
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::Serialization(e) => {
                tracing::error!("Stored document is malformed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Stored document is malformed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted").retryable()
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptyCart => ApiError::validation(CoreError::EmptyCart.to_string()),
            CoreError::SubmissionInProgress => ApiError::new(
                ErrorCode::SubmissionInProgress,
                CoreError::SubmissionInProgress.to_string(),
            ),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cart_maps_to_validation() {
        let err = ApiError::from(CoreError::EmptyCart);
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Cart is empty");
        assert!(!err.retryable);
    }

    #[test]
    fn test_core_errors_map_to_codes() {
        let err = ApiError::from(CoreError::SubmissionInProgress);
        assert_eq!(err.code, ErrorCode::SubmissionInProgress);

        let err = ApiError::from(CoreError::Validation(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: 100_000_000,
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.starts_with("price must be between"));
    }

    #[test]
    fn test_order_failed_is_retryable() {
        let err = ApiError::order_failed();
        assert_eq!(err.code, ErrorCode::OrderFailed);
        assert!(err.retryable);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ApiError::cart_locked()).unwrap();
        assert_eq!(json["code"], "CART_LOCKED");
        assert_eq!(json["retryable"], false);
        assert!(json["message"].as_str().unwrap().contains("being placed"));
    }

    #[test]
    fn test_db_not_found_keeps_entity() {
        let err = ApiError::from(DbError::not_found("Order", "abc"));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Order not found: abc");
    }
}
