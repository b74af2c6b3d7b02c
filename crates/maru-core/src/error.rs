//! # Error Types
//!
//! Domain-specific error types for maru-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  maru-core errors (this file)                                          │
//! │  ├── CoreError        - Rejected operations (stock, coupons, lookup)   │
//! │  └── ValidationError  - Admin input validation failures                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → Store → notification               │
//! │                                                                         │
//! │  There are NO fatal error conditions: every CoreError is a rejected    │
//! │  operation that leaves state untouched and becomes a user-facing       │
//! │  notification. The pricing functions themselves never fail.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, code, totals)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Rejected operations and lookup failures.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// Product cannot be found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Coupon code does not exist.
    #[error("Coupon not found: {0}")]
    CouponNotFound(String),

    /// Remaining stock is zero (or the state was already invalid and
    /// remaining stock went negative). Adding to the cart is rejected.
    #[error("{name} is out of stock")]
    OutOfStock { name: String },

    /// The requested quantity exceeds what the product has on hand.
    ///
    /// ## User Workflow
    /// ```text
    /// Set quantity to 25
    ///      │
    ///      ▼
    /// Check stock: 20 on hand
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Widget", available: 20 }
    ///      │
    ///      ▼
    /// Notification: "Only 20 of Widget in stock"
    /// ```
    #[error("Only {available} of {name} in stock")]
    InsufficientStock { name: String, available: i64 },

    /// A coupon with this code already exists.
    #[error("Coupon code {code} already exists")]
    DuplicateCouponCode { code: String },

    /// Percentage coupons require a minimum basket size.
    #[error("Percentage coupons require a total of at least {minimum} (current: {total})")]
    CouponBelowMinimum { total: Money, minimum: Money },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Admin input validation errors.
///
/// Raised before any state changes when a product or coupon form
/// doesn't meet requirements.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., coupon code with lowercase letters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            name: "Widget".to_string(),
            available: 20,
        };
        assert_eq!(err.to_string(), "Only 20 of Widget in stock");

        let err = CoreError::CouponBelowMinimum {
            total: Money::from_won(9_999),
            minimum: Money::from_won(10_000),
        };
        assert_eq!(
            err.to_string(),
            "Percentage coupons require a total of at least ₩10,000 (current: ₩9,999)"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
