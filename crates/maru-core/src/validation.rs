//! # Validation Module
//!
//! Input validation for admin-entered products and coupons.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Admin form (the UI shell)                                    │
//! │  ├── Basic format checks (empty, digits only)                          │
//! │  └── Immediate feedback while typing                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (business rule validation)                       │
//! │  ├── Ranges: stock 0..=9999, percentage 0..=100, amount 0..=100,000    │
//! │  └── Rejections become notifications, never panics                     │
//! │                                                                         │
//! │  There is no Layer 3: state is plain memory, so this module is the     │
//! │  last gate before a record enters the catalog.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Coupon, DiscountTier, DiscountType};
use crate::{MAX_COUPON_AMOUNT, MAX_STOCK};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Product Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a product price.
///
/// ## Rules
/// - Must be non-negative (zero is allowed for giveaways)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.won() < 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a stock count.
///
/// ## Rules
/// - Must be between 0 and 9,999 (the admin form's hard ceiling)
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if !(0..=MAX_STOCK).contains(&stock) {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: MAX_STOCK,
        });
    }

    Ok(())
}

/// Validates a set of quantity-discount tiers.
///
/// ## Rules
/// - Each tier's minimum quantity must be positive
/// - Each tier's rate must be at most 100% (10,000 bps)
pub fn validate_discount_tiers(tiers: &[DiscountTier]) -> ValidationResult<()> {
    for tier in tiers {
        if tier.quantity <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "discount tier quantity".to_string(),
            });
        }
        if tier.rate.bps() > 10_000 {
            return Err(ValidationError::OutOfRange {
                field: "discount tier rate".to_string(),
                min: 0,
                max: 100,
            });
        }
    }

    Ok(())
}

// =============================================================================
// Coupon Validators
// =============================================================================

/// Validates a coupon code.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 20 characters
/// - Uppercase letters and digits only (the form upcases as you type)
pub fn validate_coupon_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.len() > 20 {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: 20,
        });
    }

    if !code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only uppercase letters and digits".to_string(),
        });
    }

    Ok(())
}

/// Validates a whole coupon record.
///
/// ## Rules
/// - Name required, code per [`validate_coupon_code`]
/// - Percentage value in [0, 100]
/// - Amount value in [0, 100,000]
pub fn validate_coupon(coupon: &Coupon) -> ValidationResult<()> {
    if coupon.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    validate_coupon_code(&coupon.code)?;

    match coupon.discount_type {
        DiscountType::Percentage => {
            if !(0..=100).contains(&coupon.discount_value) {
                return Err(ValidationError::OutOfRange {
                    field: "discount value".to_string(),
                    min: 0,
                    max: 100,
                });
            }
        }
        DiscountType::Amount => {
            if !(0..=MAX_COUPON_AMOUNT).contains(&coupon.discount_value) {
                return Err(ValidationError::OutOfRange {
                    field: "discount value".to_string(),
                    min: 0,
                    max: MAX_COUPON_AMOUNT,
                });
            }
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
