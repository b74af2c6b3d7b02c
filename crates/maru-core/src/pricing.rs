//! # Pricing Module
//!
//! The cart pricing engine: discount resolution, line totals, cart
//! aggregation, and remaining stock.
//!
//! ## Pricing Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Pricing Pipeline                                    │
//! │                                                                         │
//! │  Per line:                                                              │
//! │    tiers ──► max rate where qty ≥ tier.quantity (else 0%)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │    any cart line qty ≥ 10? ──► +5% bonus, capped at 50%                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │    item_total = round(price × qty × (1 − rate))                        │
//! │                                                                         │
//! │  Whole cart:                                                            │
//! │    before = Σ price × qty        after = Σ item_total                  │
//! │       │                             │                                   │
//! │       │                             ▼                                   │
//! │       │          coupon: amount ⇒ max(0, after − value)                │
//! │       │                  percentage ⇒ round(after × (1 − v/100))       │
//! │       ▼                             ▼                                   │
//! │    CartTotals { total_before_discount, total_after_discount }          │
//! │                                                                         │
//! │  Pure functions, recomputed from state on every render. No caching.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::money::Money;
use crate::types::{CartItem, Coupon, DiscountRate, DiscountType, Product};
use crate::{BULK_PURCHASE_BONUS, MAX_DISCOUNT_RATE};

// =============================================================================
// Discount Resolver
// =============================================================================

/// Resolves the discount rate for one cart line.
///
/// Scans the product's tiers and takes the highest rate whose minimum
/// quantity the line meets (0% if none qualify). If any line anywhere in
/// the cart has reached the bulk-purchase threshold, a flat +5% bonus is
/// added on top, capped so the total never exceeds 50%.
///
/// Infallible: always returns a rate in [0%, 50%].
pub fn max_applicable_discount(item: &CartItem, cart: &Cart) -> DiscountRate {
    let base = item
        .product
        .discounts
        .iter()
        .filter(|tier| item.quantity >= tier.quantity)
        .map(|tier| tier.rate)
        .max()
        .unwrap_or_default();

    if cart.has_bulk_purchase() {
        base.add_capped(BULK_PURCHASE_BONUS, MAX_DISCOUNT_RATE)
    } else {
        base
    }
}

// =============================================================================
// Line Total Calculator
// =============================================================================

/// Post-discount total for one cart line, rounded half-up to whole won.
pub fn item_total(item: &CartItem, cart: &Cart) -> Money {
    item.subtotal()
        .apply_discount(max_applicable_discount(item, cart))
}

// =============================================================================
// Cart Total Aggregator
// =============================================================================

/// The two totals the payment panel renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Σ unit price × quantity, before any discount.
    pub total_before_discount: Money,

    /// After per-item discounts and the optional coupon.
    pub total_after_discount: Money,
}

impl CartTotals {
    /// Amount saved relative to list price.
    #[inline]
    pub fn discount_amount(&self) -> Money {
        self.total_before_discount - self.total_after_discount
    }
}

/// Computes the cart totals, applying an optional coupon.
///
/// Coupon application happens strictly after per-item discounts:
/// flat-amount coupons subtract from the post-discount sum (floored at
/// zero), percentage coupons scale it and round half-up. Idempotent -
/// the same cart and coupon always produce the same totals.
pub fn cart_totals(cart: &Cart, coupon: Option<&Coupon>) -> CartTotals {
    let mut before = Money::zero();
    let mut after = Money::zero();

    for item in cart.items() {
        before += item.subtotal();
        after += item_total(item, cart);
    }

    if let Some(coupon) = coupon {
        after = match coupon.discount_type {
            DiscountType::Amount => after.sub_floor_zero(Money::from_won(coupon.discount_value)),
            DiscountType::Percentage => after.apply_percent_off(coupon.discount_value),
        };
    }

    CartTotals {
        total_before_discount: before,
        total_after_discount: after,
    }
}

// =============================================================================
// Stock Calculator
// =============================================================================

/// Units of a product still available to purchase: stock minus the
/// quantity already committed in the cart.
///
/// Deliberately not clamped to zero - a negative result means the state
/// was already invalid, and callers must treat any value ≤ 0 as sold out.
pub fn remaining_stock(product: &Product, cart: &Cart) -> i64 {
    product.stock - cart.quantity_of(&product.id)
}

// =============================================================================
// Unit Tests
// =============================================================================
