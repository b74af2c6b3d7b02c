//! # maru-core: Pure Pricing Engine for Maru Mart
//!
//! This crate is the **heart** of the storefront. It contains the cart
//! pricing engine as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Maru Mart Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      UI Shell (any frontend)                    │   │
//! │  │    Catalog ──► Cart panel ──► Coupon select ──► Admin panel    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ subscriptions                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 maru-store (stateful shell)                     │   │
//! │  │    Store, notifications, timers, JSON key/value mirror          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ maru-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  pricing  │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │ discounts │  │   │
//! │  │   │  Coupon   │  │ rate math │  │ mutations │  │  totals   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO STORAGE • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Coupon, CartItem, DiscountRate)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart container and mutation policy
//! - [`pricing`] - Discount resolver, line totals, cart aggregation, stock
//! - [`format`] - Price formatter (shopper/admin/sold-out)
//! - [`search`] - Product search filter
//! - [`validation`] - Admin input validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: totals recompute from state on every render;
//!    same cart and coupon always produce the same numbers
//! 2. **No I/O**: storage, timers, and notifications live in maru-store
//! 3. **Integer Money**: whole won (i64) and basis-point rates, with
//!    explicit round-half-up
//! 4. **Rejections, not panics**: constraint violations are typed errors
//!    that leave state untouched
//!
//! ## Example Usage
//!
//! ```rust
//! use maru_core::cart::Cart;
//! use maru_core::money::Money;
//! use maru_core::pricing::cart_totals;
//! use maru_core::types::{DiscountRate, DiscountTier, Product};
//!
//! let product = Product {
//!     id: "p1".into(),
//!     name: "Premium Widget".into(),
//!     price: Money::from_won(10_000),
//!     stock: 20,
//!     discounts: vec![DiscountTier { quantity: 10, rate: DiscountRate::from_bps(1000) }],
//!     description: None,
//!     is_recommended: false,
//! };
//!
//! let mut cart = Cart::new();
//! cart.add_item(&product).unwrap();
//! cart.set_quantity(&product, 10).unwrap();
//!
//! // Ten units unlock the 10% tier plus the +5% bulk bonus.
//! let totals = cart_totals(&cart, None);
//! assert_eq!(totals.total_before_discount.won(), 100_000);
//! assert_eq!(totals.total_after_discount.won(), 85_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod format;
pub mod money;
pub mod pricing;
pub mod search;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use maru_core::Money` instead of
// `use maru_core::money::Money`

pub use cart::Cart;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::CartTotals;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// A single line at this quantity unlocks the bulk-purchase bonus for
/// every line in the cart.
pub const BULK_PURCHASE_THRESHOLD: i64 = 10;

/// The flat bulk-purchase bonus: +5%.
pub const BULK_PURCHASE_BONUS: DiscountRate = DiscountRate::from_bps(500);

/// Ceiling on any resolved per-line rate: 50%.
pub const MAX_DISCOUNT_RATE: DiscountRate = DiscountRate::from_bps(5_000);

/// Percentage coupons require at least this post-discount total.
/// The boundary itself is accepted: a ₩10,000 basket qualifies.
pub const PERCENTAGE_COUPON_MIN_TOTAL: Money = Money::from_won(10_000);

/// Maximum stock the admin form accepts for a product.
pub const MAX_STOCK: i64 = 9_999;

/// Maximum value of a flat-amount coupon, in won.
pub const MAX_COUPON_AMOUNT: i64 = 100_000;
