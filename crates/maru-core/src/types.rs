//! # Domain Types
//!
//! Core domain types used throughout Maru Mart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartItem     │   │     Coupon      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  product (snap) │   │  name           │       │
//! │  │  name           │   │  quantity       │   │  code (unique)  │       │
//! │  │  price (won)    │   └─────────────────┘   │  discount_type  │       │
//! │  │  stock          │                         │  discount_value │       │
//! │  │  discounts[]    │   ┌─────────────────┐   └─────────────────┘       │
//! │  │  description?   │   │  DiscountRate   │                             │
//! │  │  is_recommended │   │  bps (u32)      │                             │
//! │  └─────────────────┘   │  1000 = 10%     │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Compatibility
//! These types round-trip against the JSON the storefront has always
//! persisted: camelCase field names, tier rates as fractions (`0.1`),
//! coupons as `{"discountType": "amount", "discountValue": 5000}`.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::money::Money;

// =============================================================================
// Discount Rate
// =============================================================================

/// A discount rate in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000. 1000 bps = 10%.
/// All rate math stays in integers; floats appear only at the
/// serialization boundary, where the persisted format stores fractions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a discount rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a fraction (for display and serialization only).
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds `bonus` to this rate, capping the sum at `cap`.
    ///
    /// The bulk-purchase bonus uses this: base tier rate + 5%, never
    /// exceeding the 50% ceiling.
    #[inline]
    pub fn add_capped(self, bonus: DiscountRate, cap: DiscountRate) -> DiscountRate {
        DiscountRate((self.0 + bonus.0).min(cap.0))
    }
}

/// Serializes as the fraction the persisted format expects (`0.1` for 10%).
impl Serialize for DiscountRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.fraction())
    }
}

/// Deserializes from a fraction in [0, 1], rounding to the nearest bps.
impl<'de> Deserialize<'de> for DiscountRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fraction = f64::deserialize(deserializer)?;
        if !(0.0..=1.0).contains(&fraction) {
            return Err(D::Error::custom(format!(
                "discount rate must be between 0 and 1, got {fraction}"
            )));
        }
        Ok(DiscountRate((fraction * 10_000.0).round() as u32))
    }
}

// =============================================================================
// Discount Tier
// =============================================================================

/// A quantity-discount tier: buy at least `quantity`, get `rate` off.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountTier {
    /// Minimum quantity that unlocks this tier.
    pub quantity: i64,

    /// Discount rate unlocked at the tier.
    pub rate: DiscountRate,
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier. Seed products use short ids ("p1"); admin-created
    /// products get a UUID v4.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Unit price in whole won.
    pub price: Money,

    /// Stock on hand. Never negative at rest; the cart layer enforces
    /// quantity ≤ stock at mutation time.
    pub stock: i64,

    /// Quantity-discount tiers, as entered by the admin.
    #[serde(default)]
    pub discounts: Vec<DiscountTier>,

    /// Optional marketing copy shown on the product card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Flags the product as recommended in the catalog view.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_recommended: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Product {
    /// Returns the highest tier rate the product offers at any quantity.
    ///
    /// Used by the catalog view to advertise "up to N% off".
    pub fn max_discount_rate(&self) -> DiscountRate {
        self.discounts
            .iter()
            .map(|tier| tier.rate)
            .max()
            .unwrap_or_default()
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the shopping cart.
///
/// ## Design Notes
/// Carries a full product snapshot rather than an id. The cart keeps
/// rendering consistently even if the admin edits the product afterwards,
/// and the persisted `cart` key stays self-contained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product snapshot taken when the line was created.
    pub product: Product,

    /// Quantity in the cart. Always positive; a line at zero is removed.
    pub quantity: i64,
}

impl CartItem {
    /// Pre-discount line subtotal (unit price × quantity).
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Coupon
// =============================================================================

/// How a coupon discounts the cart total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// Flat won amount off the post-discount total, floored at zero.
    Amount,
    /// Percentage off the post-discount total.
    Percentage,
}

/// A cart-wide coupon, applied strictly after per-item discounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    /// Display name ("₩5,000 off").
    pub name: String,

    /// Unique code (uppercase alphanumeric). Identity for selection
    /// and deletion.
    pub code: String,

    /// Flat amount or percentage.
    pub discount_type: DiscountType,

    /// Won for `Amount`, whole percent in [0, 100] for `Percentage`.
    pub discount_value: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_rate_serializes_as_fraction() {
        let rate = DiscountRate::from_bps(1000);
        assert_eq!(serde_json::to_string(&rate).unwrap(), "0.1");
    }

    #[test]
    fn test_discount_rate_deserializes_from_fraction() {
        let rate: DiscountRate = serde_json::from_str("0.25").unwrap();
        assert_eq!(rate.bps(), 2500);

        assert!(serde_json::from_str::<DiscountRate>("1.5").is_err());
        assert!(serde_json::from_str::<DiscountRate>("-0.1").is_err());
    }

    #[test]
    fn test_add_capped() {
        let base = DiscountRate::from_bps(4_800);
        let bonus = DiscountRate::from_bps(500);
        let cap = DiscountRate::from_bps(5_000);
        assert_eq!(base.add_capped(bonus, cap).bps(), 5_000);

        let low = DiscountRate::from_bps(1_000);
        assert_eq!(low.add_capped(bonus, cap).bps(), 1_500);
    }

    #[test]
    fn test_product_json_shape() {
        let json = r#"{
            "id": "p1",
            "name": "Premium Widget",
            "price": 10000,
            "stock": 20,
            "discounts": [{ "quantity": 10, "rate": 0.1 }],
            "description": "Top-shelf quality.",
            "isRecommended": true
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price.won(), 10_000);
        assert_eq!(product.discounts[0].rate.bps(), 1000);
        assert!(product.is_recommended);

        let back = serde_json::to_value(&product).unwrap();
        assert_eq!(back["isRecommended"], true);
        assert_eq!(back["discounts"][0]["rate"], 0.1);
    }

    #[test]
    fn test_product_optional_fields_default() {
        let json = r#"{ "id": "p9", "name": "Plain", "price": 500, "stock": 3 }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.discounts.is_empty());
        assert!(product.description.is_none());
        assert!(!product.is_recommended);

        // Omitted fields stay omitted on the way back out.
        let back = serde_json::to_value(&product).unwrap();
        assert!(back.get("description").is_none());
        assert!(back.get("isRecommended").is_none());
    }

    #[test]
    fn test_max_discount_rate() {
        let product = Product {
            id: "p1".into(),
            name: "Widget".into(),
            price: Money::from_won(10_000),
            stock: 20,
            discounts: vec![
                DiscountTier { quantity: 10, rate: DiscountRate::from_bps(1000) },
                DiscountTier { quantity: 20, rate: DiscountRate::from_bps(2000) },
            ],
            description: None,
            is_recommended: false,
        };
        assert_eq!(product.max_discount_rate().bps(), 2000);
    }

    #[test]
    fn test_coupon_json_shape() {
        let json = r#"{
            "name": "₩5,000 off",
            "code": "AMOUNT5000",
            "discountType": "amount",
            "discountValue": 5000
        }"#;
        let coupon: Coupon = serde_json::from_str(json).unwrap();
        assert_eq!(coupon.discount_type, DiscountType::Amount);
        assert_eq!(coupon.discount_value, 5000);

        let back = serde_json::to_value(&coupon).unwrap();
        assert_eq!(back["discountType"], "amount");
        assert_eq!(back["discountValue"], 5000);
    }

    #[test]
    fn test_cart_item_subtotal() {
        let product = Product {
            id: "p1".into(),
            name: "Widget".into(),
            price: Money::from_won(2_500),
            stock: 10,
            discounts: vec![],
            description: None,
            is_recommended: false,
        };
        let item = CartItem { product, quantity: 4 };
        assert_eq!(item.subtotal().won(), 10_000);
    }
}
