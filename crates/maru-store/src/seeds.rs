//! # Seed Data
//!
//! Built-in catalog and coupons, used whenever a persisted key is absent
//! or fails to parse. First launch, cleared storage, and corrupt files
//! all land here, so the storefront always has something to sell.

use maru_core::money::Money;
use maru_core::types::{Coupon, DiscountRate, DiscountTier, DiscountType, Product};

/// The three built-in products.
pub fn seed_products() -> Vec<Product> {
    vec![
        Product {
            id: "p1".to_string(),
            name: "Premium Widget".to_string(),
            price: Money::from_won(10_000),
            stock: 20,
            discounts: vec![
                DiscountTier {
                    quantity: 10,
                    rate: DiscountRate::from_bps(1_000),
                },
                DiscountTier {
                    quantity: 20,
                    rate: DiscountRate::from_bps(2_000),
                },
            ],
            description: Some("Top-shelf quality, our flagship item.".to_string()),
            is_recommended: false,
        },
        Product {
            id: "p2".to_string(),
            name: "Utility Gadget".to_string(),
            price: Money::from_won(20_000),
            stock: 20,
            discounts: vec![DiscountTier {
                quantity: 10,
                rate: DiscountRate::from_bps(1_500),
            }],
            description: Some("A practical all-rounder packed with features.".to_string()),
            is_recommended: true,
        },
        Product {
            id: "p3".to_string(),
            name: "Mega Bundle".to_string(),
            price: Money::from_won(30_000),
            stock: 20,
            discounts: vec![
                DiscountTier {
                    quantity: 10,
                    rate: DiscountRate::from_bps(2_000),
                },
                DiscountTier {
                    quantity: 30,
                    rate: DiscountRate::from_bps(2_500),
                },
            ],
            description: Some("High capacity and high performance.".to_string()),
            is_recommended: false,
        },
    ]
}

/// The two built-in coupons.
pub fn seed_coupons() -> Vec<Coupon> {
    vec![
        Coupon {
            name: "₩5,000 off".to_string(),
            code: "AMOUNT5000".to_string(),
            discount_type: DiscountType::Amount,
            discount_value: 5_000,
        },
        Coupon {
            name: "10% off".to_string(),
            code: "PERCENT10".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: 10,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use maru_core::validation::{validate_coupon, validate_discount_tiers, validate_stock};

    #[test]
    fn test_seed_products_pass_validation() {
        let products = seed_products();
        assert_eq!(products.len(), 3);
        for product in &products {
            validate_stock(product.stock).unwrap();
            validate_discount_tiers(&product.discounts).unwrap();
        }
    }

    #[test]
    fn test_seed_coupons_pass_validation() {
        let coupons = seed_coupons();
        assert_eq!(coupons.len(), 2);
        for coupon in &coupons {
            validate_coupon(coupon).unwrap();
        }
    }
}
