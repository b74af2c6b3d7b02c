//! # Cart Module
//!
//! The shopping cart container and its mutation policy.
//!
//! ## Line State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Line Lifecycle                                  │
//! │                                                                         │
//! │            add_item                set_quantity(n)                      │
//! │  ┌────────┐  (stock ok)  ┌────────────┐  (n ≤ stock)  ┌────────────┐   │
//! │  │ absent │─────────────►│ present(1) │──────────────►│ present(n) │   │
//! │  └────────┘              └────────────┘               └────────────┘   │
//! │      ▲                                                      │          │
//! │      │          remove_item / set_quantity(≤0)              │          │
//! │      └──────────────────────────────────────────────────────┘          │
//! │                                                                         │
//! │  Rejections (OutOfStock, InsufficientStock) leave the cart UNCHANGED.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutation is a plain `(cart, action) → cart` step with no hidden
//! global state; the store layer decides what to persist and notify.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::pricing::remaining_stock;
use crate::types::{CartItem, Product};
use crate::BULK_PURCHASE_THRESHOLD;

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by product id (adding the same product increments)
/// - Line quantity is always positive and never exceeds the product's
///   stock at the time of the mutation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    // Persisted as a bare JSON array under the "cart" key.
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// The cart lines, in insertion order.
    #[inline]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Checks if the cart is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of unique lines in the cart.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all lines (the badge count).
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Returns the quantity of the given product in the cart (0 if absent).
    pub fn quantity_of(&self, product_id: &str) -> i64 {
        self.items
            .iter()
            .find(|i| i.product.id == product_id)
            .map_or(0, |i| i.quantity)
    }

    /// True when any single line has reached the bulk-purchase threshold,
    /// which unlocks the flat bonus for every line in the cart.
    pub fn has_bulk_purchase(&self) -> bool {
        self.items
            .iter()
            .any(|i| i.quantity >= BULK_PURCHASE_THRESHOLD)
    }

    /// Adds one unit of a product to the cart.
    ///
    /// ## Behavior
    /// - Remaining stock ≤ 0: rejected with `OutOfStock`
    /// - Product already in cart: quantity +1, unless that would exceed
    ///   stock (`InsufficientStock`)
    /// - Otherwise: new line with quantity 1, snapshotting the product
    pub fn add_item(&mut self, product: &Product) -> CoreResult<()> {
        if remaining_stock(product, self) <= 0 {
            return Err(CoreError::OutOfStock {
                name: product.name.clone(),
            });
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            let new_quantity = item.quantity + 1;
            if new_quantity > product.stock {
                return Err(CoreError::InsufficientStock {
                    name: product.name.clone(),
                    available: product.stock,
                });
            }
            item.quantity = new_quantity;
            return Ok(());
        }

        self.items.push(CartItem {
            product: product.clone(),
            quantity: 1,
        });
        Ok(())
    }

    /// Replaces the quantity of a product's line.
    ///
    /// ## Behavior
    /// - `quantity` ≤ 0: removes the line
    /// - `quantity` > stock: rejected, state unchanged
    /// - Product not in cart: no-op
    pub fn set_quantity(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            self.remove_item(&product.id);
            return Ok(());
        }

        if quantity > product.stock {
            return Err(CoreError::InsufficientStock {
                name: product.name.clone(),
                available: product.stock,
            });
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity = quantity;
        }
        Ok(())
    }

    /// Removes a line from the cart by product id. Unconditional.
    pub fn remove_item(&mut self, product_id: &str) {
        self.items.retain(|i| i.product.id != product_id);
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn product(id: &str, price: i64, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            price: Money::from_won(price),
            stock,
            discounts: vec![],
            description: None,
            is_recommended: false,
        }
    }

    #[test]
    fn test_add_item_inserts_with_quantity_one() {
        let mut cart = Cart::new();
        let p = product("p1", 10_000, 20);

        cart.add_item(&p).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.quantity_of("p1"), 1);
    }

    #[test]
    fn test_add_same_product_increments() {
        let mut cart = Cart::new();
        let p = product("p1", 10_000, 20);

        cart.add_item(&p).unwrap();
        cart.add_item(&p).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.quantity_of("p1"), 2);
        assert_eq!(cart.total_quantity(), 2);
    }

    #[test]
    fn test_add_rejected_when_sold_out() {
        let mut cart = Cart::new();
        let p = product("p1", 10_000, 0);

        let err = cart.add_item(&p).unwrap_err();
        assert!(matches!(err, CoreError::OutOfStock { .. }));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_rejected_at_stock_limit() {
        let mut cart = Cart::new();
        let p = product("p1", 10_000, 2);

        cart.add_item(&p).unwrap();
        cart.add_item(&p).unwrap();
        let err = cart.add_item(&p).unwrap_err();

        assert!(matches!(err, CoreError::OutOfStock { .. }));
        assert_eq!(cart.quantity_of("p1"), 2);
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::new();
        let p = product("p1", 10_000, 20);
        cart.add_item(&p).unwrap();

        cart.set_quantity(&p, 15).unwrap();
        assert_eq!(cart.quantity_of("p1"), 15);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        let p = product("p1", 10_000, 20);
        cart.add_item(&p).unwrap();

        cart.set_quantity(&p, 0).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_above_stock_rejected() {
        let mut cart = Cart::new();
        let p = product("p1", 10_000, 20);
        cart.add_item(&p).unwrap();

        let err = cart.set_quantity(&p, 21).unwrap_err();
        assert_eq!(
            err,
            CoreError::InsufficientStock {
                name: "Product p1".to_string(),
                available: 20,
            }
        );
        // State unchanged on rejection.
        assert_eq!(cart.quantity_of("p1"), 1);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        let p1 = product("p1", 10_000, 20);
        let p2 = product("p2", 20_000, 20);
        cart.add_item(&p1).unwrap();
        cart.add_item(&p2).unwrap();

        cart.remove_item("p1");
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.quantity_of("p1"), 0);
        assert_eq!(cart.quantity_of("p2"), 1);
    }

    #[test]
    fn test_has_bulk_purchase() {
        let mut cart = Cart::new();
        let p = product("p1", 10_000, 20);
        cart.add_item(&p).unwrap();
        assert!(!cart.has_bulk_purchase());

        cart.set_quantity(&p, 10).unwrap();
        assert!(cart.has_bulk_purchase());
    }

    #[test]
    fn test_cart_serializes_as_array() {
        let mut cart = Cart::new();
        cart.add_item(&product("p1", 10_000, 20)).unwrap();

        let value = serde_json::to_value(&cart).unwrap();
        assert!(value.is_array());

        let back: Cart = serde_json::from_value(value).unwrap();
        assert_eq!(back, cart);
    }
}
