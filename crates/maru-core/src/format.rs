//! # Price Formatter
//!
//! Renders prices for the two audiences the storefront has:
//!
//! - Shopper view: `₩10,000`
//! - Admin view:   `10,000원`
//! - Either view, product sold out: `SOLD OUT`
//!
//! Sold-out state is derived from the stock calculator, so a product whose
//! stock is fully committed to the cart also renders as `SOLD OUT`.

use crate::cart::Cart;
use crate::money::Money;
use crate::pricing::remaining_stock;
use crate::types::Product;

/// Formats a bare price.
pub fn format_price(price: Money, sold_out: bool, admin: bool) -> String {
    if sold_out {
        return "SOLD OUT".to_string();
    }
    if admin {
        format!("{}원", price.grouped())
    } else {
        format!("₩{}", price.grouped())
    }
}

/// Formats a product's price, deriving sold-out state from the cart.
pub fn format_product_price(product: &Product, cart: &Cart, admin: bool) -> String {
    format_price(product.price, remaining_stock(product, cart) <= 0, admin)
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_shopper_and_admin_formats() {
        let price = Money::from_won(10_000);
        assert_eq!(format_price(price, false, false), "₩10,000");
        assert_eq!(format_price(price, false, true), "10,000원");
    }

    #[test]
    fn test_sold_out_wins_over_format() {
        let price = Money::from_won(10_000);
        assert_eq!(format_price(price, true, false), "SOLD OUT");
        assert_eq!(format_price(price, true, true), "SOLD OUT");
    }

    #[test]
    fn test_product_price_sold_out_via_cart() {
        let p = product("p1", 10_000, 2);
        let mut cart = Cart::new();
        cart.add_item(&p).unwrap();
        cart.set_quantity(&p, 2).unwrap();

        // Stock fully committed to the cart: renders as sold out.
        assert_eq!(format_product_price(&p, &cart, false), "SOLD OUT");

        cart.set_quantity(&p, 1).unwrap();
        assert_eq!(format_product_price(&p, &cart, false), "₩10,000");
    }
}
