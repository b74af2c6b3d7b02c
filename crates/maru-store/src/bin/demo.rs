//! # Storefront Demo Session
//!
//! Runs a scripted shopping session against a file-backed store,
//! printing the state a UI would render at each step.
//!
//! ## Usage
//! ```bash
//! # Run with the default data directory
//! cargo run -p maru-store --bin demo
//!
//! # Point at a different data directory
//! cargo run -p maru-store --bin demo -- --data ./my_data
//!
//! # With debug logging
//! RUST_LOG=debug cargo run -p maru-store --bin demo
//! ```
//!
//! Rerunning reuses the data directory, so the cart from a previous run
//! carries over - delete the directory for a fresh session.

use std::env;

use chrono::Utc;
use tracing_subscriber::EnvFilter;

use maru_core::format::format_product_price;
use maru_core::pricing::remaining_stock;
use maru_store::storage::JsonFileStorage;
use maru_store::store::Store;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let mut data_dir = String::from("./maru_data");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data" | "-d" => {
                if i + 1 < args.len() {
                    data_dir = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Maru Mart Demo Session");
                println!();
                println!("Usage: demo [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --data <PATH>  Data directory (default: ./maru_data)");
                println!("  -h, --help         Show this help message");
                return;
            }
            _ => {}
        }
        i += 1;
    }

    println!("🛒 Maru Mart Demo Session");
    println!("=========================");
    println!("Data directory: {}", data_dir);
    println!();

    let mut store = Store::load(Box::new(JsonFileStorage::new(&data_dir)));

    println!("Catalog:");
    for product in store.products() {
        let remaining = remaining_stock(product, store.cart());
        println!(
            "  {} - {} (stock left: {})",
            product.name,
            format_product_price(product, store.cart(), false),
            remaining
        );
    }
    println!();

    // Fill the cart: ten widgets unlock the 10% tier plus the bulk bonus.
    let widget_id = store.products()[0].id.clone();
    let gadget_id = store.products()[1].id.clone();

    if let Err(e) = store.add_to_cart(&widget_id, Utc::now()) {
        println!("⚠ {}", e);
    }
    if let Err(e) = store.update_quantity(&widget_id, 10, Utc::now()) {
        println!("⚠ {}", e);
    }
    if let Err(e) = store.add_to_cart(&gadget_id, Utc::now()) {
        println!("⚠ {}", e);
    }

    println!("Cart:");
    for item in store.cart().items() {
        println!("  {} × {}", item.product.name, item.quantity);
    }

    let totals = store.totals();
    println!();
    println!("Before discounts: {}", totals.total_before_discount);
    println!("After discounts:  {}", totals.total_after_discount);

    // A ₩5,000-off coupon on top.
    match store.apply_coupon("AMOUNT5000", Utc::now()) {
        Ok(()) => {
            let totals = store.totals();
            println!("With AMOUNT5000:  {}", totals.total_after_discount);
            println!("Total saved:      {}", totals.discount_amount());
        }
        Err(e) => println!("⚠ {}", e),
    }

    println!();
    println!("Notifications:");
    for notification in store.notifications() {
        println!("  [{:?}] {}", notification.severity, notification.message);
    }

    let order_number = store.complete_order(Utc::now());
    println!();
    println!("✓ Checked out: {}", order_number);
    println!("✓ Cart cleared, state mirrored under {}", data_dir);
}
