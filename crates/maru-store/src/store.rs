//! # Store Module
//!
//! The single state owner: catalog, coupons, cart, selected coupon,
//! notifications, and the search debouncer.
//!
//! ## State Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Store State Flow                                     │
//! │                                                                         │
//! │  UI Event                  Store Operation          Side Effects        │
//! │  ────────                  ───────────────          ────────────        │
//! │                                                                         │
//! │  Click product ──────────► add_to_cart() ─────────► persist "cart"     │
//! │  Change quantity ────────► update_quantity() ─────► persist "cart"     │
//! │  Select coupon ──────────► apply_coupon() ────────► (session only)     │
//! │  Admin saves product ────► add/update_product() ──► persist "products" │
//! │  Admin saves coupon ─────► add_coupon() ──────────► persist "coupons"  │
//! │  Pay ────────────────────► complete_order() ──────► remove "cart"      │
//! │                                                                         │
//! │  Every mutation: notification (maybe) + subscriber callbacks.           │
//! │  Every rejection: error notification, state UNTOUCHED.                  │
//! │                                                                         │
//! │  Single logical thread. No locks. The clock (`now`) is a parameter     │
//! │  on anything that creates or expires timers.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use maru_core::cart::Cart;
use maru_core::error::{CoreError, CoreResult};
use maru_core::money::Money;
use maru_core::pricing::{cart_totals, remaining_stock, CartTotals};
use maru_core::search::filter_products;
use maru_core::types::{Coupon, DiscountTier, DiscountType, Product};
use maru_core::validation::{
    validate_coupon, validate_discount_tiers, validate_price, validate_product_name,
    validate_stock,
};
use maru_core::PERCENTAGE_COUPON_MIN_TOTAL;

use crate::notifications::{Notification, NotificationCenter, Severity};
use crate::search::SearchDebouncer;
use crate::seeds::{seed_coupons, seed_products};
use crate::storage::{Storage, CART_KEY, COUPONS_KEY, PRODUCTS_KEY};

/// Handle returned by [`Store::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// Admin form contents for creating or editing a product.
///
/// Everything except the id, which the store assigns on creation and
/// preserves on update.
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub name: String,
    pub price: Money,
    pub stock: i64,
    pub discounts: Vec<DiscountTier>,
    pub description: Option<String>,
    pub is_recommended: bool,
}

impl ProductDraft {
    fn validate(&self) -> CoreResult<()> {
        validate_product_name(&self.name)?;
        validate_price(self.price)?;
        validate_stock(self.stock)?;
        validate_discount_tiers(&self.discounts)?;
        Ok(())
    }

    fn into_product(self, id: String) -> Product {
        Product {
            id,
            name: self.name.trim().to_string(),
            price: self.price,
            stock: self.stock,
            discounts: self.discounts,
            description: self.description,
            is_recommended: self.is_recommended,
        }
    }
}

// =============================================================================
// Store
// =============================================================================

/// The storefront's single source of truth.
///
/// Built over a [`Storage`] backend; state loads once at construction
/// (falling back to seeds) and every mutation mirrors the affected key
/// back out, best-effort.
pub struct Store {
    products: Vec<Product>,
    coupons: Vec<Coupon>,
    cart: Cart,
    selected_coupon: Option<Coupon>,
    notifications: NotificationCenter,
    search: SearchDebouncer,
    storage: Box<dyn Storage>,
    subscribers: Vec<(SubscriberId, Box<dyn Fn()>)>,
    next_subscriber: u64,
}

impl Store {
    /// Loads a store from `storage`.
    ///
    /// Absent or corrupt keys fall back: seed products, seed coupons,
    /// empty cart. Corruption is logged, never surfaced - there are no
    /// fatal load conditions.
    pub fn load(storage: Box<dyn Storage>) -> Self {
        let products = load_key(storage.as_ref(), PRODUCTS_KEY, seed_products);
        let coupons = load_key(storage.as_ref(), COUPONS_KEY, seed_coupons);
        let cart = load_key(storage.as_ref(), CART_KEY, Cart::new);

        Store {
            products,
            coupons,
            cart,
            selected_coupon: None,
            notifications: NotificationCenter::new(),
            search: SearchDebouncer::new(),
            storage,
            subscribers: Vec::new(),
            next_subscriber: 0,
        }
    }

    // -------------------------------------------------------------------------
    // Views
    // -------------------------------------------------------------------------

    /// The full catalog.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// All coupons.
    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    /// The cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The currently selected coupon, if any.
    pub fn selected_coupon(&self) -> Option<&Coupon> {
        self.selected_coupon.as_ref()
    }

    /// Active notifications, oldest first.
    pub fn notifications(&self) -> &[Notification] {
        self.notifications.active()
    }

    /// Cart totals with the selected coupon applied.
    ///
    /// Recomputed from state on every call; nothing is cached.
    pub fn totals(&self) -> CartTotals {
        cart_totals(&self.cart, self.selected_coupon.as_ref())
    }

    /// Remaining purchasable units for a product, `None` if unknown id.
    pub fn remaining_stock(&self, product_id: &str) -> Option<i64> {
        self.products
            .iter()
            .find(|p| p.id == product_id)
            .map(|p| remaining_stock(p, &self.cart))
    }

    /// Catalog filtered by the *debounced* search term.
    pub fn visible_products(&self) -> Vec<&Product> {
        filter_products(&self.products, self.search.committed())
    }

    /// The raw search term as typed.
    pub fn search_term(&self) -> &str {
        self.search.term()
    }

    // -------------------------------------------------------------------------
    // Event Loop
    // -------------------------------------------------------------------------

    /// Records a search keystroke, restarting the debounce timer.
    pub fn set_search_term(&mut self, term: &str, now: DateTime<Utc>) {
        self.search.set_term(term, now);
        self.emit_change();
    }

    /// Advances the timer-driven state: expires notifications and commits
    /// a pending search term whose debounce has elapsed.
    ///
    /// The event loop calls this on every tick with the current time.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        let before = self.notifications.active().len();
        self.notifications.sweep_expired(now);
        let notifications_changed = self.notifications.active().len() != before;

        let search_changed = self.search.poll(now);

        if notifications_changed || search_changed {
            self.emit_change();
        }
    }

    /// Dismisses a notification before its TTL elapses.
    pub fn dismiss_notification(&mut self, id: i64) {
        self.notifications.dismiss(id);
        self.emit_change();
    }

    // -------------------------------------------------------------------------
    // Subscriptions
    // -------------------------------------------------------------------------

    /// Registers a callback invoked after every state change.
    pub fn subscribe(&mut self, callback: impl Fn() + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes a subscription.
    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.subscribers.retain(|(sid, _)| *sid != id);
    }

    fn emit_change(&self) {
        for (_, callback) in &self.subscribers {
            callback();
        }
    }

    // -------------------------------------------------------------------------
    // Cart Operations
    // -------------------------------------------------------------------------

    /// Adds one unit of a product to the cart.
    ///
    /// Rejections (sold out, at stock limit) leave the cart unchanged and
    /// surface as an error notification.
    pub fn add_to_cart(&mut self, product_id: &str, now: DateTime<Utc>) -> CoreResult<()> {
        debug!(product_id, "add_to_cart");
        let product = match self.find_product(product_id) {
            Some(p) => p.clone(),
            None => return Err(self.reject(CoreError::ProductNotFound(product_id.into()), now)),
        };

        if let Err(e) = self.cart.add_item(&product) {
            return Err(self.reject(e, now));
        }

        self.persist_cart();
        self.notify("Added to cart", Severity::Success, now);
        Ok(())
    }

    /// Replaces the quantity of a cart line. Zero or less removes it.
    ///
    /// An unknown product id is silently ignored (the line it referred to
    /// no longer exists to fix).
    pub fn update_quantity(
        &mut self,
        product_id: &str,
        quantity: i64,
        now: DateTime<Utc>,
    ) -> CoreResult<()> {
        debug!(product_id, quantity, "update_quantity");
        let product = match self.find_product(product_id) {
            Some(p) => p.clone(),
            None => return Ok(()),
        };

        if let Err(e) = self.cart.set_quantity(&product, quantity) {
            return Err(self.reject(e, now));
        }

        self.persist_cart();
        self.emit_change();
        Ok(())
    }

    /// Removes a cart line unconditionally.
    pub fn remove_from_cart(&mut self, product_id: &str) {
        debug!(product_id, "remove_from_cart");
        self.cart.remove_item(product_id);
        self.persist_cart();
        self.emit_change();
    }

    /// Completes the order: clears the cart and coupon selection and
    /// returns the issued order number.
    pub fn complete_order(&mut self, now: DateTime<Utc>) -> String {
        let order_number = format!("ORD-{}", now.timestamp_millis());
        debug!(%order_number, "complete_order");

        self.cart.clear();
        self.selected_coupon = None;
        self.persist_cart();
        self.notify(
            &format!("Order completed. Order number: {order_number}"),
            Severity::Success,
            now,
        );
        order_number
    }

    // -------------------------------------------------------------------------
    // Coupon Operations
    // -------------------------------------------------------------------------

    /// Selects a coupon for the current cart.
    ///
    /// Percentage coupons are rejected while the post-discount total
    /// (under the presently selected coupon) is below ₩10,000; the
    /// boundary itself is accepted. Flat-amount coupons always apply.
    pub fn apply_coupon(&mut self, code: &str, now: DateTime<Utc>) -> CoreResult<()> {
        debug!(code, "apply_coupon");
        let coupon = match self.coupons.iter().find(|c| c.code == code) {
            Some(c) => c.clone(),
            None => return Err(self.reject(CoreError::CouponNotFound(code.into()), now)),
        };

        let current_total = self.totals().total_after_discount;
        if coupon.discount_type == DiscountType::Percentage
            && current_total < PERCENTAGE_COUPON_MIN_TOTAL
        {
            return Err(self.reject(
                CoreError::CouponBelowMinimum {
                    total: current_total,
                    minimum: PERCENTAGE_COUPON_MIN_TOTAL,
                },
                now,
            ));
        }

        self.selected_coupon = Some(coupon);
        self.notify("Coupon applied", Severity::Success, now);
        Ok(())
    }

    /// Clears the coupon selection (the "no coupon" dropdown entry).
    pub fn clear_selected_coupon(&mut self) {
        self.selected_coupon = None;
        self.emit_change();
    }

    /// Creates a coupon. Duplicate codes are rejected.
    pub fn add_coupon(&mut self, coupon: Coupon, now: DateTime<Utc>) -> CoreResult<()> {
        debug!(code = %coupon.code, "add_coupon");
        if let Err(e) = validate_coupon(&coupon) {
            return Err(self.reject(e.into(), now));
        }
        if self.coupons.iter().any(|c| c.code == coupon.code) {
            return Err(self.reject(
                CoreError::DuplicateCouponCode {
                    code: coupon.code.clone(),
                },
                now,
            ));
        }

        self.coupons.push(coupon);
        self.persist(COUPONS_KEY, &self.coupons);
        self.notify("Coupon added", Severity::Success, now);
        Ok(())
    }

    /// Deletes a coupon by code, clearing the selection if it was the
    /// selected one. Unknown codes are a no-op delete.
    pub fn delete_coupon(&mut self, code: &str, now: DateTime<Utc>) {
        debug!(code, "delete_coupon");
        self.coupons.retain(|c| c.code != code);
        if self
            .selected_coupon
            .as_ref()
            .is_some_and(|c| c.code == code)
        {
            self.selected_coupon = None;
        }

        self.persist(COUPONS_KEY, &self.coupons);
        self.notify("Coupon deleted", Severity::Success, now);
    }

    // -------------------------------------------------------------------------
    // Product Admin Operations
    // -------------------------------------------------------------------------

    /// Creates a product from an admin draft. Returns the assigned id.
    pub fn add_product(&mut self, draft: ProductDraft, now: DateTime<Utc>) -> CoreResult<String> {
        debug!(name = %draft.name, "add_product");
        if let Err(e) = draft.validate() {
            return Err(self.reject(e, now));
        }

        let id = Uuid::new_v4().to_string();
        self.products.push(draft.into_product(id.clone()));
        self.persist(PRODUCTS_KEY, &self.products);
        self.notify("Product added", Severity::Success, now);
        Ok(id)
    }

    /// Replaces a product's fields from an admin draft, preserving its id.
    ///
    /// Existing cart lines keep their snapshot of the old product.
    pub fn update_product(
        &mut self,
        product_id: &str,
        draft: ProductDraft,
        now: DateTime<Utc>,
    ) -> CoreResult<()> {
        debug!(product_id, "update_product");
        if let Err(e) = draft.validate() {
            return Err(self.reject(e, now));
        }

        let Some(index) = self.products.iter().position(|p| p.id == product_id) else {
            return Err(self.reject(CoreError::ProductNotFound(product_id.into()), now));
        };

        self.products[index] = draft.into_product(product_id.to_string());
        self.persist(PRODUCTS_KEY, &self.products);
        self.notify("Product updated", Severity::Success, now);
        Ok(())
    }

    /// Deletes a product from the catalog.
    ///
    /// Cart lines holding the product keep their snapshot; nothing else
    /// references the id.
    pub fn delete_product(&mut self, product_id: &str, now: DateTime<Utc>) {
        debug!(product_id, "delete_product");
        self.products.retain(|p| p.id != product_id);
        self.persist(PRODUCTS_KEY, &self.products);
        self.notify("Product deleted", Severity::Warning, now);
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn find_product(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// Pushes a notification and wakes subscribers.
    fn notify(&mut self, message: &str, severity: Severity, now: DateTime<Utc>) {
        self.notifications.push(message, severity, now);
        self.emit_change();
    }

    /// Emits an error notification for a rejected operation and hands the
    /// error back for the caller to return. State must already be intact.
    fn reject(&mut self, err: CoreError, now: DateTime<Utc>) -> CoreError {
        self.notify(&err.to_string(), Severity::Error, now);
        err
    }

    /// Mirrors a state slice to storage, best-effort.
    fn persist<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.storage.write(key, &json),
            Err(e) => warn!(key, error = %e, "failed to serialize state for persistence"),
        }
    }

    /// The cart key is removed entirely when the cart empties, matching
    /// the persisted format's convention.
    fn persist_cart(&self) {
        if self.cart.is_empty() {
            self.storage.remove(CART_KEY);
        } else {
            self.persist(CART_KEY, &self.cart);
        }
    }
}

/// Reads and parses one persisted key, falling back on absence or
/// corruption.
fn load_key<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
    fallback: impl FnOnce() -> T,
) -> T {
    match storage.read(key) {
        Some(json) => match serde_json::from_str(&json) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "corrupt persisted state, using defaults");
                fallback()
            }
        },
        None => fallback(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
