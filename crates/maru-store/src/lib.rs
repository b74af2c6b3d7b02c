//! # maru-store: Stateful Shell for Maru Mart
//!
//! Everything the pure pricing engine in `maru-core` refuses to own:
//! state, persistence, timers, and notifications.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    maru-store Layout                                    │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                        store::Store                             │   │
//! │  │   products • coupons • cart • selected coupon • subscribers     │   │
//! │  └───┬──────────────┬──────────────┬──────────────┬────────────────┘   │
//! │      │              │              │              │                     │
//! │      ▼              ▼              ▼              ▼                     │
//! │  ┌────────┐   ┌───────────────┐  ┌────────┐  ┌─────────┐              │
//! │  │storage │   │ notifications │  │ search │  │  seeds  │              │
//! │  │ trait +│   │ center + TTL  │  │debounce│  │ catalog │              │
//! │  │ 2 impls│   └───────┬───────┘  └───┬────┘  │ coupons │              │
//! │  └────────┘           │              │       └─────────┘              │
//! │                       └──────┬───────┘                                 │
//! │                              ▼                                          │
//! │                      ┌──────────────┐                                  │
//! │                      │  scheduler   │  logical-clock timers,           │
//! │                      │  TimerQueue  │  polled via Store::tick(now)     │
//! │                      └──────────────┘                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Single logical thread throughout. The clock is always a parameter, so
//! every timed behavior is testable without sleeping.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod notifications;
pub mod scheduler;
pub mod search;
pub mod seeds;
pub mod storage;
pub mod store;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use notifications::{Notification, NotificationCenter, Severity};
pub use storage::{JsonFileStorage, MemoryStorage, Storage};
pub use store::{ProductDraft, Store, SubscriberId};
