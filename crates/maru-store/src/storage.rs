//! # Storage Module
//!
//! The persistent key/value mirror - the local-storage analog.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Storage Contract                                     │
//! │                                                                         │
//! │  read(key)   → Some(json) | None        (absent and corrupt look the   │
//! │                                          same to the caller: None       │
//! │                                          means "use the fallback")      │
//! │  write(key, json)                        best-effort, failures logged   │
//! │  remove(key)                             best-effort, failures logged   │
//! │                                                                         │
//! │  Keys: "products", "coupons", "cart" - one JSON document each.          │
//! │                                                                         │
//! │  NOTHING here returns a Result. A broken disk must never take down     │
//! │  the storefront; the in-memory state stays authoritative.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use tracing::warn;

/// Persisted key for the product catalog.
pub const PRODUCTS_KEY: &str = "products";

/// Persisted key for the coupon list.
pub const COUPONS_KEY: &str = "coupons";

/// Persisted key for the cart. Removed entirely when the cart empties.
pub const CART_KEY: &str = "cart";

/// Best-effort key/value persistence.
///
/// Implementations must be infallible from the caller's perspective:
/// failures are swallowed (and logged) so the store always has a valid
/// in-memory state to render.
pub trait Storage {
    /// Reads the JSON document stored under `key`, if any.
    fn read(&self, key: &str) -> Option<String>;

    /// Writes a JSON document under `key`.
    fn write(&self, key: &str, json: &str);

    /// Removes the document under `key`.
    fn remove(&self, key: &str);
}

// =============================================================================
// File-Backed Storage
// =============================================================================

/// One JSON file per key under a data directory.
///
/// `products` → `<dir>/products.json`, and so on. Writes are synchronous;
/// the data set is three small documents, so there is nothing to batch.
#[derive(Debug)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    /// Creates a storage rooted at `dir`, creating the directory if needed.
    ///
    /// Directory creation is itself best-effort: if it fails, every write
    /// will fail (and be logged) but construction still succeeds.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if let Err(e) = fs::create_dir_all(&dir) {
            warn!(dir = %dir.display(), error = %e, "failed to create storage directory");
        }
        JsonFileStorage { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for JsonFileStorage {
    fn read(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Some(contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(key, path = %path.display(), error = %e, "failed to read storage key");
                None
            }
        }
    }

    fn write(&self, key: &str, json: &str) {
        let path = self.path_for(key);
        if let Err(e) = fs::write(&path, json) {
            warn!(key, path = %path.display(), error = %e, "failed to write storage key");
        }
    }

    fn remove(&self, key: &str) {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!(key, path = %path.display(), error = %e, "failed to remove storage key");
            }
        }
    }
}

// =============================================================================
// In-Memory Storage
// =============================================================================

/// In-memory storage for tests and throwaway sessions.
///
/// `RefCell` keeps the `Storage` methods `&self` like the file backend;
/// the whole system is single-threaded by design.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a key, for tests that exercise the load path.
    pub fn preload(self, key: &str, json: &str) -> Self {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), json.to_string());
        self
    }

    /// True when the key currently has a stored document.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, json: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), json.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.read("cart"), None);

        storage.write("cart", "[]");
        assert_eq!(storage.read("cart").as_deref(), Some("[]"));

        storage.remove("cart");
        assert_eq!(storage.read("cart"), None);
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path());

        assert_eq!(storage.read(PRODUCTS_KEY), None);

        storage.write(PRODUCTS_KEY, r#"[{"id":"p1"}]"#);
        assert_eq!(storage.read(PRODUCTS_KEY).as_deref(), Some(r#"[{"id":"p1"}]"#));

        storage.remove(PRODUCTS_KEY);
        assert_eq!(storage.read(PRODUCTS_KEY), None);
    }

    #[test]
    fn test_file_storage_remove_missing_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path());
        // Must not panic or log an error path distinct from success.
        storage.remove("never-written");
    }

    #[test]
    fn test_keys_map_to_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path());

        storage.write(PRODUCTS_KEY, "[]");
        storage.write(COUPONS_KEY, "[]");

        assert!(dir.path().join("products.json").exists());
        assert!(dir.path().join("coupons.json").exists());
        assert!(!dir.path().join("cart.json").exists());
    }
}
