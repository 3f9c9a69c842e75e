//! Browser `localStorage` port (feature `web`)

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{DomException, Storage};

use super::StoragePort;
use crate::error::StorageError;

/// Name the browser gives the exception thrown when an origin is out of space
const QUOTA_EXCEEDED: &str = "QuotaExceededError";

pub struct LocalStorage {
    inner: Storage,
}

impl LocalStorage {
    /// Attach to `window.localStorage`
    pub fn new() -> Result<Self, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no global window".to_string()))?;
        let inner = window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(describe(&e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))?;

        Ok(Self { inner })
    }
}

impl StoragePort for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner
            .get_item(key)
            .map_err(|e| StorageError::Backend(describe(&e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set_item(key, value).map_err(|e| match e.dyn_ref::<DomException>() {
            Some(dom) if dom.name() == QUOTA_EXCEEDED => StorageError::QuotaExceeded {
                key: key.to_string(),
                // The browser does not report its limit
                needed: key.len() + value.len(),
                limit: 0,
            },
            _ => StorageError::Backend(describe(&e)),
        })
    }
}

fn describe(value: &JsValue) -> String {
    match value.dyn_ref::<DomException>() {
        Some(dom) => format!("{}: {}", dom.name(), dom.message()),
        None => value.as_string().unwrap_or_else(|| format!("{:?}", value)),
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    fn fresh(key: &str) -> LocalStorage {
        let storage = LocalStorage::new().unwrap();
        storage.inner.remove_item(key).unwrap();
        storage
    }

    #[wasm_bindgen_test]
    fn test_missing_key_reads_none() {
        let storage = fresh("annota-test-missing");
        assert_eq!(storage.get("annota-test-missing").unwrap(), None);
    }

    #[wasm_bindgen_test]
    fn test_set_then_get() {
        let mut storage = fresh("annota-test-round-trip");
        storage.set("annota-test-round-trip", r#"{"a":1}"#).unwrap();
        assert_eq!(
            storage.get("annota-test-round-trip").unwrap().as_deref(),
            Some(r#"{"a":1}"#)
        );

        // A second handle sees the same origin storage
        let other = LocalStorage::new().unwrap();
        assert_eq!(
            other.get("annota-test-round-trip").unwrap().as_deref(),
            Some(r#"{"a":1}"#)
        );
        storage.inner.remove_item("annota-test-round-trip").unwrap();
    }

    #[wasm_bindgen_test]
    fn test_oversized_value_is_quota_exceeded() {
        let key = "annota-test-quota";
        let mut storage = fresh(key);
        // Browsers cap an origin at 5 to 10 MiB
        let value = "a".repeat(16 * 1024 * 1024);

        let err = storage.set(key, &value).unwrap_err();
        match err {
            StorageError::QuotaExceeded { key: k, needed, .. } => {
                assert_eq!(k, key);
                assert_eq!(needed, key.len() + value.len());
            }
            other => panic!("expected QuotaExceeded, got {:?}", other),
        }
        assert_eq!(storage.get(key).unwrap(), None);
    }
}
