//! Storage ports
//!
//! A storage port is a flat string key-value namespace, the shape of the
//! browser's `localStorage`. The bookmark store only ever needs `get` and
//! `set`, so any backend offering those two can hold bookmarks.

mod file;
mod memory;
#[cfg(feature = "web")]
mod web;

pub use file::FileStorage;
pub use memory::MemoryStorage;
#[cfg(feature = "web")]
pub use web::LocalStorage;

use crate::error::StorageError;

/// Synchronous key-value persistence backend
pub trait StoragePort {
    /// Read the value stored under `key`, `None` if it was never written
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: StoragePort + ?Sized> StoragePort for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

impl<S: StoragePort + ?Sized> StoragePort for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}
