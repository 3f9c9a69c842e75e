//! ANNOTA core
//!
//! Client-side core of the ANNOTA OCR-and-annotation app: the local bookmark
//! store for AI-generated annotations and the state machine behind the
//! annotation drawer.
//!
//! # Modules
//!
//! - `annotations`: annotation records, legacy schema adapter, selection
//!   validation and the offline mock generator
//! - `bookmarks`: bookmark persistence over a storage port, plus the history view
//! - `drawer`: closed / collapsed / expanded bottom sheet and drag classification
//! - `storage`: key-value storage ports (memory, file, browser `localStorage`)
//!
//! ```
//! use annota_core::annotations::mock_annotation;
//! use annota_core::bookmarks::BookmarkStore;
//! use annota_core::storage::MemoryStorage;
//!
//! let mut store = BookmarkStore::new(MemoryStorage::new());
//! let annotation = mock_annotation("前月比");
//! store.save(&annotation).unwrap();
//! assert!(store.is_saved(annotation.id.as_str()));
//! ```

pub mod annotations;
pub mod bookmarks;
pub mod config;
pub mod drawer;
pub mod error;
pub mod storage;
pub mod telemetry;

#[cfg(feature = "web")]
mod bindings;

#[cfg(all(test, target_arch = "wasm32"))]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

pub use annotations::{Annotation, NuanceData, RecordId};
pub use bookmarks::{BookmarkStore, Bookmarks};
pub use config::Config;
pub use drawer::{Drawer, DrawerState};
pub use error::{ConfigError, Result, StorageError, StoreError};
pub use storage::StoragePort;
pub use telemetry::init_tracing;

#[cfg(feature = "web")]
pub use telemetry::init_console_tracing;
