//! JavaScript bindings (feature `web`)
//!
//! Exposes the bookmark store over `window.localStorage` and the drawer
//! state machine to the browser client.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::annotations::Annotation;
use crate::bookmarks::{newest_first, BookmarkStore};
use crate::config::LogConfig;
use crate::drawer::{DragRelease, Drawer, DrawerState};
use crate::error::StoreError;
use crate::storage::LocalStorage;
use crate::telemetry::init_console_tracing;

/// Module initialization, run once when the wasm module loads
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    if let Err(e) = init_console_tracing(&LogConfig::default()) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("annota: logging disabled: {:#}", e)));
    }
}

/// Error payload thrown to JavaScript
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsStoreError {
    kind: &'static str,
    message: String,
    user_actionable: bool,
}

impl From<StoreError> for JsStoreError {
    fn from(err: StoreError) -> Self {
        let kind = match &err {
            StoreError::Validation(_) => "validation",
            StoreError::QuotaExceeded(_) => "quota_exceeded",
            StoreError::Write(_) | StoreError::Serialize(_) => "write_failed",
        };
        JsStoreError {
            kind,
            message: err.to_string(),
            user_actionable: err.is_user_actionable(),
        }
    }
}

fn to_js_error(err: StoreError) -> JsValue {
    let payload = JsStoreError::from(err);
    serde_wasm_bindgen::to_value(&payload).unwrap_or_else(|_| JsValue::from_str(&payload.message))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Bookmark store backed by `localStorage`
#[wasm_bindgen(js_name = "BookmarkStore")]
pub struct JsBookmarkStore {
    inner: BookmarkStore<LocalStorage>,
}

#[wasm_bindgen(js_class = "BookmarkStore")]
impl JsBookmarkStore {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<JsBookmarkStore, JsValue> {
        let storage = LocalStorage::new().map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            inner: BookmarkStore::new(storage),
        })
    }

    pub fn save(&mut self, annotation: JsValue) -> Result<(), JsValue> {
        let annotation: Annotation = serde_wasm_bindgen::from_value(annotation)
            .map_err(|e| to_js_error(StoreError::Validation(e.to_string())))?;
        self.inner.save(&annotation).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = "isSaved")]
    pub fn is_saved(&self, id: &str) -> bool {
        self.inner.is_saved(id)
    }

    /// The annotation, or `null`
    pub fn load(&self, id: &str) -> Result<JsValue, JsValue> {
        match self.inner.load(id) {
            Some(annotation) => to_js(&annotation),
            None => Ok(JsValue::NULL),
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.inner.remove(id);
    }

    /// All bookmarks, newest first
    #[wasm_bindgen(js_name = "listAll")]
    pub fn list_all(&self) -> Result<JsValue, JsValue> {
        to_js(&newest_first(self.inner.list_all()))
    }
}

/// Drawer state machine
#[wasm_bindgen(js_name = "Drawer")]
#[derive(Default)]
pub struct JsDrawer {
    inner: Drawer,
}

#[wasm_bindgen(js_class = "Drawer")]
impl JsDrawer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsDrawer {
        Self::default()
    }

    /// `"closed"`, `"collapsed"` or `"expanded"`
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        self.inner.state().as_str().to_string()
    }

    /// CSS height for the current state
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> String {
        self.inner.height().to_string()
    }

    pub fn expand(&mut self) {
        self.inner.expand();
    }

    pub fn collapse(&mut self) {
        self.inner.collapse();
    }

    pub fn close(&mut self) {
        self.inner.close();
    }

    #[wasm_bindgen(js_name = "setState")]
    pub fn set_state(&mut self, state: &str) -> Result<(), JsValue> {
        let state: DrawerState = state.parse().map_err(|e| JsValue::from_str(&format!("{}", e)))?;
        self.inner.set_state(state);
        Ok(())
    }

    /// Apply a drag release; returns `"expand"`, `"collapse"` or `"noop"`
    #[wasm_bindgen(js_name = "handleDragEnd")]
    pub fn handle_drag_end(&mut self, offset_y: f64, velocity_y: f64) -> String {
        self.inner
            .handle_drag_end(DragRelease::new(offset_y, velocity_y))
            .as_str()
            .to_string()
    }
}
