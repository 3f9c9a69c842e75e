//! Bookmark persistence
//!
//! All bookmarks live in a single JSON object under one storage key, mapping
//! annotation id to annotation record. Every mutation re-reads that object,
//! changes one entry, and writes the whole object back.

use serde_json::{Map, Value};

use crate::annotations::{Annotation, SchemaVersion, StoredAnnotation};
use crate::config::{StoreConfig, DEFAULT_STORAGE_KEY};
use crate::error::{Result, StoreError};
use crate::storage::StoragePort;

type Entries = Map<String, Value>;

/// Repository for bookmarked annotations
pub struct BookmarkStore<S> {
    storage: S,
    key: String,
}

impl<S: StoragePort> BookmarkStore<S> {
    /// Create a store using the default storage key
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn from_config(storage: S, config: &StoreConfig) -> Self {
        Self::with_key(storage, config.storage_key.clone())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Save an annotation (insert or overwrite)
    pub fn save(&mut self, annotation: &Annotation) -> Result<()> {
        if annotation.id.is_empty() {
            return Err(StoreError::Validation(
                "Annotation must have an ID".to_string(),
            ));
        }

        let value = serde_json::to_value(annotation)?;
        let mut entries = self.read_entries();
        entries.insert(annotation.id.to_string(), value);

        self.write_entries(&entries).map_err(|e| {
            tracing::warn!("Failed to save annotation {}: {}", annotation.id, e);
            e
        })?;

        tracing::debug!("Saved annotation {} ({} bookmarks)", annotation.id, entries.len());
        Ok(())
    }

    /// Whether an entry exists under `id`
    pub fn is_saved(&self, id: &str) -> bool {
        if id.is_empty() {
            return false;
        }
        self.read_entries().contains_key(id)
    }

    /// Get a bookmarked annotation by ID
    pub fn load(&self, id: &str) -> Option<Annotation> {
        if id.is_empty() {
            return None;
        }
        let value = self.read_entries().remove(id)?;
        decode_entry(id, value)
    }

    /// Delete a bookmark
    ///
    /// Persistence failures are logged, not returned.
    pub fn remove(&mut self, id: &str) {
        if id.is_empty() {
            return;
        }

        let mut entries = self.read_entries();
        if entries.remove(id).is_none() {
            return;
        }

        match self.write_entries(&entries) {
            Ok(()) => tracing::debug!("Removed annotation {}", id),
            Err(e) => tracing::error!("Failed to remove annotation {}: {}", id, e),
        }
    }

    /// Every bookmarked annotation, in no particular order
    pub fn list_all(&self) -> Vec<Annotation> {
        self.read_entries()
            .into_iter()
            .filter_map(|(id, value)| decode_entry(&id, value))
            .collect()
    }

    /// Rewrite legacy flat records in the current shape
    ///
    /// Returns the number of records migrated. Nothing is written when there
    /// is nothing to migrate.
    pub fn migrate_legacy(&mut self) -> Result<usize> {
        let mut entries = self.read_entries();
        let mut migrated = 0;

        for value in entries.values_mut() {
            let Ok(stored) = StoredAnnotation::from_value(value.clone()) else {
                continue;
            };
            if stored.schema() == SchemaVersion::Legacy {
                *value = serde_json::to_value(stored.into_annotation())?;
                migrated += 1;
            }
        }

        if migrated > 0 {
            self.write_entries(&entries)?;
            tracing::info!("Migrated {} legacy bookmarks", migrated);
        }

        Ok(migrated)
    }

    /// Read the full mapping; absent or unreadable data reads as empty
    fn read_entries(&self) -> Entries {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Entries::new(),
            Err(e) => {
                tracing::warn!("Failed to read saved annotations: {}", e);
                return Entries::new();
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(entries)) => entries,
            Ok(other) => {
                tracing::warn!(
                    "Saved annotations under {} are not an object (found {}), ignoring",
                    self.key,
                    json_kind(&other)
                );
                Entries::new()
            }
            Err(e) => {
                tracing::warn!("Failed to parse saved annotations: {}", e);
                Entries::new()
            }
        }
    }

    fn write_entries(&mut self, entries: &Entries) -> Result<()> {
        let blob = serde_json::to_string(entries)?;
        self.storage.set(&self.key, &blob)?;
        Ok(())
    }
}

fn decode_entry(id: &str, value: Value) -> Option<Annotation> {
    match StoredAnnotation::from_value(value) {
        Ok(stored) => Some(stored.into_annotation()),
        Err(e) => {
            tracing::warn!("Skipping unreadable saved annotation {}: {}", id, e);
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::{mock_annotation, NuanceData};
    use crate::error::StorageError;
    use crate::storage::{FileStorage, MemoryStorage};
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use tempfile::TempDir;

    fn annotation(id: &str) -> Annotation {
        Annotation::new(
            id,
            "scan-1",
            "前月比",
            NuanceData {
                meaning: format!("meaning of {}", id),
                ..Default::default()
            },
        )
        .with_created_at(Utc.with_ymd_and_hms(2026, 1, 10, 10, 0, 0).unwrap())
    }

    fn ids(store: &BookmarkStore<MemoryStorage>) -> Vec<String> {
        let mut ids: Vec<String> = store.list_all().into_iter().map(|a| a.id.to_string()).collect();
        ids.sort();
        ids
    }

    /// Port whose writes always fail with the given error
    struct FailingWrites {
        inner: MemoryStorage,
        quota: bool,
    }

    impl StoragePort for FailingWrites {
        fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, _value: &str) -> std::result::Result<(), StorageError> {
            if self.quota {
                Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed: 1,
                    limit: 0,
                })
            } else {
                Err(StorageError::Backend("write refused".to_string()))
            }
        }
    }

    /// Port whose reads always fail
    struct FailingReads;

    impl StoragePort for FailingReads {
        fn get(&self, _key: &str) -> std::result::Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("storage disabled".to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> std::result::Result<(), StorageError> {
            Ok(())
        }
    }

    fn store_with_blob(blob: &str) -> BookmarkStore<MemoryStorage> {
        let mut storage = MemoryStorage::new();
        storage.set(DEFAULT_STORAGE_KEY, blob).unwrap();
        BookmarkStore::new(storage)
    }

    #[test]
    fn test_save_then_is_saved() {
        let mut store = BookmarkStore::new(MemoryStorage::new());
        let a = annotation("a");

        assert!(!store.is_saved("a"));
        store.save(&a).unwrap();
        assert!(store.is_saved("a"));
        assert_eq!(store.load("a"), Some(a));
    }

    #[test]
    fn test_save_is_idempotent() {
        let mut store = BookmarkStore::new(MemoryStorage::new());
        let a = annotation("a");

        store.save(&a).unwrap();
        let blob_once = store.storage().get(DEFAULT_STORAGE_KEY).unwrap();
        store.save(&a).unwrap();

        assert_eq!(store.list_all().len(), 1);
        assert_eq!(store.storage().get(DEFAULT_STORAGE_KEY).unwrap(), blob_once);
    }

    #[test]
    fn test_save_overwrites_existing_entry() {
        let mut store = BookmarkStore::new(MemoryStorage::new());
        let mut a = annotation("a");
        store.save(&a).unwrap();

        a.nuance_data.meaning = "updated".to_string();
        store.save(&a).unwrap();

        assert_eq!(store.load("a").unwrap().nuance_data.meaning, "updated");
        assert_eq!(store.list_all().len(), 1);
    }

    #[test]
    fn test_empty_id_is_rejected() {
        let mut store = BookmarkStore::new(MemoryStorage::new());
        store.save(&annotation("a")).unwrap();

        let err = store.save(&annotation("")).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(ids(&store), vec!["a"]);
    }

    #[test]
    fn test_empty_id_reads() {
        let mut store = BookmarkStore::new(MemoryStorage::new());
        store.save(&annotation("a")).unwrap();

        assert!(!store.is_saved(""));
        assert_eq!(store.load(""), None);
        store.remove("");
        assert_eq!(ids(&store), vec!["a"]);
    }

    #[test]
    fn test_missing_ids() {
        let store = BookmarkStore::new(MemoryStorage::new());
        assert!(!store.is_saved("nope"));
        assert_eq!(store.load("nope"), None);
        assert!(store.list_all().is_empty());
    }

    #[test]
    fn test_malformed_blob_reads_as_empty() {
        for blob in ["{not json", "[1, 2, 3]", "null", "\"savedAnnotations\""] {
            let store = store_with_blob(blob);
            assert!(!store.is_saved("a"), "blob {:?}", blob);
            assert_eq!(store.load("a"), None);
            assert!(store.list_all().is_empty());
        }
    }

    #[test]
    fn test_save_recovers_from_malformed_blob() {
        let mut store = store_with_blob("{not json");
        store.save(&annotation("a")).unwrap();
        assert_eq!(ids(&store), vec!["a"]);
    }

    #[test]
    fn test_read_failure_reads_as_empty() {
        let store = BookmarkStore::new(FailingReads);
        assert!(!store.is_saved("a"));
        assert_eq!(store.load("a"), None);
        assert!(store.list_all().is_empty());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store = BookmarkStore::new(MemoryStorage::new());
        store.save(&annotation("a")).unwrap();
        let before = store.storage().get(DEFAULT_STORAGE_KEY).unwrap();

        store.remove("missing");

        assert_eq!(store.storage().get(DEFAULT_STORAGE_KEY).unwrap(), before);
        assert_eq!(ids(&store), vec!["a"]);
    }

    #[test]
    fn test_save_then_remove() {
        let mut store = BookmarkStore::new(MemoryStorage::new());
        store.save(&annotation("a")).unwrap();
        store.remove("a");

        assert!(!store.is_saved("a"));
        assert_eq!(store.load("a"), None);
    }

    #[test]
    fn test_save_three_remove_one() {
        let mut store = BookmarkStore::new(MemoryStorage::new());
        for id in ["a", "b", "c"] {
            store.save(&annotation(id)).unwrap();
        }
        assert_eq!(store.list_all().len(), 3);

        store.remove("b");

        assert_eq!(ids(&store), vec!["a", "c"]);
    }

    #[test]
    fn test_quota_error_is_distinct() {
        let mut store = BookmarkStore::new(MemoryStorage::with_quota(64));
        let err = store.save(&mock_annotation("今月")).unwrap_err();

        assert!(matches!(err, StoreError::QuotaExceeded(_)));
        assert!(err.is_user_actionable());
        assert!(store.list_all().is_empty());
    }

    #[test]
    fn test_generic_write_failure() {
        let mut store = BookmarkStore::new(FailingWrites {
            inner: MemoryStorage::new(),
            quota: false,
        });
        let err = store.save(&annotation("a")).unwrap_err();
        assert!(matches!(err, StoreError::Write(_)));

        let mut store = BookmarkStore::new(FailingWrites {
            inner: MemoryStorage::new(),
            quota: true,
        });
        let err = store.save(&annotation("a")).unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded(_)));
    }

    #[test]
    fn test_remove_failure_is_swallowed() {
        let mut inner = BookmarkStore::new(MemoryStorage::new());
        inner.save(&annotation("a")).unwrap();

        let mut store = BookmarkStore::new(FailingWrites {
            inner: inner.into_storage(),
            quota: false,
        });
        store.remove("a");

        // The write failed, so the entry is still there
        assert!(store.is_saved("a"));
    }

    #[test]
    fn test_unreadable_entries_are_skipped() {
        let blob = json!({
            "a": serde_json::to_value(annotation("a")).unwrap(),
            "junk": {"id": "junk", "note": "not an annotation"}
        });
        let store = store_with_blob(&blob.to_string());

        assert_eq!(ids(&store), vec!["a"]);
        assert!(store.is_saved("junk"));
        assert_eq!(store.load("junk"), None);
    }

    #[test]
    fn test_legacy_entries_are_readable_and_migrate() {
        let blob = json!({
            "ann-1": {
                "id": "ann-1",
                "scanID": "scan-1",
                "ocrResultID": "ocr-1",
                "selectedText": "テスト",
                "meaning": "Test",
                "usageExample": "テストです",
                "whenToUse": "Testing",
                "wordBreakdown": "Test",
                "alternativeMeanings": "Exam",
                "model": "gemini-1.5-flash",
                "promptVersion": "1.0",
                "createdAt": "2026-01-10T10:00:00.000Z",
                "context": "Test context"
            },
            "b": serde_json::to_value(annotation("b")).unwrap()
        });
        let mut store = store_with_blob(&blob.to_string());

        let legacy = store.load("ann-1").unwrap();
        assert_eq!(legacy.highlighted_text, "テスト");
        assert_eq!(legacy.nuance_data.usage_timing, "Testing");

        assert_eq!(store.migrate_legacy().unwrap(), 1);
        assert_eq!(store.migrate_legacy().unwrap(), 0);

        let raw: Value =
            serde_json::from_str(&store.storage().get(DEFAULT_STORAGE_KEY).unwrap().unwrap())
                .unwrap();
        assert_eq!(raw["ann-1"]["highlighted_text"], "テスト");
        assert!(raw["ann-1"].get("selectedText").is_none());
        assert_eq!(store.load("ann-1"), Some(legacy));
    }

    #[test]
    fn test_custom_key() {
        let mut store = BookmarkStore::with_key(MemoryStorage::new(), "bookmarks-v2");
        store.save(&annotation("a")).unwrap();

        assert!(store.storage().get("bookmarks-v2").unwrap().is_some());
        assert!(store.storage().get(DEFAULT_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_two_stores_share_file_storage() {
        let dir = TempDir::new().unwrap();
        let mut first = BookmarkStore::new(FileStorage::open(dir.path(), None).unwrap());
        let mut second = BookmarkStore::new(FileStorage::open(dir.path(), None).unwrap());

        first.save(&annotation("a")).unwrap();
        assert!(second.is_saved("a"));

        second.save(&annotation("b")).unwrap();
        first.remove("a");

        let reopened = BookmarkStore::new(FileStorage::open(dir.path(), None).unwrap());
        let remaining: Vec<String> = reopened.list_all().into_iter().map(|a| a.id.to_string()).collect();
        assert_eq!(remaining, vec!["b"]);
    }
}
