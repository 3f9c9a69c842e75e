//! Bookmark history view
//!
//! The history screen shows bookmarks newest first as short cards. The
//! [`Bookmarks`] list caches the store contents and re-reads them after
//! every change it makes.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::store::BookmarkStore;
use crate::annotations::{Annotation, RecordId};
use crate::error::Result;
use crate::storage::StoragePort;

const TITLE_MAX_CHARS: usize = 60;
const EXCERPT_MAX_CHARS: usize = 100;

/// Sort annotations by creation time, newest first
pub fn newest_first(mut annotations: Vec<Annotation>) -> Vec<Annotation> {
    annotations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    annotations
}

/// Card data for one bookmark in the history list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkSummary {
    pub id: RecordId,
    pub scan_id: RecordId,
    pub title: String,
    pub excerpt: String,
    /// e.g. `Jan 10, 2026`
    pub created_on: String,
}

impl From<&Annotation> for BookmarkSummary {
    fn from(annotation: &Annotation) -> Self {
        Self {
            id: annotation.id.clone(),
            scan_id: annotation.scan_id.clone(),
            title: truncate(&annotation.highlighted_text, TITLE_MAX_CHARS),
            excerpt: truncate(&annotation.nuance_data.meaning, EXCERPT_MAX_CHARS),
            created_on: format_date(&annotation.created_at),
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}

/// Cached, newest-first view over a [`BookmarkStore`]
pub struct Bookmarks<S> {
    store: BookmarkStore<S>,
    saved: Vec<Annotation>,
}

impl<S: StoragePort> Bookmarks<S> {
    pub fn new(store: BookmarkStore<S>) -> Self {
        let saved = newest_first(store.list_all());
        Self { store, saved }
    }

    /// Bookmarks as of the last refresh, newest first
    pub fn saved(&self) -> &[Annotation] {
        &self.saved
    }

    pub fn summaries(&self) -> Vec<BookmarkSummary> {
        self.saved.iter().map(BookmarkSummary::from).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }

    /// Re-read the store, picking up writes made elsewhere
    pub fn refresh(&mut self) {
        self.saved = newest_first(self.store.list_all());
    }

    pub fn is_saved(&self, id: &str) -> bool {
        self.store.is_saved(id)
    }

    pub fn get(&self, id: &str) -> Option<Annotation> {
        self.store.load(id)
    }

    pub fn save(&mut self, annotation: &Annotation) -> Result<()> {
        self.store.save(annotation)?;
        self.refresh();
        Ok(())
    }

    pub fn remove(&mut self, id: &str) {
        self.store.remove(id);
        self.refresh();
    }

    pub fn store(&self) -> &BookmarkStore<S> {
        &self.store
    }

    pub fn into_store(self) -> BookmarkStore<S> {
        self.store
    }
}
