//! Bookmarks module
//!
//! Annotations the user chose to keep, persisted through a [`StoragePort`]
//! so they survive reloads within the same profile.
//!
//! [`StoragePort`]: crate::storage::StoragePort

mod history;
mod store;

pub use history::{newest_first, BookmarkSummary, Bookmarks};
pub use store::BookmarkStore;
