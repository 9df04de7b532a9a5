//! # Favorites storage
//!
//! The [`FavoritesStore`] trait is the durable record of which drinks a user
//! has saved. The host constructs one store at startup and hands the same
//! `Arc` to every screen that shows favorite status.
//!
//! ## Implementations
//!
//! - [`fs::JsonFavoritesStore`]: a single JSON file, rewritten on every mutation
//! - [`memory::InMemoryFavoritesStore`]: process-lifetime storage for tests
//!   and hosts without a writable directory
//!
//! ## Failure policy
//!
//! Mutations persist before returning. A failed write is reported as
//! [`FavoritesError::Unrecoverable`] and must not be ignored by callers. A
//! failed read on the listing path is logged and answered with an empty list.
//!
//! Implementations serialize their own access, so a store may be shared
//! across threads; concurrent add/remove of the same id has no defined order.

use crate::model::FavoriteEntry;
use camino::Utf8PathBuf;
use thiserror::Error;

pub mod fs;
pub mod memory;

pub use fs::JsonFavoritesStore;
pub use memory::InMemoryFavoritesStore;

/// Errors that can occur when reading or writing favorites.
#[derive(Error, Debug)]
pub enum FavoritesError {
    #[error("Failed to persist favorites to {path}: {source}")]
    Unrecoverable {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read favorites from {path}: {source}")]
    Unreadable {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Favorites file {path} is corrupt: {source}")]
    Corrupt {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Durable keyed storage of [`FavoriteEntry`] values.
pub trait FavoritesStore: Send + Sync {
    /// Returns every stored entry in storage order.
    ///
    /// Never fails: an unreadable store yields an empty list.
    fn list(&self) -> Vec<FavoriteEntry>;

    /// Inserts `entry`, replacing any entry with the same id.
    fn add(&self, entry: FavoriteEntry) -> Result<(), FavoritesError>;

    /// Deletes every entry with `id`. Unknown ids are a no-op.
    fn remove(&self, id: &str) -> Result<(), FavoritesError>;

    fn contains(&self, id: &str) -> bool {
        self.list().iter().any(|entry| entry.id == id)
    }
}

/// Replaces the first entry sharing `entry.id` and drops any later duplicates,
/// or appends when the id is new.
pub(crate) fn upsert(entries: &mut Vec<FavoriteEntry>, entry: FavoriteEntry) {
    let Some(index) = entries.iter().position(|e| e.id == entry.id) else {
        entries.push(entry);
        return;
    };

    let id = entry.id.clone();
    entries[index] = entry;
    let mut seen = false;
    entries.retain(|e| {
        if e.id != id {
            return true;
        }
        let keep = !seen;
        seen = true;
        keep
    });
}
