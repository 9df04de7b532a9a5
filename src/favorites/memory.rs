use super::{upsert, FavoritesError, FavoritesStore};
use crate::model::FavoriteEntry;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Favorites that live as long as the process. Writes never fail.
#[derive(Debug, Default)]
pub struct InMemoryFavoritesStore {
    entries: Mutex<Vec<FavoriteEntry>>,
}

impl InMemoryFavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, Vec<FavoriteEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FavoritesStore for InMemoryFavoritesStore {
    fn list(&self) -> Vec<FavoriteEntry> {
        self.entries().clone()
    }

    fn add(&self, entry: FavoriteEntry) -> Result<(), FavoritesError> {
        upsert(&mut self.entries(), entry);
        Ok(())
    }

    fn remove(&self, id: &str) -> Result<(), FavoritesError> {
        self.entries().retain(|e| e.id != id);
        Ok(())
    }
}
