use crate::favorites::{FavoritesError, FavoritesStore};
use crate::model::RecipeRecord;
use std::collections::HashSet;
use std::sync::Arc;

/// In-memory view of which recipe ids are favorited.
///
/// The store is the source of truth. Call [`refresh`](Self::refresh) when a
/// screen becomes active, since another screen may have changed it.
pub struct FavoriteMembership {
    store: Arc<dyn FavoritesStore>,
    ids: HashSet<String>,
}

impl FavoriteMembership {
    /// Creates the view and reads the current ids from `store`.
    pub fn load(store: Arc<dyn FavoritesStore>) -> Self {
        let mut membership = FavoriteMembership {
            store,
            ids: HashSet::new(),
        };
        membership.refresh();
        membership
    }

    pub fn refresh(&mut self) {
        self.ids = self.store.list().into_iter().map(|entry| entry.id).collect();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &HashSet<String> {
        &self.ids
    }

    pub fn store(&self) -> &Arc<dyn FavoritesStore> {
        &self.store
    }

    /// Flips the favorite status of `record` and returns the new status.
    ///
    /// The id set only changes after the store write succeeds, so a failed
    /// write leaves both layers as they were.
    pub fn toggle(&mut self, record: &RecipeRecord) -> Result<bool, FavoritesError> {
        if self.ids.contains(record.id()) {
            self.store.remove(record.id())?;
            self.ids.remove(record.id());
            Ok(false)
        } else {
            self.store.add(record.to_favorite())?;
            self.ids.insert(record.id().to_string());
            Ok(true)
        }
    }
}
