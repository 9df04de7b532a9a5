use super::membership::FavoriteMembership;
use crate::favorites::{FavoritesError, FavoritesStore};
use crate::model::{FavoriteEntry, RecipeRecord};
use std::sync::Arc;

/// State behind the saved-drinks screen.
///
/// Unlike the search screens, this one shows full favorite entries, so every
/// change reloads the entry list as well as the id set.
pub struct FavoritesScreen {
    favorites: FavoriteMembership,
    entries: Vec<FavoriteEntry>,
}

impl FavoritesScreen {
    /// Creates the screen and loads the current favorites.
    pub fn new(store: Arc<dyn FavoritesStore>) -> Self {
        let mut screen = FavoritesScreen {
            favorites: FavoriteMembership::load(store),
            entries: Vec::new(),
        };
        screen.load();
        screen
    }

    /// Reloads entries and ids. Call whenever the screen becomes active.
    pub fn load(&mut self) {
        self.entries = self.favorites.store().list();
        self.favorites.refresh();
    }

    pub fn entries(&self) -> &[FavoriteEntry] {
        &self.entries
    }

    /// Entries as recipe records. Their ingredient lists are empty until
    /// the recipe is fetched again by id.
    pub fn records(&self) -> Vec<RecipeRecord> {
        self.entries.iter().map(RecipeRecord::from_favorite).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    /// Removes `id` from the store, then reloads the list.
    pub fn remove_favorite(&mut self, id: &str) -> Result<(), FavoritesError> {
        self.favorites.store().remove(id)?;
        self.load();
        Ok(())
    }

    /// Flips the favorite status of `record`, then reloads the list.
    pub fn toggle_favorite(&mut self, record: &RecipeRecord) -> Result<bool, FavoritesError> {
        let favorited = self.favorites.toggle(record)?;
        self.load();
        Ok(favorited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::QueryKind;
    use crate::favorites::{InMemoryFavoritesStore, JsonFavoritesStore};
    use crate::reconcile::fake::{margarita, mojito, FakeCatalog};
    use crate::reconcile::SearchScreen;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_search_favorite_then_remove() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(temp_dir.path().join("favorites.json")).unwrap();
        let store: Arc<dyn FavoritesStore> = Arc::new(JsonFavoritesStore::new(path));
        let catalog = Arc::new(FakeCatalog::new(vec![margarita(), mojito()]));

        let mut search = SearchScreen::new(QueryKind::ByName, catalog, store.clone());
        search.submit("margarita").await;
        let record = search.results()[0].record.clone();
        assert_eq!(
            record.ingredients(),
            vec!["1 1/2 oz Tequila", "1/2 oz Triple sec", "1 oz Lime juice"]
        );
        assert!(search.toggle_favorite(&record).unwrap());

        let mut saved = FavoritesScreen::new(store.clone());
        assert_eq!(saved.entries().len(), 1);
        assert_eq!(saved.entries()[0].id, "11007");
        assert!(saved.is_favorite("11007"));

        saved.remove_favorite("11007").unwrap();
        assert!(saved.is_empty());
        assert!(!saved.is_favorite("11007"));

        search.refresh_favorited_ids();
        assert!(!search.is_favorite("11007"));
    }

    #[test]
    fn test_records_have_no_ingredients() {
        let store = Arc::new(InMemoryFavoritesStore::new());
        store.add(margarita().to_favorite()).unwrap();

        let saved = FavoritesScreen::new(store);
        let records = saved.records();
        assert_eq!(records[0].name(), "Margarita");
        assert!(records[0].ingredients().is_empty());
    }

    #[test]
    fn test_load_picks_up_external_changes() {
        let store = Arc::new(InMemoryFavoritesStore::new());
        let mut saved = FavoritesScreen::new(store.clone());
        assert!(saved.is_empty());

        store.add(mojito().to_favorite()).unwrap();
        saved.load();
        assert_eq!(saved.entries()[0].name, "Mojito");
    }

    #[test]
    fn test_toggle_from_list_removes_entry() {
        let store = Arc::new(InMemoryFavoritesStore::new());
        store.add(mojito().to_favorite()).unwrap();
        let mut saved = FavoritesScreen::new(store.clone());

        let record = saved.records().remove(0);
        assert!(!saved.toggle_favorite(&record).unwrap());
        assert!(saved.is_empty());
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_remove_unknown_id_keeps_list() {
        let store = Arc::new(InMemoryFavoritesStore::new());
        store.add(mojito().to_favorite()).unwrap();
        let mut saved = FavoritesScreen::new(store);

        saved.remove_favorite("nope").unwrap();
        assert_eq!(saved.entries().len(), 1);
    }
}
