use crate::catalog::{Catalog, CatalogErrorKind};
use crate::model::RecipeRecord;
use log::warn;

/// State behind the drink detail screen.
///
/// Records reached from an ingredient filter or from the favorites list carry
/// no ingredient slots; [`load_details`](Self::load_details) fills them in by
/// fetching the recipe by id.
pub struct DetailScreen {
    record: RecipeRecord,
    last_error: Option<CatalogErrorKind>,
}

impl DetailScreen {
    pub fn new(record: RecipeRecord) -> Self {
        DetailScreen {
            record,
            last_error: None,
        }
    }

    pub fn record(&self) -> &RecipeRecord {
        &self.record
    }

    pub fn needs_details(&self) -> bool {
        self.record.needs_details()
    }

    /// Kind of the last failed detail fetch, if the last fetch failed.
    pub fn last_error(&self) -> Option<CatalogErrorKind> {
        self.last_error
    }

    /// Fetches the full record when ingredients are missing.
    ///
    /// On failure the current record is kept and the error kind is recorded.
    pub async fn load_details(&mut self, catalog: &dyn Catalog) {
        if !self.needs_details() {
            return;
        }
        match catalog.fetch_by_id(self.record.id()).await {
            Ok(record) => {
                self.record = record;
                self.last_error = None;
            }
            Err(e) => {
                warn!("failed to load details for {}: {e}", self.record.id());
                self.last_error = Some(e.kind());
            }
        }
    }
}
