//! In-process catalog used by the reconciler tests.

use crate::catalog::{Catalog, CatalogError};
use crate::model::{IngredientSlot, RecipeRecord};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

pub(crate) fn margarita() -> RecipeRecord {
    RecipeRecord::new("11007", "Margarita")
        .with_thumbnail("https://example.test/margarita.jpg")
        .with_instructions("Rub the rim of the glass with the lime slice.")
        .with_slot(0, IngredientSlot::new("Tequila", Some("1 1/2 oz ")))
        .with_slot(1, IngredientSlot::new("Triple sec", Some("1/2 oz ")))
        .with_slot(2, IngredientSlot::new("Lime juice", Some("1 oz ")))
}

pub(crate) fn mojito() -> RecipeRecord {
    RecipeRecord::new("11000", "Mojito")
        .with_slot(0, IngredientSlot::new("Light rum", Some("2-3 oz ")))
        .with_slot(1, IngredientSlot::new("Lime", Some("Juice of 1 ")))
        .with_slot(2, IngredientSlot::new("Mint", Some("2-4 ")))
}

/// Serves a fixed set of records and counts every call.
pub(crate) struct FakeCatalog {
    records: Vec<RecipeRecord>,
    fail: bool,
    calls: AtomicUsize,
}

impl FakeCatalog {
    pub(crate) fn new(records: Vec<RecipeRecord>) -> Self {
        FakeCatalog {
            records,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn failing() -> Self {
        FakeCatalog {
            fail: true,
            ..FakeCatalog::new(Vec::new())
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn matching(
        &self,
        predicate: impl Fn(&RecipeRecord) -> bool,
    ) -> Result<Vec<RecipeRecord>, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(CatalogError::InvalidRequest("fake failure".to_string()));
        }
        Ok(self.records.iter().filter(|r| predicate(r)).cloned().collect())
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn search_by_name(&self, query: &str) -> Result<Vec<RecipeRecord>, CatalogError> {
        let query = query.to_lowercase();
        self.matching(|r| r.name().to_lowercase().contains(&query))
    }

    async fn search_by_ingredient(
        &self,
        ingredient: &str,
    ) -> Result<Vec<RecipeRecord>, CatalogError> {
        self.matching(|r| {
            r.slots().iter().any(|slot| {
                slot.ingredient
                    .as_deref()
                    .is_some_and(|i| i.eq_ignore_ascii_case(ingredient))
            })
        })
    }

    async fn fetch_by_id(&self, id: &str) -> Result<RecipeRecord, CatalogError> {
        self.matching(|r| r.id() == id)?
            .into_iter()
            .next()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }
}
