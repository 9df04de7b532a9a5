use super::membership::FavoriteMembership;
use super::{ScreenState, StateObserver};
use crate::catalog::{Catalog, CatalogError, QueryKind};
use crate::favorites::{FavoritesError, FavoritesStore};
use crate::model::RecipeRecord;
use log::{debug, warn};
use std::sync::Arc;

/// A recipe in the current results, annotated with its favorite status.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit<'a> {
    pub record: &'a RecipeRecord,
    pub is_favorite: bool,
}

/// State behind a drink search screen (by name or by ingredient).
///
/// A submission moves the screen `Idle/Loaded/Failed -> Loading -> Loaded | Failed`.
/// It is split in three so a host can keep several queries in flight:
/// [`begin`](Self::begin) enters `Loading`, [`PendingQuery::run`] does the
/// round trip without borrowing the screen, and [`finish`](Self::finish)
/// applies the outcome. Outcomes are applied in the order they finish.
pub struct SearchScreen {
    kind: QueryKind,
    catalog: Arc<dyn Catalog>,
    favorites: FavoriteMembership,
    query: String,
    state: ScreenState,
    observers: Vec<StateObserver>,
}

impl SearchScreen {
    pub fn new(kind: QueryKind, catalog: Arc<dyn Catalog>, store: Arc<dyn FavoritesStore>) -> Self {
        SearchScreen {
            kind,
            catalog,
            favorites: FavoriteMembership::load(store),
            query: String::new(),
            state: ScreenState::Idle,
            observers: Vec::new(),
        }
    }

    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    /// The most recently submitted query.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    /// Registers a callback run after every state change.
    pub fn subscribe(&mut self, observer: impl Fn(&ScreenState) + Send + Sync + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Re-reads favorite ids from the store. Call when the screen becomes active.
    pub fn refresh_favorited_ids(&mut self) {
        self.favorites.refresh();
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    /// Flips the favorite status of `record`, returning the new status.
    pub fn toggle_favorite(&mut self, record: &RecipeRecord) -> Result<bool, FavoritesError> {
        self.favorites.toggle(record)
    }

    /// Current results with favorite status, in service order.
    pub fn results(&self) -> Vec<SearchHit<'_>> {
        self.state
            .results()
            .iter()
            .map(|record| SearchHit {
                record,
                is_favorite: self.favorites.contains(record.id()),
            })
            .collect()
    }

    /// Enters `Loading` for `query` and returns the request to run.
    ///
    /// A blank query leaves the screen untouched and returns `None`; no
    /// request is issued for it.
    pub fn begin(&mut self, query: &str) -> Option<PendingQuery> {
        if query.trim().is_empty() {
            debug!("ignoring blank {:?} query", self.kind);
            return None;
        }
        self.query = query.to_string();
        self.set_state(ScreenState::Loading);
        Some(PendingQuery {
            catalog: Arc::clone(&self.catalog),
            kind: self.kind,
            query: query.to_string(),
        })
    }

    /// Applies the outcome of a query started with [`begin`](Self::begin).
    pub fn finish(&mut self, outcome: Result<Vec<RecipeRecord>, CatalogError>) {
        let state = match outcome {
            Ok(records) => {
                debug!("{:?} query returned {} drinks", self.kind, records.len());
                ScreenState::Loaded(records)
            }
            Err(e) => {
                warn!("{:?} query failed ({:?}): {e}", self.kind, e.kind());
                ScreenState::Failed(e.kind())
            }
        };
        self.set_state(state);
    }

    /// Runs a full submission: begin, round trip, finish.
    pub async fn submit(&mut self, query: &str) {
        if let Some(pending) = self.begin(query) {
            let outcome = pending.run().await;
            self.finish(outcome);
        }
    }

    fn set_state(&mut self, state: ScreenState) {
        self.state = state;
        for observer in &self.observers {
            observer(&self.state);
        }
    }
}

/// A query that has entered `Loading` but not yet hit the network.
pub struct PendingQuery {
    catalog: Arc<dyn Catalog>,
    kind: QueryKind,
    query: String,
}

impl PendingQuery {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub async fn run(self) -> Result<Vec<RecipeRecord>, CatalogError> {
        self.catalog.query(self.kind, &self.query).await
    }
}
