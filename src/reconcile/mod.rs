//! Screen state that joins catalog results with favorite membership.
//!
//! Each screen owns its transient results and an id set derived from the
//! shared [`FavoritesStore`](crate::favorites::FavoritesStore). The screens
//! are passive: they render nothing and report state changes to registered
//! observers.

use crate::catalog::CatalogErrorKind;
use crate::model::RecipeRecord;

mod detail;
mod favorites_screen;
mod membership;
mod search;

#[cfg(test)]
pub(crate) mod fake;

pub use detail::DetailScreen;
pub use favorites_screen::FavoritesScreen;
pub use membership::FavoriteMembership;
pub use search::{PendingQuery, SearchHit, SearchScreen};

/// Callback invoked after every search screen state change.
pub type StateObserver = Box<dyn Fn(&ScreenState) + Send + Sync>;

/// Lifecycle of a search screen.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenState {
    /// Nothing submitted yet.
    Idle,
    Loading,
    /// The query finished; the list may be empty.
    Loaded(Vec<RecipeRecord>),
    /// The query failed. Hosts render generic text but may log the kind.
    Failed(CatalogErrorKind),
}

impl ScreenState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ScreenState::Loading)
    }

    /// Loaded records, or an empty slice in every other state.
    pub fn results(&self) -> &[RecipeRecord] {
        match self {
            ScreenState::Loaded(records) => records,
            _ => &[],
        }
    }
}
