use crate::model::RecipeRecord;
use serde::Deserialize;

/// Response envelope shared by every catalog endpoint.
///
/// The service answers "no matches" with a missing or null `drinks` field.
#[derive(Debug, Deserialize)]
pub(crate) struct DrinkResponse {
    #[serde(default)]
    pub drinks: Option<Vec<RecipeRecord>>,
}

/// The two list queries a search screen can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    /// Full-text search on drink names.
    ByName,
    /// Filter on a single ingredient.
    ByIngredient,
}

impl QueryKind {
    pub(crate) fn endpoint(self) -> (&'static str, &'static str) {
        match self {
            QueryKind::ByName => ("search.php", "s"),
            QueryKind::ByIngredient => ("filter.php", "i"),
        }
    }
}

/// Broad classification of a catalog failure, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogErrorKind {
    InvalidRequest,
    TransportFailure,
    DecodeFailure,
    NotFound,
}
