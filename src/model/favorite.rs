use serde::{Deserialize, Serialize};

/// The persisted subset of a recipe record.
///
/// Ingredient slots are not stored. A reloaded favorite has no ingredient
/// lines until the recipe is fetched again by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl FavoriteEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        FavoriteEntry {
            id: id.into(),
            name: name.into(),
            thumbnail_url: None,
            instructions: None,
        }
    }
}
