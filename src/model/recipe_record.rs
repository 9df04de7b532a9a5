use super::favorite::FavoriteEntry;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Number of ingredient/measure pairs a drink object carries.
pub const SLOT_COUNT: usize = 15;

/// Text shown for a recipe whose instructions are absent or blank.
pub const NO_INSTRUCTIONS: &str = "No instructions provided.";

/// One ingredient/measure pair as delivered by the recipe service.
///
/// Both halves are independently optional. A slot with no ingredient name
/// contributes nothing to [`project_ingredients`], whatever its measure says.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientSlot {
    pub ingredient: Option<String>,
    pub measure: Option<String>,
}

impl IngredientSlot {
    pub fn new(ingredient: impl Into<String>, measure: Option<&str>) -> Self {
        IngredientSlot {
            ingredient: Some(ingredient.into()),
            measure: measure.map(str::to_string),
        }
    }

    /// Formats the slot as a display line, or `None` if it holds no ingredient.
    fn line(&self) -> Option<String> {
        let ingredient = self.ingredient.as_deref().filter(|i| !i.is_empty())?;
        let measure = self.measure.as_deref().map(str::trim).unwrap_or_default();
        if measure.is_empty() {
            Some(ingredient.to_string())
        } else {
            Some(format!("{measure} {ingredient}"))
        }
    }
}

/// Projects ingredient slots into ordered display lines.
///
/// Slots are scanned in order. A slot whose ingredient is absent or empty is
/// skipped; an included slot renders as `"<measure> <ingredient>"` when its
/// trimmed measure is non-empty and as `"<ingredient>"` otherwise. Nothing is
/// reordered or deduplicated.
///
/// # Examples
///
/// ```
/// use cocktail_compass::{project_ingredients, IngredientSlot};
///
/// let slots = vec![
///     IngredientSlot::new("Tequila", Some("1 1/2 oz ")),
///     IngredientSlot::default(),
///     IngredientSlot::new("Salt", None),
/// ];
/// assert_eq!(project_ingredients(&slots), vec!["1 1/2 oz Tequila", "Salt"]);
/// ```
pub fn project_ingredients(slots: &[IngredientSlot]) -> Vec<String> {
    slots.iter().filter_map(IngredientSlot::line).collect()
}

/// A drink as returned by the recipe service, normalized.
///
/// Records are created fresh for every catalog query and are never cached.
/// The ingredient list is derived from the slots on demand, see
/// [`RecipeRecord::ingredients`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawDrink")]
pub struct RecipeRecord {
    id: String,
    name: String,
    thumbnail_url: Option<String>,
    instructions: Option<String>,
    slots: [IngredientSlot; SLOT_COUNT],
}

impl RecipeRecord {
    /// Creates a record with no thumbnail, no instructions and empty slots.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        RecipeRecord {
            id: id.into(),
            name: name.into(),
            thumbnail_url: None,
            instructions: None,
            slots: Default::default(),
        }
    }

    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Sets the slot at a zero-based `index`. Indices past the last slot are ignored.
    pub fn with_slot(mut self, index: usize, slot: IngredientSlot) -> Self {
        if let Some(target) = self.slots.get_mut(index) {
            *target = slot;
        }
        self
    }

    /// Rebuilds a record from a persisted favorite.
    ///
    /// Favorites don't keep ingredient slots, so the returned record has an
    /// empty ingredient list until it is re-fetched by id.
    pub fn from_favorite(entry: &FavoriteEntry) -> Self {
        RecipeRecord {
            id: entry.id.clone(),
            name: entry.name.clone(),
            thumbnail_url: entry.thumbnail_url.clone(),
            instructions: entry.instructions.clone(),
            slots: Default::default(),
        }
    }

    /// Projects the fields that the favorites store persists.
    pub fn to_favorite(&self) -> FavoriteEntry {
        FavoriteEntry {
            id: self.id.clone(),
            name: self.name.clone(),
            thumbnail_url: self.thumbnail_url.clone(),
            instructions: self.instructions.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail_url.as_deref()
    }

    pub fn instructions(&self) -> Option<&str> {
        self.instructions.as_deref()
    }

    /// Returns the instructions, or [`NO_INSTRUCTIONS`] when absent or blank.
    ///
    /// The service serializes "not loaded" and "none exist" the same way, so
    /// both render identically.
    pub fn instructions_text(&self) -> &str {
        self.instructions
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .unwrap_or(NO_INSTRUCTIONS)
    }

    pub fn slots(&self) -> &[IngredientSlot; SLOT_COUNT] {
        &self.slots
    }

    /// Ordered ingredient lines, see [`project_ingredients`].
    pub fn ingredients(&self) -> Vec<String> {
        project_ingredients(&self.slots)
    }

    /// True when the record has no ingredient lines and should be re-fetched by id.
    pub fn needs_details(&self) -> bool {
        self.ingredients().is_empty()
    }
}

/// Drink object exactly as the service sends it.
///
/// Ingredient and measure slots arrive as `strIngredient1..15` and
/// `strMeasure1..15`, any of which may be missing or null.
#[derive(Deserialize)]
struct RawDrink {
    #[serde(rename = "idDrink")]
    id: String,
    #[serde(rename = "strDrink")]
    name: String,
    #[serde(rename = "strDrinkThumb")]
    thumbnail_url: Option<String>,
    #[serde(rename = "strInstructions")]
    instructions: Option<String>,
    #[serde(flatten)]
    rest: HashMap<String, Value>,
}

impl From<RawDrink> for RecipeRecord {
    fn from(raw: RawDrink) -> Self {
        let text = |key: String| raw.rest.get(&key).and_then(Value::as_str).map(str::to_string);
        let slots = std::array::from_fn(|i| IngredientSlot {
            ingredient: text(format!("strIngredient{}", i + 1)),
            measure: text(format!("strMeasure{}", i + 1)),
        });

        RecipeRecord {
            id: raw.id,
            name: raw.name,
            thumbnail_url: raw.thumbnail_url,
            instructions: raw.instructions,
            slots,
        }
    }
}
