mod favorite;
mod recipe_record;

pub use favorite::FavoriteEntry;
pub use recipe_record::{
    project_ingredients, IngredientSlot, RecipeRecord, NO_INSTRUCTIONS, SLOT_COUNT,
};
