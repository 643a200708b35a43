use serde::{Deserialize, Serialize};

/// Request body for recipe creation
///
/// Ingredients arrive as free-text lines and are run through
/// [`crate::ingredient::Ingredient::parse`] before anything is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecipe {
    pub name: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}

/// A stored ingredient, as persisted and returned over the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StoredIngredient {
    pub id: i64,
    pub preposition: String,
    pub name: String,
    pub quantity: f32,
    pub unit: String,
}

/// A recipe with its ingredients and steps hydrated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDetails {
    pub id: i64,
    pub name: String,
    pub ingredients: Vec<StoredIngredient>,
    pub steps: Vec<String>,
}

/// A cart with its creation timestamp (RFC 3339) and member recipes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartDetails {
    pub id: i64,
    pub created_at: String,
    pub recipes: Vec<RecipeDetails>,
}

/// Success envelope wrapping every API payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Data<T> {
    pub data: T,
}
