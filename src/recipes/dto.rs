use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo_types::Recipe;

#[derive(Debug, Deserialize)]
pub struct RecipeFilter {
    pub recipe_type: Option<String>,
    pub extra_categories: Option<String>,
    #[serde(default = "crate::dto::default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRecipeRequest {
    pub user_id: Uuid,
    pub user_directions: String,
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateRecipeResponse {
    pub success: bool,
    pub message: String,
    pub recipe: Recipe,
}
