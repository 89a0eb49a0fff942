use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Recipe row in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    pub id: Uuid,
    pub recipe_name: String,
    pub recipe_type: Option<String>,
    pub recipe_source: Option<String>,
    pub source_user_id: Option<Uuid>,
    pub recipe_url: Option<String>,
    pub ingredients: Option<String>,
    pub instructions: Option<String>,
    pub directions: Option<String>,
    pub calories: Option<i32>,
    pub fat: Option<f64>,
    pub carbs: Option<f64>,
    pub protein: Option<f64>,
    pub extra_categories: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Column values for an insert.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewRecipe {
    pub recipe_name: String,
    pub recipe_type: Option<String>,
    pub recipe_source: Option<String>,
    pub source_user_id: Option<Uuid>,
    pub recipe_url: Option<String>,
    pub ingredients: Option<String>,
    pub instructions: Option<String>,
    pub directions: Option<String>,
    pub calories: Option<i32>,
    pub fat: Option<f64>,
    pub carbs: Option<f64>,
    pub protein: Option<f64>,
    pub extra_categories: Option<String>,
}
