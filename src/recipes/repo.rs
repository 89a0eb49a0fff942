use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{NewRecipe, Recipe};

const RECIPE_COLUMNS: &str = "id, recipe_name, recipe_type, recipe_source, source_user_id, \
     recipe_url, ingredients, instructions, directions, calories, fat, carbs, protein, \
     extra_categories, created_at";

/// Write side used by the generation workflow.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn insert_recipe(&self, recipe: &NewRecipe) -> anyhow::Result<Recipe>;
}

#[async_trait]
impl RecipeStore for PgPool {
    async fn insert_recipe(&self, recipe: &NewRecipe) -> anyhow::Result<Recipe> {
        insert(self, recipe).await
    }
}

pub async fn insert(db: &PgPool, r: &NewRecipe) -> anyhow::Result<Recipe> {
    let sql = format!(
        r#"
        INSERT INTO recipes (
            recipe_name, recipe_type, recipe_source, source_user_id, recipe_url,
            ingredients, instructions, directions, calories, fat, carbs, protein,
            extra_categories
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING {RECIPE_COLUMNS}
        "#
    );
    sqlx::query_as::<_, Recipe>(&sql)
        .bind(&r.recipe_name)
        .bind(&r.recipe_type)
        .bind(&r.recipe_source)
        .bind(r.source_user_id)
        .bind(&r.recipe_url)
        .bind(&r.ingredients)
        .bind(&r.instructions)
        .bind(&r.directions)
        .bind(r.calories)
        .bind(r.fat)
        .bind(r.carbs)
        .bind(r.protein)
        .bind(&r.extra_categories)
        .fetch_one(db)
        .await
        .context("insert recipe")
}

pub async fn find(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Recipe>> {
    let sql = format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1");
    sqlx::query_as::<_, Recipe>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await
        .context("find recipe")
}

/// `recipe_type` matches exactly; `category` matches anywhere in the tag list, ignoring case.
pub async fn list(
    db: &PgPool,
    recipe_type: Option<&str>,
    category: Option<&str>,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<Recipe>> {
    let sql = format!(
        r#"
        SELECT {RECIPE_COLUMNS}
          FROM recipes
         WHERE ($1::text IS NULL OR recipe_type = $1)
           AND ($2::text IS NULL OR extra_categories ILIKE '%' || $2 || '%')
         ORDER BY recipe_name
         LIMIT $3 OFFSET $4
        "#
    );
    sqlx::query_as::<_, Recipe>(&sql)
        .bind(recipe_type)
        .bind(category)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
        .context("list recipes")
}
