use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::dto::{GenerateRecipeRequest, GenerateRecipeResponse, RecipeFilter};
use super::repo;
use super::repo_types::{NewRecipe, Recipe};
use super::services::{generate_and_save, GenerationError};
use crate::{
    dto::page_bounds,
    errors::{bad_request, internal, not_found},
    state::AppState,
    users::services::require_user,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list_recipes).post(create_recipe))
        .route("/recipes/:id", get(get_recipe))
        .route("/generate-recipe", post(generate_recipe))
}

#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(f): Query<RecipeFilter>,
) -> Result<Json<Vec<Recipe>>, (StatusCode, String)> {
    let type_filter = f.recipe_type.as_deref().filter(|s| !s.is_empty());
    let category_filter = f.extra_categories.as_deref().filter(|s| !s.is_empty());
    let (limit, offset) = page_bounds(f.limit, f.offset)?;
    let rows = repo::list(&state.db, type_filter, category_filter, limit, offset)
        .await
        .map_err(internal)?;
    Ok(Json(rows))
}

#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Recipe>, (StatusCode, String)> {
    repo::find(&state.db, id)
        .await
        .map_err(internal)?
        .map(Json)
        .ok_or_else(|| not_found("Recipe not found"))
}

#[instrument(skip(state, body))]
pub async fn create_recipe(
    State(state): State<AppState>,
    Json(body): Json<NewRecipe>,
) -> Result<(StatusCode, Json<Recipe>), (StatusCode, String)> {
    if body.recipe_name.trim().is_empty() {
        return Err(bad_request("recipe_name is required"));
    }
    if body.calories.is_some_and(|c| c < 0) {
        return Err(bad_request("calories must be non-negative"));
    }
    if let Some(user_id) = body.source_user_id {
        require_user(&state.db, user_id).await?;
    }
    let recipe = repo::insert(&state.db, &body).await.map_err(internal)?;
    info!(recipe_id = %recipe.id, "recipe created");
    Ok((StatusCode::CREATED, Json(recipe)))
}

#[instrument(skip(state, body))]
pub async fn generate_recipe(
    State(state): State<AppState>,
    Json(body): Json<GenerateRecipeRequest>,
) -> Result<Json<GenerateRecipeResponse>, (StatusCode, String)> {
    if body.user_directions.trim().is_empty() {
        return Err(bad_request("user_directions is required"));
    }

    require_user(&state.db, body.user_id).await?;

    let recipe = generate_and_save(
        state.llm.as_ref(),
        &state.db,
        body.user_id,
        &body.user_directions,
        body.model.as_deref(),
    )
    .await
    .map_err(|e| match e {
        GenerationError::Llm(e) => {
            warn!(error = %e, "recipe generation failed");
            (StatusCode::BAD_GATEWAY, format!("Recipe generation failed: {e}"))
        }
        GenerationError::InvalidRecipe => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "Generator failed to produce a valid recipe".into(),
        ),
        GenerationError::Persist(e) => {
            error!(error = %e, "saving generated recipe failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    })?;

    Ok(Json(GenerateRecipeResponse {
        success: true,
        message: "Recipe generated and saved successfully".into(),
        recipe,
    }))
}
