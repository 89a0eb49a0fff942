use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::repo;
use super::repo_types::{ExerciseDefinition, NewExerciseDefinition};
use crate::{
    dto::Pagination,
    errors::{bad_request, internal, not_found},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/exercise-definitions",
            get(list_definitions).post(create_definition),
        )
        .route("/exercise-definitions/:id", get(get_definition))
}

#[instrument(skip(state))]
pub async fn list_definitions(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<ExerciseDefinition>>, (StatusCode, String)> {
    let (limit, offset) = p.bounds()?;
    let rows = repo::list(&state.db, limit, offset)
        .await
        .map_err(internal)?;
    Ok(Json(rows))
}

#[instrument(skip(state))]
pub async fn get_definition(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ExerciseDefinition>, (StatusCode, String)> {
    repo::find(&state.db, id)
        .await
        .map_err(internal)?
        .map(Json)
        .ok_or_else(|| not_found("Exercise definition not found"))
}

pub(crate) fn validate(def: &NewExerciseDefinition) -> Result<(), (StatusCode, String)> {
    if def.exercise_name.trim().is_empty() {
        return Err(bad_request("exercise_name is required"));
    }
    if !def.avg_met_value.is_finite() || def.avg_met_value <= 0.0 {
        return Err(bad_request("avg_met_value must be positive"));
    }
    Ok(())
}

#[instrument(skip(state, body))]
pub async fn create_definition(
    State(state): State<AppState>,
    Json(body): Json<NewExerciseDefinition>,
) -> Result<(StatusCode, Json<ExerciseDefinition>), (StatusCode, String)> {
    validate(&body)?;
    match repo::insert(&state.db, &body).await.map_err(internal)? {
        Some(def) => {
            info!(exercise = %def.exercise_name, met = def.avg_met_value, "exercise definition created");
            Ok((StatusCode::CREATED, Json(def)))
        }
        None => {
            warn!(exercise = %body.exercise_name, "duplicate exercise definition");
            Err((
                StatusCode::CONFLICT,
                "Exercise definition already exists".into(),
            ))
        }
    }
}
