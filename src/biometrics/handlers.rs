use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::repo;
use super::repo_types::{Biometric, NewBiometric};
use crate::{
    dto::UserFilter,
    errors::{bad_request, internal, not_found},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/biometrics", get(list_biometrics).post(upsert_biometric))
        .route("/biometrics/:id", get(get_biometric))
}

#[instrument(skip(state))]
pub async fn list_biometrics(
    State(state): State<AppState>,
    Query(f): Query<UserFilter>,
) -> Result<Json<Vec<Biometric>>, (StatusCode, String)> {
    let (limit, offset) = f.bounds()?;
    let rows = repo::list(&state.db, f.user_id, limit, offset)
        .await
        .map_err(internal)?;
    Ok(Json(rows))
}

#[instrument(skip(state))]
pub async fn get_biometric(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Biometric>, (StatusCode, String)> {
    repo::find(&state.db, id)
        .await
        .map_err(internal)?
        .map(Json)
        .ok_or_else(|| not_found("Biometric entry not found"))
}

pub(crate) fn validate(b: &NewBiometric) -> Result<(), (StatusCode, String)> {
    if b.weight.is_some_and(|w| !w.is_finite() || w < 0.0) {
        return Err(bad_request("weight must be a non-negative number"));
    }
    for hr in [b.avg_hr, b.high_hr, b.low_hr].into_iter().flatten() {
        if hr < 0 {
            return Err(bad_request("heart rate values must be non-negative"));
        }
    }
    Ok(())
}

#[instrument(skip(state, body))]
pub async fn upsert_biometric(
    State(state): State<AppState>,
    Json(body): Json<NewBiometric>,
) -> Result<Json<Biometric>, (StatusCode, String)> {
    validate(&body)?;
    let row = repo::upsert(&state.db, &body).await.map_err(internal)?;
    info!(biometric_id = %row.id, user_id = %row.user_id, date = %row.date, "biometric saved");
    Ok(Json(row))
}
