use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::repo;
use super::repo_types::{Activity, NewActivity};
use super::services::calories_for_activity;
use crate::{
    dto::UserFilter,
    errors::{bad_request, internal, not_found},
    state::AppState,
    users::services::require_user,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/activities", get(list_activities).post(create_activity))
        .route("/activities/:id", get(get_activity))
}

#[instrument(skip(state))]
pub async fn list_activities(
    State(state): State<AppState>,
    Query(f): Query<UserFilter>,
) -> Result<Json<Vec<Activity>>, (StatusCode, String)> {
    let (limit, offset) = f.bounds()?;
    let rows = repo::list(&state.db, f.user_id, limit, offset)
        .await
        .map_err(internal)?;
    Ok(Json(rows))
}

#[instrument(skip(state))]
pub async fn get_activity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Activity>, (StatusCode, String)> {
    repo::find(&state.db, id)
        .await
        .map_err(internal)?
        .map(Json)
        .ok_or_else(|| not_found("Activity not found"))
}

pub(crate) fn validate(a: &NewActivity) -> Result<(), (StatusCode, String)> {
    if a.activity_type.trim().is_empty() {
        return Err(bad_request("activity_type is required"));
    }
    if a.duration.is_some_and(|d| !d.is_finite() || d < 0.0) {
        return Err(bad_request("duration must be a non-negative number"));
    }
    if a.calories_burned.is_some_and(|c| c < 0) {
        return Err(bad_request("calories_burned must be non-negative"));
    }
    Ok(())
}

#[instrument(skip(state, body))]
pub async fn create_activity(
    State(state): State<AppState>,
    Json(body): Json<NewActivity>,
) -> Result<(StatusCode, Json<Activity>), (StatusCode, String)> {
    validate(&body)?;
    require_user(&state.db, body.user_id).await?;

    let calories = calories_for_activity(&state.db, &state.db, &body).await;
    let activity = repo::insert(&state.db, &body, calories)
        .await
        .map_err(internal)?;

    info!(
        activity_id = %activity.id,
        user_id = %activity.user_id,
        calories = ?activity.calories_burned,
        "activity created"
    );
    Ok((StatusCode::CREATED, Json(activity)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(json: serde_json::Value) -> NewActivity {
        serde_json::from_value(json).expect("valid body")
    }

    #[test]
    fn accepts_time_aliases() {
        let a = body(serde_json::json!({
            "user_id": Uuid::nil(),
            "activity_date": "2024-06-01",
            "activity_type": "Cycling",
            "time": 45.0,
            "time_units": "min"
        }));
        assert_eq!(a.duration, Some(45.0));
        assert_eq!(a.duration_units.as_deref(), Some("min"));
        assert!(validate(&a).is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let base = serde_json::json!({
            "user_id": Uuid::nil(),
            "activity_date": "2024-06-01",
            "activity_type": "Cycling"
        });

        let mut v = base.clone();
        v["activity_type"] = "  ".into();
        assert!(validate(&body(v)).is_err());

        let mut v = base.clone();
        v["duration"] = (-5.0).into();
        assert!(validate(&body(v)).is_err());

        let mut v = base;
        v["calories_burned"] = (-1).into();
        assert!(validate(&body(v)).is_err());
    }
}
