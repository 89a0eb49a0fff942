use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    biometrics,
    dto::Pagination,
    errors::{bad_request, internal, not_found},
    state::AppState,
    users::{
        dto::{CreateUserRequest, LatestWeightResponse, LoginRequest, LoginResponse, PublicUser},
        repo::User,
        services::{credentials_match, is_valid_email, latest_weight_view, stored_password},
    },
};

pub fn login_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", get(get_user))
        .route("/users/:id/latest-weight", get(get_latest_weight))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, (StatusCode, String)> {
    payload.email = payload.email.trim().to_lowercase();

    let user = match User::find_by_email(&state.db, &payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(email = %payload.email, "login unknown email");
            return Err(invalid_credentials());
        }
        Err(e) => return Err(internal(e)),
    };

    if !credentials_match(&user, &payload.password) {
        warn!(email = %payload.email, user_id = %user.id, "login rejected");
        return Err(invalid_credentials());
    }

    info!(user_id = %user.id, "user logged in");
    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".into(),
        user: user.into(),
    }))
}

fn invalid_credentials() -> (StatusCode, String) {
    (StatusCode::UNAUTHORIZED, "Invalid email or password".into())
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<PublicUser>>, (StatusCode, String)> {
    let (limit, offset) = p.bounds()?;
    let users = User::list(&state.db, limit, offset)
        .await
        .map_err(internal)?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PublicUser>, (StatusCode, String)> {
    User::find(&state.db, id)
        .await
        .map_err(internal)?
        .map(|u| Json(u.into()))
        .ok_or_else(|| not_found("User not found"))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(mut payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<PublicUser>), (StatusCode, String)> {
    payload.email = payload.email.trim().to_lowercase();
    let name = payload.name.trim();

    if name.is_empty() {
        return Err(bad_request("Name is required"));
    }
    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(bad_request("Invalid email"));
    }

    if User::find_by_email(&state.db, &payload.email)
        .await
        .map_err(internal)?
        .is_some()
    {
        warn!(email = %payload.email, "email already registered");
        return Err((StatusCode::CONFLICT, "Email already registered".into()));
    }

    let hash = stored_password(payload.password.as_deref()).map_err(internal)?;

    let user = User::create(
        &state.db,
        name,
        &payload.email,
        payload.weight_goal.as_deref(),
        hash.as_deref(),
    )
    .await
    .map_err(internal)?;

    info!(user_id = %user.id, email = %user.email, "user created");
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(state))]
pub async fn get_latest_weight(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LatestWeightResponse>, (StatusCode, String)> {
    let sample = biometrics::repo::latest_weight_with_notes(&state.db, id)
        .await
        .map_err(internal)?;
    Ok(Json(latest_weight_view(sample)))
}
