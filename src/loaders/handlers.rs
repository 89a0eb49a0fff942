use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{info, instrument, warn};

use super::dto::{DatasetOutcome, LoadAllResponse, LoadResponse};
use super::{services, Dataset, LoadError};
use crate::{
    errors::{bad_request, internal},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/load-user-data", post(load_users))
        .route("/load-exercise-definitions", post(load_exercise_definitions))
        .route("/load-activity-data", post(load_activities))
        .route("/load-biometric-data", post(load_biometrics))
        .route("/load-recipe-data", post(load_recipes))
        .route("/load-all-data", post(load_all))
}

fn load_error(e: LoadError) -> (StatusCode, String) {
    match e {
        LoadError::NotFound(_) => {
            warn!(error = %e, "dataset missing");
            (StatusCode::NOT_FOUND, e.to_string())
        }
        LoadError::InvalidRow { .. } => {
            warn!(error = %e, "dataset rejected");
            bad_request(e.to_string())
        }
        LoadError::Store(e) => internal(format!("{e:#}")),
    }
}

/// Loads the request body as CSV, or the dataset's file from the data
/// directory when the body is empty.
async fn load_one(
    state: &AppState,
    dataset: Dataset,
    body: String,
) -> Result<Json<LoadResponse>, (StatusCode, String)> {
    let csv = if body.trim().is_empty() {
        services::read_dataset(&state.config.data_dir, dataset)
            .await
            .map_err(load_error)?
    } else {
        body
    };
    let counts = services::load(&state.db, dataset, &csv)
        .await
        .map_err(load_error)?;

    info!(
        dataset = dataset.label(),
        loaded = counts.loaded,
        skipped = counts.skipped,
        "dataset loaded"
    );
    Ok(Json(LoadResponse {
        success: true,
        message: format!("Successfully loaded {} {}", counts.loaded, dataset.label()),
        counts,
    }))
}

#[instrument(skip(state, body))]
pub async fn load_users(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<LoadResponse>, (StatusCode, String)> {
    load_one(&state, Dataset::Users, body).await
}

#[instrument(skip(state, body))]
pub async fn load_exercise_definitions(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<LoadResponse>, (StatusCode, String)> {
    load_one(&state, Dataset::ExerciseDefinitions, body).await
}

#[instrument(skip(state, body))]
pub async fn load_activities(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<LoadResponse>, (StatusCode, String)> {
    load_one(&state, Dataset::Activities, body).await
}

#[instrument(skip(state, body))]
pub async fn load_biometrics(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<LoadResponse>, (StatusCode, String)> {
    load_one(&state, Dataset::Biometrics, body).await
}

#[instrument(skip(state, body))]
pub async fn load_recipes(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<LoadResponse>, (StatusCode, String)> {
    load_one(&state, Dataset::Recipes, body).await
}

/// Every dataset file in load order; missing files are reported and skipped.
#[instrument(skip(state))]
pub async fn load_all(
    State(state): State<AppState>,
) -> Result<Json<LoadAllResponse>, (StatusCode, String)> {
    let mut datasets = Vec::with_capacity(Dataset::ALL.len());
    for dataset in Dataset::ALL {
        let outcome = match services::read_dataset(&state.config.data_dir, dataset).await {
            Ok(csv) => DatasetOutcome {
                dataset: dataset.label(),
                file: dataset.file_name(),
                found: true,
                counts: services::load(&state.db, dataset, &csv)
                    .await
                    .map_err(load_error)?,
            },
            Err(LoadError::NotFound(path)) => {
                warn!(path = %path.display(), "dataset file missing; skipped");
                DatasetOutcome {
                    dataset: dataset.label(),
                    file: dataset.file_name(),
                    found: false,
                    counts: Default::default(),
                }
            }
            Err(e) => return Err(load_error(e)),
        };
        datasets.push(outcome);
    }

    let loaded: u64 = datasets.iter().map(|d| d.counts.loaded).sum();
    info!(loaded, "full import finished");
    Ok(Json(LoadAllResponse {
        success: true,
        message: format!("Successfully loaded {loaded} rows"),
        datasets,
    }))
}
