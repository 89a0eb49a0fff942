//! Bulk CSV import of users, exercise definitions, activities, biometrics and recipes.

mod dto;
pub mod handlers;
pub mod rows;
pub mod services;

use std::path::PathBuf;

use thiserror::Error;

use crate::state::AppState;
use axum::Router;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("CSV file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("line {line}: {message}")]
    InvalidRow { line: u64, message: String },

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// One importable CSV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Users,
    ExerciseDefinitions,
    Activities,
    Biometrics,
    Recipes,
}

impl Dataset {
    /// Load order for a full import: users before the rows that reference them.
    pub const ALL: [Dataset; 5] = [
        Dataset::Users,
        Dataset::ExerciseDefinitions,
        Dataset::Activities,
        Dataset::Biometrics,
        Dataset::Recipes,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Dataset::Users => "userData.csv",
            Dataset::ExerciseDefinitions => "exerciseDefinitions.csv",
            Dataset::Activities => "activityData.csv",
            Dataset::Biometrics => "biometricData.csv",
            Dataset::Recipes => "recipeData.csv",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Dataset::Users => "users",
            Dataset::ExerciseDefinitions => "exercise definitions",
            Dataset::Activities => "activities",
            Dataset::Biometrics => "biometric entries",
            Dataset::Recipes => "recipes",
        }
    }
}

pub fn router() -> Router<AppState> {
    handlers::routes()
}
