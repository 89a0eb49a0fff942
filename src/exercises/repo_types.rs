use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExerciseDefinition {
    pub id: Uuid,
    pub exercise_name: String,
    pub avg_met_value: f64,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewExerciseDefinition {
    pub exercise_name: String,
    pub avg_met_value: f64,
}
