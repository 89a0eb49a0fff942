use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub weight_goal: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>, // Argon2 hash, not exposed in JSON
    pub created_at: OffsetDateTime,
}
