use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use super::repo_types::User;
use crate::dto::iso_date;

/// Request body for user creation.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub weight_goal: Option<String>,
    pub password: Option<String>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub user: PublicUser,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub weight_goal: Option<String>,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            weight_goal: u.weight_goal,
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct LatestWeightResponse {
    pub weight: Option<f64>,
    pub weight_units: Option<String>,
    pub weight_kg: Option<f64>,
    #[serde(with = "iso_date::option")]
    pub date: Option<Date>,
    pub notes: Option<String>,
    pub found: bool,
}
