use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::dto::iso_date;

/// One entry per user per day.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Biometric {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub weight: Option<f64>,
    pub weight_units: Option<String>,
    pub avg_hr: Option<i32>,
    pub high_hr: Option<i32>,
    pub low_hr: Option<i32>,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewBiometric {
    pub user_id: Uuid,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub weight: Option<f64>,
    pub weight_units: Option<String>,
    pub avg_hr: Option<i32>,
    pub high_hr: Option<i32>,
    pub low_hr: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Debug, FromRow)]
pub(crate) struct WeightRow {
    pub weight: f64,
    pub weight_units: Option<String>,
    pub date: Date,
    pub notes: Option<String>,
}
