use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::dto::iso_date;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Activity {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(with = "iso_date")]
    pub activity_date: Date,
    pub activity_type: String,
    pub distance: Option<f64>,
    pub distance_units: Option<String>,
    pub duration: Option<f64>,
    pub duration_units: Option<String>,
    pub speed: Option<f64>,
    pub speed_units: Option<String>,
    pub calories_burned: Option<i32>,
    pub created_at: OffsetDateTime,
}

/// Request body for activity creation. `time`/`time_units` are accepted as
/// aliases of the duration fields.
#[derive(Debug, Clone, Deserialize)]
pub struct NewActivity {
    pub user_id: Uuid,
    #[serde(with = "iso_date")]
    pub activity_date: Date,
    pub activity_type: String,
    pub distance: Option<f64>,
    pub distance_units: Option<String>,
    #[serde(alias = "time")]
    pub duration: Option<f64>,
    #[serde(alias = "time_units")]
    pub duration_units: Option<String>,
    pub speed: Option<f64>,
    pub speed_units: Option<String>,
    pub calories_burned: Option<i32>,
}
