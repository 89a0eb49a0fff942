use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Activity, NewActivity};

pub async fn list(
    db: &PgPool,
    user_id: Option<Uuid>,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<Activity>> {
    sqlx::query_as::<_, Activity>(
        r#"
        SELECT id, user_id, activity_date, activity_type, distance, distance_units,
               duration, duration_units, speed, speed_units, calories_burned, created_at
          FROM activities
         WHERE ($1::uuid IS NULL OR user_id = $1)
         ORDER BY activity_date DESC, created_at DESC
         LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
    .context("list activities")
}

pub async fn find(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Activity>> {
    sqlx::query_as::<_, Activity>(
        r#"
        SELECT id, user_id, activity_date, activity_type, distance, distance_units,
               duration, duration_units, speed, speed_units, calories_burned, created_at
          FROM activities
         WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
    .context("find activity")
}

/// Stores the activity with the given calorie value, which may differ from the request's.
pub async fn insert(
    db: &PgPool,
    a: &NewActivity,
    calories_burned: Option<i32>,
) -> anyhow::Result<Activity> {
    sqlx::query_as::<_, Activity>(
        r#"
        INSERT INTO activities (
            user_id, activity_date, activity_type, distance, distance_units,
            duration, duration_units, speed, speed_units, calories_burned
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING id, user_id, activity_date, activity_type, distance, distance_units,
                  duration, duration_units, speed, speed_units, calories_burned, created_at
        "#,
    )
    .bind(a.user_id)
    .bind(a.activity_date)
    .bind(a.activity_type.trim())
    .bind(a.distance)
    .bind(&a.distance_units)
    .bind(a.duration)
    .bind(&a.duration_units)
    .bind(a.speed)
    .bind(&a.speed_units)
    .bind(calories_burned)
    .fetch_one(db)
    .await
    .context("insert activity")
}
