use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{ExerciseDefinition, NewExerciseDefinition};
use crate::calories::{MetLookup, SENTINEL_EXERCISE};

#[async_trait]
impl MetLookup for PgPool {
    async fn met_by_name(&self, name: &str) -> anyhow::Result<Option<f64>> {
        sqlx::query_scalar::<_, f64>(
            "SELECT avg_met_value FROM exercise_definitions WHERE lower(exercise_name) = lower($1)",
        )
        .bind(name)
        .fetch_optional(self)
        .await
        .context("MET by exercise name")
    }

    async fn sentinel_met(&self) -> anyhow::Result<Option<f64>> {
        sqlx::query_scalar::<_, f64>(
            "SELECT avg_met_value FROM exercise_definitions WHERE exercise_name = $1",
        )
        .bind(SENTINEL_EXERCISE)
        .fetch_optional(self)
        .await
        .context("sentinel MET")
    }
}

pub async fn list(db: &PgPool, limit: i64, offset: i64) -> anyhow::Result<Vec<ExerciseDefinition>> {
    sqlx::query_as::<_, ExerciseDefinition>(
        r#"
        SELECT id, exercise_name, avg_met_value, created_at
          FROM exercise_definitions
         ORDER BY exercise_name
         LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
    .context("list exercise definitions")
}

pub async fn find(db: &PgPool, id: Uuid) -> anyhow::Result<Option<ExerciseDefinition>> {
    sqlx::query_as::<_, ExerciseDefinition>(
        r#"
        SELECT id, exercise_name, avg_met_value, created_at
          FROM exercise_definitions
         WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
    .context("find exercise definition")
}

/// `None` when a definition with the same name (ignoring case) already exists.
pub async fn insert(
    db: &PgPool,
    def: &NewExerciseDefinition,
) -> anyhow::Result<Option<ExerciseDefinition>> {
    sqlx::query_as::<_, ExerciseDefinition>(
        r#"
        INSERT INTO exercise_definitions (exercise_name, avg_met_value)
        VALUES ($1, $2)
        ON CONFLICT DO NOTHING
        RETURNING id, exercise_name, avg_met_value, created_at
        "#,
    )
    .bind(def.exercise_name.trim())
    .bind(def.avg_met_value)
    .fetch_optional(db)
    .await
    .context("insert exercise definition")
}
