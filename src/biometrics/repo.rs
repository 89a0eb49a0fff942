use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use super::repo_types::{Biometric, NewBiometric, WeightRow};
use crate::calories::{WeightLookup, WeightSample};

#[async_trait]
impl WeightLookup for PgPool {
    async fn latest_weight(
        &self,
        user_id: Uuid,
        as_of: Date,
    ) -> anyhow::Result<Option<WeightSample>> {
        let row = sqlx::query_as::<_, WeightRow>(
            r#"
            SELECT weight, weight_units, date, notes
              FROM biometrics
             WHERE user_id = $1 AND date <= $2 AND weight IS NOT NULL
             ORDER BY date DESC
             LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(as_of)
        .fetch_optional(self)
        .await
        .context("latest weight on or before date")?;

        Ok(row.map(|r| WeightSample {
            weight: r.weight,
            weight_units: r.weight_units,
            date: r.date,
        }))
    }
}

/// Most recent weight regardless of date, with the entry's notes.
pub async fn latest_weight_with_notes(
    db: &PgPool,
    user_id: Uuid,
) -> anyhow::Result<Option<(WeightSample, Option<String>)>> {
    let row = sqlx::query_as::<_, WeightRow>(
        r#"
        SELECT weight, weight_units, date, notes
          FROM biometrics
         WHERE user_id = $1 AND weight IS NOT NULL AND weight > 0
         ORDER BY date DESC
         LIMIT 1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
    .context("latest weight")?;

    Ok(row.map(|r| {
        (
            WeightSample {
                weight: r.weight,
                weight_units: r.weight_units,
                date: r.date,
            },
            r.notes,
        )
    }))
}

pub async fn list(
    db: &PgPool,
    user_id: Option<Uuid>,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<Biometric>> {
    sqlx::query_as::<_, Biometric>(
        r#"
        SELECT id, user_id, date, weight, weight_units, avg_hr, high_hr, low_hr, notes, created_at
          FROM biometrics
         WHERE ($1::uuid IS NULL OR user_id = $1)
         ORDER BY date DESC
         LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
    .context("list biometrics")
}

pub async fn find(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Biometric>> {
    sqlx::query_as::<_, Biometric>(
        r#"
        SELECT id, user_id, date, weight, weight_units, avg_hr, high_hr, low_hr, notes, created_at
          FROM biometrics
         WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
    .context("find biometric")
}

/// Insert, or overwrite the entry already recorded for that user and day.
pub async fn upsert(db: &PgPool, b: &NewBiometric) -> anyhow::Result<Biometric> {
    sqlx::query_as::<_, Biometric>(
        r#"
        INSERT INTO biometrics (user_id, date, weight, weight_units, avg_hr, high_hr, low_hr, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (user_id, date) DO UPDATE
           SET weight = EXCLUDED.weight,
               weight_units = EXCLUDED.weight_units,
               avg_hr = EXCLUDED.avg_hr,
               high_hr = EXCLUDED.high_hr,
               low_hr = EXCLUDED.low_hr,
               notes = EXCLUDED.notes
        RETURNING id, user_id, date, weight, weight_units, avg_hr, high_hr, low_hr, notes, created_at
        "#,
    )
    .bind(b.user_id)
    .bind(b.date)
    .bind(b.weight)
    .bind(&b.weight_units)
    .bind(b.avg_hr)
    .bind(b.high_hr)
    .bind(b.low_hr)
    .bind(&b.notes)
    .fetch_one(db)
    .await
    .context("upsert biometric")
}
