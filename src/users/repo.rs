use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

pub use super::repo_types::User;

/// Existence check used before writing rows that reference a user.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn user_exists(&self, id: Uuid) -> anyhow::Result<bool>;
}

#[async_trait]
impl UserDirectory for PgPool {
    async fn user_exists(&self, id: Uuid) -> anyhow::Result<bool> {
        User::exists(self, id).await
    }
}

impl User {
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, weight_goal, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, weight_goal, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn exists(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let found: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(db)
            .await
            .context("check user exists")?;
        Ok(found)
    }

    pub async fn list(db: &PgPool, limit: i64, offset: i64) -> anyhow::Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, weight_goal, password_hash, created_at
            FROM users
            ORDER BY created_at, email
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(users)
    }

    /// Create a new user; `password_hash` is stored as given.
    pub async fn create(
        db: &PgPool,
        name: &str,
        email: &str,
        weight_goal: Option<&str>,
        password_hash: Option<&str>,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, weight_goal, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, weight_goal, password_hash, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(weight_goal)
        .bind(password_hash)
        .fetch_one(db)
        .await?;
        Ok(user)
    }
}
