use std::collections::HashMap;
use std::path::Path;

use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use super::dto::LoadCounts;
use super::rows::{self, Owned, UserRef};
use super::{Dataset, LoadError};
use crate::users::repo::User;
use crate::users::services::stored_password;
use crate::{activities, biometrics, exercises, recipes};

pub async fn read_dataset(dir: &Path, dataset: Dataset) -> Result<String, LoadError> {
    let path = dir.join(dataset.file_name());
    match tokio::fs::read_to_string(&path).await {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(LoadError::NotFound(path)),
        Err(e) => Err(anyhow::Error::new(e)
            .context(format!("read {}", path.display()))
            .into()),
    }
}

/// Parses the whole file, then writes it row by row.
pub async fn load(db: &PgPool, dataset: Dataset, csv: &str) -> Result<LoadCounts, LoadError> {
    match dataset {
        Dataset::Users => load_users(db, rows::parse_users(csv)?).await,
        Dataset::ExerciseDefinitions => {
            load_exercise_definitions(db, rows::parse_exercise_definitions(csv)?).await
        }
        Dataset::Activities => load_activities(db, rows::parse_activities(csv)?).await,
        Dataset::Biometrics => load_biometrics(db, rows::parse_biometrics(csv)?).await,
        Dataset::Recipes => load_recipes(db, rows::parse_recipes(csv)?).await,
    }
}

/// Resolves row user references, remembering email lookups for the file.
struct UserResolver<'a> {
    db: &'a PgPool,
    by_email: HashMap<String, Option<Uuid>>,
}

impl<'a> UserResolver<'a> {
    fn new(db: &'a PgPool) -> Self {
        Self {
            db,
            by_email: HashMap::new(),
        }
    }

    async fn resolve(&mut self, user: &UserRef) -> anyhow::Result<Option<Uuid>> {
        match user {
            UserRef::Id(id) => Ok(User::exists(self.db, *id).await?.then_some(*id)),
            UserRef::Email(email) => {
                if let Some(hit) = self.by_email.get(email) {
                    return Ok(*hit);
                }
                let id = User::find_by_email(self.db, email).await?.map(|u| u.id);
                self.by_email.insert(email.clone(), id);
                Ok(id)
            }
        }
    }
}

async fn load_users(db: &PgPool, rows: Vec<rows::UserImport>) -> Result<LoadCounts, LoadError> {
    let mut counts = LoadCounts::default();
    for row in rows {
        if User::find_by_email(db, &row.email).await?.is_some() {
            debug!(email = %row.email, "user already present");
            counts.skipped += 1;
            continue;
        }
        let hash = stored_password(row.password.as_deref())?;
        User::create(db, &row.name, &row.email, row.weight_goal.as_deref(), hash.as_deref()).await?;
        counts.loaded += 1;
    }
    Ok(counts)
}

async fn load_exercise_definitions(
    db: &PgPool,
    rows: Vec<exercises::repo_types::NewExerciseDefinition>,
) -> Result<LoadCounts, LoadError> {
    let mut counts = LoadCounts::default();
    for def in rows {
        match exercises::repo::insert(db, &def).await? {
            Some(_) => counts.loaded += 1,
            None => {
                debug!(exercise = %def.exercise_name, "exercise definition already present");
                counts.skipped += 1;
            }
        }
    }
    Ok(counts)
}

async fn load_activities(
    db: &PgPool,
    rows: Vec<Owned<activities::repo_types::NewActivity>>,
) -> Result<LoadCounts, LoadError> {
    let mut users = UserResolver::new(db);
    let mut counts = LoadCounts::default();
    for Owned { line, user, mut record } in rows {
        let Some(user_id) = users.resolve(&user).await? else {
            warn!(line, ?user, "activity row skipped: unknown user");
            counts.skipped += 1;
            continue;
        };
        record.user_id = user_id;
        activities::repo::insert(db, &record, record.calories_burned).await?;
        counts.loaded += 1;
    }
    Ok(counts)
}

async fn load_biometrics(
    db: &PgPool,
    rows: Vec<Owned<biometrics::repo_types::NewBiometric>>,
) -> Result<LoadCounts, LoadError> {
    let mut users = UserResolver::new(db);
    let mut counts = LoadCounts::default();
    for Owned { line, user, mut record } in rows {
        let Some(user_id) = users.resolve(&user).await? else {
            warn!(line, ?user, "biometric row skipped: unknown user");
            counts.skipped += 1;
            continue;
        };
        record.user_id = user_id;
        biometrics::repo::upsert(db, &record).await?;
        counts.loaded += 1;
    }
    Ok(counts)
}

async fn load_recipes(db: &PgPool, rows: Vec<rows::RecipeImport>) -> Result<LoadCounts, LoadError> {
    let mut users = UserResolver::new(db);
    let mut counts = LoadCounts::default();
    for rows::RecipeImport {
        line,
        source_user,
        mut recipe,
    } in rows
    {
        if let Some(user) = source_user {
            recipe.source_user_id = users.resolve(&user).await?;
            if recipe.source_user_id.is_none() {
                warn!(line, ?user, "recipe source user not found; stored without one");
            }
        }
        recipes::repo::insert(db, &recipe).await?;
        counts.loaded += 1;
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_is_reported_with_its_path() {
        let dir = std::env::temp_dir().join(format!("fittrack-{}", Uuid::new_v4()));
        let err = read_dataset(&dir, Dataset::Recipes).await.unwrap_err();
        match err {
            LoadError::NotFound(path) => assert!(path.ends_with("recipeData.csv")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn dataset_file_is_read_from_the_data_dir() {
        let dir = std::env::temp_dir().join(format!("fittrack-{}", Uuid::new_v4()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        tokio::fs::write(dir.join("exerciseDefinitions.csv"), "exercise_name,avg_met_value\nRowing,7\n")
            .await
            .unwrap();

        let text = read_dataset(&dir, Dataset::ExerciseDefinitions).await.unwrap();
        assert_eq!(rows::parse_exercise_definitions(&text).unwrap().len(), 1);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
