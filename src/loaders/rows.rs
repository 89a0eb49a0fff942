//! CSV row shapes for the bulk loaders.
//!
//! Every row is parsed and validated before anything is written, so a bad
//! line rejects the whole file.

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use time::{macros::format_description, Date};
use uuid::Uuid;

use super::LoadError;
use crate::activities::{handlers as activity_checks, repo_types::NewActivity};
use crate::biometrics::{handlers as biometric_checks, repo_types::NewBiometric};
use crate::exercises::{handlers as exercise_checks, repo_types::NewExerciseDefinition};
use crate::recipes::repo_types::NewRecipe;
use crate::users::services::is_valid_email;

/// How a row names its user: by id, or by the (lowercased) email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRef {
    Id(Uuid),
    Email(String),
}

/// A record that belongs to a user. `record.user_id` is filled in once
/// `user` has been resolved.
#[derive(Debug, Clone)]
pub struct Owned<T> {
    pub line: u64,
    pub user: UserRef,
    pub record: T,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserImport {
    pub name: String,
    pub email: String,
    pub weight_goal: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RecipeImport {
    pub line: u64,
    pub source_user: Option<UserRef>,
    pub recipe: NewRecipe,
}

fn invalid(line: u64, message: impl Into<String>) -> LoadError {
    LoadError::InvalidRow {
        line,
        message: message.into(),
    }
}

fn csv_error(e: csv::Error) -> LoadError {
    let line = e.position().map_or(0, |p| p.line());
    invalid(line, e.to_string())
}

/// Header-keyed rows with their line numbers. Fields are trimmed and empty
/// fields read as `None` for optional columns.
fn read_rows<T: DeserializeOwned>(csv: &str) -> Result<Vec<(u64, T)>, LoadError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(csv.as_bytes());
    let headers = reader.headers().map_err(csv_error)?.clone();

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    while reader.read_record(&mut record).map_err(csv_error)? {
        let line = record.position().map_or(0, |p| p.line());
        let row = record
            .deserialize(Some(&headers))
            .map_err(|e| invalid(line, e.to_string()))?;
        rows.push((line, row));
    }
    Ok(rows)
}

/// `MM/DD/YYYY` as exported by spreadsheets, or ISO `YYYY-MM-DD`.
pub(crate) fn parse_row_date(text: &str) -> Option<Date> {
    let text = text.trim();
    Date::parse(text, format_description!("[month padding:none]/[day padding:none]/[year]"))
        .or_else(|_| Date::parse(text, format_description!("[year]-[month]-[day]")))
        .ok()
}

fn user_ref(id: Option<Uuid>, email: Option<String>) -> Option<UserRef> {
    id.map(UserRef::Id)
        .or_else(|| email.map(|e| UserRef::Email(e.to_lowercase())))
}

#[derive(Debug, Deserialize)]
struct UserRow {
    name: String,
    email: String,
    weight_goal: Option<String>,
    password: Option<String>,
}

pub fn parse_users(csv: &str) -> Result<Vec<UserImport>, LoadError> {
    read_rows::<UserRow>(csv)?
        .into_iter()
        .map(|(line, row)| {
            let email = row.email.to_lowercase();
            if row.name.is_empty() {
                return Err(invalid(line, "name is required"));
            }
            if !is_valid_email(&email) {
                return Err(invalid(line, format!("invalid email {email:?}")));
            }
            Ok(UserImport {
                name: row.name,
                email,
                weight_goal: row.weight_goal,
                password: row.password,
            })
        })
        .collect()
}

pub fn parse_exercise_definitions(csv: &str) -> Result<Vec<NewExerciseDefinition>, LoadError> {
    read_rows::<NewExerciseDefinition>(csv)?
        .into_iter()
        .map(|(line, def)| {
            exercise_checks::validate(&def).map_err(|(_, msg)| invalid(line, msg))?;
            Ok(def)
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct ActivityRow {
    user_id: Option<Uuid>,
    user_email: Option<String>,
    activity_date: String,
    activity_type: String,
    distance: Option<f64>,
    distance_units: Option<String>,
    #[serde(alias = "duration")]
    time: Option<f64>,
    #[serde(alias = "duration_units")]
    time_units: Option<String>,
    speed: Option<f64>,
    speed_units: Option<String>,
    calories_burned: Option<i32>,
}

pub fn parse_activities(csv: &str) -> Result<Vec<Owned<NewActivity>>, LoadError> {
    read_rows::<ActivityRow>(csv)?
        .into_iter()
        .map(|(line, row)| {
            let user = user_ref(row.user_id, row.user_email)
                .ok_or_else(|| invalid(line, "user_id or user_email is required"))?;
            let activity_date = parse_row_date(&row.activity_date).ok_or_else(|| {
                invalid(line, format!("unrecognised activity_date {:?}", row.activity_date))
            })?;
            let record = NewActivity {
                user_id: Uuid::nil(),
                activity_date,
                activity_type: row.activity_type,
                distance: row.distance,
                distance_units: row.distance_units,
                duration: row.time,
                duration_units: row.time_units,
                speed: row.speed,
                speed_units: row.speed_units,
                calories_burned: row.calories_burned,
            };
            activity_checks::validate(&record).map_err(|(_, msg)| invalid(line, msg))?;
            Ok(Owned { line, user, record })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct BiometricRow {
    user_id: Option<Uuid>,
    user_email: Option<String>,
    date: String,
    weight: Option<f64>,
    weight_units: Option<String>,
    avg_hr: Option<i32>,
    high_hr: Option<i32>,
    low_hr: Option<i32>,
    notes: Option<String>,
}

pub fn parse_biometrics(csv: &str) -> Result<Vec<Owned<NewBiometric>>, LoadError> {
    read_rows::<BiometricRow>(csv)?
        .into_iter()
        .map(|(line, row)| {
            let user = user_ref(row.user_id, row.user_email)
                .ok_or_else(|| invalid(line, "user_id or user_email is required"))?;
            let date = parse_row_date(&row.date)
                .ok_or_else(|| invalid(line, format!("unrecognised date {:?}", row.date)))?;
            let record = NewBiometric {
                user_id: Uuid::nil(),
                date,
                weight: row.weight,
                weight_units: row.weight_units,
                avg_hr: row.avg_hr,
                high_hr: row.high_hr,
                low_hr: row.low_hr,
                notes: row.notes,
            };
            biometric_checks::validate(&record).map_err(|(_, msg)| invalid(line, msg))?;
            Ok(Owned { line, user, record })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct RecipeRow {
    recipe_name: String,
    recipe_type: Option<String>,
    recipe_source: Option<String>,
    source_user_id: Option<Uuid>,
    source_user_email: Option<String>,
    recipe_url: Option<String>,
    ingredients: Option<String>,
    instructions: Option<String>,
    directions: Option<String>,
    calories: Option<i32>,
    fat: Option<f64>,
    carbs: Option<f64>,
    protein: Option<f64>,
    extra_categories: Option<String>,
}

pub fn parse_recipes(csv: &str) -> Result<Vec<RecipeImport>, LoadError> {
    read_rows::<RecipeRow>(csv)?
        .into_iter()
        .map(|(line, row)| {
            if row.recipe_name.is_empty() {
                return Err(invalid(line, "recipe_name is required"));
            }
            if row.calories.is_some_and(|c| c < 0) {
                return Err(invalid(line, "calories must be non-negative"));
            }
            Ok(RecipeImport {
                line,
                source_user: user_ref(row.source_user_id, row.source_user_email),
                recipe: NewRecipe {
                    recipe_name: row.recipe_name,
                    recipe_type: row.recipe_type,
                    recipe_source: row.recipe_source,
                    source_user_id: None,
                    recipe_url: row.recipe_url,
                    ingredients: row.ingredients,
                    instructions: row.instructions,
                    directions: row.directions,
                    calories: row.calories,
                    fat: row.fat,
                    carbs: row.carbs,
                    protein: row.protein,
                    extra_categories: row.extra_categories,
                },
            })
        })
        .collect()
}
