use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use super::normalize::{normalize_recipe, NormalizedRecipe, RawRecipePayload};
use super::repo::RecipeStore;
use super::repo_types::{NewRecipe, Recipe};
use crate::llm::{ChatMessage, ChatRequest, LlmError, LlmProvider};

pub const GENERATED_SOURCE: &str = "GPT Generated";

const SYSTEM_PROMPT: &str = "You generate recipes as JSON. Given the user's directions, reply \
with a single JSON object with the fields: recipe_name, recipe_type (one of Omnivore, Vegan, \
Keto, Paleo, Vegetarian), ingredients (list), instructions (ordered list of steps), calories \
(per serving), fat (grams per serving), carbs (grams per serving), protein (grams per serving) \
and extra_categories (list of useful tags). Reply with the JSON object only. If no recipe can \
be produced, reply with an empty JSON object.";

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("generator did not return a valid recipe")]
    InvalidRecipe,

    #[error("failed to save recipe: {0}")]
    Persist(anyhow::Error),
}

pub fn build_request(user_directions: &str, model: Option<&str>) -> ChatRequest {
    ChatRequest {
        model: model.map(str::to_string),
        messages: vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(user_directions),
        ],
    }
}

/// Parses the model reply, tolerating a surrounding ```json fence.
pub fn parse_reply(reply: &str) -> Result<RawRecipePayload, LlmError> {
    let mut body = reply.trim();
    if let Some(rest) = body.strip_prefix("```json") {
        body = rest;
    } else if let Some(rest) = body.strip_prefix("```") {
        body = rest;
    }
    if let Some(rest) = body.strip_suffix("```") {
        body = rest;
    }
    let value: serde_json::Value =
        serde_json::from_str(body.trim()).map_err(|e| LlmError::ParseError(e.to_string()))?;
    if !value.is_object() {
        return Err(LlmError::ParseError("reply is not a JSON object".into()));
    }
    serde_json::from_value(value).map_err(|e| LlmError::ParseError(e.to_string()))
}

/// Rejects empty payloads and payloads without a name, before any cleanup.
pub fn validate_payload(raw: &RawRecipePayload) -> Result<(), GenerationError> {
    if raw.is_empty() || !raw.has_name() {
        return Err(GenerationError::InvalidRecipe);
    }
    Ok(())
}

pub fn to_new_recipe(recipe: NormalizedRecipe, user_id: Uuid) -> NewRecipe {
    NewRecipe {
        recipe_name: recipe.recipe_name,
        recipe_type: Some(recipe.recipe_type),
        recipe_source: Some(GENERATED_SOURCE.into()),
        source_user_id: Some(user_id),
        recipe_url: None,
        ingredients: Some(recipe.ingredients),
        instructions: Some(recipe.instructions),
        directions: None,
        calories: Some(recipe.calories),
        fat: Some(recipe.fat),
        carbs: Some(recipe.carbs),
        protein: Some(recipe.protein),
        extra_categories: Some(recipe.extra_categories),
    }
}

/// Generate, validate, normalize, persist. Nothing is stored unless every
/// earlier step succeeded.
pub async fn generate_and_save(
    llm: &dyn LlmProvider,
    store: &dyn RecipeStore,
    user_id: Uuid,
    user_directions: &str,
    model: Option<&str>,
) -> Result<Recipe, GenerationError> {
    let reply = llm.complete(build_request(user_directions, model)).await?;
    let raw = parse_reply(&reply)?;
    if let Err(e) = validate_payload(&raw) {
        warn!(%user_id, provider = llm.provider_name(), "generated payload rejected");
        return Err(e);
    }

    let normalized = normalize_recipe(&raw);
    let saved = store
        .insert_recipe(&to_new_recipe(normalized, user_id))
        .await
        .map_err(GenerationError::Persist)?;
    info!(%user_id, recipe_id = %saved.id, "generated recipe saved");
    Ok(saved)
}
