//! Chat-completion providers used by recipe generation.

pub mod openai;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use openai::OpenAiProvider;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("LLM request failed: {0}")]
    RequestFailed(String),

    #[error("LLM API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("failed to parse LLM response: {0}")]
    ParseError(String),

    #[error("LLM not configured: {0}")]
    NotConfigured(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A single chat completion request. `model` falls back to the provider
/// default; token limit and temperature come from provider configuration.
#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub model: Option<String>,
    pub messages: Vec<ChatMessage>,
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Returns the trimmed text of the first choice.
    async fn complete(&self, request: ChatRequest) -> Result<String, LlmError>;

    fn provider_name(&self) -> &'static str;
}
