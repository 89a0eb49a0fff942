//! OpenAI-compatible chat completions provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{ChatMessage, ChatRequest, LlmError, LlmProvider};
use crate::config::OpenAiConfig;

#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    api_key: Option<String>,
    base_url: String,
    default_model: String,
    max_tokens: u32,
    temperature: f32,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(config: &OpenAiConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            default_model: config.default_model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn complete(&self, request: ChatRequest) -> Result<String, LlmError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(LlmError::NotConfigured("OPENAI_API_KEY is not set"))?;

        let model = request.model.as_deref().unwrap_or(&self.default_model);
        let body = CompletionRequest {
            model,
            messages: &request.messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        debug!(model, messages = request.messages.len(), "chat completion request");
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        if status != 200 {
            warn!(status, "chat completion returned an error status");
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(LlmError::ApiError { status, message });
        }

        let parsed: CompletionResponse =
            serde_json::from_str(&text).map_err(|e| LlmError::ParseError(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .ok_or_else(|| LlmError::ParseError("no content in first choice".into()))
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(base_url: &str, api_key: Option<&str>) -> OpenAiProvider {
        OpenAiProvider::new(&OpenAiConfig {
            api_key: api_key.map(str::to_string),
            base_url: base_url.to_string(),
            ..OpenAiConfig::default()
        })
    }

    fn request() -> ChatRequest {
        ChatRequest {
            messages: vec![ChatMessage::user("something with lentils")],
            ..ChatRequest::default()
        }
    }

    #[tokio::test]
    async fn complete_returns_trimmed_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "  {\"recipe_name\": \"Dal\"}\n"}}]
            })))
            .mount(&server)
            .await;

        let text = provider(&server.uri(), Some("sk-test"))
            .complete(request())
            .await
            .expect("completion");
        assert_eq!(text, "{\"recipe_name\": \"Dal\"}");
    }

    #[tokio::test]
    async fn complete_sends_default_model_and_limits() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"content": "ok"}}]
            })))
            .mount(&server)
            .await;

        provider(&server.uri(), Some("k"))
            .complete(request())
            .await
            .expect("completion");

        let received = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["max_tokens"], 1000);
        assert_eq!(body["messages"][0]["role"], "user");
    }

    #[tokio::test]
    async fn complete_maps_api_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {"message": "Incorrect API key provided"}
            })))
            .mount(&server)
            .await;

        let err = provider(&server.uri(), Some("bad"))
            .complete(request())
            .await
            .unwrap_err();
        match err {
            LlmError::ApiError { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn complete_without_key_fails_before_request() {
        let server = MockServer::start().await;
        let err = provider(&server.uri(), None)
            .complete(request())
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::NotConfigured(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn complete_rejects_empty_choices() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let err = provider(&server.uri(), Some("k"))
            .complete(request())
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::ParseError(_)));
    }
}
