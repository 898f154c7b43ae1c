//! Client for any endpoint that speaks the `/chat/completions` protocol.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use super::{ChatMessage, RetryConfig, TextGenerationRequest, TextGenerator};
use crate::config::LlmConfig;
use crate::errors::{CoachError, CoachResult};

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

#[derive(Clone)]
pub struct OpenAiCompatibleClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    retry: RetryConfig,
}

impl OpenAiCompatibleClient {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> CoachResult<Self> {
        Self::with_timeout(base_url, model, api_key, Duration::from_secs(30))
    }

    fn with_timeout(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> CoachResult<Self> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            CoachError::ExternalService(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key,
            model: model.into(),
            retry: RetryConfig::default(),
        })
    }

    pub fn from_config(config: &LlmConfig) -> CoachResult<Self> {
        info!(
            "Initializing text generator: base_url={}, model={}",
            config.base_url, config.model
        );

        let client = Self::with_timeout(
            config.base_url.clone(),
            config.model.clone(),
            config.api_key.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;

        Ok(client.with_retry(RetryConfig {
            max_attempts: config.max_retries.max(1),
            ..Default::default()
        }))
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    async fn send_once(&self, request: &TextGenerationRequest) -> CoachResult<String> {
        let body = CompletionRequest {
            model: &self.model,
            messages: &request.messages,
        };

        let mut http_request = self.http.post(self.completions_url()).json(&body);
        if let Some(api_key) = &self.api_key {
            http_request = http_request.bearer_auth(api_key);
        }

        let response = http_request.send().await.map_err(|e| {
            error!("Failed to reach text generator: {}", e);
            CoachError::ExternalService(format!("Failed to connect: {}", e))
        })?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(CoachError::Upstream {
                status: status.as_u16(),
                message: text,
            });
        }

        let parsed: CompletionResponse = serde_json::from_str(&text)
            .map_err(|e| CoachError::ExternalService(format!("Failed to parse response: {}", e)))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                CoachError::ExternalService("Response contained no choices".to_string())
            })?;

        debug!("Received {} chars from text generator", content.len());
        Ok(content)
    }
}

#[async_trait]
impl TextGenerator for OpenAiCompatibleClient {
    async fn generate(&self, request: &TextGenerationRequest) -> CoachResult<String> {
        self.retry.execute(|| self.send_once(request)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> OpenAiCompatibleClient {
        OpenAiCompatibleClient::new(server.uri(), "coach-model", Some("secret".into()))
            .unwrap()
            .with_retry(RetryConfig {
                max_attempts: 2,
                initial_delay_ms: 1,
                max_delay_ms: 1,
                backoff_factor: 1.0,
            })
    }

    #[tokio::test]
    async fn test_generate_returns_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer secret"))
            .and(body_partial_json(json!({
                "model": "coach-model",
                "messages": [
                    {"role": "system", "content": "You are a coach"},
                    {"role": "user", "content": "How am I doing?"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "Keep going!"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = TextGenerationRequest::new("You are a coach", "How am I doing?");
        let reply = client(&server).generate(&request).await.unwrap();
        assert_eq!(reply, "Keep going!");
    }

    #[tokio::test]
    async fn test_server_errors_are_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
            .expect(2)
            .mount(&server)
            .await;

        let request = TextGenerationRequest::new("system", "user");
        let result = client(&server).generate(&request).await;
        assert_matches!(result, Err(CoachError::Upstream { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_unauthorized_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
            .expect(1)
            .mount(&server)
            .await;

        let request = TextGenerationRequest::new("system", "user");
        let result = client(&server).generate(&request).await;
        assert_matches!(
            result,
            Err(CoachError::Upstream { status: 401, message }) if message == "invalid key"
        );
    }

    #[tokio::test]
    async fn test_empty_choices_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let request = TextGenerationRequest::new("system", "user");
        let result = client(&server).generate(&request).await;
        assert_matches!(result, Err(CoachError::ExternalService(_)));
    }
}
