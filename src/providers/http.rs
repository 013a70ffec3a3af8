//! OpenAI-style chat-completions provider

use async_trait::async_trait;
use tracing::debug;

use crate::error::{PipelineResult, ProviderFailure, TransformError};
use crate::traits::{GenerationProvider, GenerationRequest};
use crate::types::ProviderResponse;

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Generation provider backed by an OpenAI-compatible chat-completions API
pub struct HttpProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl HttpProvider {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Build against the default endpoint with the key from `OPENAI_API_KEY`
    /// (a `.env` file is honored when present)
    pub fn from_env() -> PipelineResult<Self> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| TransformError::Config {
            message: "OPENAI_API_KEY is not set".to_string(),
        })?;
        Ok(Self::new(DEFAULT_ENDPOINT, api_key, DEFAULT_MODEL))
    }
}

#[async_trait]
impl GenerationProvider for HttpProvider {
    async fn generate(&self, request: GenerationRequest) -> Result<ProviderResponse, ProviderFailure> {
        let mut body = serde_json::json!({
            "model": self.model,
            "messages": [
                {
                    "role": "user",
                    "content": request.prompt
                }
            ],
            "max_tokens": request.hyper_parameters.max_tokens,
            "temperature": request.hyper_parameters.temperature,
        });
        if let Some(top_p) = request.hyper_parameters.top_p {
            body["top_p"] = serde_json::json!(top_p);
        }
        if let Some(penalty) = request.hyper_parameters.presence_penalty {
            body["presence_penalty"] = serde_json::json!(penalty);
        }

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderFailure::Timeout
                } else {
                    ProviderFailure::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return match status.as_u16() {
                401 => Err(ProviderFailure::AuthenticationFailed),
                429 => Err(ProviderFailure::RateLimited),
                503 => Err(ProviderFailure::Unavailable),
                400 => Err(ProviderFailure::InvalidRequest(
                    "request rejected by backend".to_string(),
                )),
                code => Err(ProviderFailure::Upstream(code)),
            };
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderFailure::Network(format!("failed to parse response: {e}")))?;

        let choice = payload
            .get("choices")
            .and_then(|choices| choices.get(0))
            .ok_or(ProviderFailure::EmptyResponse)?;
        let content = choice
            .get("message")
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .ok_or(ProviderFailure::EmptyResponse)?;

        let tokens_used = payload
            .get("usage")
            .and_then(|usage| usage.get("total_tokens"))
            .and_then(|tokens| tokens.as_u64())
            .unwrap_or(0) as u32;

        // The wire carries no confidence value; derive a coarse one from how
        // the generation ended.
        let confidence = match choice.get("finish_reason").and_then(|r| r.as_str()) {
            Some("stop") => 0.9,
            Some("length") => 0.6,
            _ => 0.5,
        };

        let model_version = payload
            .get("model")
            .and_then(|model| model.as_str())
            .unwrap_or(&self.model)
            .to_string();

        debug!(
            request_id = %request.request_id,
            tokens_used,
            model = %model_version,
            "chat completion received"
        );

        Ok(ProviderResponse {
            content: content.to_string(),
            tokens_used,
            confidence,
            model_version,
        })
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
