use super::{ChatProvider, CompletionRequest, ProviderError};
use crate::credentials::Vendor;
use crate::types::ChatMessage;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Client for an OpenAI-shaped `/chat/completions` endpoint.
///
/// Mistral and OpenAI share the request and response shape, so one client
/// serves both vendors.
pub struct ChatCompletionsClient {
    client: reqwest::Client,
    vendor: Vendor,
    endpoint: String,
    model: String,
    api_key: String,
}

#[derive(Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: String,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: Option<CompletionMessage>,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

impl ChatCompletionsClient {
    pub fn new(
        client: reqwest::Client,
        vendor: Vendor,
        endpoint: String,
        model: String,
        api_key: String,
    ) -> Self {
        Self {
            client,
            vendor,
            endpoint,
            model,
            api_key,
        }
    }
}

/// Extract the first choice's message content.
pub fn parse_completion(body: &str) -> Result<String, ProviderError> {
    let parsed: CompletionResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Malformed(e.to_string()))?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .map(|message| message.content)
        .ok_or_else(|| ProviderError::Malformed("response has no choices".into()))
}

#[async_trait]
impl ChatProvider for ChatCompletionsClient {
    fn vendor(&self) -> Vendor {
        self.vendor
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        debug!(vendor = %self.vendor, model = %self.model, "sending chat completion");
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&CompletionBody {
                model: &self.model,
                messages: &request.messages,
                max_tokens: request.max_tokens,
                temperature: request.temperature,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(vendor = %self.vendor, %status, "chat completion rejected");
            return Err(ProviderError::Status {
                vendor: self.vendor,
                status: status.as_u16(),
                body,
            });
        }

        parse_completion(&body)
    }
}
