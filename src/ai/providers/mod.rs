pub mod completions;

use crate::config::AppConfig;
use crate::credentials::Vendor;
use crate::types::ChatMessage;
use async_trait::async_trait;

pub use completions::{ChatCompletionsClient, parse_completion};

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{vendor} API error {status}: {body}")]
    Status {
        vendor: Vendor,
        status: u16,
        body: String,
    },

    #[error("malformed completion response: {0}")]
    Malformed(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// A chat-completion vendor reachable with one API key.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    fn vendor(&self) -> Vendor;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError>;
}

/// Builds a provider once a key for the vendor has been resolved.
pub trait ProviderFactory: Send + Sync {
    fn build(&self, vendor: Vendor, api_key: &str) -> Box<dyn ChatProvider>;
}

pub struct HttpProviderFactory {
    client: reqwest::Client,
    config: AppConfig,
}

impl HttpProviderFactory {
    pub fn new(config: AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

impl ProviderFactory for HttpProviderFactory {
    fn build(&self, vendor: Vendor, api_key: &str) -> Box<dyn ChatProvider> {
        let endpoint = match vendor {
            Vendor::Mistral => &self.config.mistral_chat,
            Vendor::OpenAi => &self.config.openai_chat,
        };
        Box::new(ChatCompletionsClient::new(
            self.client.clone(),
            vendor,
            endpoint.url.clone(),
            endpoint.model.clone(),
            api_key.to_string(),
        ))
    }
}
