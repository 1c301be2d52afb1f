use super::fallback::canned_response;
use super::intent::is_stock_comparison_request;
use super::prompts::{PromptMode, VOICE_PREFERENCES, system_prompt};
use super::providers::{CompletionRequest, HttpProviderFactory, ProviderFactory};
use crate::config::AppConfig;
use crate::credentials::{CredentialPair, CredentialResolver, Vendor};
use crate::types::ChatMessage;
use std::sync::Arc;
use tracing::{info, warn};

/// Vendors tried for text chat, primary first.
pub const CHAT_VENDOR_ORDER: [Vendor; 2] = [Vendor::Mistral, Vendor::OpenAi];
/// Voice turns need the OpenAI key for transcription anyway.
pub const VOICE_VENDOR_ORDER: [Vendor; 1] = [Vendor::OpenAi];

const CHAT_MAX_TOKENS: u32 = 500;
const CHAT_TEMPERATURE: f32 = 0.7;
const VOICE_TEMPERATURE: f32 = 0.6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplySource {
    Vendor(Vendor),
    Canned,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatReply {
    pub text: String,
    pub source: ReplySource,
    /// Render the stock comparison chart after the reply.
    pub show_chart: bool,
}

#[derive(Clone)]
pub struct Assistant {
    credentials: CredentialResolver,
    providers: Arc<dyn ProviderFactory>,
}

impl Assistant {
    pub fn new(credentials: CredentialResolver, providers: Arc<dyn ProviderFactory>) -> Self {
        Self {
            credentials,
            providers,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::with_credentials(config, CredentialResolver::from_config(config))
    }

    /// HTTP vendors from `config`, keys from `credentials`.
    pub fn with_credentials(config: &AppConfig, credentials: CredentialResolver) -> Self {
        Self::new(credentials, Arc::new(HttpProviderFactory::new(config.clone())))
    }

    pub fn credentials(&self) -> &CredentialResolver {
        &self.credentials
    }

    /// Answer a typed message: Mistral, then OpenAI, then a canned reply.
    pub async fn send_chat(&self, message: &str) -> ChatReply {
        let show_chart = is_stock_comparison_request(message);
        let request = CompletionRequest {
            messages: vec![
                ChatMessage::system(system_prompt(PromptMode::Chat, show_chart)),
                ChatMessage::user(message),
            ],
            max_tokens: CHAT_MAX_TOKENS,
            temperature: CHAT_TEMPERATURE,
        };

        let keys = self.credentials.resolve().await;
        self.dispatch(message, &keys, &CHAT_VENDOR_ORDER, &request, show_chart)
            .await
    }

    /// Answer a transcribed voice message with the spoken-reply persona.
    pub async fn send_voice(&self, message: &str) -> ChatReply {
        let show_chart = is_stock_comparison_request(message);
        let request = CompletionRequest {
            messages: vec![
                ChatMessage::system(system_prompt(PromptMode::Voice, show_chart)),
                ChatMessage::user(message),
            ],
            max_tokens: VOICE_PREFERENCES.max_response_length,
            temperature: VOICE_TEMPERATURE,
        };

        let keys = self.credentials.resolve().await;
        self.dispatch(message, &keys, &VOICE_VENDOR_ORDER, &request, show_chart)
            .await
    }

    async fn dispatch(
        &self,
        message: &str,
        keys: &CredentialPair,
        order: &[Vendor],
        request: &CompletionRequest,
        show_chart: bool,
    ) -> ChatReply {
        for &vendor in order {
            let Some(key) = keys.get(vendor) else {
                continue;
            };

            let provider = self.providers.build(vendor, key);
            match provider.complete(request).await {
                Ok(text) => {
                    info!(%vendor, "chat reply received");
                    return ChatReply {
                        text,
                        source: ReplySource::Vendor(vendor),
                        show_chart,
                    };
                }
                Err(err) => warn!(%vendor, error = %err, "vendor failed, falling back"),
            }
        }

        warn!("no vendor answered, using canned response");
        ChatReply {
            text: canned_response(message).to_string(),
            source: ReplySource::Canned,
            show_chart,
        }
    }
}
