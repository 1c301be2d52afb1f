use super::VoiceError;
use super::recorder::AudioClip;
use crate::config::EndpointConfig;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{error, info};

#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, api_key: &str, clip: AudioClip) -> Result<String, VoiceError>;
}

/// Speech-to-text over the Whisper transcription endpoint.
pub struct WhisperClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    language: Option<String>,
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

impl WhisperClient {
    pub fn new(endpoint: &EndpointConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.url.clone(),
            model: endpoint.model.clone(),
            language: Some("en".to_string()),
        }
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    fn form(&self, clip: AudioClip) -> Result<Form, VoiceError> {
        let container = clip.container();
        let file = Part::bytes(clip.into_bytes())
            .file_name(container.file_name())
            .mime_str(container.mime_type)?;

        let mut form = Form::new()
            .part("file", file)
            .text("model", self.model.clone())
            .text("response_format", "json");
        if let Some(language) = &self.language {
            form = form.text("language", language.clone());
        }
        Ok(form)
    }
}

pub fn parse_transcription(body: &str) -> Result<String, VoiceError> {
    serde_json::from_str::<TranscriptionResponse>(body)
        .map(|parsed| parsed.text)
        .map_err(|e| VoiceError::Transcription(format!("malformed response: {e}")))
}

#[async_trait]
impl Transcriber for WhisperClient {
    async fn transcribe(&self, api_key: &str, clip: AudioClip) -> Result<String, VoiceError> {
        info!(
            bytes = clip.len(),
            mime = clip.container().mime_type,
            "sending audio for transcription"
        );
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .multipart(self.form(clip)?)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            error!(%status, "transcription rejected");
            return Err(VoiceError::Transcription(format!("{status}: {body}")));
        }

        parse_transcription(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_text_field() {
        assert_eq!(
            parse_transcription(r#"{"text":"How is my balance?"}"#).unwrap(),
            "How is my balance?"
        );
    }

    #[test]
    fn missing_text_is_a_transcription_error() {
        assert!(matches!(
            parse_transcription(r#"{"error":"bad"}"#),
            Err(VoiceError::Transcription(_))
        ));
    }
}
