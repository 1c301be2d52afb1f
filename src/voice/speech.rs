use super::VoiceError;
use crate::ai::prompts::VoicePreferences;
use crate::config::EndpointConfig;
use async_trait::async_trait;
use serde::Serialize;
use tracing::{error, info};

#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Returns the encoded audio (MP3) for `text`.
    async fn synthesize(&self, api_key: &str, text: &str) -> Result<Vec<u8>, VoiceError>;
}

/// Text-to-speech over the OpenAI speech endpoint.
pub struct SpeechClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    preferences: VoicePreferences,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct SpeechRequest<'a> {
    pub model: &'a str,
    pub voice: &'a str,
    pub input: &'a str,
    pub speed: f32,
}

impl SpeechClient {
    pub fn new(endpoint: &EndpointConfig, preferences: VoicePreferences) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.url.clone(),
            model: endpoint.model.clone(),
            preferences,
        }
    }

    pub fn request<'a>(&'a self, text: &'a str) -> SpeechRequest<'a> {
        SpeechRequest {
            model: &self.model,
            voice: self.preferences.voice(),
            input: text,
            speed: self.preferences.speed(),
        }
    }
}

#[async_trait]
impl Synthesizer for SpeechClient {
    async fn synthesize(&self, api_key: &str, text: &str) -> Result<Vec<u8>, VoiceError> {
        let request = self.request(text);
        info!(voice = request.voice, speed = request.speed, "requesting speech synthesis");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, "speech synthesis rejected");
            return Err(VoiceError::Synthesis(format!("{status}: {body}")));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::prompts::{SpeechRate, VOICE_PREFERENCES, VoiceType};

    fn endpoint() -> EndpointConfig {
        EndpointConfig {
            url: "http://localhost/v1/audio/speech".into(),
            model: "tts-1".into(),
        }
    }

    #[test]
    fn request_uses_preference_mapping() {
        let client = SpeechClient::new(&endpoint(), VOICE_PREFERENCES);
        let request = client.request("Your balance is fine.");
        assert_eq!(
            request,
            SpeechRequest {
                model: "tts-1",
                voice: "alloy",
                input: "Your balance is fine.",
                speed: 1.0,
            }
        );
    }

    #[test]
    fn slow_professional_voice() {
        let prefs = VoicePreferences {
            voice_type: VoiceType::Professional,
            speech_rate: SpeechRate::Slow,
            max_response_length: 200,
        };
        let client = SpeechClient::new(&endpoint(), prefs);
        let json = serde_json::to_value(client.request("hi")).unwrap();
        assert_eq!(json["voice"], "onyx");
        assert!((json["speed"].as_f64().unwrap() - 0.8).abs() < 1e-6);
    }
}
