//! Voice turns: microphone capture, transcription and spoken replies.

pub mod platform;
pub mod playback;
pub mod recorder;
pub mod speech;
pub mod transcribe;

pub use platform::{AudioContainer, CaptureConstraints, DeviceClass, PlatformCapabilities};
pub use playback::PlaybackState;
pub use recorder::{AudioClip, MIN_RECORDING_BYTES, RecordingSession};
pub use speech::{SpeechClient, Synthesizer};
pub use transcribe::{Transcriber, WhisperClient};

use crate::ai::prompts::VOICE_PREFERENCES;
use crate::config::AppConfig;
use crate::credentials::{CredentialResolver, Vendor};
use crate::types::Toast;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum VoiceError {
    #[error("microphone access denied: {0}")]
    MicrophoneDenied(String),

    #[error("audio recording not supported: {0}")]
    RecorderUnsupported(String),

    #[error("no audio data collected")]
    NoAudioCaptured,

    #[error("recording too short ({bytes} bytes)")]
    RecordingTooShort { bytes: usize },

    #[error("OpenAI API key is not set")]
    MissingCredential,

    #[error("transcription was empty")]
    EmptyTranscript,

    #[error("transcription failed: {0}")]
    Transcription(String),

    #[error("speech synthesis failed: {0}")]
    Synthesis(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl VoiceError {
    /// The notification shown when a voice turn is abandoned.
    pub fn toast(&self) -> Toast {
        match self {
            VoiceError::MicrophoneDenied(_) => Toast::new(
                "Microphone Access Denied",
                "Please allow microphone access in your browser settings and try again.",
            ),
            VoiceError::RecorderUnsupported(_) => Toast::new(
                "Recording Not Supported",
                "Your device doesn't support the required audio recording features.",
            ),
            VoiceError::NoAudioCaptured => Toast::new(
                "Recording Failed",
                "No audio was captured. Please check your microphone permissions and try again.",
            ),
            VoiceError::RecordingTooShort { .. } => Toast::new(
                "Recording Failed",
                "The recording was too short. Please try again and speak clearly.",
            ),
            VoiceError::MissingCredential => Toast::new(
                "Voice Unavailable",
                "Add an OpenAI API key in the profile menu to use voice chat.",
            ),
            VoiceError::EmptyTranscript => Toast::new(
                "Could not detect speech",
                "Please try again speaking clearly into the microphone",
            ),
            VoiceError::Transcription(_) | VoiceError::Http(_) => Toast::new(
                "Speech Recognition Failed",
                "Please check your microphone and try again.",
            ),
            VoiceError::Synthesis(_) => Toast::new(
                "Playback Failed",
                "The spoken reply could not be generated.",
            ),
        }
    }
}

/// Transcription and synthesis, both gated on the OpenAI key.
#[derive(Clone)]
pub struct VoiceService {
    credentials: CredentialResolver,
    transcriber: Arc<dyn Transcriber>,
    synthesizer: Arc<dyn Synthesizer>,
}

impl VoiceService {
    pub fn new(
        credentials: CredentialResolver,
        transcriber: Arc<dyn Transcriber>,
        synthesizer: Arc<dyn Synthesizer>,
    ) -> Self {
        Self {
            credentials,
            transcriber,
            synthesizer,
        }
    }

    pub fn from_config(config: &AppConfig, credentials: CredentialResolver) -> Self {
        Self::new(
            credentials,
            Arc::new(WhisperClient::new(&config.transcription)),
            Arc::new(SpeechClient::new(&config.speech, VOICE_PREFERENCES)),
        )
    }

    async fn openai_key(&self) -> Result<String, VoiceError> {
        let keys = self.credentials.resolve().await;
        keys.get(Vendor::OpenAi)
            .map(str::to_string)
            .ok_or(VoiceError::MissingCredential)
    }

    /// Finish the recording and transcribe it. Undersized recordings are
    /// rejected before any key lookup or upload.
    pub async fn transcribe(&self, session: RecordingSession) -> Result<String, VoiceError> {
        let clip = session.finish()?;
        let key = self.openai_key().await?;

        let text = self.transcriber.transcribe(&key, clip).await.inspect_err(|err| {
            warn!(error = %err, "transcription failed");
        })?;

        let text = text.trim();
        if text.is_empty() {
            warn!("empty transcription received");
            return Err(VoiceError::EmptyTranscript);
        }
        info!(chars = text.len(), "transcription succeeded");
        Ok(text.to_string())
    }

    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>, VoiceError> {
        let key = self.openai_key().await?;
        self.synthesizer.synthesize(&key, text).await.inspect_err(|err| {
            warn!(error = %err, "speech synthesis failed");
        })
    }
}
