//! Runtime configuration read from the process environment.
//!
//! `main` loads `.env` (desktop dev) or the bundled `assets/config.env`
//! (mobile builds) before anything here is read.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_SECRETS_TABLE: &str = "secrets";
pub const DEFAULT_MISTRAL_CHAT_ENDPOINT: &str = "https://api.mistral.ai/v1/chat/completions";
pub const DEFAULT_MISTRAL_MODEL: &str = "mistral-large-latest";
pub const DEFAULT_OPENAI_CHAT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TRANSCRIPTION_ENDPOINT: &str = "https://api.openai.com/v1/audio/transcriptions";
pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-1";
pub const DEFAULT_SPEECH_ENDPOINT: &str = "https://api.openai.com/v1/audio/speech";
pub const DEFAULT_SPEECH_MODEL: &str = "tts-1";

/// Connection details for the hosted key-value store holding the API keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecretStoreConfig {
    pub url: String,
    pub anon_key: String,
    pub table: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointConfig {
    pub url: String,
    pub model: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// `None` when no store is configured; credentials then come from the cache only.
    pub secret_store: Option<SecretStoreConfig>,
    pub mistral_chat: EndpointConfig,
    pub openai_chat: EndpointConfig,
    pub transcription: EndpointConfig,
    pub speech: EndpointConfig,
    pub key_cache_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let or = |key: &str, default: &str| read(key).unwrap_or_else(|| default.to_string());

        let secret_store = read("REPUBLICA_SECRETS_URL").map(|url| SecretStoreConfig {
            url: url.trim_end_matches('/').to_string(),
            anon_key: read("REPUBLICA_SECRETS_ANON_KEY").unwrap_or_default(),
            table: or("REPUBLICA_SECRETS_TABLE", DEFAULT_SECRETS_TABLE),
        });

        Self {
            secret_store,
            mistral_chat: EndpointConfig {
                url: or("MISTRAL_CHAT_ENDPOINT", DEFAULT_MISTRAL_CHAT_ENDPOINT),
                model: or("MISTRAL_MODEL", DEFAULT_MISTRAL_MODEL),
            },
            openai_chat: EndpointConfig {
                url: or("OPENAI_CHAT_ENDPOINT", DEFAULT_OPENAI_CHAT_ENDPOINT),
                model: or("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            },
            transcription: EndpointConfig {
                url: or("OPENAI_TRANSCRIPTION_ENDPOINT", DEFAULT_TRANSCRIPTION_ENDPOINT),
                model: or("OPENAI_TRANSCRIPTION_MODEL", DEFAULT_TRANSCRIPTION_MODEL),
            },
            speech: EndpointConfig {
                url: or("OPENAI_SPEECH_ENDPOINT", DEFAULT_SPEECH_ENDPOINT),
                model: or("OPENAI_SPEECH_MODEL", DEFAULT_SPEECH_MODEL),
            },
            key_cache_dir: read("REPUBLICA_KEY_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_key_cache_dir),
        }
    }
}

fn default_key_cache_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        return data_dir.join("republica").join("key_cache");
    }

    PathBuf::from("cache").join("key_cache")
}
