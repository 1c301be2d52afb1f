//! API key resolution for the two chat vendors.
//!
//! Keys live in a remote secret store; every successful remote read refreshes
//! a local cache that is used whenever the store fails or has no value.

mod cache;
mod store;

#[cfg(not(target_arch = "wasm32"))]
pub use cache::FileKeyCache;
pub use cache::{KeyCache, MemoryKeyCache, MirroredKeyCache};
pub use store::{PostgrestSecretStore, SecretStore, parse_secret_rows};

use crate::config::AppConfig;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("secret store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Store(String),

    #[error("malformed secret store response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("key cache error: {0}")]
    Cache(String),

    #[error("key cache io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Vendor {
    Mistral,
    OpenAi,
}

impl Vendor {
    pub const ALL: [Vendor; 2] = [Vendor::Mistral, Vendor::OpenAi];

    /// Record id in the remote secret table.
    pub fn secret_id(self) -> &'static str {
        match self {
            Vendor::Mistral => "mistral",
            Vendor::OpenAi => "openai",
        }
    }

    /// Key in the local fallback cache.
    pub fn cache_key(self) -> &'static str {
        match self {
            Vendor::Mistral => "mistral-api-key",
            Vendor::OpenAi => "openai-api-key",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Vendor::Mistral => "Mistral AI",
            Vendor::OpenAi => "OpenAI",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialPair {
    pub mistral: String,
    pub openai: String,
}

impl CredentialPair {
    /// The key for `vendor`, or `None` when it is empty.
    pub fn get(&self, vendor: Vendor) -> Option<&str> {
        let key = match vendor {
            Vendor::Mistral => &self.mistral,
            Vendor::OpenAi => &self.openai,
        };
        (!key.is_empty()).then_some(key.as_str())
    }

    fn set(&mut self, vendor: Vendor, key: String) {
        match vendor {
            Vendor::Mistral => self.mistral = key,
            Vendor::OpenAi => self.openai = key,
        }
    }
}

// Secrets stay out of debug output.
impl fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialPair")
            .field("mistral", &self.get(Vendor::Mistral).map(|_| "<set>"))
            .field("openai", &self.get(Vendor::OpenAi).map(|_| "<set>"))
            .finish()
    }
}

#[derive(Clone)]
pub struct CredentialResolver {
    store: Option<Arc<dyn SecretStore>>,
    cache: Arc<dyn KeyCache>,
}

impl CredentialResolver {
    pub fn new(store: Option<Arc<dyn SecretStore>>, cache: Arc<dyn KeyCache>) -> Self {
        Self { store, cache }
    }

    /// Configured secret store with the platform's default cache: key files
    /// on native builds, memory elsewhere.
    pub fn from_config(config: &AppConfig) -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        let cache: Arc<dyn KeyCache> = Arc::new(FileKeyCache::new(config.key_cache_dir.clone()));
        #[cfg(target_arch = "wasm32")]
        let cache: Arc<dyn KeyCache> = Arc::new(MemoryKeyCache::new());

        Self::with_cache(config, cache)
    }

    /// Configured secret store backed by a caller-supplied cache.
    pub fn with_cache(config: &AppConfig, cache: Arc<dyn KeyCache>) -> Self {
        let store = config
            .secret_store
            .clone()
            .map(|cfg| Arc::new(PostgrestSecretStore::new(cfg)) as Arc<dyn SecretStore>);
        Self::new(store, cache)
    }

    /// Resolve both keys, remote store first, local cache second.
    ///
    /// Runs against the store on every call; nothing is memoized here.
    pub async fn resolve(&self) -> CredentialPair {
        let (mistral, openai) = futures::join!(
            self.resolve_one(Vendor::Mistral),
            self.resolve_one(Vendor::OpenAi)
        );

        let mut pair = CredentialPair::default();
        pair.set(Vendor::Mistral, mistral);
        pair.set(Vendor::OpenAi, openai);
        info!(
            mistral = pair.get(Vendor::Mistral).is_some(),
            openai = pair.get(Vendor::OpenAi).is_some(),
            "api keys resolved"
        );
        pair
    }

    async fn resolve_one(&self, vendor: Vendor) -> String {
        if let Some(store) = &self.store {
            match store.fetch(vendor.secret_id()).await {
                Ok(Some(value)) if !value.is_empty() => {
                    if let Err(err) = self.cache.set(vendor.cache_key(), &value) {
                        warn!(%vendor, error = %err, "failed to refresh cached key");
                    }
                    return value;
                }
                Ok(_) => debug!(%vendor, "no key in secret store"),
                Err(err) => warn!(%vendor, error = %err, "secret store lookup failed"),
            }
        }

        self.cache.get(vendor.cache_key()).unwrap_or_default()
    }

    /// Store a key entered by the user.
    ///
    /// The cache is only touched after the remote write succeeds; a blank key
    /// clears the cached value.
    pub async fn save(&self, vendor: Vendor, key: &str) -> Result<(), CredentialError> {
        let key = key.trim();
        if let Some(store) = &self.store {
            store.upsert(vendor.secret_id(), key).await?;
        }

        if key.is_empty() {
            self.cache.remove(vendor.cache_key())?;
        } else {
            self.cache.set(vendor.cache_key(), key)?;
        }
        info!(%vendor, "api key saved");
        Ok(())
    }
}
