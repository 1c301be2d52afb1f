//! Integration tests for API key resolution
//!
//! Exercises the remote-then-cache lookup order against a scripted secret store

use async_trait::async_trait;
use republica::credentials::{
    CredentialError, CredentialResolver, FileKeyCache, KeyCache, MemoryKeyCache,
    MirroredKeyCache, SecretStore, Vendor,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct ScriptedStore {
    rows: Mutex<HashMap<String, String>>,
    failing: bool,
    fetches: AtomicUsize,
}

impl ScriptedStore {
    fn with(rows: &[(&str, &str)]) -> Self {
        Self {
            rows: Mutex::new(
                rows.iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
            ..Default::default()
        }
    }

    fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl SecretStore for ScriptedStore {
    async fn fetch(&self, id: &str) -> Result<Option<String>, CredentialError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(CredentialError::Store("503 Service Unavailable".into()));
        }
        Ok(self.rows.lock().unwrap().get(id).cloned())
    }

    async fn upsert(&self, id: &str, text: &str) -> Result<(), CredentialError> {
        if self.failing {
            return Err(CredentialError::Store("503 Service Unavailable".into()));
        }
        self.rows
            .lock()
            .unwrap()
            .insert(id.to_string(), text.to_string());
        Ok(())
    }
}

mod resolve_tests {
    use super::*;

    #[tokio::test]
    async fn test_remote_value_refreshes_cache() {
        let cache = Arc::new(MemoryKeyCache::new());
        cache.set(Vendor::Mistral.cache_key(), "stale").unwrap();
        let store = Arc::new(ScriptedStore::with(&[("mistral", "fresh")]));
        let resolver = CredentialResolver::new(Some(store as Arc<dyn SecretStore>), cache.clone());

        let keys = resolver.resolve().await;
        assert_eq!(keys.get(Vendor::Mistral), Some("fresh"));
        assert_eq!(cache.get(Vendor::Mistral.cache_key()).as_deref(), Some("fresh"));
    }

    #[tokio::test]
    async fn test_remote_failure_uses_cached_value() {
        let cache = Arc::new(MemoryKeyCache::new());
        cache.set(Vendor::OpenAi.cache_key(), "sk-cached").unwrap();
        let resolver = CredentialResolver::new(Some(Arc::new(ScriptedStore::failing()) as Arc<dyn SecretStore>), cache);

        let keys = resolver.resolve().await;
        assert_eq!(keys.get(Vendor::OpenAi), Some("sk-cached"));
        assert_eq!(keys.get(Vendor::Mistral), None);
    }

    #[tokio::test]
    async fn test_nothing_anywhere_resolves_to_empty() {
        let resolver = CredentialResolver::new(
            Some(Arc::new(ScriptedStore::default()) as Arc<dyn SecretStore>),
            Arc::new(MemoryKeyCache::new()),
        );
        let keys = resolver.resolve().await;
        assert_eq!(keys.mistral, "");
        assert_eq!(keys.openai, "");
    }

    #[tokio::test]
    async fn test_empty_remote_value_falls_back_to_cache() {
        let cache = Arc::new(MemoryKeyCache::new());
        cache.set(Vendor::Mistral.cache_key(), "cached").unwrap();
        let store = Arc::new(ScriptedStore::with(&[("mistral", "")]));
        let resolver = CredentialResolver::new(Some(store as Arc<dyn SecretStore>), cache);

        assert_eq!(resolver.resolve().await.get(Vendor::Mistral), Some("cached"));
    }

    #[tokio::test]
    async fn test_every_resolve_hits_the_store() {
        let store = Arc::new(ScriptedStore::with(&[("openai", "sk-1")]));
        let resolver =
            CredentialResolver::new(Some(store.clone() as Arc<dyn SecretStore>), Arc::new(MemoryKeyCache::new()));

        resolver.resolve().await;
        resolver.resolve().await;
        assert_eq!(store.fetches.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_without_store_only_cache_is_read() {
        let cache = Arc::new(MemoryKeyCache::new());
        cache.set(Vendor::OpenAi.cache_key(), "sk-local").unwrap();
        let resolver = CredentialResolver::new(None, cache);
        assert_eq!(resolver.resolve().await.get(Vendor::OpenAi), Some("sk-local"));
    }
}

mod save_tests {
    use super::*;

    #[tokio::test]
    async fn test_save_writes_store_and_cache() {
        let store = Arc::new(ScriptedStore::default());
        let cache = Arc::new(MemoryKeyCache::new());
        let resolver = CredentialResolver::new(Some(store.clone() as Arc<dyn SecretStore>), cache.clone());

        resolver
            .save(Vendor::OpenAi, "  sk-new  ")
            .await
            .expect("save should succeed");

        assert_eq!(
            store.rows.lock().unwrap().get("openai").map(String::as_str),
            Some("sk-new")
        );
        assert_eq!(cache.get(Vendor::OpenAi.cache_key()).as_deref(), Some("sk-new"));
    }

    #[tokio::test]
    async fn test_failed_remote_save_leaves_cache_alone() {
        let cache = Arc::new(MemoryKeyCache::new());
        cache.set(Vendor::Mistral.cache_key(), "old").unwrap();
        let resolver = CredentialResolver::new(Some(Arc::new(ScriptedStore::failing()) as Arc<dyn SecretStore>), cache.clone());

        assert!(resolver.save(Vendor::Mistral, "new").await.is_err());
        assert_eq!(cache.get(Vendor::Mistral.cache_key()).as_deref(), Some("old"));
    }

    #[tokio::test]
    async fn test_blank_save_clears_cache() {
        let cache = Arc::new(MemoryKeyCache::new());
        cache.set(Vendor::Mistral.cache_key(), "old").unwrap();
        let resolver = CredentialResolver::new(None, cache.clone());

        resolver.save(Vendor::Mistral, "   ").await.unwrap();
        assert_eq!(cache.get(Vendor::Mistral.cache_key()), None);
    }
}

mod file_cache_tests {
    use super::*;

    #[test]
    fn test_file_cache_round_trip() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let cache = FileKeyCache::new(dir.path());

        assert_eq!(cache.get("openai-api-key"), None);
        cache.set("openai-api-key", "sk-file").expect("Failed to set");
        assert_eq!(cache.get("openai-api-key").as_deref(), Some("sk-file"));

        cache.remove("openai-api-key").expect("Failed to remove");
        assert_eq!(cache.get("openai-api-key"), None);
    }

    #[tokio::test]
    async fn test_file_cache_survives_resolver_restart() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = Arc::new(ScriptedStore::with(&[("mistral", "remote-key")]));

        let first = CredentialResolver::new(Some(store as Arc<dyn SecretStore>), Arc::new(FileKeyCache::new(dir.path())));
        first.resolve().await;

        let offline = CredentialResolver::new(
            Some(Arc::new(ScriptedStore::failing()) as Arc<dyn SecretStore>),
            Arc::new(FileKeyCache::new(dir.path())),
        );
        assert_eq!(offline.resolve().await.get(Vendor::Mistral), Some("remote-key"));
    }
}

mod mirrored_cache_tests {
    use super::*;

    /// Stands in for browser storage that outlives the page.
    fn persistent_cache(storage: Arc<Mutex<HashMap<String, String>>>) -> Arc<MirroredKeyCache> {
        let cache = MirroredKeyCache::new(move |key, value| {
            let mut storage = storage.lock().unwrap();
            match value {
                Some(value) => storage.insert(key.to_string(), value.to_string()),
                None => storage.remove(key),
            };
        });
        Arc::new(cache)
    }

    #[tokio::test]
    async fn test_saved_key_survives_reload_while_offline() {
        let storage = Arc::new(Mutex::new(HashMap::new()));
        let store = Arc::new(ScriptedStore::default());

        let first = CredentialResolver::new(
            Some(store as Arc<dyn SecretStore>),
            persistent_cache(storage.clone()),
        );
        first.save(Vendor::OpenAi, "sk-browser").await.unwrap();
        assert_eq!(
            storage.lock().unwrap().get("openai-api-key").map(String::as_str),
            Some("sk-browser")
        );

        // a fresh page starts empty until storage is read back
        let reloaded = persistent_cache(storage.clone());
        let offline = CredentialResolver::new(
            Some(Arc::new(ScriptedStore::failing()) as Arc<dyn SecretStore>),
            reloaded.clone(),
        );
        assert_eq!(offline.resolve().await.get(Vendor::OpenAi), None);

        let persisted = storage.lock().unwrap().clone();
        reloaded.hydrate(persisted);
        assert_eq!(offline.resolve().await.get(Vendor::OpenAi), Some("sk-browser"));
    }

    #[tokio::test]
    async fn test_blank_save_clears_browser_storage() {
        let storage = Arc::new(Mutex::new(HashMap::from([(
            "mistral-api-key".to_string(),
            "m-old".to_string(),
        )])));
        let cache = persistent_cache(storage.clone());
        cache.hydrate(storage.lock().unwrap().clone());

        let resolver = CredentialResolver::new(None, cache);
        resolver.save(Vendor::Mistral, "  ").await.unwrap();

        assert!(storage.lock().unwrap().is_empty());
        assert_eq!(resolver.resolve().await.get(Vendor::Mistral), None);
    }
}
