//! Local fallback cache for API keys.
//!
//! Native builds keep one file per key under the configured directory. WASM
//! builds hold keys in memory and mirror every write to browser storage.

use super::CredentialError;
use std::collections::HashMap;
use std::sync::Mutex;

#[cfg(not(target_arch = "wasm32"))]
use std::{fs, path::PathBuf};

pub trait KeyCache: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), CredentialError>;
    fn remove(&self, key: &str) -> Result<(), CredentialError>;
}

/// Sanitize a cache key for filesystem use
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(not(target_arch = "wasm32"))]
pub struct FileKeyCache {
    dir: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileKeyCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.key", sanitize_key(key)))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyCache for FileKeyCache {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key))
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CredentialError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CredentialError> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryKeyCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKeyCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, CredentialError> {
        self.entries
            .lock()
            .map_err(|_| CredentialError::Cache("key cache poisoned".into()))
    }
}

impl KeyCache for MemoryKeyCache {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CredentialError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CredentialError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

type Mirror = Box<dyn Fn(&str, Option<&str>) + Send + Sync>;

/// In-memory cache that forwards every write to a store it can only read
/// asynchronously, such as browser `localStorage`.
///
/// Reads never touch the mirror. Call [`MirroredKeyCache::hydrate`] once the
/// stored entries have been read back.
pub struct MirroredKeyCache {
    memory: MemoryKeyCache,
    mirror: Mirror,
}

impl MirroredKeyCache {
    /// `mirror` receives `Some(value)` for a write and `None` for a removal.
    pub fn new(mirror: impl Fn(&str, Option<&str>) + Send + Sync + 'static) -> Self {
        Self {
            memory: MemoryKeyCache::new(),
            mirror: Box::new(mirror),
        }
    }

    /// Seed from persisted entries without echoing them back to the mirror.
    /// Keys written since startup are newer and stay.
    pub fn hydrate(&self, entries: impl IntoIterator<Item = (String, String)>) {
        let Ok(mut memory) = self.memory.lock() else {
            return;
        };
        for (key, value) in entries {
            if value.is_empty() {
                continue;
            }
            memory.entry(key).or_insert(value);
        }
    }
}

impl KeyCache for MirroredKeyCache {
    fn get(&self, key: &str) -> Option<String> {
        self.memory.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CredentialError> {
        self.memory.set(key, value)?;
        (self.mirror)(key, Some(value));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CredentialError> {
        self.memory.remove(key)?;
        (self.mirror)(key, None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn sanitize_replaces_path_separators() {
        assert_eq!(sanitize_key("openai-api-key"), "openai-api-key");
        assert_eq!(sanitize_key("../etc/passwd"), "___etc_passwd");
    }

    #[test]
    fn memory_cache_set_get_remove() {
        let cache = MemoryKeyCache::new();
        assert_eq!(cache.get("mistral-api-key"), None);
        cache.set("mistral-api-key", "m-123").unwrap();
        assert_eq!(cache.get("mistral-api-key").as_deref(), Some("m-123"));
        cache.remove("mistral-api-key").unwrap();
        assert_eq!(cache.get("mistral-api-key"), None);
    }

    fn recording_mirror() -> (MirroredKeyCache, Arc<Mutex<Vec<(String, Option<String>)>>>) {
        let writes = Arc::new(Mutex::new(Vec::new()));
        let sink = writes.clone();
        let cache = MirroredKeyCache::new(move |key, value| {
            sink.lock()
                .unwrap()
                .push((key.to_string(), value.map(str::to_string)));
        });
        (cache, writes)
    }

    #[test]
    fn mirrored_cache_forwards_writes_and_removals() {
        let (cache, writes) = recording_mirror();
        cache.set("openai-api-key", "sk-1").unwrap();
        cache.remove("openai-api-key").unwrap();

        assert_eq!(cache.get("openai-api-key"), None);
        assert_eq!(
            *writes.lock().unwrap(),
            vec![
                ("openai-api-key".to_string(), Some("sk-1".to_string())),
                ("openai-api-key".to_string(), None),
            ]
        );
    }

    #[test]
    fn hydrate_restores_persisted_keys_without_echo() {
        let (cache, writes) = recording_mirror();
        cache.set("openai-api-key", "sk-fresh").unwrap();

        cache.hydrate([
            ("openai-api-key".to_string(), "sk-stale".to_string()),
            ("mistral-api-key".to_string(), "m-saved".to_string()),
            ("empty".to_string(), String::new()),
        ]);

        assert_eq!(cache.get("openai-api-key").as_deref(), Some("sk-fresh"));
        assert_eq!(cache.get("mistral-api-key").as_deref(), Some("m-saved"));
        assert_eq!(cache.get("empty"), None);
        assert_eq!(writes.lock().unwrap().len(), 1);
    }
}
