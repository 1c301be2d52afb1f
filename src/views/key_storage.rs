//! Browser `localStorage` as the offline key cache for web builds.

use crate::credentials::{MirroredKeyCache, Vendor};
use dioxus::prelude::*;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

const READ_KEYS_JS: &str = r#"
const keys = await dioxus.recv();
const found = {};
for (const key of keys) {
    try {
        const value = localStorage.getItem(key);
        if (value) found[key] = value;
    } catch (e) {}
}
dioxus.send(found);
"#;

fn write_js(key: &str, value: Option<&str>) -> String {
    match value {
        Some(value) => format!(
            "try {{ localStorage.setItem({}, {}); }} catch (e) {{}}",
            json!(key),
            json!(value)
        ),
        None => format!("try {{ localStorage.removeItem({}); }} catch (e) {{}}", json!(key)),
    }
}

fn local_storage_cache() -> Arc<MirroredKeyCache> {
    Arc::new(MirroredKeyCache::new(|key, value| {
        let _ = document::eval(&write_js(key, value));
    }))
}

/// The cache web builds resolve keys through. Native builds keep their key
/// files and get `None`.
pub fn browser_key_cache() -> Option<Arc<MirroredKeyCache>> {
    if cfg!(target_arch = "wasm32") {
        Some(local_storage_cache())
    } else {
        None
    }
}

/// Load keys saved by an earlier page session into `cache`.
pub async fn hydrate(cache: &MirroredKeyCache) {
    let keys: Vec<&str> = Vendor::ALL.iter().map(|vendor| vendor.cache_key()).collect();
    let mut eval = document::eval(READ_KEYS_JS);
    if let Err(err) = eval.send(keys) {
        warn!(error = ?err, "could not read stored api keys");
        return;
    }

    match eval.recv::<HashMap<String, String>>().await {
        Ok(stored) => {
            debug!(count = stored.len(), "restored api keys from local storage");
            cache.hydrate(stored);
        }
        Err(err) => warn!(error = ?err, "could not read stored api keys"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_quote_keys_and_values() {
        assert_eq!(
            write_js("openai-api-key", Some("sk-\"x\"")),
            r#"try { localStorage.setItem("openai-api-key", "sk-\"x\""); } catch (e) {}"#
        );
        assert_eq!(
            write_js("mistral-api-key", None),
            r#"try { localStorage.removeItem("mistral-api-key"); } catch (e) {}"#
        );
    }
}
