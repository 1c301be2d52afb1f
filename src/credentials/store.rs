use super::CredentialError;
use crate::config::SecretStoreConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Remote key-value store holding one text record per secret id.
#[async_trait]
pub trait SecretStore: Send + Sync {
    async fn fetch(&self, id: &str) -> Result<Option<String>, CredentialError>;
    async fn upsert(&self, id: &str, text: &str) -> Result<(), CredentialError>;
}

/// Secret table behind a PostgREST-compatible REST endpoint (Supabase and friends).
pub struct PostgrestSecretStore {
    client: reqwest::Client,
    config: SecretStoreConfig,
}

#[derive(Deserialize)]
struct SecretRow {
    text: Option<String>,
}

#[derive(Serialize)]
struct SecretUpsert<'a> {
    id: &'a str,
    text: &'a str,
}

impl PostgrestSecretStore {
    pub fn new(config: SecretStoreConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.config.url, self.config.table)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&self.config.anon_key)
    }
}

/// Reads the first row's text; an empty array or a null text is "no value".
pub fn parse_secret_rows(body: &str) -> Result<Option<String>, CredentialError> {
    let rows: Vec<SecretRow> = serde_json::from_str(body)?;
    Ok(rows.into_iter().next().and_then(|row| row.text))
}

#[async_trait]
impl SecretStore for PostgrestSecretStore {
    async fn fetch(&self, id: &str) -> Result<Option<String>, CredentialError> {
        let request = self
            .client
            .get(self.table_url())
            .query(&[("id", format!("eq.{id}")), ("select", "text".to_string())]);
        let response = self.authorized(request).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(CredentialError::Store(format!(
                "secret store error {status}: {body}"
            )));
        }

        parse_secret_rows(&body)
    }

    async fn upsert(&self, id: &str, text: &str) -> Result<(), CredentialError> {
        let request = self
            .client
            .post(self.table_url())
            .header("Prefer", "resolution=merge-duplicates")
            .json(&[SecretUpsert { id, text }]);
        let response = self.authorized(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CredentialError::Store(format!(
                "secret store error {status}: {body}"
            )));
        }
        Ok(())
    }
}
