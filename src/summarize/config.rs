//! Summary provider configuration
//!
//! Settings come from environment variables first, then from values stored
//! in the key-value store by `notecmd ai`.

use crate::db::KeyValueStore;
use anyhow::Result;
use std::env;

// Settings keys for storage
pub const SETTING_AI_API_KEY: &str = "ai_api_key";
pub const SETTING_AI_API_URL: &str = "ai_api_url";
pub const SETTING_AI_API_ENDPOINT: &str = "ai_api_endpoint";
pub const SETTING_AI_MODEL: &str = "ai_model";

// Environment variable names
const ENV_AI_API_KEY: &str = "AI_API_KEY";
const ENV_AI_API_URL: &str = "AI_API_URL";
const ENV_AI_API_ENDPOINT: &str = "AI_API_ENDPOINT";

const DEFAULT_API_URL: &str = "https://api.openai.com";
const DEFAULT_API_ENDPOINT: &str = "/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryConfig {
    pub api_key: Option<String>,
    pub api_url: Option<String>,
    pub api_endpoint: Option<String>,
    pub model: Option<String>,
}

impl SummaryConfig {
    /// Load configuration from environment variables and stored settings.
    /// Environment variables take precedence.
    pub fn load(store: &impl KeyValueStore) -> Result<Self> {
        Self::resolve(store, |name| env::var(name).ok())
    }

    fn resolve<F>(store: &impl KeyValueStore, env_var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = non_empty(env_var(ENV_AI_API_KEY))
            .or(non_empty(store.get(SETTING_AI_API_KEY)?));
        let api_url = non_empty(env_var(ENV_AI_API_URL))
            .or(non_empty(store.get(SETTING_AI_API_URL)?));
        let api_endpoint = non_empty(env_var(ENV_AI_API_ENDPOINT))
            .or(non_empty(store.get(SETTING_AI_API_ENDPOINT)?));
        let model = non_empty(store.get(SETTING_AI_MODEL)?);

        Ok(Self {
            api_key,
            api_url,
            api_endpoint,
            model,
        })
    }

    /// Summaries need an API key; everything else has defaults
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn effective_api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    pub fn effective_api_endpoint(&self) -> &str {
        self.api_endpoint.as_deref().unwrap_or(DEFAULT_API_ENDPOINT)
    }

    pub fn effective_model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// Persist the fields that are set
    pub fn save(&self, store: &impl KeyValueStore) -> Result<()> {
        let fields = [
            (SETTING_AI_API_KEY, &self.api_key),
            (SETTING_AI_API_URL, &self.api_url),
            (SETTING_AI_API_ENDPOINT, &self.api_endpoint),
            (SETTING_AI_MODEL, &self.model),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                store.set(key, value)?;
            }
        }
        Ok(())
    }

    /// Remove all stored summary settings
    pub fn clear(store: &impl KeyValueStore) -> Result<()> {
        for key in [
            SETTING_AI_API_KEY,
            SETTING_AI_API_URL,
            SETTING_AI_API_ENDPOINT,
            SETTING_AI_MODEL,
        ] {
            store.remove(key)?;
        }
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
