use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::backends::groq::{Groq, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::error::LLMError;
use crate::history::{FieldOrder, HistoryStore};
use crate::session::DEFAULT_MAX_CONTEXT_ITEMS;

const DEFAULT_API_KEY_ENV: &str = "GROQ_API_KEY";
const DEFAULT_HISTORY_PATH: &str = "prompt_history.csv";
const DEFAULT_LOG_ROTATE_SIZE: u64 = 10 * 1024 * 1024;
const DEFAULT_LOG_ROTATE_KEEP: usize = 5;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub model: ModelConfig,
    pub history: HistoryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub api_key: Option<SecretString>,
    pub api_key_env: String,
    pub model: String,
    pub base_url: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub timeout_seconds: Option<u64>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: None,
            max_tokens: None,
            timeout_seconds: None,
        }
    }
}

impl ModelConfig {
    /// First non-empty credential from: `flag`, the config file, then the
    /// environment variable named by `api_key_env`.
    pub fn resolve_api_key(&self, flag: Option<&str>) -> Option<SecretString> {
        if let Some(key) = flag.filter(|k| !k.trim().is_empty()) {
            return Some(SecretString::new(key.to_string()));
        }
        if let Some(key) = self
            .api_key
            .as_ref()
            .filter(|k| !k.expose_secret().trim().is_empty())
        {
            return Some(SecretString::new(key.expose_secret().clone()));
        }
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .map(SecretString::new)
    }

    /// Builds the Groq client. A missing key is logged, not fatal: requests
    /// then fail with an auth error.
    pub fn build_client(&self, api_key: Option<SecretString>) -> Result<Groq, LLMError> {
        let api_key = api_key.unwrap_or_else(|| {
            log::warn!(
                "no API key found; set {} or model.api_key in the config",
                self.api_key_env
            );
            SecretString::new(String::new())
        });
        Groq::new(
            api_key,
            Some(self.base_url.clone()),
            Some(self.model.clone()),
            self.max_tokens,
            self.temperature,
            self.timeout_seconds,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub path: PathBuf,
    pub fields: FieldOrder,
    pub max_context_items: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_HISTORY_PATH),
            fields: FieldOrder::default(),
            max_context_items: DEFAULT_MAX_CONTEXT_ITEMS,
        }
    }
}

impl HistoryConfig {
    pub fn store(&self) -> HistoryStore {
        HistoryStore::new(self.path.clone(), self.fields)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub path: Option<String>,
    pub rotate_size: u64,
    pub rotate_keep: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            path: None,
            rotate_size: DEFAULT_LOG_ROTATE_SIZE,
            rotate_keep: DEFAULT_LOG_ROTATE_KEEP,
        }
    }
}
