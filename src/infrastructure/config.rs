use std::path::PathBuf;
use std::str::FromStr;

use crate::infrastructure::external_services::hashing_embedder::DEFAULT_EMBEDDING_DIMENSIONS;

#[derive(Debug)]
pub enum ConfigError {
    Missing(String),
    Invalid { key: String, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "Missing required setting: {}", key),
            ConfigError::Invalid { key, value } => {
                write!(f, "Invalid value for {}: {:?}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub upload_dir: PathBuf,
    pub embeddings_service_url: Option<String>,
    pub embeddings_max_retries: u32,
    /// Only used by the built-in hashing embedder.
    pub embedding_dimensions: usize,
    pub openai_api_key: String,
    pub llm_base_url: String,
    pub llm_model: String,
    pub external_call_timeout_secs: u64,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let openai_api_key =
            get("OPENAI_API_KEY").ok_or_else(|| ConfigError::Missing("OPENAI_API_KEY".into()))?;

        Ok(Self {
            port: parse_or(&get, "PORT", 5001)?,
            upload_dir: PathBuf::from(get("UPLOAD_DIR").unwrap_or_else(|| "./pdf_files".into())),
            embeddings_service_url: get("EMBEDDINGS_SERVICE_URL"),
            embeddings_max_retries: parse_or(&get, "EMBEDDINGS_MAX_RETRIES", 0)?,
            embedding_dimensions: parse_or(
                &get,
                "EMBEDDING_DIMENSIONS",
                DEFAULT_EMBEDDING_DIMENSIONS,
            )?,
            openai_api_key,
            llm_base_url: get("LLM_BASE_URL")
                .unwrap_or_else(|| "https://api.openai.com/v1".into()),
            llm_model: get("LLM_MODEL").unwrap_or_else(|| "gpt-4o-mini".into()),
            external_call_timeout_secs: parse_or(&get, "EXTERNAL_CALL_TIMEOUT_SECS", 60)?,
            max_upload_bytes: parse_or(&get, "MAX_UPLOAD_BYTES", 250 * 1024 * 1024)?,
        })
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            key: key.to_string(),
            value,
        }),
        None => Ok(default),
    }
}
