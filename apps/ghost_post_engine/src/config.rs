use std::{env, path::PathBuf, str::FromStr, time::Duration};

use ghost_llm::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryBackend {
    File,
    Memory,
    MongoDb,
    Disabled,
}

impl FromStr for HistoryBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(HistoryBackend::File),
            "memory" => Ok(HistoryBackend::Memory),
            "mongodb" | "mongo" => Ok(HistoryBackend::MongoDb),
            "none" | "off" | "disabled" => Ok(HistoryBackend::Disabled),
            other => Err(ConfigError::Invalid(format!(
                "HISTORY_BACKEND must be one of file, memory, mongodb, none (got '{}')",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Absent is allowed at startup; generate requests then fail with a 500.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub bind_address: String,
    pub environment: String,
    pub request_timeout: Duration,
    pub history_backend: HistoryBackend,
    pub history_file: PathBuf,
    pub database_uri: Option<String>,
    pub database_name: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let request_timeout = match get("REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or_else(|| {
                        ConfigError::Invalid(format!(
                            "REQUEST_TIMEOUT_SECS must be a positive whole number of seconds (got '{}')",
                            raw
                        ))
                    })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(60),
        };

        let history_backend = match get("HISTORY_BACKEND") {
            Some(raw) => raw.parse()?,
            None => HistoryBackend::File,
        };

        let database_uri = get("DATABASE_URI");
        if history_backend == HistoryBackend::MongoDb && database_uri.is_none() {
            return Err(ConfigError::Invalid(
                "DATABASE_URI is required when HISTORY_BACKEND=mongodb".to_string(),
            ));
        }

        Ok(Self {
            gemini_api_key: get("GEMINI_API_KEY").map(|key| key.trim().to_string()),
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: get("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            bind_address: get("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:8000".to_string()),
            environment: get("APP_ENVIRONMENT").unwrap_or_else(|| "dev".to_string()),
            request_timeout,
            history_backend,
            history_file: get("HISTORY_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("ghost_post_history.json")),
            database_uri,
            database_name: get("DATABASE_NAME").unwrap_or_else(|| "GhostPost".to_string()),
        })
    }

    pub fn is_dev(&self) -> bool {
        self.environment == "dev"
    }
}
