use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::fncall::DEFAULT_SEED;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ReapConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub completion: CompletionConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub transport: String,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    /// Emit JSON log lines instead of the human-readable format.
    pub log_structured: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// `memory` or `indexed`.
    pub backend: String,
    pub db_path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CompletionConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub seed: Option<i64>,
    pub request_timeout_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: "stdio".into(),
            host: "127.0.0.1".into(),
            port: 8420,
            log_level: "info".into(),
            log_structured: false,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_reap_dir()
            .join("food.db")
            .to_string_lossy()
            .into_owned();
        Self {
            backend: "indexed".into(),
            db_path,
        }
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-4o-mini".into(),
            api_key: String::new(),
            seed: Some(DEFAULT_SEED),
            request_timeout_secs: None,
        }
    }
}

/// Returns `~/.reap/`, or `./.reap/` when no home directory is known.
pub fn default_reap_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".reap")
}

/// Returns the default config file path: `~/.reap/config.toml`
pub fn default_config_path() -> PathBuf {
    default_reap_dir().join("config.toml")
}

impl ReapConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            ReapConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("REAP_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("REAP_BACKEND") {
            self.storage.backend = val;
        }
        if let Ok(val) = std::env::var("REAP_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("REAP_MODEL") {
            self.completion.model = val;
        }
        if let Ok(val) = std::env::var("REAP_BASE_URL") {
            self.completion.base_url = val;
        }
        // REAP_AI_TOKEN wins over the generic OpenAI variable
        if let Ok(val) = std::env::var("REAP_AI_TOKEN").or_else(|_| std::env::var("OPENAI_API_KEY"))
        {
            self.completion.api_key = val;
        }
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
