//! Persistent user configuration: API key, model, and token budget.
//!
//! Stored as JSON in `~/.commiter-config.json`. Environment variables take
//! priority over the file:
//! 1. COMMITER_API_KEY, then OPENAI_API_KEY
//! 2. COMMITER_MODEL
//! 3. COMMITER_MAX_TOKENS

use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::llm::client::DEFAULT_API_BASE;
use crate::llm::request::DEFAULT_MAX_TOKENS;

/// File name inside the home directory.
pub const CONFIG_FILE_NAME: &str = ".commiter-config.json";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const API_KEY_ENV_VARS: [&str; 2] = ["COMMITER_API_KEY", "OPENAI_API_KEY"];
const MODEL_ENV_VAR: &str = "COMMITER_MODEL";
const MAX_TOKENS_ENV_VAR: &str = "COMMITER_MAX_TOKENS";
const API_BASE_ENV_VAR: &str = "COMMITER_API_BASE";

/// Resolved settings needed to call the chat backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmSettings {
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl Config {
    /// Location of the config file in the user's home directory.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::home_dir()
            .map(|home| home.join(CONFIG_FILE_NAME))
            .ok_or(ConfigError::NoHomeDir)
    }

    /// Load the config file and apply environment overrides.
    ///
    /// Never fails: an unreadable or malformed file is logged and ignored.
    pub fn load() -> Self {
        let from_file = match Self::default_path().and_then(|path| Self::load_from(&path)) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring configuration file: {e}");
                Self::default()
            }
        };
        from_file.with_env_overrides()
    }

    /// Read a config file. A missing file yields the default config.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFailed)?;
        serde_json::from_str(&content).map_err(ConfigError::ParseFailed)
    }

    /// Write the config to the default location.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::default_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Write the config atomically as pretty-printed JSON.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self).map_err(ConfigError::SerializeFailed)?;

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(ConfigError::WriteFailed)?;
        tmp.write_all(json.as_bytes()).map_err(ConfigError::WriteFailed)?;
        tmp.write_all(b"\n").map_err(ConfigError::WriteFailed)?;
        tmp.persist(path).map_err(|e| ConfigError::WriteFailed(e.error))?;

        Ok(())
    }

    /// Replace fields with values from the environment where set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(key) = API_KEY_ENV_VARS
            .iter()
            .find_map(|var| env::var(var).ok().filter(|v| !v.trim().is_empty()))
        {
            self.api_key = Some(key);
        }

        if let Ok(model) = env::var(MODEL_ENV_VAR)
            && !model.trim().is_empty()
        {
            self.model = Some(model);
        }

        if let Ok(raw) = env::var(MAX_TOKENS_ENV_VAR)
            && !raw.is_empty()
        {
            match raw.parse::<u32>() {
                Ok(n) => self.max_tokens = Some(n),
                Err(_) => warn!("Invalid {} value '{}', ignoring", MAX_TOKENS_ENV_VAR, raw),
            }
        }

        self
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = Some(api_key.into());
    }

    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = Some(model.into());
    }

    pub fn set_max_tokens(&mut self, max_tokens: u32) {
        self.max_tokens = Some(max_tokens);
    }

    /// Configured model, or [`DEFAULT_MODEL`].
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_MODEL)
    }

    /// Configured token budget; zero or unset means [`DEFAULT_MAX_TOKENS`].
    pub fn max_tokens(&self) -> u32 {
        match self.max_tokens {
            Some(n) if n > 0 => n,
            _ => DEFAULT_MAX_TOKENS,
        }
    }

    /// Settings for the LLM path, present only when an API key is set.
    pub fn llm_settings(&self) -> Option<LlmSettings> {
        let api_key = self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())?;
        Some(LlmSettings {
            api_key: api_key.to_string(),
            model: self.model().to_string(),
            max_tokens: self.max_tokens(),
        })
    }

    /// Human-readable summary with the API key masked.
    pub fn display(&self) -> String {
        let key = match self.api_key.as_deref().filter(|k| !k.is_empty()) {
            Some(k) => {
                let tail: String = k.chars().skip(k.chars().count().saturating_sub(4)).collect();
                format!("***{tail}")
            }
            None => "Not set".to_string(),
        };
        let model = self.model.as_deref().unwrap_or("Not set");
        let max_tokens = self
            .max_tokens
            .map(|n| n.to_string())
            .unwrap_or_else(|| "Not set".to_string());

        format!("API Key: {key}\nModel: {model}\nMax Tokens: {max_tokens}")
    }
}

/// Base URL of the chat-completion API.
pub fn api_base() -> String {
    env::var(API_BASE_ENV_VAR)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}
