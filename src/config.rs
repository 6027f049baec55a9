/// Application settings
///
/// Layered as built-in defaults < optional JSON file in the user's config
/// directory < environment variables (a `.env` file is loaded first). The
/// API key only ever comes from the environment.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_LANGUAGE: &str = "中文";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Environment variables consulted for the API key, in order
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("invalid {field} in settings file: {value}")]
    InvalidField { field: &'static str, value: String },
}

fn valid_temperature(t: f32) -> bool {
    (0.0..=2.0).contains(&t)
}

fn valid_thinking_budget(budget: i32) -> bool {
    budget >= -1
}

/// Everything the analysis client needs to reach the model
#[derive(Serialize, Deserialize, Clone, PartialEq)]
#[serde(default, rename_all = "snake_case")]
pub struct Settings {
    /// Credential for the Gemini API. Never read from or written to disk.
    #[serde(skip)]
    pub api_key: String,
    /// Model identifier (e.g., "gemini-3-flash-preview")
    pub model: String,
    /// Sampling temperature, 0.0 to 2.0
    /// - Lower values give more repeatable reports
    /// - Higher values give more varied wording
    pub temperature: f32,
    /// Optional thinking budget in tokens (-1 lets the model decide)
    pub thinking_budget: Option<i32>,
    /// Language the report is written in
    pub language: String,
    /// Scheme and host of the API, without a trailing slash
    pub base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            thinking_budget: None,
            language: DEFAULT_LANGUAGE.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Settings {
    /// Load settings for the running app
    ///
    /// Problems with the settings file or individual variables are logged
    /// and skipped; startup never fails on configuration.
    pub fn load() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "failed to load .env");
            }
        }

        let mut settings = match Self::settings_path() {
            Some(path) => match Self::from_file(&path) {
                Ok(Some(mut settings)) => {
                    tracing::info!(path = %path.display(), "loaded settings file");
                    for err in settings.validate() {
                        tracing::warn!(error = %err, "ignoring settings value");
                    }
                    settings
                }
                Ok(None) => Self::default(),
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring settings file");
                    Self::default()
                }
            },
            None => Self::default(),
        };

        for err in settings.apply_env(|var| std::env::var(var).ok()) {
            tracing::warn!(error = %err, "ignoring environment override");
        }

        if settings.api_key.is_empty() {
            tracing::warn!("no API key set (GEMINI_API_KEY); analysis requests will be rejected");
        }

        tracing::info!(
            model = %settings.model,
            temperature = settings.temperature,
            language = %settings.language,
            "settings ready"
        );

        settings
    }

    /// Where the optional settings file lives:
    /// - Linux: ~/.config/persona-lens/settings.json
    /// - macOS: ~/Library/Application Support/persona-lens/settings.json
    /// - Windows: %APPDATA%\persona-lens\settings.json
    pub fn settings_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("persona-lens");
        path.push("settings.json");
        Some(path)
    }

    /// Read a settings file; a missing file is not an error
    pub fn from_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Self::from_json(&json)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reset out-of-range values (e.g., from a hand-edited file) to defaults
    pub fn validate(&mut self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !valid_temperature(self.temperature) {
            errors.push(ConfigError::InvalidField {
                field: "temperature",
                value: self.temperature.to_string(),
            });
            self.temperature = DEFAULT_TEMPERATURE;
        }

        if let Some(budget) = self.thinking_budget.filter(|b| !valid_thinking_budget(*b)) {
            errors.push(ConfigError::InvalidField {
                field: "thinking_budget",
                value: budget.to_string(),
            });
            self.thinking_budget = None;
        }

        if self.model.trim().is_empty() {
            errors.push(ConfigError::InvalidField {
                field: "model",
                value: self.model.clone(),
            });
            self.model = DEFAULT_MODEL.to_string();
        }

        errors
    }

    /// Apply environment overrides through `lookup`
    ///
    /// Invalid values are skipped and returned; valid ones are applied.
    pub fn apply_env<F>(&mut self, lookup: F) -> Vec<ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut errors = Vec::new();

        if let Some(key) = API_KEY_VARS
            .iter()
            .filter_map(|var| lookup(*var))
            .find(|key| !key.trim().is_empty())
        {
            self.api_key = key.trim().to_string();
        }

        if let Some(model) = lookup("PERSONA_LENS_MODEL").filter(|m| !m.trim().is_empty()) {
            self.model = model.trim().to_string();
        }

        if let Some(value) = lookup("PERSONA_LENS_TEMPERATURE") {
            match value.trim().parse::<f32>() {
                Ok(t) if valid_temperature(t) => self.temperature = t,
                _ => errors.push(ConfigError::InvalidEnv {
                    var: "PERSONA_LENS_TEMPERATURE",
                    value,
                }),
            }
        }

        if let Some(value) = lookup("PERSONA_LENS_THINKING_BUDGET") {
            match value.trim().parse::<i32>() {
                Ok(budget) if valid_thinking_budget(budget) => self.thinking_budget = Some(budget),
                _ => errors.push(ConfigError::InvalidEnv {
                    var: "PERSONA_LENS_THINKING_BUDGET",
                    value,
                }),
            }
        }

        if let Some(language) = lookup("PERSONA_LENS_LANGUAGE").filter(|l| !l.trim().is_empty()) {
            self.language = language.trim().to_string();
        }

        if let Some(url) = lookup("PERSONA_LENS_BASE_URL").filter(|u| !u.trim().is_empty()) {
            self.base_url = url.trim().trim_end_matches('/').to_string();
        }

        errors
    }
}

// Keep the credential out of logs
impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("thinking_budget", &self.thinking_budget)
            .field("language", &self.language)
            .field("base_url", &self.base_url)
            .finish()
    }
}
