use std::env;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use self::cache::CacheConfig;
use self::history::HistoryConfig;
use self::matcher::MatcherConfig;
use self::translator::TranslatorConfig;

pub mod cache;
pub mod history;
pub mod matcher;
pub mod translator;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Translation API key is not configured (set DEEPSEEK_API_KEY)")]
    MissingApiKey,

    #[error("Translation API key is malformed (expected an sk- prefix)")]
    InvalidApiKey,
}

fn default_log_format() -> String {
    "fmt".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub matcher: MatcherConfig,
    pub cache: CacheConfig,
    pub translator: TranslatorConfig,
    pub history: HistoryConfig,

    /// Extra catalog files merged over the embedded one
    pub catalog_paths: Vec<String>,
    /// "fmt" or "json"
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            matcher: MatcherConfig::default(),
            cache: CacheConfig::default(),
            translator: TranslatorConfig::default(),
            history: HistoryConfig::default(),
            catalog_paths: Vec::new(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Load a JSON config file, then apply environment overrides on top
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&content)?;
        config.apply_env();
        Ok(config)
    }

    pub fn apply_env(&mut self) {
        self.matcher.apply_env();
        self.cache.apply_env();
        self.translator.apply_env();
        self.history.apply_env();

        if let Ok(format) = env::var("LOG_FORMAT") {
            self.log_format = format;
        }
    }

    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

/// Parse an environment variable, ignoring unset or unparsable values
pub(crate) fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
