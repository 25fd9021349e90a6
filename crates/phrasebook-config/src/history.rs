use serde::{Deserialize, Serialize};

use crate::env_parse;

fn default_max_size() -> usize {
    20
}

fn default_path() -> String {
    "history.json".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    #[serde(default = "default_max_size")]
    pub max_size: usize,
    /// JSON file the front end persists the history log to
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_size(),
            path: default_path(),
        }
    }
}

impl HistoryConfig {
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    pub fn apply_env(&mut self) {
        if let Some(max_size) = env_parse("HISTORY_MAX_SIZE") {
            self.max_size = max_size;
        }
        if let Ok(path) = std::env::var("HISTORY_PATH") {
            self.path = path;
        }
    }
}
