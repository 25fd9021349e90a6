use serde::{Deserialize, Serialize};

use crate::env_parse;

fn default_offline_threshold() -> f64 {
    0.8
}

fn default_fallback_threshold() -> f64 {
    0.6
}

fn default_suggestion_limit() -> usize {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Minimum score for an offline phrase to answer a request
    #[serde(default = "default_offline_threshold")]
    pub offline_threshold: f64,
    /// Threshold used for the last offline attempt after the provider failed
    #[serde(default = "default_fallback_threshold")]
    pub fallback_threshold: f64,
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            offline_threshold: default_offline_threshold(),
            fallback_threshold: default_fallback_threshold(),
            suggestion_limit: default_suggestion_limit(),
        }
    }
}

impl MatcherConfig {
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    pub fn apply_env(&mut self) {
        if let Some(threshold) = env_parse("OFFLINE_MATCH_THRESHOLD") {
            self.offline_threshold = threshold;
        }
        if let Some(threshold) = env_parse("FALLBACK_MATCH_THRESHOLD") {
            self.fallback_threshold = threshold;
        }
    }
}
