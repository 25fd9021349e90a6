use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::env_parse;

fn default_ttl_seconds() -> u64 {
    3600
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
    /// Period of the background expiry sweep, 0 disables it
    pub sweep_interval_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl_seconds(),
            sweep_interval_seconds: 0,
        }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    pub fn apply_env(&mut self) {
        if let Some(ttl) = env_parse("CACHE_TTL_SECONDS") {
            self.ttl_seconds = ttl;
        }
        if let Some(interval) = env_parse("CACHE_SWEEP_SECONDS") {
            self.sweep_interval_seconds = interval;
        }
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_seconds > 0).then(|| Duration::from_secs(self.sweep_interval_seconds))
    }
}
