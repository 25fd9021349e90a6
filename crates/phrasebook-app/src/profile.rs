use std::fs;
use std::path::Path;

use phrasebook_config::Config;
use phrasebook_core::history::HistoryLog;

const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Explicit config file, else ./config.json, else built-in defaults.
/// Environment overrides apply in every case.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = path {
        tracing::info!("Loading config from {}", path.display());
        return Ok(Config::load(path)?);
    }

    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        tracing::info!("Loading repo default config...");
        return Ok(Config::load(default_path)?);
    }

    Ok(Config::new())
}

/// Persisted history, or an empty log when the file is missing or unreadable
pub fn load_history(path: &Path, max_size: usize) -> HistoryLog {
    if !path.exists() {
        return HistoryLog::new(max_size);
    }

    let loaded = fs::read_to_string(path)
        .map_err(anyhow::Error::from)
        .and_then(|data| Ok(HistoryLog::from_json(&data, max_size)?));

    match loaded {
        Ok(history) => {
            tracing::debug!("Loaded {} history records", history.len());
            history
        }
        Err(e) => {
            tracing::warn!("Ignoring history file {}: {}", path.display(), e);
            HistoryLog::new(max_size)
        }
    }
}

pub fn save_history(path: &Path, history: &HistoryLog) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, history.to_json()?)?;
    tracing::debug!("Saved {} history records to {}", history.len(), path.display());
    Ok(())
}
