use std::collections::{HashMap, HashSet};

use phrasebook_core::PhraseIndex;
use phrasebook_types::{PhraseCategory, PhraseEntry};
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Duplicate phrase id: {0}")]
    DuplicateId(String),

    #[error("Phrase {0} has no text")]
    EmptyPhrase(String),
}

#[derive(Debug, Deserialize)]
struct CatalogJson {
    version: String,
    phrases: Vec<PhraseEntry>,
}

/// Versioned, ordered list of curated phrase pairs
#[derive(Debug, Clone)]
pub struct PhraseCatalog {
    version: String,
    entries: Vec<PhraseEntry>,
}

impl PhraseCatalog {
    /// Parse `{"version": ..., "phrases": [{id, zh, ko, romanization, category}]}`
    pub fn from_json(json_str: &str) -> Result<Self, CatalogError> {
        let data: CatalogJson = serde_json::from_str(json_str)?;

        let mut seen = HashSet::new();
        for entry in &data.phrases {
            if !seen.insert(entry.id.as_str()) {
                return Err(CatalogError::DuplicateId(entry.id.clone()));
            }
            if entry.primary_text.trim().is_empty() && entry.secondary_text.trim().is_empty() {
                return Err(CatalogError::EmptyPhrase(entry.id.clone()));
            }
        }

        Ok(Self {
            version: data.version,
            entries: data.phrases,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn entries(&self) -> &[PhraseEntry] {
        &self.entries
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn count_by_category(&self, category: PhraseCategory) -> usize {
        self.entries.iter().filter(|e| e.category == category).count()
    }

    /// Merge another catalog into this one.
    /// Entries with an existing ID replace the old entry in place, new ones are appended.
    pub fn merge(mut self, other: PhraseCatalog) -> Self {
        let positions: HashMap<String, usize> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();

        for entry in other.entries {
            match positions.get(&entry.id) {
                Some(&i) => self.entries[i] = entry,
                None => self.entries.push(entry),
            }
        }

        self
    }

    pub fn into_index(self) -> PhraseIndex {
        PhraseIndex::build(self.entries)
    }
}
