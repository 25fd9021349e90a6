use std::collections::HashMap;

use phrasebook_types::{Language, PhraseCategory, PhraseEntry};

/// First-character buckets smaller than this fall back to the full catalog
pub const MIN_BUCKET_SIZE: usize = 5;

/// Lookup structure over the phrase catalog.
///
/// Buckets hold positions into `entries`, so every bucket lists entries in
/// catalog order.
#[derive(Debug, Clone, Default)]
pub struct PhraseIndex {
    entries: Vec<PhraseEntry>,
    category_index: HashMap<PhraseCategory, Vec<usize>>,
    primary_index: HashMap<char, Vec<usize>>,
    secondary_index: HashMap<char, Vec<usize>>,
}

impl PhraseIndex {
    pub fn build(entries: Vec<PhraseEntry>) -> Self {
        let mut index = Self {
            entries,
            ..Self::default()
        };
        index.rebuild();
        index
    }

    /// Recompute every bucket from the entry list
    pub fn rebuild(&mut self) {
        self.category_index.clear();
        self.primary_index.clear();
        self.secondary_index.clear();

        for (idx, entry) in self.entries.iter().enumerate() {
            self.category_index
                .entry(entry.category)
                .or_default()
                .push(idx);

            if let Some(first) = entry.primary_text.chars().next() {
                self.primary_index.entry(first).or_default().push(idx);
            }
            if let Some(first) = entry.secondary_text.chars().next() {
                self.secondary_index.entry(first).or_default().push(idx);
            }
        }

        tracing::debug!(
            "Indexed {} phrases ({} primary initials, {} secondary initials)",
            self.entries.len(),
            self.primary_index.len(),
            self.secondary_index.len()
        );
    }

    fn initials(&self, lang: Language) -> &HashMap<char, Vec<usize>> {
        match lang {
            Language::Chinese => &self.primary_index,
            Language::Korean => &self.secondary_index,
        }
    }

    fn resolve(&self, positions: &[usize]) -> Vec<&PhraseEntry> {
        positions.iter().filter_map(|&i| self.entries.get(i)).collect()
    }

    /// Entries worth scoring against `input`.
    ///
    /// Uses the bucket for the input's first character when it is large
    /// enough, otherwise the whole catalog.
    pub fn candidates_for(&self, lang: Language, input: &str) -> Vec<&PhraseEntry> {
        let bucket = input
            .trim()
            .chars()
            .next()
            .and_then(|first| self.initials(lang).get(&first));

        match bucket {
            Some(positions) if positions.len() >= MIN_BUCKET_SIZE => self.resolve(positions),
            _ => self.entries.iter().collect(),
        }
    }

    pub fn by_category(&self, category: PhraseCategory) -> Vec<&PhraseEntry> {
        self.category_index
            .get(&category)
            .map(|positions| self.resolve(positions))
            .unwrap_or_default()
    }

    pub fn by_initial(&self, lang: Language, initial: char) -> Vec<&PhraseEntry> {
        self.initials(lang)
            .get(&initial)
            .map(|positions| self.resolve(positions))
            .unwrap_or_default()
    }

    pub fn get(&self, id: &str) -> Option<&PhraseEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[PhraseEntry] {
        &self.entries
    }

    /// Every category with its entry count, in declaration order
    pub fn categories(&self) -> Vec<(PhraseCategory, usize)> {
        PhraseCategory::ALL
            .into_iter()
            .map(|c| (c, self.category_index.get(&c).map_or(0, Vec::len)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
