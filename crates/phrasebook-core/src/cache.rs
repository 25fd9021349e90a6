use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use phrasebook_types::Language;

use crate::preprocess::{DefaultPreprocessor, Preprocessor};

pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    text: String,
    source: Language,
    target: Language,
}

impl CacheKey {
    fn new(text: &str, source: Language, target: Language) -> Self {
        Self {
            text: DefaultPreprocessor.process(text),
            source,
            target,
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    translated_text: String,
    created_at: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub size: usize,
    /// `"{text}_{src}_{dst}"` per live entry, sorted
    pub keys: Vec<String>,
}

/// Remote translations keyed by normalized text and language pair.
///
/// Entries older than the TTL are never served. Expiry is lazy: every lookup
/// purges whatever has gone stale.
#[derive(Debug)]
pub struct TranslationCache {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
    ttl: Duration,
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl TranslationCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, CacheEntry>> {
        // The map stays consistent even if a holder panicked
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_fresh(&self, entry: &CacheEntry, now: Instant) -> bool {
        now.saturating_duration_since(entry.created_at) <= self.ttl
    }

    fn purge_at(&self, map: &mut HashMap<CacheKey, CacheEntry>, now: Instant) -> usize {
        let before = map.len();
        map.retain(|_, entry| self.is_fresh(entry, now));
        before - map.len()
    }

    pub fn get(&self, text: &str, source: Language, target: Language) -> Option<String> {
        self.get_at(text, source, target, Instant::now())
    }

    fn get_at(&self, text: &str, source: Language, target: Language, now: Instant) -> Option<String> {
        let key = CacheKey::new(text, source, target);
        let mut map = self.lock();

        let purged = self.purge_at(&mut map, now);
        if purged > 0 {
            tracing::debug!("Purged {} expired cache entries", purged);
        }

        map.get(&key).map(|entry| entry.translated_text.clone())
    }

    pub fn put(&self, text: &str, source: Language, target: Language, translated: &str) {
        self.put_at(text, source, target, translated, Instant::now());
    }

    fn put_at(
        &self,
        text: &str,
        source: Language,
        target: Language,
        translated: &str,
        now: Instant,
    ) {
        let key = CacheKey::new(text, source, target);
        self.lock().insert(
            key,
            CacheEntry {
                translated_text: translated.to_string(),
                created_at: now,
            },
        );
    }

    /// Drop stale entries, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    fn purge_expired_at(&self, now: Instant) -> usize {
        let mut map = self.lock();
        self.purge_at(&mut map, now)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        let mut map = self.lock();
        self.purge_at(&mut map, Instant::now());

        let mut keys: Vec<String> = map
            .keys()
            .map(|k| format!("{}_{}_{}", k.text, k.source, k.target))
            .collect();
        keys.sort();

        CacheStats {
            size: map.len(),
            keys,
        }
    }
}
