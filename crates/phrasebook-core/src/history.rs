use std::time::{SystemTime, UNIX_EPOCH};

use phrasebook_types::{Language, TranslationResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_MAX_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: Uuid,
    pub source_text: String,
    pub target_text: String,
    pub source_lang: Language,
    pub target_lang: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub romanization: Option<String>,
    pub timestamp_ms: u64,
    pub is_offline: bool,
}

impl HistoryRecord {
    pub fn new(source_text: &str, result: &TranslationResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_text: source_text.to_string(),
            target_text: result.translated_text.clone(),
            source_lang: result.source_lang,
            target_lang: result.target_lang,
            romanization: result.romanization.clone(),
            timestamp_ms: now_ms(),
            is_offline: result.is_offline,
        }
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryStats {
    pub total: usize,
    pub offline: usize,
    pub online: usize,
    /// Share of offline answers in [0, 1], 0 when empty
    pub offline_rate: f64,
    pub max_size: usize,
}

/// Bounded, newest-first list of past translations
#[derive(Debug, Clone)]
pub struct HistoryLog {
    records: Vec<HistoryRecord>,
    max_size: usize,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SIZE)
    }
}

impl HistoryLog {
    pub fn new(max_size: usize) -> Self {
        Self {
            records: Vec::new(),
            max_size,
        }
    }

    /// Prepend a record for `result`, dropping the oldest past the cap
    pub fn record(&mut self, source_text: &str, result: &TranslationResult) -> Uuid {
        let record = HistoryRecord::new(source_text, result);
        let id = record.id;
        self.records.insert(0, record);
        self.records.truncate(self.max_size);
        id
    }

    pub fn entries(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Remove one record, returning whether it existed
    pub fn delete(&mut self, id: Uuid) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        self.records.len() != before
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size;
        self.records.truncate(max_size);
    }

    pub fn stats(&self) -> HistoryStats {
        let total = self.records.len();
        let offline = self.records.iter().filter(|r| r.is_offline).count();
        let offline_rate = if total == 0 {
            0.0
        } else {
            offline as f64 / total as f64
        };

        HistoryStats {
            total,
            offline,
            online: total - offline,
            offline_rate,
            max_size: self.max_size,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.records)
    }

    /// Restore a persisted log, keeping the newest `max_size` records
    pub fn from_json(json: &str, max_size: usize) -> serde_json::Result<Self> {
        let mut records: Vec<HistoryRecord> = serde_json::from_str(json)?;
        records.truncate(max_size);
        Ok(Self { records, max_size })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phrasebook_types::TranslationOrigin;

    fn result(text: &str, is_offline: bool) -> TranslationResult {
        TranslationResult {
            translated_text: text.to_string(),
            romanization: is_offline.then(|| "annyeonghaseyo".to_string()),
            is_offline,
            matched_phrase: None,
            source_lang: Language::Chinese,
            target_lang: Language::Korean,
            origin: if is_offline {
                TranslationOrigin::Phrasebook
            } else {
                TranslationOrigin::Provider
            },
        }
    }

    #[test]
    fn test_newest_first_and_capped() {
        let mut log = HistoryLog::new(3);
        for i in 0..5 {
            log.record(&format!("句子{i}"), &result(&format!("문장{i}"), false));
        }

        assert_eq!(log.len(), 3);
        let sources: Vec<&str> = log.entries().iter().map(|r| r.source_text.as_str()).collect();
        assert_eq!(sources, vec!["句子4", "句子3", "句子2"]);
    }

    #[test]
    fn test_record_copies_result_fields() {
        let mut log = HistoryLog::default();
        let id = log.record("你好", &result("안녕하세요", true));

        let record = &log.entries()[0];
        assert_eq!(record.id, id);
        assert_eq!(record.target_text, "안녕하세요");
        assert_eq!(record.romanization.as_deref(), Some("annyeonghaseyo"));
        assert_eq!(record.source_lang, Language::Chinese);
        assert!(record.is_offline);
        assert!(record.timestamp_ms > 0);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut log = HistoryLog::default();
        let a = log.record("一", &result("하나", false));
        let b = log.record("一", &result("하나", false));
        assert_ne!(a, b);
    }

    #[test]
    fn test_delete_and_clear() {
        let mut log = HistoryLog::default();
        let keep = log.record("一", &result("하나", false));
        let drop = log.record("二", &result("둘", false));

        assert!(log.delete(drop));
        assert!(!log.delete(drop));
        assert_eq!(log.entries()[0].id, keep);

        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_shrinking_cap_trims_oldest() {
        let mut log = HistoryLog::new(5);
        for i in 0..5 {
            log.record(&i.to_string(), &result("x", false));
        }
        log.set_max_size(2);
        assert_eq!(log.max_size(), 2);
        let sources: Vec<&str> = log.entries().iter().map(|r| r.source_text.as_str()).collect();
        assert_eq!(sources, vec!["4", "3"]);
    }

    #[test]
    fn test_stats() {
        let mut log = HistoryLog::default();
        assert_eq!(log.stats().offline_rate, 0.0);

        log.record("你好", &result("안녕하세요", true));
        log.record("你好", &result("안녕하세요", true));
        log.record("明天见", &result("내일 봐요", false));
        log.record("谢谢", &result("감사합니다", true));

        let stats = log.stats();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.offline, 3);
        assert_eq!(stats.online, 1);
        assert_eq!(stats.offline_rate, 0.75);
        assert_eq!(stats.max_size, DEFAULT_MAX_SIZE);
    }

    #[test]
    fn test_json_persistence() {
        let mut log = HistoryLog::default();
        log.record("你好", &result("안녕하세요", true));
        log.record("明天见", &result("내일 봐요", false));

        let json = log.to_json().unwrap();
        let restored = HistoryLog::from_json(&json, 1).unwrap();
        assert_eq!(restored.len(), 1);
        assert_eq!(restored.entries()[0], log.entries()[0]);
        assert_eq!(restored.entries()[0].romanization, None);

        assert!(HistoryLog::from_json("not json", 5).is_err());
    }
}
