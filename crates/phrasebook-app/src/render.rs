use std::fmt::Write;

use phrasebook_core::cache::CacheStats;
use phrasebook_core::history::{HistoryLog, HistoryStats};
use phrasebook_types::{Language, PhraseCategory, PhraseEntry, TranslationOrigin, TranslationResult};

fn origin_label(origin: TranslationOrigin) -> &'static str {
    match origin {
        TranslationOrigin::Phrasebook => "phrasebook",
        TranslationOrigin::Cache => "cache",
        TranslationOrigin::Provider => "online",
        TranslationOrigin::DegradedFallback => "phrasebook, provider unavailable",
    }
}

pub fn translation(source_text: &str, result: &TranslationResult) -> String {
    let mut out = format!("{} → {}", source_text.trim(), result.translated_text);
    if let Some(romanization) = &result.romanization {
        let _ = write!(out, "\n  {romanization}");
    }

    let _ = write!(out, "\n  [{}", origin_label(result.origin));
    if let Some(entry) = &result.matched_phrase {
        let _ = write!(out, " {} {}", entry.category.icon(), entry.id);
    }
    out.push(']');
    out
}

/// One line per batch item: translation, romanization and origin
pub fn batch_line(result: &TranslationResult) -> String {
    let mut out = result.translated_text.clone();
    if let Some(romanization) = &result.romanization {
        let _ = write!(out, " ({romanization})");
    }
    let _ = write!(out, " [{}]", origin_label(result.origin));
    out
}

pub fn phrase(entry: &PhraseEntry, from: Language) -> String {
    let to = from.opposite();
    let mut out = format!("{} → {}", entry.text_for(from), entry.text_for(to));
    if let Some(pronunciation) = entry.pronunciation_for(to) {
        let _ = write!(out, " ({pronunciation})");
    }
    out
}

pub fn suggestions(entries: &[PhraseEntry], from: Language) -> String {
    if entries.is_empty() {
        return "No similar phrases".to_string();
    }

    let mut out = String::from("Did you mean:");
    for (i, entry) in entries.iter().enumerate() {
        let _ = write!(out, "\n  {}. {}", i + 1, phrase(entry, from));
    }
    out
}

pub fn phrases(entries: &[&PhraseEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("{:<20} {}", e.id, phrase(e, Language::Chinese)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn categories(counts: &[(PhraseCategory, usize)]) -> String {
    counts
        .iter()
        .map(|(c, n)| format!("{} {:<15} {} ({n})", c.icon(), c.as_str(), c.display_name()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn history(log: &HistoryLog) -> String {
    if log.is_empty() {
        return "History is empty".to_string();
    }

    log.entries()
        .iter()
        .map(|r| {
            let tag = if r.is_offline { "offline" } else { "online" };
            let mut line = format!("[{tag}] {} → {}", r.source_text, r.target_text);
            if let Some(romanization) = &r.romanization {
                let _ = write!(line, " ({romanization})");
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn stats(history: &HistoryStats, cache: &CacheStats) -> String {
    format!(
        "History: {} of {} ({} offline, {} online, {:.0}% offline)\nCache: {} entries",
        history.total,
        history.max_size,
        history.offline,
        history.online,
        history.offline_rate * 100.0,
        cache.size
    )
}
