use phrasebook_types::Language;

const HANGUL_SYLLABLES: std::ops::RangeInclusive<char> = '\u{AC00}'..='\u{D7A3}';

/// Optional trait for languages written in a non-Latin script
pub trait Romanizer: Send + Sync {
    /// Latin transcription of `text`, characters outside the script pass through
    fn romanize(&self, text: &str) -> String;
}

pub fn is_hangul_syllable(c: char) -> bool {
    HANGUL_SYLLABLES.contains(&c)
}

/// Classify the script of `text`: any Hangul syllable means Korean
pub fn detect_language(text: &str) -> Language {
    if text.chars().any(is_hangul_syllable) {
        Language::Korean
    } else {
        Language::Chinese
    }
}

/// Source and target for `text` when the caller asked for detection
pub fn detect_pair(text: &str) -> (Language, Language) {
    let source = detect_language(text.trim());
    (source, source.opposite())
}
