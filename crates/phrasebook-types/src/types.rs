use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The two languages the phrasebook translates between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "zh")]
    Chinese,
    #[serde(rename = "ko")]
    Korean,
}

impl Language {
    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Language::Chinese => "zh",
            Language::Korean => "ko",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Chinese => "中文",
            Language::Korean => "한국어",
        }
    }

    /// English name, used in provider prompts
    pub fn english_name(&self) -> &'static str {
        match self {
            Language::Chinese => "Chinese",
            Language::Korean => "Korean",
        }
    }

    pub fn opposite(&self) -> Language {
        match self {
            Language::Chinese => Language::Korean,
            Language::Korean => Language::Chinese,
        }
    }

    /// Whether results in this language carry a romanization
    pub fn requires_romanization(&self) -> bool {
        matches!(self, Language::Korean)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zh" | "chinese" => Ok(Language::Chinese),
            "ko" | "korean" => Ok(Language::Korean),
            other => Err(format!("unsupported language: {other} (expected zh or ko)")),
        }
    }
}

/// Closed set of phrase catalog categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhraseCategory {
    Restaurant,
    Shopping,
    Transportation,
    Emergency,
    Accommodation,
    Greeting,
}

impl PhraseCategory {
    pub const ALL: [PhraseCategory; 6] = [
        PhraseCategory::Restaurant,
        PhraseCategory::Shopping,
        PhraseCategory::Transportation,
        PhraseCategory::Emergency,
        PhraseCategory::Accommodation,
        PhraseCategory::Greeting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PhraseCategory::Restaurant => "restaurant",
            PhraseCategory::Shopping => "shopping",
            PhraseCategory::Transportation => "transportation",
            PhraseCategory::Emergency => "emergency",
            PhraseCategory::Accommodation => "accommodation",
            PhraseCategory::Greeting => "greeting",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            PhraseCategory::Restaurant => "🍜",
            PhraseCategory::Shopping => "🛍️",
            PhraseCategory::Transportation => "🚇",
            PhraseCategory::Emergency => "🆘",
            PhraseCategory::Accommodation => "🏨",
            PhraseCategory::Greeting => "👋",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PhraseCategory::Restaurant => "餐厅",
            PhraseCategory::Shopping => "购物",
            PhraseCategory::Transportation => "交通",
            PhraseCategory::Emergency => "紧急",
            PhraseCategory::Accommodation => "住宿",
            PhraseCategory::Greeting => "问候",
        }
    }
}

impl fmt::Display for PhraseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PhraseCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        PhraseCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| format!("unknown phrase category: {s}"))
    }
}

/// A curated Chinese/Korean phrase pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseEntry {
    pub id: String,
    #[serde(rename = "zh")]
    pub primary_text: String,
    #[serde(rename = "ko")]
    pub secondary_text: String,
    /// Romanization of the Korean text, may be empty
    #[serde(rename = "romanization", default)]
    pub secondary_pronunciation: String,
    pub category: PhraseCategory,
}

impl PhraseEntry {
    pub fn text_for(&self, lang: Language) -> &str {
        match lang {
            Language::Chinese => &self.primary_text,
            Language::Korean => &self.secondary_text,
        }
    }

    /// Catalog pronunciation for `lang`, if that language carries one
    pub fn pronunciation_for(&self, lang: Language) -> Option<&str> {
        if lang.requires_romanization() && !self.secondary_pronunciation.is_empty() {
            Some(&self.secondary_pronunciation)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub source_lang: Language,
    pub target_lang: Language,
    /// Ignore `source_lang` and classify the script of `text` instead
    pub auto_detect: bool,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, source_lang: Language, target_lang: Language) -> Self {
        Self {
            text: text.into(),
            source_lang,
            target_lang,
            auto_detect: false,
        }
    }

    pub fn auto_detect(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_lang: Language::Chinese,
            target_lang: Language::Korean,
            auto_detect: true,
        }
    }
}

/// Where a translation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationOrigin {
    Phrasebook,
    Cache,
    Provider,
    DegradedFallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub translated_text: String,
    pub romanization: Option<String>,
    pub is_offline: bool,
    pub matched_phrase: Option<PhraseEntry>,
    pub source_lang: Language,
    pub target_lang: Language,
    pub origin: TranslationOrigin,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    TextInput(String),
    ShowTranslation {
        source_text: String,
        result: TranslationResult,
    },
    ShowSuggestions {
        source_lang: Language,
        entries: Vec<PhraseEntry>,
    },
    ShowMessage(String),
    ShowError(String),
    ShowHistory,
    ShowStats,
    ClearCache,
    Quit,
}
