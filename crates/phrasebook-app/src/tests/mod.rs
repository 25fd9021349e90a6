use std::path::PathBuf;
use std::sync::Arc;

use phrasebook_config::Config;
use phrasebook_core::PhraseIndex;
use phrasebook_core::history::HistoryLog;
use phrasebook_lang_korean::CatalogLoader;
use phrasebook_translator::Translator;
use phrasebook_types::{Language, PhraseCategory, PhraseEntry};

use crate::cli::LangArgs;
use crate::state::AppState;

mod event_loop_tests;

pub(crate) const ZH_TO_KO: LangArgs = LangArgs {
    from: Language::Chinese,
    to: Language::Korean,
    auto: false,
};

fn entry(id: &str, zh: &str, ko: &str) -> PhraseEntry {
    PhraseEntry {
        id: id.to_string(),
        primary_text: zh.to_string(),
        secondary_text: ko.to_string(),
        secondary_pronunciation: String::new(),
        category: PhraseCategory::Greeting,
    }
}

pub(crate) fn greetings() -> Arc<PhraseIndex> {
    Arc::new(PhraseIndex::build(vec![
        entry("greeting_01", "你好", "안녕하세요"),
        entry("greeting_02", "谢谢", "감사합니다"),
        entry("greeting_03", "你好吗？", "잘 지내세요?"),
    ]))
}

pub(crate) fn test_state(translator: Option<Arc<dyn Translator>>) -> Arc<AppState> {
    Arc::new(AppState::with_parts(
        Config::default(),
        greetings(),
        translator,
        HistoryLog::default(),
        PathBuf::from("unused-history.json"),
    ))
}

pub(crate) fn embedded_state() -> Arc<AppState> {
    let catalog = CatalogLoader::load_embedded().expect("embedded catalog loads");
    Arc::new(AppState::with_parts(
        Config::default(),
        Arc::new(catalog.into_index()),
        None,
        HistoryLog::default(),
        PathBuf::from("unused-history.json"),
    ))
}
