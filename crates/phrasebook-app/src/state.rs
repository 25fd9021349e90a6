use std::path::PathBuf;
use std::sync::Arc;

use phrasebook_config::Config;
use phrasebook_core::cache::TranslationCache;
use phrasebook_core::history::HistoryLog;
use phrasebook_core::{PhraseIndex, TranslationRouter};
use phrasebook_lang_korean::{CatalogLoader, DeepSeekTranslator, HangulRomanizer};
use phrasebook_translator::{MockMode, MockTranslator, RetryingTranslator, Translator};
use phrasebook_types::{Language, TranslationRequest, TranslationResult};
use tokio::sync::RwLock;

use crate::profile;

pub struct AppState {
    pub config: Config,
    pub router: TranslationRouter,
    pub history: RwLock<HistoryLog>,
    pub history_path: PathBuf,
}

impl AppState {
    /// Wire catalog, cache, provider and history together from `config`
    pub fn build(config: Config, mock: bool) -> anyhow::Result<Self> {
        let catalog = CatalogLoader::load_with_overrides(&config.catalog_paths)?;
        let index = Arc::new(catalog.into_index());
        let history_path = PathBuf::from(&config.history.path);
        let history = profile::load_history(&history_path, config.history.max_size);

        let translator = init_translator(&config, mock)?;
        Ok(Self::with_parts(config, index, translator, history, history_path))
    }

    pub fn with_parts(
        config: Config,
        index: Arc<PhraseIndex>,
        translator: Option<Arc<dyn Translator>>,
        history: HistoryLog,
        history_path: PathBuf,
    ) -> Self {
        let cache = Arc::new(TranslationCache::new(config.cache.ttl()));
        let mut router = TranslationRouter::new(index, cache, config.matcher.clone())
            .with_romanizer(Arc::new(HangulRomanizer::new()));
        if let Some(translator) = translator {
            router = router.with_translator(translator);
        }

        Self {
            config,
            router,
            history: RwLock::new(history),
            history_path,
        }
    }

    /// Translate every text, record the successes and persist history once.
    /// Failed items are logged and left out.
    pub async fn translate_batch(
        &self,
        texts: &[&str],
        from: Language,
        to: Language,
    ) -> anyhow::Result<Vec<(String, TranslationResult)>> {
        let mut translated = Vec::with_capacity(texts.len());

        for (i, text) in texts.iter().enumerate() {
            match self.router.translate(TranslationRequest::new(*text, from, to)).await {
                Ok(result) => translated.push((text.to_string(), result)),
                Err(e) => tracing::warn!("Batch item {} failed: {}", i, e),
            }
        }

        if !translated.is_empty() {
            let mut history = self.history.write().await;
            for (text, result) in &translated {
                history.record(text, result);
            }
        }
        self.save_history().await?;

        Ok(translated)
    }

    pub async fn save_history(&self) -> anyhow::Result<()> {
        let history = self.history.read().await;
        profile::save_history(&self.history_path, &history)
    }
}

fn init_translator(config: &Config, mock: bool) -> anyhow::Result<Option<Arc<dyn Translator>>> {
    if mock {
        tracing::info!("Using mock translator");
        let mock = MockTranslator::new(MockMode::Suffix);
        return Ok(Some(Arc::new(RetryingTranslator::new(mock))));
    }

    if !config.translator.enabled {
        tracing::warn!("Remote translation disabled, phrasebook only");
        return Ok(None);
    }

    if !config.translator.provider.eq_ignore_ascii_case("deepseek") {
        anyhow::bail!(
            "Unsupported translation provider: {}",
            config.translator.provider
        );
    }

    if let Err(e) = config.translator.validate() {
        tracing::warn!("{}, phrasebook only", e);
        return Ok(None);
    }

    let provider = DeepSeekTranslator::from_config(&config.translator)?;
    tracing::info!("Using {} ({})", provider.metadata().name, config.translator.model);
    Ok(Some(Arc::new(RetryingTranslator::new(provider))))
}
