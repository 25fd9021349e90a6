//! Decides where a translation comes from.
//!
//! A request is answered by the first source that can serve it:
//!
//! 1. the phrase catalog, matched at the offline threshold
//! 2. the translation cache
//! 3. the remote provider, whose answer is then cached
//! 4. the phrase catalog again, at the lower fallback threshold, when the
//!    provider failed
//!
//! Only when all of them come up empty does the request fail.

use std::sync::Arc;

use phrasebook_config::matcher::MatcherConfig;
use phrasebook_translator::{MAX_INPUT_CHARS, TranslateError, Translator};
use phrasebook_types::{Language, PhraseEntry, TranslationOrigin, TranslationRequest, TranslationResult};
use tokio_util::sync::CancellationToken;

use crate::cache::TranslationCache;
use crate::error::RouteError;
use crate::index::PhraseIndex;
use crate::language::{Romanizer, detect_pair};
use crate::matcher::{MatchResult, find_similar, fuzzy_match};

pub struct TranslationRouter {
    index: Arc<PhraseIndex>,
    cache: Arc<TranslationCache>,
    translator: Option<Arc<dyn Translator>>,
    romanizer: Option<Arc<dyn Romanizer>>,
    config: MatcherConfig,
}

impl TranslationRouter {
    /// Offline-only router; add a provider with [`Self::with_translator`]
    pub fn new(index: Arc<PhraseIndex>, cache: Arc<TranslationCache>, config: MatcherConfig) -> Self {
        Self {
            index,
            cache,
            translator: None,
            romanizer: None,
            config,
        }
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn with_romanizer(mut self, romanizer: Arc<dyn Romanizer>) -> Self {
        self.romanizer = Some(romanizer);
        self
    }

    pub fn index(&self) -> &PhraseIndex {
        &self.index
    }

    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub async fn translate(&self, request: TranslationRequest) -> Result<TranslationResult, RouteError> {
        self.translate_with_cancel(request, &CancellationToken::new())
            .await
    }

    /// Like [`Self::translate`], but a cancelled token aborts a pending
    /// remote call. The cache is left untouched in that case.
    pub async fn translate_with_cancel(
        &self,
        request: TranslationRequest,
        cancel: &CancellationToken,
    ) -> Result<TranslationResult, RouteError> {
        let text = validate(&request.text)?;

        let (source, target) = if request.auto_detect {
            detect_pair(text)
        } else {
            (request.source_lang, request.target_lang)
        };
        if source == target {
            return Err(RouteError::InvalidInput(format!(
                "source and target language are both {source}"
            )));
        }

        if let Some(found) = self.lookup(text, source, self.config.offline_threshold) {
            tracing::info!("Phrasebook hit {} ({:.2})", found.entry.id, found.similarity);
            return Ok(offline_result(found.entry, source, target, TranslationOrigin::Phrasebook));
        }

        if let Some(cached) = self.cache.get(text, source, target) {
            tracing::info!("Cache hit for {} -> {}", source, target);
            return Ok(self.remote_result(cached, source, target, TranslationOrigin::Cache));
        }

        let remote = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!("Translation cancelled");
                return Err(RouteError::Cancelled);
            }
            result = self.call_remote(text, source, target) => result,
        };

        match remote {
            Ok(translated) => {
                self.cache.put(text, source, target, &translated);
                Ok(self.remote_result(translated, source, target, TranslationOrigin::Provider))
            }
            Err(TranslateError::InvalidInput(msg)) => Err(RouteError::InvalidInput(msg)),
            Err(e) => self.degraded_fallback(text, source, target, e),
        }
    }

    /// Catalog match scoring at least `threshold`. The matcher's relaxed
    /// second pass may return weaker hits, those are dropped here.
    fn lookup(&self, text: &str, lang: Language, threshold: f64) -> Option<MatchResult<'_>> {
        fuzzy_match(&self.index, text, lang, threshold).filter(|found| {
            let accepted = found.similarity >= threshold;
            if !accepted {
                tracing::debug!(
                    "Phrase {} scored {:.2}, below {:.2}",
                    found.entry.id,
                    found.similarity,
                    threshold
                );
            }
            accepted
        })
    }

    async fn call_remote(&self, text: &str, source: Language, target: Language) -> Result<String, TranslateError> {
        let Some(translator) = &self.translator else {
            return Err(TranslateError::Unknown(
                "no remote translation provider is configured".to_string(),
            ));
        };

        tracing::debug!("Requesting {} -> {} from {}", source, target, translator.metadata().name);
        translator.translate(text, source, target).await
    }

    fn degraded_fallback(
        &self,
        text: &str,
        source: Language,
        target: Language,
        error: TranslateError,
    ) -> Result<TranslationResult, RouteError> {
        match self.lookup(text, source, self.config.fallback_threshold) {
            Some(found) => {
                tracing::warn!(
                    "Remote translation failed ({}), answering with phrase {} ({:.2})",
                    error,
                    found.entry.id,
                    found.similarity
                );
                Ok(offline_result(
                    found.entry,
                    source,
                    target,
                    TranslationOrigin::DegradedFallback,
                ))
            }
            None => {
                tracing::error!("Remote translation failed: {}", error);
                Err(RouteError::Remote(error))
            }
        }
    }

    fn remote_result(
        &self,
        translated: String,
        source: Language,
        target: Language,
        origin: TranslationOrigin,
    ) -> TranslationResult {
        let romanization = if target.requires_romanization() {
            self.romanizer
                .as_ref()
                .map(|r| r.romanize(&translated))
                .filter(|r| !r.is_empty())
        } else {
            None
        };

        TranslationResult {
            translated_text: translated,
            romanization,
            is_offline: false,
            matched_phrase: None,
            source_lang: source,
            target_lang: target,
            origin,
        }
    }

    /// Translate each text on its own, skipping the ones that fail
    pub async fn translate_batch<S: AsRef<str>>(
        &self,
        texts: &[S],
        source: Language,
        target: Language,
    ) -> Vec<TranslationResult> {
        let mut results = Vec::with_capacity(texts.len());

        for (i, text) in texts.iter().enumerate() {
            let request = TranslationRequest::new(text.as_ref(), source, target);
            match self.translate(request).await {
                Ok(result) => results.push(result),
                Err(e) => tracing::warn!("Batch item {} failed: {}", i, e),
            }
        }

        results
    }

    /// "Did you mean" candidates for `text`
    pub fn suggest(&self, text: &str, lang: Language, limit: usize) -> Vec<MatchResult<'_>> {
        find_similar(&self.index, text, lang, limit)
    }
}

fn validate(text: &str) -> Result<&str, RouteError> {
    let chars = text.chars().count();
    if chars > MAX_INPUT_CHARS {
        return Err(RouteError::InvalidInput(format!(
            "text is {chars} characters long, the limit is {MAX_INPUT_CHARS}"
        )));
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(RouteError::InvalidInput("text is empty".to_string()));
    }
    Ok(trimmed)
}

fn offline_result(
    entry: &PhraseEntry,
    source: Language,
    target: Language,
    origin: TranslationOrigin,
) -> TranslationResult {
    TranslationResult {
        translated_text: entry.text_for(target).to_string(),
        romanization: entry.pronunciation_for(target).map(str::to_string),
        is_offline: true,
        matched_phrase: Some(entry.clone()),
        source_lang: source,
        target_lang: target,
        origin,
    }
}
