use std::sync::Arc;

use phrasebook_types::Language;

pub mod error;
pub mod mock;
pub mod retry;

pub use error::{TranslateError, TranslateResult};
pub use mock::{MockMode, MockTranslator};
pub use retry::{RetryClass, RetryPolicy, RetryingTranslator};

/// Longest text, in characters, a provider will be asked to translate
pub const MAX_INPUT_CHARS: usize = 5000;

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate text from source to target language, returning plain text
    async fn translate(
        &self,
        text: &str,
        from: Language,
        to: Language,
    ) -> TranslateResult<String>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[async_trait::async_trait]
impl<T: Translator + ?Sized> Translator for Arc<T> {
    async fn translate(
        &self,
        text: &str,
        from: Language,
        to: Language,
    ) -> TranslateResult<String> {
        (**self).translate(text, from, to).await
    }

    fn metadata(&self) -> ProviderMetadata {
        (**self).metadata()
    }
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_api_key: bool,
    pub free_tier_available: bool,
}

/// Reject empty and oversized input before it reaches a provider
pub fn validate_input(text: &str) -> TranslateResult<()> {
    if text.trim().is_empty() {
        return Err(TranslateError::InvalidInput(
            "text to translate is empty".to_string(),
        ));
    }

    let chars = text.chars().count();
    if chars > MAX_INPUT_CHARS {
        return Err(TranslateError::InvalidInput(format!(
            "text is {chars} characters long, the limit is {MAX_INPUT_CHARS}"
        )));
    }

    Ok(())
}
