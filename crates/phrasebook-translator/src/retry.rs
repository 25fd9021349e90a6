//! Retry policy for remote translation calls
//!
//! Each retryable error class maps to a fixed delay and a retry budget. A
//! request is retried at most once per class; when the retry fails too, the
//! error from the first attempt is returned so callers always see the same
//! classification for the same underlying failure.

use std::time::Duration;

use async_trait::async_trait;
use phrasebook_types::Language;

use crate::{ProviderMetadata, TranslateError, TranslateResult, Translator, validate_input};

/// Error classes that are worth retrying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RetryClass {
    /// HTTP 429
    RateLimited,
    /// HTTP 500
    ServerError,
    /// Transport-level timeout
    Timeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delay: Duration,
    pub max_retries: u32,
}

impl RetryClass {
    pub fn policy(&self) -> RetryPolicy {
        match self {
            RetryClass::RateLimited => RetryPolicy {
                delay: Duration::from_millis(2000),
                max_retries: 1,
            },
            RetryClass::ServerError => RetryPolicy {
                delay: Duration::from_millis(1000),
                max_retries: 1,
            },
            RetryClass::Timeout => RetryPolicy {
                delay: Duration::from_millis(3000),
                max_retries: 1,
            },
        }
    }
}

/// Wraps a provider with input validation and the retry policy
pub struct RetryingTranslator<T> {
    inner: T,
}

impl<T: Translator> RetryingTranslator<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T: Translator> Translator for RetryingTranslator<T> {
    async fn translate(
        &self,
        text: &str,
        from: Language,
        to: Language,
    ) -> TranslateResult<String> {
        validate_input(text)?;

        let error = match self.inner.translate(text, from, to).await {
            Ok(translated) => return Ok(translated),
            Err(e) => e,
        };

        let Some(class) = error.retry_class() else {
            tracing::debug!("Not retrying {} -> {}: {}", from, to, error);
            return Err(error);
        };

        let policy = class.policy();
        for attempt in 1..=policy.max_retries {
            tracing::warn!(
                "Translation failed ({}), retrying in {}ms ({}/{})",
                error,
                policy.delay.as_millis(),
                attempt,
                policy.max_retries
            );
            tokio::time::sleep(policy.delay).await;

            match self.inner.translate(text, from, to).await {
                Ok(translated) => return Ok(translated),
                Err(retry_error) => tracing::error!("Retry failed: {}", retry_error),
            }
        }

        Err(error)
    }

    fn metadata(&self) -> ProviderMetadata {
        self.inner.metadata()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::mock::{MockMode, MockTranslator};

    fn retrying(mode: MockMode) -> (Arc<MockTranslator>, RetryingTranslator<Arc<MockTranslator>>) {
        let mock = Arc::new(MockTranslator::new(mode));
        (mock.clone(), RetryingTranslator::new(mock))
    }

    #[test]
    fn test_policy_table() {
        assert_eq!(
            RetryClass::RateLimited.policy().delay,
            Duration::from_millis(2000)
        );
        assert_eq!(
            RetryClass::ServerError.policy().delay,
            Duration::from_millis(1000)
        );
        assert_eq!(RetryClass::Timeout.policy().delay, Duration::from_millis(3000));
        assert_eq!(RetryClass::RateLimited.policy().max_retries, 1);
        assert_eq!(RetryClass::ServerError.policy().max_retries, 1);
        assert_eq!(RetryClass::Timeout.policy().max_retries, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limited_makes_exactly_two_attempts() {
        let (mock, translator) = retrying(MockMode::Error(TranslateError::ProviderRateLimited));
        let start = tokio::time::Instant::now();

        let result = translator
            .translate("你好", Language::Chinese, Language::Korean)
            .await;

        assert_eq!(result, Err(TranslateError::ProviderRateLimited));
        assert_eq!(mock.calls(), 2);
        assert!(start.elapsed() >= Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_server_error_waits_one_second() {
        let (mock, translator) = retrying(MockMode::Error(TranslateError::ProviderServerError));
        let start = tokio::time::Instant::now();

        let result = translator
            .translate("你好", Language::Chinese, Language::Korean)
            .await;

        assert_eq!(result, Err(TranslateError::ProviderServerError));
        assert_eq!(mock.calls(), 2);
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(1000));
        assert!(elapsed < Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_waits_three_seconds() {
        let (mock, translator) = retrying(MockMode::Error(TranslateError::NetworkTimeout));
        let start = tokio::time::Instant::now();

        let result = translator
            .translate("你好", Language::Chinese, Language::Korean)
            .await;

        assert_eq!(result, Err(TranslateError::NetworkTimeout));
        assert_eq!(mock.calls(), 2);
        assert!(start.elapsed() >= Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unauthorized_is_not_retried() {
        let (mock, translator) = retrying(MockMode::Error(TranslateError::ProviderUnauthorized));

        let result = translator
            .translate("你好", Language::Chinese, Language::Korean)
            .await;

        assert_eq!(result, Err(TranslateError::ProviderUnauthorized));
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_translation_is_not_retried() {
        let (mock, translator) = retrying(MockMode::Error(TranslateError::EmptyTranslation));

        let result = translator
            .translate("你好", Language::Chinese, Language::Korean)
            .await;

        assert_eq!(result, Err(TranslateError::EmptyTranslation));
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_success_is_returned() {
        let (mock, translator) = retrying(MockMode::Sequence(vec![
            Err(TranslateError::ProviderServerError),
            Ok("안녕하세요".to_string()),
        ]));

        let result = translator
            .translate("你好", Language::Chinese, Language::Korean)
            .await;

        assert_eq!(result, Ok("안녕하세요".to_string()));
        assert_eq!(mock.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_original_error_surfaces_after_failed_retry() {
        let (mock, translator) = retrying(MockMode::Sequence(vec![
            Err(TranslateError::ProviderRateLimited),
            Err(TranslateError::ProviderServerError),
        ]));

        let result = translator
            .translate("你好", Language::Chinese, Language::Korean)
            .await;

        assert_eq!(result, Err(TranslateError::ProviderRateLimited));
        assert_eq!(mock.calls(), 2);
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_provider() {
        let (mock, translator) = retrying(MockMode::Suffix);

        let result = translator
            .translate("   ", Language::Chinese, Language::Korean)
            .await;

        assert!(matches!(result, Err(TranslateError::InvalidInput(_))));
        assert_eq!(mock.calls(), 0);
    }
}
