//! Mock translator for testing
//!
//! A deterministic, network-free provider used by the test suites and by the
//! `--mock` switch of the command-line front end. It counts every call so
//! tests can assert how often the remote path was taken.
//!
//! # Example
//!
//! ```ignore
//! use phrasebook_translator::{MockMode, MockTranslator, Translator};
//!
//! let mock = MockTranslator::new(MockMode::Suffix);
//! let result = mock.translate("你好", Language::Chinese, Language::Korean).await?;
//! assert_eq!(result, "你好_ko");
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use phrasebook_types::Language;

use crate::{ProviderMetadata, TranslateError, TranslateResult, Translator};

/// Mock translation modes for testing different scenarios
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append the target code: "你好" → "你好_ko"
    Suffix,

    /// Predefined (text, target) → translation, falling back to suffix mode
    Mappings(HashMap<(String, Language), String>),

    /// Fail every call with this error
    Error(TranslateError),

    /// Answer call N with item N; the last item repeats once the script runs out
    Sequence(Vec<TranslateResult<String>>),

    /// Return input unchanged
    NoOp,
}

#[derive(Debug)]
pub struct MockTranslator {
    mode: MockMode,
    /// Per-text failures that take precedence over the mode
    failures: HashMap<String, TranslateError>,
    /// Simulated network delay
    delay: Duration,
    calls: AtomicUsize,
}

impl MockTranslator {
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            failures: HashMap::new(),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mode: MockMode, delay: Duration) -> Self {
        Self {
            delay,
            ..Self::new(mode)
        }
    }

    /// Fail whenever exactly `text` is translated
    pub fn fail_on(mut self, text: impl Into<String>, error: TranslateError) -> Self {
        self.failures.insert(text.into(), error);
        self
    }

    /// Number of translate calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn apply_translation(&self, call: usize, text: &str, to: Language) -> TranslateResult<String> {
        if let Some(error) = self.failures.get(text) {
            return Err(error.clone());
        }

        match &self.mode {
            MockMode::Suffix => Ok(format!("{}_{}", text, to.code())),
            MockMode::Mappings(map) => Ok(map
                .get(&(text.to_string(), to))
                .cloned()
                .unwrap_or_else(|| format!("{}_{}", text, to.code()))),
            MockMode::Error(error) => Err(error.clone()),
            MockMode::Sequence(script) => script
                .get(call)
                .or_else(|| script.last())
                .cloned()
                .unwrap_or_else(|| Err(TranslateError::Unknown("empty mock script".to_string()))),
            MockMode::NoOp => Ok(text.to_string()),
        }
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        _from: Language,
        to: Language,
    ) -> TranslateResult<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.apply_translation(call, text, to)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Mock Translator".to_string(),
            requires_api_key: false,
            free_tier_available: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_suffix_translation() {
        let mock = MockTranslator::new(MockMode::Suffix);
        let result = mock
            .translate("你好", Language::Chinese, Language::Korean)
            .await
            .unwrap();
        assert_eq!(result, "你好_ko");
    }

    #[tokio::test]
    async fn test_mapping_and_fallback() {
        let mut map = HashMap::new();
        map.insert(
            ("我们明天去釜山".to_string(), Language::Korean),
            "우리 내일 부산에 가요".to_string(),
        );
        let mock = MockTranslator::new(MockMode::Mappings(map));

        let mapped = mock
            .translate("我们明天去釜山", Language::Chinese, Language::Korean)
            .await
            .unwrap();
        assert_eq!(mapped, "우리 내일 부산에 가요");

        let unmapped = mock
            .translate("再见", Language::Chinese, Language::Korean)
            .await
            .unwrap();
        assert_eq!(unmapped, "再见_ko");
    }

    #[tokio::test]
    async fn test_sequence_repeats_last_item() {
        let mock = MockTranslator::new(MockMode::Sequence(vec![
            Err(TranslateError::NetworkTimeout),
            Ok("감사합니다".to_string()),
        ]));

        for expected in [
            Err(TranslateError::NetworkTimeout),
            Ok("감사합니다".to_string()),
            Ok("감사합니다".to_string()),
        ] {
            let result = mock
                .translate("谢谢", Language::Chinese, Language::Korean)
                .await;
            assert_eq!(result, expected);
        }
        assert_eq!(mock.calls(), 3);
    }

    #[tokio::test]
    async fn test_fail_on_overrides_mode() {
        let mock = MockTranslator::new(MockMode::Suffix)
            .fail_on("坏", TranslateError::ProviderUnauthorized);

        assert_eq!(
            mock.translate("坏", Language::Chinese, Language::Korean).await,
            Err(TranslateError::ProviderUnauthorized)
        );
        assert_eq!(
            mock.translate("好", Language::Chinese, Language::Korean).await,
            Ok("好_ko".to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_adds_latency() {
        let mock = MockTranslator::with_delay(MockMode::NoOp, Duration::from_millis(50));
        let start = tokio::time::Instant::now();
        let result = mock
            .translate("안녕", Language::Korean, Language::Chinese)
            .await
            .unwrap();

        assert_eq!(result, "안녕");
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn test_provider_name() {
        let mock = MockTranslator::new(MockMode::Suffix);
        assert_eq!(mock.metadata().name, "Mock Translator");
        assert_eq!(mock.calls(), 0);
    }
}
