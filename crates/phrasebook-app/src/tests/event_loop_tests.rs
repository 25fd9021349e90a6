use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use phrasebook_translator::{MockMode, MockTranslator, TranslateError, Translator};
use phrasebook_types::{AppEvent, Language, TranslationOrigin};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use super::{ZH_TO_KO, embedded_state, test_state};
use crate::events::event_loop;
use crate::state::AppState;

struct Harness {
    state: Arc<AppState>,
    cancel: CancellationToken,
    input: AsyncSender<AppEvent>,
    output: AsyncReceiver<AppEvent>,
    handle: JoinHandle<anyhow::Result<()>>,
}

impl Harness {
    fn start(translator: Option<Arc<dyn Translator>>) -> Self {
        Self::with_state(test_state(translator))
    }

    fn with_state(state: Arc<AppState>) -> Self {
        let cancel = CancellationToken::new();
        let (input, input_rx) = kanal::unbounded_async();
        let (output_tx, output) = kanal::unbounded_async();

        let handle = tokio::spawn(event_loop(
            state.clone(),
            ZH_TO_KO,
            cancel.clone(),
            input_rx,
            output_tx,
        ));

        Self {
            state,
            cancel,
            input,
            output,
            handle,
        }
    }

    async fn type_text(&self, text: &str) {
        self.input
            .send(AppEvent::TextInput(text.to_string()))
            .await
            .expect("send failed");
    }

    async fn next(&self) -> AppEvent {
        match timeout(Duration::from_secs(2), self.output.recv()).await {
            Ok(Ok(event)) => event,
            Ok(Err(e)) => panic!("Channel error: {}", e),
            Err(_) => panic!("Timeout - no output event"),
        }
    }
}

fn mock(mode: MockMode) -> Option<Arc<dyn Translator>> {
    Some(Arc::new(MockTranslator::new(mode)))
}

#[tokio::test]
async fn test_offline_phrase_is_shown_and_recorded() {
    let harness = Harness::start(None);
    harness.type_text("谢谢").await;

    match harness.next().await {
        AppEvent::ShowTranslation {
            source_text,
            result,
        } => {
            assert_eq!(source_text, "谢谢");
            assert_eq!(result.translated_text, "감사합니다");
            assert_eq!(result.origin, TranslationOrigin::Phrasebook);
            assert!(result.is_offline);
        }
        other => panic!("Expected translation, got {:?}", other),
    }

    let history = harness.state.history.read().await;
    assert_eq!(history.len(), 1);
    assert_eq!(history.entries()[0].target_text, "감사합니다");
}

#[tokio::test]
async fn test_embedded_catalog_greeting() {
    let harness = Harness::with_state(embedded_state());
    harness.type_text("你好").await;

    match harness.next().await {
        AppEvent::ShowTranslation { result, .. } => {
            assert_eq!(result.translated_text, "안녕하세요");
            assert_eq!(result.romanization.as_deref(), Some("annyeonghaseyo"));
            assert_eq!(result.matched_phrase.map(|e| e.id), Some("greeting_01".to_string()));
        }
        other => panic!("Expected translation, got {:?}", other),
    }
}

#[tokio::test]
async fn test_remote_translation_then_cache() {
    let harness = Harness::start(mock(MockMode::Suffix));

    harness.type_text("明天见").await;
    match harness.next().await {
        AppEvent::ShowTranslation { result, .. } => {
            assert_eq!(result.translated_text, "明天见_ko");
            assert_eq!(result.origin, TranslationOrigin::Provider);
            assert!(!result.is_offline);
        }
        other => panic!("Expected translation, got {:?}", other),
    }

    harness.type_text("明天见").await;
    match harness.next().await {
        AppEvent::ShowTranslation { result, .. } => {
            assert_eq!(result.origin, TranslationOrigin::Cache);
        }
        other => panic!("Expected translation, got {:?}", other),
    }

    harness.input.send(AppEvent::ClearCache).await.unwrap();
    assert!(matches!(harness.next().await, AppEvent::ShowMessage(m) if m == "Cache cleared"));
    assert!(harness.state.router.cache().is_empty());
}

#[tokio::test]
async fn test_remote_failure_offers_suggestions() {
    let harness = Harness::start(mock(MockMode::Error(TranslateError::ProviderServerError)));
    harness.type_text("你好呀").await;

    match harness.next().await {
        AppEvent::ShowError(message) => {
            assert!(message.contains("check your network connection"), "{message}");
        }
        other => panic!("Expected error, got {:?}", other),
    }

    match harness.next().await {
        AppEvent::ShowSuggestions {
            source_lang,
            entries,
        } => {
            assert_eq!(source_lang, Language::Chinese);
            let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
            assert_eq!(ids, ["greeting_01", "greeting_03"]);
        }
        other => panic!("Expected suggestions, got {:?}", other),
    }

    assert!(harness.state.history.read().await.is_empty());
}

#[tokio::test]
async fn test_offline_only_miss_reports_error() {
    let harness = Harness::start(None);
    harness.type_text("明天见").await;

    match harness.next().await {
        AppEvent::ShowError(message) => {
            assert!(message.contains("no remote translation provider"), "{message}");
        }
        other => panic!("Expected error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_history_and_stats_commands() {
    let harness = Harness::start(None);

    harness.input.send(AppEvent::ShowHistory).await.unwrap();
    assert!(matches!(harness.next().await, AppEvent::ShowMessage(m) if m == "History is empty"));

    harness.type_text("你好").await;
    harness.next().await;

    harness.input.send(AppEvent::ShowStats).await.unwrap();
    match harness.next().await {
        AppEvent::ShowMessage(m) => {
            assert!(m.starts_with("History: 1 of 20 (1 offline, 0 online, 100% offline)"), "{m}");
        }
        other => panic!("Expected stats, got {:?}", other),
    }
}

#[tokio::test]
async fn test_cancel_interrupts_slow_provider() {
    let slow = MockTranslator::with_delay(MockMode::Suffix, Duration::from_secs(30));
    let harness = Harness::start(Some(Arc::new(slow)));

    harness.type_text("明天见").await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    harness.cancel.cancel();

    assert!(matches!(
        harness.next().await,
        AppEvent::ShowMessage(m) if m == "Translation cancelled"
    ));

    let result = timeout(Duration::from_secs(2), harness.handle).await;
    assert!(matches!(result, Ok(Ok(Ok(())))));
}

#[tokio::test]
async fn test_quit_stops_loop() {
    let harness = Harness::start(None);
    harness.input.send(AppEvent::Quit).await.unwrap();

    let result = timeout(Duration::from_secs(2), harness.handle).await;
    assert!(matches!(result, Ok(Ok(Ok(())))));
    assert!(harness.cancel.is_cancelled());
}
