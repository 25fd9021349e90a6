use kanal::AsyncSender;
use phrasebook_core::RouteError;
use phrasebook_core::language::detect_pair;
use phrasebook_types::{AppEvent, PhraseEntry, TranslationRequest};
use tokio_util::sync::CancellationToken;

use crate::cli::LangArgs;
use crate::state::AppState;

impl LangArgs {
    pub fn request(&self, text: String) -> TranslationRequest {
        if self.auto {
            TranslationRequest::auto_detect(text)
        } else {
            TranslationRequest::new(text, self.from, self.to)
        }
    }
}

pub async fn handle_text_input(
    state: &AppState,
    text: String,
    langs: LangArgs,
    cancel: &CancellationToken,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let request = langs.request(text.clone());
    let source_lang = if request.auto_detect {
        detect_pair(&text).0
    } else {
        request.source_lang
    };

    match state.router.translate_with_cancel(request, cancel).await {
        Ok(result) => {
            state.history.write().await.record(&text, &result);
            app_to_ui_tx
                .send(AppEvent::ShowTranslation {
                    source_text: text,
                    result,
                })
                .await?;
        }
        Err(RouteError::Cancelled) => {
            app_to_ui_tx
                .send(AppEvent::ShowMessage("Translation cancelled".to_string()))
                .await?;
        }
        Err(e) => {
            tracing::debug!("Translation failed: {:?}", e);
            app_to_ui_tx.send(AppEvent::ShowError(e.to_string())).await?;

            if matches!(e, RouteError::Remote(_)) {
                let limit = state.config.matcher.suggestion_limit;
                let entries: Vec<PhraseEntry> = state
                    .router
                    .suggest(&text, source_lang, limit)
                    .into_iter()
                    .map(|m| m.entry.clone())
                    .collect();

                if !entries.is_empty() {
                    app_to_ui_tx
                        .send(AppEvent::ShowSuggestions {
                            source_lang,
                            entries,
                        })
                        .await?;
                }
            }
        }
    }

    Ok(())
}
